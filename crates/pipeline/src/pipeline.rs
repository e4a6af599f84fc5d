//! End-to-end mint pipeline.
//!
//! One `run` call performs one submission: read contract state, encode the
//! request, derive the digests, sign with the encoder key, assemble the
//! owner transaction from fresh chain reads, submit, and wait for
//! inclusion. Any stage failure aborts the invocation with the originating
//! error; no stage is retried individually and nothing is checkpointed.

use std::sync::Arc;

use alloy_primitives::U256;

use crate::assemble;
use crate::chain::{ChainClient, Receipt};
use crate::config::PipelineConfig;
use crate::contract::{mint_calldata, MintContract};
use crate::digest::digest_payload;
use crate::encoding::{encode_request, MintRequest};
use crate::error::{MintError, MintResult};
use crate::signer::KeyProvider;
use crate::submit;

/// Drives one mint authorization and submission.
pub struct MintPipeline {
    config: PipelineConfig,
    client: Arc<dyn ChainClient>,
    encoder: Arc<dyn KeyProvider>,
    owner: Arc<dyn KeyProvider>,
    /// The owner's account nonce is a serialization point: at most one
    /// submission may be in flight per owner account.
    submission_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for MintPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MintPipeline {
    /// Build a pipeline, validating the configuration and identities.
    ///
    /// The encoder vouches and never transacts; the owner transacts and
    /// never vouches. A single key in both roles is rejected.
    pub fn new(
        config: PipelineConfig,
        client: Arc<dyn ChainClient>,
        encoder: Arc<dyn KeyProvider>,
        owner: Arc<dyn KeyProvider>,
    ) -> MintResult<Self> {
        config.validate()?;
        if encoder.address() == owner.address() {
            return Err(MintError::Config(
                "encoder and owner must be distinct identities".to_string(),
            ));
        }
        Ok(Self {
            config,
            client,
            encoder,
            owner,
            submission_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Run one submission end to end and return the inclusion receipt.
    pub async fn run(&self, node_id: &str, uri: &str, size: U256) -> MintResult<Receipt> {
        tracing::info!("encoder address: {:#x}", self.encoder.address());
        tracing::info!("owner address: {:#x}", self.owner.address());

        let contract = MintContract::new(self.config.contract, Arc::clone(&self.client));

        // The request nonce is derived from contract state, so the reads
        // come before any encoding.
        let current = contract.current_nonce().await?;
        let data_manager = contract.data_manager().await?;
        let sys_manager = contract.sys_manager().await?;
        let nonce = current
            .checked_add(U256::from(1u64))
            .ok_or_else(|| MintError::ChainQuery("contract mint nonce at maximum".to_string()))?;

        tracing::info!("request nonce: {nonce}");
        tracing::info!("data manager: {data_manager:#x}");
        tracing::info!("sys manager: {sys_manager:#x}");

        let request = MintRequest::new(node_id, uri, size, nonce)?;

        let payload = encode_request(&request);
        let digest = digest_payload(&payload);
        let signature = self.encoder.sign_digest(digest.signed)?;

        tracing::info!("raw digest: {:#x}", digest.raw);
        tracing::info!("signed digest: {:#x}", digest.signed);
        tracing::info!("signature: 0x{}", hex::encode(signature.as_bytes()));

        // Held from the nonce query until the submission settles, so two
        // concurrent runs cannot race for the same account nonce.
        let _guard = self.submission_lock.lock().await;

        let params = assemble::prepare(
            self.client.as_ref(),
            self.owner.address(),
            self.config.gas_limit,
        )
        .await?;
        tracing::info!(
            "account nonce: {}, gas price: {} wei",
            params.nonce,
            params.gas_price
        );

        let calldata = mint_calldata(&request, digest.raw, &signature);
        let raw_tx = assemble::build_mint_transaction(
            self.owner.as_ref(),
            self.config.chain_id,
            self.config.contract,
            calldata,
            &params,
        )?;

        let receipt = submit::submit_and_wait(
            self.client.as_ref(),
            &raw_tx,
            self.config.inclusion_timeout,
            self.config.receipt_poll_interval,
        )
        .await?;

        tracing::info!("mined in block {}", receipt.block_number);
        Ok(receipt)
    }
}
