//! Typed binding for the target mint contract.
//!
//! The selectors are derived from the deployed contract's ABI, so the
//! function signatures here are wire-compatible requirements, not naming
//! choices.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};

use crate::chain::ChainClient;
use crate::encoding::MintRequest;
use crate::error::{MintError, MintResult};
use crate::signer::MintSignature;

sol! {
    function currNonce() external view returns (uint256);
    function dataMgr() external view returns (address);
    function sysMgr() external view returns (address);
    function mint(
        string nodeId,
        string uri,
        uint256 size,
        uint256 nonce,
        bytes32 digest,
        bytes signature
    ) external;
}

/// Remote-call surface of the mint contract.
///
/// Reads go through `eth_call`; the write method only produces calldata,
/// since the signed transaction around it is assembled separately.
pub struct MintContract {
    address: Address,
    client: Arc<dyn ChainClient>,
}

impl MintContract {
    pub fn new(address: Address, client: Arc<dyn ChainClient>) -> Self {
        Self { address, client }
    }

    /// Contract address this binding points at.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The contract's current mint nonce.
    pub async fn current_nonce(&self) -> MintResult<U256> {
        let data = self
            .client
            .call(self.address, currNonceCall {}.abi_encode())
            .await?;
        let decoded = currNonceCall::abi_decode_returns(&data, true)
            .map_err(|e| MintError::ChainQuery(format!("currNonce return invalid: {e}")))?;
        Ok(decoded._0)
    }

    /// The data-manager address registered in the contract.
    pub async fn data_manager(&self) -> MintResult<Address> {
        let data = self
            .client
            .call(self.address, dataMgrCall {}.abi_encode())
            .await?;
        let decoded = dataMgrCall::abi_decode_returns(&data, true)
            .map_err(|e| MintError::ChainQuery(format!("dataMgr return invalid: {e}")))?;
        Ok(decoded._0)
    }

    /// The system-manager address registered in the contract.
    pub async fn sys_manager(&self) -> MintResult<Address> {
        let data = self
            .client
            .call(self.address, sysMgrCall {}.abi_encode())
            .await?;
        let decoded = sysMgrCall::abi_decode_returns(&data, true)
            .map_err(|e| MintError::ChainQuery(format!("sysMgr return invalid: {e}")))?;
        Ok(decoded._0)
    }
}

/// Calldata for the mint entry point: the request fields, the raw payload
/// digest, and the encoder's signature over the prefixed digest.
pub fn mint_calldata(
    request: &MintRequest,
    raw_digest: B256,
    signature: &MintSignature,
) -> Vec<u8> {
    mintCall {
        nodeId: request.node_id.clone(),
        uri: request.uri.clone(),
        size: request.size,
        nonce: request.nonce,
        digest: raw_digest,
        signature: Bytes::copy_from_slice(signature.as_bytes()),
    }
    .abi_encode()
}
