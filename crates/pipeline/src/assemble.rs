//! Transaction assembly for the mint submission.

use alloy_consensus::{SignableTransaction, TxLegacy};
use alloy_primitives::{Address, Bytes, TxKind, U256};

use crate::chain::{ChainClient, TxParams};
use crate::error::{MintError, MintResult};
use crate::signer::KeyProvider;

/// Default gas limit for the mint call, in gas units.
pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

/// Query live chain state and build parameters for one submission attempt.
///
/// The pending-nonce and gas-price reads are independent and issued
/// concurrently. Either failing is fatal for this invocation; a retry must
/// call this again with fresh queries rather than reuse stale parameters.
pub async fn prepare(
    client: &dyn ChainClient,
    owner: Address,
    gas_limit: u64,
) -> MintResult<TxParams> {
    let (nonce, gas_price) = tokio::try_join!(client.pending_nonce(owner), client.gas_price())?;
    let gas_price: u128 = gas_price.try_into().map_err(|_| {
        MintError::ChainQuery(format!("suggested gas price {gas_price} exceeds 128 bits"))
    })?;
    Ok(TxParams {
        nonce,
        gas_price,
        gas_limit,
    })
}

/// Assemble and sign the legacy transaction carrying the mint calldata.
///
/// Zero value, explicit account nonce, configured gas limit, queried gas
/// price; the owner key signs the EIP-155 hash for the configured chain.
pub fn build_mint_transaction(
    owner: &dyn KeyProvider,
    chain_id: u64,
    contract: Address,
    calldata: Vec<u8>,
    params: &TxParams,
) -> MintResult<Vec<u8>> {
    let tx = TxLegacy {
        chain_id: Some(chain_id),
        nonce: params.nonce,
        gas_price: params.gas_price,
        gas_limit: params.gas_limit,
        to: TxKind::Call(contract),
        value: U256::ZERO,
        input: Bytes::from(calldata),
    };

    let signature = owner.sign_digest(tx.signature_hash())?.to_parity_signature();
    let signed = tx.into_signed(signature);

    let mut raw = Vec::new();
    signed.rlp_encode(&mut raw);
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Receipt;
    use crate::signer::LocalKeyProvider;
    use alloy_primitives::B256;
    use async_trait::async_trait;

    struct ReadsOnly {
        nonce: u64,
        gas_price: U256,
    }

    #[async_trait]
    impl ChainClient for ReadsOnly {
        async fn pending_nonce(&self, _address: Address) -> MintResult<u64> {
            Ok(self.nonce)
        }

        async fn gas_price(&self) -> MintResult<U256> {
            Ok(self.gas_price)
        }

        async fn call(&self, _to: Address, _data: Vec<u8>) -> MintResult<Vec<u8>> {
            unimplemented!("not used by prepare")
        }

        async fn send_raw_transaction(&self, _raw_tx: &[u8]) -> MintResult<B256> {
            unimplemented!("not used by prepare")
        }

        async fn transaction_receipt(&self, _tx_hash: B256) -> MintResult<Option<Receipt>> {
            unimplemented!("not used by prepare")
        }
    }

    fn owner() -> LocalKeyProvider {
        LocalKeyProvider::from_hex(
            "0x1111111111111111111111111111111111111111111111111111111111111111",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_prepare_combines_live_reads() {
        let client = ReadsOnly {
            nonce: 7,
            gas_price: U256::from(1_000_000_000u64),
        };
        let params = prepare(&client, Address::repeat_byte(0x01), DEFAULT_GAS_LIMIT)
            .await
            .unwrap();

        assert_eq!(params.nonce, 7);
        assert_eq!(params.gas_price, 1_000_000_000);
        assert_eq!(params.gas_limit, DEFAULT_GAS_LIMIT);
    }

    #[tokio::test]
    async fn test_prepare_rejects_oversized_gas_price() {
        let client = ReadsOnly {
            nonce: 0,
            gas_price: U256::MAX,
        };
        let err = prepare(&client, Address::repeat_byte(0x01), DEFAULT_GAS_LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, MintError::ChainQuery(_)));
    }

    #[test]
    fn test_build_mint_transaction_is_deterministic() {
        let owner = owner();
        let params = TxParams {
            nonce: 3,
            gas_price: 2_000_000_000,
            gas_limit: DEFAULT_GAS_LIMIT,
        };
        let contract = Address::repeat_byte(0x42);

        let tx1 =
            build_mint_transaction(&owner, 5, contract, vec![1, 2, 3, 4], &params).unwrap();
        let tx2 =
            build_mint_transaction(&owner, 5, contract, vec![1, 2, 3, 4], &params).unwrap();

        assert_eq!(tx1, tx2);
        // Legacy transactions are a bare RLP list, no type byte.
        assert!(tx1[0] >= 0xc0);
    }

    #[test]
    fn test_build_mint_transaction_binds_params() {
        let owner = owner();
        let contract = Address::repeat_byte(0x42);
        let base = TxParams {
            nonce: 3,
            gas_price: 2_000_000_000,
            gas_limit: DEFAULT_GAS_LIMIT,
        };
        let bumped = TxParams { nonce: 4, ..base };

        let tx1 = build_mint_transaction(&owner, 5, contract, vec![1, 2, 3], &base).unwrap();
        let tx2 = build_mint_transaction(&owner, 5, contract, vec![1, 2, 3], &bumped).unwrap();
        let tx3 = build_mint_transaction(&owner, 6, contract, vec![1, 2, 3], &base).unwrap();

        assert_ne!(tx1, tx2);
        assert_ne!(tx1, tx3);
    }
}
