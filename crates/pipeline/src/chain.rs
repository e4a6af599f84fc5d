//! Chain client abstraction.
//!
//! The pipeline depends on the chain endpoint only through [`ChainClient`]:
//! three read operations, one write, and a receipt lookup. The production
//! implementation is the JSON-RPC client in [`crate::rpc`]; tests substitute
//! scripted in-memory clients.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;

use crate::error::MintResult;

/// Minimal view of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    /// Hash of the transaction the receipt belongs to.
    pub tx_hash: B256,
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Execution status reported by the node.
    pub success: bool,
}

/// Account-level parameters for one submission attempt.
///
/// Constructed from live chain state immediately before submission and
/// never reused: a retry must re-fetch both the nonce and the gas price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxParams {
    /// The owner's pending transaction count, used as the account nonce.
    pub nonce: u64,
    /// Gas price suggested by the endpoint, in wei.
    pub gas_price: u128,
    /// Fixed gas limit for the mint call.
    pub gas_limit: u64,
}

/// Remote chain operations the pipeline depends on.
///
/// All operations may fail with network-class errors; failures propagate as
/// [`crate::MintError::ChainQuery`] or [`crate::MintError::Submission`].
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The account's pending-transaction count.
    async fn pending_nonce(&self, address: Address) -> MintResult<u64>;

    /// The gas price currently suggested by the endpoint, in wei.
    async fn gas_price(&self) -> MintResult<U256>;

    /// Execute a read-only contract call and return the raw return data.
    async fn call(&self, to: Address, data: Vec<u8>) -> MintResult<Vec<u8>>;

    /// Broadcast a signed raw transaction, returning its hash.
    async fn send_raw_transaction(&self, raw_tx: &[u8]) -> MintResult<B256>;

    /// Look up the receipt for a transaction, if it has been mined.
    async fn transaction_receipt(&self, tx_hash: B256) -> MintResult<Option<Receipt>>;
}
