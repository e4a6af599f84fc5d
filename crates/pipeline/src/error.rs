//! Error types for the mint pipeline.

use alloy_primitives::B256;
use thiserror::Error;

/// Errors that can abort a mint submission.
///
/// Every variant is terminal for the current invocation: a half-completed
/// authorization has no independent value, so no stage is retried on its
/// own. A caller that wants to retry must restart the whole pipeline from
/// fresh chain reads.
#[derive(Debug, Error)]
pub enum MintError {
    /// Missing or malformed configuration value (key, address, parameter).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A read against the chain endpoint failed.
    #[error("chain query failed: {0}")]
    ChainQuery(String),

    /// A mint request field cannot be canonically encoded.
    #[error("mint request encoding failed: {0}")]
    Encoding(String),

    /// The signing key or produced signature is malformed, including the
    /// unrecoverable-recovery-byte case.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The node rejected the submitted transaction.
    #[error("transaction submission failed: {0}")]
    Submission(String),

    /// The transaction was broadcast but not mined within the configured
    /// bound. Its outcome is unknown and must be resolved out of band.
    #[error("transaction {tx_hash} not mined within {waited_secs}s; outcome unknown")]
    InclusionTimeout { tx_hash: B256, waited_secs: u64 },
}

/// Result type for pipeline operations.
pub type MintResult<T> = Result<T, MintError>;
