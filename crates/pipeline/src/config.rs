//! Startup configuration for the pipeline.
//!
//! Built once at process start and passed by reference; there is no
//! hot-reload. Private keys are deliberately not part of this struct — they
//! are parsed into key providers separately and held only in memory.

use std::time::Duration;

use alloy_primitives::Address;

use crate::assemble::DEFAULT_GAS_LIMIT;
use crate::error::{MintError, MintResult};

/// Process-wide configuration for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Chain endpoint URL.
    pub rpc_url: String,
    /// Chain identifier used for replay-protected owner signatures.
    pub chain_id: u64,
    /// Address of the mint contract.
    pub contract: Address,
    /// Gas limit for the mint transaction.
    pub gas_limit: u64,
    /// Timeout applied to each individual RPC request.
    pub request_timeout: Duration,
    /// Upper bound on the wait for transaction inclusion.
    pub inclusion_timeout: Duration,
    /// Interval between receipt polls while waiting for inclusion.
    pub receipt_poll_interval: Duration,
}

impl PipelineConfig {
    /// Configuration with default gas and timing parameters.
    pub fn new(rpc_url: String, chain_id: u64, contract: Address) -> Self {
        Self {
            rpc_url,
            chain_id,
            contract,
            gas_limit: DEFAULT_GAS_LIMIT,
            request_timeout: Self::default_request_timeout(),
            inclusion_timeout: Self::default_inclusion_timeout(),
            receipt_poll_interval: Self::default_receipt_poll_interval(),
        }
    }

    /// Default per-request RPC timeout: 3 seconds.
    pub const fn default_request_timeout() -> Duration {
        Duration::from_millis(3000)
    }

    /// Default inclusion wait bound: 180 seconds.
    pub const fn default_inclusion_timeout() -> Duration {
        Duration::from_secs(180)
    }

    /// Default receipt poll interval: 2 seconds.
    pub const fn default_receipt_poll_interval() -> Duration {
        Duration::from_secs(2)
    }

    /// Reject configurations that cannot produce a valid submission.
    pub fn validate(&self) -> MintResult<()> {
        let mut errors = Vec::new();

        if self.rpc_url.is_empty() {
            errors.push("rpc_url must not be empty".to_string());
        }
        if self.chain_id == 0 {
            errors.push("chain_id must be > 0".to_string());
        }
        if self.gas_limit == 0 {
            errors.push("gas_limit must be > 0".to_string());
        }
        if self.inclusion_timeout.is_zero() {
            errors.push("inclusion_timeout must be > 0".to_string());
        }
        if self.receipt_poll_interval.is_zero() {
            errors.push("receipt_poll_interval must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MintError::Config(errors.join("; ")))
        }
    }
}
