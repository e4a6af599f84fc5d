//! Transaction submission and bounded inclusion wait.

use std::time::Duration;

use alloy_primitives::B256;
use tokio::time::Instant;

use crate::chain::{ChainClient, Receipt};
use crate::error::{MintError, MintResult};

/// Broadcast a signed raw transaction and wait for it to be mined.
///
/// Submission is a single best-effort attempt: a node rejection is fatal,
/// since retrying with a stale request nonce would produce an invalid mint
/// request once another transaction changes the on-chain counter.
pub async fn submit_and_wait(
    client: &dyn ChainClient,
    raw_tx: &[u8],
    inclusion_timeout: Duration,
    poll_interval: Duration,
) -> MintResult<Receipt> {
    let tx_hash = client.send_raw_transaction(raw_tx).await?;
    tracing::info!("transaction accepted into pending pool: {tx_hash:#x}");
    wait_mined(client, tx_hash, inclusion_timeout, poll_interval).await
}

/// Poll for the receipt until inclusion or the deadline.
///
/// Hitting the deadline, or a failing receipt read, does not imply the
/// transaction failed: it was already broadcast and cannot be recalled, so
/// its outcome must be resolved out of band.
pub async fn wait_mined(
    client: &dyn ChainClient,
    tx_hash: B256,
    inclusion_timeout: Duration,
    poll_interval: Duration,
) -> MintResult<Receipt> {
    let deadline = Instant::now() + inclusion_timeout;

    loop {
        match client.transaction_receipt(tx_hash).await {
            Ok(Some(receipt)) => return Ok(receipt),
            Ok(None) => {}
            Err(e) => {
                return Err(MintError::ChainQuery(format!(
                    "receipt wait for {tx_hash:#x} failed, transaction outcome unknown: {e}"
                )))
            }
        }

        if Instant::now() + poll_interval > deadline {
            return Err(MintError::InclusionTimeout {
                tx_hash,
                waited_secs: inclusion_timeout.as_secs(),
            });
        }
        tokio::time::sleep(poll_interval).await;
    }
}
