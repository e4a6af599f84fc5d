//! HTTP JSON-RPC implementation of [`ChainClient`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::chain::{ChainClient, Receipt};
use crate::error::{MintError, MintResult};

/// JSON-RPC 2.0 client over HTTP.
pub struct HttpChainClient {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpChainClient {
    /// Build a client for the given endpoint with a per-request timeout.
    pub fn new(url: String, timeout: Duration) -> MintResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MintError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    async fn call_method(&self, method: &str, params: Value) -> Result<Value, String> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("RPC {method} request failed: {e}"))?;

        let status = response.status();
        let value: Value = response
            .json()
            .await
            .map_err(|e| format!("RPC {method} invalid JSON response: {e}"))?;

        if !status.is_success() {
            return Err(format!("RPC {method} HTTP {status}: {value}"));
        }
        if let Some(err) = value.get("error") {
            return Err(format!("RPC {method} error: {err}"));
        }

        value
            .get("result")
            .cloned()
            .ok_or_else(|| format!("RPC {method} missing result field"))
    }

    async fn call_string(&self, method: &str, params: Value) -> Result<String, String> {
        let result = self.call_method(method, params).await?;
        result
            .as_str()
            .map(ToOwned::to_owned)
            .ok_or_else(|| format!("RPC {method} returned non-string: {result}"))
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn pending_nonce(&self, address: Address) -> MintResult<u64> {
        let value = self
            .call_string(
                "eth_getTransactionCount",
                json!([format!("{address:#x}"), "pending"]),
            )
            .await
            .map_err(MintError::ChainQuery)?;
        parse_hex_u64(&value).map_err(MintError::ChainQuery)
    }

    async fn gas_price(&self) -> MintResult<U256> {
        let value = self
            .call_string("eth_gasPrice", json!([]))
            .await
            .map_err(MintError::ChainQuery)?;
        parse_hex_u256(&value).map_err(MintError::ChainQuery)
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> MintResult<Vec<u8>> {
        let value = self
            .call_string(
                "eth_call",
                json!([
                    {
                        "to": format!("{to:#x}"),
                        "data": format!("0x{}", hex::encode(data)),
                    },
                    "latest",
                ]),
            )
            .await
            .map_err(MintError::ChainQuery)?;
        parse_hex_bytes(&value).map_err(MintError::ChainQuery)
    }

    async fn send_raw_transaction(&self, raw_tx: &[u8]) -> MintResult<B256> {
        let value = self
            .call_string(
                "eth_sendRawTransaction",
                json!([format!("0x{}", hex::encode(raw_tx))]),
            )
            .await
            .map_err(MintError::Submission)?;
        parse_hex_b256(&value).map_err(MintError::Submission)
    }

    async fn transaction_receipt(&self, tx_hash: B256) -> MintResult<Option<Receipt>> {
        let result = self
            .call_method("eth_getTransactionReceipt", json!([format!("{tx_hash:#x}")]))
            .await
            .map_err(MintError::ChainQuery)?;
        receipt_from_value(tx_hash, &result).map_err(MintError::ChainQuery)
    }
}

/// Parse a receipt object as returned by `eth_getTransactionReceipt`.
///
/// `null` means the transaction is not mined yet; a receipt without a block
/// number is still pending as well.
fn receipt_from_value(tx_hash: B256, value: &Value) -> Result<Option<Receipt>, String> {
    if value.is_null() {
        return Ok(None);
    }

    let block_number = match value.get("blockNumber") {
        Some(Value::String(s)) => parse_hex_u64(s)?,
        Some(Value::Null) | None => return Ok(None),
        Some(other) => return Err(format!("receipt blockNumber is not a string: {other}")),
    };

    let success = match value.get("status") {
        Some(Value::String(s)) => parse_hex_u64(s)? == 1,
        // Pre-Byzantium receipts carry no status; treat inclusion as success.
        _ => true,
    };

    Ok(Some(Receipt {
        tx_hash,
        block_number,
        success,
    }))
}

fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

fn parse_hex_u64(input: &str) -> Result<u64, String> {
    let value = strip_hex_prefix(input);
    if value.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(value, 16).map_err(|e| format!("invalid hex u64 '{input}': {e}"))
}

fn parse_hex_u256(input: &str) -> Result<U256, String> {
    let value = strip_hex_prefix(input);
    if value.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(value, 16).map_err(|e| format!("invalid hex u256 '{input}': {e}"))
}

fn parse_hex_bytes(input: &str) -> Result<Vec<u8>, String> {
    hex::decode(strip_hex_prefix(input)).map_err(|e| format!("invalid hex bytes '{input}': {e}"))
}

fn parse_hex_b256(input: &str) -> Result<B256, String> {
    let bytes = parse_hex_bytes(input)?;
    if bytes.len() != 32 {
        return Err(format!("expected 32-byte hash, got {} bytes", bytes.len()));
    }
    Ok(B256::from_slice(&bytes))
}
