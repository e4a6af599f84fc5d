//! Canonical encoding of mint requests.
//!
//! The verifying contract recomputes the same encoding on-chain, so the
//! byte layout is a wire-compatibility requirement: the four request fields
//! are ABI-encoded as the parameter tuple `(string, string, uint256,
//! uint256)` in field order. Any deviation in order, padding, or type width
//! breaks signature verification.

use alloy_primitives::U256;
use alloy_sol_types::SolValue;

use crate::error::{MintError, MintResult};

/// A single mint request, immutable once constructed.
///
/// `nonce` is the per-request replay-protection counter expected by the
/// verifying contract (current on-chain nonce plus one). It is distinct
/// from the owner's account-level transaction nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    /// Identifier of the storage node the mint is vouched for.
    pub node_id: String,
    /// Content URI associated with the mint.
    pub uri: String,
    /// Content size in bytes.
    pub size: U256,
    /// Replay-protection counter.
    pub nonce: U256,
}

impl MintRequest {
    /// Construct a request, rejecting empty text fields.
    ///
    /// Integer width is enforced by `U256` itself; callers parsing decimal
    /// input must map parse failures to [`MintError::Encoding`].
    pub fn new(
        node_id: impl Into<String>,
        uri: impl Into<String>,
        size: U256,
        nonce: U256,
    ) -> MintResult<Self> {
        let node_id = node_id.into();
        let uri = uri.into();
        if node_id.is_empty() {
            return Err(MintError::Encoding("node id must not be empty".to_string()));
        }
        if uri.is_empty() {
            return Err(MintError::Encoding("uri must not be empty".to_string()));
        }
        Ok(Self {
            node_id,
            uri,
            size,
            nonce,
        })
    }
}

/// ABI-encode the request fields as `(string, string, uint256, uint256)`
/// parameters.
///
/// Deterministic: identical field values produce byte-identical output.
pub fn encode_request(request: &MintRequest) -> Vec<u8> {
    (
        request.node_id.as_str(),
        request.uri.as_str(),
        request.size,
        request.nonce,
    )
        .abi_encode_params()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn golden_request() -> MintRequest {
        MintRequest::new(
            "f0123",
            "http://test",
            U256::from(1_000_000_000u64),
            U256::from(1u64),
        )
        .expect("golden request is valid")
    }

    #[test]
    fn test_rejects_empty_fields() {
        let err = MintRequest::new("", "http://test", U256::ZERO, U256::ZERO).unwrap_err();
        assert!(matches!(err, MintError::Encoding(_)));

        let err = MintRequest::new("f0123", "", U256::ZERO, U256::ZERO).unwrap_err();
        assert!(matches!(err, MintError::Encoding(_)));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let request = golden_request();
        assert_eq!(encode_request(&request), encode_request(&request));

        let rebuilt = MintRequest::new(
            request.node_id.clone(),
            request.uri.clone(),
            request.size,
            request.nonce,
        )
        .unwrap();
        assert_eq!(encode_request(&request), encode_request(&rebuilt));
    }

    #[test]
    fn test_golden_vector_layout() {
        // Two dynamic strings and two uint256 values: four 32-byte head
        // slots, then two length-prefixed tails.
        let payload = encode_request(&golden_request());
        assert_eq!(payload.len(), 256);

        // Head slot 0: offset of the first string tail (4 * 32 = 0x80).
        assert_eq!(U256::from_be_slice(&payload[0..32]), U256::from(0x80u64));
        // Head slot 1: offset of the second string tail (0x80 + 0x40 = 0xc0).
        assert_eq!(U256::from_be_slice(&payload[32..64]), U256::from(0xc0u64));
        // Head slots 2 and 3: the integer fields, left-padded.
        assert_eq!(
            U256::from_be_slice(&payload[64..96]),
            U256::from(1_000_000_000u64)
        );
        assert_eq!(U256::from_be_slice(&payload[96..128]), U256::from(1u64));

        // First tail: length 5, then "f0123" right-padded to a slot.
        assert_eq!(U256::from_be_slice(&payload[128..160]), U256::from(5u64));
        assert_eq!(&payload[160..165], b"f0123");
        assert!(payload[165..192].iter().all(|&b| b == 0));

        // Second tail: length 11, then "http://test" right-padded.
        assert_eq!(U256::from_be_slice(&payload[192..224]), U256::from(11u64));
        assert_eq!(&payload[224..235], b"http://test");
        assert!(payload[235..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_field_order_is_significant() {
        let request = golden_request();
        let swapped = MintRequest::new(
            request.uri.clone(),
            request.node_id.clone(),
            request.size,
            request.nonce,
        )
        .unwrap();
        assert_ne!(encode_request(&request), encode_request(&swapped));
    }
}
