//! Two-stage digest over the canonical payload.
//!
//! Stage one hashes the encoded request; stage two wraps that hash in the
//! EIP-191 personal-message prefix and hashes again. The signature is
//! produced over the prefixed hash, which keeps it from being replayable as
//! a raw transaction signature. The contract receives the stage-one hash
//! and re-derives the prefixed hash itself before recovering the signer.

use alloy_primitives::{keccak256, B256};

/// EIP-191 prefix for a 32-byte personal message.
const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// The pair of digests derived from one encoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintDigest {
    /// `keccak256(payload)` — passed on-chain so the contract can recompute
    /// the signed digest.
    pub raw: B256,
    /// `keccak256(prefix ++ raw)` — the value actually signed.
    pub signed: B256,
}

/// Derive both digests from an encoded payload. Total for any input.
pub fn digest_payload(payload: &[u8]) -> MintDigest {
    let raw = keccak256(payload);

    let mut message = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + 32);
    message.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    message.extend_from_slice(raw.as_slice());
    let signed = keccak256(&message);

    MintDigest { raw, signed }
}
