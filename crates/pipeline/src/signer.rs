//! Signing keys and digest signatures.
//!
//! Key material sits behind the [`KeyProvider`] trait so the pipeline never
//! touches raw keys directly; [`LocalKeyProvider`] is the in-memory
//! implementation, and a hardware module or remote signer can be dropped in
//! without touching pipeline logic. Keys are held only in memory and never
//! persisted or logged.

use alloy_primitives::{keccak256, Address, PrimitiveSignature, B256, U256};
use k256::ecdsa::{signature::hazmat::PrehashSigner, RecoveryId, SigningKey, VerifyingKey};

use crate::error::{MintError, MintResult};

/// A 65-byte ECDSA signature: `r ‖ s ‖ v`.
///
/// The recovery byte is always normalized to the legacy 27/28 convention
/// before a value of this type is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintSignature([u8; 65]);

impl MintSignature {
    /// Wrap raw signature bytes, normalizing the recovery byte.
    pub fn from_raw(mut bytes: [u8; 65]) -> MintResult<Self> {
        bytes[64] = normalize_recovery_byte(bytes[64])?;
        Ok(Self(bytes))
    }

    /// The full 65-byte signature.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// The normalized recovery byte, 27 or 28.
    pub fn recovery_byte(&self) -> u8 {
        self.0[64]
    }

    /// Convert to the r/s/parity form used by transaction envelopes.
    pub fn to_parity_signature(&self) -> PrimitiveSignature {
        let r = U256::from_be_slice(&self.0[..32]);
        let s = U256::from_be_slice(&self.0[32..64]);
        PrimitiveSignature::new(r, s, self.0[64] == 28)
    }
}

/// Normalize a raw recovery identifier to the legacy 27/28 convention.
///
/// Raw ids 0 and 1 are shifted up by 27; ids already >= 27 pass through
/// unchanged. Anything else (the reduced-x ids 2 and 3 included) cannot be
/// expressed in the convention the chain tooling expects and aborts the
/// submission.
pub fn normalize_recovery_byte(raw: u8) -> MintResult<u8> {
    match raw {
        0 | 1 => Ok(raw + 27),
        v if v >= 27 => Ok(v),
        v => Err(MintError::Signing(format!(
            "unrecoverable signature recovery byte {v}"
        ))),
    }
}

/// Capability for producing digest signatures with a held key.
///
/// The encoder identity signs mint digests and never transacts; the owner
/// identity signs transaction hashes and never signs a mint digest. Both
/// are instances of this trait.
pub trait KeyProvider: Send + Sync {
    /// The address derived from the held public key.
    fn address(&self) -> Address;

    /// Sign a 32-byte digest, returning a normalized 65-byte signature.
    fn sign_digest(&self, digest: B256) -> MintResult<MintSignature>;
}

/// Key provider backed by an in-memory secp256k1 key.
#[derive(Debug)]
pub struct LocalKeyProvider {
    key: SigningKey,
    address: Address,
}

impl LocalKeyProvider {
    /// Parse a private key from hex, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> MintResult<Self> {
        let trimmed = input.trim();
        let hex_str = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let decoded =
            hex::decode(hex_str).map_err(|e| MintError::Config(format!("invalid key hex: {e}")))?;
        let bytes: [u8; 32] = decoded
            .try_into()
            .map_err(|_| MintError::Config("private key must be 32 bytes".to_string()))?;
        let key = SigningKey::from_bytes((&bytes).into())
            .map_err(|e| MintError::Config(format!("invalid private key: {e}")))?;
        Ok(Self::from_signing_key(key))
    }

    /// Wrap an existing signing key.
    pub fn from_signing_key(key: SigningKey) -> Self {
        let address = derive_address(&key);
        Self { key, address }
    }
}

impl KeyProvider for LocalKeyProvider {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_digest(&self, digest: B256) -> MintResult<MintSignature> {
        let (signature, recovery_id): (k256::ecdsa::Signature, RecoveryId) = self
            .key
            .sign_prehash(digest.as_ref())
            .map_err(|e| MintError::Signing(format!("ecdsa signing failed: {e}")))?;

        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(signature.r().to_bytes().as_slice());
        bytes[32..64].copy_from_slice(signature.s().to_bytes().as_slice());
        bytes[64] = normalize_recovery_byte(recovery_id.to_byte())?;
        Ok(MintSignature(bytes))
    }
}

/// Derive the address for a signing key: keccak of the uncompressed public
/// key (without the 0x04 tag), last 20 bytes.
fn derive_address(key: &SigningKey) -> Address {
    let verifying_key = VerifyingKey::from(key);
    let public_key = verifying_key.to_encoded_point(false);
    let hash = keccak256(&public_key.as_bytes()[1..]);
    Address::from_slice(&hash.as_slice()[12..])
}
