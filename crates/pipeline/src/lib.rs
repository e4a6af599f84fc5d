//! Off-chain mint authorization and submission pipeline.
//!
//! A trusted encoder identity vouches for a mint request — a node id, a
//! content URI, a size, and a replay-protection counter — by signing a
//! digest of the request's canonical encoding. A separate owner identity
//! then submits the vouched request to the mint contract, which recovers
//! the encoder from the signature before minting.
//!
//! # Stages
//!
//! One submission flows through five stages, each behind its own seam:
//!
//! 1. [`encoding`] - canonical ABI encoding of the request fields
//! 2. [`digest`] - keccak of the payload, then the EIP-191-prefixed keccak
//!    that is actually signed
//! 3. [`signer`] - 65-byte ECDSA signature with a normalized recovery byte
//! 4. [`assemble`] - transaction parameters from fresh chain reads
//! 5. [`submit`] - single best-effort broadcast plus a bounded inclusion
//!    wait
//!
//! [`pipeline::MintPipeline`] wires the stages together; [`chain`] defines
//! the client interface the remote reads and writes go through, with the
//! JSON-RPC implementation in [`rpc`] and the contract binding in
//! [`contract`].
//!
//! The encoding layout, hash domains, and recovery-byte convention are
//! wire-compatibility requirements of the verifying contract: any deviation
//! breaks on-chain signature verification.

pub mod assemble;
pub mod chain;
pub mod config;
pub mod contract;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod pipeline;
pub mod rpc;
pub mod signer;
pub mod submit;

pub use chain::{ChainClient, Receipt, TxParams};
pub use config::PipelineConfig;
pub use contract::{mint_calldata, MintContract};
pub use digest::{digest_payload, MintDigest};
pub use encoding::{encode_request, MintRequest};
pub use error::{MintError, MintResult};
pub use pipeline::MintPipeline;
pub use rpc::HttpChainClient;
pub use signer::{KeyProvider, LocalKeyProvider, MintSignature};
