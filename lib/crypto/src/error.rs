//! Error type of the digest and signature helpers.

use alloy_primitives::B256;

/// Result type.
///
/// A result with the crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Failures of the digest and signature helpers.
///
/// Hashing itself is total; errors only come from malformed inputs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The verifying contract is not a 20-byte hex address.
    #[error("invalid verifying contract address `{0}`")]
    InvalidAddress(String),
    /// The private key is zero or not below the secp256k1 group order.
    #[error("invalid secp256k1 private key")]
    InvalidPrivateKey,
    /// The signature does not recover to a non-zero address.
    #[error("invalid signature")]
    InvalidSignature,
    /// The signature has an `s` value in the upper half order.
    #[error("invalid signature `s` value {0}")]
    InvalidSignatureS(B256),
    /// The signing primitive failed.
    #[error(transparent)]
    Signer(#[from] alloy_signer::Error),
}
