//! Elliptic Curve Digital Signature Algorithm (ECDSA) operations.
//!
//! [`sign`] produces the `(v, r, s)` triple a permit carries. [`ecrecover`]
//! checks it the way a token calling the `ecrecover` precompile does, and
//! [`recover`] additionally enforces the EIP-2 lower-half `s` rule.

use alloy_primitives::{uint, Address, Signature, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use crate::error::{Error, Result};

/// Upper range for `s` value from the signature.
pub const SIGNATURE_S_UPPER_BOUND: U256 = uint!(
    0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256
);

/// Recoverable secp256k1 signature, split the way `permit` takes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vrs {
    /// Recovery id in its non-EIP-155 form, `27` or `28`.
    pub v: u8,
    /// `r` value from the signature.
    pub r: B256,
    /// `s` value from the signature.
    pub s: B256,
}

impl From<Signature> for Vrs {
    fn from(signature: Signature) -> Self {
        Self {
            v: to_non_eip155_v(signature.v()),
            r: signature.r().into(),
            s: signature.s().into(),
        }
    }
}

/// Converts a y-parity bit into a [non-EIP-155 `v` value].
///
/// [non-EIP-155 `v` value]: https://eips.ethereum.org/EIPS/eip-155
#[must_use]
pub fn to_non_eip155_v(y_parity: bool) -> u8 {
    u8::from(y_parity) + 27
}

/// Signs `digest` with `private_key`.
///
/// The signature is deterministic ([RFC 6979]) and always has an `s` value in
/// the lower half order.
///
/// # Errors
///
/// * [`Error::InvalidPrivateKey`] - If `private_key` is zero or not below the
///   secp256k1 group order.
/// * [`Error::Signer`] - If the signing primitive fails.
///
/// [RFC 6979]: https://www.rfc-editor.org/rfc/rfc6979
pub fn sign(digest: B256, private_key: B256) -> Result<Vrs> {
    let signer = PrivateKeySigner::from_bytes(&private_key)
        .map_err(|_| Error::InvalidPrivateKey)?;
    let signature = signer.sign_hash_sync(&digest)?;
    Ok(signature.into())
}

/// Returns the address that signed a hashed message (`digest`), rejecting
/// malleable signatures.
///
/// # Arguments
///
/// * `digest` - Hash of the message.
/// * `v` - `v` value from the signature.
/// * `r` - `r` value from the signature.
/// * `s` - `s` value from the signature.
///
/// # Errors
///
/// * [`Error::InvalidSignatureS`] - If the `s` value is greater than
///   [`SIGNATURE_S_UPPER_BOUND`].
/// * [`Error::InvalidSignature`] - If `v` is neither `27` nor `28`, if no
///   public key can be recovered, or if the recovered address is
///   [`Address::ZERO`].
pub fn recover(digest: B256, v: u8, r: B256, s: B256) -> Result<Address> {
    check_if_malleable(&s)?;
    ecrecover(digest, v, r, s)
}

/// Returns the address that signed `digest`, accepting exactly what the
/// `ecrecover` precompile accepts.
///
/// Unlike [`recover`], an `s` value in the upper half order is not rejected:
/// the mirrored signature `(v ^ 1, r, n - s)` recovers the same address.
/// Tokens that verify permits with a bare `ecrecover` behave this way.
///
/// # Errors
///
/// * [`Error::InvalidSignature`] - If `v` is neither `27` nor `28`, if no
///   public key can be recovered, or if the recovered address is
///   [`Address::ZERO`].
pub fn ecrecover(digest: B256, v: u8, r: B256, s: B256) -> Result<Address> {
    let y_parity = match v {
        27 => false,
        28 => true,
        _ => return Err(Error::InvalidSignature),
    };

    let signature =
        Signature::new(U256::from_be_bytes(r.0), U256::from_be_bytes(s.0), y_parity);
    let recovered = signature
        .recover_address_from_prehash(&digest)
        .map_err(|_| Error::InvalidSignature)?;

    if recovered.is_zero() {
        return Err(Error::InvalidSignature);
    }
    Ok(recovered)
}

/// Returns the address controlled by `private_key`.
///
/// # Errors
///
/// * [`Error::InvalidPrivateKey`] - If `private_key` is zero or not below the
///   secp256k1 group order.
pub fn address_of(private_key: B256) -> Result<Address> {
    PrivateKeySigner::from_bytes(&private_key)
        .map(|signer| signer.address())
        .map_err(|_| Error::InvalidPrivateKey)
}

/// Validates the `s` value of a signature.
///
/// EIP-2 still allows signature malleability for `ecRecover` precompile.
///
/// Remove this possibility and make the signature unique.
///
/// Appendix F in the [Ethereum Yellow paper], defines the valid range for s in
/// (301): 0 < s < secp256k1n ÷ 2 + 1, and for v in (302): v ∈ {27, 28}.
///
/// # Errors
///
/// * [`Error::InvalidSignatureS`] - If the `s` value is greater than
///   [`SIGNATURE_S_UPPER_BOUND`].
///
/// [Ethereum Yellow paper]: https://ethereum.github.io/yellowpaper/paper.pdf
fn check_if_malleable(s: &B256) -> Result<()> {
    let s_u256 = U256::from_be_slice(s.as_slice());
    if s_u256 > SIGNATURE_S_UPPER_BOUND {
        return Err(Error::InvalidSignatureS(*s));
    }
    Ok(())
}
