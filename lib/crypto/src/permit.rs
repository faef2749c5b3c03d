//! Hashing of [EIP-2612] `Permit` messages.
//!
//! The digest a token owner signs is built in two stages: the `Permit` struct
//! is ABI-encoded and hashed into a struct hash, which is then hashed together
//! with the token's domain separator (see [`to_typed_data_hash`]).
//!
//! [EIP-2612]: https://eips.ethereum.org/EIPS/eip-2612

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::{sol, SolType};

use crate::message_hash_utils::to_typed_data_hash;

/// keccak256("Permit(address owner,address spender,uint256 value,uint256
/// nonce,uint256 deadline)")
pub const PERMIT_TYPEHASH: B256 = B256::new(
    keccak_const::Keccak256::new()
        .update(b"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)")
        .finalize(),
);

/// Tuple for the `Permit` struct hash.
pub type StructHashTuple = sol! {
    tuple(bytes32, address, address, uint256, uint256, uint256)
};

/// The approval an owner authorizes by signing a permit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Approve {
    /// Account that owns the tokens.
    pub owner: Address,
    /// Account that will be allowed to spend the tokens.
    pub spender: Address,
    /// Allowance granted to `spender`.
    pub value: U256,
}

/// Returns the hash of the `Permit` struct schema, [`PERMIT_TYPEHASH`].
#[must_use]
pub const fn permit_type_hash() -> B256 {
    PERMIT_TYPEHASH
}

/// Returns the EIP-712 [hashed struct] of a permit.
///
/// [hashed struct]: https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
#[must_use]
pub fn permit_struct_hash(
    permit_type_hash: B256,
    approve: &Approve,
    nonce: U256,
    deadline: U256,
) -> B256 {
    keccak256(StructHashTuple::abi_encode_params(&(
        permit_type_hash,
        approve.owner,
        approve.spender,
        approve.value,
        nonce,
        deadline,
    )))
}

/// Returns the digest an owner signs to authorize `approve`.
///
/// # Arguments
///
/// * `domain_separator` - Domain separator of the token, see
///   [`crate::domain_separator`].
/// * `permit_type_hash` - Hash of the `Permit` struct schema, normally
///   [`PERMIT_TYPEHASH`].
/// * `approve` - Owner, spender and allowance being authorized.
/// * `nonce` - The owner's current nonce on the token.
/// * `deadline` - Timestamp after which the permit is rejected.
#[must_use]
pub fn approval_digest(
    domain_separator: B256,
    permit_type_hash: B256,
    approve: &Approve,
    nonce: U256,
    deadline: U256,
) -> B256 {
    let struct_hash =
        permit_struct_hash(permit_type_hash, approve, nonce, deadline);
    to_typed_data_hash(&domain_separator, &struct_hash)
}

/// Returns the current UNIX time shifted by `added_seconds`, as a permit
/// deadline.
///
/// Negative offsets produce deadlines in the past.
#[must_use]
pub fn deadline_from_now(added_seconds: i64) -> U256 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    U256::from(now.saturating_add_signed(added_seconds))
}
