//! The final [EIP-712] step: binding a struct hash to its signing domain.
//!
//! A wallet asked for `eth_signTypedData_v4` signs exactly the digest built
//! here, so a permit signed locally and one signed by a wallet agree.
//!
//! [EIP-712]: https://eips.ethereum.org/EIPS/eip-712

use alloy_primitives::{Keccak256, B256};

/// `0x19` keeps the preimage from parsing as an RLP transaction; `0x01` is the
/// ERC-191 version byte reserved for [EIP-712] structured data.
///
/// [EIP-712]: https://eips.ethereum.org/EIPS/eip-712
pub const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// Hashes `TYPED_DATA_PREFIX ‖ domain_separator ‖ struct_hash`.
///
/// Swapping the two hashes gives a different digest.
#[must_use]
pub fn to_typed_data_hash(domain_separator: &B256, struct_hash: &B256) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(TYPED_DATA_PREFIX);
    hasher.update(domain_separator);
    hasher.update(struct_hash);
    hasher.finalize()
}
