//! [EIP-712](https://eips.ethereum.org/EIPS/eip-712) signing domain of a
//! contract.
//!
//! The separator is derived from the contract's immutable name and version
//! and from the chain id and address found in the [`Environment`], so moving
//! the token to another chain or address invalidates old signatures.

use alloy_primitives::B256;
use permit_crypto::{
    eip712::domain_separator, message_hash_utils::to_typed_data_hash,
    Eip712Domain,
};

use crate::Environment;

/// EIP-712 Contract interface.
pub trait IEip712 {
    /// Immutable name of EIP-712 instance.
    const NAME: &'static str;
    /// Immutable version of EIP-712 instance.
    const VERSION: &'static str;

    /// Returns the fields that describe the domain separator used by this
    /// contract for EIP-712 signature.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `env` - Block the contract executes in.
    fn eip712_domain(&self, env: &Environment) -> Eip712Domain {
        Eip712Domain::new(
            Self::NAME,
            Self::VERSION,
            env.chain_id(),
            env.contract_address(),
        )
    }

    /// Returns the domain separator for the current chain.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `env` - Block the contract executes in.
    fn domain_separator_v4(&self, env: &Environment) -> B256 {
        domain_separator(
            env.contract_address(),
            Self::NAME,
            Self::VERSION,
            env.chain_id(),
        )
    }

    /// Given an already [hashed struct], this function returns the hash of the
    /// fully encoded EIP-712 message for this domain.
    ///
    /// [hashed struct]: https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `env` - Block the contract executes in.
    /// * `struct_hash` - The hashed struct.
    fn hash_typed_data_v4(&self, env: &Environment, struct_hash: B256) -> B256 {
        let domain_separator = self.domain_separator_v4(env);
        to_typed_data_hash(&domain_separator, &struct_hash)
    }
}
