//! Implementation of nonce tracking for addresses.
//!
//! Nonces will only increment.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

/// State of a [`Nonces`] Contract.
#[derive(Clone, Debug, Default)]
pub struct Nonces {
    /// Mapping from address to its nonce.
    nonces: HashMap<Address, U256>,
}

/// Interface for [`Nonces`]
pub trait INonces {
    /// Returns the unused nonce for the given account.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - The address for which to return the nonce.
    #[must_use]
    fn nonces(&self, owner: Address) -> U256;
}

impl INonces for Nonces {
    fn nonces(&self, owner: Address) -> U256 {
        self.nonces.get(&owner).copied().unwrap_or_default()
    }
}

impl Nonces {
    /// Consumes a nonce for the given `account`.
    ///
    /// Returns the nonce that was current before the call.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `owner` - The address for which to consume the nonce.
    ///
    /// # Panics
    ///
    /// * If the nonce for the given `owner` exceeds [`U256::MAX`].
    pub fn use_nonce(&mut self, owner: Address) -> U256 {
        let nonce = self.nonces.entry(owner).or_default();
        let current = *nonce;
        *nonce = current
            .checked_add(U256::ONE)
            .expect("nonce should not exceed `U256::MAX`");
        current
    }
}
