//! Permit Contract.
//!
//! Extension of the ERC-20 standard allowing approvals to be made
//! via signatures, as defined in the [ERC].
//!
//! Adds the `permit` method, which can be used to change an account’s
//! ERC20 allowance (see [`crate::token::erc20::IErc20::allowance`])
//! by presenting a message signed by the account.
//! By not relying on [`crate::token::erc20::IErc20::approve`],
//! the token holder account doesn’t need to send a transaction,
//! and thus is not required to hold Ether at all.
//!
//! Failures revert with the plain reason strings [`EXPIRED`] and
//! [`INVALID_SIGNATURE`]. Any mismatch between what the owner signed and what
//! is submitted (signer, domain, type hash, a field, or a stale nonce) yields a
//! different digest and surfaces as [`INVALID_SIGNATURE`].
//!
//! Signatures are checked with `ecrecover` semantics: `v` must be `27` or
//! `28`, but `s` is not bounded, so the mirrored form of a valid signature is
//! accepted too.
//!
//! [ERC]: https://eips.ethereum.org/EIPS/eip-2612

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{Revert, SolError};
use permit_crypto::{
    ecdsa, permit::PERMIT_TYPEHASH, permit_struct_hash, Approve,
};

use crate::{
    token::erc20::{self, Erc20},
    utils::{
        cryptography::eip712::IEip712,
        nonces::{INonces, Nonces},
    },
    Environment,
};

/// Revert reason of a permit submitted after its deadline.
pub const EXPIRED: &str = "EXPIRED";
/// Revert reason of a permit not signed by its owner.
pub const INVALID_SIGNATURE: &str = "INVALID_SIGNATURE";

/// A Permit error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The permit deadline has expired.
    #[error("EXPIRED")]
    ExpiredSignature {
        /// Deadline of the rejected permit.
        deadline: U256,
    },
    /// The signature does not recover to the permit's owner.
    #[error("INVALID_SIGNATURE")]
    InvalidSigner {
        /// Recovered signer, if recovery succeeded at all.
        signer: Option<Address>,
        /// Owner named in the permit.
        owner: Address,
    },
    /// Error type from [`Erc20`] contract [`erc20::Error`].
    #[error(transparent)]
    Erc20(#[from] erc20::Error),
}

impl Error {
    /// Returns the revert reason string, if the error reverts with one.
    #[must_use]
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Error::ExpiredSignature { .. } => Some(EXPIRED),
            Error::InvalidSigner { .. } => Some(INVALID_SIGNATURE),
            Error::Erc20(_) => None,
        }
    }
}

impl From<Error> for Vec<u8> {
    /// ABI-encodes the error into the revert data a deployed token returns.
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::Erc20(e) => e.into(),
            e => Revert { reason: e.to_string() }.abi_encode(),
        }
    }
}

/// State of an [`Erc20Permit`] Contract.
#[derive(Clone, Debug, Default)]
pub struct Erc20Permit<T: IEip712> {
    /// Contract implementing [`IEip712`] trait.
    eip712: T,
}

/// Interface for [`Erc20Permit`]
pub trait IErc20Permit: INonces {
    /// The error type associated to this interface.
    type Error: Into<Vec<u8>>;

    /// Returns the domain separator used in the encoding of the signature for
    /// [`Self::permit`], as defined by EIP712.
    ///
    /// Exposed on-chain as `DOMAIN_SEPARATOR()`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn domain_separator(&self) -> B256;

    /// Returns the hash of the `Permit` struct schema.
    ///
    /// Exposed on-chain as `PERMIT_TYPEHASH()`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    fn permit_typehash(&self) -> B256 {
        PERMIT_TYPEHASH
    }

    /// Sets `value` as the allowance of `spender` over `owner`'s tokens,
    /// given `owner`'s signed approval.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `owner` - Account that owns the tokens.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - The number of tokens being permitted to transfer by
    ///   `spender`.
    /// * `deadline` - Deadline for the permit action.
    /// * `v` - v value from the `owner`'s signature.
    /// * `r` - r value from the `owner`'s signature.
    /// * `s` - s value from the `owner`'s signature.
    ///
    /// # Errors
    ///
    /// * [`Error::ExpiredSignature`] - If the `deadline` param is from the
    ///   past.
    /// * [`Error::InvalidSigner`] - If signer is not an `owner`.
    /// * [`Error::Erc20`] - If `spender` is [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// Emits an [`crate::token::erc20::Approval`] event.
    #[allow(clippy::too_many_arguments)]
    fn permit(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        v: u8,
        r: B256,
        s: B256,
    ) -> Result<(), Self::Error>;
}

impl<T: IEip712> Erc20Permit<T> {
    /// Creates the extension for the signing domain `eip712`.
    pub fn new(eip712: T) -> Self {
        Self { eip712 }
    }

    /// Returns the domain separator of the token deployed in `env`.
    #[must_use]
    pub fn domain_separator(&self, env: &Environment) -> B256 {
        self.eip712.domain_separator_v4(env)
    }

    /// Sets `value` as the allowance of `spender` over `owner`'s tokens,
    /// given `owner`'s signed approval.
    ///
    /// The state is left untouched when the permit is rejected.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - Account that owns the tokens.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - The number of tokens being permitted to transfer by
    ///   `spender`.
    /// * `deadline` - Deadline for the permit action.
    /// * `v` - v value from the `owner`'s signature.
    /// * `r` - r value from the `owner`'s signature.
    /// * `s` - s value from the `owner`'s signature.
    /// * `env` - Block the permit executes in.
    /// * `erc20` - Write access to the token balances and allowances.
    /// * `nonces` - Write access to the owners' nonces.
    ///
    /// # Errors
    ///
    /// * [`Error::ExpiredSignature`] - If the `deadline` param is from the
    ///   past.
    /// * [`Error::InvalidSigner`] - If signer is not an `owner`.
    /// * [`Error::Erc20`] - If `spender` is [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// Emits an [`crate::token::erc20::Approval`] event.
    ///
    /// # Requirements
    ///
    /// * `deadline` must be a timestamp not before the current block.
    /// * `v`, `r` and `s` must be a valid secp256k1 signature from `owner`
    /// over the EIP712-formatted function arguments.
    /// * the signature must use `owner`'s current nonce.
    #[allow(clippy::too_many_arguments)]
    pub fn permit(
        &self,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        v: u8,
        r: B256,
        s: B256,
        env: &Environment,
        erc20: &mut Erc20,
        nonces: &mut Nonces,
    ) -> Result<(), Error> {
        if U256::from(env.block_timestamp()) > deadline {
            tracing::debug!(%owner, %deadline, "rejected expired permit");
            return Err(Error::ExpiredSignature { deadline });
        }

        let nonce = nonces.nonces(owner);
        let struct_hash = permit_struct_hash(
            PERMIT_TYPEHASH,
            &Approve { owner, spender, value },
            nonce,
            deadline,
        );
        let hash = self.eip712.hash_typed_data_v4(env, struct_hash);

        let signer = ecdsa::ecrecover(hash, v, r, s).ok();
        if signer != Some(owner) {
            tracing::debug!(%owner, ?signer, %nonce, "rejected permit signature");
            return Err(Error::InvalidSigner { signer, owner });
        }

        erc20._approve(owner, spender, value, true)?;
        nonces.use_nonce(owner);

        tracing::debug!(%owner, %spender, %value, %nonce, "permit accepted");
        Ok(())
    }
}
