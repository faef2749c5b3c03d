//! Implementation of the ERC-20 token standard.
//!
//! We have followed general `OpenZeppelin` Contracts guidelines: functions
//! revert instead of returning `false` on failure. This behavior is
//! nonetheless conventional and does not conflict with the expectations of
//! [`Erc20`] applications.
use std::collections::HashMap;

use alloy_primitives::{Address, LogData, U256};
use alloy_sol_types::{sol, SolError, SolEvent};

pub mod extensions;

sol! {
    /// Emitted when `value` tokens are moved from one account (`from`) to
    /// another (`to`).
    ///
    /// Note that `value` may be zero.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    event Transfer(address indexed from, address indexed to, uint256 value);
    /// Emitted when the allowance of a `spender` for an `owner` is set by a
    /// call to `approve`. `value` is the new allowance.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    event Approval(address indexed owner, address indexed spender, uint256 value);
}

sol! {
    /// Indicates an error related to the current `balance` of `sender`. Used
    /// in transfers.
    ///
    /// * `sender` - Address whose tokens are being transferred.
    /// * `balance` - Current balance for the interacting account.
    /// * `needed` - Minimum amount required to perform a transfer.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error ERC20InsufficientBalance(address sender, uint256 balance, uint256 needed);
    /// Indicates a failure with the token `sender`. Used in transfers.
    ///
    /// * `sender` - Address whose tokens are being transferred.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error ERC20InvalidSender(address sender);
    /// Indicates a failure with the token `receiver`. Used in transfers.
    ///
    /// * `receiver` - Address to which the tokens are being transferred.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error ERC20InvalidReceiver(address receiver);
    /// Indicates a failure with the `spender`’s `allowance`. Used in
    /// transfers.
    ///
    /// * `spender` - Address that may be allowed to operate on tokens without
    /// being their owner.
    /// * `allowance` - Amount of tokens a `spender` is allowed to operate
    /// with.
    /// * `needed` - Minimum amount required to perform a transfer.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error ERC20InsufficientAllowance(address spender, uint256 allowance, uint256 needed);
    /// Indicates a failure with the `spender` to be approved. Used in
    /// approvals.
    ///
    /// * `spender` - Address that may be allowed to operate on tokens without
    /// being their owner.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error ERC20InvalidSpender(address spender);
    /// Indicates a failure with the `approver` of a token to be approved.
    /// Used in approvals.
    ///
    /// * `approver` - Address initiating an approval operation.
    #[derive(Debug, PartialEq, Eq)]
    #[allow(missing_docs)]
    error ERC20InvalidApprover(address approver);
}

/// An [`Erc20`] error defined as described in [ERC-6093].
///
/// [ERC-6093]: https://eips.ethereum.org/EIPS/eip-6093
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Indicates an error related to the current balance of `sender`. Used in
    /// transfers.
    #[error("`{}` has a balance of {}, needs {}", .0.sender, .0.balance, .0.needed)]
    InsufficientBalance(ERC20InsufficientBalance),
    /// Indicates a failure with the token `sender`. Used in transfers.
    #[error("invalid sender `{}`", .0.sender)]
    InvalidSender(ERC20InvalidSender),
    /// Indicates a failure with the token `receiver`. Used in transfers.
    #[error("invalid receiver `{}`", .0.receiver)]
    InvalidReceiver(ERC20InvalidReceiver),
    /// Indicates a failure with the `spender`’s `allowance`. Used in
    /// transfers.
    #[error("`{}` has an allowance of {}, needs {}", .0.spender, .0.allowance, .0.needed)]
    InsufficientAllowance(ERC20InsufficientAllowance),
    /// Indicates a failure with the `spender` to be approved. Used in
    /// approvals.
    #[error("invalid spender `{}`", .0.spender)]
    InvalidSpender(ERC20InvalidSpender),
    /// Indicates a failure with the `approver` of a token to be approved. Used
    /// in approvals.
    #[error("invalid approver `{}`", .0.approver)]
    InvalidApprover(ERC20InvalidApprover),
}

impl From<Error> for Vec<u8> {
    /// ABI-encodes the error into the revert data a deployed token returns.
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::InsufficientBalance(e) => e.abi_encode(),
            Error::InvalidSender(e) => e.abi_encode(),
            Error::InvalidReceiver(e) => e.abi_encode(),
            Error::InsufficientAllowance(e) => e.abi_encode(),
            Error::InvalidSpender(e) => e.abi_encode(),
            Error::InvalidApprover(e) => e.abi_encode(),
        }
    }
}

/// State of an `Erc20` token.
#[derive(Clone, Debug, Default)]
pub struct Erc20 {
    /// Maps users to balances.
    balances: HashMap<Address, U256>,
    /// Maps users to a mapping of each spender's allowance.
    allowances: HashMap<(Address, Address), U256>,
    /// The total supply of the token.
    total_supply: U256,
    /// Events emitted so far, oldest first.
    logs: Vec<LogData>,
}

/// Required interface of an [`Erc20`] compliant contract.
pub trait IErc20 {
    /// The error type associated to this ERC-20 trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the number of tokens in existence.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn total_supply(&self) -> U256;

    /// Returns the number of tokens owned by `account`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `account` - Account to get balance from.
    fn balance_of(&self, account: Address) -> U256;

    /// Moves a `value` amount of tokens from the caller's account to `to`.
    ///
    /// Returns a boolean value indicating whether the operation succeeded.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `to` - Account to transfer tokens to.
    /// * `value` - Number of tokens to transfer.
    ///
    /// # Errors
    ///
    /// * If the `to` address is `Address::ZERO`, then the error
    /// [`Error::InvalidReceiver`] is returned.
    /// * If the caller doesn't have a balance of at least `value`, then the
    /// error [`Error::InsufficientBalance`] is returned.
    ///
    /// # Events
    ///
    /// Emits a [`Transfer`] event.
    fn transfer(&mut self, to: Address, value: U256) -> Result<bool, Self::Error>;

    /// Returns the remaining number of tokens that `spender` will be allowed
    /// to spend on behalf of `owner` through `transfer_from`. This is zero by
    /// default.
    ///
    /// This value changes when `approve`, `permit` or `transfer_from` are
    /// called.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - Account that owns the tokens.
    /// * `spender` - Account that will spend the tokens.
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Sets a `value` number of tokens as the allowance of `spender` over the
    /// caller's tokens.
    ///
    /// Returns a boolean value indicating whether the operation succeeded.
    ///
    /// WARNING: Beware that changing an allowance with this method brings
    /// the risk that someone may use both the old and the new allowance by
    /// unfortunate transaction ordering. One possible solution to mitigate
    /// this race condition is to first reduce the spender's allowance to 0
    /// and set the desired value afterwards:
    /// <https://github.com/ethereum/EIPs/issues/20#issuecomment-263524729>
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - The number of tokens being allowed to transfer by
    ///   `spender`.
    ///
    /// # Errors
    ///
    /// If the `spender` address is `Address::ZERO`, then the error
    /// [`Error::InvalidSpender`] is returned.
    ///
    /// # Events
    ///
    /// Emits an [`Approval`] event.
    fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Self::Error>;

    /// Moves a `value` number of tokens from `from` to `to` using the
    /// allowance mechanism. `value` is then deducted from the caller's
    /// allowance.
    ///
    /// Returns a boolean value indicating whether the operation succeeded.
    ///
    /// NOTE: If `value` is the maximum `U256::MAX`, the allowance is not
    /// updated on `transfer_from`. This is semantically equivalent to
    /// an infinite approval.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `from` - Account to transfer tokens from.
    /// * `to` - Account to transfer tokens to.
    /// * `value` - Number of tokens to transfer.
    ///
    /// # Errors
    ///
    /// * If the `from` address is `Address::ZERO`, then the error
    /// [`Error::InvalidSender`] is returned.
    /// * If the `to` address is `Address::ZERO`, then the error
    /// [`Error::InvalidReceiver`] is returned.
    /// * If not enough allowance is available, then the error
    /// [`Error::InsufficientAllowance`] is returned.
    ///
    /// # Events
    ///
    /// Emits a [`Transfer`] event.
    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error>;
}

impl Erc20 {
    /// Returns the number of tokens in existence.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Returns the number of tokens owned by `account`.
    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Returns the allowance of `spender` over `owner`'s tokens.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or_default()
    }

    /// Returns the events emitted so far, oldest first.
    #[must_use]
    pub fn logs(&self) -> &[LogData] {
        &self.logs
    }

    /// Checks whether `event` was emitted.
    #[must_use]
    pub fn emitted<E: SolEvent>(&self, event: &E) -> bool {
        let expected = event.encode_log_data();
        self.logs.iter().any(|log| *log == expected)
    }

    fn emit<E: SolEvent>(&mut self, event: &E) {
        self.logs.push(event.encode_log_data());
    }

    /// Sets a `value` number of tokens as the allowance of `spender` over the
    /// `owner`'s tokens.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `owner` - Account that owns the tokens.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - The number of tokens being allowed to transfer by
    ///   `spender`.
    /// * `emit_event` - Emit an [`Approval`] event flag.
    ///
    /// # Errors
    ///
    /// * If the `owner` address is `Address::ZERO`, then the error
    /// [`Error::InvalidApprover`] is returned.
    /// * If the `spender` address is `Address::ZERO`, then the error
    /// [`Error::InvalidSpender`] is returned.
    ///
    /// # Events
    ///
    /// Emits an [`Approval`] event.
    pub fn _approve(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
        emit_event: bool,
    ) -> Result<bool, Error> {
        if owner.is_zero() {
            return Err(Error::InvalidApprover(ERC20InvalidApprover {
                approver: Address::ZERO,
            }));
        }

        if spender.is_zero() {
            return Err(Error::InvalidSpender(ERC20InvalidSpender {
                spender: Address::ZERO,
            }));
        }

        self.allowances.insert((owner, spender), value);
        if emit_event {
            self.emit(&Approval { owner, spender, value });
        }
        Ok(true)
    }

    /// Internal implementation of transferring tokens between two accounts.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `from` - Account to transfer tokens from.
    /// * `to` - Account to transfer tokens to.
    /// * `value` - The number of tokens to transfer.
    ///
    /// # Errors
    ///
    /// * If the `from` address is `Address::ZERO`, then the error
    /// [`Error::InvalidSender`] is returned.
    /// * If the `to` address is `Address::ZERO`, then the error
    /// [`Error::InvalidReceiver`] is returned.
    /// * If the `from` address doesn't have enough tokens, then the error
    /// [`Error::InsufficientBalance`] is returned.
    ///
    /// # Events
    ///
    /// Emits a [`Transfer`] event.
    pub fn _transfer(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Error> {
        if from.is_zero() {
            return Err(Error::InvalidSender(ERC20InvalidSender {
                sender: Address::ZERO,
            }));
        }
        if to.is_zero() {
            return Err(Error::InvalidReceiver(ERC20InvalidReceiver {
                receiver: Address::ZERO,
            }));
        }

        self._update(from, to, value)
    }

    /// Creates a `value` amount of tokens and assigns them to `account`,
    /// by transferring it from `Address::ZERO`.
    ///
    /// Relies on the `_update` mechanism.
    ///
    /// # Panics
    ///
    /// If `total_supply` exceeds `U256::MAX`.
    ///
    /// # Errors
    ///
    /// If the `account` address is `Address::ZERO`, then the error
    /// [`Error::InvalidReceiver`] is returned.
    ///
    /// # Events
    ///
    /// Emits a [`Transfer`] event.
    pub fn _mint(&mut self, account: Address, value: U256) -> Result<(), Error> {
        if account.is_zero() {
            return Err(Error::InvalidReceiver(ERC20InvalidReceiver {
                receiver: Address::ZERO,
            }));
        }
        self._update(Address::ZERO, account, value)
    }

    /// Transfers a `value` amount of tokens from `from` to `to`, or
    /// alternatively mints (or burns) if `from` (or `to`) is the zero address.
    ///
    /// All customizations to transfers, mints, and burns should be done by
    /// using this function.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `from` - Owner's address.
    /// * `to` - Recipient's address.
    /// * `value` - Amount to be transferred.
    ///
    /// # Panics
    ///
    /// If `total_supply` exceeds `U256::MAX`. It may happen during `mint`
    /// operation.
    ///
    /// # Errors
    ///
    /// If the `from` address doesn't have enough tokens, then the error
    /// [`Error::InsufficientBalance`] is returned.
    ///
    /// # Events
    ///
    /// Emits a [`Transfer`] event.
    pub fn _update(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Error> {
        if from.is_zero() {
            // Mint operation. Overflow check required: the rest of the code
            // assumes that `total_supply` never overflows.
            self.total_supply = self
                .total_supply
                .checked_add(value)
                .expect("should not exceed `U256::MAX` for `total_supply`");
        } else {
            let from_balance = self.balance_of(from);
            if from_balance < value {
                return Err(Error::InsufficientBalance(
                    ERC20InsufficientBalance {
                        sender: from,
                        balance: from_balance,
                        needed: value,
                    },
                ));
            }
            // Overflow not possible:
            // `value` <= `from_balance` <= `total_supply`.
            self.balances.insert(from, from_balance - value);
        }

        if to.is_zero() {
            // Overflow not possible:
            // `value` <= `total_supply` or
            // `value` <= `from_balance` <= `total_supply`.
            self.total_supply -= value;
        } else {
            // Overflow not possible:
            // `balance_to` + `value` is at most `total_supply`,
            // which fits into a `U256`.
            *self.balances.entry(to).or_default() += value;
        }

        tracing::trace!(%from, %to, %value, "tokens moved");
        self.emit(&Transfer { from, to, value });

        Ok(())
    }

    /// Updates `owner`'s allowance for `spender` based on spent `value`.
    ///
    /// Does not update the allowance value in the case of infinite allowance.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `owner` - Owner's address.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - The number of tokens being allowed to transfer by
    ///   `spender`.
    ///
    /// # Errors
    ///
    /// If not enough allowance is available, then the error
    /// [`Error::InsufficientAllowance`] is returned.
    pub fn _spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
    ) -> Result<(), Error> {
        let current_allowance = self.allowance(owner, spender);
        if current_allowance != U256::MAX {
            if current_allowance < value {
                return Err(Error::InsufficientAllowance(
                    ERC20InsufficientAllowance {
                        spender,
                        allowance: current_allowance,
                        needed: value,
                    },
                ));
            }

            self._approve(owner, spender, current_allowance - value, false)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, uint, Address, U256};
    use alloy_sol_types::SolError;

    use super::{
        Approval, ERC20InsufficientBalance, Erc20, Error, Transfer,
    };

    const ALICE: Address = address!("A11CEacF9aa32246d767FCCD72e02d6bCbcC375d");
    const BOB: Address = address!("B0B0cB49ec2e96DF5F5fFB081acaE66A2cBBc2e2");

    #[test]
    fn reads_balance() {
        let mut contract = Erc20::default();
        assert_eq!(U256::ZERO, contract.balance_of(Address::ZERO));

        let one = uint!(1_U256);
        contract._mint(ALICE, one).expect("should mint tokens");
        assert_eq!(one, contract.balance_of(ALICE));
    }

    #[test]
    fn update_mint() {
        let mut contract = Erc20::default();
        let one = uint!(1_U256);

        // Store initial balance & supply.
        let initial_balance = contract.balance_of(ALICE);
        let initial_supply = contract.total_supply();

        // Mint action should work.
        let result = contract._update(Address::ZERO, ALICE, one);
        assert!(result.is_ok());

        // Check updated balance & supply.
        assert_eq!(initial_balance + one, contract.balance_of(ALICE));
        assert_eq!(initial_supply + one, contract.total_supply());
        assert!(contract.emitted(&Transfer {
            from: Address::ZERO,
            to: ALICE,
            value: one
        }));
    }

    #[test]
    #[should_panic = "should not exceed `U256::MAX` for `total_supply`"]
    fn update_mint_errors_arithmetic_overflow() {
        let mut contract = Erc20::default();
        contract
            ._update(Address::ZERO, ALICE, U256::MAX)
            .expect("should mint tokens");
        // Mint action should NOT work:
        // overflow on `total_supply`.
        let _result = contract._update(Address::ZERO, ALICE, uint!(1_U256));
    }

    #[test]
    fn mint_errors_invalid_receiver() {
        let mut contract = Erc20::default();
        let result = contract._mint(Address::ZERO, uint!(1_U256));
        assert!(matches!(result, Err(Error::InvalidReceiver(_))));
        assert_eq!(U256::ZERO, contract.total_supply());
    }

    #[test]
    fn update_burn() {
        let mut contract = Erc20::default();
        let one = uint!(1_U256);
        let two = uint!(2_U256);
        contract._mint(ALICE, two).expect("should mint tokens");

        contract._update(ALICE, Address::ZERO, one).expect("should burn");

        assert_eq!(one, contract.balance_of(ALICE));
        assert_eq!(one, contract.total_supply());
    }

    #[test]
    fn update_transfer_errors_insufficient_balance() {
        let mut contract = Erc20::default();
        let one = uint!(1_U256);
        contract._mint(ALICE, one).expect("should mint tokens");

        let err = contract
            ._transfer(ALICE, BOB, uint!(2_U256))
            .expect_err("should not transfer more than the balance");

        assert_eq!(
            Error::InsufficientBalance(ERC20InsufficientBalance {
                sender: ALICE,
                balance: one,
                needed: uint!(2_U256),
            }),
            err
        );
        assert_eq!(one, contract.balance_of(ALICE));
        assert_eq!(U256::ZERO, contract.balance_of(BOB));
    }

    #[test]
    fn transfer_errors_invalid_parties() {
        let mut contract = Erc20::default();
        assert!(matches!(
            contract._transfer(Address::ZERO, BOB, U256::ZERO),
            Err(Error::InvalidSender(_))
        ));
        assert!(matches!(
            contract._transfer(ALICE, Address::ZERO, U256::ZERO),
            Err(Error::InvalidReceiver(_))
        ));
    }

    #[test]
    fn approves() {
        let mut contract = Erc20::default();
        let value = uint!(10_U256);

        contract._approve(ALICE, BOB, value, true).expect("should approve");

        assert_eq!(value, contract.allowance(ALICE, BOB));
        assert!(contract.emitted(&Approval { owner: ALICE, spender: BOB, value }));
    }

    #[test]
    fn approve_errors_when_invalid_parties() {
        let mut contract = Erc20::default();
        assert!(matches!(
            contract._approve(ALICE, Address::ZERO, U256::ONE, true),
            Err(Error::InvalidSpender(_))
        ));
        assert!(matches!(
            contract._approve(Address::ZERO, BOB, U256::ONE, true),
            Err(Error::InvalidApprover(_))
        ));
        assert!(contract.logs().is_empty());
    }

    #[test]
    fn spends_allowance() {
        let mut contract = Erc20::default();
        contract._approve(ALICE, BOB, uint!(10_U256), true).expect("should approve");

        contract
            ._spend_allowance(ALICE, BOB, uint!(4_U256))
            .expect("should spend allowance");
        assert_eq!(uint!(6_U256), contract.allowance(ALICE, BOB));

        assert!(matches!(
            contract._spend_allowance(ALICE, BOB, uint!(7_U256)),
            Err(Error::InsufficientAllowance(_))
        ));
    }

    #[test]
    fn infinite_allowance_is_not_spent() {
        let mut contract = Erc20::default();
        contract._approve(ALICE, BOB, U256::MAX, true).expect("should approve");

        contract
            ._spend_allowance(ALICE, BOB, uint!(4_U256))
            .expect("should spend allowance");
        assert_eq!(U256::MAX, contract.allowance(ALICE, BOB));
    }

    #[test]
    fn encodes_revert_data() {
        let error = ERC20InsufficientBalance {
            sender: ALICE,
            balance: U256::ZERO,
            needed: U256::ONE,
        };
        let expected = error.abi_encode();

        let revert: Vec<u8> = Error::InsufficientBalance(error).into();
        assert_eq!(expected, revert);
        assert_eq!(ERC20InsufficientBalance::SELECTOR, revert[..4]);
    }
}
