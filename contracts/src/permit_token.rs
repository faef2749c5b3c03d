//! The deployable permit token: an ERC-20 with metadata, nonces and the
//! EIP-2612 `permit` entry point, wired to one [`Environment`].

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolEvent;

use crate::{
    token::erc20::{
        self,
        extensions::{
            permit, Erc20Metadata, Erc20Permit, IErc20Metadata, IErc20Permit,
        },
        Erc20, IErc20,
    },
    utils::{
        cryptography::eip712::IEip712,
        nonces::{INonces, Nonces},
    },
    Environment,
};

/// Token name, also the EIP-712 domain name.
pub const NAME: &str = "Permit Token";
/// Token symbol.
pub const SYMBOL: &str = "PRMT";
/// EIP-712 domain version.
pub const VERSION: &str = "1";

/// Signing domain of [`PermitToken`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Eip712;

impl IEip712 for Eip712 {
    const NAME: &'static str = NAME;
    const VERSION: &'static str = VERSION;
}

/// State of a deployed [`PermitToken`].
#[derive(Clone, Debug)]
pub struct PermitToken {
    env: Environment,
    erc20: Erc20,
    metadata: Erc20Metadata,
    nonces: Nonces,
    erc20_permit: Erc20Permit<Eip712>,
}

impl PermitToken {
    /// Deploys the token in `env`, minting `total_supply` tokens to the
    /// deployer ([`Environment::msg_sender`]).
    ///
    /// # Errors
    ///
    /// * [`erc20::Error::InvalidReceiver`] - If the deployer is
    ///   [`Address::ZERO`].
    pub fn deploy(
        env: Environment,
        total_supply: U256,
    ) -> Result<Self, erc20::Error> {
        let mut erc20 = Erc20::default();
        erc20._mint(env.msg_sender(), total_supply)?;
        tracing::debug!(
            contract = %env.contract_address(),
            chain_id = env.chain_id(),
            %total_supply,
            "deployed permit token"
        );

        Ok(Self {
            env,
            erc20,
            metadata: Erc20Metadata::new(NAME, SYMBOL),
            nonces: Nonces::default(),
            erc20_permit: Erc20Permit::default(),
        })
    }

    /// Makes `account` the caller of the following calls.
    pub fn sender(&mut self, account: Address) -> &mut Self {
        self.env.set_msg_sender(account);
        self
    }

    /// Returns the environment the token executes in.
    #[must_use]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Returns mutable access to the environment, e.g. to move time forward.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Checks whether `event` was emitted by the token.
    #[must_use]
    pub fn emitted<E: SolEvent>(&self, event: &E) -> bool {
        self.erc20.emitted(event)
    }
}

impl IErc20 for PermitToken {
    type Error = erc20::Error;

    fn total_supply(&self) -> U256 {
        self.erc20.total_supply()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.erc20.balance_of(account)
    }

    fn transfer(&mut self, to: Address, value: U256) -> Result<bool, Self::Error> {
        let from = self.env.msg_sender();
        self.erc20._transfer(from, to, value)?;
        Ok(true)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.erc20.allowance(owner, spender)
    }

    fn approve(
        &mut self,
        spender: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        let owner = self.env.msg_sender();
        self.erc20._approve(owner, spender, value, true)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<bool, Self::Error> {
        let spender = self.env.msg_sender();
        self.erc20._spend_allowance(from, spender, value)?;
        self.erc20._transfer(from, to, value)?;
        Ok(true)
    }
}

impl IErc20Metadata for PermitToken {
    fn name(&self) -> String {
        self.metadata.name()
    }

    fn symbol(&self) -> String {
        self.metadata.symbol()
    }

    fn decimals(&self) -> u8 {
        self.metadata.decimals()
    }
}

impl INonces for PermitToken {
    fn nonces(&self, owner: Address) -> U256 {
        self.nonces.nonces(owner)
    }
}

impl IErc20Permit for PermitToken {
    type Error = permit::Error;

    fn domain_separator(&self) -> B256 {
        self.erc20_permit.domain_separator(&self.env)
    }

    fn permit(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        v: u8,
        r: B256,
        s: B256,
    ) -> Result<(), Self::Error> {
        self.erc20_permit.permit(
            owner,
            spender,
            value,
            deadline,
            v,
            r,
            s,
            &self.env,
            &mut self.erc20,
            &mut self.nonces,
        )
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, uint, Address, U256};
    use permit_crypto::{domain_separator, permit_type_hash};

    use super::{PermitToken, NAME, SYMBOL, VERSION};
    use crate::{
        environment::MSG_SENDER,
        token::erc20::{
            extensions::{IErc20Metadata, IErc20Permit},
            Error, IErc20, Transfer,
        },
        utils::nonces::INonces,
        Environment,
    };

    const ALICE: Address = address!("A11CEacF9aa32246d767FCCD72e02d6bCbcC375d");
    const BOB: Address = address!("B0B0cB49ec2e96DF5F5fFB081acaE66A2cBBc2e2");
    const SUPPLY: U256 = uint!(1_000_000_000000000000000000_U256);

    fn deploy() -> PermitToken {
        PermitToken::deploy(Environment::default(), SUPPLY)
            .expect("should deploy token")
    }

    #[test]
    fn constructs() {
        let token = deploy();

        assert_eq!(NAME, token.name());
        assert_eq!(SYMBOL, token.symbol());
        assert_eq!(18, token.decimals());
        assert_eq!(SUPPLY, token.total_supply());
        assert_eq!(SUPPLY, token.balance_of(MSG_SENDER));
        assert_eq!(U256::ZERO, token.nonces(ALICE));
        assert!(token.emitted(&Transfer {
            from: Address::ZERO,
            to: MSG_SENDER,
            value: SUPPLY,
        }));
    }

    #[test]
    fn deploy_errors_on_zero_deployer() {
        let mut env = Environment::default();
        env.set_msg_sender(Address::ZERO);

        let err = PermitToken::deploy(env, SUPPLY)
            .expect_err("should not mint to zero address");
        assert!(matches!(err, Error::InvalidReceiver(_)));
    }

    #[test]
    fn exposes_domain_separator() {
        let token = deploy();

        assert_eq!(
            b256!(
                "4bf3d4ac5d5cfdcdc9ac819420eae24d017c88d23c99ff707a35da535de52da4"
            ),
            token.domain_separator()
        );
        assert_eq!(
            domain_separator(
                token.env().contract_address(),
                NAME,
                VERSION,
                token.env().chain_id()
            ),
            token.domain_separator()
        );
        assert_eq!(permit_type_hash(), token.permit_typehash());
    }

    #[test]
    fn transfer_from_spends_allowance() {
        let mut token = deploy();
        let value = uint!(10_U256);

        token.approve(ALICE, value).expect("should approve");
        token
            .sender(ALICE)
            .transfer_from(MSG_SENDER, BOB, uint!(4_U256))
            .expect("should transfer");

        assert_eq!(uint!(6_U256), token.allowance(MSG_SENDER, ALICE));
        assert_eq!(uint!(4_U256), token.balance_of(BOB));
    }

    #[test]
    fn transfer_from_errors_without_allowance() {
        let mut token = deploy();

        let err = token
            .sender(ALICE)
            .transfer_from(MSG_SENDER, BOB, U256::ONE)
            .expect_err("should not transfer without allowance");
        assert!(matches!(err, Error::InsufficientAllowance(_)));
        assert_eq!(U256::ZERO, token.balance_of(BOB));
    }

    #[test]
    fn transfers_from_sender() {
        let mut token = deploy();

        token.transfer(ALICE, U256::ONE).expect("should transfer");
        token
            .sender(ALICE)
            .transfer(BOB, U256::ONE)
            .expect("should transfer");

        assert_eq!(U256::ZERO, token.balance_of(ALICE));
        assert_eq!(U256::ONE, token.balance_of(BOB));
    }
}
