use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider},
    transports::http::reqwest::Url,
};
use eyre::Context as _;

use crate::Account;

/// Node the tests talk to.
pub const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";
/// Address of the deployed permit token.
pub const PERMIT_TOKEN_ADDRESS_ENV_VAR_NAME: &str = "PERMIT_TOKEN_ADDRESS";
/// Funded key that pays for relaying permits.
pub const RELAYER_PRIVATE_KEY_ENV_VAR_NAME: &str = "RELAYER_PRIVATE_KEY";

/// Load the `name` environment variable.
fn env(name: &str) -> eyre::Result<String> {
    std::env::var(name).wrap_err(format!("failed to load {name}"))
}

/// Everything a test needs to reach the deployed token.
#[derive(Clone, Debug)]
pub struct Context {
    /// Endpoint of the node.
    pub rpc_url: Url,
    /// Address of the permit token under test.
    pub token: Address,
    /// Account that submits transactions and pays for gas.
    pub relayer: Account,
}

impl Context {
    /// Builds the context from [`RPC_URL_ENV_VAR_NAME`],
    /// [`PERMIT_TOKEN_ADDRESS_ENV_VAR_NAME`] and
    /// [`RELAYER_PRIVATE_KEY_ENV_VAR_NAME`].
    ///
    /// Variables set in a `.env` file in the working directory, or any of its
    /// parents, are loaded first.
    ///
    /// # Errors
    ///
    /// May fail if a variable is missing or malformed.
    pub fn from_env() -> eyre::Result<Self> {
        dotenv::dotenv().ok();

        let rpc_url = env(RPC_URL_ENV_VAR_NAME)?
            .parse()
            .wrap_err("failed to parse RPC url")?;
        let token = env(PERMIT_TOKEN_ADDRESS_ENV_VAR_NAME)?
            .trim()
            .parse()
            .wrap_err("failed to parse permit token address")?;
        let relayer =
            Account::from_private_key(&env(RELAYER_PRIVATE_KEY_ENV_VAR_NAME)?)?;

        tracing::debug!(
            %rpc_url,
            %token,
            relayer = %relayer.address(),
            "loaded e2e context"
        );
        Ok(Self { rpc_url, token, relayer })
    }

    /// Returns the relayer's wallet provider.
    #[must_use]
    pub fn provider(&self) -> DynProvider {
        self.relayer.wallet(self.rpc_url.clone())
    }

    /// Queries the chain id the node reports.
    ///
    /// # Errors
    ///
    /// May fail if the node cannot be reached.
    pub async fn chain_id(&self) -> eyre::Result<u64> {
        self.provider()
            .get_chain_id()
            .await
            .wrap_err_with(|| format!("failed to get chain id from {}", self.rpc_url))
    }
}
