//! End-to-end testing harness for an EIP-2612 permit token that is already
//! deployed on a node.
//!
//! Tests read their [`Context`] from the environment, sign permits with a
//! fresh [`Account`] and relay them through the relayer's wallet provider.
mod account;
mod context;
mod error;

use std::sync::Once;

use alloy::primitives::U256;
use tracing_subscriber::EnvFilter;

pub use account::Account;
pub use context::{
    Context, PERMIT_TOKEN_ADDRESS_ENV_VAR_NAME, RELAYER_PRIVATE_KEY_ENV_VAR_NAME,
    RPC_URL_ENV_VAR_NAME,
};
pub use error::Revert;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info";

/// Sets up a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Can be called from every test, later calls are ignored.
pub fn init_tracing() {
    // The subscriber is a global object, installing it twice would fail.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        // Another harness may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Returns `n` whole tokens expressed in units of a token with 18 decimals.
#[must_use]
pub fn e18(n: u64) -> U256 {
    U256::from(n) * U256::from(10).pow(U256::from(18))
}
