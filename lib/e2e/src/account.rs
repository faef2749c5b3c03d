use alloy::{
    network::EthereumWallet,
    primitives::{Address, B256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::{local::PrivateKeySigner, SignerSync},
    transports::http::reqwest::Url,
};
use eyre::Context as _;
use permit_crypto::Vrs;

/// Type that corresponds to a test account.
#[derive(Clone, Debug)]
pub struct Account {
    /// The account's local private key wrapper.
    pub signer: PrivateKeySigner,
}

impl Account {
    /// Creates an account with a fresh random key.
    ///
    /// The account holds no gas token: permits are signed off-chain, so token
    /// owners never need to send a transaction themselves.
    #[must_use]
    pub fn random() -> Self {
        Self { signer: PrivateKeySigner::random() }
    }

    /// Creates an account from a hex-encoded private key, with or without the
    /// `0x` prefix.
    ///
    /// # Errors
    ///
    /// May fail if `private_key` is not a valid secp256k1 secret key.
    pub fn from_private_key(private_key: &str) -> eyre::Result<Self> {
        let signer = private_key
            .trim()
            .parse::<PrivateKeySigner>()
            .wrap_err("failed to parse private key")?;
        Ok(Self { signer })
    }

    /// Get a hex-encoded String representing this account's private key.
    #[must_use]
    pub fn pk(&self) -> String {
        alloy::hex::encode(self.signer.to_bytes())
    }

    /// Retrieve this account's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs `hash` without any prefix, returning the `(v, r, s)` triple a
    /// permit token expects.
    ///
    /// # Errors
    ///
    /// May fail if the signer rejects the hash.
    pub fn sign_hash(&self, hash: &B256) -> eyre::Result<Vrs> {
        let signature = self
            .signer
            .sign_hash_sync(hash)
            .wrap_err("failed to sign hash")?;
        Ok(Vrs::from(signature))
    }

    /// Returns a provider connected to `url` that signs and sends
    /// transactions on behalf of this account.
    #[must_use]
    pub fn wallet(&self, url: Url) -> DynProvider {
        ProviderBuilder::new()
            .wallet(EthereumWallet::from(self.signer.clone()))
            .connect_http(url)
            .erased()
    }
}
