//! Optional Metadata of the ERC-20 standard.

/// Number of decimals used by default on implementors of [`Erc20Metadata`].
pub const DEFAULT_DECIMALS: u8 = 18;

/// State of an [`Erc20Metadata`] contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Erc20Metadata {
    /// Token name.
    name: String,
    /// Token symbol.
    symbol: String,
}

impl Erc20Metadata {
    /// Creates the metadata of a token named `name` with ticker `symbol`.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self { name: name.into(), symbol: symbol.into() }
    }
}

/// Interface for the optional metadata functions from the ERC-20 standard.
pub trait IErc20Metadata {
    /// Returns the name of the token.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn name(&self) -> String;

    /// Returns the symbol of the token, usually a shorter version of the name.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn symbol(&self) -> String;

    /// Returns the number of decimals used to get a user-friendly
    /// representation of values of this token.
    ///
    /// For example, if `decimals` equals `2`, a balance of `505` tokens should
    /// be displayed to a user as `5.05` (`505 / 10 ** 2`).
    ///
    /// Tokens usually opt for a value of `18`, imitating the relationship
    /// between Ether and Wei. This is the default value returned by this
    /// function ([`DEFAULT_DECIMALS`]), unless it's overridden.
    ///
    /// NOTE: This information is only used for *display* purposes: in
    /// no way it affects any of the arithmetic of the contract.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn decimals(&self) -> u8;
}

impl IErc20Metadata for Erc20Metadata {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn symbol(&self) -> String {
        self.symbol.clone()
    }

    fn decimals(&self) -> u8 {
        DEFAULT_DECIMALS
    }
}
