/*!
# Permit Token

An in-memory reference model of an ERC-20 token with the [EIP-2612] `permit`
extension. It answers the same calls a deployed permit token does (`name`,
`DOMAIN_SEPARATOR`, `nonces`, `permit`, ...) and fails with the same revert
data, so signing helpers can be checked against it without a chain.

Block data (timestamp, chain id, contract address) and the caller come from
an explicit [`Environment`].

```ignore
use permit_token::{Environment, PermitToken};
use permit_token::token::erc20::extensions::IErc20Permit;

let mut token = PermitToken::deploy(Environment::default(), total_supply)?;
token.sender(relayer).permit(owner, spender, value, deadline, v, r, s)?;
```

[EIP-2612]: https://eips.ethereum.org/EIPS/eip-2612
*/

#![allow(clippy::module_name_repetitions)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod environment;
pub mod permit_token;
pub mod token;
pub mod utils;

pub use environment::Environment;
pub use permit_token::PermitToken;
