/*!
Digests and signatures for [EIP-2612] permits.

> Note that `permit-crypto` is still `0.*.*`, so breaking changes
> [may occur at any time](https://semver.org/#spec-item-4). If you must depend
> on it, we recommend pinning to a specific version, i.e., `=0.y.z`.

## Computing an approval digest

[`eip712.rs`](./src/eip712.rs) and [`permit.rs`](./src/permit.rs) reproduce,
byte for byte, the hashes an EIP-2612 token computes on-chain:

- [`domain_separator`] binds a signature to one token deployment.
- [`permit_type_hash`] is the hash of the `Permit` struct schema.
- [`approval_digest`] is the EIP-712 digest the token owner signs.

[`ecdsa.rs`](./src/ecdsa.rs) signs such a digest into the `(v, r, s)` triple
the `permit` function expects, and recovers the signer the way the token
does.

```rust,ignore
use alloy_primitives::{address, uint, B256, U256};
use permit_crypto::{approval_digest, domain_separator, permit_type_hash, sign, Approve};

let domain_separator = domain_separator(
    address!("dCE82b5f92C98F27F116F70491a487EFFDb6a2a9"),
    "Permit Token",
    "1",
    1,
);
let approve = Approve { owner, spender, value: uint!(10_U256) };
let digest = approval_digest(domain_separator, permit_type_hash(), &approve, U256::ZERO, deadline);
let vrs = sign(digest, private_key)?;
```

[EIP-2612]: https://eips.ethereum.org/EIPS/eip-2612
*/

pub mod ecdsa;
pub mod eip712;
pub mod error;
pub mod message_hash_utils;
pub mod permit;

pub use ecdsa::{ecrecover, recover, sign, Vrs};
pub use eip712::{domain_separator, domain_separator_from_str, Eip712Domain};
pub use error::Error;
pub use permit::{
    approval_digest, deadline_from_now, permit_struct_hash, permit_type_hash,
    Approve,
};
