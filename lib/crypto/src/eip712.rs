//! [EIP-712](https://eips.ethereum.org/EIPS/eip-712) is a standard for hashing
//! and signing typed structured data.
//!
//! The domain separator is recomputed from its inputs on every call. Tokens
//! that cache it on-chain still derive it from the same
//! `(name, version, chainId, verifyingContract)` tuple, so a fork that
//! changes the chain id yields a different separator.
//!
//! NOTE: This module implements the version of the encoding known as "v4", as
//! implemented by the JSON RPC method [`eth_signTypedDataV4`] in `MetaMask`.
//!
//! [`eth_signTypedDataV4`]: https://docs.metamask.io/guide/signing-data.html

use alloy_primitives::{keccak256, ruint::UintTryFrom, Address, B256, U256};
use alloy_sol_types::{sol, SolType};

use crate::error::{Error, Result};

/// keccak256("EIP712Domain(string name,string version,uint256 chainId,address
/// verifyingContract)")
pub const TYPE_HASH: B256 = B256::new(
    keccak_const::Keccak256::new()
        .update(b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)")
        .finalize(),
);

/// Tuple for the domain separator.
pub type DomainSeparatorTuple = sol! {
    tuple(bytes32, bytes32, bytes32, uint256, address)
};

/// Returns the domain separator of the `verifying_contract` deployment.
///
/// ```text
/// keccak256(abi.encode(
///     TYPE_HASH,
///     keccak256(bytes(name)),
///     keccak256(bytes(version)),
///     chainId,
///     verifyingContract
/// ))
/// ```
///
/// # Arguments
///
/// * `verifying_contract` - Address of the token contract.
/// * `name` - The token's EIP-712 name, usually its ERC-20 `name()`.
/// * `version` - The token's EIP-712 version.
/// * `chain_id` - Id of the chain the token is deployed on. Any `uint256`
///   is accepted, matching the type `block.chainid` has on-chain.
#[must_use]
pub fn domain_separator<C>(
    verifying_contract: Address,
    name: &str,
    version: &str,
    chain_id: C,
) -> B256
where
    U256: UintTryFrom<C>,
{
    let encoded = DomainSeparatorTuple::abi_encode_params(&(
        TYPE_HASH,
        keccak256(name.as_bytes()),
        keccak256(version.as_bytes()),
        U256::from(chain_id),
        verifying_contract,
    ));

    keccak256(encoded)
}

/// Same as [`domain_separator`], with the verifying contract given as a hex
/// string.
///
/// # Errors
///
/// * [`Error::InvalidAddress`] - If `verifying_contract` is not a 20-byte hex
///   string.
pub fn domain_separator_from_str<C>(
    verifying_contract: &str,
    name: &str,
    version: &str,
    chain_id: C,
) -> Result<B256>
where
    U256: UintTryFrom<C>,
{
    let verifying_contract = verifying_contract
        .parse::<Address>()
        .map_err(|_| Error::InvalidAddress(verifying_contract.to_owned()))?;
    Ok(domain_separator(verifying_contract, name, version, chain_id))
}

/// The fields that describe an EIP-712 signing domain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Eip712Domain {
    /// Name of the signing domain.
    pub name: String,
    /// Version of the signing domain.
    pub version: String,
    /// Chain id the domain is bound to.
    pub chain_id: U256,
    /// Address of the contract verifying signatures.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Creates a new signing domain.
    pub fn new<C>(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: C,
        verifying_contract: Address,
    ) -> Self
    where
        U256: UintTryFrom<C>,
    {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: U256::from(chain_id),
            verifying_contract,
        }
    }

    /// Returns the domain separator of this domain.
    #[must_use]
    pub fn separator(&self) -> B256 {
        domain_separator(
            self.verifying_contract,
            &self.name,
            &self.version,
            self.chain_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, keccak256, Address, U256};
    use proptest::prelude::*;

    use super::{
        domain_separator, domain_separator_from_str, Eip712Domain, TYPE_HASH,
    };
    use crate::Error;

    const CONTRACT_ADDRESS: Address =
        address!("dCE82b5f92C98F27F116F70491a487EFFDb6a2a9");

    #[test]
    fn type_hash_matches_schema() {
        assert_eq!(
            keccak256(
                "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)"
            ),
            TYPE_HASH
        );
        assert_eq!(
            b256!(
                "8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f"
            ),
            TYPE_HASH
        );
    }

    #[test]
    fn matches_deployed_settlement_contract() {
        // Separator of the GPv2 settlement contract on goerli.
        let separator = domain_separator(
            address!("9008D19f58AAbD9eD0D60971565AA8510560ab41"),
            "Gnosis Protocol",
            "v2",
            5,
        );
        assert_eq!(
            b256!(
                "fb378b35457022ecc5709ae5dafad9393c1387ae6d8ce24913a0c969074c07fb"
            ),
            separator
        );
    }

    #[test]
    fn computes_permit_token_separator() {
        let mainnet = domain_separator(CONTRACT_ADDRESS, "Permit Token", "1", 1);
        assert_eq!(
            b256!(
                "4bf3d4ac5d5cfdcdc9ac819420eae24d017c88d23c99ff707a35da535de52da4"
            ),
            mainnet
        );

        let arbitrum =
            domain_separator(CONTRACT_ADDRESS, "Permit Token", "1", 42161);
        assert_eq!(
            b256!(
                "7c71e40b1e45734e60c3c9ff638a1fbd1f869e756a55ae569c930a68e65ac67b"
            ),
            arbitrum
        );
    }

    #[test]
    fn domain_struct_matches_function() {
        let domain =
            Eip712Domain::new("Permit Token", "1", 1, CONTRACT_ADDRESS);
        assert_eq!(
            domain_separator(CONTRACT_ADDRESS, "Permit Token", "1", 1),
            domain.separator()
        );
    }

    #[test]
    fn accepts_chain_id_beyond_u64() {
        let wide = U256::from(u64::MAX) + U256::ONE;
        let separator =
            domain_separator(CONTRACT_ADDRESS, "Permit Token", "1", wide);

        assert_eq!(
            separator,
            Eip712Domain::new("Permit Token", "1", wide, CONTRACT_ADDRESS)
                .separator()
        );
        assert_ne!(
            separator,
            domain_separator(CONTRACT_ADDRESS, "Permit Token", "1", u64::MAX)
        );
        // Truncated to 64 bits, `wide` would be chain 0.
        assert_ne!(
            separator,
            domain_separator(CONTRACT_ADDRESS, "Permit Token", "1", 0u64)
        );
        assert_eq!(
            domain_separator(CONTRACT_ADDRESS, "Permit Token", "1", 1u64),
            domain_separator(CONTRACT_ADDRESS, "Permit Token", "1", U256::ONE)
        );
    }

    #[test]
    fn parses_verifying_contract() {
        let separator = domain_separator_from_str(
            "0xdCE82b5f92C98F27F116F70491a487EFFDb6a2a9",
            "Permit Token",
            "1",
            1,
        )
        .expect("should parse address");
        assert_eq!(
            domain_separator(CONTRACT_ADDRESS, "Permit Token", "1", 1),
            separator
        );
    }

    #[test]
    fn rejects_malformed_verifying_contract() {
        for input in ["", "0x", "not an address", "0xdCE82b5f92C98F27F116F7"] {
            let err = domain_separator_from_str(input, "Permit Token", "1", 1)
                .expect_err("should reject malformed address");
            assert!(matches!(err, Error::InvalidAddress(ref s) if s == input));
        }
    }

    #[test]
    fn separator_changes_with_every_input() {
        proptest!(|(
            contract: [u8; 20],
            other_contract: [u8; 20],
            name: String,
            other_name: String,
            chain_id: u64,
            other_chain_id: u64,
        )| {
            let contract = Address::from(contract);
            let base = domain_separator(contract, &name, "1", chain_id);

            prop_assert_eq!(base, domain_separator(contract, &name, "1", chain_id));

            let other_contract = Address::from(other_contract);
            if other_contract != contract {
                prop_assert_ne!(base, domain_separator(other_contract, &name, "1", chain_id));
            }
            if other_name != name {
                prop_assert_ne!(base, domain_separator(contract, &other_name, "1", chain_id));
            }
            if other_chain_id != chain_id {
                prop_assert_ne!(base, domain_separator(contract, &name, "1", other_chain_id));
            }
            prop_assert_ne!(base, domain_separator(contract, &name, "2", chain_id));
        });
    }
}
