//! Block and call context the token executes in.

use alloy_primitives::{address, Address};

/// Block Timestamp - Epoch timestamp: 1st January 2025 `00::00::00`.
pub const BLOCK_TIMESTAMP: u64 = 1_735_689_600;
/// Ethereum mainnet chain id.
pub const CHAIN_ID: u64 = 1;
/// Dummy contract address set for tests.
pub const CONTRACT_ADDRESS: Address =
    address!("dCE82b5f92C98F27F116F70491a487EFFDb6a2a9");
/// Dummy msg sender set for tests.
pub const MSG_SENDER: Address =
    address!("DeaDbeefdEAdbeefdEadbEEFdeadbeEFdEaDbeeF");

/// Block data and caller visible to the token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
    block_timestamp: u64,
    chain_id: u64,
    contract_address: Address,
    msg_sender: Address,
}

impl Default for Environment {
    /// Creates default environment for a test case.
    fn default() -> Environment {
        Self {
            block_timestamp: BLOCK_TIMESTAMP,
            chain_id: CHAIN_ID,
            contract_address: CONTRACT_ADDRESS,
            msg_sender: MSG_SENDER,
        }
    }
}

impl Environment {
    /// Creates an environment for a token deployed at `contract_address` on
    /// chain `chain_id`.
    #[must_use]
    pub fn new(chain_id: u64, contract_address: Address) -> Self {
        Self { chain_id, contract_address, ..Self::default() }
    }

    /// Gets the Unix timestamp of the current block.
    #[must_use]
    pub fn block_timestamp(&self) -> u64 {
        self.block_timestamp
    }

    /// Gets the chain ID of the current chain.
    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Gets the address of the token.
    #[must_use]
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Gets the address of the account calling the token.
    #[must_use]
    pub fn msg_sender(&self) -> Address {
        self.msg_sender
    }

    /// Sets the timestamp of the current block.
    pub fn set_block_timestamp(&mut self, timestamp: u64) {
        self.block_timestamp = timestamp;
    }

    /// Moves the current block `seconds` into the future.
    pub fn advance_block_timestamp(&mut self, seconds: u64) {
        self.block_timestamp = self.block_timestamp.saturating_add(seconds);
    }

    /// Sets the account calling the token.
    pub fn set_msg_sender(&mut self, sender: Address) {
        self.msg_sender = sender;
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::{Environment, BLOCK_TIMESTAMP, CHAIN_ID, MSG_SENDER};

    #[test]
    fn new_keeps_default_block_and_sender() {
        let contract = address!("9008D19f58AAbD9eD0D60971565AA8510560ab41");
        let env = Environment::new(5, contract);

        assert_eq!(5, env.chain_id());
        assert_eq!(contract, env.contract_address());
        assert_eq!(BLOCK_TIMESTAMP, env.block_timestamp());
        assert_eq!(MSG_SENDER, env.msg_sender());
    }

    #[test]
    fn advances_block_timestamp() {
        let mut env = Environment::default();
        assert_eq!(CHAIN_ID, env.chain_id());

        env.advance_block_timestamp(60);
        assert_eq!(BLOCK_TIMESTAMP + 60, env.block_timestamp());

        env.set_block_timestamp(u64::MAX);
        env.advance_block_timestamp(1);
        assert_eq!(u64::MAX, env.block_timestamp());
    }
}
