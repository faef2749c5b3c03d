//! Smart Contracts with cryptography.
pub mod eip712;
