//! Common Smart Contracts utilities.
pub mod cryptography;
pub mod nonces;
