use alloy::sol_types::{Revert as RevertReason, SolError};

/// Inspects the revert data carried by a failed call.
pub trait Revert {
    /// Returns the reason of an `Error(string)` revert, if `Self` carries one.
    fn revert_reason(&self) -> Option<String>;

    /// Checks that `Self` is an `Error(string)` revert with `reason`.
    fn reverted_with_reason(&self, reason: &str) -> bool {
        self.revert_reason().is_some_and(|actual| actual == reason)
    }
}

impl Revert for alloy::contract::Error {
    fn revert_reason(&self) -> Option<String> {
        let data = self.as_revert_data()?;
        RevertReason::abi_decode(&data).ok().map(|revert| revert.reason)
    }
}

impl Revert for eyre::Report {
    fn revert_reason(&self) -> Option<String> {
        self.downcast_ref::<alloy::contract::Error>()
            .and_then(Revert::revert_reason)
    }
}
