//! Cost accounting for routed requests
//!
//! The ledger keeps cumulative spend and token counts partitioned by tier and
//! provider, and writes the whole aggregate to a JSON file after every change.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod error;
pub mod ledger;
pub mod stats;
pub mod store;

pub use error::LedgerError;
pub use ledger::{CostLedger, TrackedUsage};
pub use stats::{CostStats, TokenCounts};
pub use store::{JsonFileStore, StatsStore};
