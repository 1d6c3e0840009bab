//! Shared domain types for Switchboard
//!
//! Tiers, providers, model descriptors and conversation messages used by
//! both the router and the cost ledger.

#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod message;
pub mod model;
pub mod provider;
pub mod tier;

pub use error::ParseError;
pub use message::{Message, Role};
pub use model::{InputKind, ModelDescriptor};
pub use provider::Provider;
pub use tier::Tier;
