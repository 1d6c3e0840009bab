//! Routing-specific error types

use switchboard_core::{ParseError, Tier};
use thiserror::Error;

/// Errors that can occur while routing a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Caller passed something the router cannot classify
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The catalog has no model for the tier
    #[error("no model configured for tier {tier}")]
    Catalog { tier: Tier },

    /// Requested model id is not in the catalog
    #[error("unknown model: {id}")]
    UnknownModel { id: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
