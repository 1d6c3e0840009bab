//! Complexity-based tier routing for Switchboard
//!
//! Scores the latest message of a conversation against weighted lexical
//! signals and picks the cheapest catalog model of the resulting tier:
//! - **Rules**: two or more reasoning markers short-circuit to REASONING
//! - **Heuristics**: weighted signal total mapped through fixed thresholds
//! - **Fallback**: low-confidence scores and the caller's default tier

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod resolve;
pub mod router;

use strum::Display;
use switchboard_core::{ModelDescriptor, Tier};

pub use analysis::SignalScores;
pub use catalog::ModelCatalog;
pub use error::RoutingError;
pub use resolve::Selection;
pub use router::ComplexityRouter;

/// How a routing decision was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RoutingMethod {
    /// Reasoning-marker shortcut
    Rules,
    /// High-confidence scored decision
    Heuristics,
    /// Low-confidence scored decision or default tier
    Fallback,
}

/// Result of routing a conversation
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingDecision {
    /// Cheapest model of the chosen tier
    pub model: ModelDescriptor,
    /// Tier the conversation was classified into
    pub tier: Tier,
    /// Display confidence in `[0, 1]`
    pub confidence: f64,
    /// How the decision was reached
    pub method: RoutingMethod,
    /// Human-readable justification
    pub reasoning: String,
    /// Signal breakdown, absent when the rules shortcut fired
    pub scores: Option<SignalScores>,
}
