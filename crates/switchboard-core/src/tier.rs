use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::ParseError;

/// Capability tier a request is routed to
///
/// Ordered from cheapest to most capable: `Simple < Medium < Complex < Reasoning`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// Short factual questions and lookups
    Simple,
    /// Balanced tasks needing decent capability
    Medium,
    /// Technical, multi-step or code-heavy work
    Complex,
    /// Formal reasoning, proofs and derivations
    Reasoning,
}

impl FromStr for Tier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "medium" => Ok(Self::Medium),
            "complex" => Ok(Self::Complex),
            "reasoning" => Ok(Self::Reasoning),
            _ => Err(ParseError::UnknownTier(s.to_owned())),
        }
    }
}
