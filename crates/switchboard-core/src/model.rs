use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::provider::Provider;
use crate::tier::Tier;

/// Kind of input a model accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Image,
}

/// Static description of a backend model and its pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDescriptor {
    /// Model identifier sent to the provider
    pub id: String,
    /// Human-readable name
    pub display_name: String,
    /// Vendor serving the model
    pub provider: Provider,
    /// Cost per million input tokens (USD)
    pub input_price_per_mtok: f64,
    /// Cost per million output tokens (USD)
    pub output_price_per_mtok: f64,
    /// Context window in tokens
    pub context_window: u32,
    /// Tier this entry belongs to
    pub tier: Tier,
    /// Whether the model exposes an explicit reasoning mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_reasoning: Option<bool>,
    /// Accepted input kinds, text only when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_kinds: Option<BTreeSet<InputKind>>,
    /// Maximum completion length in tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl ModelDescriptor {
    /// Mean of the input and output price per million tokens
    pub fn average_price(&self) -> f64 {
        f64::midpoint(self.input_price_per_mtok, self.output_price_per_mtok)
    }

    /// Whether the model accepts the given input kind
    pub fn accepts(&self, kind: InputKind) -> bool {
        self.input_kinds
            .as_ref()
            .map_or(kind == InputKind::Text, |kinds| kinds.contains(&kind))
    }
}
