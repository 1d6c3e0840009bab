use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use switchboard_core::{Provider, Tier};

/// Input and output token counters for one tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub input: u64,
    pub output: u64,
}

impl TokenCounts {
    /// Saturates at `u64::MAX`
    pub const fn total(&self) -> u64 {
        self.input.saturating_add(self.output)
    }
}

/// Cumulative spend aggregate
///
/// Serialized with camelCase keys, upper-case tier keys and lower-case
/// provider keys. Every tier and provider bucket is present once the value
/// has gone through [`CostStats::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostStats {
    /// Number of accounted requests
    #[serde(default)]
    pub total_requests: u64,
    /// Accumulated cost in USD
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub cost_by_tier: BTreeMap<Tier, f64>,
    #[serde(default)]
    pub cost_by_provider: BTreeMap<Provider, f64>,
    #[serde(default)]
    pub tokens_by_tier: BTreeMap<Tier, TokenCounts>,
}

impl CostStats {
    /// All counters at zero with every bucket present
    pub fn zeroed() -> Self {
        let mut stats = Self::default();
        stats.normalize();
        stats
    }

    /// Insert zero buckets for any tier or provider missing from the maps
    pub fn normalize(&mut self) {
        for tier in Tier::iter() {
            self.cost_by_tier.entry(tier).or_insert(0.0);
            self.tokens_by_tier.entry(tier).or_default();
        }
        for provider in Provider::iter() {
            self.cost_by_provider.entry(provider).or_insert(0.0);
        }
    }

    /// Input plus output tokens across all tiers
    pub fn total_tokens(&self) -> u64 {
        self.tokens_by_tier
            .values()
            .fold(0, |acc, counts| acc.saturating_add(counts.total()))
    }

    pub fn tier_cost(&self, tier: Tier) -> f64 {
        self.cost_by_tier.get(&tier).copied().unwrap_or_default()
    }

    pub fn provider_cost(&self, provider: Provider) -> f64 {
        self.cost_by_provider.get(&provider).copied().unwrap_or_default()
    }

    pub fn tier_tokens(&self, tier: Tier) -> TokenCounts {
        self.tokens_by_tier.get(&tier).copied().unwrap_or_default()
    }
}
