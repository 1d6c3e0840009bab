//! Programmatic configuration builder for integration tests

use std::path::Path;

use switchboard_config::{Config, LedgerConfig};
use switchboard_core::Tier;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Defaults with the ledger disabled
    pub fn new() -> Self {
        Self {
            config: Config {
                ledger: LedgerConfig {
                    enabled: false,
                    path: None,
                },
                ..Config::default()
            },
        }
    }

    /// Persist the ledger at the given path
    pub fn with_ledger_at(mut self, path: &Path) -> Self {
        self.config.ledger = LedgerConfig {
            enabled: true,
            path: Some(path.to_path_buf()),
        };
        self
    }

    /// Tier used for ambiguous prompts
    pub fn with_default_tier(mut self, tier: Tier) -> Self {
        self.config.routing.default_tier = tier;
        self
    }

    /// Replace the reasoning markers
    pub fn with_reasoning_keywords(mut self, keywords: &[&str]) -> Self {
        self.config.routing.keywords.reasoning = keywords.iter().map(|k| (*k).to_owned()).collect();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
