//! Router and ledger wired together from a config

use std::sync::Arc;

use switchboard_config::Config;
use switchboard_core::Message;
use switchboard_ledger::{CostLedger, TrackedUsage};
use switchboard_routing::{ComplexityRouter, ModelCatalog, RoutingDecision};

pub struct TestRouter {
    pub router: ComplexityRouter,
    pub ledger: Option<CostLedger>,
}

impl TestRouter {
    pub fn start(config: &Config) -> anyhow::Result<Self> {
        let catalog = ModelCatalog::from_config(&config.catalog)?;
        let router = ComplexityRouter::new(Arc::new(catalog), &config.routing);

        let ledger = if config.ledger.enabled {
            let path = config
                .ledger
                .resolved_path()
                .ok_or_else(|| anyhow::anyhow!("no ledger path"))?;
            Some(CostLedger::open_file(path))
        } else {
            None
        };

        Ok(Self { router, ledger })
    }

    /// Route a single user prompt with the configured default tier
    pub fn route(&self, prompt: &str) -> anyhow::Result<RoutingDecision> {
        Ok(self.router.route_default(&[Message::user(prompt)])?)
    }

    /// Route a prompt and account a completed call on the chosen model
    pub fn complete(&self, prompt: &str, input_tokens: u64, output_tokens: u64) -> anyhow::Result<f64> {
        let decision = self.route(prompt)?;
        let ledger = self
            .ledger
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("ledger disabled"))?;

        Ok(ledger.track_request(&TrackedUsage::for_model(&decision.model, input_tokens, output_tokens))?)
    }
}
