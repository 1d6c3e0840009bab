#![allow(clippy::must_use_candidate)]

pub mod catalog;
mod env;
pub mod ledger;
mod loader;
pub mod routing;
pub mod telemetry;

use serde::Deserialize;

pub use catalog::CatalogConfig;
pub use ledger::LedgerConfig;
pub use routing::{KeywordLists, RoutingConfig, RoutingThresholds, SignalWeights};
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};

/// Top-level Switchboard configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Complexity router signals and thresholds
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Model catalog override
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Cost ledger persistence
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging and metrics export
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
