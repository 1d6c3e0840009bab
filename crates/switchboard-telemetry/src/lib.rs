//! Telemetry for Switchboard
//!
//! Structured logging through `tracing-subscriber`, plus optional OTLP metric
//! export for routing decisions and ledger spend.

mod metadata;
pub mod metrics;

use std::time::Duration;

use anyhow::Context;
use opentelemetry::global;
use opentelemetry_otlp::{MetricExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use switchboard_config::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the OTLP meter provider alive for the life of the process
///
/// Logging needs no teardown, so a guard without an exporter holds nothing.
#[derive(Default)]
pub struct TelemetryGuard {
    metrics: Option<SdkMeterProvider>,
}

impl TelemetryGuard {
    /// Whether metrics are being exported over OTLP
    pub const fn exports_metrics(&self) -> bool {
        self.metrics.is_some()
    }

    /// Push buffered metrics to the exporter now
    ///
    /// Short CLI invocations exit well before the periodic reader fires, so
    /// callers flush before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the exporter rejects the flush
    pub fn flush(&self) -> anyhow::Result<()> {
        let Some(provider) = &self.metrics else {
            return Ok(());
        };
        provider.force_flush().context("failed to flush metrics")
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        let Some(provider) = self.metrics.take() else {
            return;
        };
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "meter provider did not shut down cleanly");
        }
    }
}

/// Initialize logging and, when an exporter is configured, metrics
///
/// Returns a guard that must be held for the lifetime of the application.
///
/// # Errors
///
/// Returns an error if the OTLP exporter cannot be built or a global
/// subscriber is already installed
pub fn init(config: &TelemetryConfig, log_filter: &str) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")?;

    let Some(exporter) = &config.exporter else {
        return Ok(TelemetryGuard::default());
    };

    let meter_provider = meter_provider(exporter, metadata::build_resource(config))?;
    global::set_meter_provider(meter_provider.clone());

    tracing::debug!(
        endpoint = %exporter.endpoint,
        protocol = ?exporter.protocol,
        interval_secs = exporter.export_interval_secs,
        "OTLP metrics export enabled"
    );

    Ok(TelemetryGuard {
        metrics: Some(meter_provider),
    })
}

/// Meter provider that pushes to the configured OTLP endpoint on a fixed interval
fn meter_provider(config: &ExporterConfig, resource: Resource) -> anyhow::Result<SdkMeterProvider> {
    let endpoint = config.endpoint.as_str();

    let exporter = match config.protocol {
        ExportProtocol::Grpc => MetricExporter::builder().with_tonic().with_endpoint(endpoint).build(),
        ExportProtocol::HttpProto => MetricExporter::builder().with_http().with_endpoint(endpoint).build(),
    }
    .with_context(|| format!("failed to build {:?} metrics exporter for {endpoint}", config.protocol))?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(config.export_interval_secs))
        .build();

    Ok(SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build())
}
