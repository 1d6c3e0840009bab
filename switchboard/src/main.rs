#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod commands;

use std::io::Write;
use std::sync::Arc;

use args::{Args, Command};
use clap::Parser;
use switchboard_config::Config;
use switchboard_routing::{ComplexityRouter, ModelCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let (config_path, explicit) = args.config_path();
    let config = Config::load_or_default(&config_path, explicit)?;

    // Initialize telemetry
    let telemetry_guard = switchboard_telemetry::init(&config.telemetry, &args.log_filter)?;

    tracing::debug!(config_path = %config_path.display(), "starting switchboard");

    let catalog = ModelCatalog::from_config(&config.catalog)?;
    let router = ComplexityRouter::new(Arc::new(catalog), &config.routing);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Route {
            prompt,
            model,
            default_tier,
        } => commands::route(
            &mut out,
            &router,
            &prompt,
            model.as_deref(),
            default_tier.unwrap_or_else(|| router.default_tier()),
        )?,
        Command::Models { provider } => {
            commands::models(&mut out, &router, provider, commands::provider_configured)?;
        }
        Command::Track {
            model,
            input_tokens,
            output_tokens,
        } => {
            let ledger = commands::open_ledger(&config.ledger)?;
            commands::track(&mut out, &router, ledger.as_ref(), &model, input_tokens, output_tokens)?;
        }
        Command::Stats => {
            let ledger = commands::open_ledger(&config.ledger)?;
            commands::stats(&mut out, ledger.as_ref())?;
        }
        Command::Reset => {
            let ledger = commands::open_ledger(&config.ledger)?;
            commands::reset(&mut out, ledger.as_ref())?;
        }
    }

    out.flush()?;

    if let Err(e) = telemetry_guard.flush() {
        tracing::warn!(error = %e, "failed to flush metrics on exit");
    }

    Ok(())
}
