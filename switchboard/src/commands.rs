use std::io::Write;

use anyhow::Context;
use strum::IntoEnumIterator;
use switchboard_config::LedgerConfig;
use switchboard_core::{InputKind, Message, Provider, Tier};
use switchboard_ledger::{CostLedger, TrackedUsage};
use switchboard_routing::resolve::normalize_model_id;
use switchboard_routing::{ComplexityRouter, RoutingError, Selection};
use switchboard_telemetry::metrics;

const LEDGER_DISABLED: &str = "cost tracking is disabled";

/// Open the configured ledger, `None` when tracking is disabled
pub fn open_ledger(config: &LedgerConfig) -> anyhow::Result<Option<CostLedger>> {
    if !config.enabled {
        return Ok(None);
    }

    let path = config
        .resolved_path()
        .context("failed to determine ledger path: no home directory")?;
    tracing::debug!(path = %path.display(), "opening cost ledger");

    Ok(Some(CostLedger::open_file(path)))
}

pub fn route(
    out: &mut impl Write,
    router: &ComplexityRouter,
    prompt: &str,
    model: Option<&str>,
    default_tier: Tier,
) -> anyhow::Result<()> {
    let conversation = [Message::user(prompt)];

    match router.resolve(model, &conversation, default_tier)? {
        Selection::Routed(decision) => {
            metrics::record_routing_decision(decision.tier, &decision.method.to_string(), decision.confidence);
            tracing::info!(
                model = %decision.model.id,
                tier = %decision.tier,
                method = %decision.method,
                confidence = decision.confidence,
                "routed prompt"
            );
            writeln!(out, "{}", router.explain(&decision))?;
        }
        Selection::Tier { tier, model } => {
            writeln!(out, "Tier {tier}: {} ({})", model.display_name, model.id)?;
        }
        Selection::Pinned(model) => {
            writeln!(out, "Model: {} ({}, {} tier)", model.display_name, model.id, model.tier)?;
        }
    }

    Ok(())
}

/// Whether an API key for the provider is present in the environment
pub fn provider_configured(provider: Provider) -> bool {
    std::env::var(provider.api_key_var()).is_ok_and(|key| !key.trim().is_empty())
}

pub fn models(
    out: &mut impl Write,
    router: &ComplexityRouter,
    provider: Option<Provider>,
    is_available: impl Fn(Provider) -> bool,
) -> anyhow::Result<()> {
    for tier in Tier::iter() {
        writeln!(out, "{tier}:")?;
        for model in router.catalog().list_by_tier(tier)? {
            if provider.is_some_and(|p| p != model.provider) {
                continue;
            }

            let status = if is_available(model.provider) {
                "available"
            } else {
                "no API key"
            };
            let images = if model.accepts(InputKind::Image) { ", images" } else { "" };

            writeln!(
                out,
                "   {status:<10} {:<28} {:<22} ${:.2}/${:.2} per 1M tokens, {} context{images}",
                model.id,
                model.display_name,
                model.input_price_per_mtok,
                model.output_price_per_mtok,
                model.context_window,
            )?;
        }
    }
    Ok(())
}

pub fn track(
    out: &mut impl Write,
    router: &ComplexityRouter,
    ledger: Option<&CostLedger>,
    model_id: &str,
    input_tokens: u64,
    output_tokens: u64,
) -> anyhow::Result<()> {
    let Some(ledger) = ledger else {
        writeln!(out, "{LEDGER_DISABLED}")?;
        return Ok(());
    };

    let id = normalize_model_id(model_id);
    let model = router
        .catalog()
        .find_by_id(id)
        .ok_or_else(|| RoutingError::UnknownModel { id: id.to_owned() })?;

    let cost = ledger.track_request(&TrackedUsage::for_model(model, input_tokens, output_tokens))?;
    metrics::record_spend(model.tier, model.provider, cost, input_tokens, output_tokens);

    writeln!(
        out,
        "Tracked {} ({} tier): {input_tokens} in / {output_tokens} out, ${cost:.4}",
        model.id, model.tier
    )?;
    Ok(())
}

pub fn stats(out: &mut impl Write, ledger: Option<&CostLedger>) -> anyhow::Result<()> {
    match ledger {
        Some(ledger) => writeln!(out, "{}", ledger.summarize())?,
        None => writeln!(out, "{LEDGER_DISABLED}")?,
    }
    Ok(())
}

pub fn reset(out: &mut impl Write, ledger: Option<&CostLedger>) -> anyhow::Result<()> {
    match ledger {
        Some(ledger) => {
            ledger.reset();
            writeln!(out, "Cost ledger reset")?;
        }
        None => writeln!(out, "{LEDGER_DISABLED}")?,
    }
    Ok(())
}
