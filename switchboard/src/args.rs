use std::path::PathBuf;

use clap::{Parser, Subcommand};
use switchboard_core::{Provider, Tier};

/// Switchboard tier router
#[derive(Debug, Parser)]
#[command(name = "switchboard", about = "Route prompts to the cheapest capable model tier and track spend")]
pub struct Args {
    /// Path to configuration file [default: switchboard.toml]
    #[arg(short, long, env = "SWITCHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter directive
    #[arg(long, default_value = "info", env = "SWITCHBOARD_LOG")]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Config path, and whether the user asked for it explicitly
    pub fn config_path(&self) -> (PathBuf, bool) {
        self.config
            .clone()
            .map_or_else(|| (PathBuf::from("switchboard.toml"), false), |path| (path, true))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick a model for a prompt and explain the choice
    Route {
        /// Prompt text to classify
        prompt: String,

        /// Requested model: `auto`, a tier name or a model id
        #[arg(short, long)]
        model: Option<String>,

        /// Tier used when the prompt is ambiguous
        #[arg(long)]
        default_tier: Option<Tier>,
    },

    /// List catalog models grouped by tier
    Models {
        /// Only show models served by this provider
        #[arg(short, long)]
        provider: Option<Provider>,
    },

    /// Record the usage of a completed request
    Track {
        /// Catalog model id that served the request
        #[arg(short, long)]
        model: String,

        /// Prompt tokens consumed
        #[arg(long, default_value_t = 0)]
        input_tokens: u64,

        /// Completion tokens generated
        #[arg(long, default_value_t = 0)]
        output_tokens: u64,
    },

    /// Show accumulated spend
    Stats,

    /// Zero the cost ledger
    Reset,
}
