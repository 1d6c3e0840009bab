//! Model catalog with per-tier pricing
//!
//! The built-in table is the single source of model descriptors; every
//! entry point shares one `ModelCatalog`. A config file may replace it.

use std::collections::BTreeSet;

use strum::IntoEnumIterator;
use switchboard_config::CatalogConfig;
use switchboard_core::{InputKind, ModelDescriptor, Provider, Tier};

use crate::error::RoutingError;

struct BuiltinModel {
    id: &'static str,
    name: &'static str,
    provider: Provider,
    input: f64,
    output: f64,
    context_window: u32,
    tier: Tier,
    reasoning: bool,
    vision: bool,
    max_output_tokens: u32,
}

const BUILTIN_MODELS: &[BuiltinModel] = &[
    // SIMPLE
    BuiltinModel {
        id: "llama-3.1-70b-versatile",
        name: "Llama 3.1 70B (Groq)",
        provider: Provider::Groq,
        input: 0.59,
        output: 0.79,
        context_window: 128_000,
        tier: Tier::Simple,
        reasoning: false,
        vision: false,
        max_output_tokens: 4096,
    },
    BuiltinModel {
        id: "gemini-1.5-flash-latest",
        name: "Gemini 1.5 Flash",
        provider: Provider::Google,
        input: 0.075,
        output: 0.30,
        context_window: 1_000_000,
        tier: Tier::Simple,
        reasoning: false,
        vision: true,
        max_output_tokens: 8192,
    },
    BuiltinModel {
        id: "gemini-2.0-flash-exp",
        name: "Gemini 2.0 Flash",
        provider: Provider::Google,
        input: 0.10,
        output: 0.40,
        context_window: 1_000_000,
        tier: Tier::Simple,
        reasoning: false,
        vision: true,
        max_output_tokens: 8192,
    },
    // MEDIUM
    BuiltinModel {
        id: "gpt-4o-mini",
        name: "GPT-4o Mini",
        provider: Provider::Openai,
        input: 0.15,
        output: 0.60,
        context_window: 128_000,
        tier: Tier::Medium,
        reasoning: false,
        vision: true,
        max_output_tokens: 16_384,
    },
    BuiltinModel {
        id: "claude-haiku-4.5",
        name: "Claude Haiku 4.5",
        provider: Provider::Anthropic,
        input: 1.00,
        output: 5.00,
        context_window: 200_000,
        tier: Tier::Medium,
        reasoning: false,
        vision: true,
        max_output_tokens: 4096,
    },
    BuiltinModel {
        id: "gemini-1.5-pro-latest",
        name: "Gemini 1.5 Pro",
        provider: Provider::Google,
        input: 3.50,
        output: 10.50,
        context_window: 1_000_000,
        tier: Tier::Medium,
        reasoning: false,
        vision: true,
        max_output_tokens: 8192,
    },
    // COMPLEX
    BuiltinModel {
        id: "claude-sonnet-4.5",
        name: "Claude Sonnet 4.5",
        provider: Provider::Anthropic,
        input: 3.00,
        output: 15.00,
        context_window: 200_000,
        tier: Tier::Complex,
        reasoning: false,
        vision: true,
        max_output_tokens: 8192,
    },
    BuiltinModel {
        id: "gpt-4o",
        name: "GPT-4o",
        provider: Provider::Openai,
        input: 2.50,
        output: 10.00,
        context_window: 128_000,
        tier: Tier::Complex,
        reasoning: false,
        vision: true,
        max_output_tokens: 16_384,
    },
    // Same id as the MEDIUM entry; lookups by id resolve to the MEDIUM one
    BuiltinModel {
        id: "gemini-1.5-pro-latest",
        name: "Gemini 1.5 Pro",
        provider: Provider::Google,
        input: 3.50,
        output: 10.50,
        context_window: 2_000_000,
        tier: Tier::Complex,
        reasoning: false,
        vision: true,
        max_output_tokens: 8192,
    },
    // REASONING
    BuiltinModel {
        id: "claude-opus-4.5",
        name: "Claude Opus 4.5",
        provider: Provider::Anthropic,
        input: 15.00,
        output: 75.00,
        context_window: 200_000,
        tier: Tier::Reasoning,
        reasoning: false,
        vision: false,
        max_output_tokens: 4096,
    },
    BuiltinModel {
        id: "o3-mini",
        name: "OpenAI o3-mini",
        provider: Provider::Openai,
        input: 1.10,
        output: 4.40,
        context_window: 128_000,
        tier: Tier::Reasoning,
        reasoning: true,
        vision: false,
        max_output_tokens: 65_536,
    },
    BuiltinModel {
        id: "deepseek-reasoner",
        name: "DeepSeek Reasoner",
        provider: Provider::Groq,
        input: 0.55,
        output: 2.19,
        context_window: 128_000,
        tier: Tier::Reasoning,
        reasoning: true,
        vision: false,
        max_output_tokens: 4096,
    },
];

impl BuiltinModel {
    fn to_descriptor(&self) -> ModelDescriptor {
        let mut kinds = BTreeSet::from([InputKind::Text]);
        if self.vision {
            kinds.insert(InputKind::Image);
        }

        ModelDescriptor {
            id: self.id.to_owned(),
            display_name: self.name.to_owned(),
            provider: self.provider,
            input_price_per_mtok: self.input,
            output_price_per_mtok: self.output,
            context_window: self.context_window,
            tier: self.tier,
            supports_reasoning: Some(self.reasoning),
            input_kinds: Some(kinds),
            max_output_tokens: Some(self.max_output_tokens),
        }
    }
}

/// Ordered, read-only table of model descriptors
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    /// Wrap a descriptor table without checking tier coverage
    pub const fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    /// The built-in catalog
    pub fn builtin() -> Self {
        Self::new(BUILTIN_MODELS.iter().map(BuiltinModel::to_descriptor).collect())
    }

    /// Build the catalog from configuration, using the built-in table
    /// unless the config supplies its own models
    pub fn from_config(config: &CatalogConfig) -> Result<Self, RoutingError> {
        let catalog = if config.is_override() {
            Self::new(config.models.clone())
        } else {
            Self::builtin()
        };

        catalog.validate()?;

        tracing::debug!(
            models = catalog.models.len(),
            overridden = config.is_override(),
            "model catalog loaded"
        );

        Ok(catalog)
    }

    /// Check that every tier has at least one model
    pub fn validate(&self) -> Result<(), RoutingError> {
        for tier in Tier::iter() {
            if !self.models.iter().any(|m| m.tier == tier) {
                return Err(RoutingError::Catalog { tier });
            }
        }
        Ok(())
    }

    /// All descriptors in insertion order
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Models belonging to a tier, in insertion order
    pub fn list_by_tier(&self, tier: Tier) -> Result<Vec<&ModelDescriptor>, RoutingError> {
        let models: Vec<&ModelDescriptor> = self.models.iter().filter(|m| m.tier == tier).collect();

        if models.is_empty() {
            return Err(RoutingError::Catalog { tier });
        }

        Ok(models)
    }

    /// First model with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Model with the lowest average price in a tier
    ///
    /// Ties go to the model listed first.
    pub fn cheapest_in_tier(&self, tier: Tier) -> Result<&ModelDescriptor, RoutingError> {
        self.list_by_tier(tier)?
            .into_iter()
            .reduce(|cheapest, m| if m.average_price() < cheapest.average_price() { m } else { cheapest })
            .ok_or(RoutingError::Catalog { tier })
    }

    /// Model with the highest average price across all tiers
    pub fn most_expensive(&self) -> Option<&ModelDescriptor> {
        self.models
            .iter()
            .reduce(|priciest, m| if m.average_price() > priciest.average_price() { m } else { priciest })
    }
}
