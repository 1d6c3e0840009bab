use serde::Deserialize;
use switchboard_core::ModelDescriptor;

/// Model catalog override
///
/// When `models` is empty the built-in catalog is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Replacement model table, in priority order
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

impl CatalogConfig {
    /// Whether the config replaces the built-in catalog
    pub fn is_override(&self) -> bool {
        !self.models.is_empty()
    }

    /// Validate per-model pricing and limits
    ///
    /// Tier coverage is checked when the catalog is built.
    ///
    /// # Errors
    ///
    /// Returns an error for negative or non-finite prices, or a zero context window
    pub fn validate(&self) -> anyhow::Result<()> {
        for model in &self.models {
            for (field, price) in [
                ("input_price_per_mtok", model.input_price_per_mtok),
                ("output_price_per_mtok", model.output_price_per_mtok),
            ] {
                if !price.is_finite() || price < 0.0 {
                    anyhow::bail!("catalog model '{}': {field} must be non-negative (got {price})", model.id);
                }
            }

            if model.context_window == 0 {
                anyhow::bail!("catalog model '{}': context_window must be positive", model.id);
            }
        }

        Ok(())
    }
}
