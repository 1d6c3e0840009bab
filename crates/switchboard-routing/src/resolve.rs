//! Model-request resolution
//!
//! Turns the model string a client asked for into a concrete catalog
//! model: `auto` runs the complexity router, a tier name picks that
//! tier's cheapest model, anything else is looked up by id.

use switchboard_core::{Message, ModelDescriptor, Tier};

use crate::error::RoutingError;
use crate::router::ComplexityRouter;
use crate::RoutingDecision;

/// Prefix clients use to address this router
pub const MODEL_PREFIX: &str = "switchboard/";

/// Model id that requests complexity routing
pub const AUTO_MODEL: &str = "auto";

/// Outcome of resolving a requested model
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Chosen by the complexity router
    Routed(RoutingDecision),
    /// Cheapest model of an explicitly requested tier
    Tier { tier: Tier, model: ModelDescriptor },
    /// Specific model requested by id
    Pinned(ModelDescriptor),
}

impl Selection {
    /// The model to dispatch to
    pub const fn model(&self) -> &ModelDescriptor {
        match self {
            Self::Routed(decision) => &decision.model,
            Self::Tier { model, .. } | Self::Pinned(model) => model,
        }
    }
}

/// Strip the router prefix, or reduce a foreign `vendor/model` id to its last segment
pub fn normalize_model_id(requested: &str) -> &str {
    if let Some(stripped) = requested.strip_prefix(MODEL_PREFIX) {
        stripped
    } else {
        requested.rsplit('/').next().unwrap_or(requested)
    }
}

impl ComplexityRouter {
    /// Resolve a requested model string against the catalog
    pub fn resolve(
        &self,
        requested: Option<&str>,
        conversation: &[Message],
        default_tier: Tier,
    ) -> Result<Selection, RoutingError> {
        let model_id = normalize_model_id(requested.unwrap_or(AUTO_MODEL));

        if model_id == AUTO_MODEL {
            return self.route(conversation, default_tier).map(Selection::Routed);
        }

        if let Ok(tier) = model_id.parse::<Tier>() {
            let model = self.catalog().cheapest_in_tier(tier)?.clone();
            tracing::debug!(tier = %tier, model = %model.id, "explicit tier requested");
            return Ok(Selection::Tier { tier, model });
        }

        let model = self
            .catalog()
            .find_by_id(model_id)
            .cloned()
            .ok_or_else(|| RoutingError::UnknownModel {
                id: model_id.to_owned(),
            })?;

        tracing::debug!(model = %model.id, "specific model requested");
        Ok(Selection::Pinned(model))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use switchboard_config::RoutingConfig;

    use super::*;
    use crate::catalog::ModelCatalog;

    fn router() -> ComplexityRouter {
        ComplexityRouter::new(Arc::new(ModelCatalog::builtin()), &RoutingConfig::default())
    }

    fn prompt() -> Vec<Message> {
        vec![Message::user("What is 2+2?")]
    }

    #[test]
    fn normalizes_ids() {
        assert_eq!(normalize_model_id("switchboard/auto"), "auto");
        assert_eq!(normalize_model_id("openrouter/openai/gpt-4o"), "gpt-4o");
        assert_eq!(normalize_model_id("gpt-4o"), "gpt-4o");
    }

    #[test]
    fn missing_request_means_auto() {
        let selection = router().resolve(None, &prompt(), Tier::Medium).unwrap();
        let Selection::Routed(decision) = selection else {
            panic!("expected routed selection");
        };
        assert_eq!(decision.tier, Tier::Simple);
    }

    #[test]
    fn prefixed_auto_routes() {
        let selection = router()
            .resolve(Some("switchboard/auto"), &prompt(), Tier::Medium)
            .unwrap();
        assert!(matches!(selection, Selection::Routed(_)));
    }

    #[test]
    fn tier_name_selects_cheapest_in_tier() {
        let selection = router().resolve(Some("complex"), &prompt(), Tier::Medium).unwrap();
        assert_eq!(
            selection,
            Selection::Tier {
                tier: Tier::Complex,
                model: ModelCatalog::builtin().cheapest_in_tier(Tier::Complex).unwrap().clone(),
            }
        );
    }

    #[test]
    fn specific_id_is_pinned() {
        let selection = router()
            .resolve(Some("switchboard/claude-sonnet-4.5"), &prompt(), Tier::Medium)
            .unwrap();
        assert!(matches!(selection, Selection::Pinned(_)));
        assert_eq!(selection.model().id, "claude-sonnet-4.5");
    }

    #[test]
    fn unknown_id_errors() {
        let err = router().resolve(Some("gpt-9"), &prompt(), Tier::Medium).unwrap_err();
        assert_eq!(err, RoutingError::UnknownModel { id: "gpt-9".to_owned() });
    }

    #[test]
    fn auto_with_empty_conversation_is_invalid() {
        let err = router().resolve(Some("auto"), &[], Tier::Medium).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidInput(_)));
    }
}
