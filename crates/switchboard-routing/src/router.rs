//! Complexity router
//!
//! Classifies the last message of a conversation into a tier and picks
//! the cheapest catalog model for it. Stateless after construction, so a
//! single router can be shared across threads.

use std::sync::Arc;

use switchboard_config::{RoutingConfig, RoutingThresholds, SignalWeights};
use switchboard_core::{Message, Tier};

use crate::analysis::{KeywordSets, SignalScores, score_prompt, sigmoid};
use crate::catalog::ModelCatalog;
use crate::error::RoutingError;
use crate::{RoutingDecision, RoutingMethod};

/// Routes conversations to the cheapest model of their estimated tier
#[derive(Debug, Clone)]
pub struct ComplexityRouter {
    catalog: Arc<ModelCatalog>,
    keywords: KeywordSets,
    weights: SignalWeights,
    thresholds: RoutingThresholds,
    default_tier: Tier,
}

impl ComplexityRouter {
    /// Build a router over a catalog with the given signal configuration
    pub fn new(catalog: Arc<ModelCatalog>, config: &RoutingConfig) -> Self {
        Self {
            catalog,
            keywords: KeywordSets::new(&config.keywords),
            weights: config.weights.clone(),
            thresholds: config.thresholds.clone(),
            default_tier: config.default_tier,
        }
    }

    /// Catalog the router selects from
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Tier used for ambiguous prompts when the caller has no preference
    pub const fn default_tier(&self) -> Tier {
        self.default_tier
    }

    /// Route a conversation
    ///
    /// Only the last message is inspected; earlier turns are ignored.
    pub fn route(&self, conversation: &[Message], default_tier: Tier) -> Result<RoutingDecision, RoutingError> {
        let last = conversation
            .last()
            .ok_or_else(|| RoutingError::InvalidInput("conversation must contain at least one message".to_owned()))?;

        let prompt = last.content.as_str();

        let reasoning_matches = self.keywords.reasoning_matches(&prompt.to_lowercase());
        if reasoning_matches >= self.thresholds.rule_min_matches {
            let model = self.catalog.cheapest_in_tier(Tier::Reasoning)?;

            tracing::debug!(
                matches = reasoning_matches,
                model = %model.id,
                "reasoning markers matched, skipping scoring"
            );

            return Ok(RoutingDecision {
                model: model.clone(),
                tier: Tier::Reasoning,
                confidence: self.thresholds.rule_confidence,
                method: RoutingMethod::Rules,
                reasoning: format!(
                    "Detected {reasoning_matches} reasoning markers - requires deep logical thinking"
                ),
                scores: None,
            });
        }

        let scores = score_prompt(prompt, &self.keywords, &self.weights, &self.thresholds);
        let total = scores.total();
        let confidence = sigmoid(total * self.thresholds.sigmoid_scale);

        let (tier, reasoning) = self.classify(&scores, default_tier);
        let model = self.catalog.cheapest_in_tier(tier)?;

        let method = if confidence > self.thresholds.heuristics_confidence {
            RoutingMethod::Heuristics
        } else {
            RoutingMethod::Fallback
        };

        tracing::debug!(
            total,
            confidence,
            tokens = scores.estimated_tokens,
            tier = %tier,
            method = %method,
            model = %model.id,
            "prompt scored for routing"
        );

        Ok(RoutingDecision {
            model: model.clone(),
            tier,
            confidence,
            method,
            reasoning,
            scores: Some(scores),
        })
    }

    /// Route with the configured default tier
    pub fn route_default(&self, conversation: &[Message]) -> Result<RoutingDecision, RoutingError> {
        self.route(conversation, self.default_tier)
    }

    /// Map a score breakdown to a tier; first matching rule wins
    fn classify(&self, scores: &SignalScores, default_tier: Tier) -> (Tier, String) {
        let total = scores.total();

        if total > self.thresholds.complex {
            (
                Tier::Complex,
                "High complexity detected: technical terms, multi-step reasoning, or code".to_owned(),
            )
        } else if total > self.thresholds.medium {
            (
                Tier::Medium,
                "Moderate complexity: balanced task requiring decent capability".to_owned(),
            )
        } else if scores.simple > 0.0 || scores.estimated_tokens < self.thresholds.short_prompt_tokens {
            (Tier::Simple, "Simple task: basic question or short prompt".to_owned())
        } else {
            (
                default_tier,
                format!("Ambiguous complexity - defaulting to {default_tier} tier"),
            )
        }
    }

    /// Render a decision as a multi-line summary
    pub fn explain(&self, decision: &RoutingDecision) -> String {
        let model = &decision.model;

        let savings_line = self.catalog.most_expensive().map_or_else(String::new, |priciest| {
            let top = priciest.average_price();
            let savings = if top > 0.0 {
                (1.0 - model.average_price() / top) * 100.0
            } else {
                0.0
            };
            format!("\n   Savings vs {}: ~{savings:.0}%", priciest.display_name)
        });

        format!(
            "Routing decision:\n   Model: {} ({})\n   Tier: {}\n   Confidence: {:.0}%\n   Method: {}\n   Reason: {}\n   Cost: ${:.2}/${:.2} per 1M tokens{savings_line}",
            model.display_name,
            model.id,
            decision.tier,
            decision.confidence * 100.0,
            decision.method,
            decision.reasoning,
            model.input_price_per_mtok,
            model.output_price_per_mtok,
        )
    }
}
