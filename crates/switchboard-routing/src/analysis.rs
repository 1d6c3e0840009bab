//! Weighted lexical signal scoring
//!
//! Counts keyword matches in a prompt and scales each count by its
//! configured weight. No ML pipeline, pure heuristics.

use switchboard_config::{KeywordLists, RoutingThresholds, SignalWeights};

/// Rough characters-per-token ratio used for length estimates
const CHARS_PER_TOKEN: usize = 4;

/// Keyword lists normalized to lowercase once at router construction
#[derive(Debug, Clone)]
pub struct KeywordSets {
    reasoning: Vec<String>,
    code: Vec<String>,
    simple: Vec<String>,
    multi_step: Vec<String>,
    technical: Vec<String>,
    creative: Vec<String>,
    imperative: Vec<String>,
    constraint: Vec<String>,
    output_format: Vec<String>,
}

impl KeywordSets {
    /// Lowercase and de-blank every configured list
    pub fn new(lists: &KeywordLists) -> Self {
        Self {
            reasoning: normalize(&lists.reasoning),
            code: normalize(&lists.code),
            simple: normalize(&lists.simple),
            multi_step: normalize(&lists.multi_step),
            technical: normalize(&lists.technical),
            creative: normalize(&lists.creative),
            imperative: normalize(&lists.imperative),
            constraint: normalize(&lists.constraint),
            output_format: normalize(&lists.output_format),
        }
    }

    /// Number of reasoning markers present in already-lowercased text
    pub fn reasoning_matches(&self, lower: &str) -> usize {
        count_matches(lower, &self.reasoning)
    }
}

fn normalize(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Weighted contribution of each signal for one prompt
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalScores {
    pub reasoning: f64,
    pub code: f64,
    /// Subtracted from the total
    pub simple: f64,
    pub multi_step: f64,
    pub technical: f64,
    pub creative: f64,
    pub imperative: f64,
    /// Negative for short prompts, positive for long ones
    pub token: f64,
    pub question: f64,
    pub constraint: f64,
    pub output_format: f64,
    /// `ceil(chars / 4)`
    pub estimated_tokens: usize,
}

impl SignalScores {
    /// Signed total; the simple-indicator score pulls it down
    pub fn total(&self) -> f64 {
        self.reasoning
            + self.code
            + self.multi_step
            + self.technical
            + self.creative
            + self.imperative
            + self.token
            + self.question
            + self.constraint
            + self.output_format
            - self.simple
    }
}

/// Score a prompt against every signal
#[allow(clippy::cast_precision_loss)]
pub fn score_prompt(
    text: &str,
    keywords: &KeywordSets,
    weights: &SignalWeights,
    thresholds: &RoutingThresholds,
) -> SignalScores {
    let lower = text.to_lowercase();
    let weighted = |list: &[String], weight: f64| count_matches(&lower, list) as f64 * weight;

    let estimated_tokens = estimate_tokens(text);
    let token = if estimated_tokens < thresholds.short_prompt_tokens {
        -weights.token_count
    } else if estimated_tokens > thresholds.long_prompt_tokens {
        weights.token_count
    } else {
        0.0
    };

    let question_marks = text.matches('?').count();
    let question = if question_marks > 1 { weights.question } else { 0.0 };

    SignalScores {
        reasoning: weighted(&keywords.reasoning, weights.reasoning),
        code: weighted(&keywords.code, weights.code),
        simple: weighted(&keywords.simple, weights.simple),
        multi_step: weighted(&keywords.multi_step, weights.multi_step),
        technical: weighted(&keywords.technical, weights.technical),
        creative: weighted(&keywords.creative, weights.creative),
        imperative: weighted(&keywords.imperative, weights.imperative),
        token,
        question,
        constraint: weighted(&keywords.constraint, weights.constraint),
        output_format: weighted(&keywords.output_format, weights.output_format),
        estimated_tokens,
    }
}

/// Count list entries contained in the text
///
/// Each entry counts once regardless of how often it appears.
pub fn count_matches(lower: &str, keywords: &[String]) -> usize {
    keywords.iter().filter(|k| lower.contains(k.as_str())).count()
}

/// Estimate token count as `ceil(chars / 4)`
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Logistic function mapping the signed score onto `(0, 1)`
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
