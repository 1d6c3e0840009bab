//! Complexity router signal tables
//!
//! Keyword lists, weights and thresholds are plain configuration data so
//! they can be tuned from TOML or swapped out in tests without touching
//! the scoring code.

use serde::Deserialize;
use switchboard_core::Tier;

const REASONING_KEYWORDS: &[&str] = &[
    "prove",
    "theorem",
    "proof",
    "step by step",
    "reasoning",
    "derive",
    "demonstrate",
    "verify",
    "validate",
    "formal",
    "mathematical induction",
    "contradiction",
    "lemma",
];

const CODE_KEYWORDS: &[&str] = &[
    "function",
    "class",
    "async",
    "await",
    "import",
    "export",
    "const",
    "let",
    "var",
    "return",
    "```",
    "component",
    "method",
    "algorithm",
    "implementation",
    "react",
    "typescript",
    "javascript",
    "python",
];

const SIMPLE_KEYWORDS: &[&str] = &[
    "what is",
    "define",
    "translate",
    "summarize",
    "list",
    "who is",
    "when did",
    "where is",
    "how many",
];

const MULTI_STEP_KEYWORDS: &[&str] = &[
    "first",
    "then",
    "next",
    "finally",
    "step 1",
    "step 2",
    "process",
    "workflow",
    "procedure",
    "sequence",
];

const TECHNICAL_KEYWORDS: &[&str] = &[
    "algorithm",
    "kubernetes",
    "distributed",
    "architecture",
    "optimization",
    "performance",
    "scalability",
    "latency",
    "database",
    "api",
    "microservices",
    "blockchain",
    "integration",
    "state management",
];

const CREATIVE_KEYWORDS: &[&str] = &[
    "story",
    "poem",
    "creative",
    "imagine",
    "brainstorm",
    "ideas",
    "innovative",
    "unique",
    "original",
];

const IMPERATIVE_KEYWORDS: &[&str] = &[
    "build",
    "create",
    "implement",
    "develop",
    "design",
    "refactor",
    "optimize",
    "debug",
    "fix",
    "improve",
];

const CONSTRAINT_KEYWORDS: &[&str] = &["at most", "at least", "maximum", "minimum", "o(n)", "big o"];

const OUTPUT_FORMAT_KEYWORDS: &[&str] = &["json", "yaml", "xml", "csv", "schema", "format"];

/// Complexity router configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Tier used when the score is ambiguous
    #[serde(default = "default_tier")]
    pub default_tier: Tier,
    /// Per-signal weights
    #[serde(default)]
    pub weights: SignalWeights,
    /// Keyword lists matched against the last message
    #[serde(default)]
    pub keywords: KeywordLists,
    /// Decision thresholds
    #[serde(default)]
    pub thresholds: RoutingThresholds,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_tier: default_tier(),
            weights: SignalWeights::default(),
            keywords: KeywordLists::default(),
            thresholds: RoutingThresholds::default(),
        }
    }
}

const fn default_tier() -> Tier {
    Tier::Medium
}

/// Weight applied to each signal's match count
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalWeights {
    pub reasoning: f64,
    pub code: f64,
    /// Subtracted from the total
    pub simple: f64,
    pub multi_step: f64,
    pub technical: f64,
    /// Added or subtracted depending on prompt length
    pub token_count: f64,
    pub creative: f64,
    /// Applied once when the prompt asks more than one question
    pub question: f64,
    pub constraint: f64,
    pub imperative: f64,
    pub output_format: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            reasoning: 0.18,
            code: 0.15,
            simple: 0.12,
            multi_step: 0.12,
            technical: 0.10,
            token_count: 0.08,
            creative: 0.05,
            question: 0.05,
            constraint: 0.04,
            imperative: 0.03,
            output_format: 0.03,
        }
    }
}

impl SignalWeights {
    /// All weights paired with their config key, for validation
    pub fn entries(&self) -> [(&'static str, f64); 11] {
        [
            ("reasoning", self.reasoning),
            ("code", self.code),
            ("simple", self.simple),
            ("multi_step", self.multi_step),
            ("technical", self.technical),
            ("token_count", self.token_count),
            ("creative", self.creative),
            ("question", self.question),
            ("constraint", self.constraint),
            ("imperative", self.imperative),
            ("output_format", self.output_format),
        ]
    }
}

/// Keyword lists for each lexical signal
///
/// Matching is case-insensitive substring search; each entry counts at
/// most once per prompt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordLists {
    pub reasoning: Vec<String>,
    pub code: Vec<String>,
    pub simple: Vec<String>,
    pub multi_step: Vec<String>,
    pub technical: Vec<String>,
    pub creative: Vec<String>,
    pub imperative: Vec<String>,
    pub constraint: Vec<String>,
    pub output_format: Vec<String>,
}

impl Default for KeywordLists {
    fn default() -> Self {
        Self {
            reasoning: owned(REASONING_KEYWORDS),
            code: owned(CODE_KEYWORDS),
            simple: owned(SIMPLE_KEYWORDS),
            multi_step: owned(MULTI_STEP_KEYWORDS),
            technical: owned(TECHNICAL_KEYWORDS),
            creative: owned(CREATIVE_KEYWORDS),
            imperative: owned(IMPERATIVE_KEYWORDS),
            constraint: owned(CONSTRAINT_KEYWORDS),
            output_format: owned(OUTPUT_FORMAT_KEYWORDS),
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_owned()).collect()
}

/// Fixed cut-offs used by the tier decision
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingThresholds {
    /// Score above which a prompt is COMPLEX
    pub complex: f64,
    /// Score above which a prompt is MEDIUM
    pub medium: f64,
    /// Prompts estimated below this many tokens pull toward SIMPLE
    pub short_prompt_tokens: usize,
    /// Prompts estimated above this many tokens pull toward COMPLEX
    pub long_prompt_tokens: usize,
    /// Reasoning-marker matches that trigger the REASONING shortcut
    pub rule_min_matches: usize,
    /// Confidence reported by the shortcut
    pub rule_confidence: f64,
    /// Confidence above which a scored decision is tagged `heuristics`
    pub heuristics_confidence: f64,
    /// Multiplier applied to the score before the sigmoid
    pub sigmoid_scale: f64,
}

impl Default for RoutingThresholds {
    fn default() -> Self {
        Self {
            complex: 0.3,
            medium: 0.15,
            short_prompt_tokens: 50,
            long_prompt_tokens: 500,
            rule_min_matches: 2,
            rule_confidence: 0.97,
            heuristics_confidence: 0.8,
            sigmoid_scale: 2.0,
        }
    }
}

impl RoutingConfig {
    /// Validate weights and thresholds
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent setting
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, weight) in self.weights.entries() {
            if !weight.is_finite() || weight < 0.0 {
                anyhow::bail!("routing.weights.{name} must be a finite, non-negative number (got {weight})");
            }
        }

        let t = &self.thresholds;

        if t.complex <= t.medium {
            anyhow::bail!(
                "routing.thresholds.complex ({}) must be greater than routing.thresholds.medium ({})",
                t.complex,
                t.medium
            );
        }

        if t.short_prompt_tokens > t.long_prompt_tokens {
            anyhow::bail!("routing.thresholds.short_prompt_tokens must not exceed long_prompt_tokens");
        }

        if t.rule_min_matches == 0 {
            anyhow::bail!("routing.thresholds.rule_min_matches must be at least 1");
        }

        for (name, value) in [
            ("rule_confidence", t.rule_confidence),
            ("heuristics_confidence", t.heuristics_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("routing.thresholds.{name} must be within [0, 1] (got {value})");
            }
        }

        if !t.sigmoid_scale.is_finite() || t.sigmoid_scale <= 0.0 {
            anyhow::bail!("routing.thresholds.sigmoid_scale must be positive");
        }

        if self.keywords.reasoning.iter().all(|k| k.trim().is_empty()) {
            anyhow::bail!("routing.keywords.reasoning must contain at least one keyword");
        }

        Ok(())
    }
}
