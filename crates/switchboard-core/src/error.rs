use thiserror::Error;

/// Errors raised when parsing domain identifiers from user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Provider name is not one of the known vendors
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// Tier name is not one of SIMPLE, MEDIUM, COMPLEX or REASONING
    #[error("unknown tier: {0}")]
    UnknownTier(String),
}
