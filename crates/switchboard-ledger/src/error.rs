/// Errors returned by the cost ledger
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Reading or writing the ledger file failed
    #[error("ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Ledger contents could not be encoded or decoded
    #[error("ledger serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Usage report carried values that cannot be accounted
    #[error("invalid usage: {0}")]
    InvalidUsage(String),
}
