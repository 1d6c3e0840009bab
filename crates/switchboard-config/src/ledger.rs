use std::path::PathBuf;

use serde::Deserialize;

/// Directory under the user's home holding the ledger file
const LEDGER_DIR: &str = ".switchboard";

/// Ledger file name
const LEDGER_FILE: &str = "ledger.json";

/// Cost ledger configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Whether completed requests are accounted at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Ledger file location, `~/.switchboard/ledger.json` when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: None,
        }
    }
}

const fn default_enabled() -> bool {
    true
}

impl LedgerConfig {
    /// Resolve the ledger file path
    ///
    /// Returns `None` only when no path is configured and the home
    /// directory cannot be determined.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(LEDGER_DIR).join(LEDGER_FILE)))
    }
}
