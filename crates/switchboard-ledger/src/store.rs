//! Durable storage for the ledger aggregate

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::LedgerError;
use crate::stats::CostStats;

/// Load/save boundary of the ledger
///
/// Saves always write the whole aggregate.
pub trait StatsStore: Send + Sync {
    /// Read the stored aggregate, `None` when nothing has been stored yet
    fn load(&self) -> Result<Option<CostStats>, LedgerError>;

    /// Replace the stored aggregate
    fn save(&self, stats: &CostStats) -> Result<(), LedgerError>;
}

/// Single JSON document on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsStore for JsonFileStore {
    fn load(&self) -> Result<Option<CostStats>, LedgerError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut stats: CostStats = serde_json::from_str(&raw)?;
        stats.normalize();
        Ok(Some(stats))
    }

    fn save(&self, stats: &CostStats) -> Result<(), LedgerError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Written next to the target so the rename stays on one filesystem
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, stats)?;
            writer.flush()?;
        }
        // Contents must reach the disk before the rename can expose them
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::trace!(path = %self.path.display(), "ledger saved");
        Ok(())
    }
}
