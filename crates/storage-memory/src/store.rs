use log::{debug, info};
use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use ledger_core::Result;

use crate::errors::StorageError;
use crate::snapshot::LedgerSnapshot;

/// Shared in-memory ledger state. Repositories hold it behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<LedgerSnapshot>,
}

impl MemoryStore {
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Loads a snapshot file. A missing file yields an empty ledger.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No snapshot at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(StorageError::from)?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&raw).map_err(StorageError::from)?;
        debug!(
            "Loaded snapshot from {}: {} currencies, {} budgets",
            path.display(),
            snapshot.currencies.len(),
            snapshot.budgets.len()
        );
        Ok(Self::new(snapshot))
    }

    /// Writes the snapshot next to `path` and renames it into place.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let json = {
            let snapshot = self.read()?;
            serde_json::to_string_pretty(&*snapshot).map_err(StorageError::from)?
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(StorageError::from)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(StorageError::from)?;
        fs::rename(&tmp_path, path).map_err(StorageError::from)?;
        debug!("Persisted snapshot to {}", path.display());
        Ok(())
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, LedgerSnapshot>> {
        self.snapshot
            .read()
            .map_err(|_| StorageError::LockPoisoned.into())
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerSnapshot>> {
        self.snapshot
            .write()
            .map_err(|_| StorageError::LockPoisoned.into())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Result<LedgerSnapshot> {
        Ok(self.read()?.clone())
    }
}
