//! Snapshot persistence for the aggregate store.
//!
//! Snapshots are pretty-printed JSON, one object per category in
//! category-sorted order, written to a sibling temp file and renamed into
//! place so a reader never observes a partially written file and a failed
//! write never corrupts the previous snapshot.

use crate::aggregate::{AggregateRecord, AggregateStore};
use crate::error::SnapshotError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes aggregate snapshots to a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    /// Create a writer targeting `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot's target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize every record and atomically replace the snapshot file.
    pub fn save(&self, store: &AggregateStore) -> std::result::Result<(), SnapshotError> {
        let records: Vec<&AggregateRecord> = store.records().collect();
        let json = serde_json::to_vec_pretty(&records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SnapshotError::Write {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &json).map_err(|source| SnapshotError::Write {
            path: tmp.display().to_string(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| SnapshotError::Write {
            path: self.path.display().to_string(),
            source,
        })?;

        debug!(path = %self.path.display(), records = records.len(), "snapshot written");
        Ok(())
    }

    /// Read a snapshot back into records.
    pub fn load(path: &Path) -> std::result::Result<Vec<AggregateRecord>, SnapshotError> {
        let contents = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}
