//! Snapshot persistence for the semantic index.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ragmail_core::{CorpusUnit, Error, Result, Vector};

/// One embedded corpus unit in the persisted index.
///
/// Created once at build time and read-only thereafter; a corpus change
/// means a wholesale rebuild, never an in-place update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: Uuid,
    pub vector: Vector,
    pub unit: CorpusUnit,
}

/// The persisted form of the index: embedding model identity plus all
/// entries in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub model: String,
    pub dimension: usize,
    pub entries: Vec<IndexEntry>,
}

impl IndexSnapshot {
    /// Write the snapshot, replacing any prior index at `path`.
    ///
    /// The snapshot is written to a temporary file in the same directory and
    /// renamed into place, so a reader never observes a half-written index.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp = path.with_extension("tmp");
        let json = serde_json::to_vec(self)?;
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Read a previously persisted snapshot.
    ///
    /// A missing file is the expected signal that the build step has never
    /// run and maps to [`Error::IndexNotFound`].
    pub fn read(path: &Path) -> Result<Self> {
        let raw = match std::fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::IndexNotFound(path.display().to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }
}
