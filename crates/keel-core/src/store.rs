//! Persistence provider: a single key-value slot
//!
//! The snapshot is one JSON document, overwritten whole on every store.
//! Reads are forgiving: an absent, unreadable, or corrupt slot is treated
//! as "no prior session" rather than an error.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Snapshot;

/// The single-slot snapshot store the view session writes through.
///
/// Injectable so tests can substitute [`MemoryStore`].
pub trait SnapshotStore {
    /// Load the slot. `None` for absent or unreadable snapshots.
    fn load(&self) -> Option<Snapshot>;

    /// Overwrite the slot.
    fn store(&self, snapshot: &Snapshot) -> Result<()>;

    /// Remove the slot entirely. Idempotent.
    fn clear(&self) -> Result<()>;
}

/// JSON-file-backed store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform default: `<data_dir>/keel/snapshot.json`, falling back to
    /// the working directory when no data dir is known.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keel")
            .join("snapshot.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Option<Snapshot> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No snapshot to restore");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corrupt snapshot, starting fresh"
                );
                None
            }
        }
    }

    fn store(&self, snapshot: &Snapshot) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        // Write-then-rename so an interrupted write leaves the prior
        // snapshot intact.
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(serde_json::to_string_pretty(snapshot)?.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Persistence(format!("persist {}: {}", self.path.display(), e)))?;

        debug!(path = %self.path.display(), "Snapshot stored");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests. Clones share the slot, so a test can hold
/// one handle and hand another to the session.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Snapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        self.slot.lock().expect("store lock").clone()
    }

    fn store(&self, snapshot: &Snapshot) -> Result<()> {
        *self.slot.lock().expect("store lock") = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().expect("store lock") = None;
        Ok(())
    }
}
