// snapshot.rs — SnapshotStore: full-document persistence for goal state.
//
// The whole store is one JSON document keyed by user identifier:
// `{ "<user>": { "goals": [{name, target, saved, created_at}], "last_goal" } }`.
// It is read wholesale at startup and overwritten wholesale after every
// mutation. The in-memory store is the source of truth; a crash before a
// flush loses at most the most recent mutation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::goal::UserState;

/// File-backed snapshot of every user's goal state.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a snapshot store backed by the given file path.
    /// The file does not need to exist yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full snapshot. A missing file is an empty store, not an error.
    pub fn load(&self) -> Result<HashMap<String, UserState>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let json = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let users = serde_json::from_str(&json)?;
        Ok(users)
    }

    /// Overwrite the snapshot with the given state.
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, users: &HashMap<String, UserState>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(users)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
