//! JSON file backed session store.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::SessionStore;
use crate::error::StoreError;
use crate::session::Session;

/// Stores every session as one JSON array in a single file
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

    /// Sibling file the new collection is written to before the rename
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("saves"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Replace whatever is on disk with an empty collection
    fn reset(&self) -> Result<Vec<Session>, StoreError> {
        self.save_all(&[])?;
        Ok(Vec::new())
    }
}

impl SessionStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<Session>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No save file at {}, creating one", self.path.display());
                return self.reset();
            }
            Err(e) => return Err(e.into()),
        };

        // Only the outer container self-heals; bad records are data errors.
        let records: Vec<Value> = match serde_json::from_str(&json) {
            Ok(records) => records,
            Err(e) => {
                log::warn!(
                    "Save file {} is unreadable ({}); starting with no saved games",
                    self.path.display(),
                    e
                );
                return self.reset();
            }
        };

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value(record)
                    .map_err(|source| StoreError::CorruptRecord { index, source })
            })
            .collect()
    }

    fn save_all(&self, sessions: &[Session]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(sessions).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!(
            "Saved {} game(s) to {}",
            sessions.len(),
            self.path.display()
        );
        Ok(())
    }
}
