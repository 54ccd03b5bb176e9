//! Lineup persistence contract.
//!
//! The editor only needs save/load/clear of a snapshot. Where it lives is up
//! to the host.

use crate::error::Result;
use crate::models::LineupSnapshot;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait LineupStore {
    fn save(&mut self, snapshot: &LineupSnapshot) -> Result<()>;
    fn load(&self) -> Result<Option<LineupSnapshot>>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Option<LineupSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineupStore for MemoryStore {
    fn save(&mut self, snapshot: &LineupSnapshot) -> Result<()> {
        self.saved = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<LineupSnapshot>> {
        Ok(self.saved.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.saved = None;
        Ok(())
    }
}

/// Snapshot stored as pretty JSON in a single file. A missing file loads as `None`.
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

impl LineupStore for JsonFileStore {
    fn save(&mut self, snapshot: &LineupSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)?;
        log::debug!("Saved lineup to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<LineupSnapshot>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Formation, LineupState};

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        let snapshot = LineupState::from_formation(Formation::F132).snapshot();
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_json_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("lineup.json"));
        assert!(store.load().unwrap().is_none());

        let snapshot = LineupState::from_formation(Formation::F1311).snapshot();
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineup.json");
        fs::write(&path, "{").unwrap();
        let store = JsonFileStore::new(path);
        assert!(matches!(store.load(), Err(crate::error::LineupError::Parse(_))));
    }
}
