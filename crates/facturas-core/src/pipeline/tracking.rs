//! JSON file tracking of processed document ids.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::TrackingStore;
use crate::error::TrackingError;
use crate::Result;

/// On-disk layout of the tracking file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingFile {
    /// Processed ids, sorted.
    pub processed: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Either the current layout or a bare array of ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredIds {
    Current(TrackingFile),
    Legacy(Vec<String>),
}

/// Tracking store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonTrackingStore {
    path: PathBuf,
}

impl JsonTrackingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrackingStore for JsonTrackingStore {
    fn load(&self) -> HashSet<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No tracking file at {}", self.path.display());
                return HashSet::new();
            }
            Err(e) => {
                warn!("Cannot read tracking file {}: {}", self.path.display(), e);
                return HashSet::new();
            }
        };

        match serde_json::from_str::<StoredIds>(&content) {
            Ok(StoredIds::Current(file)) => file.processed.into_iter().collect(),
            Ok(StoredIds::Legacy(ids)) => ids.into_iter().collect(),
            Err(e) => {
                warn!(
                    "Ignoring malformed tracking file {}: {}",
                    self.path.display(),
                    e
                );
                HashSet::new()
            }
        }
    }

    fn save(&self, ids: &HashSet<String>) -> Result<()> {
        let mut processed: Vec<String> = ids.iter().cloned().collect();
        processed.sort();

        let file = TrackingFile {
            processed,
            updated_at: Some(Utc::now()),
        };
        let content = serde_json::to_string_pretty(&file).map_err(TrackingError::from)?;

        let write_error = |source| TrackingError::Write {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&self.path, content).map_err(write_error)?;

        debug!("Saved {} processed ids to {}", ids.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTrackingStore::new(dir.path().join("ids.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTrackingStore::new(dir.path().join("nested/ids.json"));

        store.save(&ids(&["b.pdf", "a.pdf"])).unwrap();
        assert_eq!(store.load(), ids(&["a.pdf", "b.pdf"]));

        let raw: TrackingFile =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw.processed, vec!["a.pdf", "b.pdf"]);
        assert!(raw.updated_at.is_some());
    }

    #[test]
    fn test_legacy_array_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.json");
        fs::write(&path, r#"["x.pdf", "y.pdf"]"#).unwrap();

        assert_eq!(JsonTrackingStore::new(&path).load(), ids(&["x.pdf", "y.pdf"]));
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.json");

        for content in ["{not json", r#"{"processed": 3}"#, "42"] {
            fs::write(&path, content).unwrap();
            assert!(JsonTrackingStore::new(&path).load().is_empty());
        }
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let store = JsonTrackingStore::new(blocker.join("ids.json"));
        let result = store.save(&ids(&["a.pdf"]));
        assert!(matches!(
            result,
            Err(crate::FacturasError::Tracking(TrackingError::Write { .. }))
        ));
    }
}
