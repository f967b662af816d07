//! Local directory document source.

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use tracing::{debug, warn};

use super::{DocumentRef, DocumentSource};
use crate::error::FacturasError;
use crate::Result;

/// Lists files with the configured extensions in one directory (not
/// recursive). The file name is the document id.
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl LocalDirectory {
    pub fn new(dir: impl Into<PathBuf>, extensions: &[String]) -> Self {
        Self {
            dir: dir.into(),
            extensions: extensions.iter().map(|e| e.trim_start_matches('.').to_lowercase()).collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn accepts(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}

impl DocumentSource for LocalDirectory {
    fn list(&self) -> Result<Vec<DocumentRef>> {
        if !self.dir.is_dir() {
            return Err(FacturasError::Source(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }

        let pattern = format!("{}/*", Pattern::escape(&self.dir.to_string_lossy()));
        let entries = glob(&pattern).map_err(|e| FacturasError::Source(e.to_string()))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|p| p.is_file() && self.accepts(p))
            .collect();
        paths.sort();

        let docs: Vec<DocumentRef> = paths
            .into_iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_string_lossy().to_string();
                Some(DocumentRef {
                    id: name.clone(),
                    name,
                    path,
                })
            })
            .collect();

        debug!("Found {} documents in {}", docs.len(), self.dir.display());
        Ok(docs)
    }
}
