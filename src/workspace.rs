//! Workspace and its open documents
//!
//! Local `.conf` and `.log` inputs are only ever chosen among the
//! workspace's open documents, never by scanning the filesystem.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    open_documents: Vec<PathBuf>,
}

impl Workspace {
    pub fn new(root: PathBuf, open_documents: Vec<PathBuf>) -> Self {
        Self {
            root,
            open_documents,
        }
    }

    /// Treat the regular files directly inside `root` as the open documents
    pub fn from_dir(root: PathBuf) -> std::io::Result<Self> {
        let mut open_documents: Vec<PathBuf> = std::fs::read_dir(&root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        open_documents.sort();

        Ok(Self::new(root, open_documents))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn open_documents(&self) -> &[PathBuf] {
        &self.open_documents
    }

    /// Open documents whose extension is exactly `ext`
    pub fn documents_with_extension(&self, ext: &str) -> Vec<String> {
        self.open_documents
            .iter()
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(ext))
            .map(|path| path.to_string_lossy().into_owned())
            .collect()
    }
}
