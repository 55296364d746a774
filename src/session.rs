//! Per-workspace session state
//!
//! Tracks the configId of the most recently created parser and the last
//! displayed document, keyed by workspace directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// State remembered for one workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Id of the parser created last, empty when none
    #[serde(default)]
    pub config_id: String,
    /// URI of the last displayed virtual document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_document: Option<String>,
}

impl SessionState {
    pub fn current_config_id(&self) -> Option<&str> {
        Some(self.config_id.as_str()).filter(|id| !id.is_empty())
    }

    pub fn set_config_id(&mut self, id: &str) {
        self.config_id = id.to_string();
    }

    pub fn clear_config_id(&mut self) {
        self.config_id.clear();
    }
}

/// Session states of every known workspace, stored as one JSON file
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    workspaces: BTreeMap<String, SessionState>,
}

impl SessionStore {
    /// Default location of the state file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cbntool").join("workspaces.json"))
    }

    /// Open the store at its default location
    pub fn open() -> Self {
        match Self::default_path() {
            Some(path) => Self::open_at(path),
            None => Self::in_memory(),
        }
    }

    pub fn open_at(path: PathBuf) -> Self {
        let workspaces = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable session state {:?}: {}", path, e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self {
            path: Some(path),
            workspaces,
        }
    }

    /// A store that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            workspaces: BTreeMap::new(),
        }
    }

    pub fn get(&self, workspace: &Path) -> SessionState {
        self.workspaces
            .get(&workspace_key(workspace))
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the state of one workspace and persist the store
    pub fn put(&mut self, workspace: &Path, state: SessionState) -> Result<()> {
        self.workspaces.insert(workspace_key(workspace), state);
        self.save()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.workspaces)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write session state to {:?}", path))?;

        Ok(())
    }
}

fn workspace_key(workspace: &Path) -> String {
    workspace
        .canonicalize()
        .unwrap_or_else(|_| workspace.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
