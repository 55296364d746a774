//! Configuration Management
//!
//! Handles persistent settings storage for cbntool.

use crate::chronicle::client::resolve_base_url;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Setting keys accepted by `cbntool config set`
pub const SETTING_KEYS: &[&str] = &[
    "service_account_file_path",
    "region",
    "author",
    "api_base_url",
    "access_token",
];

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Path to the service account JSON key
    #[serde(default)]
    pub service_account_file_path: Option<PathBuf>,
    /// EUROPE, ASIA, or anything else for the default region
    #[serde(default)]
    pub region: Option<String>,
    /// Author recorded on newly created parsers
    #[serde(default)]
    pub author: Option<String>,
    /// Overrides the region's base URL
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Bearer token used instead of the service account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Config {
    /// Get the settings file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cbntool").join("config.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable settings file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Base URL for API calls (override > region)
    pub fn base_url(&self) -> String {
        match self.api_base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => resolve_base_url(self.region.as_deref()).to_string(),
        }
    }

    /// Author, treating an empty string as unset
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.trim().is_empty())
    }

    /// Update one setting by key. An empty value clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
        match key {
            "service_account_file_path" => self.service_account_file_path = value.map(PathBuf::from),
            "region" => self.region = value,
            "author" => self.author = value,
            "api_base_url" => self.api_base_url = value,
            "access_token" => self.access_token = value,
            other => anyhow::bail!(
                "Unknown setting '{}'. Expected one of: {}",
                other,
                SETTING_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the stored settings
    pub fn merge(mut self, overrides: Config) -> Self {
        if overrides.service_account_file_path.is_some() {
            self.service_account_file_path = overrides.service_account_file_path;
        }
        if overrides.region.is_some() {
            self.region = overrides.region;
        }
        if overrides.author.is_some() {
            self.author = overrides.author;
        }
        if overrides.api_base_url.is_some() {
            self.api_base_url = overrides.api_base_url;
        }
        if overrides.access_token.is_some() {
            self.access_token = overrides.access_token;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronicle::client::{ASIA_URL, DEFAULT_URL, EUROPE_URL};

    #[test]
    fn test_base_url_follows_region() {
        let mut config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_URL);

        config.region = Some("EUROPE".into());
        assert_eq!(config.base_url(), EUROPE_URL);

        config.region = Some("ASIA".into());
        assert_eq!(config.base_url(), ASIA_URL);
    }

    #[test]
    fn test_base_url_override_wins() {
        let config = Config {
            region: Some("EUROPE".into()),
            api_base_url: Some("http://127.0.0.1:9000/v1/".into()),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://127.0.0.1:9000/v1");
    }

    #[test]
    fn test_set_and_clear() {
        let mut config = Config::default();
        config.set("author", "jane").unwrap();
        assert_eq!(config.author(), Some("jane"));

        config.set("author", "").unwrap();
        assert_eq!(config.author(), None);

        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let stored = Config {
            author: Some("stored".into()),
            region: Some("ASIA".into()),
            ..Default::default()
        };
        let merged = stored.merge(Config {
            author: Some("cli".into()),
            ..Default::default()
        });
        assert_eq!(merged.author(), Some("cli"));
        assert_eq!(merged.region.as_deref(), Some("ASIA"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            service_account_file_path: Some(PathBuf::from("/keys/sa.json")),
            author: Some("jane".into()),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_load_missing_or_corrupt_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(Config::load_from(&path), Config::default());

        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
