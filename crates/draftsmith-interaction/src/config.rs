//! Configuration file management for Draftsmith secrets.
//!
//! Supports reading secrets from `~/.config/draftsmith/secret.json`, with a
//! `GEMINI_API_KEY` environment override for ad-hoc runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use draftsmith_core::{DraftError, Result};

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// Loads the secret configuration from the default location,
    /// `~/.config/draftsmith/secret.json`.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&default_secret_path()?)
    }

    /// Loads the secret configuration from an explicit path.
    ///
    /// A missing file is fine when `GEMINI_API_KEY` is set, so this returns
    /// an empty config rather than an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DraftError::config(format!(
                "Failed to read secret file at {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            DraftError::config(format!(
                "Failed to parse secret file at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Resolves the Gemini API key.
    ///
    /// The `GEMINI_API_KEY` environment variable wins over the file. The key
    /// itself is never logged.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.gemini
            .as_ref()
            .map(|g| g.api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                DraftError::config(format!(
                    "No Gemini API key found. Set {} or add it to secret.json",
                    API_KEY_ENV
                ))
            })
    }

    /// The model name from secret.json, if configured.
    pub fn model_name(&self) -> Option<&str> {
        self.gemini.as_ref().and_then(|g| g.model_name.as_deref())
    }
}

/// Returns the default secret file path: ~/.config/draftsmith/secret.json
pub fn default_secret_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DraftError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("draftsmith").join("secret.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SecretConfig::load_from_path(&dir.path().join("secret.json")).unwrap();
        assert!(config.gemini.is_none());
    }

    #[test]
    fn test_load_gemini_section() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"gemini": {{"api_key": "k-123", "model_name": "gemini-2.5-pro"}}}}"#
        )
        .unwrap();

        let config = SecretConfig::load_from_path(file.path()).unwrap();
        let gemini = config.gemini.as_ref().unwrap();
        assert_eq!(gemini.api_key, "k-123");
        assert_eq!(config.model_name(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn test_malformed_secret_is_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = SecretConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.is_config());
    }
}
