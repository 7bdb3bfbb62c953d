//! Application configuration loaded from `config.toml`.
//!
//! Configuration is optional. A missing file yields the defaults, so the
//! tool works out of the box with only an API key.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::settings::GenerationSettings;
use crate::structure::{StructureCatalog, StructureTemplate};

/// A user-defined structure template entry.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct StructureConfig {
    pub name: String,
    /// Display label, defaults to the name when omitted
    #[serde(default)]
    pub label: Option<String>,
    pub instruction: String,
}

impl StructureConfig {
    fn into_template(self) -> StructureTemplate {
        let label = self.label.unwrap_or_else(|| self.name.clone());
        StructureTemplate::new(self.name, label, self.instruction)
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ConfigRoot {
    /// Default generation settings
    #[serde(default)]
    pub generation: GenerationSettings,
    /// User-defined structure templates
    #[serde(rename = "structure", default)]
    pub structures: Vec<StructureConfig>,
}

impl ConfigRoot {
    /// Loads configuration from `path`.
    ///
    /// A missing file is not an error: defaults are returned so a fresh
    /// install needs no configuration at all.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Builds the structure catalog: built-ins plus user templates.
    ///
    /// User entries sharing a built-in name replace that built-in.
    pub fn catalog(&self) -> StructureCatalog {
        let mut catalog = StructureCatalog::with_builtins();
        for entry in self.structures.clone() {
            catalog.upsert(entry.into_template());
        }
        catalog
    }

    /// The configured generation settings, with the word count clamped to
    /// the supported range.
    pub fn settings(&self) -> GenerationSettings {
        let mut settings = self.generation.clone();
        settings.set_word_count(settings.word_count);
        settings
    }
}
