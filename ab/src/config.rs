//! Configuration for addressbook

use eyre::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the contact file
    pub database: PathBuf,

    /// Keep line-editor history for the interactive session
    pub history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(crate::DEFAULT_DATABASE),
            history: true,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local: ./addressbook.yml
        // User: ~/.config/addressbook/addressbook.yml
        let candidates = [
            Some(PathBuf::from("addressbook.yml")),
            dirs::config_dir().map(|p| p.join("addressbook").join("addressbook.yml")),
        ];

        for path in candidates.iter().flatten() {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => warn!("Failed to load config from {}: {}", path.display(), e),
                }
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
