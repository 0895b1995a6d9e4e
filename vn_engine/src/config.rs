//! Engine configuration.
//!
//! Settings come from an optional TOML file and can be overridden by
//! environment variables:
//! - `VN_WIDTH` - Text column width (default: 100)
//! - `VN_PADDING` - Vertical margin in rows (default: 2)
//! - `VN_SAVE_FILE` - Path of the JSON save file (default: `save.json`)
//! - `VN_CONTINUE_HINT` - Text shown while waiting for Enter (default: empty)

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Engine settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Column width text is wrapped and centered in.
    pub width: usize,

    /// Blank rows around banners and below bottom text.
    pub padding: usize,

    /// Where player choices and progress are saved.
    pub save_file: PathBuf,

    /// Shown while waiting for the player to press Enter.
    pub continue_hint: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 100,
            padding: 2,
            save_file: PathBuf::from("save.json"),
            continue_hint: String::new(),
        }
    }
}

impl EngineConfig {
    /// Parse config from TOML text. Missing fields keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from `path` if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from process environment variables.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(width) = lookup("VN_WIDTH").and_then(|v| v.parse::<usize>().ok()) {
            self.width = width.max(1);
        }
        if let Some(padding) = lookup("VN_PADDING").and_then(|v| v.parse::<usize>().ok()) {
            self.padding = padding;
        }
        if let Some(path) = lookup("VN_SAVE_FILE").filter(|v| !v.is_empty()) {
            self.save_file = PathBuf::from(path);
        }
        if let Some(hint) = lookup("VN_CONTINUE_HINT") {
            self.continue_hint = hint;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.width, 100);
        assert_eq!(config.padding, 2);
        assert_eq!(config.save_file, PathBuf::from("save.json"));
        assert!(config.continue_hint.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config =
            EngineConfig::from_toml("width = 80\nsave_file = \"saves/dragoon.json\"").unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.padding, 2);
        assert_eq!(config.save_file, PathBuf::from("saves/dragoon.json"));
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dragoon.toml");

        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(
            EngineConfig::load_or_default(&path).unwrap(),
            EngineConfig::default()
        );

        std::fs::write(&path, "width = \"wide\"").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::default().with_overrides(|key| match key {
            "VN_WIDTH" => Some("0".to_string()),
            "VN_PADDING" => Some("nope".to_string()),
            "VN_SAVE_FILE" => Some("other.json".to_string()),
            "VN_CONTINUE_HINT" => Some("(press Enter)".to_string()),
            _ => None,
        });

        assert_eq!(config.width, 1);
        assert_eq!(config.padding, 2);
        assert_eq!(config.save_file, PathBuf::from("other.json"));
        assert_eq!(config.continue_hint, "(press Enter)");
    }
}
