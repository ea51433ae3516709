//! Configuration loading and management
//!
//! Handles parsing of `.tm.toml` configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Actor configuration
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Actor-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Default actor name when none specified
    #[serde(default = "default_actor")]
    pub default: String,
}

fn default_actor() -> String {
    "unknown".to_string()
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            default: default_actor(),
        }
    }
}

impl Config {
    /// Load configuration from the given file, falling back to defaults
    /// when the file is absent
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the given file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the acting identity: explicit value wins, then the
    /// configured default
    pub fn resolve_actor(&self, explicit: Option<&str>) -> String {
        match explicit {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => self.actor.default.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = Config::load(&dir.path().join(".tm.toml")).expect("load");
        assert_eq!(config.actor.default, "unknown");
    }

    #[test]
    fn save_and_reload() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(".tm.toml");
        let mut config = Config::default();
        config.actor.default = "alice".to_string();
        config.save(&path).expect("save");
        let loaded = Config::load(&path).expect("load");
        assert_eq!(loaded.actor.default, "alice");
    }

    #[test]
    fn parses_partial_config() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(".tm.toml");
        std::fs::write(&path, "[actor]\ndefault = \"bob\"\n").expect("write");
        let config = Config::load(&path).expect("load");
        assert_eq!(config.actor.default, "bob");
    }

    #[test]
    fn resolve_actor_prefers_explicit() {
        let config = Config::default();
        assert_eq!(config.resolve_actor(Some("carol")), "carol");
        assert_eq!(config.resolve_actor(Some("  ")), "unknown");
        assert_eq!(config.resolve_actor(None), "unknown");
    }
}
