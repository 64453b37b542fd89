//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::import::DuplicateStrategy;

/// FixIt configuration, merged from defaults, global config, project
/// config, and environment variables (later layers win).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default duplicate-handling policy for imports
    pub duplicates: Option<DuplicateStrategy>,

    /// Default output format ("auto", "json", "csv")
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration for a project, merging in priority order
    pub fn load(project_root: Option<&Path>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/fixit/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            config.merge_file(&global_path);
        }

        // 3. Project config (.fixit/config.yaml)
        if let Some(root) = project_root {
            config.merge_file(&root.join(".fixit/config.yaml"));
        }

        // 4. Environment variables
        if let Ok(raw) = std::env::var("FIXIT_DUPLICATES") {
            if let Some(strategy) = parse_strategy(&raw) {
                config.duplicates = Some(strategy);
            }
        }
        if let Ok(format) = std::env::var("FIXIT_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    /// Effective duplicate strategy
    pub fn duplicate_strategy(&self) -> DuplicateStrategy {
        self.duplicates.unwrap_or_default()
    }

    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fixit")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        if let Ok(contents) = std::fs::read_to_string(path) {
            if let Ok(other) = serde_yml::from_str::<Config>(&contents) {
                self.merge(other);
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.duplicates.is_some() {
            self.duplicates = other.duplicates;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }
}

fn parse_strategy(raw: &str) -> Option<DuplicateStrategy> {
    match raw.to_lowercase().as_str() {
        "skip" => Some(DuplicateStrategy::Skip),
        "update" => Some(DuplicateStrategy::Update),
        "error" => Some(DuplicateStrategy::Error),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn project_config_overrides_default() {
        let tmp = TempDir::new().unwrap();
        let fixit = tmp.path().join(".fixit");
        std::fs::create_dir_all(&fixit).unwrap();
        std::fs::write(fixit.join("config.yaml"), "duplicates: update\n").unwrap();

        let config = Config::load(Some(tmp.path()));
        assert_eq!(config.duplicate_strategy(), DuplicateStrategy::Update);
    }

    #[test]
    fn defaults_to_skip() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(Some(tmp.path()));
        assert_eq!(config.duplicate_strategy(), DuplicateStrategy::Skip);
    }
}
