//! Configuration for the ignis CLI.
//!
//! Loads config from:
//! 1. Global: ~/.config/ignis/config.toml
//! 2. Per-project: .ignis/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [paths]
//! post_types = "schemas/post-types"
//! taxonomies = "schemas/taxonomies"
//! typescript_output = "web/src/types"
//!
//! [typescript]
//! index = true
//!
//! [log]
//! level = "info"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_POST_TYPES_DIR: &str = "schemas/post-types";
pub const DEFAULT_TAXONOMIES_DIR: &str = "schemas/taxonomies";
pub const DEFAULT_TYPESCRIPT_OUTPUT: &str = "typescript";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Where schemas are read from and generated files are written to.
///
/// Relative paths are resolved against the project root.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub post_types: Option<PathBuf>,
    pub taxonomies: Option<PathBuf>,
    pub typescript_output: Option<PathBuf>,
}

impl PathsConfig {
    pub fn post_types(&self) -> PathBuf {
        self.post_types
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_POST_TYPES_DIR))
    }

    pub fn taxonomies(&self) -> PathBuf {
        self.taxonomies
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TAXONOMIES_DIR))
    }

    pub fn typescript_output(&self) -> PathBuf {
        self.typescript_output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TYPESCRIPT_OUTPUT))
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TypeScriptConfig {
    /// Write `index.ts` alongside the units on `export-all`.
    pub index: Option<bool>,
}

impl TypeScriptConfig {
    pub fn index(&self) -> bool {
        self.index.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub level: Option<String>,
}

impl LogConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct IgnisConfig {
    pub paths: PathsConfig,
    pub typescript: TypeScriptConfig,
    pub log: LogConfig,
}

impl IgnisConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/ignis/config.toml,
    /// then merges with per-project config from .ignis/config.toml.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = Self::global_config_path().and_then(|p| Self::load_file(&p)) {
            config = config.merge(global);
        }

        let project_path = root.join(".ignis").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("ignis").join("config.toml"))
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                // Logging is configured from this file, so report directly.
                eprintln!("warning: ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge another config into this one. Keys set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            paths: PathsConfig {
                post_types: other.paths.post_types.or(self.paths.post_types),
                taxonomies: other.paths.taxonomies.or(self.paths.taxonomies),
                typescript_output: other
                    .paths
                    .typescript_output
                    .or(self.paths.typescript_output),
            },
            typescript: TypeScriptConfig {
                index: other.typescript.index.or(self.typescript.index),
            },
            log: LogConfig {
                level: other.log.level.or(self.log.level),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_project_config(dir: &TempDir, content: &str) {
        let ignis_dir = dir.path().join(".ignis");
        std::fs::create_dir_all(&ignis_dir).unwrap();
        let mut file = std::fs::File::create(ignis_dir.join("config.toml")).unwrap();
        writeln!(file, "{}", content).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = IgnisConfig::default();
        assert_eq!(config.paths.post_types(), PathBuf::from("schemas/post-types"));
        assert_eq!(config.paths.taxonomies(), PathBuf::from("schemas/taxonomies"));
        assert_eq!(config.paths.typescript_output(), PathBuf::from("typescript"));
        assert!(config.typescript.index());
        assert_eq!(config.log.level(), "warn");
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        write_project_config(
            &dir,
            r#"
[paths]
post_types = "content/types"

[typescript]
index = false
"#,
        );

        let config = IgnisConfig::load(dir.path());
        assert_eq!(config.paths.post_types(), PathBuf::from("content/types"));
        assert_eq!(config.paths.taxonomies(), PathBuf::from("schemas/taxonomies"));
        assert!(!config.typescript.index());
    }

    #[test]
    fn test_merge_keeps_unset_keys() {
        let global = IgnisConfig {
            paths: PathsConfig {
                typescript_output: Some("web/types".into()),
                ..Default::default()
            },
            log: LogConfig {
                level: Some("info".into()),
            },
            ..Default::default()
        };
        let project: IgnisConfig = toml::from_str("[log]\nlevel = \"debug\"\n").unwrap();

        let merged = IgnisConfig::default().merge(global).merge(project);
        assert_eq!(merged.paths.typescript_output(), PathBuf::from("web/types"));
        assert_eq!(merged.log.level(), "debug");
    }

    #[test]
    fn test_invalid_config_is_ignored() {
        let dir = TempDir::new().unwrap();
        write_project_config(&dir, "[paths\npost_types = 1");
        assert!(IgnisConfig::load_file(&dir.path().join(".ignis/config.toml")).is_none());
    }
}
