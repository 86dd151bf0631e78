//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/exprtree/exprtree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `EXPRTREE_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{NegativeCheck, TraversalStrategy};

/// Unified configuration for exprtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Negative-number scan policy (default: unary)
    pub negative_check: NegativeCheck,
    /// Traversal implementation (default: recursive)
    pub traversal: TraversalStrategy,
    /// Separator for printed token and value sequences
    pub separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            negative_check: NegativeCheck::default(),
            traversal: TraversalStrategy::default(),
            separator: " ".into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub negative_check: Option<NegativeCheck>,
    pub traversal: Option<TraversalStrategy>,
    pub separator: Option<String>,
}

/// Get the XDG config directory for exprtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "exprtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("exprtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            negative_check: overlay.negative_check.unwrap_or(self.negative_check),
            traversal: overlay.traversal.unwrap_or(self.traversal),
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/exprtree/exprtree.toml` (skipped if missing)
    /// 3. Explicit config file
    /// 4. Environment variables: `EXPRTREE_*` prefix
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::ConfigNotFound(path.to_path_buf()));
            }
            debug!("load: config file {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current.apply_env_overrides(Environment::with_prefix("EXPRTREE"))
    }

    /// Load from one file on top of defaults, ignoring global config and env.
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply `EXPRTREE_*` variables from the given source as explicit overrides.
    fn apply_env_overrides(mut self, source: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("negative_check") {
            self.negative_check = parse_value("EXPRTREE_NEGATIVE_CHECK", &val)?;
        }
        if let Ok(val) = config.get_string("traversal") {
            self.traversal = parse_value("EXPRTREE_TRAVERSAL", &val)?;
        }
        if let Ok(val) = config.get_string("separator") {
            self.separator = val;
        }

        Ok(self)
    }

    /// Apply overrides from an explicit variable map (`EXPRTREE_*` keys).
    pub fn with_env_overrides(self, vars: HashMap<String, String>) -> Result<Self, ApplicationError> {
        self.apply_env_overrides(Environment::with_prefix("EXPRTREE").source(Some(vars)))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

fn parse_value<T: FromStr<Err = String>>(key: &str, val: &str) -> Result<T, ApplicationError> {
    val.parse().map_err(|e| ApplicationError::Config {
        message: format!("{key}: {e}"),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
