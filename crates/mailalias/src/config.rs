//! Configuration for alias table builds.
//!
//! Configuration is read from a JSON file (by default
//! `<config dir>/mailalias/config.json`, if present). The alias file can
//! also come from the `MAILALIAS_FILE` environment variable when the
//! configuration file does not name one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AliasError, AliasResult};
use crate::include::DEFAULT_INCLUDE_LIMIT;
use crate::path::PathResolver;
use crate::table::DuplicatePolicy;

/// Alias file used when nothing else names one.
pub const DEFAULT_ALIAS_FILE: &str = "~/etc/aliases";

/// Environment variable naming the alias file.
pub const ALIAS_FILE_ENV: &str = "MAILALIAS_FILE";

/// Settings for building an alias table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AliasConfig {
    /// Alias file to read; [`DEFAULT_ALIAS_FILE`] when unset.
    pub alias_file: Option<PathBuf>,
    /// Maximum include nesting depth per record.
    pub include_limit: usize,
    /// Base directory for relative include paths; the working directory
    /// when unset.
    pub base_dir: Option<PathBuf>,
    /// How repeated alias names are stored.
    pub duplicates: DuplicatePolicy,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            alias_file: None,
            include_limit: DEFAULT_INCLUDE_LIMIT,
            base_dir: None,
            duplicates: DuplicatePolicy::Replace,
        }
    }
}

impl AliasConfig {
    /// Parses configuration JSON. `origin` is only used in error messages.
    pub fn from_json(json: &str, origin: &Path) -> AliasResult<Self> {
        serde_json::from_str(json).map_err(|e| AliasError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> AliasResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| AliasError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json, path)
    }

    /// Location of the per-user configuration file.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mailalias").join("config.json"))
    }

    /// Loads the per-user configuration file if it exists, otherwise the
    /// defaults. The environment is applied afterwards.
    pub fn load_default() -> AliasResult<Self> {
        let mut config = match Self::default_config_path() {
            Some(path) if path.is_file() => Self::load(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Fills `alias_file` from `MAILALIAS_FILE` if it is still unset.
    pub fn apply_env(&mut self) {
        if self.alias_file.is_none() {
            if let Some(value) = std::env::var_os(ALIAS_FILE_ENV).filter(|v| !v.is_empty()) {
                self.alias_file = Some(PathBuf::from(value));
            }
        }
    }

    /// Builds the resolver for include paths.
    pub fn path_resolver(&self) -> AliasResult<PathResolver> {
        match &self.base_dir {
            Some(dir) => Ok(PathResolver::new(dir)),
            None => PathResolver::from_current_dir(),
        }
    }

    /// Returns the absolute alias file path, falling back to
    /// [`DEFAULT_ALIAS_FILE`].
    pub fn alias_file_path(&self, resolver: &PathResolver) -> AliasResult<PathBuf> {
        match &self.alias_file {
            Some(path) => resolver.resolve(&path.to_string_lossy()),
            None => resolver.resolve(DEFAULT_ALIAS_FILE),
        }
    }
}
