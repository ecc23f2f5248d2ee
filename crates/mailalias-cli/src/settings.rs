//! Configuration assembly for CLI commands.
//!
//! Precedence, highest first: command-line flags, the `--config` file (or
//! the per-user config file), `MAILALIAS_FILE`, built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mailalias::AliasConfig;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit configuration file.
    pub config: Option<String>,
    /// Explicit alias file.
    pub file: Option<String>,
    /// Overrides the include limit.
    pub include_limit: Option<usize>,
}

impl LoadOptions {
    /// Builds the effective configuration.
    pub fn resolve(&self) -> Result<AliasConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = AliasConfig::load(Path::new(path))
                    .with_context(|| format!("Failed to load config file: {}", path))?;
                config.apply_env();
                config
            }
            None => AliasConfig::load_default().context("Failed to load default config")?,
        };

        if let Some(file) = &self.file {
            config.alias_file = Some(PathBuf::from(file));
        }
        if let Some(limit) = self.include_limit {
            config.include_limit = limit;
        }

        Ok(config)
    }
}
