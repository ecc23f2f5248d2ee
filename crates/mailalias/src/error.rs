//! Error types for alias file loading and include expansion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading alias files or expanding `:include:` directives.
///
/// Lines that do not match the record grammar are never errors; the parser
/// skips them.
#[derive(Debug, Error)]
pub enum AliasError {
    /// An alias file or include target could not be opened or read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An include would nest deeper than allowed.
    ///
    /// This is how self-including and mutually-including files terminate.
    #[error(
        "include depth limit of {limit} exceeded while including '{}' (possible include cycle)",
        path.display()
    )]
    IncludeDepthExceeded { path: PathBuf, limit: usize },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A path starts with `~` but no home directory is known.
    #[error("cannot expand '~' in '{0}': home directory is unknown")]
    NoHomeDir(String),
}

impl AliasError {
    /// Creates an I/O error bound to the path that failed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AliasError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the stable error code (e.g., "ALIAS_001").
    pub fn code(&self) -> &'static str {
        match self {
            AliasError::Io { .. } => "ALIAS_001",
            AliasError::IncludeDepthExceeded { .. } => "ALIAS_002",
            AliasError::Config { .. } => "ALIAS_003",
            AliasError::NoHomeDir(_) => "ALIAS_004",
        }
    }

    /// Returns the file this error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            AliasError::Io { path, .. }
            | AliasError::IncludeDepthExceeded { path, .. }
            | AliasError::Config { path, .. } => Some(path),
            AliasError::NoHomeDir(_) => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type AliasResult<T> = Result<T, AliasError>;
