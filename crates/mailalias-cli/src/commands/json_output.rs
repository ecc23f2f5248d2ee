//! JSON output types for machine-readable CLI output.
//!
//! Used by the `--json` flag on every command.

use mailalias::{AliasError, AliasRecord, BuildReport, ExpansionFailure};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations that are not library errors.
pub mod error_codes {
    /// Alias name not present in the table
    pub const UNKNOWN_ALIAS: &str = "CLI_001";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "ALIAS_001", "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Alias the error belongs to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// File the error is about (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates an error with a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            alias: None,
            file: None,
        }
    }

    /// Sets the alias name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl From<&AliasError> for JsonError {
    fn from(error: &AliasError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
            alias: None,
            file: error.path().map(|p| p.display().to_string()),
        }
    }
}

impl From<&ExpansionFailure> for JsonError {
    fn from(failure: &ExpansionFailure) -> Self {
        JsonError::from(&failure.error).with_alias(&failure.name)
    }
}

/// Build counters shared by the command outputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildSummary {
    /// Records found in the alias file
    pub parsed: usize,
    /// Records in the table
    pub defined: usize,
    /// Records with at least one include substituted
    pub expanded: usize,
    /// Records whose expansion failed
    pub failed: usize,
}

impl From<&BuildReport> for BuildSummary {
    fn from(report: &BuildReport) -> Self {
        Self {
            parsed: report.parsed,
            defined: report.defined,
            expanded: report.expanded,
            failed: report.failures.len(),
        }
    }
}

/// Output of `list --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOutput {
    /// True if every record expanded
    pub success: bool,
    /// Alias file that was read
    pub alias_file: String,
    /// Table contents
    pub records: Vec<AliasRecord>,
    /// Records whose expansion failed
    pub errors: Vec<JsonError>,
}

/// Output of `show --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowOutput {
    /// True if the alias exists and expanded
    pub success: bool,
    /// The alias, if found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AliasRecord>,
    /// Problems with this alias
    pub errors: Vec<JsonError>,
}

/// Output of `check --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutput {
    /// True if every record expanded
    pub success: bool,
    /// Alias file that was read
    pub alias_file: String,
    /// Build counters
    pub summary: BuildSummary,
    /// Records whose expansion failed
    pub errors: Vec<JsonError>,
}
