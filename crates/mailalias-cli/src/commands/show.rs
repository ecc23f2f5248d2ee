//! Show command implementation
//!
//! Prints the expansion of a single alias.

use anyhow::Result;
use colored::Colorize;
use mailalias::{AliasRecord, TableShape};
use std::process::ExitCode;

use super::json_output::{error_codes, JsonError, ShowOutput};
use super::load_table;
use crate::settings::LoadOptions;

/// Run the show command
///
/// # Returns
/// Exit code: 0 if the alias exists and expanded, 1 otherwise
pub fn run(options: &LoadOptions, name: &str, json_output: bool) -> Result<ExitCode> {
    let (table, report) = load_table(options, TableShape::Set, true)?;

    let record = table.get(name).map(|e| AliasRecord::new(name, e));
    let mut errors: Vec<JsonError> = report
        .failures
        .iter()
        .filter(|f| f.name == name)
        .map(JsonError::from)
        .collect();
    if record.is_none() {
        errors.push(
            JsonError::new(error_codes::UNKNOWN_ALIAS, format!("unknown alias: {}", name))
                .with_alias(name),
        );
    }
    let success = errors.is_empty();

    if json_output {
        let output = ShowOutput {
            success,
            record,
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if let Some(record) = &record {
            println!("{}", record.expansion);
        }
        for error in &errors {
            eprintln!("{} [{}] {}", "error".red().bold(), error.code, error.message);
        }
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
