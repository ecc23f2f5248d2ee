//! CLI command implementations

pub mod check;
pub mod json_output;
pub mod list;
pub mod show;

use anyhow::{Context, Result};
use mailalias::{AliasBuilder, AliasTable, BuildReport, TableShape};
use tracing::debug;

use crate::settings::LoadOptions;

/// Reads the configured alias file into a fresh table.
///
/// With `expand` false the records keep their raw expansions.
pub(crate) fn load_table(
    options: &LoadOptions,
    shape: TableShape,
    expand: bool,
) -> Result<(Box<dyn AliasTable>, BuildReport)> {
    let config = options.resolve()?;
    let mut builder = AliasBuilder::new(config).context("Failed to prepare alias build")?;
    let mut table = shape.create(builder.config().duplicates);
    let alias_file = builder.alias_file().to_path_buf();
    debug!(path = %alias_file.display(), ?shape, expand, "loading alias table");

    let report = if expand {
        builder
            .build_into(table.as_mut())
            .with_context(|| format!("Failed to build aliases from {}", alias_file.display()))?
    } else {
        let parsed = builder
            .define_into(table.as_mut())
            .with_context(|| format!("Failed to read aliases from {}", alias_file.display()))?;
        BuildReport {
            path: alias_file,
            parsed,
            defined: table.len(),
            ..BuildReport::default()
        }
    };

    Ok((table, report))
}
