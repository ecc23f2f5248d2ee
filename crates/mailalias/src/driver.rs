//! Table builds: parse an alias file into a table, then expand includes.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::AliasConfig;
use crate::error::{AliasError, AliasResult};
use crate::include::IncludeExpander;
use crate::parser::{parse, read_alias_file};
use crate::source::{BufferCache, SourceLoader};
use crate::table::AliasTable;

/// A record whose include expansion failed.
///
/// The record stays in the table with whatever was substituted before the
/// failure.
#[derive(Debug)]
pub struct ExpansionFailure {
    /// Alias name.
    pub name: String,
    /// Why expansion stopped.
    pub error: AliasError,
}

/// Outcome of a table build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Alias file that was read.
    pub path: PathBuf,
    /// Records yielded by the parser, duplicates included.
    pub parsed: usize,
    /// Records in the table after defining.
    pub defined: usize,
    /// Records that had at least one include substituted.
    pub expanded: usize,
    /// Records whose expansion failed.
    pub failures: Vec<ExpansionFailure>,
}

impl BuildReport {
    /// Returns true if every record expanded.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parses `text` and calls `define` for every record in file order.
///
/// Returns the number of records parsed.
pub fn define_with<F>(text: &str, mut define: F) -> usize
where
    F: FnMut(&str, &str),
{
    let mut count = 0;
    for record in parse(text) {
        define(record.name, record.expansion);
        count += 1;
    }
    count
}

/// Parses `text` into `table`.
pub fn define_all(text: &str, table: &mut dyn AliasTable) -> usize {
    define_with(text, |name, expansion| table.define(name, expansion))
}

/// Expands includes in every record of `table`, in place.
///
/// A failing record does not stop the sweep. Returns the number of records
/// that were changed and the failures.
pub fn expand_table<S: SourceLoader>(
    table: &mut dyn AliasTable,
    expander: &mut IncludeExpander<S>,
) -> (usize, Vec<ExpansionFailure>) {
    let mut expanded = 0;
    let mut failures = Vec::new();

    table.for_each_mut(&mut |name: &str, expansion: &mut String| {
        match expander.expand_in_place(expansion) {
            Ok(0) => {}
            Ok(n) => {
                debug!(alias = name, substitutions = n, "expanded includes");
                expanded += 1;
            }
            Err(error) => {
                warn!(
                    alias = name,
                    code = error.code(),
                    "include expansion failed: {}",
                    error
                );
                failures.push(ExpansionFailure {
                    name: name.to_string(),
                    error,
                });
            }
        }
    });

    (expanded, failures)
}

/// Reads `path`, defines every record into `table` and expands includes.
///
/// Fails only if the alias file itself cannot be read; include failures
/// are collected in the report.
pub fn build_aliases<S: SourceLoader>(
    path: &Path,
    table: &mut dyn AliasTable,
    expander: &mut IncludeExpander<S>,
) -> AliasResult<BuildReport> {
    let text = read_alias_file(path)?;
    let parsed = define_all(&text, table);
    let (expanded, failures) = expand_table(table, expander);

    info!(
        path = %path.display(),
        parsed,
        defined = table.len(),
        failures = failures.len(),
        "alias table built"
    );

    Ok(BuildReport {
        path: path.to_path_buf(),
        parsed,
        defined: table.len(),
        expanded,
        failures,
    })
}

/// Builds alias tables from an [`AliasConfig`].
///
/// Include files are loaded through a [`BufferCache`] unless another
/// loader is supplied, so files included by many records are read once.
pub struct AliasBuilder<S = BufferCache> {
    config: AliasConfig,
    alias_file: PathBuf,
    expander: IncludeExpander<S>,
}

impl AliasBuilder<BufferCache> {
    /// Creates a builder with a fresh buffer cache.
    pub fn new(config: AliasConfig) -> AliasResult<Self> {
        Self::with_source(config, BufferCache::new())
    }
}

impl<S: SourceLoader> AliasBuilder<S> {
    /// Creates a builder loading include files through `source`.
    pub fn with_source(config: AliasConfig, source: S) -> AliasResult<Self> {
        let resolver = config.path_resolver()?;
        let alias_file = config.alias_file_path(&resolver)?;
        let expander = IncludeExpander::new(resolver, source).with_limit(config.include_limit);
        Ok(Self {
            config,
            alias_file,
            expander,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &AliasConfig {
        &self.config
    }

    /// The alias file that will be read.
    pub fn alias_file(&self) -> &Path {
        &self.alias_file
    }

    /// The include expander, for expanding strings outside a build.
    pub fn expander_mut(&mut self) -> &mut IncludeExpander<S> {
        &mut self.expander
    }

    /// Reads the alias file into `table` without expanding includes.
    pub fn define_into(&self, table: &mut dyn AliasTable) -> AliasResult<usize> {
        let text = read_alias_file(&self.alias_file)?;
        Ok(define_all(&text, table))
    }

    /// Reads the alias file into `table` and expands every record.
    pub fn build_into(&mut self, table: &mut dyn AliasTable) -> AliasResult<BuildReport> {
        build_aliases(&self.alias_file, table, &mut self.expander)
    }
}
