//! Sendmail-style alias files
//!
//! This crate reads `aliases(5)` style files into an alias table and
//! substitutes `:include:FILE` directives with the contents of the named
//! files.
//!
//! # Overview
//!
//! A build has two passes:
//!
//! - **Parse**: the [`parser`] turns the alias file into `(name, expansion)`
//!   records, keeping continuation lines verbatim, and each record is
//!   defined into an [`AliasTable`].
//! - **Expand**: every record's expansion is rewritten in place by the
//!   [`IncludeExpander`], which replaces each `:include:` directive with the
//!   referenced file's lines joined by `", "`, repeating until none is left.
//!
//! # Example
//!
//! ```
//! use mailalias::{define_all, expand_table, BufferCache, IncludeExpander, ListTable, PathResolver};
//! use mailalias::AliasTable;
//!
//! let mut table = ListTable::new();
//! define_all("staff: :include:staff.list\nroot: admin\n", &mut table);
//!
//! let mut buffers = BufferCache::new();
//! buffers.open("/etc/mail/staff.list", "alice\nbob\n");
//! let mut expander = IncludeExpander::new(PathResolver::new("/etc/mail"), buffers);
//!
//! let (_, failures) = expand_table(&mut table, &mut expander);
//! assert!(failures.is_empty());
//! assert_eq!(table.get("staff"), Some("alice, bob"));
//! ```
//!
//! # Modules
//!
//! - [`parser`]: record grammar and the lazy record iterator
//! - [`include`]: `:include:` substitution and content folding
//! - [`table`]: the [`AliasTable`] trait with set and list implementations
//! - [`driver`]: whole-file builds and [`AliasBuilder`]
//! - [`config`]: [`AliasConfig`] and default locations
//! - [`path`]: include path resolution
//! - [`source`]: include file loading and buffer reuse
//! - [`error`]: error types

pub mod config;
pub mod driver;
pub mod error;
pub mod include;
pub mod parser;
pub mod path;
pub mod record;
pub mod source;
pub mod table;

// Re-export commonly used types at the crate root
pub use config::{AliasConfig, ALIAS_FILE_ENV, DEFAULT_ALIAS_FILE};
pub use driver::{
    build_aliases, define_all, define_with, expand_table, AliasBuilder, BuildReport,
    ExpansionFailure,
};
pub use error::{AliasError, AliasResult};
pub use include::{reformat_include, IncludeExpander, DEFAULT_INCLUDE_LIMIT};
pub use parser::{parse, parse_file, read_alias_file, Records};
pub use path::PathResolver;
pub use record::{AliasRecord, RawRecord};
pub use source::{BufferCache, DiskSource, SourceLoader};
pub use table::{AliasTable, DuplicatePolicy, ListTable, SetTable, TableShape};
