//! Alias record types.

use serde::{Deserialize, Serialize};

/// One alias definition: a name and the text it expands to.
///
/// The expansion is rewritten in place when `:include:` directives are
/// substituted, so it is owned and mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    /// Alias name (the text before the colon).
    pub name: String,
    /// Expansion text, raw or include-expanded.
    pub expansion: String,
}

impl AliasRecord {
    /// Creates a new record.
    pub fn new(name: impl Into<String>, expansion: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expansion: expansion.into(),
        }
    }
}

/// A record borrowed from the alias file text, as yielded by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Alias name.
    pub name: &'a str,
    /// Raw expansion: head plus continuation lines, newlines preserved.
    pub expansion: &'a str,
    /// 1-based line number where the record starts.
    pub line: usize,
}

impl RawRecord<'_> {
    /// Converts into an owned record.
    pub fn to_record(&self) -> AliasRecord {
        AliasRecord::new(self.name, self.expansion)
    }
}

impl From<RawRecord<'_>> for AliasRecord {
    fn from(raw: RawRecord<'_>) -> Self {
        raw.to_record()
    }
}
