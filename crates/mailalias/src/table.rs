//! Alias table storage.
//!
//! The host decides how aliases are stored. [`SetTable`] is keyed by name
//! with no ordering guarantee; [`ListTable`] keeps records in insertion
//! order. Both implement [`AliasTable`], which is all the driver needs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::AliasRecord;

/// What `define` does when a name is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later definition replaces the earlier one.
    #[default]
    Replace,
    /// The first definition is kept; later ones are ignored.
    KeepFirst,
}

/// Table representation chosen by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    /// [`SetTable`].
    Set,
    /// [`ListTable`].
    #[default]
    List,
}

impl TableShape {
    /// Creates an empty table of this shape.
    pub fn create(self, policy: DuplicatePolicy) -> Box<dyn AliasTable> {
        match self {
            TableShape::Set => Box::new(SetTable::with_policy(policy)),
            TableShape::List => Box::new(ListTable::with_policy(policy)),
        }
    }
}

/// Storage for alias records.
pub trait AliasTable {
    /// Inserts a record, or applies the table's duplicate policy if the
    /// name already exists.
    fn define(&mut self, name: &str, expansion: &str);

    /// Visits every record, allowing its expansion to be replaced.
    fn for_each_mut(&mut self, f: &mut dyn FnMut(&str, &mut String));

    /// Returns the expansion for `name`.
    fn get(&self, name: &str) -> Option<&str>;

    /// Number of records.
    fn len(&self) -> usize;

    /// Returns true if the table holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns owned copies of all records in iteration order.
    fn records(&self) -> Vec<AliasRecord>;
}

/// Name-keyed table; iteration order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct SetTable {
    entries: HashMap<String, String>,
    policy: DuplicatePolicy,
}

impl SetTable {
    /// Creates an empty table that replaces duplicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
        }
    }

    /// Returns true if `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl AliasTable for SetTable {
    fn define(&mut self, name: &str, expansion: &str) {
        match self.entries.get_mut(name) {
            Some(existing) => {
                if self.policy == DuplicatePolicy::Replace {
                    *existing = expansion.to_string();
                }
            }
            None => {
                self.entries.insert(name.to_string(), expansion.to_string());
            }
        }
    }

    fn for_each_mut(&mut self, f: &mut dyn FnMut(&str, &mut String)) {
        for (name, expansion) in self.entries.iter_mut() {
            f(name, expansion);
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn records(&self) -> Vec<AliasRecord> {
        self.entries
            .iter()
            .map(|(name, expansion)| AliasRecord::new(name, expansion))
            .collect()
    }
}

/// Ordered table; iteration follows first insertion.
///
/// Replacing a record keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ListTable {
    records: Vec<AliasRecord>,
    policy: DuplicatePolicy,
}

impl ListTable {
    /// Creates an empty table that replaces duplicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    /// Iterates over records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, AliasRecord> {
        self.records.iter()
    }
}

impl AliasTable for ListTable {
    fn define(&mut self, name: &str, expansion: &str) {
        match self.records.iter_mut().find(|r| r.name == name) {
            Some(existing) => {
                if self.policy == DuplicatePolicy::Replace {
                    existing.expansion = expansion.to_string();
                }
            }
            None => self.records.push(AliasRecord::new(name, expansion)),
        }
    }

    fn for_each_mut(&mut self, f: &mut dyn FnMut(&str, &mut String)) {
        for record in &mut self.records {
            f(&record.name, &mut record.expansion);
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.expansion.as_str())
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn records(&self) -> Vec<AliasRecord> {
        self.records.clone()
    }
}
