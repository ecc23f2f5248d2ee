//! End-to-end alias table builds against files on disk.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mailalias --test build_aliases
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use mailalias::{
    build_aliases, parse, AliasBuilder, AliasConfig, AliasTable, DiskSource, DuplicatePolicy,
    IncludeExpander, ListTable, PathResolver, SetTable,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Scratch directory holding an alias file and its include files.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn expander(&self) -> IncludeExpander<DiskSource> {
        IncludeExpander::from_disk(PathResolver::new(self.path()))
    }

    fn config(&self, aliases: &Path) -> AliasConfig {
        AliasConfig {
            alias_file: Some(aliases.to_path_buf()),
            base_dir: Some(self.path().to_path_buf()),
            ..AliasConfig::default()
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_continuation_record_is_raw_and_unchanged_by_expand() {
    let fx = Fixture::new();
    let aliases = fx.write("aliases", "root: a, b\n\tc\n");

    let mut table = ListTable::new();
    let report = build_aliases(&aliases, &mut table, &mut fx.expander()).unwrap();

    assert!(report.is_ok());
    assert_eq!(report.parsed, 1);
    assert_eq!(report.expanded, 0);
    assert_eq!(table.get("root"), Some("a, b\n\tc"));
}

#[test]
fn test_one_record_per_record_start_line() {
    let text = "\
# system aliases
postmaster: root
root:       admin,
            ops
# lists
staff:      :include:lists/staff
not a record
";
    let names: Vec<_> = parse(text).map(|r| r.name).collect();
    assert_eq!(names, vec!["postmaster", "root", "staff"]);
}

#[test]
fn test_file_without_records_builds_empty_table() {
    let fx = Fixture::new();
    let aliases = fx.write("aliases", "# nothing here\n\n   indented: orphan\n");

    let mut table = SetTable::new();
    let report = build_aliases(&aliases, &mut table, &mut fx.expander()).unwrap();

    assert_eq!(report.parsed, 0);
    assert!(table.is_empty());
}

// ============================================================================
// Include expansion
// ============================================================================

#[test]
fn test_include_file_is_folded() {
    let fx = Fixture::new();
    fx.write("lists/staff", "x\ny\nz\n");
    let aliases = fx.write("aliases", "staff: :include:lists/staff\n");

    let mut table = ListTable::new();
    build_aliases(&aliases, &mut table, &mut fx.expander()).unwrap();

    assert_eq!(table.get("staff"), Some("x, y, z"));
}

#[test]
fn test_blank_final_line_is_dropped() {
    let fx = Fixture::new();
    fx.write("list", "x\ny\n\n");
    let aliases = fx.write("aliases", "l: :include:list\n");

    let mut table = ListTable::new();
    build_aliases(&aliases, &mut table, &mut fx.expander()).unwrap();

    assert_eq!(table.get("l"), Some("x, y"));
}

#[test]
fn test_nested_includes_resolve_fully() {
    let fx = Fixture::new();
    fx.write("a", ":include:b\n");
    fx.write("b", "p\nq\n");
    let aliases = fx.write("aliases", "nested: :include:a\n");

    let mut table = SetTable::new();
    let report = build_aliases(&aliases, &mut table, &mut fx.expander()).unwrap();

    assert!(report.is_ok());
    assert_eq!(table.get("nested"), Some("p, q"));
    assert!(!table.get("nested").unwrap().contains(":include:"));
}

#[test]
fn test_absolute_include_path() {
    let fx = Fixture::new();
    let list = fx.write("elsewhere/list", "one\ntwo\n");
    let aliases = fx.write("aliases", &format!("abs: :include:{}\n", list.display()));

    let mut table = ListTable::new();
    build_aliases(&aliases, &mut table, &mut fx.expander()).unwrap();

    assert_eq!(table.get("abs"), Some("one, two"));
}

#[test]
fn test_include_inside_continuation() {
    let fx = Fixture::new();
    fx.write("ops", "carol\ndave\n");
    let aliases = fx.write("aliases", "team: alice,\n\t:include:ops\n");

    let mut table = ListTable::new();
    build_aliases(&aliases, &mut table, &mut fx.expander()).unwrap();

    assert_eq!(table.get("team"), Some("alice,carol, dave"));
}

#[test]
fn test_many_includes_in_one_alias() {
    let fx = Fixture::new();
    let mut directives = Vec::new();
    for i in 0..70 {
        fx.write(&format!("lists/l{i}"), &format!("user{i}\n"));
        directives.push(format!(":include:lists/l{i}"));
    }
    let aliases = fx.write("aliases", &format!("everyone: {}\n", directives.join(", ")));

    let mut table = ListTable::new();
    let report = build_aliases(&aliases, &mut table, &mut fx.expander()).unwrap();

    assert!(report.is_ok(), "failures: {:?}", report.failures);
    let users: Vec<String> = (0..70).map(|i| format!("user{i}")).collect();
    assert_eq!(table.get("everyone"), Some(users.join(",").as_str()));
}

#[test]
fn test_file_included_twice_at_each_level() {
    let fx = Fixture::new();
    fx.write("top", ":include:mid\n:include:mid\n");
    fx.write("mid", ":include:leaf\n:include:leaf\n");
    fx.write("leaf", "ann\n");
    let aliases = fx.write("aliases", "all: :include:top\n");

    let mut table = ListTable::new();
    let mut expander = fx.expander().with_limit(3);
    let report = build_aliases(&aliases, &mut table, &mut expander).unwrap();

    assert!(report.is_ok(), "failures: {:?}", report.failures);
    assert_eq!(table.get("all"), Some("ann,ann,ann,ann"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_alias_file_aborts() {
    let fx = Fixture::new();
    let mut table = ListTable::new();
    let err = build_aliases(&fx.path().join("absent"), &mut table, &mut fx.expander())
        .unwrap_err();

    assert_eq!(err.code(), "ALIAS_001");
    assert!(table.is_empty());
}

#[test]
fn test_missing_include_fails_only_that_record() {
    let fx = Fixture::new();
    fx.write("ok", "fine\n");
    let aliases = fx.write(
        "aliases",
        "broken: :include:missing\nworking: :include:ok\n",
    );

    let mut table = ListTable::new();
    let report = build_aliases(&aliases, &mut table, &mut fx.expander()).unwrap();

    assert!(!report.is_ok());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "broken");
    assert_eq!(table.get("broken"), Some(":include:missing"));
    assert_eq!(table.get("working"), Some("fine"));
}

#[test]
fn test_self_include_terminates() {
    let fx = Fixture::new();
    fx.write("loop", ":include:loop\n");
    let aliases = fx.write("aliases", "forever: :include:loop\n");

    let mut table = ListTable::new();
    let mut expander = fx.expander().with_limit(10);
    let report = build_aliases(&aliases, &mut table, &mut expander).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].error.code(), "ALIAS_002");
}

// ============================================================================
// Builder and configuration
// ============================================================================

#[test]
fn test_builder_uses_config() {
    let fx = Fixture::new();
    fx.write("staff", "alice\nbob\n");
    let aliases = fx.write("aliases", "dup: first\ndup: second\nstaff: :include:staff\n");

    let mut config = fx.config(&aliases);
    config.duplicates = DuplicatePolicy::KeepFirst;

    let mut builder = AliasBuilder::new(config).unwrap();
    assert_eq!(builder.alias_file(), aliases.as_path());

    let mut table = ListTable::with_policy(builder.config().duplicates);
    let report = builder.build_into(&mut table).unwrap();

    assert_eq!(report.parsed, 3);
    assert_eq!(report.defined, 2);
    assert_eq!(table.get("dup"), Some("first"));
    assert_eq!(table.get("staff"), Some("alice, bob"));
}

#[test]
fn test_builder_define_into_skips_expansion() {
    let fx = Fixture::new();
    let aliases = fx.write("aliases", "staff: :include:staff\n");

    let builder = AliasBuilder::new(fx.config(&aliases)).unwrap();
    let mut table = ListTable::new();
    assert_eq!(builder.define_into(&mut table).unwrap(), 1);
    assert_eq!(table.get("staff"), Some(":include:staff"));
}

#[test]
fn test_builder_shares_include_reads() {
    let fx = Fixture::new();
    fx.write("common", "ops\n");
    let aliases = fx.write(
        "aliases",
        "a: :include:common\nb: :include:common\nc: :include:common\n",
    );

    let mut builder = AliasBuilder::new(fx.config(&aliases)).unwrap();
    let mut table = ListTable::new();
    builder.build_into(&mut table).unwrap();

    let source = builder.expander_mut().source();
    assert_eq!(source.reads(), 1);
    assert_eq!(source.hits(), 2);
}

#[test]
fn test_config_file_round_trip() {
    let fx = Fixture::new();
    let config_path = fx.write(
        "config.json",
        r#"{ "include_limit": 3, "duplicates": "keep_first" }"#,
    );

    let config = AliasConfig::load(&config_path).unwrap();
    assert_eq!(config.include_limit, 3);
    assert_eq!(config.duplicates, DuplicatePolicy::KeepFirst);
}
