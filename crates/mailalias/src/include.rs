//! `:include:` expansion.
//!
//! An expansion may reference files with `:include:PATH`. Each directive,
//! together with the whitespace around it, is replaced by the referenced
//! file's lines joined with `", "`. The whole string is scanned again after
//! every substitution, so included files may themselves contain directives.
//!
//! Every byte of the expansion carries the include depth it came from: zero
//! for the original text, `n + 1` for content substituted for a directive at
//! depth `n`. Expansion fails once a substitution would go deeper than the
//! configured limit, which is how include cycles terminate.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::{AliasError, AliasResult};
use crate::path::PathResolver;
use crate::source::{DiskSource, SourceLoader};

/// Optional whitespace, the directive, a path running up to whitespace or a
/// comma, optional whitespace.
const DIRECTIVE_PATTERN: &str = r"\s*:include:([^\s,]+)\s*";

/// Default maximum include nesting depth.
pub const DEFAULT_INCLUDE_LIMIT: usize = 64;

static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();

fn directive_regex() -> &'static Regex {
    DIRECTIVE_REGEX.get_or_init(|| Regex::new(DIRECTIVE_PATTERN).expect("invalid regex pattern"))
}

/// Returns true if `expansion` contains an `:include:` directive.
pub fn contains_include(expansion: &str) -> bool {
    directive_regex().is_match(expansion)
}

/// A directive located in an expansion.
struct Directive {
    /// Span to replace, surrounding whitespace included.
    span: Range<usize>,
    /// Offset of the path token.
    path_start: usize,
    path: String,
}

/// Locates the first directive.
fn find_directive(expansion: &str) -> Option<Directive> {
    let caps = directive_regex().captures(expansion)?;
    let path = caps.get(1)?;
    Some(Directive {
        span: caps.get(0)?.range(),
        path_start: path.start(),
        path: path.as_str().to_string(),
    })
}

/// Folds file content into a single comma-separated line.
///
/// Trailing whitespace is stripped from every line and blank lines at the
/// end of the file are dropped; interior blank lines are kept.
///
/// ```
/// use mailalias::include::reformat_include;
///
/// assert_eq!(reformat_include("a\nb\nc\n"), "a, b, c");
/// assert_eq!(reformat_include("x\ny\n\n"), "x, y");
/// ```
pub fn reformat_include(content: &str) -> String {
    let mut lines: Vec<&str> = content.split('\n').map(str::trim_end).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join(",\n").replace('\n', " ")
}

/// Expands `:include:` directives using a path resolver and a source loader.
pub struct IncludeExpander<S = DiskSource> {
    resolver: PathResolver,
    source: S,
    limit: usize,
}

impl IncludeExpander<DiskSource> {
    /// Creates an expander that reads include files from disk.
    pub fn from_disk(resolver: PathResolver) -> Self {
        Self::new(resolver, DiskSource)
    }
}

impl<S: SourceLoader> IncludeExpander<S> {
    /// Creates an expander with the default depth limit.
    pub fn new(resolver: PathResolver, source: S) -> Self {
        Self {
            resolver,
            source,
            limit: DEFAULT_INCLUDE_LIMIT,
        }
    }

    /// Sets the maximum include nesting depth.
    ///
    /// A directive in the original text is at depth 1, a directive inside
    /// its content at depth 2, and so on. A limit of 0 rejects every include.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Returns the source loader.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns `initial` with every directive substituted.
    pub fn expand(&mut self, initial: &str) -> AliasResult<String> {
        let mut expansion = initial.to_string();
        self.expand_in_place(&mut expansion)?;
        Ok(expansion)
    }

    /// Substitutes directives in place and returns how many were replaced.
    ///
    /// On error the string keeps every substitution made before the failure.
    pub fn expand_in_place(&mut self, expansion: &mut String) -> AliasResult<usize> {
        if !contains_include(expansion) {
            return Ok(0);
        }

        // Include depth of every byte in `expansion`.
        let mut depths = vec![0usize; expansion.len()];
        let mut substitutions = 0;

        while let Some(directive) = find_directive(expansion) {
            let depth = depths[directive.path_start] + 1;
            let path = self.resolver.resolve(&directive.path)?;
            if depth > self.limit {
                return Err(AliasError::IncludeDepthExceeded {
                    path,
                    limit: self.limit,
                });
            }

            let content = self
                .source
                .load(&path)
                .map_err(|e| AliasError::io(&path, e))?;
            let replacement = reformat_include(&content);
            debug!(path = %path.display(), depth, bytes = content.len(), "substituting include");

            depths.splice(
                directive.span.clone(),
                std::iter::repeat(depth).take(replacement.len()),
            );
            expansion.replace_range(directive.span, &replacement);
            substitutions += 1;
        }

        Ok(substitutions)
    }
}
