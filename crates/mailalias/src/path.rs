//! Resolution of include paths to absolute file paths.
//!
//! Handles a leading `~` (home directory), `$VAR` and `${VAR}` environment
//! references, and relative paths (joined onto a base directory).

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{AliasError, AliasResult};

static ENV_VAR_REGEX: OnceLock<Regex> = OnceLock::new();

fn env_var_regex() -> &'static Regex {
    ENV_VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
            .expect("invalid regex pattern")
    })
}

/// Turns the path written after `:include:` into an absolute path.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: PathBuf,
    home_dir: Option<PathBuf>,
    vars: Option<HashMap<String, String>>,
}

impl PathResolver {
    /// Creates a resolver relative to `base_dir`, using the process
    /// environment and the user's home directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            home_dir: dirs::home_dir(),
            vars: None,
        }
    }

    /// Creates a resolver relative to the process working directory.
    pub fn from_current_dir() -> AliasResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| AliasError::io(".", e))?;
        Ok(Self::new(cwd))
    }

    /// Overrides the home directory used for `~`.
    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home.into());
        self
    }

    /// Uses a fixed variable table instead of the process environment.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    fn lookup(&self, name: &str) -> String {
        match &self.vars {
            Some(vars) => vars.get(name).cloned().unwrap_or_default(),
            None => std::env::var(name).unwrap_or_default(),
        }
    }

    /// Resolves `raw` to an absolute, lexically normalized path.
    ///
    /// Unset variables expand to the empty string.
    pub fn resolve(&self, raw: &str) -> AliasResult<PathBuf> {
        let expanded = env_var_regex().replace_all(raw, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            self.lookup(name)
        });

        let path = if expanded == "~" || expanded.starts_with("~/") {
            let home = self
                .home_dir
                .as_ref()
                .ok_or_else(|| AliasError::NoHomeDir(raw.to_string()))?;
            let rest = expanded.trim_start_matches('~').trim_start_matches('/');
            home.join(rest)
        } else {
            PathBuf::from(expanded.into_owned())
        };

        let absolute = if path.is_absolute() {
            path
        } else {
            self.base_dir.join(path)
        };
        Ok(normalize(&absolute))
    }
}

/// Removes `.` components and folds `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
