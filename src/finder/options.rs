//! Options for file finding
//!
//! This module provides the raw search options and the validated
//! [`SearchConfig`] the walkers read from.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use glob::Pattern;

use crate::errors::{FindError, FindResult};

/// Pattern used when no glob, suffix or substring was requested
pub const MATCH_ALL: &str = "*";

/// Options for configuring the file finding process
#[derive(Debug, Clone)]
pub struct FindOptions {
    /// Earliest modification time a file may have
    pub from: DateTime<Local>,

    /// File name globs; a name matching any of them qualifies
    pub globs: Vec<String>,

    /// Path component names whose subtrees are skipped
    pub excludes: Vec<String>,

    /// Root paths, each searched independently
    pub paths: Vec<PathBuf>,

    /// Compare names lower-cased
    pub casefold: bool,
}

impl FindOptions {
    /// Create a new FindOptions with default values
    pub fn new() -> Self {
        Self {
            from: DateTime::<Local>::from(UNIX_EPOCH),
            globs: Vec::new(),
            excludes: Vec::new(),
            paths: Vec::new(),
            casefold: false,
        }
    }

    /// Set the earliest modification time
    pub fn with_from(mut self, from: DateTime<Local>) -> Self {
        self.from = from;
        self
    }

    /// Set the file name globs
    pub fn with_globs<I, S>(mut self, globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.globs = globs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the excluded path component names
    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the root paths to search
    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether names are compared case-insensitively
    pub fn with_casefold(mut self, casefold: bool) -> Self {
        self.casefold = casefold;
        self
    }

    /// Validate the options and compile the glob patterns.
    ///
    /// Empty `globs` falls back to `*` and empty `paths` to `.`.
    pub fn build(self) -> FindResult<SearchConfig> {
        let globs = if self.globs.is_empty() {
            vec![MATCH_ALL.to_string()]
        } else {
            self.globs
        };
        let paths = if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths
        };

        let patterns = globs
            .iter()
            .map(|glob| compile_glob(glob, self.casefold))
            .collect::<FindResult<Vec<_>>>()?;
        let folded_excludes = self
            .excludes
            .iter()
            .map(|name| fold(name, self.casefold))
            .collect();

        Ok(SearchConfig {
            from: self.from,
            from_time: SystemTime::from(self.from),
            globs,
            excludes: self.excludes,
            paths,
            casefold: self.casefold,
            patterns,
            folded_excludes,
        })
    }
}

impl Default for FindOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_glob(glob: &str, casefold: bool) -> FindResult<Pattern> {
    Pattern::new(&fold(glob, casefold)).map_err(|e| FindError::PatternError {
        pattern: glob.to_string(),
        message: e.msg.to_string(),
    })
}

pub(crate) fn fold(text: &str, casefold: bool) -> String {
    if casefold {
        text.to_lowercase()
    } else {
        text.to_string()
    }
}

/// A validated, immutable search configuration.
///
/// Built once by [`FindOptions::build`] and only ever read afterwards, so
/// every walker thread can share it by reference.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    from: DateTime<Local>,
    from_time: SystemTime,
    globs: Vec<String>,
    excludes: Vec<String>,
    paths: Vec<PathBuf>,
    casefold: bool,
    patterns: Vec<Pattern>,
    folded_excludes: HashSet<String>,
}

impl SearchConfig {
    pub fn modified_since(&self) -> DateTime<Local> {
        self.from
    }

    /// `modified_since` as a `SystemTime`, compared against file mtimes
    pub(crate) fn from_time(&self) -> SystemTime {
        self.from_time
    }

    pub fn globs(&self) -> &[String] {
        &self.globs
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn casefold(&self) -> bool {
        self.casefold
    }

    /// Compiled globs, already lower-cased when `casefold` is set
    pub(crate) fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Whether `component` (already folded) names an excluded directory
    pub(crate) fn is_excluded(&self, component: &str) -> bool {
        self.folded_excludes.contains(component)
    }
}

impl fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<String> = self
            .paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        writeln!(f, "from={}", self.from.to_rfc3339())?;
        writeln!(f, "globs=[{}]", self.globs.join(" "))?;
        writeln!(f, "excludes=[{}]", self.excludes.join(" "))?;
        writeln!(f, "paths=[{}]", paths.join(" "))?;
        write!(f, "casefold={}", self.casefold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_options_defaults() {
        let config = FindOptions::new().build().unwrap();
        assert_eq!(config.modified_since(), DateTime::<Local>::from(UNIX_EPOCH));
        assert_eq!(config.from_time(), UNIX_EPOCH);
        assert_eq!(config.globs(), ["*"]);
        assert!(config.excludes().is_empty());
        assert_eq!(config.paths(), [PathBuf::from(".")]);
        assert!(!config.casefold());
    }

    #[test]
    fn test_find_options_keeps_given_values() {
        let config = FindOptions::new()
            .with_globs(["*.rs", "*.toml"])
            .with_excludes(["target"])
            .with_paths(["src", "tests"])
            .build()
            .unwrap();
        assert_eq!(config.globs(), ["*.rs", "*.toml"]);
        assert_eq!(config.excludes(), ["target"]);
        assert_eq!(config.paths().len(), 2);
        assert_eq!(config.patterns().len(), 2);
    }

    #[test]
    fn test_invalid_glob_is_rejected_at_build() {
        let err = FindOptions::new().with_globs(["*.rs", "[a-"]).build().unwrap_err();
        match err {
            FindError::PatternError { pattern, .. } => assert_eq!(pattern, "[a-"),
            other => panic!("Expected PatternError, got {other:?}"),
        }
    }

    #[test]
    fn test_casefold_folds_patterns_and_excludes() {
        let config = FindOptions::new()
            .with_globs(["*.TXT"])
            .with_excludes(["Build"])
            .with_casefold(true)
            .build()
            .unwrap();
        assert!(config.patterns()[0].matches("notes.txt"));
        assert!(config.is_excluded("build"));
        assert!(!config.is_excluded("Build"));
        // the original spelling is kept for display
        assert_eq!(config.excludes(), ["Build"]);
    }

    #[test]
    fn test_display_lists_every_field() {
        let config = FindOptions::new()
            .with_globs(["*.py", "*.pyw"])
            .with_excludes(["venv", "build"])
            .build()
            .unwrap();
        let dump = config.to_string();
        assert!(dump.starts_with("from="));
        assert!(dump.contains("globs=[*.py *.pyw]\n"));
        assert!(dump.contains("excludes=[venv build]\n"));
        assert!(dump.contains("paths=[.]\n"));
        assert!(dump.ends_with("casefold=false"));
    }
}
