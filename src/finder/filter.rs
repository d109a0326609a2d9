//! File filtering functionality
//!
//! The two decisions every walker makes: whether to descend into a
//! directory and whether a file is reported. Both are pure functions of the
//! path, the file's modification time and the shared [`SearchConfig`].

use std::borrow::Cow;
use std::path::{Component, Path};
use std::time::SystemTime;

use super::options::{fold, SearchConfig};

/// What the walker should do with a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirDecision {
    /// Visit the directory's children
    Descend,
    /// Skip the directory and everything beneath it
    Prune,
}

/// Last component of `path` as written: `.` for `.`, `..` for `..`.
///
/// Unlike [`Path::file_name`] this never drops the dot components, which the
/// hidden-name rules depend on.
pub fn base_name(path: &Path) -> Cow<'_, str> {
    match path.components().next_back() {
        Some(component) => component.as_os_str().to_string_lossy(),
        None => Cow::Borrowed("."),
    }
}

/// Decide whether to descend into the directory at `path`.
///
/// Hidden directories are pruned, except for `.` itself (`..` is not
/// exempt). So is any directory whose path has a component equal to one of
/// the configured excludes.
pub fn dir_decision(path: &Path, config: &SearchConfig) -> DirDecision {
    let base = base_name(path);
    if base != "." && base.starts_with('.') {
        return DirDecision::Prune;
    }

    let excluded = path
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .any(|c| config.is_excluded(&fold(&c.as_os_str().to_string_lossy(), config.casefold())));

    if excluded {
        DirDecision::Prune
    } else {
        DirDecision::Descend
    }
}

/// Decide whether the file at `path`, last modified at `modified`, is reported.
pub fn accept_file(path: &Path, modified: SystemTime, config: &SearchConfig) -> bool {
    let base = base_name(path);
    if base.starts_with('.') {
        return false;
    }
    if modified < config.from_time() {
        return false;
    }
    matches_any_glob(&base, config)
}

/// Whether `name` matches at least one configured glob
pub fn matches_any_glob(name: &str, config: &SearchConfig) -> bool {
    let name = fold(name, config.casefold());
    config.patterns().iter().any(|pattern| pattern.matches(&name))
}
