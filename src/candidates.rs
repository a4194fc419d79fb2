//! Candidate path generation.
//!
//! The candidate list is the cross product of directories and file names,
//! directory-major: every file is tried in the first directory before any in
//! the second. Override paths extend both inputs before the product is taken.
//! Each path appears once, at its first position.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Split an override into a directory and, for a file path, its base name.
///
/// A path ending in a separator, or naming an existing directory, is a bare
/// directory. Anything else is a file: `/opt/app/custom.json` gives
/// `("/opt/app", Some("custom.json"))`. A bare file name has an empty
/// directory, which resolves against the working directory. Empty overrides
/// give `None`.
pub fn split_override(raw: &Path) -> Option<(PathBuf, Option<String>)> {
    let text = raw.as_os_str();
    if text.is_empty() {
        return None;
    }
    let trailing_separator = text
        .to_string_lossy()
        .ends_with(std::path::is_separator);
    if trailing_separator || raw.is_dir() {
        return Some((raw.to_path_buf(), None));
    }
    match (raw.parent(), raw.file_name()) {
        (Some(dir), Some(file)) => Some((
            dir.to_path_buf(),
            Some(file.to_string_lossy().into_owned()),
        )),
        _ => Some((raw.to_path_buf(), None)),
    }
}

/// Build the ordered, de-duplicated candidate list.
///
/// Not a pure function of its arguments: each override goes through
/// [`split_override`], which checks the filesystem. An override without a
/// trailing separator is a file path unless a directory exists there right
/// now, so the same call can give different lists before and after that
/// directory is created. Append a separator to pin the directory reading.
pub fn build_candidates<P: AsRef<Path>>(
    dirs: &[PathBuf],
    files: &[String],
    overrides: &[P],
) -> Vec<PathBuf> {
    let mut dirs = dirs.to_vec();
    let mut files = files.to_vec();
    for raw in overrides {
        if let Some((dir, file)) = split_override(raw.as_ref()) {
            dirs.push(dir);
            if let Some(file) = file {
                files.push(file);
            }
        }
    }

    let mut seen = HashSet::new();
    let mut paths = Vec::with_capacity(dirs.len() * files.len());
    for dir in &dirs {
        for file in &files {
            let path = dir.join(file);
            if seen.insert(path.clone()) {
                paths.push(path);
            }
        }
    }
    paths
}
