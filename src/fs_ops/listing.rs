//! Directory listings for one level of the tree.
//! Always reads the directory fresh; nothing is cached between calls.

use anyhow::Result;
use std::collections::HashSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

use crate::rename::Entry;

use super::helpers::io_error_with_help;

fn direct_children(dir: &Path) -> WalkDir {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
}

/// Children of `dir` accepted by `include`, sorted by name.
///
/// Entries whose names are not valid UTF-8 cannot be edited as text and are
/// skipped with a warning.
pub fn list_children<F>(dir: &Path, include: F) -> Result<Vec<Entry>>
where
    F: Fn(&Path) -> bool,
{
    let mut entries = Vec::new();
    for item in direct_children(dir) {
        let item = item
            .map_err(io::Error::from)
            .map_err(io_error_with_help("list directory", dir))?;
        if !include(item.path()) {
            continue;
        }
        match Entry::new(item.path()) {
            Some(entry) => entries.push(entry),
            None => warn!(path = %item.path().display(), "Skipping entry whose name is not valid UTF-8"),
        }
    }
    trace!(dir = %dir.display(), count = entries.len(), "listed entries");
    Ok(entries)
}

/// Real (non-symlink) subdirectories of `dir` accepted by `recurse`, sorted by name.
pub fn list_subdirs<F>(dir: &Path, recurse: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let mut dirs = Vec::new();
    for item in direct_children(dir) {
        let item = item
            .map_err(io::Error::from)
            .map_err(io_error_with_help("list directory", dir))?;
        if item.file_type().is_dir() && recurse(item.path()) {
            dirs.push(item.into_path());
        }
    }
    Ok(dirs)
}

/// Names of every entry currently in `dir`.
pub fn sibling_names(dir: &Path) -> io::Result<HashSet<OsString>> {
    let mut names = HashSet::new();
    for item in direct_children(dir) {
        let item = item?;
        names.insert(item.file_name().to_os_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn children_are_sorted_and_filtered() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("b.txt").touch().unwrap();
        dir.child("a.txt").touch().unwrap();
        dir.child("sub").create_dir_all().unwrap();

        let files = list_children(dir.path(), |p| p.is_file()).unwrap();
        let names: Vec<_> = files.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn subdirs_skip_symlinked_directories() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("real").create_dir_all().unwrap();
        std::os::unix::fs::symlink(dir.child("real").path(), dir.child("link").path()).unwrap();

        let subdirs = list_subdirs(dir.path(), |_| true).unwrap();
        assert_eq!(subdirs, vec![dir.child("real").path().to_path_buf()]);
    }

    #[test]
    fn sibling_names_fails_for_missing_dir() {
        let dir = assert_fs::TempDir::new().unwrap();
        let err = sibling_names(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
