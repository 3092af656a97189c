//! Checks that an edited listing is safe to apply.
//!
//! Order matters and the first failure wins:
//!   1) same number of names as listed entries,
//!   2) no duplicate names and no clash with an untouched sibling,
//!   3) every name can exist as a file (probed in a scratch directory).
//!
//! Nothing here writes to the directory being renamed.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path};
use tracing::{debug, warn};

use crate::errors::ValidationError;
use crate::fs_ops::sibling_names;

use super::Entry;

/// Validate `replacements` (position-aligned with `originals`) for `dir`.
pub fn validate(dir: &Path, originals: &[Entry], replacements: &[String]) -> Result<(), ValidationError> {
    check_count(originals, replacements)?;
    check_collisions(dir, originals, replacements)?;
    check_legal_names(replacements)?;
    debug!(dir = %dir.display(), count = replacements.len(), "edited names validated");
    Ok(())
}

fn check_count(originals: &[Entry], replacements: &[String]) -> Result<(), ValidationError> {
    if originals.len() != replacements.len() {
        return Err(ValidationError::CountMismatch {
            expected: originals.len(),
            found: replacements.len(),
        });
    }
    Ok(())
}

fn check_collisions(dir: &Path, originals: &[Entry], replacements: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(replacements.len());
    let mut duplicates: Vec<String> = Vec::new();
    for name in replacements {
        if !seen.insert(name.as_str()) && !duplicates.contains(name) {
            duplicates.push(name.clone());
        }
    }
    if !duplicates.is_empty() {
        return Err(ValidationError::DuplicateOrCollision { names: duplicates });
    }

    let mut untouched = sibling_names(dir).map_err(|source| ValidationError::Unreadable {
        dir: dir.to_path_buf(),
        source,
    })?;
    for entry in originals {
        untouched.remove(OsStr::new(entry.name()));
    }

    let clashes: Vec<String> = replacements
        .iter()
        .filter(|name| untouched.contains(OsStr::new(name.as_str())))
        .cloned()
        .collect();
    if !clashes.is_empty() {
        return Err(ValidationError::DuplicateOrCollision { names: clashes });
    }
    Ok(())
}

/// A replacement must be exactly one plain path component.
fn ensure_leaf_name(name: &str) -> io::Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(leaf)), None) if leaf == OsStr::new(name) => Ok(()),
        _ if name.is_empty() => Err(io::Error::new(io::ErrorKind::InvalidInput, "name is empty")),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "name must be a single path component without separators",
        )),
    }
}

fn check_legal_names(replacements: &[String]) -> Result<(), ValidationError> {
    // Dropping the guard removes the scratch directory on every return path.
    let scratch = tempfile::Builder::new()
        .prefix("bulk_rename_check_")
        .tempdir()
        .map_err(ValidationError::Scratch)?;

    for name in replacements {
        let illegal = |source| ValidationError::IllegalName {
            name: name.clone(),
            source,
        };
        ensure_leaf_name(name).map_err(illegal)?;

        let probe = scratch.path().join(name);
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&probe)
            .and_then(|file| {
                drop(file);
                fs::remove_file(&probe)
            })
            .map_err(illegal)?;
    }

    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        warn!(path = %scratch_path.display(), error = %e, "Failed to remove scratch directory");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn setup(names: &[&str]) -> (assert_fs::TempDir, Vec<Entry>) {
        let dir = assert_fs::TempDir::new().unwrap();
        let entries = names
            .iter()
            .map(|n| {
                let child = dir.child(*n);
                child.write_str(n).unwrap();
                Entry::new(child.path()).unwrap()
            })
            .collect();
        (dir, entries)
    }

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn distinct_legal_names_pass() {
        let (dir, entries) = setup(&["a.txt", "b.txt"]);
        validate(dir.path(), &entries, &owned(&["one.txt", "two.txt"])).unwrap();
    }

    #[test]
    fn count_mismatch_wins_over_other_problems() {
        let (dir, entries) = setup(&["a.txt", "b.txt"]);
        let err = validate(dir.path(), &entries, &owned(&["x/y", "x/y", "z"])).unwrap_err();
        assert!(matches!(err, ValidationError::CountMismatch { expected: 2, found: 3 }));
    }

    #[test]
    fn empty_edit_of_nonempty_listing_is_count_mismatch() {
        let (dir, entries) = setup(&["x.txt"]);
        let err = validate(dir.path(), &entries, &[]).unwrap_err();
        assert!(matches!(err, ValidationError::CountMismatch { expected: 1, found: 0 }));
    }

    #[test]
    fn empty_listing_and_empty_edit_pass() {
        let dir = assert_fs::TempDir::new().unwrap();
        validate(dir.path(), &[], &[]).unwrap();
    }

    #[test]
    fn internal_duplicates_rejected() {
        let (dir, entries) = setup(&["a.txt", "b.txt"]);
        let err = validate(dir.path(), &entries, &owned(&["same", "same"])).unwrap_err();
        match err {
            ValidationError::DuplicateOrCollision { names } => assert_eq!(names, vec!["same"]),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn untouched_sibling_collision_rejected() {
        let (dir, entries) = setup(&["a.txt"]);
        dir.child("other.txt").write_str("keep me").unwrap();
        let err = validate(dir.path(), &entries, &owned(&["other.txt"])).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateOrCollision { .. }));
        dir.child("other.txt").assert("keep me");
    }

    #[test]
    fn noop_and_swap_pass() {
        let (dir, entries) = setup(&["a.txt", "b.txt"]);
        validate(dir.path(), &entries, &owned(&["a.txt", "b.txt"])).unwrap();
        validate(dir.path(), &entries, &owned(&["b.txt", "a.txt"])).unwrap();
    }

    #[test]
    fn separator_is_illegal_and_target_untouched() {
        let (dir, entries) = setup(&["a.txt"]);
        let err = validate(dir.path(), &entries, &owned(&["sub/a.txt"])).unwrap_err();
        match err {
            ValidationError::IllegalName { name, .. } => assert_eq!(name, "sub/a.txt"),
            other => panic!("unexpected: {other}"),
        }
        let listed: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(listed.len(), 1);
        dir.child("a.txt").assert("a.txt");
    }

    #[test]
    fn empty_and_dot_names_are_illegal() {
        for bad in ["", ".", "..", "a/"] {
            let (dir, entries) = setup(&["a.txt"]);
            let err = validate(dir.path(), &entries, &owned(&[bad])).unwrap_err();
            assert!(
                matches!(err, ValidationError::IllegalName { .. }),
                "{bad:?} should be illegal, got {err}"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn nul_byte_is_illegal() {
        let (dir, entries) = setup(&["a.txt"]);
        let err = validate(dir.path(), &entries, &owned(&["bad\0name"])).unwrap_err();
        assert!(matches!(err, ValidationError::IllegalName { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn overlong_name_is_illegal() {
        let (dir, entries) = setup(&["a.txt"]);
        let long = "x".repeat(300);
        let err = validate(dir.path(), &entries, &[long]).unwrap_err();
        assert!(matches!(err, ValidationError::IllegalName { .. }));
    }

    #[test]
    fn missing_directory_is_unreadable() {
        let dir = assert_fs::TempDir::new().unwrap();
        let gone = dir.path().join("gone");
        let err = validate(&gone, &[], &[]).unwrap_err();
        assert!(matches!(err, ValidationError::Unreadable { .. }));
    }
}
