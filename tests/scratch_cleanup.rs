#![cfg(unix)]
//! Name checks must not leave scratch directories behind.

use bulk_rename::{Entry, ValidationError, validate};
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn leftover_scratch_dirs(tmp: &Path) -> Vec<String> {
    fs::read_dir(tmp)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("bulk_rename_check_"))
        .collect()
}

fn with_tmpdir<T>(tmp: &Path, f: impl FnOnce() -> T) -> T {
    let previous = std::env::var_os("TMPDIR");
    // SAFETY: serialized with the other test in this binary; no threads read the env meanwhile.
    unsafe { std::env::set_var("TMPDIR", tmp) };
    let out = f();
    unsafe {
        match previous {
            Some(v) => std::env::set_var("TMPDIR", v),
            None => std::env::remove_var("TMPDIR"),
        }
    }
    out
}

fn two_entries(dir: &Path) -> Vec<Entry> {
    ["a", "b"]
        .iter()
        .map(|n| {
            let p = dir.join(n);
            fs::write(&p, n).unwrap();
            Entry::new(p).unwrap()
        })
        .collect()
}

#[test]
#[serial]
fn scratch_is_removed_when_a_later_name_is_illegal() {
    let target = tempdir().unwrap();
    let originals = two_entries(target.path());
    let tmp = assert_fs::TempDir::new().unwrap();

    let result = with_tmpdir(tmp.path(), || {
        validate(target.path(), &originals, &["ok".to_string(), "bad\0name".to_string()])
    });

    assert!(matches!(result, Err(ValidationError::IllegalName { ref name, .. }) if name == "bad\0name"));
    assert!(leftover_scratch_dirs(tmp.path()).is_empty());
}

#[test]
#[serial]
fn scratch_is_removed_after_successful_check() {
    let target = tempdir().unwrap();
    let originals = two_entries(target.path());
    let tmp = assert_fs::TempDir::new().unwrap();

    with_tmpdir(tmp.path(), || {
        validate(target.path(), &originals, &["x".to_string(), "y".to_string()])
    })
    .unwrap();

    assert!(leftover_scratch_dirs(tmp.path()).is_empty());
    assert!(target.path().join("a").exists());
    assert!(!target.path().join("x").exists());
}
