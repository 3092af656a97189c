//! Core library for `bulk_rename`.
//!
//! Rename the entries of a directory tree by editing a plain-text listing of
//! their names. Each directory's edit is validated (same number of names, no
//! duplicates or clashes with untouched siblings, legal file names) before
//! anything on disk changes, and validated renames are applied collision-safely.
//!
//! The editor and the retry prompt sit behind the `Editor` and `Prompter`
//! traits so the engine can be driven without a terminal.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod rename;
pub mod shutdown;

pub use config::{Config, LogLevel, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::{BulkRenameError, SessionError, ValidationError};
pub use fs_ops::apply_plan;
pub use rename::{
    Choice, EditOutcome, Editor, Entry, EntryKinds, ExternalEditor, Prompter, RecurseKinds, RefactorSession,
    Rename, RenamePlan, SessionOutcome, TerminalPrompter, WalkOptions, WalkSummary, Walker, validate,
};

use std::path::Path;

/// Check that `root` exists and is a directory.
pub fn check_root(root: &Path) -> Result<(), BulkRenameError> {
    if !root.exists() {
        return Err(BulkRenameError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(BulkRenameError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}
