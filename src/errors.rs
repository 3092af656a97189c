//! Typed error definitions for bulk_rename.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! - `ValidationError`: an edited listing is unsafe to apply. Recovered by the session loop.
//! - `SessionError`: one failed edit attempt (unsaved editor or invalid names).
//! - `BulkRenameError`: failures that escape a directory and end the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::rename::Rename;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("You cannot add or remove lines while renaming: expected {expected} names, found {found}")]
    CountMismatch { expected: usize, found: usize },

    #[error("You cannot create duplicate paths: {}", names.join(", "))]
    DuplicateOrCollision { names: Vec<String> },

    #[error("'{name}' is not a valid file name: {source}")]
    IllegalName {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot list directory {dir}: {source}")]
    Unreadable {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create a scratch directory to check names: {0}")]
    Scratch(#[source] io::Error),
}

impl ValidationError {
    /// Short machine-readable kind for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::CountMismatch { .. } => "count_mismatch",
            ValidationError::DuplicateOrCollision { .. } => "duplicate_or_collision",
            ValidationError::IllegalName { .. } => "illegal_name",
            ValidationError::Unreadable { .. } => "unreadable",
            ValidationError::Scratch(_) => "scratch",
        }
    }
}

/// Why a single edit attempt did not produce a plan.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("The editor was closed without saving")]
    EditorNotSaved,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum BulkRenameError {
    #[error("Aborted by user")]
    UserAborted,

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("The path provided does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("The path provided is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error(
        "Renaming in {dir} stopped at '{}' -> '{}' after {} completed rename(s): {source}",
        failed.from.display(),
        failed.to.display(),
        applied.len()
    )]
    PartialApply {
        dir: PathBuf,
        applied: Vec<Rename>,
        failed: Rename,
        /// `(staging, original)` pairs that could not be moved back because
        /// the original name was taken by a completed rename.
        stranded: Vec<(PathBuf, PathBuf)>,
        #[source]
        source: io::Error,
    },
}

impl BulkRenameError {
    /// Stable numeric code for logs.
    pub fn code(&self) -> u16 {
        match self {
            BulkRenameError::UserAborted => 10,
            BulkRenameError::Interrupted => 11,
            BulkRenameError::PathNotFound(_) => 20,
            BulkRenameError::NotADirectory(_) => 21,
            BulkRenameError::PartialApply { .. } => 30,
        }
    }

    /// Process exit status for the binary.
    pub fn exit_status(&self) -> i32 {
        match self {
            BulkRenameError::UserAborted => 2,
            BulkRenameError::Interrupted => 130,
            _ => 1,
        }
    }
}
