//! Rename engine: listing types, validation, the edit session and the tree walk.

mod editor;
mod prompt;
mod select;
mod session;
mod validate;
mod walk;

pub use editor::{EditOutcome, Editor, ExternalEditor, resolve_editor_command};
pub use prompt::{Choice, Prompter, TerminalPrompter};
pub use select::{EntryKinds, RecurseKinds};
pub use session::{RefactorSession, SessionOutcome, parse_listing, render_listing};
pub use validate::validate;
pub use walk::{WalkOptions, WalkSummary, Walker, write_report};

use std::path::{Path, PathBuf};

/// A directory child listed for renaming.
///
/// Only entries with a UTF-8 leaf name can be listed, since the listing is
/// edited as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: PathBuf,
    name: String,
}

impl Entry {
    /// Build an entry from a full path; `None` if it has no UTF-8 file name.
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_owned();
        Some(Self { path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Sibling path carrying `name` as its leaf.
    pub fn renamed(&self, name: &str) -> PathBuf {
        self.parent().join(name)
    }
}

/// One `from -> to` pair inside a single directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl Rename {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// True when the entry keeps its name.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Validated renames for one directory, in listing order.
///
/// An empty plan means the user saved an empty listing; it is distinct from
/// a skipped session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    dir: PathBuf,
    renames: Vec<Rename>,
}

impl RenamePlan {
    pub fn new(dir: impl Into<PathBuf>, renames: Vec<Rename>) -> Self {
        Self {
            dir: dir.into(),
            renames,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn renames(&self) -> &[Rename] {
        &self.renames
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Renames that actually change a name.
    pub fn changed(&self) -> impl Iterator<Item = &Rename> {
        self.renames.iter().filter(|r| !r.is_noop())
    }
}
