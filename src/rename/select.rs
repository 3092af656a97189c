//! Which entries get listed and which directories get walked.
//!
//! "Dot" means the leaf name starts with `.`. Inclusion follows symlinks
//! (a link to a file counts as a file); broken links are never included.

use std::fs;
use std::path::Path;

fn is_dot(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.as_encoded_bytes().first() == Some(&b'.'))
}

/// Kinds of entries offered for renaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryKinds {
    pub files: bool,
    pub dot_files: bool,
    pub dirs: bool,
    pub dot_dirs: bool,
}

impl EntryKinds {
    pub fn files_only() -> Self {
        Self {
            files: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.files || self.dot_files || self.dirs || self.dot_dirs)
    }

    pub fn includes(&self, path: &Path) -> bool {
        let Ok(meta) = fs::metadata(path) else {
            return false;
        };
        let dot = is_dot(path);
        if meta.is_file() {
            if dot { self.dot_files } else { self.files }
        } else if meta.is_dir() {
            if dot { self.dot_dirs } else { self.dirs }
        } else {
            false
        }
    }
}

/// Kinds of directories descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecurseKinds {
    pub dirs: bool,
    pub dot_dirs: bool,
}

impl RecurseKinds {
    pub fn is_enabled(&self) -> bool {
        self.dirs || self.dot_dirs
    }

    pub fn recurses(&self, path: &Path) -> bool {
        if !path.is_dir() {
            return false;
        }
        if is_dot(path) { self.dot_dirs } else { self.dirs }
    }
}
