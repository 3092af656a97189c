//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - With no entry-kind flag, plain files are renamed.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::rename::{EntryKinds, RecurseKinds};

/// Rename the entries of a directory by editing their names in your editor.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bulkrename",
    author,
    version,
    about = "Bulk-rename files and directories with your text editor"
)]
pub struct Args {
    /// Directory whose entries are renamed.
    #[arg(value_name = "PATH", default_value = ".", value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Rename plain files (the default when no kind is selected).
    #[arg(short = 'f', long)]
    pub files: bool,

    /// Rename dot files.
    #[arg(long)]
    pub dot_files: bool,

    /// Rename directories.
    #[arg(short = 'd', long)]
    pub directories: bool,

    /// Rename dot directories.
    #[arg(long)]
    pub dot_directories: bool,

    /// Recurse into directories.
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Recurse into dot directories.
    #[arg(long)]
    pub recursive_dot: bool,

    /// Print every old -> new name.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print what would be renamed without renaming anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Editor command (default: $VISUAL, then $EDITOR).
    #[arg(long, value_name = "COMMAND")]
    pub editor: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where bulkrename looks for its config file, then exit.
    #[arg(long)]
    pub print_config: bool,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Entry kinds selected by flags; plain files when none is given.
    pub fn entry_kinds(&self) -> EntryKinds {
        let kinds = EntryKinds {
            files: self.files,
            dot_files: self.dot_files,
            dirs: self.directories,
            dot_dirs: self.dot_directories,
        };
        if kinds.is_empty() {
            EntryKinds::files_only()
        } else {
            kinds
        }
    }

    pub fn recurse_kinds(&self) -> RecurseKinds {
        RecurseKinds {
            dirs: self.recursive,
            dot_dirs: self.recursive_dot,
        }
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(editor) = &self.editor {
            cfg.editor = Some(editor.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.verbose {
            cfg.verbose = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
