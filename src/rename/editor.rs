//! External editor integration.
//!
//! The listing is written to a temporary file, the user's editor is run on it,
//! and the file is read back once the editor exits. The editor counts as
//! "not saved" when it exits unsuccessfully (e.g. `:cq` in vim) or leaves the
//! file untouched.

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs;
use std::io::Write;
use std::process::Command;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Result of one editing round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Saved(String),
    NotSaved,
}

/// Something that lets the user edit a block of text.
pub trait Editor {
    fn edit(&mut self, initial: &str) -> Result<EditOutcome>;
}

/// Editor command selection: explicit value, then `$VISUAL`, then `$EDITOR`,
/// then a platform default.
pub fn resolve_editor_command(explicit: Option<&str>) -> String {
    let from_env = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
    explicit
        .map(str::to_owned)
        .filter(|v| !v.trim().is_empty())
        .or_else(|| from_env("VISUAL"))
        .or_else(|| from_env("EDITOR"))
        .unwrap_or_else(|| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        })
}

/// Runs a user-configured editor command on a temporary file.
///
/// The command is split on whitespace; the file path is appended as the last
/// argument (`code --wait` works).
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Editor for ExternalEditor {
    fn edit(&mut self, initial: &str) -> Result<EditOutcome> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| anyhow!("editor command is empty"))?;

        let mut buffer = tempfile::Builder::new()
            .prefix("bulk_rename_")
            .suffix(".txt")
            .tempfile()
            .context("create temporary file for the editor")?;
        buffer
            .write_all(initial.as_bytes())
            .and_then(|()| buffer.flush())
            .context("write listing for the editor")?;
        // Keep only the path so the editor can replace the file freely; removed on drop.
        let path = buffer.into_temp_path();
        let before = modified(&path);

        debug!(editor = %self.command, file = %path.display(), "launching editor");
        let status = Command::new(program)
            .args(parts)
            .arg(&path)
            .status()
            .with_context(|| format!("launch editor '{}'", self.command))?;

        if !status.success() {
            warn!(editor = %self.command, %status, "Editor exited unsuccessfully; treating as not saved");
            return Ok(EditOutcome::NotSaved);
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("read edited listing '{}'", path.display()))?;
        if text == initial && modified(&path) == before {
            debug!("listing left untouched");
            return Ok(EditOutcome::NotSaved);
        }
        Ok(EditOutcome::Saved(text))
    }
}

fn modified(path: &std::path::Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
