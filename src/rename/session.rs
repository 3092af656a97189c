//! One directory's edit cycle: show the listing, read it back, validate,
//! and on failure ask whether to retry, continue or exit.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::{BulkRenameError, SessionError};
use crate::output as out;

use super::editor::{EditOutcome, Editor};
use super::prompt::{Choice, Prompter};
use super::validate::validate;
use super::{Entry, Rename, RenamePlan};

const HEADER_PREFIX: &str = "Directory: ";

/// How a session ended for one directory.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The edit validated; apply these renames (may be empty).
    Planned(RenamePlan),
    /// The user chose to continue without renaming; carries the last failure.
    Skipped(SessionError),
}

/// Header line plus one name per line.
pub fn render_listing(dir: &Path, originals: &[Entry]) -> String {
    let mut text = format!("{HEADER_PREFIX}{}\n", dir.display());
    for entry in originals {
        text.push_str(entry.name());
        text.push('\n');
    }
    text
}

/// Names from an edited listing: the first line (header) is dropped, line
/// endings may be LF or CRLF, and trailing blank lines are ignored.
pub fn parse_listing(text: &str) -> Vec<String> {
    let mut names: Vec<String> = text.lines().skip(1).map(str::to_owned).collect();
    while names.last().is_some_and(|n| n.is_empty()) {
        names.pop();
    }
    names
}

pub struct RefactorSession<E, P> {
    editor: E,
    prompter: P,
}

impl<E: Editor, P: Prompter> RefactorSession<E, P> {
    pub fn new(editor: E, prompter: P) -> Self {
        Self { editor, prompter }
    }

    /// Run the cycle for `dir` until the edit validates or the user gives up.
    ///
    /// Choosing exit returns `BulkRenameError::UserAborted`.
    pub fn run(&mut self, dir: &Path, originals: &[Entry]) -> Result<SessionOutcome> {
        let mut attempt = 1usize;
        loop {
            let failure = match self.attempt(dir, originals)? {
                Ok(plan) => {
                    debug!(dir = %dir.display(), attempt, renames = plan.renames().len(), "edit accepted");
                    return Ok(SessionOutcome::Planned(plan));
                }
                Err(failure) => failure,
            };

            match &failure {
                SessionError::EditorNotSaved => {
                    info!(dir = %dir.display(), attempt, "Editor closed without saving")
                }
                SessionError::Invalid(e) => {
                    warn!(dir = %dir.display(), attempt, kind = e.kind(), error = %e, "Edited names rejected")
                }
            }
            out::print_error(&format!(
                "Names in {} were not changed: {failure}",
                dir.display()
            ));

            match self
                .prompter
                .choose("Would you like to try renaming entries in this directory again?")?
            {
                Choice::Retry => attempt += 1,
                Choice::Continue => return Ok(SessionOutcome::Skipped(failure)),
                Choice::Exit => return Err(BulkRenameError::UserAborted.into()),
            }
        }
    }

    /// One editor round. The outer error is fatal; the inner one is retryable.
    fn attempt(&mut self, dir: &Path, originals: &[Entry]) -> Result<Result<RenamePlan, SessionError>> {
        let text = match self.editor.edit(&render_listing(dir, originals))? {
            EditOutcome::Saved(text) => text,
            EditOutcome::NotSaved => return Ok(Err(SessionError::EditorNotSaved)),
        };

        let names = parse_listing(&text);
        if let Err(e) = validate(dir, originals, &names) {
            return Ok(Err(e.into()));
        }

        let renames = originals
            .iter()
            .zip(&names)
            .map(|(entry, name)| Rename::new(entry.path(), entry.renamed(name)))
            .collect();
        Ok(Ok(RenamePlan::new(dir, renames)))
    }
}
