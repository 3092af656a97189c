//! Depth-first walk that runs one rename session per directory.
//!
//! For each directory:
//!   1) list children accepted by the inclusion predicate (fresh listing),
//!   2) run the session; report and apply the plan (report only in dry-run),
//!   3) list the directory again and descend into subdirectories accepted
//!      by the recursion predicate.
//!
//! A skipped directory is still descended into. Strictly sequential.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::errors::BulkRenameError;
use crate::fs_ops::{apply_plan, list_children, list_subdirs};
use crate::shutdown;

use super::editor::Editor;
use super::prompt::Prompter;
use super::session::{RefactorSession, SessionOutcome};
use super::RenamePlan;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Report every old -> new pair.
    pub verbose: bool,
    /// Report only; never touch the filesystem.
    pub dry_run: bool,
}

/// Totals for a finished walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub directories: usize,
    pub skipped: usize,
    /// Renames performed (or, in dry-run, that would have been performed).
    pub renamed: usize,
}

/// Write the `Directory:` block for a plan: right-aligned old names, then new names.
pub fn write_report<W: Write + ?Sized>(w: &mut W, plan: &RenamePlan) -> io::Result<()> {
    if plan.is_empty() {
        return Ok(());
    }
    writeln!(w, "Directory: {}", plan.dir().display())?;
    let name = |p: &Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    };
    let pairs: Vec<(String, String)> = plan
        .renames()
        .iter()
        .map(|r| (name(&r.from), name(&r.to)))
        .collect();
    let width = pairs
        .iter()
        .map(|(old, _)| old.chars().count())
        .max()
        .unwrap_or(0);
    for (old, new) in &pairs {
        writeln!(w, "{old:>width$} -> {new}")?;
    }
    writeln!(w)
}

type Predicate<'a> = Box<dyn Fn(&Path) -> bool + 'a>;

pub struct Walker<'a, E, P> {
    session: RefactorSession<E, P>,
    include: Predicate<'a>,
    recurse: Predicate<'a>,
    options: WalkOptions,
    report: Box<dyn Write + 'a>,
}

impl<'a, E: Editor, P: Prompter> Walker<'a, E, P> {
    /// `include` picks the entries listed for renaming; `recurse` picks the
    /// subdirectories to descend into. Reports go to stdout.
    pub fn new(
        session: RefactorSession<E, P>,
        include: impl Fn(&Path) -> bool + 'a,
        recurse: impl Fn(&Path) -> bool + 'a,
    ) -> Self {
        Self {
            session,
            include: Box::new(include),
            recurse: Box::new(recurse),
            options: WalkOptions::default(),
            report: Box::new(io::stdout()),
        }
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_report(mut self, report: impl Write + 'a) -> Self {
        self.report = Box::new(report);
        self
    }

    /// Walk from `root`. Stops at the first fatal error (user exit, interrupt,
    /// failed rename).
    pub fn walk(&mut self, root: &Path) -> Result<WalkSummary> {
        let mut summary = WalkSummary::default();
        self.visit(root, &mut summary)?;
        info!(
            directories = summary.directories,
            skipped = summary.skipped,
            renamed = summary.renamed,
            dry_run = self.options.dry_run,
            "Walk finished"
        );
        Ok(summary)
    }

    fn visit(&mut self, dir: &Path, summary: &mut WalkSummary) -> Result<()> {
        if shutdown::is_requested() {
            return Err(BulkRenameError::Interrupted.into());
        }
        summary.directories += 1;

        let include = &self.include;
        let originals = list_children(dir, |p| include(p))?;
        debug!(dir = %dir.display(), entries = originals.len(), "visiting directory");

        match self.session.run(dir, &originals)? {
            SessionOutcome::Planned(plan) => self.finish(&plan, summary)?,
            SessionOutcome::Skipped(reason) => {
                info!(dir = %dir.display(), %reason, "Directory skipped");
                summary.skipped += 1;
            }
        }

        let recurse = &self.recurse;
        for sub in list_subdirs(dir, |p| recurse(p))? {
            self.visit(&sub, summary)?;
        }
        Ok(())
    }

    fn finish(&mut self, plan: &RenamePlan, summary: &mut WalkSummary) -> Result<()> {
        if self.options.verbose || self.options.dry_run {
            write_report(&mut self.report, plan)
                .and_then(|()| self.report.flush())
                .context("write rename report")?;
        }
        if self.options.dry_run {
            summary.renamed += plan.changed().count();
            return Ok(());
        }
        let applied = apply_plan(plan)?;
        summary.renamed += applied.len();
        Ok(())
    }
}
