//! Apply a validated rename plan.
//!
//! Two phases so that permutations of existing names (a <-> b) never clobber:
//!   1) move every changed entry to a unique hidden staging name,
//!   2) move each staged entry to its final name, in listing order.
//!
//! There is no rollback of completed final renames. If a step fails, entries
//! still sitting under a staging name are moved back to their original names
//! unless that name is now taken, and the error reports which renames
//! completed and which entries were left under a staging name.

use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::errors::BulkRenameError;
use crate::rename::{Rename, RenamePlan};

use super::atomic::rename_no_clobber;
use super::util::staging_path;

/// Rename every changed entry of `plan`; returns the renames that were performed.
pub fn apply_plan(plan: &RenamePlan) -> Result<Vec<Rename>, BulkRenameError> {
    let pending: Vec<&Rename> = plan.changed().collect();
    if pending.is_empty() {
        debug!(dir = %plan.dir().display(), "nothing to rename");
        return Ok(Vec::new());
    }

    let mut staged: Vec<(PathBuf, &Rename)> = Vec::with_capacity(pending.len());
    for (index, rename) in pending.iter().enumerate() {
        let staging = staging_path(plan.dir(), index);
        if let Err(source) = rename_no_clobber(&rename.from, &staging) {
            error!(from = %rename.from.display(), error = %source, "Failed to stage rename");
            let stranded = restore_staged(&staged);
            return Err(BulkRenameError::PartialApply {
                dir: plan.dir().to_path_buf(),
                applied: Vec::new(),
                failed: (*rename).clone(),
                stranded,
                source,
            });
        }
        debug!(from = %rename.from.display(), staging = %staging.display(), "staged");
        staged.push((staging, *rename));
    }

    let mut applied = Vec::with_capacity(staged.len());
    for (i, (staging, rename)) in staged.iter().enumerate() {
        if let Err(source) = rename_no_clobber(staging, &rename.to) {
            error!(
                from = %rename.from.display(),
                to = %rename.to.display(),
                completed = applied.len(),
                error = %source,
                "Rename failed partway through directory"
            );
            let stranded = restore_staged(&staged[i..]);
            return Err(BulkRenameError::PartialApply {
                dir: plan.dir().to_path_buf(),
                applied,
                failed: (*rename).clone(),
                stranded,
                source,
            });
        }
        info!(from = %rename.from.display(), to = %rename.to.display(), "Renamed");
        applied.push((*rename).clone());
    }

    Ok(applied)
}

/// Best-effort: move staged entries back to where they were listed.
///
/// A completed rename may already occupy an original name; such entries stay
/// under their staging name and are returned as `(staging, original)`.
fn restore_staged(staged: &[(PathBuf, &Rename)]) -> Vec<(PathBuf, PathBuf)> {
    let mut stranded = Vec::new();
    for (staging, rename) in staged {
        match rename_no_clobber(staging, &rename.from) {
            Ok(()) => debug!(path = %rename.from.display(), "restored staged entry"),
            Err(e) => {
                error!(
                    staging = %staging.display(),
                    original = %rename.from.display(),
                    error = %e,
                    "Could not restore staged entry; it remains under its staging name"
                );
                stranded.push((staging.clone(), rename.from.clone()));
            }
        }
    }
    stranded
}
