//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the interrupt handler,
//! checks the root path and walks the tree with the interactive editor and prompt.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use bulk_rename::cli::Args;
use bulk_rename::config::{CONFIG_ENV, config_path, load_config};
use bulk_rename::output as out;
use bulk_rename::rename::resolve_editor_command;
use bulk_rename::{
    BulkRenameError, Config, ExternalEditor, RefactorSession, TerminalPrompter, WalkOptions, Walker, check_root,
    default_log_path, shutdown,
};

use crate::logging::init_tracing;

/// Run the CLI application.
///
/// Every failure is reported here (logged once tracing is up, printed before
/// that); the caller only maps it to an exit status.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        match config_path() {
            Some((p, true)) => {
                out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}\n", p.display()));
            }
            Some((p, false)) => {
                out::print_info(&format!("Default bulkrename config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file exists at that location.");
                } else {
                    out::print_info("No config file exists there yet; defaults are used.");
                }
            }
            None => out::print_error("Could not determine a default config path"),
        }
        if let Some(log) = default_log_path() {
            out::print_info(&format!("Suggested <log_file> location:\n  {}", log.display()));
        }
        return Ok(());
    }

    // Config file first, then CLI overrides (CLI wins).
    let mut cfg: Config = load_config()
        .inspect_err(|e| out::print_error(&format!("{e:#}")))?
        .unwrap_or_default();
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard is dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping before the next directory...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .inspect_err(|e| out::print_error(&format!("Failed to install interrupt handler: {e}")))?;
    }

    debug!("Starting bulkrename: {:?}", args);

    let result = walk(&args, &cfg);
    if let Err(e) = &result {
        log_failure(e);
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn walk(args: &Args, cfg: &Config) -> Result<()> {
    check_root(&args.path)?;
    let root = dunce::canonicalize(&args.path).unwrap_or_else(|_| args.path.clone());

    let editor = ExternalEditor::new(resolve_editor_command(cfg.editor.as_deref()));
    debug!(editor = editor.command(), "editor selected");
    let session = RefactorSession::new(editor, TerminalPrompter::stdio());

    let kinds = args.entry_kinds();
    let recurse = args.recurse_kinds();
    debug!(?kinds, recursive = recurse.is_enabled(), dry_run = cfg.dry_run, "walk settings");
    let mut walker = Walker::new(session, move |p| kinds.includes(p), move |p| recurse.recurses(p))
        .with_options(WalkOptions {
            verbose: cfg.verbose,
            dry_run: cfg.dry_run,
        });

    let summary = walker.walk(&root)?;
    info!(root = %root.display(), ?summary, "Run completed");

    if cfg.dry_run {
        out::print_info(&format!(
            "Dry-run: {} rename(s) in {} director{} would be performed",
            summary.renamed,
            summary.directories,
            if summary.directories == 1 { "y" } else { "ies" }
        ));
    } else if cfg.verbose {
        out::print_success(&format!(
            "Renamed {} entr{} ({} director{} skipped)",
            summary.renamed,
            if summary.renamed == 1 { "y" } else { "ies" },
            summary.skipped,
            if summary.skipped == 1 { "y" } else { "ies" }
        ));
    }
    Ok(())
}

fn log_failure(e: &anyhow::Error) {
    let Some(br) = e.downcast_ref::<BulkRenameError>() else {
        error!(error = %format!("{e:#}"), "Run failed");
        return;
    };
    let code = br.code();
    match br {
        BulkRenameError::UserAborted => error!(code, kind = "user_aborted", "Run aborted by user"),
        BulkRenameError::Interrupted => error!(code, kind = "interrupted", "Run interrupted"),
        BulkRenameError::PathNotFound(path) => {
            error!(code, kind = "path_not_found", path = %path.display(), "Root path does not exist")
        }
        BulkRenameError::NotADirectory(path) => {
            error!(code, kind = "not_a_directory", path = %path.display(), "Root path is not a directory")
        }
        BulkRenameError::PartialApply {
            dir,
            applied,
            failed,
            stranded,
            source,
        } => {
            error!(
                code,
                kind = "partial_apply",
                dir = %dir.display(),
                completed = applied.len(),
                failed_from = %failed.from.display(),
                failed_to = %failed.to.display(),
                stranded = stranded.len(),
                error = %source,
                "Rename failed partway through directory"
            );
            if applied.is_empty() {
                out::print_warn(&format!("No entries in {} were renamed.", dir.display()));
            } else {
                out::print_warn(&format!("These renames in {} completed before the failure:", dir.display()));
                for r in applied {
                    out::print_warn(&format!("  {} -> {}", r.from.display(), r.to.display()));
                }
            }
            if !stranded.is_empty() {
                out::print_warn("These entries could not be moved back and kept a temporary name:");
                for (staging, original) in stranded {
                    out::print_warn(&format!("  {} (was {})", staging.display(), original.display()));
                }
            }
        }
    }
}
