use anyhow::Result;
use assert_fs::prelude::*;
use bulk_rename::{
    BulkRenameError, Choice, EditOutcome, Editor, EntryKinds, Prompter, RecurseKinds, RefactorSession,
    WalkOptions, WalkSummary, Walker,
};
use std::collections::HashMap;
use std::io;

/// Renames by lookup table; names not in the table are kept.
struct TableEditor {
    table: HashMap<&'static str, &'static str>,
    rounds: usize,
}

impl TableEditor {
    fn new(pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            table: pairs.iter().copied().collect(),
            rounds: 0,
        }
    }
}

impl Editor for TableEditor {
    fn edit(&mut self, initial: &str) -> Result<EditOutcome> {
        self.rounds += 1;
        let mut lines = initial.lines();
        let mut out = format!("{}\n", lines.next().unwrap_or_default());
        for name in lines {
            out.push_str(self.table.get(name).copied().unwrap_or(name));
            out.push('\n');
        }
        Ok(EditOutcome::Saved(out))
    }
}

/// Answers every prompt with the same choice and counts the prompts.
struct Answer(Choice, usize);

impl Prompter for Answer {
    fn choose(&mut self, _question: &str) -> Result<Choice> {
        self.1 += 1;
        Ok(self.0)
    }
}

fn files_walker<'a>(
    editor: TableEditor,
    choice: Choice,
    recurse: RecurseKinds,
) -> Walker<'a, TableEditor, Answer> {
    let kinds = EntryKinds::files_only();
    Walker::new(
        RefactorSession::new(editor, Answer(choice, 0)),
        move |p| kinds.includes(p),
        move |p| recurse.recurses(p),
    )
    .with_report(io::sink())
}

#[test]
fn swapping_two_names_exchanges_contents() {
    let root = assert_fs::TempDir::new().unwrap();
    root.child("a").write_str("first").unwrap();
    root.child("b").write_str("second").unwrap();

    let mut walker = files_walker(
        TableEditor::new(&[("a", "b"), ("b", "a")]),
        Choice::Exit,
        RecurseKinds::default(),
    );
    let summary = walker.walk(root.path()).unwrap();

    assert_eq!(summary, WalkSummary { directories: 1, skipped: 0, renamed: 2 });
    root.child("a").assert("second");
    root.child("b").assert("first");
}

#[test]
fn rotation_of_three_names() {
    let root = assert_fs::TempDir::new().unwrap();
    root.child("x").write_str("x").unwrap();
    root.child("y").write_str("y").unwrap();
    root.child("z").write_str("z").unwrap();

    let mut walker = files_walker(
        TableEditor::new(&[("x", "y"), ("y", "z"), ("z", "x")]),
        Choice::Exit,
        RecurseKinds::default(),
    );
    walker.walk(root.path()).unwrap();

    root.child("y").assert("x");
    root.child("z").assert("y");
    root.child("x").assert("z");
}

#[test]
fn collision_with_unlisted_directory_is_skipped_on_continue() {
    let root = assert_fs::TempDir::new().unwrap();
    root.child("a.txt").write_str("a").unwrap();
    root.child("taken").create_dir_all().unwrap();

    let mut walker = files_walker(
        TableEditor::new(&[("a.txt", "taken")]),
        Choice::Continue,
        RecurseKinds::default(),
    );
    let summary = walker.walk(root.path()).unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.renamed, 0);
    root.child("a.txt").assert("a");
}

#[test]
fn collision_with_exit_aborts() {
    let root = assert_fs::TempDir::new().unwrap();
    root.child("a.txt").write_str("a").unwrap();
    root.child("taken").create_dir_all().unwrap();

    let mut walker = files_walker(
        TableEditor::new(&[("a.txt", "taken")]),
        Choice::Exit,
        RecurseKinds::default(),
    );
    let err = walker.walk(root.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BulkRenameError>(),
        Some(BulkRenameError::UserAborted)
    ));
    root.child("a.txt").assert("a");
}

#[test]
fn empty_directory_produces_empty_plan() {
    let root = assert_fs::TempDir::new().unwrap();
    let mut walker = files_walker(TableEditor::new(&[]), Choice::Exit, RecurseKinds::default());

    let summary = walker.walk(root.path()).unwrap();
    assert_eq!(summary, WalkSummary { directories: 1, skipped: 0, renamed: 0 });
}

#[test]
fn dot_directories_need_their_own_flag() {
    let root = assert_fs::TempDir::new().unwrap();
    root.child("sub/a.txt").write_str("a").unwrap();
    root.child(".git/a.txt").write_str("g").unwrap();

    let table = [("a.txt", "b.txt")];

    let mut plain = files_walker(
        TableEditor::new(&table),
        Choice::Exit,
        RecurseKinds { dirs: true, dot_dirs: false },
    );
    plain.walk(root.path()).unwrap();
    root.child("sub/b.txt").assert("a");
    root.child(".git/a.txt").assert("g");

    let mut dotted = files_walker(
        TableEditor::new(&table),
        Choice::Exit,
        RecurseKinds { dirs: false, dot_dirs: true },
    );
    dotted.walk(root.path()).unwrap();
    root.child(".git/b.txt").assert("g");
}

#[test]
fn dry_run_counts_changed_entries_only() {
    let root = assert_fs::TempDir::new().unwrap();
    root.child("a").write_str("a").unwrap();
    root.child("b").write_str("b").unwrap();

    let mut walker = files_walker(TableEditor::new(&[("a", "c")]), Choice::Exit, RecurseKinds::default())
        .with_options(WalkOptions { verbose: false, dry_run: true });
    let summary = walker.walk(root.path()).unwrap();

    assert_eq!(summary.renamed, 1);
    root.child("a").assert("a");
    assert!(!root.child("c").path().exists());
}
