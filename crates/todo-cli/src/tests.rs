use std::cell::RefCell;
use std::io::Cursor;

use clap::Parser;
use pretty_assertions::assert_eq;
use todo_core::api::{NoteStore, TransportResult};
use todo_core::editor::{EditorMode, ValidationPolicy};
use todo_core::page::{NotesPage, PageOptions};
use todo_core::table::{Column, NoteTable};
use todo_core::{Note, NoteField, NoteId, TransportError};

use crate::cli::{Cli, Commands, CompletionShell, SortColumn};
use crate::commands::common::{
    format_note_details, format_table_lines, is_yes, parse_note_id, save_note_dialog,
};
use crate::commands::completions::render_completions;
use crate::commands::shell::{parse_command, run_session, ShellCommand};
use crate::error::CliError;

#[derive(Default)]
struct FakeStore {
    notes: RefCell<Vec<Note>>,
    mutations: RefCell<Vec<String>>,
}

impl FakeStore {
    fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: RefCell::new(notes),
            mutations: RefCell::default(),
        }
    }

    fn mutations(&self) -> Vec<String> {
        self.mutations.borrow().clone()
    }
}

impl NoteStore for FakeStore {
    async fn list(&self) -> TransportResult<Vec<Note>> {
        Ok(self.notes.borrow().clone())
    }

    async fn create(&self, note: &Note) -> TransportResult<()> {
        self.mutations
            .borrow_mut()
            .push(format!("create {}", note.content));
        if note.content.is_empty() {
            return Err(TransportError::new("HTTP 400"));
        }
        let id = i64::try_from(self.notes.borrow().len()).unwrap_or(0) + 1;
        self.notes.borrow_mut().push(Note {
            id: Some(NoteId::Number(id)),
            created_date: "2024-05-01".to_string(),
            ..note.clone()
        });
        Ok(())
    }

    async fn update(&self, note: &Note) -> TransportResult<()> {
        let id = note.id.clone().ok_or_else(|| TransportError::new("no id"))?;
        self.mutations.borrow_mut().push(format!("update {id}"));
        for existing in self.notes.borrow_mut().iter_mut() {
            if existing.id.as_ref() == Some(&id) {
                *existing = note.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &NoteId) -> TransportResult<()> {
        self.mutations.borrow_mut().push(format!("delete {id}"));
        self.notes
            .borrow_mut()
            .retain(|note| note.id.as_ref() != Some(id));
        Ok(())
    }
}

fn note(id: i64, content: &str, status: &str) -> Note {
    Note {
        id: Some(NoteId::Number(id)),
        content: content.to_string(),
        status: status.to_string(),
        created_date: format!("2024-01-{id:02}"),
    }
}

async fn page_with(notes: Vec<Note>, validation: ValidationPolicy) -> NotesPage<FakeStore> {
    let options = PageOptions {
        validation,
        ..PageOptions::default()
    };
    NotesPage::load(FakeStore::with_notes(notes), options)
        .await
        .expect("initial load")
}

async fn run_script(page: &mut NotesPage<FakeStore>, script: &str) -> String {
    let mut output = Vec::new();
    run_session(page, Cursor::new(script.as_bytes()), &mut output)
        .await
        .expect("session should finish");
    String::from_utf8(output).expect("utf8 output")
}

#[test]
fn parse_note_id_rejects_blank() {
    assert_eq!(parse_note_id(" 7 ").unwrap(), NoteId::Number(7));
    assert!(matches!(parse_note_id("  "), Err(CliError::Core(_))));
}

#[test]
fn is_yes_accepts_short_and_long_forms() {
    assert!(is_yes("y\n"));
    assert!(is_yes(" YES "));
    assert!(!is_yes(""));
    assert!(!is_yes("nope"));
}

#[test]
fn table_lines_include_header_rows_and_report() {
    let table = NoteTable::new(vec![note(1, "Buy milk", "OPEN"), note(2, "Call mom", "DONE")]);
    let lines = format_table_lines(&table);

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("ID"));
    assert!(lines[0].contains("Created Date"));
    assert!(lines[1].starts_with("1 "));
    assert!(lines[1].contains("Buy milk"));
    assert!(lines[2].contains("DONE"));
    assert_eq!(lines[3], "Showing 1 to 2 of 2 notes");
}

#[test]
fn table_lines_show_page_position_when_paged() {
    let notes = (1..=12).map(|id| note(id, "task", "OPEN")).collect();
    let mut table = NoteTable::with_rows_per_page(notes, 5).unwrap();
    table.next_page();

    let lines = format_table_lines(&table);
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Showing 6 to 10 of 12 notes  (page 2/3)")
    );
}

#[test]
fn note_details_mark_new_notes() {
    let lines = format_note_details(&Note::empty());
    assert_eq!(lines[0], "ID:      (new)");
    assert_eq!(lines.len(), 3);

    let lines = format_note_details(&note(4, "Pay rent", "OPEN"));
    assert_eq!(lines[0], "ID:      4");
    assert_eq!(lines[3], "Created: 2024-01-04");
}

#[test]
fn parse_command_depends_on_dialog() {
    assert_eq!(
        parse_command(EditorMode::Idle, "edit 3"),
        Ok(ShellCommand::Edit(NoteId::Number(3)))
    );
    assert_eq!(
        parse_command(EditorMode::Idle, "sort created-date"),
        Ok(ShellCommand::Sort(Column::CreatedDate))
    );
    assert_eq!(
        parse_command(EditorMode::Idle, "filter"),
        Ok(ShellCommand::Filter(String::new()))
    );
    assert!(parse_command(EditorMode::Idle, "save").is_err());
    assert!(parse_command(EditorMode::Idle, "rows many").is_err());

    assert_eq!(
        parse_command(EditorMode::Editing, "content  Buy oat milk "),
        Ok(ShellCommand::SetField(
            NoteField::Content,
            "Buy oat milk".to_string()
        ))
    );
    assert!(parse_command(EditorMode::Editing, "edit 3").is_err());

    assert_eq!(
        parse_command(EditorMode::ConfirmingDelete, "y"),
        Ok(ShellCommand::Yes)
    );
    assert_eq!(
        parse_command(EditorMode::ConfirmingDelete, "no"),
        Ok(ShellCommand::No)
    );
    assert_eq!(
        parse_command(EditorMode::ConfirmingDelete, "quit"),
        Ok(ShellCommand::Quit)
    );
}

#[tokio::test(flavor = "current_thread")]
async fn shell_creates_note_and_shows_reloaded_table() {
    let mut page = page_with(vec![note(1, "Buy milk", "OPEN")], ValidationPolicy::Advisory).await;

    let output = run_script(
        &mut page,
        "new\ncontent Call mom\nstatus OPEN\nsave\nquit\n",
    )
    .await;

    assert_eq!(page.store().mutations(), vec!["create Call mom"]);
    assert!(output.contains("Successful: Note Created"));
    assert!(output.contains("Showing 1 to 2 of 2 notes"));
    assert_eq!(page.editor().mode(), EditorMode::Idle);
}

#[tokio::test(flavor = "current_thread")]
async fn shell_cancel_sends_nothing() {
    let mut page = page_with(vec![note(1, "Buy milk", "OPEN")], ValidationPolicy::Advisory).await;

    run_script(&mut page, "new\ncontent draft\ncancel\n").await;

    assert!(page.store().mutations().is_empty());
    assert_eq!(page.table().records().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn shell_edit_updates_by_id() {
    let mut page = page_with(
        vec![note(1, "Buy milk", "OPEN"), note(2, "Call mom", "OPEN")],
        ValidationPolicy::Advisory,
    )
    .await;

    let output = run_script(&mut page, "edit 2\nstatus DONE\nsave\n").await;

    assert_eq!(page.store().mutations(), vec!["update 2"]);
    assert!(output.contains("Successful: Note Updated"));
    assert_eq!(page.table().records()[1].status, "DONE");
}

#[tokio::test(flavor = "current_thread")]
async fn shell_edit_reaches_notes_with_string_ids() {
    let stored = Note {
        id: Some(NoteId::Text("5".to_string())),
        ..note(5, "Buy milk", "OPEN")
    };
    let mut page = page_with(vec![stored], ValidationPolicy::Advisory).await;

    let output = run_script(&mut page, "edit 5\nstatus DONE\nsave\n").await;

    assert!(!output.contains("Note not found"));
    assert_eq!(page.store().mutations(), vec!["update 5"]);
    assert_eq!(
        page.table().records()[0].id,
        Some(NoteId::Text("5".to_string()))
    );
    assert_eq!(page.table().records()[0].status, "DONE");
}

#[tokio::test(flavor = "current_thread")]
async fn shell_delete_asks_before_deleting() {
    let mut page = page_with(
        vec![note(1, "Buy milk", "OPEN"), note(7, "Old task", "DONE")],
        ValidationPolicy::Advisory,
    )
    .await;

    let output = run_script(&mut page, "delete 7\nno\ndelete 7\nyes\n").await;

    assert!(output.contains("Are you sure you want to delete Old task?"));
    assert_eq!(page.store().mutations(), vec!["delete 7"]);
    assert!(output.contains("Successful: Note Deleted"));
    assert_eq!(page.table().records(), &[note(1, "Buy milk", "OPEN")]);
}

#[tokio::test(flavor = "current_thread")]
async fn shell_reports_failed_save_and_keeps_dialog_open() {
    let mut page = page_with(Vec::new(), ValidationPolicy::Advisory).await;

    let output = run_script(&mut page, "new\nsave\n").await;

    assert_eq!(page.store().mutations(), vec!["create "]);
    assert!(output.contains("Content is required."));
    assert!(output.contains("Error: Transport error: HTTP 400"));
    assert_eq!(page.editor().mode(), EditorMode::Editing);
}

#[tokio::test(flavor = "current_thread")]
async fn shell_strict_mode_blocks_empty_content() {
    let mut page = page_with(Vec::new(), ValidationPolicy::Blocking).await;

    let output = run_script(&mut page, "new\nsave\n").await;

    assert!(page.store().mutations().is_empty());
    assert!(output.contains("Content is required."));
    assert!(output.contains("Error: Note content is required"));
}

#[tokio::test(flavor = "current_thread")]
async fn shell_reports_unknown_rows_and_keeps_going() {
    let mut page = page_with(vec![note(1, "Buy milk", "OPEN")], ValidationPolicy::Advisory).await;

    let output = run_script(&mut page, "edit 9\nbogus\nrows 5\n").await;

    assert!(output.contains("Error: Invalid input: Note not found: 9"));
    assert!(output.contains("Unknown command 'bogus'"));
    assert_eq!(page.table().rows_per_page(), 5);
}

#[tokio::test(flavor = "current_thread")]
async fn save_dialog_succeeds_for_valid_note() {
    let mut page = page_with(Vec::new(), ValidationPolicy::Advisory).await;
    page.open_new().await.unwrap();
    page.set_field(NoteField::Content, "Write report")
        .await
        .unwrap();

    let mut output = Vec::new();
    save_note_dialog(&mut page, &mut output).await.unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Successful: Note Created\n"
    );
}

#[test]
fn cli_parses_list_options() {
    let cli = Cli::try_parse_from([
        "todo", "list", "--filter", "milk", "--sort", "created-date", "--desc", "--rows", "25",
        "--page", "2", "--json",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::List {
            filter,
            sort,
            desc,
            rows,
            page,
            json,
        }) => {
            assert_eq!(filter.as_deref(), Some("milk"));
            assert_eq!(sort, Some(SortColumn::CreatedDate));
            assert!(desc);
            assert_eq!(rows, Some(25));
            assert_eq!(page, 2);
            assert!(json);
        }
        _ => panic!("expected list command"),
    }
}

#[test]
fn cli_global_flags_work_after_subcommand() {
    let cli = Cli::try_parse_from([
        "todo",
        "delete",
        "7",
        "--yes",
        "--api-url",
        "http://localhost:8080/todo-list/api/v1",
        "--strict",
    ])
    .unwrap();

    assert!(cli.strict);
    assert_eq!(
        cli.api_url.as_deref(),
        Some("http://localhost:8080/todo-list/api/v1")
    );
    assert!(matches!(cli.command, Some(Commands::Delete { ref id, yes: true }) if id == "7"));
}

#[test]
fn completions_mention_binary_name() {
    for shell in [CompletionShell::Bash, CompletionShell::Zsh, CompletionShell::Fish] {
        let script = String::from_utf8(render_completions(shell)).unwrap();
        assert!(script.contains("todo"));
    }
}
