//! Interactive session: the notes table plus the note and delete dialogs,
//! driven one line at a time.

use std::io::{self, BufRead, Write};

use todo_core::api::NoteStore;
use todo_core::config::ClientConfig;
use todo_core::editor::EditorMode;
use todo_core::page::NotesPage;
use todo_core::table::Column;
use todo_core::{NoteField, NoteId};

use crate::commands::common::{
    format_note_details, format_table_lines, is_yes, open_page, print_notifications,
    save_note_dialog,
};
use crate::error::CliError;

const IDLE_HELP: &str = "\
Commands:
  list                 show the current page
  filter [TEXT]        filter rows (no text clears the filter)
  sort COLUMN          sort by content, status or created-date (again to flip)
  rows N               rows per page (5, 10 or 25)
  next | prev | first | last | page N
  new                  open the note dialog for a new note
  edit ID              open the note dialog for a note
  delete ID            ask to delete a note
  reload               fetch the list again
  quit";

const EDITING_HELP: &str = "\
Note dialog:
  content TEXT         set the content
  status TEXT          set the status
  show                 show the note being edited
  save | cancel";

const CONFIRM_HELP: &str = "Delete dialog: yes | no";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Show,
    Filter(String),
    Sort(Column),
    Rows(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    Page(usize),
    New,
    Edit(NoteId),
    Delete(NoteId),
    Reload,
    SetField(NoteField, String),
    Save,
    Cancel,
    Yes,
    No,
    Help,
    Quit,
}

pub async fn run_shell(config: &ClientConfig) -> Result<(), CliError> {
    let mut page = open_page(config).await?;
    let stdin = io::stdin();
    run_session(&mut page, stdin.lock(), &mut io::stdout()).await
}

pub async fn run_session<S: NoteStore>(
    page: &mut NotesPage<S>,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    write_lines(out, format_table_lines(page.table()))?;

    loop {
        write!(out, "{}", prompt(page.editor().mode()))?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(page.editor().mode(), line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => match execute(page, command, out).await {
                Ok(()) => {}
                Err(CliError::Io(error)) => return Err(error.into()),
                Err(error) => writeln!(out, "Error: {error}")?,
            },
            Err(message) => writeln!(out, "{message}")?,
        }
    }

    Ok(())
}

pub fn parse_command(mode: EditorMode, line: &str) -> Result<ShellCommand, String> {
    let (word, rest) = line
        .trim()
        .split_once(char::is_whitespace)
        .map_or((line.trim(), ""), |(word, rest)| (word, rest.trim()));
    let word = word.to_ascii_lowercase();

    match (word.as_str(), mode) {
        ("help" | "?", _) => Ok(ShellCommand::Help),
        ("quit" | "exit" | "q", _) => Ok(ShellCommand::Quit),
        ("show", _) => Ok(ShellCommand::Show),

        ("list" | "ls", EditorMode::Idle) => Ok(ShellCommand::Show),
        ("filter", EditorMode::Idle) => Ok(ShellCommand::Filter(rest.to_string())),
        ("sort", EditorMode::Idle) => rest
            .parse::<Column>()
            .map(ShellCommand::Sort)
            .map_err(|error| error.to_string()),
        ("rows", EditorMode::Idle) => parse_number(rest).map(ShellCommand::Rows),
        ("next" | "n", EditorMode::Idle) => Ok(ShellCommand::NextPage),
        ("prev" | "p", EditorMode::Idle) => Ok(ShellCommand::PreviousPage),
        ("first", EditorMode::Idle) => Ok(ShellCommand::FirstPage),
        ("last", EditorMode::Idle) => Ok(ShellCommand::LastPage),
        ("page", EditorMode::Idle) => parse_number(rest).map(ShellCommand::Page),
        ("new", EditorMode::Idle) => Ok(ShellCommand::New),
        ("edit", EditorMode::Idle) => parse_id(rest).map(ShellCommand::Edit),
        ("delete" | "rm", EditorMode::Idle) => parse_id(rest).map(ShellCommand::Delete),
        ("reload", EditorMode::Idle) => Ok(ShellCommand::Reload),

        ("content" | "status", EditorMode::Editing) => word
            .parse::<NoteField>()
            .map(|field| ShellCommand::SetField(field, rest.to_string()))
            .map_err(|error| error.to_string()),
        ("save", EditorMode::Editing) => Ok(ShellCommand::Save),
        ("cancel", EditorMode::Editing) => Ok(ShellCommand::Cancel),

        (answer, EditorMode::ConfirmingDelete) if is_yes(answer) => Ok(ShellCommand::Yes),
        ("n" | "no", EditorMode::ConfirmingDelete) => Ok(ShellCommand::No),

        (other, _) => Err(format!("Unknown command '{other}' (type help)")),
    }
}

async fn execute<S: NoteStore>(
    page: &mut NotesPage<S>,
    command: ShellCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        ShellCommand::Show => render(page, out)?,
        ShellCommand::Filter(filter) => {
            page.table_mut().set_filter(filter);
            render(page, out)?;
        }
        ShellCommand::Sort(column) => {
            page.table_mut().sort_by(column);
            render(page, out)?;
        }
        ShellCommand::Rows(rows) => {
            page.table_mut().set_rows_per_page(rows)?;
            render(page, out)?;
        }
        ShellCommand::NextPage => {
            page.table_mut().next_page();
            render(page, out)?;
        }
        ShellCommand::PreviousPage => {
            page.table_mut().previous_page();
            render(page, out)?;
        }
        ShellCommand::FirstPage => {
            page.table_mut().first_page();
            render(page, out)?;
        }
        ShellCommand::LastPage => {
            page.table_mut().last_page();
            render(page, out)?;
        }
        ShellCommand::Page(number) => {
            page.table_mut().go_to_page(number.saturating_sub(1));
            render(page, out)?;
        }
        ShellCommand::New => {
            page.open_new().await?;
            render(page, out)?;
        }
        ShellCommand::Edit(id) => {
            page.edit_row(&id).await?;
            render(page, out)?;
        }
        ShellCommand::Delete(id) => {
            page.confirm_delete(&id).await?;
            render(page, out)?;
        }
        ShellCommand::Reload => {
            page.reload().await?;
            render(page, out)?;
        }
        ShellCommand::SetField(field, value) => page.set_field(field, value).await?,
        ShellCommand::Save => {
            save_note_dialog(page, out).await?;
            render(page, out)?;
        }
        ShellCommand::Cancel => {
            page.cancel().await?;
            render(page, out)?;
        }
        ShellCommand::Yes => {
            page.accept_delete().await?;
            print_notifications(page, out)?;
            render(page, out)?;
        }
        ShellCommand::No => {
            page.decline_delete().await?;
            render(page, out)?;
        }
        ShellCommand::Help => writeln!(out, "{}", help(page.editor().mode()))?,
        // Handled by the session loop
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn render<S: NoteStore>(page: &NotesPage<S>, out: &mut impl Write) -> io::Result<()> {
    let editor = page.editor();
    match editor.mode() {
        EditorMode::Idle => write_lines(out, format_table_lines(page.table())),
        EditorMode::Editing => {
            writeln!(out, "Note Details")?;
            write_lines(out, format_note_details(editor.current_note()))?;
            if let Some(message) = editor.validation_message() {
                writeln!(out, "{message}")?;
            }
            Ok(())
        }
        EditorMode::ConfirmingDelete => {
            writeln!(out, "{}", editor.delete_prompt().unwrap_or_default())
        }
    }
}

fn write_lines(out: &mut impl Write, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

const fn prompt(mode: EditorMode) -> &'static str {
    match mode {
        EditorMode::Idle => "notes> ",
        EditorMode::Editing => "note> ",
        EditorMode::ConfirmingDelete => "delete? [yes/no] ",
    }
}

const fn help(mode: EditorMode) -> &'static str {
    match mode {
        EditorMode::Idle => IDLE_HELP,
        EditorMode::Editing => EDITING_HELP,
        EditorMode::ConfirmingDelete => CONFIRM_HELP,
    }
}

fn parse_number(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .map_err(|_| format!("Expected a number, got '{raw}'"))
}

fn parse_id(raw: &str) -> Result<NoteId, String> {
    raw.parse::<NoteId>().map_err(|error| error.to_string())
}
