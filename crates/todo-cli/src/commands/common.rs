use std::io::{self, BufRead, IsTerminal, Write};

use todo_core::api::{NoteStore, NotesApiClient};
use todo_core::config::ClientConfig;
use todo_core::editor::{EditorMode, ValidationPolicy};
use todo_core::page::{NotesPage, PageOptions};
use todo_core::table::{Column, NoteTable};
use todo_core::{Note, NoteId};

use crate::error::CliError;

const ID_WIDTH: usize = 8;
const CONTENT_WIDTH: usize = 40;
const STATUS_WIDTH: usize = 12;

/// Build client config from the environment, then apply CLI overrides.
pub fn resolve_config(api_url: Option<&str>, strict: bool) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = api_url {
        config = config.with_api_base_url(url)?;
    }
    if strict {
        config.validation = ValidationPolicy::Blocking;
    }
    Ok(config)
}

pub async fn open_page(config: &ClientConfig) -> Result<NotesPage<NotesApiClient>, CliError> {
    let client = NotesApiClient::new(config.api_base_url.as_str())?;
    tracing::debug!("Using notes API at {}", client.base_url());
    Ok(NotesPage::load(client, PageOptions::from(config)).await?)
}

pub fn parse_note_id(raw: &str) -> Result<NoteId, CliError> {
    Ok(raw.parse::<NoteId>()?)
}

/// Press Save in the note dialog and report what happened.
///
/// Returns `ContentRequired` when the strict policy kept the dialog open.
pub async fn save_note_dialog<S: NoteStore>(
    page: &mut NotesPage<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let result = page.save().await;
    print_notifications(page, out)?;
    if let Some(message) = page.editor().validation_message() {
        writeln!(out, "{message}")?;
    }
    result?;

    if page.editor().mode() == EditorMode::Editing {
        return Err(CliError::ContentRequired);
    }
    Ok(())
}

pub fn print_notifications<S: NoteStore>(
    page: &mut NotesPage<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for notification in page.drain_notifications() {
        writeln!(out, "{}: {}", notification.summary, notification.detail)?;
    }
    Ok(())
}

pub fn format_table_lines(table: &NoteTable) -> Vec<String> {
    let mut lines = vec![format_row(
        "ID",
        Column::Content.header(),
        Column::Status.header(),
        Column::CreatedDate.header(),
    )];

    lines.extend(table.visible_rows().into_iter().map(|note| {
        let id = note.id.as_ref().map(ToString::to_string).unwrap_or_default();
        format_row(
            &id,
            &note.preview(CONTENT_WIDTH),
            &truncate(&note.status, STATUS_WIDTH),
            &note.created_date,
        )
    }));

    let mut footer = table.page_report().to_string();
    if table.page_count() > 1 {
        footer.push_str(&format!(
            "  (page {}/{})",
            table.page() + 1,
            table.page_count()
        ));
    }
    lines.push(footer);
    lines
}

pub fn format_note_details(note: &Note) -> Vec<String> {
    let id = note
        .id
        .as_ref()
        .map_or_else(|| "(new)".to_string(), ToString::to_string);
    let mut lines = vec![
        format!("ID:      {id}"),
        format!("Content: {}", note.content),
        format!("Status:  {}", note.status),
    ];
    if !note.created_date.is_empty() {
        lines.push(format!("Created: {}", note.created_date));
    }
    lines
}

/// Ask a yes/no question on an interactive terminal. Anything but yes is no.
pub fn confirm(prompt: &str) -> Result<bool, CliError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(false);
    }

    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn format_row(id: &str, content: &str, status: &str, created: &str) -> String {
    format!("{id:<ID_WIDTH$}  {content:<CONTENT_WIDTH$}  {status:<STATUS_WIDTH$}  {created}")
        .trim_end()
        .to_string()
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let mut truncated = value
            .chars()
            .take(max_chars.saturating_sub(3))
            .collect::<String>();
        truncated.push_str("...");
        truncated
    }
}
