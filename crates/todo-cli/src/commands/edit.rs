use std::io;

use todo_core::config::ClientConfig;
use todo_core::NoteField;

use crate::commands::common::{open_page, parse_note_id, save_note_dialog};
use crate::error::CliError;

pub async fn run_edit(
    id: &str,
    content: Option<&str>,
    status: Option<&str>,
    config: &ClientConfig,
) -> Result<(), CliError> {
    if content.is_none() && status.is_none() {
        return Err(CliError::NothingToEdit);
    }
    let note_id = parse_note_id(id)?;
    let mut page = open_page(config).await?;

    page.edit_row(&note_id).await?;
    if let Some(content) = content {
        page.set_field(NoteField::Content, content).await?;
    }
    if let Some(status) = status {
        page.set_field(NoteField::Status, status).await?;
    }

    save_note_dialog(&mut page, &mut io::stdout()).await
}
