use std::io;

use todo_core::config::ClientConfig;
use todo_core::NoteField;

use crate::commands::common::{open_page, save_note_dialog};
use crate::error::CliError;

pub async fn run_add(
    content_parts: &[String],
    status: Option<&str>,
    config: &ClientConfig,
) -> Result<(), CliError> {
    let mut page = open_page(config).await?;

    page.open_new().await?;
    page.set_field(NoteField::Content, content_parts.join(" ").trim())
        .await?;
    if let Some(status) = status {
        page.set_field(NoteField::Status, status.trim()).await?;
    }

    save_note_dialog(&mut page, &mut io::stdout()).await
}
