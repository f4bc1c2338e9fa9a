use std::io;

use todo_core::config::ClientConfig;

use crate::commands::common::{confirm, open_page, parse_note_id, print_notifications};
use crate::error::CliError;

pub async fn run_delete(id: &str, assume_yes: bool, config: &ClientConfig) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let mut page = open_page(config).await?;

    page.confirm_delete(&note_id).await?;
    let prompt = page.editor().delete_prompt().unwrap_or_default();

    if assume_yes || confirm(&prompt)? {
        page.accept_delete().await?;
        print_notifications(&mut page, &mut io::stdout())?;
    } else {
        page.decline_delete().await?;
        println!("Kept note {note_id}");
    }
    Ok(())
}
