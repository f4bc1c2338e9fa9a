//! todo - command-line client for a remote to-do notes list
//!
//! Lists, creates, edits and deletes notes through the same editing flow as
//! the notes page: every change goes to the server and the list is reloaded.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::resolve_config;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::{run_list, ListOptions};
use crate::commands::shell::run_shell;
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    // Only load .env in development builds.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_cli=warn,todo_core=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.api_url.as_deref(), cli.strict)?;
    tracing::debug!("Resolved config: {config:?}");

    match cli.command {
        Some(Commands::Add { content, status }) => {
            run_add(&content, status.as_deref(), &config).await?;
        }
        Some(Commands::List {
            filter,
            sort,
            desc,
            rows,
            page,
            json,
        }) => {
            let options = ListOptions {
                filter,
                sort: sort.map(Into::into),
                descending: desc,
                rows,
                page,
                as_json: json,
            };
            run_list(options, &config).await?;
        }
        Some(Commands::Edit {
            id,
            content,
            status,
        }) => run_edit(&id, content.as_deref(), status.as_deref(), &config).await?,
        Some(Commands::Delete { id, yes }) => run_delete(&id, yes, &config).await?,
        Some(Commands::Shell) => run_shell(&config).await?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            // Quick capture mode: todo "buy milk"
            if cli.note.is_empty() {
                Cli::command().print_help()?;
                println!();
            } else {
                run_add(&cli.note, None, &config).await?;
            }
        }
    }

    Ok(())
}
