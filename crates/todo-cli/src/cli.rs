use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use todo_core::table::Column;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Manage a remote to-do notes list from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Notes API base URL (overrides TODO_NOTES_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Refuse to send a note with empty content
    #[arg(long, global = true)]
    pub strict: bool,

    /// Quick capture: todo "buy milk"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note content
        content: Vec<String>,
        /// Note status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show one page of the notes table
    #[command(alias = "ls")]
    List {
        /// Only show notes containing this text in any column
        #[arg(short, long)]
        filter: Option<String>,
        /// Column to sort by
        #[arg(long, value_enum)]
        sort: Option<SortColumn>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Rows per page (5, 10 or 25)
        #[arg(short, long)]
        rows: Option<usize>,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Output the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing note
    Edit {
        /// Note ID
        id: String,
        /// New content
        #[arg(short, long)]
        content: Option<String>,
        /// New status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Delete an existing note
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactive session with the notes table and dialogs
    Shell,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortColumn {
    Content,
    Status,
    CreatedDate,
}

impl From<SortColumn> for Column {
    fn from(value: SortColumn) -> Self {
        match value {
            SortColumn::Content => Self::Content,
            SortColumn::Status => Self::Status,
            SortColumn::CreatedDate => Self::CreatedDate,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
