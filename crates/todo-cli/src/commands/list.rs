use todo_core::config::ClientConfig;
use todo_core::table::{Column, SortOrder, SortState};

use crate::commands::common::{format_table_lines, open_page};
use crate::error::CliError;

#[derive(Debug, Default)]
pub struct ListOptions {
    pub filter: Option<String>,
    pub sort: Option<Column>,
    pub descending: bool,
    pub rows: Option<usize>,
    /// 1-based
    pub page: usize,
    pub as_json: bool,
}

pub async fn run_list(options: ListOptions, config: &ClientConfig) -> Result<(), CliError> {
    let mut page = open_page(config).await?;
    let table = page.table_mut();

    if let Some(rows) = options.rows {
        table.set_rows_per_page(rows)?;
    }
    if let Some(filter) = options.filter {
        table.set_filter(filter);
    }
    table.set_sort(options.sort.map(|column| SortState {
        column,
        order: if options.descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        },
    }));
    table.go_to_page(options.page.saturating_sub(1));

    if options.as_json {
        println!("{}", serde_json::to_string_pretty(&table.visible_rows())?);
    } else {
        for line in format_table_lines(table) {
            println!("{line}");
        }
    }

    Ok(())
}
