//! Table view state for the notes list: global filter, column sort and
//! pagination.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::{Note, NoteId};

/// Page sizes offered by the rows-per-page selector
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// A sortable table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Content,
    Status,
    CreatedDate,
}

impl Column {
    pub const ALL: [Self; 3] = [Self::Content, Self::Status, Self::CreatedDate];

    pub const fn header(self) -> &'static str {
        match self {
            Self::Content => "Content",
            Self::Status => "Status",
            Self::CreatedDate => "Created Date",
        }
    }

    pub fn value(self, note: &Note) -> &str {
        match self {
            Self::Content => &note.content,
            Self::Status => &note.status,
            Self::CreatedDate => &note.created_date,
        }
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "content" => Ok(Self::Content),
            "status" => Ok(Self::Status),
            "createddate" | "created" => Ok(Self::CreatedDate),
            other => Err(Error::InvalidInput(format!("unknown column '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub order: SortOrder,
}

/// "Showing {first} to {last} of {total} notes", 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageReport {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl fmt::Display for PageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} notes",
            self.first, self.last, self.total
        )
    }
}

/// The note list as the user sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTable {
    records: Vec<Note>,
    filter: String,
    sort: Option<SortState>,
    rows_per_page: usize,
    page: usize,
}

impl NoteTable {
    pub fn new(records: Vec<Note>) -> Self {
        Self {
            records,
            filter: String::new(),
            sort: None,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            page: 0,
        }
    }

    pub fn with_rows_per_page(records: Vec<Note>, rows_per_page: usize) -> Result<Self> {
        let mut table = Self::new(records);
        table.set_rows_per_page(rows_per_page)?;
        Ok(table)
    }

    /// All records in server order, ignoring filter and paging
    pub fn records(&self) -> &[Note] {
        &self.records
    }

    /// Swap in a freshly loaded list, keeping filter, sort and page size.
    pub fn replace_records(&mut self, records: Vec<Note>) {
        self.records = records;
        self.page = self.page.min(self.page_count() - 1);
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.records
            .iter()
            .find(|note| note.id.as_ref().is_some_and(|note_id| note_id.same_note(id)))
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page = 0;
    }

    pub const fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    /// Sort by `column`, flipping the order when it is already the sort column.
    pub fn sort_by(&mut self, column: Column) {
        self.sort = Some(match self.sort {
            Some(current) if current.column == column => SortState {
                column,
                order: current.order.reversed(),
            },
            _ => SortState {
                column,
                order: SortOrder::Ascending,
            },
        });
    }

    pub const fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<()> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            return Err(Error::InvalidInput(format!(
                "rows per page must be one of {ROWS_PER_PAGE_OPTIONS:?}"
            )));
        }
        self.rows_per_page = rows_per_page;
        self.page = 0;
        Ok(())
    }

    /// Zero-based index of the current page
    pub const fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.total_records().div_ceil(self.rows_per_page).max(1)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self) {
        self.page = self.page_count() - 1;
    }

    /// Number of records that pass the filter
    pub fn total_records(&self) -> usize {
        self.matching().count()
    }

    /// Rows on the current page, filtered and sorted
    pub fn visible_rows(&self) -> Vec<&Note> {
        self.arranged()
            .into_iter()
            .skip(self.page * self.rows_per_page)
            .take(self.rows_per_page)
            .collect()
    }

    pub fn page_report(&self) -> PageReport {
        let total = self.total_records();
        if total == 0 {
            return PageReport {
                first: 0,
                last: 0,
                total,
            };
        }
        let offset = self.page * self.rows_per_page;
        PageReport {
            first: offset + 1,
            last: (offset + self.rows_per_page).min(total),
            total,
        }
    }

    fn matching(&self) -> impl Iterator<Item = &Note> + '_ {
        let query = self.filter.trim().to_lowercase();
        self.records
            .iter()
            .filter(move |note| note_matches_query(note, &query))
    }

    fn arranged(&self) -> Vec<&Note> {
        let mut rows = self.matching().collect::<Vec<_>>();
        if let Some(sort) = self.sort {
            rows.sort_by(|left, right| {
                let ordering = compare_values(sort.column.value(left), sort.column.value(right));
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }
}

fn note_matches_query(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    Column::ALL
        .iter()
        .any(|column| column.value(note).to_lowercase().contains(query))
}

fn compare_values(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
