//! Note model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Identifier assigned to a note by the remote resource.
///
/// The server decides the representation, so both JSON numbers and JSON
/// strings are accepted and written back in the form they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl FromStr for NoteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Note ID cannot be empty".to_string()));
        }
        Ok(trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Number))
    }
}

impl NoteId {
    /// Whether both ids address the same note. `5` and `"5"` do, since the
    /// server may send either and user input always parses as a number.
    pub fn same_note(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// A to-do note as stored by the remote resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-assigned identifier, `None` until the note is created
    #[serde(default)]
    pub id: Option<NoteId>,
    /// Free text content, required for a save
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    /// Free text status
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    /// Creation timestamp as formatted by the server
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_date: String,
}

impl Note {
    /// The blank note used while no record is being edited.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the server has assigned this note an id
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Whether the note has any content at all.
    ///
    /// Whitespace counts as content, matching what the server accepts.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Read an editable field
    #[must_use]
    pub fn field(&self, field: NoteField) -> &str {
        match field {
            NoteField::Content => &self.content,
            NoteField::Status => &self.status,
        }
    }

    /// Return a copy of this note with one editable field replaced
    #[must_use]
    pub fn with_field(&self, field: NoteField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        match field {
            NoteField::Content => next.content = value.into(),
            NoteField::Status => next.status = value.into(),
        }
        next
    }

    /// Get first line of content, truncated to `max_chars` characters
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self.content.lines().next().unwrap_or("").trim();
        let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.chars().count() <= max_chars {
            collapsed
        } else {
            let take_len = max_chars.saturating_sub(3);
            let mut truncated = collapsed.chars().take(take_len).collect::<String>();
            truncated.push_str("...");
            truncated
        }
    }
}

/// Note fields a user can change from the note dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteField {
    Content,
    Status,
}

impl NoteField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content" => Ok(Self::Content),
            "status" => Ok(Self::Status),
            other => Err(Error::InvalidInput(format!(
                "unknown note field '{other}' (expected content or status)"
            ))),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
