//! Record store adapter for the remote notes resource.
//!
//! Translates list/create/update/delete intents into REST calls against
//! `{base}/notes` and collapses every failure into [`TransportError`].
//! Nothing here retries; the caller decides what a failure means.

use reqwest::header::ACCEPT;
use reqwest::RequestBuilder;
use serde::Serialize;

use crate::error::{Error, Result, TransportError};
use crate::models::{Note, NoteId};
use crate::util::{compact_text, normalize_base_url};

/// Result type for adapter calls
pub type TransportResult<T> = std::result::Result<T, TransportError>;

const NOTES_RESOURCE: &str = "notes";

/// Persistence operations the editor relies on.
///
/// Implementations only report success or failure; the authoritative state
/// is always re-read with [`NoteStore::list`].
#[allow(async_fn_in_trait)]
pub trait NoteStore {
    /// All notes currently on the server, in server order
    async fn list(&self) -> TransportResult<Vec<Note>>;

    /// Create a note; the server assigns id and creation date
    async fn create(&self, note: &Note) -> TransportResult<()>;

    /// Replace the note addressed by `note.id`
    async fn update(&self, note: &Note) -> TransportResult<()>;

    /// Delete the note addressed by `id`
    async fn delete(&self, id: &NoteId) -> TransportResult<()>;
}

/// Body sent on create. The server owns `id` and `createdDate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewNote<'a> {
    content: &'a str,
    status: &'a str,
}

/// HTTP implementation of [`NoteStore`]
#[derive(Debug, Clone)]
pub struct NotesApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl NotesApiClient {
    /// Builds a client for an API base URL such as
    /// `https://host/todo-list/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.into().as_str()).map_err(Error::Config)?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|error| Error::Config(format!("Failed to construct HTTP client: {error}")))?;
        Ok(Self { base_url, client })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{NOTES_RESOURCE}", self.base_url)
    }

    fn item_url(&self, id: &NoteId) -> String {
        format!(
            "{}/{NOTES_RESOURCE}/{}",
            self.base_url,
            urlencoding::encode(&id.to_string())
        )
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> TransportResult<reqwest::Response> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| TransportError::new(format!("{action} request failed: {error}")))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("{action} rejected with HTTP {status}");
            return Err(TransportError::new(format!(
                "{action} request failed with HTTP {status}: {}",
                compact_text(&body)
            )));
        }
        Ok(response)
    }
}

impl NoteStore for NotesApiClient {
    async fn list(&self) -> TransportResult<Vec<Note>> {
        tracing::debug!("GET {}", self.collection_url());
        let response = self
            .send(self.client.get(self.collection_url()), "List notes")
            .await?;
        response
            .json::<Vec<Note>>()
            .await
            .map_err(|error| TransportError::new(format!("Failed to parse note list: {error}")))
    }

    async fn create(&self, note: &Note) -> TransportResult<()> {
        tracing::debug!("POST {}", self.collection_url());
        let body = NewNote {
            content: &note.content,
            status: &note.status,
        };
        self.send(
            self.client.post(self.collection_url()).json(&body),
            "Create note",
        )
        .await?;
        Ok(())
    }

    async fn update(&self, note: &Note) -> TransportResult<()> {
        let Some(id) = note.id.as_ref() else {
            return Err(TransportError::new(
                "Update note request failed: note has no id",
            ));
        };
        let url = self.item_url(id);
        tracing::debug!("PUT {url}");
        self.send(self.client.put(url).json(note), "Update note")
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &NoteId) -> TransportResult<()> {
        let url = self.item_url(id);
        tracing::debug!("DELETE {url}");
        self.send(self.client.delete(url), "Delete note").await?;
        Ok(())
    }
}
