//! Notes page controller.
//!
//! `NotesPage` plays the page loader: it fetches the initial list before the
//! editor exists, runs the effects the editor emits against a [`NoteStore`],
//! and reloads the whole list after every successful mutation so the table
//! never shows stale local state.

use std::collections::VecDeque;

use crate::api::{NoteStore, TransportResult};
use crate::config::ClientConfig;
use crate::editor::{Effect, EditorEvent, EditorState, Notification, ValidationPolicy};
use crate::error::{Error, Result};
use crate::models::{Note, NoteField, NoteId};
use crate::table::{NoteTable, DEFAULT_ROWS_PER_PAGE};

/// View settings applied when the page is first loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub rows_per_page: usize,
    pub validation: ValidationPolicy,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            validation: ValidationPolicy::default(),
        }
    }
}

impl From<&ClientConfig> for PageOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            rows_per_page: config.rows_per_page,
            validation: config.validation,
        }
    }
}

pub struct NotesPage<S> {
    store: S,
    table: NoteTable,
    editor: EditorState,
    notifications: Vec<Notification>,
}

impl<S: NoteStore> NotesPage<S> {
    /// Fetch the initial list and build the page around it.
    pub async fn load(store: S, options: PageOptions) -> Result<Self> {
        let records = store.list().await?;
        tracing::debug!("Loaded {} notes", records.len());
        let table = NoteTable::with_rows_per_page(records, options.rows_per_page)?;
        Ok(Self {
            store,
            table,
            editor: EditorState::new(options.validation),
            notifications: Vec::new(),
        })
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn table(&self) -> &NoteTable {
        &self.table
    }

    /// Filter, sort and paging controls. Records can only change via reload.
    pub fn table_mut(&mut self) -> &mut NoteTable {
        &mut self.table
    }

    pub const fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Hand queued notifications to the UI, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Re-fetch the authoritative list. On failure the old records stay.
    pub async fn reload(&mut self) -> Result<()> {
        let records = self.store.list().await.map_err(|error| {
            tracing::warn!("Reloading notes failed: {error}");
            error
        })?;
        tracing::debug!("Reloaded {} notes", records.len());
        self.table.replace_records(records);
        Ok(())
    }

    /// Feed one event to the editor and run everything it asks for.
    ///
    /// A failed mutation is returned as an error after the editor has been
    /// told, so the dialog is still open when this returns.
    pub async fn dispatch(&mut self, event: EditorEvent) -> Result<()> {
        let mut pending: VecDeque<Effect> = self.editor.apply(event).into();

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::Create(note) => {
                    let outcome = self.store.create(&note).await;
                    pending.extend(self.settle("Create", outcome)?);
                }
                Effect::Update(note) => {
                    let outcome = self.store.update(&note).await;
                    pending.extend(self.settle("Update", outcome)?);
                }
                Effect::Delete(id) => {
                    let outcome = self.store.delete(&id).await;
                    pending.extend(self.settle("Delete", outcome)?);
                }
                Effect::Notify(notification) => self.notifications.push(notification),
                Effect::Reload => self.reload().await?,
            }
        }

        Ok(())
    }

    pub async fn open_new(&mut self) -> Result<()> {
        self.dispatch(EditorEvent::OpenNew).await
    }

    pub async fn edit_row(&mut self, id: &NoteId) -> Result<()> {
        let note = self.row(id)?;
        self.dispatch(EditorEvent::EditRow(note)).await
    }

    pub async fn confirm_delete(&mut self, id: &NoteId) -> Result<()> {
        let note = self.row(id)?;
        self.dispatch(EditorEvent::ConfirmDelete(note)).await
    }

    pub async fn set_field(&mut self, field: NoteField, value: impl Into<String>) -> Result<()> {
        self.dispatch(EditorEvent::FieldChanged {
            field,
            value: value.into(),
        })
        .await
    }

    pub async fn save(&mut self) -> Result<()> {
        self.dispatch(EditorEvent::Save).await
    }

    pub async fn cancel(&mut self) -> Result<()> {
        self.dispatch(EditorEvent::Cancel).await
    }

    pub async fn accept_delete(&mut self) -> Result<()> {
        self.dispatch(EditorEvent::AcceptDelete).await
    }

    pub async fn decline_delete(&mut self) -> Result<()> {
        self.dispatch(EditorEvent::DeclineDelete).await
    }

    fn row(&self, id: &NoteId) -> Result<Note> {
        self.table
            .find(id)
            .cloned()
            .ok_or_else(|| Error::InvalidInput(format!("Note not found: {id}")))
    }

    fn settle(&mut self, action: &str, outcome: TransportResult<()>) -> Result<Vec<Effect>> {
        match outcome {
            Ok(()) => {
                tracing::info!("{action} note succeeded");
                Ok(self.editor.apply(EditorEvent::MutationSucceeded))
            }
            Err(error) => {
                tracing::warn!("{action} note failed: {error}");
                self.editor.apply(EditorEvent::MutationFailed);
                Err(error.into())
            }
        }
    }
}
