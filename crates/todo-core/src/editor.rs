//! Record-editing state machine.
//!
//! [`EditorState`] owns the note being edited, the visibility of the note and
//! delete dialogs, and the `submitted` validation flag. [`EditorState::apply`]
//! is a pure transition: it updates the state and returns the side effects
//! the caller must run. Adapter outcomes come back in as
//! [`EditorEvent::MutationSucceeded`] or [`EditorEvent::MutationFailed`].
//!
//! A failed mutation leaves the dialog open with `submitted` still set and
//! produces no notification. Only successes are announced.

use std::time::Duration;

use crate::models::{Note, NoteField, NoteId};

const NOTIFICATION_LIFE: Duration = Duration::from_millis(3000);

/// Message shown under the content field when it is flagged invalid
pub const CONTENT_REQUIRED_MESSAGE: &str = "Content is required.";

/// Which dialog, if any, is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    Editing,
    ConfirmingDelete,
}

/// Whether empty content stops a save before it reaches the server.
///
/// `Advisory` only flags the field and still sends the request, which is how
/// the page has always behaved. `Blocking` keeps the dialog open instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    #[default]
    Advisory,
    Blocking,
}

/// A remote mutation the editor is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    const fn success_detail(self) -> &'static str {
        match self {
            Self::Create => "Note Created",
            Self::Update => "Note Updated",
            Self::Delete => "Note Deleted",
        }
    }
}

/// A toast-style message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub summary: &'static str,
    pub detail: &'static str,
    pub life: Duration,
}

impl Notification {
    const fn success(detail: &'static str) -> Self {
        Self {
            summary: "Successful",
            detail,
            life: NOTIFICATION_LIFE,
        }
    }
}

/// User gestures and adapter outcomes fed into the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// "New" pressed on the list
    OpenNew,
    /// "Edit" pressed on a row
    EditRow(Note),
    /// "Delete" pressed on a row
    ConfirmDelete(Note),
    /// A note dialog field changed
    FieldChanged { field: NoteField, value: String },
    /// "Cancel" in the note dialog
    Cancel,
    /// "Save" in the note dialog
    Save,
    /// "No" in the delete dialog
    DeclineDelete,
    /// "Yes" in the delete dialog
    AcceptDelete,
    /// The in-flight mutation completed
    MutationSucceeded,
    /// The in-flight mutation failed
    MutationFailed,
}

/// Work the editor asks its owner to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Create(Note),
    Update(Note),
    Delete(NoteId),
    Notify(Notification),
    /// Re-fetch the authoritative list
    Reload,
}

/// Dialog and form state for the notes page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    note_dialog: bool,
    delete_dialog: bool,
    current: Note,
    submitted: bool,
    in_flight: Option<Mutation>,
    policy: ValidationPolicy,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(ValidationPolicy::default())
    }
}

impl EditorState {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            note_dialog: false,
            delete_dialog: false,
            current: Note::empty(),
            submitted: false,
            in_flight: None,
            policy,
        }
    }

    pub const fn mode(&self) -> EditorMode {
        if self.note_dialog {
            EditorMode::Editing
        } else if self.delete_dialog {
            EditorMode::ConfirmingDelete
        } else {
            EditorMode::Idle
        }
    }

    pub const fn current_note(&self) -> &Note {
        &self.current
    }

    pub const fn submitted(&self) -> bool {
        self.submitted
    }

    pub const fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// The mutation currently awaiting its outcome, if any
    pub const fn in_flight(&self) -> Option<Mutation> {
        self.in_flight
    }

    /// Whether the content field should be displayed as invalid
    pub fn content_invalid(&self) -> bool {
        self.submitted && !self.current.has_content()
    }

    /// Inline message for the content field while the note dialog is open
    pub fn validation_message(&self) -> Option<&'static str> {
        (self.mode() == EditorMode::Editing && self.content_invalid())
            .then_some(CONTENT_REQUIRED_MESSAGE)
    }

    /// Confirmation text for the delete dialog, when it is open
    pub fn delete_prompt(&self) -> Option<String> {
        (self.mode() == EditorMode::ConfirmingDelete).then(|| {
            format!(
                "Are you sure you want to delete {}?",
                self.current.content
            )
        })
    }

    /// Apply one event and return the effects to run, in order.
    ///
    /// Events that make no sense in the current mode leave the state as is.
    pub fn apply(&mut self, event: EditorEvent) -> Vec<Effect> {
        let mode = self.mode();
        let busy = self.in_flight.is_some();

        match (mode, event) {
            (EditorMode::Idle, EditorEvent::OpenNew) => {
                self.current = Note::empty();
                self.submitted = false;
                self.note_dialog = true;
                Vec::new()
            }
            (EditorMode::Idle, EditorEvent::EditRow(note)) => {
                self.current = note;
                self.note_dialog = true;
                Vec::new()
            }
            (EditorMode::Idle, EditorEvent::ConfirmDelete(note)) => {
                self.current = note;
                self.delete_dialog = true;
                Vec::new()
            }
            (EditorMode::Editing, EditorEvent::FieldChanged { field, value }) if !busy => {
                self.current = self.current.with_field(field, value);
                Vec::new()
            }
            (EditorMode::Editing, EditorEvent::Cancel) if !busy => {
                self.submitted = false;
                self.note_dialog = false;
                Vec::new()
            }
            (EditorMode::Editing, EditorEvent::Save) if !busy => self.save(),
            (EditorMode::ConfirmingDelete, EditorEvent::DeclineDelete) if !busy => {
                self.delete_dialog = false;
                Vec::new()
            }
            (EditorMode::ConfirmingDelete, EditorEvent::AcceptDelete) if !busy => {
                let Some(id) = self.current.id.clone() else {
                    tracing::warn!("Cannot delete a note that has no id");
                    return Vec::new();
                };
                self.in_flight = Some(Mutation::Delete);
                vec![Effect::Delete(id)]
            }
            (_, EditorEvent::MutationSucceeded) => self.finish_success(),
            (_, EditorEvent::MutationFailed) => {
                if let Some(mutation) = self.in_flight.take() {
                    tracing::debug!("{mutation:?} failed; dialog stays open");
                }
                Vec::new()
            }
            (mode, event) => {
                tracing::debug!("Ignoring {event:?} while {mode:?} (busy: {busy})");
                Vec::new()
            }
        }
    }

    fn save(&mut self) -> Vec<Effect> {
        self.submitted = true;
        if self.policy == ValidationPolicy::Blocking && !self.current.has_content() {
            return Vec::new();
        }

        if self.current.is_persisted() {
            self.in_flight = Some(Mutation::Update);
            vec![Effect::Update(self.current.clone())]
        } else {
            self.in_flight = Some(Mutation::Create);
            vec![Effect::Create(self.current.clone())]
        }
    }

    fn finish_success(&mut self) -> Vec<Effect> {
        let Some(mutation) = self.in_flight.take() else {
            return Vec::new();
        };

        match mutation {
            Mutation::Create | Mutation::Update => self.note_dialog = false,
            Mutation::Delete => self.delete_dialog = false,
        }
        self.current = Note::empty();

        vec![
            Effect::Notify(Notification::success(mutation.success_detail())),
            Effect::Reload,
        ]
    }
}
