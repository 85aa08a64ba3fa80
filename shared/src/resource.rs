use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::{ApiProfile, NOTES_PROFILE, TODO_PROFILE};
use crate::dates::{schedule_input_value, Zone};
use crate::error::ApiError;
use crate::types::{Note, NoteBody, NotesEnvelope, RecordForm, Todo, TodoDraft, TodoUpdate};
use crate::validate::{validate_note, validate_todo};

/// A server-owned row of a collection.
pub trait Record: Clone + PartialEq + DeserializeOwned + 'static {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    /// Content of a note, description of a todo.
    fn body(&self) -> &str;
    fn created_at(&self) -> &DateTime<Utc>;
    fn updated_at(&self) -> &DateTime<Utc>;

    /// Completion flag, for collections that track one.
    fn completed(&self) -> Option<bool> {
        None
    }
}

impl Record for Note {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.content
    }

    fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }
}

impl Record for Todo {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    fn completed(&self) -> Option<bool> {
        Some(self.completed)
    }
}

/// Binds one application to its collection: record type, wire shapes and form rules.
pub trait Resource: 'static {
    type Item: Record;
    /// Envelope of the list response.
    type List: DeserializeOwned + Into<Vec<Self::Item>>;
    type Create: Serialize;
    type Update: Serialize;

    /// Singular noun used in messages ("note", "todo").
    const NOUN: &'static str;

    fn profile() -> &'static ApiProfile;

    /// Values that pre-fill the form; blank for a new record.
    fn form_values<Z: Zone + ?Sized>(record: Option<&Self::Item>, zone: &Z) -> RecordForm;

    fn validate_create<Z: Zone + ?Sized>(form: &RecordForm, now: &DateTime<Utc>, zone: &Z) -> Result<Self::Create, ApiError>;

    fn validate_update<Z: Zone + ?Sized>(
        record: &Self::Item,
        form: &RecordForm,
        now: &DateTime<Utc>,
        zone: &Z,
    ) -> Result<Self::Update, ApiError>;

    /// Update body that flips completion, for collections that have it.
    fn toggled(_record: &Self::Item) -> Option<Self::Update> {
        None
    }
}

pub struct Notes;

impl From<NotesEnvelope> for Vec<Note> {
    fn from(src: NotesEnvelope) -> Self {
        src.notes
    }
}

impl Resource for Notes {
    type Item = Note;
    type List = NotesEnvelope;
    type Create = NoteBody;
    type Update = NoteBody;

    const NOUN: &'static str = "note";

    fn profile() -> &'static ApiProfile {
        &NOTES_PROFILE
    }

    fn form_values<Z: Zone + ?Sized>(record: Option<&Note>, _zone: &Z) -> RecordForm {
        record.map(|note| RecordForm {
            title: note.title.clone(),
            body: note.content.clone(),
            ..RecordForm::default()
        }).unwrap_or_default()
    }

    fn validate_create<Z: Zone + ?Sized>(form: &RecordForm, _now: &DateTime<Utc>, _zone: &Z) -> Result<NoteBody, ApiError> {
        validate_note(form)
    }

    fn validate_update<Z: Zone + ?Sized>(_record: &Note, form: &RecordForm, _now: &DateTime<Utc>, _zone: &Z) -> Result<NoteBody, ApiError> {
        validate_note(form)
    }
}

pub struct Todos;

impl Resource for Todos {
    type Item = Todo;
    type List = Vec<Todo>;
    type Create = TodoDraft;
    type Update = TodoUpdate;

    const NOUN: &'static str = "todo";

    fn profile() -> &'static ApiProfile {
        &TODO_PROFILE
    }

    fn form_values<Z: Zone + ?Sized>(record: Option<&Todo>, zone: &Z) -> RecordForm {
        record.map(|todo| RecordForm {
            title: todo.title.clone(),
            body: todo.description.clone().unwrap_or_default(),
            schedule: todo.scheduled_for.map(|at| schedule_input_value(&at, zone)).unwrap_or_default(),
        }).unwrap_or_default()
    }

    fn validate_create<Z: Zone + ?Sized>(form: &RecordForm, now: &DateTime<Utc>, zone: &Z) -> Result<TodoDraft, ApiError> {
        validate_todo(form, None, now, zone)
    }

    fn validate_update<Z: Zone + ?Sized>(record: &Todo, form: &RecordForm, now: &DateTime<Utc>, zone: &Z) -> Result<TodoUpdate, ApiError> {
        let draft = validate_todo(form, record.scheduled_for, now, zone)?;
        Ok(TodoUpdate {
            title: draft.title,
            description: draft.description,
            completed: record.completed,
            scheduled_for: draft.scheduled_for,
        })
    }

    fn toggled(record: &Todo) -> Option<TodoUpdate> {
        let mut update = TodoUpdate::from(record);
        update.completed = !record.completed;
        Some(update)
    }
}
