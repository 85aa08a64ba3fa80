use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl From<AuthResponse> for Session {
    fn from(src: AuthResponse) -> Self {
        Self {
            token: src.token,
            user: src.user,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

/// Raw contents of the login or register panel.
#[derive(Debug, Clone, Default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
    pub confirm_password: Option<String>,
    pub email: Option<String>,
}

impl CredentialsForm {
    pub fn login(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            ..Self::default()
        }
    }
}

/// Body of a non-2xx response.
#[derive(Debug, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ===

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NotesEnvelope {
    #[serde(default)]
    pub notes: Vec<Note>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NoteBody {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
}

/// Full replacement body; every field is sent on each update.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TodoUpdate {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl From<&Todo> for TodoUpdate {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            scheduled_for: todo.scheduled_for,
        }
    }
}

/// Field set of the record dialog or the inline add form.
///
/// `schedule` holds the raw `datetime-local` value in the user's zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub title: String,
    pub body: String,
    pub schedule: String,
}
