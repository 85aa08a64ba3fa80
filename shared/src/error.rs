use std::fmt;

use thiserror::Error;

use crate::types::ErrorBody;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Title,
    Body,
    Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Client-side validation failures, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError { field, message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops the message of one field, e.g. once the user edits it.
    pub fn remove(&mut self, field: Field) {
        self.0.retain(|row| row.field != field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.iter().find(|row| row.field == field).map(|row| row.message.as_str())
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() { Ok(()) } else { Err(ApiError::Validation(self)) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.iter().map(|row| row.message.as_str()).collect::<Vec<_>>().join("; ");
        f.write_str(&text)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// Maps a non-2xx status and its body onto an error kind.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
        let message = parsed.message
            .or(parsed.error)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        match status {
            401 | 403 => ApiError::Auth(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Server { status, message },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}
