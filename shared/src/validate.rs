use chrono::{DateTime, Utc};

use crate::constants::{ApiProfile, NOTE_CONTENT_MAX, NOTE_TITLE_MAX, PASSWORD_MIN, TODO_DESCRIPTION_MAX, TODO_TITLE_MAX, USERNAME_MIN};
use crate::dates::{parse_schedule, Zone};
use crate::error::{ApiError, Field, FieldErrors};
use crate::types::{CredentialsForm, NoteBody, RecordForm, TodoDraft};

fn check_credentials(form: &CredentialsForm, errors: &mut FieldErrors) {
    if form.username.trim().chars().count() < USERNAME_MIN {
        errors.push(Field::Username, format!("Username must be at least {USERNAME_MIN} characters long"));
    }
    if form.password.chars().count() < PASSWORD_MIN {
        errors.push(Field::Password, format!("Password must be at least {PASSWORD_MIN} characters long"));
    }
}

pub fn validate_login(form: &CredentialsForm) -> Result<(), ApiError> {
    let mut errors = FieldErrors::default();
    check_credentials(form, &mut errors);
    errors.into_result()
}

pub fn validate_register(form: &CredentialsForm, profile: &ApiProfile) -> Result<(), ApiError> {
    let mut errors = FieldErrors::default();
    if profile.collect_email && form.email.as_deref().map(str::trim).unwrap_or_default().is_empty() {
        errors.push(Field::Email, "Email is required");
    }
    check_credentials(form, &mut errors);
    if profile.confirm_password && form.confirm_password.as_deref() != Some(form.password.as_str()) {
        errors.push(Field::ConfirmPassword, "Passwords do not match");
    }
    errors.into_result()
}

fn check_required(value: &str, field: Field, label: &str, max: usize, errors: &mut FieldErrors) {
    if value.is_empty() {
        errors.push(field, format!("{label} is required"));
    } else if value.chars().count() > max {
        errors.push(field, format!("{label} must be less than {max} characters"));
    }
}

pub fn validate_note(form: &RecordForm) -> Result<NoteBody, ApiError> {
    let title = form.title.trim();
    let content = form.body.trim();
    let mut errors = FieldErrors::default();
    check_required(title, Field::Title, "Title", NOTE_TITLE_MAX, &mut errors);
    check_required(content, Field::Body, "Content", NOTE_CONTENT_MAX, &mut errors);
    errors.into_result()?;
    Ok(NoteBody { title: title.to_string(), content: content.to_string() })
}

// The edit form shows minutes only.
fn same_minute(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    a.timestamp().div_euclid(60) == b.timestamp().div_euclid(60)
}

/// `current` is the schedule already stored on the record being edited;
/// keeping it unchanged is allowed even when it has passed.
pub fn validate_todo<Z: Zone + ?Sized>(
    form: &RecordForm,
    current: Option<DateTime<Utc>>,
    now: &DateTime<Utc>,
    zone: &Z,
) -> Result<TodoDraft, ApiError> {
    let title = form.title.trim();
    let description = form.body.trim();
    let mut errors = FieldErrors::default();
    check_required(title, Field::Title, "Title", TODO_TITLE_MAX, &mut errors);
    if description.chars().count() > TODO_DESCRIPTION_MAX {
        errors.push(Field::Body, format!("Description must be less than {TODO_DESCRIPTION_MAX} characters"));
    }
    let scheduled_for = match parse_schedule(&form.schedule, zone) {
        Ok(Some(at)) => match current.filter(|kept| same_minute(kept, &at)) {
            Some(kept) => Some(kept),
            None if at <= *now => {
                errors.push(Field::Schedule, "Cannot schedule todos in the past. Please select a future date and time.");
                None
            }
            None => Some(at),
        },
        Ok(None) => None,
        Err(message) => {
            errors.push(Field::Schedule, message);
            None
        }
    };
    errors.into_result()?;
    Ok(TodoDraft {
        title: title.to_string(),
        description: if description.is_empty() { None } else { Some(description.to_string()) },
        scheduled_for,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Offset};

    use super::*;
    use crate::constants::{NOTES_PROFILE, TODO_PROFILE};

    fn fields(err: ApiError) -> FieldErrors {
        match err {
            ApiError::Validation(errors) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn login_requires_minimum_lengths() {
        assert!(validate_login(&CredentialsForm::login("bob", "secret")).is_ok());
        let errors = fields(validate_login(&CredentialsForm::login(" al ", "12345")).unwrap_err());
        assert!(errors.get(Field::Username).is_some());
        assert!(errors.get(Field::Password).is_some());
    }

    #[test]
    fn register_rejects_mismatched_confirmation() {
        let form = CredentialsForm {
            confirm_password: Some("secret2".to_string()),
            ..CredentialsForm::login("alice", "secret1")
        };
        let errors = fields(validate_register(&form, &NOTES_PROFILE).unwrap_err());
        assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
        assert_eq!(errors.0.len(), 1);
    }

    #[test]
    fn register_requires_email_only_where_collected() {
        let form = CredentialsForm::login("alice", "secret1");
        let errors = fields(validate_register(&form, &TODO_PROFILE).unwrap_err());
        assert_eq!(errors.get(Field::Email), Some("Email is required"));

        let form = CredentialsForm { email: Some("a@b.c".to_string()), ..form };
        assert!(validate_register(&form, &TODO_PROFILE).is_ok());
    }

    #[test]
    fn note_fields_are_trimmed_and_bounded() {
        let body = validate_note(&RecordForm { title: "  Plan ".into(), body: " steps ".into(), ..RecordForm::default() }).unwrap();
        assert_eq!(body, NoteBody { title: "Plan".into(), content: "steps".into() });

        let long = "x".repeat(NOTE_TITLE_MAX + 1);
        let errors = fields(validate_note(&RecordForm { title: long, body: "   ".into(), ..RecordForm::default() }).unwrap_err());
        assert_eq!(errors.get(Field::Title), Some("Title must be less than 200 characters"));
        assert_eq!(errors.get(Field::Body), Some("Content is required"));
    }

    #[test]
    fn todo_schedule_must_be_in_the_future() {
        let now = Utc::now();
        let utc = Utc.fix();
        let past = RecordForm { title: "Pay rent".into(), schedule: (now - Duration::minutes(1)).to_rfc3339(), ..RecordForm::default() };
        let errors = fields(validate_todo(&past, None, &now, &utc).unwrap_err());
        assert!(errors.get(Field::Schedule).is_some());

        let exact = RecordForm { schedule: now.to_rfc3339(), ..past.clone() };
        assert!(validate_todo(&exact, None, &now, &utc).is_err());

        let later = now + Duration::hours(2);
        let future = RecordForm { schedule: later.to_rfc3339(), ..past };
        let draft = validate_todo(&future, None, &now, &utc).unwrap();
        assert_eq!(draft.scheduled_for, Some(later));
        assert_eq!(draft.description, None);
    }

    #[test]
    fn unchanged_past_schedule_is_kept_on_edit() {
        let now = Utc::now();
        let overdue = now - Duration::days(1);
        let form = RecordForm {
            title: "Call".into(),
            body: "mum".into(),
            schedule: crate::dates::schedule_input_value(&overdue, &Utc.fix()),
        };
        let draft = validate_todo(&form, Some(overdue), &now, &Utc.fix()).unwrap();
        assert_eq!(draft.scheduled_for, Some(overdue));
        assert_eq!(draft.description.as_deref(), Some("mum"));
    }
}
