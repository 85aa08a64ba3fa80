use shared::render::Render;
use shared::resource::{Notes, Todos};
use shared::types::User;

/// Wording and layout differences between the two applications.
pub trait Screen: Render {
    const APP_TITLE: &'static str;
    /// Capitalised noun for headings and buttons.
    const LABEL: &'static str;
    const BODY_LABEL: &'static str;
    const BODY_REQUIRED: bool;
    /// Shows the schedule field in record forms.
    const SCHEDULED: bool;
    /// New records come from a form above the list instead of a dialog.
    const INLINE_ADD: bool;
    /// Confirms successful actions with a transient notice.
    const SUCCESS_NOTICES: bool;
    const NEW_TITLE: &'static str;
    const EDIT_TITLE: &'static str;
    const SAVE_NEW: &'static str;
    const SAVE_EDIT: &'static str;

    fn greeting(user: &User) -> String;
}

impl Screen for Notes {
    const APP_TITLE: &'static str = "Notes";
    const LABEL: &'static str = "Note";
    const BODY_LABEL: &'static str = "Content";
    const BODY_REQUIRED: bool = true;
    const SCHEDULED: bool = false;
    const INLINE_ADD: bool = false;
    const SUCCESS_NOTICES: bool = false;
    const NEW_TITLE: &'static str = "Add New Note";
    const EDIT_TITLE: &'static str = "Edit Note";
    const SAVE_NEW: &'static str = "Save Note";
    const SAVE_EDIT: &'static str = "Update Note";

    fn greeting(user: &User) -> String {
        user.username.clone()
    }
}

impl Screen for Todos {
    const APP_TITLE: &'static str = "Todo App";
    const LABEL: &'static str = "Todo";
    const BODY_LABEL: &'static str = "Description";
    const BODY_REQUIRED: bool = false;
    const SCHEDULED: bool = true;
    const INLINE_ADD: bool = true;
    const SUCCESS_NOTICES: bool = true;
    const NEW_TITLE: &'static str = "Add Todo";
    const EDIT_TITLE: &'static str = "Edit Todo";
    const SAVE_NEW: &'static str = "Add Todo";
    const SAVE_EDIT: &'static str = "Update Todo";

    fn greeting(user: &User) -> String {
        format!("Welcome, {}!", user.username)
    }
}
