use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use shared::controller::Saved;
use shared::error::ApiError;
use shared::render::{ACTION_DELETE, ACTION_EDIT, ACTION_TOGGLE};
use shared::resource::Record;
use shared::types::RecordForm;

use crate::constants::{FIELD_BODY, FIELD_SCHEDULE, FIELD_SEARCH, FIELD_TITLE};
use crate::screen::Screen;
use crate::state::{App, AuthPanel, FormErrors};
use crate::utils::{clear_form_value, get_form_value};

pub const SCOPE_DIALOG: &str = "app-records__dialog";
pub const SCOPE_ADD: &str = "app-records__add";
pub const SCOPE_SEARCH: &str = "app-header__search";

/// Dispatch of a click delegated from the grid.
pub fn handle_action<R: Screen>(app: &Rc<App<R>>, action: &str, id: &str) {
    if action == ACTION_EDIT {
        open_edit(app, id);
    } else if action == ACTION_DELETE {
        if !app.controller.open_delete(id) {
            log::warn!("handle_action: no {} {id}", R::NOUN);
        }
    } else if action == ACTION_TOGGLE {
        toggle(app, id);
    }
}

pub fn open_new<R: Screen>(app: &Rc<App<R>>) {
    app.dialog_errors.reset();
    app.controller.open_new();
}

fn open_edit<R: Screen>(app: &Rc<App<R>>, id: &str) {
    app.dialog_errors.reset();
    if !app.controller.open_edit(id) {
        log::warn!("open_edit: no {} {id}", R::NOUN);
    }
}

fn read_form<R: Screen>(scope: &str) -> RecordForm {
    RecordForm {
        title: get_form_value(scope, FIELD_TITLE),
        body: get_form_value(scope, FIELD_BODY),
        schedule: if R::SCHEDULED { get_form_value(scope, FIELD_SCHEDULE) } else { String::new() },
    }
}

/// Routes an action error to the form that caused it, or to the notice line
/// when that form is gone or the app reports through notices.
fn report<R: Screen>(app: &App<R>, errors: &FormErrors, err: ApiError, form_visible: bool) {
    if err.is_auth() {
        app.auth_errors.show(err);
    } else if matches!(err, ApiError::Validation(_)) || (form_visible && !R::SUCCESS_NOTICES) {
        errors.show(err);
    } else {
        app.failure(&err);
    }
}

pub fn submit_dialog<R: Screen>(app: &Rc<App<R>>) {
    let form = read_form::<R>(SCOPE_DIALOG);
    app.dialog_errors.reset();
    let app = app.clone();
    spawn_local(async move {
        match app.controller.submit(&form).await {
            Ok(Saved::Created) => app.success(&format!("{} added successfully!", R::LABEL)),
            Ok(Saved::Updated) => app.success(&format!("{} updated successfully!", R::LABEL)),
            Err(err) => {
                let open = !app.controller.selection().is_none();
                report(&app, &app.dialog_errors, err, open);
            }
        }
    });
}

pub fn submit_inline<R: Screen>(app: &Rc<App<R>>) {
    let form = read_form::<R>(SCOPE_ADD);
    app.add_errors.reset();
    let app = app.clone();
    spawn_local(async move {
        match app.controller.submit(&form).await {
            Ok(_) => {
                for name in [FIELD_TITLE, FIELD_BODY, FIELD_SCHEDULE] {
                    clear_form_value(SCOPE_ADD, name);
                }
                app.success(&format!("{} added successfully!", R::LABEL));
            }
            Err(err) => report(&app, &app.add_errors, err, true),
        }
    });
}

pub fn confirm_delete<R: Screen>(app: &Rc<App<R>>) {
    let app = app.clone();
    spawn_local(async move {
        match app.controller.confirm_delete().await {
            Ok(()) => app.success(&format!("{} deleted successfully!", R::LABEL)),
            Err(err) if err.is_auth() => app.auth_errors.show(err),
            Err(err) if R::SUCCESS_NOTICES => {
                app.controller.close();
                app.failure(&err);
            }
            Err(err) => {
                log::error!("confirm_delete: {:?}", err);
                app.alert.set(Some(format!("Failed to delete {}. Please try again.", R::NOUN)));
            }
        }
    });
}

fn toggle<R: Screen>(app: &Rc<App<R>>, id: &str) {
    let app = app.clone();
    let id = id.to_string();
    spawn_local(async move {
        match app.controller.toggle(&id).await {
            Ok(Some(item)) => {
                if let Some(done) = item.completed() {
                    let state = if done { "completed" } else { "marked as pending" };
                    app.success(&format!("{} {state}!", R::LABEL));
                }
            }
            Ok(None) => {}
            Err(err) if err.is_auth() => app.auth_errors.show(err),
            Err(err) => app.failure(&err),
        }
    });
}

pub fn search<R: Screen>(app: &Rc<App<R>>) {
    app.controller.set_filter(&get_form_value(SCOPE_SEARCH, FIELD_SEARCH));
}

pub fn logout<R: Screen>(app: &Rc<App<R>>) {
    app.controller.logout();
    app.switch_panel(AuthPanel::Login);
    app.success("Logged out successfully");
}
