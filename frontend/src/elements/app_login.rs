use std::rc::Rc;

use dominator::{Dom, events, html};
use futures_signals::signal::SignalExt;
use wasm_bindgen_futures::spawn_local;

use shared::error::{ApiError, Field};
use shared::types::CredentialsForm;

use crate::constants::{FIELD_CONFIRM, FIELD_EMAIL, FIELD_PASSWORD, FIELD_USERNAME, INPUT_EMAIL, INPUT_PASSWORD, TAG_BUTTON, TAG_DIV, TAG_H2, TAG_SPAN};
use crate::elements::form::{form_message, input_field};
use crate::screen::Screen;
use crate::state::{App, AuthPanel};
use crate::utils::{focus_field, get_form_value, set_title};

const SCOPE_LOGIN: &str = "app-login__login";
const SCOPE_REGISTER: &str = "app-login__register";

fn css_class(label: &str) -> String {
    format!("app-login__{label}")
}

pub fn app_login<R: Screen>(app: Rc<App<R>>) -> Dom {
    let app_1 = app.clone();
    html!(TAG_DIV, {
        .class(css_class("container"))
        .child(html!(TAG_DIV, {
            .class(css_class("title"))
            .text(R::APP_TITLE)
        }))
        .child_signal(app.panel.signal().map(move |panel| {
            Some(match panel {
                AuthPanel::Login => login_page(&app_1),
                AuthPanel::Register => register_page(&app_1),
            })
        }))
    })
}

fn login_page<R: Screen>(app: &Rc<App<R>>) -> Dom {
    set_title(&format!("{} - Sign in", R::APP_TITLE));
    let errors = &app.auth_errors;
    let submit = {
        let app = app.clone();
        move || login_connect(&app)
    };
    html!(TAG_DIV, {
        .class(css_class("form"))
        .class(SCOPE_LOGIN)
        .children([
            html!(TAG_H2, { .text("Sign in") }),
            input_field("text", FIELD_USERNAME, "Username", "", Field::Username, errors, || {
                focus_field(SCOPE_LOGIN, FIELD_PASSWORD);
            }),
            input_field(INPUT_PASSWORD, FIELD_PASSWORD, "Password", "", Field::Password, errors, submit.clone()),
            form_message(errors),
            submit_button("Sign in", submit),
            switch_link(app, "Don't have an account?", "Create account", AuthPanel::Register),
        ])
    })
}

fn register_page<R: Screen>(app: &Rc<App<R>>) -> Dom {
    set_title(&format!("{} - Create account", R::APP_TITLE));
    let profile = R::profile();
    let errors = &app.auth_errors;
    let submit = {
        let app = app.clone();
        move || register_connect(&app)
    };

    let mut rows = vec![
        html!(TAG_H2, { .text("Create account") }),
        input_field("text", FIELD_USERNAME, "Username", "", Field::Username, errors, || {}),
    ];
    if profile.collect_email {
        rows.push(input_field(INPUT_EMAIL, FIELD_EMAIL, "Email", "", Field::Email, errors, || {}));
    }
    rows.push(input_field(INPUT_PASSWORD, FIELD_PASSWORD, "Password", "", Field::Password, errors, submit.clone()));
    if profile.confirm_password {
        rows.push(input_field(INPUT_PASSWORD, FIELD_CONFIRM, "Confirm password", "", Field::ConfirmPassword, errors, submit.clone()));
    }
    rows.push(form_message(errors));
    rows.push(submit_button("Create account", submit));
    rows.push(switch_link(app, "Already have an account?", "Sign in", AuthPanel::Login));

    html!(TAG_DIV, {
        .class(css_class("form"))
        .class(SCOPE_REGISTER)
        .children(rows)
    })
}

fn submit_button<F>(label: &str, click: F) -> Dom
    where
        F: Fn() + 'static
{
    html!(TAG_BUTTON, {
        .class(css_class("button"))
        .text(label)
        .event(move |_: events::Click| click())
    })
}

fn switch_link<R: Screen>(app: &Rc<App<R>>, question: &str, label: &str, target: AuthPanel) -> Dom {
    let app = app.clone();
    html!(TAG_DIV, {
        .class(css_class("switch"))
        .children([
            html!(TAG_SPAN, { .text(question) }),
            html!(TAG_BUTTON, {
                .class(css_class("link"))
                .text(label)
                .event(move |_: events::Click| app.switch_panel(target))
            }),
        ])
    })
}

// ===

fn login_connect<R: Screen>(app: &Rc<App<R>>) {
    let form = CredentialsForm::login(
        &get_form_value(SCOPE_LOGIN, FIELD_USERNAME),
        &get_form_value(SCOPE_LOGIN, FIELD_PASSWORD),
    );
    app.auth_errors.reset();
    let app = app.clone();
    spawn_local(async move {
        match app.controller.login(&form).await {
            Ok(()) => app.success("Login successful!"),
            Err(err) => auth_failed(&app, err),
        }
    });
}

fn register_connect<R: Screen>(app: &Rc<App<R>>) {
    let profile = R::profile();
    let form = CredentialsForm {
        email: profile.collect_email.then(|| get_form_value(SCOPE_REGISTER, FIELD_EMAIL)),
        confirm_password: profile.confirm_password.then(|| get_form_value(SCOPE_REGISTER, FIELD_CONFIRM)),
        ..CredentialsForm::login(
            &get_form_value(SCOPE_REGISTER, FIELD_USERNAME),
            &get_form_value(SCOPE_REGISTER, FIELD_PASSWORD),
        )
    };
    app.auth_errors.reset();
    let app = app.clone();
    spawn_local(async move {
        match app.controller.register(&form).await {
            Ok(()) => app.success("Registration successful!"),
            Err(err) => auth_failed(&app, err),
        }
    });
}

/// The session may already be open when only the first list failed.
fn auth_failed<R: Screen>(app: &Rc<App<R>>, err: ApiError) {
    log::warn!("auth_failed: {err}");
    if app.controller.user().is_some() {
        app.failure(&err);
    } else {
        app.auth_errors.show(err);
    }
}
