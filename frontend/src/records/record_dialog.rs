use std::rc::Rc;

use dominator::{Dom, html};
use futures_signals::signal::{Signal, SignalExt};

use shared::controller::Selection;
use shared::error::Field;
use shared::resource::Record;

use crate::constants::{FIELD_BODY, FIELD_SCHEDULE, FIELD_TITLE, TAG_DIV};
use crate::dialog::dialogs::{dialog_body, dialog_button, dialog_common, dialog_footer, dialog_header};
use crate::elements::form::{form_message, input_field, schedule_field, textarea_field};
use crate::records::record_events::{confirm_delete, submit_dialog, SCOPE_DIALOG};
use crate::screen::Screen;
use crate::state::App;

const PREVIEW_CHARS: usize = 100;

fn css_class(label: &str) -> String {
    format!("app-records__{label}")
}

/// Edit or delete dialog following the controller's selection.
pub fn record_dialogs<R: Screen>(app: &Rc<App<R>>) -> impl Signal<Item=Option<Dom>> {
    let signal = app.controller.selection_signal();
    let app = app.clone();
    signal.map(move |selection| match selection {
        Selection::None => None,
        Selection::Editing(record) => Some(record_dialog(&app, record.is_some())),
        Selection::ConfirmingDelete(record) => Some(delete_dialog(&app, &record)),
    })
}

fn closer<R: Screen>(app: &Rc<App<R>>) -> impl Fn() + Clone + 'static {
    let app = app.clone();
    move || app.controller.close()
}

fn record_dialog<R: Screen>(app: &Rc<App<R>>, editing: bool) -> Dom {
    let form = app.controller.form_values();
    let errors = &app.dialog_errors;
    let submit = {
        let app = app.clone();
        move || submit_dialog(&app)
    };

    let mut fields = vec![
        input_field("text", FIELD_TITLE, "Title", &form.title, Field::Title, errors, submit.clone()),
        textarea_field(FIELD_BODY, R::BODY_LABEL, &form.body, Field::Body, errors),
    ];
    if R::SCHEDULED {
        let min = app.controller.schedule_min();
        fields.push(schedule_field(FIELD_SCHEDULE, "Schedule for (optional)", &form.schedule, &min, errors));
    }
    fields.push(form_message(errors));

    let (title, save) = if editing { (R::EDIT_TITLE, R::SAVE_EDIT) } else { (R::NEW_TITLE, R::SAVE_NEW) };
    html!(TAG_DIV, {
        .class(SCOPE_DIALOG)
        .child(dialog_common(closer(app), vec![
            dialog_header(title),
            dialog_body(fields),
            dialog_footer(vec![
                dialog_button("Cancel", "cancel", closer(app)),
                dialog_button(save, "confirm", submit),
            ]),
        ]))
    })
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        format!("{}...", text.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        text.to_string()
    }
}

fn delete_dialog<R: Screen>(app: &Rc<App<R>>, record: &R::Item) -> Dom {
    let confirm = {
        let app = app.clone();
        move || confirm_delete(&app)
    };
    dialog_common(closer(app), vec![
        dialog_header(&format!("Delete {}", R::LABEL)),
        dialog_body(vec![
            html!(TAG_DIV, {
                .text(&format!("Are you sure you want to delete this {}?", R::NOUN))
            }),
            html!(TAG_DIV, {
                .class(css_class("preview"))
                .children([
                    html!("strong", { .text(record.title()) }),
                    html!(TAG_DIV, { .text(&preview(record.body())) }),
                ])
            }),
        ]),
        dialog_footer(vec![
            dialog_button("Cancel", "cancel", closer(app)),
            dialog_button("Delete", "danger", confirm),
        ]),
    ])
}
