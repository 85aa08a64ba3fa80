use std::rc::Rc;

use dominator::{Dom, EventOptions, events, html};
use futures_signals::signal::SignalExt;

use shared::error::Field;
use shared::render::{listing_html, ATTR_ACTION, ATTR_ID, ACTION_TOGGLE};

use crate::constants::{FIELD_BODY, FIELD_SCHEDULE, FIELD_TITLE, KEY_ESCAPE, KEY_NEW, PROP_HTML, TAG_BUTTON, TAG_DIV};
use crate::elements::app_header::app_header;
use crate::elements::form::{form_message, input_field, schedule_field, textarea_field};
use crate::records::record_dialog::record_dialogs;
use crate::records::record_events::{handle_action, open_new, submit_inline, SCOPE_ADD};
use crate::screen::Screen;
use crate::state::App;
use crate::utils::{from_closest_dataset, set_title};

fn css_class(label: &str) -> String {
    format!("app-records__{label}")
}

pub fn app_records<R: Screen>(app: Rc<App<R>>) -> Dom {
    set_title(R::APP_TITLE);
    let mut rows = vec![app_header(&app)];
    if R::INLINE_ADD {
        rows.push(add_form(&app));
    }
    rows.push(records_grid(&app));

    let app_1 = app.clone();
    html!(TAG_DIV, {
        .class(css_class("container"))
        .global_event_with_options(&EventOptions::preventable(), move |ev: events::KeyDown| {
            handle_keys(&app_1, ev);
        })
        .children(rows)
        .child_signal(record_dialogs(&app))
    })
}

fn handle_keys<R: Screen>(app: &Rc<App<R>>, ev: events::KeyDown) {
    let key = ev.key();
    if key == KEY_ESCAPE {
        if app.alert.lock_ref().is_some() {
            app.alert.set(None);
        } else {
            app.controller.close();
        }
    } else if ev.ctrl_key() && key.eq_ignore_ascii_case(KEY_NEW) && !R::INLINE_ADD {
        ev.prevent_default();
        open_new(app);
    }
}

/// Record grid rendered from markup; row controls are handled here by delegation.
fn records_grid<R: Screen>(app: &Rc<App<R>>) -> Dom {
    let listing = app.controller.listing_signal();
    let app_1 = app.clone();
    let app_2 = app.clone();
    html!(TAG_DIV, {
        .class(css_class("grid"))
        .prop_signal(PROP_HTML, listing.map(move |listing| {
            listing_html::<R>(&listing, &app_1.render_context())
        }))
        .event_with_options(&EventOptions::preventable(), move |ev: events::Click| {
            if let Some((action, id)) = from_closest_dataset(ev.target(), ATTR_ACTION, ATTR_ID) {
                // the checkbox shows server state only
                if action == ACTION_TOGGLE {
                    ev.prevent_default();
                }
                handle_action(&app_2, &action, &id);
            }
        })
    })
}

fn add_form<R: Screen>(app: &Rc<App<R>>) -> Dom {
    let errors = &app.add_errors;
    let submit = {
        let app = app.clone();
        move || submit_inline(&app)
    };
    let min = app.controller.schedule_min();

    let mut rows = vec![
        html!("h3", { .text(R::NEW_TITLE) }),
        input_field("text", FIELD_TITLE, "Title", "", Field::Title, errors, submit.clone()),
        textarea_field(FIELD_BODY, R::BODY_LABEL, "", Field::Body, errors),
    ];
    if R::SCHEDULED {
        rows.push(schedule_field(FIELD_SCHEDULE, "Schedule for (optional)", "", &min, errors));
    }
    rows.push(form_message(errors));
    rows.push(html!(TAG_BUTTON, {
        .class(css_class("add-button"))
        .text(R::SAVE_NEW)
        .event(move |_: events::Click| submit())
    }));

    html!(TAG_DIV, {
        .class(SCOPE_ADD)
        .children(rows)
    })
}
