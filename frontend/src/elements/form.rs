use dominator::{Dom, events, html};
use futures_signals::signal::{Mutable, SignalExt};

use shared::error::{Field, FieldErrors};

use crate::constants::{INPUT_DATETIME, KEY_ENTER, PROP_MIN, PROP_NAME, PROP_PLACEHOLDER, PROP_ROWS, PROP_TITLE, PROP_TYPE, PROP_VALUE, TAG_DIV, TAG_INPUT, TAG_LABEL, TAG_TEXTAREA};
use crate::state::FormErrors;

fn css_class(label: &str) -> String {
    format!("app-form__{label}")
}

fn clear_field(fields: &Mutable<FieldErrors>, field: Field) {
    if fields.lock_ref().get(field).is_some() {
        fields.lock_mut().remove(field);
    }
}

fn field_group(label: &str, control: Dom, errors: &FormErrors, field: Field) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("group"))
        .children([
            html!(TAG_LABEL, {
                .class(css_class("label"))
                .text(label)
            }),
            control,
            html!(TAG_DIV, {
                .class(css_class("error"))
                .text_signal(errors.fields.signal_ref(move |e| e.get(field).unwrap_or_default().to_string()))
            }),
        ])
    })
}

/// Single-line input; Enter calls `enter`, typing clears the field's message.
pub fn input_field<F>(kind: &str, name: &str, label: &str, value: &str, field: Field, errors: &FormErrors, enter: F) -> Dom
    where
        F: Fn() + 'static
{
    let fields = errors.fields.clone();
    let control = html!(TAG_INPUT, {
        .class(css_class("input"))
        .attr(PROP_TYPE, kind)
        .attr(PROP_NAME, name)
        .attr(PROP_PLACEHOLDER, label)
        .attr(PROP_TITLE, label)
        .prop(PROP_VALUE, value)
        .event(move |_: events::Input| clear_field(&fields, field))
        .event(move |ev: events::KeyDown| {
            if ev.key() == KEY_ENTER {
                enter();
            }
        })
    });
    field_group(label, control, errors, field)
}

pub fn textarea_field(name: &str, label: &str, value: &str, field: Field, errors: &FormErrors) -> Dom {
    let fields = errors.fields.clone();
    let control = html!(TAG_TEXTAREA, {
        .class(css_class("input"))
        .attr(PROP_NAME, name)
        .attr(PROP_PLACEHOLDER, label)
        .attr(PROP_ROWS, "4")
        .prop(PROP_VALUE, value)
        .event(move |_: events::Input| clear_field(&fields, field))
    });
    field_group(label, control, errors, field)
}

/// `datetime-local` input; `min` is the earliest value the picker offers.
pub fn schedule_field(name: &str, label: &str, value: &str, min: &str, errors: &FormErrors) -> Dom {
    let fields = errors.fields.clone();
    let control = html!(TAG_INPUT, {
        .class(css_class("input"))
        .attr(PROP_TYPE, INPUT_DATETIME)
        .attr(PROP_NAME, name)
        .attr(PROP_MIN, min)
        .prop(PROP_VALUE, value)
        .event(move |_: events::Input| clear_field(&fields, Field::Schedule))
    });
    field_group(label, control, errors, Field::Schedule)
}

pub fn form_message(errors: &FormErrors) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("message"))
        .visible_signal(errors.message.signal_ref(Option::is_some))
        .text_signal(errors.message.signal_cloned().map(Option::unwrap_or_default))
    })
}
