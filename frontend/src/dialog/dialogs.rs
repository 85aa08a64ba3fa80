use dominator::{Dom, events, html};
use futures_signals::signal::{Mutable, Signal, SignalExt};

use crate::constants::{TAG_BUTTON, TAG_DIV};
use crate::utils::is_outside;

fn css_class(label: &str) -> String {
    format!("dialogs__{label}")
}

/// Backdrop plus centered container; a click on the backdrop itself calls `close`.
pub fn dialog_common<F>(close: F, rows: Vec<Dom>) -> Dom
    where
        F: Fn() + 'static
{
    let container = format!(".{}", css_class("container"));
    html!(TAG_DIV, {
        .class(css_class("back"))
        .event(move |ev: events::Click| {
            if is_outside(ev.target(), &container) {
                close();
            }
        })
        .child(html!(TAG_DIV, {
            .class(css_class("container"))
            .children(rows)
        }))
    })
}

pub fn dialog_header(title: &str) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("header"))
        .text(title)
    })
}

pub fn dialog_body(children: Vec<Dom>) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("body"))
        .children(children)
    })
}

pub fn dialog_footer(buttons: Vec<Dom>) -> Dom {
    html!(TAG_DIV, {
        .class(css_class("footer"))
        .children(buttons)
    })
}

pub fn dialog_button<F>(label: &str, class: &str, click: F) -> Dom
    where
        F: Fn() + 'static
{
    html!(TAG_BUTTON, {
        .class(css_class("button"))
        .class(css_class(class))
        .text(label)
        .event(move |_: events::Click| click())
    })
}

/// Blocking message with a single Ok button.
pub fn dialog_alert(state: &Mutable<Option<String>>) -> impl Signal<Item=Option<Dom>> {
    let state = state.clone();
    state.signal_cloned().map(move |message| {
        message.map(|message| {
            let state_1 = state.clone();
            let state_2 = state.clone();
            dialog_common(move || state_1.set(None), vec![
                dialog_header(""),
                dialog_body(vec![html!(TAG_DIV, { .text(&message) })]),
                dialog_footer(vec![
                    dialog_button("Ok", "confirm", move || state_2.set(None)),
                ]),
            ])
        })
    })
}
