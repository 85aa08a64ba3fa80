use std::rc::Rc;

use dominator::{Dom, events, html};
use futures_signals::signal::SignalExt;

use crate::constants::{FIELD_SEARCH, INPUT_SEARCH, PROP_NAME, PROP_PLACEHOLDER, PROP_TYPE, TAG_BUTTON, TAG_DIV, TAG_H1, TAG_INPUT, TAG_SPAN};
use crate::records::record_events::{logout, open_new, search, SCOPE_SEARCH};
use crate::screen::Screen;
use crate::state::App;

fn css_class(label: &str) -> String {
    format!("app-header__{label}")
}

pub fn app_header<R: Screen>(app: &Rc<App<R>>) -> Dom {
    let mut rows = vec![
        html!(TAG_H1, {
            .class(css_class("title"))
            .text(R::APP_TITLE)
        }),
        html!(TAG_SPAN, {
            .class(css_class("count"))
            .text_signal(app.controller.count_signal().map(|n| {
                format!("{n} {}{}", R::NOUN, if n == 1 { "" } else { "s" })
            }))
        }),
        search_input(app),
    ];
    if !R::INLINE_ADD {
        rows.push(button(&format!("+ New {}", R::LABEL), "new", {
            let app = app.clone();
            move || open_new(&app)
        }));
    }
    rows.push(html!(TAG_SPAN, {
        .class(css_class("user"))
        .text_signal(app.controller.user_signal().map(|user| {
            user.map(|user| R::greeting(&user)).unwrap_or_default()
        }))
    }));
    rows.push(button("Logout", "logout", {
        let app = app.clone();
        move || logout(&app)
    }));

    html!(TAG_DIV, {
        .class(css_class("container"))
        .children(rows)
    })
}

fn search_input<R: Screen>(app: &Rc<App<R>>) -> Dom {
    let app = app.clone();
    html!(TAG_DIV, {
        .class(SCOPE_SEARCH)
        .child(html!(TAG_INPUT, {
            .class(css_class("input"))
            .attr(PROP_TYPE, INPUT_SEARCH)
            .attr(PROP_NAME, FIELD_SEARCH)
            .attr(PROP_PLACEHOLDER, &format!("Search {}s...", R::NOUN))
            .event(move |_: events::Input| search(&app))
        }))
    })
}

fn button<F>(label: &str, class: &str, click: F) -> Dom
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
