use std::rc::Rc;

use dominator::{Dom, html};
use futures_signals::signal::{Signal, SignalExt};

use shared::controller::Phase;

use crate::constants::TAG_DIV;
use crate::dialog::dialogs::dialog_alert;
use crate::elements::app_login::app_login;
use crate::records::app_records::app_records;
use crate::screen::Screen;
use crate::state::App;

fn css_class(label: &str) -> String {
    format!("app-root__{label}")
}

pub fn app_root<R: Screen>(app: Rc<App<R>>) -> Dom {
    let phase = app.controller.phase_signal();
    let app_1 = app.clone();
    html!(TAG_DIV, {
        .class("app-root")
        .child_signal(phase.map(move |phase| {
            Some(match phase {
                Phase::Unauthenticated => app_login(app_1.clone()),
                Phase::Authenticated => app_records(app_1.clone()),
            })
        }))
        .child_signal(app_notice(&app))
        .child(html!(TAG_DIV, {
            .class(css_class("loading"))
            .visible_signal(app.controller.loading_signal())
            .child(html!(TAG_DIV, { .class(css_class("spinner")) }))
        }))
        .child_signal(dialog_alert(&app.alert))
    })
}

fn app_notice<R: Screen>(app: &Rc<App<R>>) -> impl Signal<Item=Option<Dom>> {
    app.notice.signal_cloned().map(|notice| {
        notice.map(|notice| html!(TAG_DIV, {
            .class(css_class("notice"))
            .class(notice.kind.css())
            .text(&notice.text)
        }))
    })
}
