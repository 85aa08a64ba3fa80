use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures_signals::signal::Mutable;
use gloo_timers::callback::Timeout;

use shared::controller::Controller;
use shared::error::{ApiError, FieldErrors};
use shared::render::RenderContext;

use crate::browser_clock::BrowserClock;
use crate::connect_fetch::FetchTransport;
use crate::constants::NOTICE_HIDE_MS;
use crate::local_storage::BrowserStorage;
use crate::screen::Screen;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AuthPanel {
    Login,
    Register,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn css(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Error slots of one form: per-field messages plus a form-level line.
pub struct FormErrors {
    pub fields: Mutable<FieldErrors>,
    pub message: Mutable<Option<String>>,
}

impl Default for FormErrors {
    fn default() -> Self {
        Self {
            fields: Mutable::new(FieldErrors::default()),
            message: Mutable::new(None),
        }
    }
}

impl FormErrors {
    pub fn reset(&self) {
        self.fields.set(FieldErrors::default());
        self.message.set_neq(None);
    }

    /// Validation failures go next to their fields, anything else to the form line.
    pub fn show(&self, err: ApiError) {
        match err {
            ApiError::Validation(fields) => self.fields.set(fields),
            other => self.message.set(Some(other.to_string())),
        }
    }
}

/// View state of one application around its controller.
pub struct App<R: Screen> {
    pub controller: Controller<R>,
    pub panel: Mutable<AuthPanel>,
    pub auth_errors: FormErrors,
    pub dialog_errors: FormErrors,
    pub add_errors: FormErrors,
    pub notice: Mutable<Option<Notice>>,
    pub alert: Mutable<Option<String>>,
    notice_timer: RefCell<Option<Timeout>>,
    this: Weak<App<R>>,
}

impl<R: Screen> App<R> {
    pub fn new() -> Rc<Self> {
        let controller = Controller::new(
            Rc::new(FetchTransport::new(R::profile())),
            Rc::new(BrowserStorage::open()),
            Rc::new(BrowserClock),
        );
        Rc::new_cyclic(|this| Self {
            controller,
            panel: Mutable::new(AuthPanel::Login),
            auth_errors: FormErrors::default(),
            dialog_errors: FormErrors::default(),
            add_errors: FormErrors::default(),
            notice: Mutable::new(None),
            alert: Mutable::new(None),
            notice_timer: RefCell::new(None),
            this: this.clone(),
        })
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.controller.clock())
    }

    pub fn switch_panel(&self, panel: AuthPanel) {
        self.auth_errors.reset();
        self.panel.set_neq(panel);
    }

    /// Shows a notice that hides itself; a newer notice replaces the older one.
    pub fn notify(&self, kind: NoticeKind, text: &str) {
        self.notice.set(Some(Notice { kind, text: text.to_string() }));
        let this = self.this.clone();
        let timer = Timeout::new(NOTICE_HIDE_MS, move || {
            if let Some(app) = this.upgrade() {
                app.notice.set(None);
            }
        });
        self.notice_timer.replace(Some(timer));
    }

    pub fn success(&self, text: &str) {
        if R::SUCCESS_NOTICES {
            self.notify(NoticeKind::Success, text);
        }
    }

    pub fn failure(&self, err: &ApiError) {
        log::warn!("{} action failed: {err}", R::NOUN);
        self.notify(NoticeKind::Error, &err.to_string());
    }
}
