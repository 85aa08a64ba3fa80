use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, Signal, SignalExt};

use crate::collection::CollectionClient;
use crate::constants::ApiProfile;
use crate::dates::{schedule_input_value, Clock};
use crate::error::ApiError;
use crate::filter;
use crate::resource::{Record, Resource};
use crate::session::SessionManager;
use crate::storage::Storage;
use crate::transport::Transport;
use crate::types::{CredentialsForm, RecordForm, User};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Unauthenticated,
    Authenticated,
}

/// Target of the open dialog, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<I> {
    None,
    /// `None` inside means a new record.
    Editing(Option<I>),
    ConfirmingDelete(I),
}

impl<I> Default for Selection<I> {
    fn default() -> Self {
        Selection::None
    }
}

impl<I> Selection<I> {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Saved {
    Created,
    Updated,
}

/// Everything the record list is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<I> {
    pub records: Vec<I>,
    pub filter: String,
    pub pending: BTreeSet<String>,
}

impl<I: Record> Listing<I> {
    pub fn visible(&self) -> Vec<&I> {
        filter::apply(&self.records, &self.filter)
    }
}

struct Busy<'a>(&'a Mutable<u32>);

impl<'a> Busy<'a> {
    fn new(counter: &'a Mutable<u32>) -> Self {
        counter.replace_with(|n| *n + 1);
        Self(counter)
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.0.replace_with(|n| n.saturating_sub(1));
    }
}

/// Session, record list, selection and filter of one application.
///
/// Every successful mutation is followed by a full `list()`; the local list
/// is never patched.
pub struct Controller<R: Resource> {
    transport: Rc<dyn Transport>,
    clock: Rc<dyn Clock>,
    sessions: SessionManager<Rc<dyn Storage>>,
    client: CollectionClient<R>,
    records: Mutable<Vec<R::Item>>,
    selection: Mutable<Selection<R::Item>>,
    filter: Mutable<String>,
    pending: Mutable<BTreeSet<String>>,
    loading: Mutable<u32>,
}

impl<R: Resource> Controller<R> {
    pub fn new(transport: Rc<dyn Transport>, storage: Rc<dyn Storage>, clock: Rc<dyn Clock>) -> Self {
        Self {
            transport,
            clock,
            sessions: SessionManager::new(R::profile(), storage),
            client: CollectionClient::new(),
            records: Mutable::new(vec![]),
            selection: Mutable::new(Selection::None),
            filter: Mutable::new(String::new()),
            pending: Mutable::new(BTreeSet::new()),
            loading: Mutable::new(0),
        }
    }

    pub fn profile(&self) -> &'static ApiProfile {
        R::profile()
    }

    pub fn phase(&self) -> Phase {
        if self.sessions.current().is_some() { Phase::Authenticated } else { Phase::Unauthenticated }
    }

    pub fn user(&self) -> Option<User> {
        self.sessions.user()
    }

    pub fn records(&self) -> Vec<R::Item> {
        self.records.get_cloned()
    }

    pub fn selection(&self) -> Selection<R::Item> {
        self.selection.get_cloned()
    }

    pub fn filter(&self) -> String {
        self.filter.get_cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get() > 0
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn clock(&self) -> Rc<dyn Clock> {
        self.clock.clone()
    }

    /// Earliest value the schedule input accepts.
    pub fn schedule_min(&self) -> String {
        schedule_input_value(&self.clock.now(), &*self.clock)
    }

    pub fn listing(&self) -> Listing<R::Item> {
        Listing {
            records: self.records.get_cloned(),
            filter: self.filter.get_cloned(),
            pending: self.pending.get_cloned(),
        }
    }

    // ===

    pub fn phase_signal(&self) -> impl Signal<Item=Phase> {
        self.sessions.is_authenticated_signal()
            .map(|flag| if flag { Phase::Authenticated } else { Phase::Unauthenticated })
    }

    pub fn user_signal(&self) -> impl Signal<Item=Option<User>> {
        self.sessions.user_signal()
    }

    pub fn selection_signal(&self) -> impl Signal<Item=Selection<R::Item>> {
        self.selection.signal_cloned()
    }

    pub fn loading_signal(&self) -> impl Signal<Item=bool> {
        self.loading.signal().map(|n| n > 0).dedupe()
    }

    pub fn count_signal(&self) -> impl Signal<Item=usize> {
        self.records.signal_ref(Vec::len).dedupe()
    }

    pub fn listing_signal(&self) -> impl Signal<Item=Listing<R::Item>> {
        map_ref! {
            let records = self.records.signal_cloned(),
            let filter = self.filter.signal_cloned(),
            let pending = self.pending.signal_cloned() =>
            Listing { records: records.clone(), filter: filter.clone(), pending: pending.clone() }
        }
    }

    // ===

    /// Restores a persisted session and loads the list; a rejected session is dropped silently.
    pub async fn start(&self) -> Result<(), ApiError> {
        let _busy = Busy::new(&self.loading);
        match self.sessions.restore(&*self.transport).await {
            Some(_) => self.first_load().await,
            None => Ok(()),
        }
    }

    pub async fn login(&self, form: &CredentialsForm) -> Result<(), ApiError> {
        let _busy = Busy::new(&self.loading);
        self.sessions.login(&*self.transport, form).await?;
        self.enter();
        self.first_load().await
    }

    pub async fn register(&self, form: &CredentialsForm) -> Result<(), ApiError> {
        let _busy = Busy::new(&self.loading);
        self.sessions.register(&*self.transport, form).await?;
        self.enter();
        self.first_load().await
    }

    pub fn logout(&self) {
        self.sessions.logout();
        self.records.set(vec![]);
        self.selection.set(Selection::None);
        self.filter.set(String::new());
        self.pending.set(BTreeSet::new());
    }

    /// Replaces the local list with the server's.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let _busy = Busy::new(&self.loading);
        let token = self.sessions.token();
        let res = self.client.list(&*self.transport, token.as_deref()).await;
        let records = self.guard(res)?;
        self.records.set(records);
        Ok(())
    }

    /// List that opens a session. Profiles with `logout_on_list_failure`
    /// give the session up on any error; others only on an auth error.
    async fn first_load(&self) -> Result<(), ApiError> {
        let res = self.refresh().await;
        if let Err(err) = &res {
            if R::profile().logout_on_list_failure && self.phase() == Phase::Authenticated {
                log::warn!("first list failed, closing session: {err}");
                self.logout();
            }
        }
        res
    }

    fn enter(&self) {
        self.records.set(vec![]);
        self.selection.set(Selection::None);
    }

    /// Drops the session when the server rejects the token.
    fn guard<X>(&self, res: Result<X, ApiError>) -> Result<X, ApiError> {
        if let Err(err) = &res {
            if err.is_auth() {
                log::warn!("authentication rejected: {err}");
                self.logout();
            }
        }
        res
    }

    fn find(&self, id: &str) -> Option<R::Item> {
        self.records.lock_ref().iter().find(|row| row.id() == id).cloned()
    }

    // ===

    pub fn open_new(&self) {
        if self.phase() == Phase::Authenticated {
            self.selection.set(Selection::Editing(None));
        }
    }

    pub fn open_edit(&self, id: &str) -> bool {
        match self.find(id) {
            Some(record) => {
                self.selection.set(Selection::Editing(Some(record)));
                true
            }
            None => false
        }
    }

    pub fn open_delete(&self, id: &str) -> bool {
        match self.find(id) {
            Some(record) => {
                self.selection.set(Selection::ConfirmingDelete(record));
                true
            }
            None => false
        }
    }

    pub fn close(&self) {
        self.selection.set_neq(Selection::None);
    }

    /// Values for the dialog of the current selection.
    pub fn form_values(&self) -> RecordForm {
        match &*self.selection.lock_ref() {
            Selection::Editing(Some(record)) => R::form_values(Some(record), &*self.clock),
            _ => R::form_values(None, &*self.clock),
        }
    }

    pub fn set_filter(&self, query: &str) {
        self.filter.set_neq(query.to_string());
    }

    // ===

    /// Updates the record being edited, or creates a new one.
    pub async fn submit(&self, form: &RecordForm) -> Result<Saved, ApiError> {
        let now = self.clock.now();
        let selection = self.selection.get_cloned();
        let token = self.sessions.token();

        let saved = match &selection {
            Selection::Editing(Some(record)) => {
                let data = R::validate_update(record, form, &now, &*self.clock)?;
                let _busy = Busy::new(&self.loading);
                let res = self.client.update(&*self.transport, token.as_deref(), record.id(), &data).await;
                self.guard(res)?;
                Saved::Updated
            }
            _ => {
                let data = R::validate_create(form, &now, &*self.clock)?;
                let _busy = Busy::new(&self.loading);
                let res = self.client.create(&*self.transport, token.as_deref(), &data).await;
                self.guard(res)?;
                Saved::Created
            }
        };

        if matches!(selection, Selection::Editing(_)) {
            self.close();
        }
        self.refresh().await?;
        Ok(saved)
    }

    pub async fn confirm_delete(&self) -> Result<(), ApiError> {
        let record = match self.selection.get_cloned() {
            Selection::ConfirmingDelete(record) => record,
            _ => return Ok(()),
        };
        let token = self.sessions.token();
        {
            let _busy = Busy::new(&self.loading);
            let res = self.client.remove(&*self.transport, token.as_deref(), record.id()).await;
            self.guard(res)?;
        }
        self.close();
        self.refresh().await
    }

    /// Flips completion through the server. The row stays in its server
    /// state while the call is in flight; `Ok(None)` means nothing was sent.
    pub async fn toggle(&self, id: &str) -> Result<Option<R::Item>, ApiError> {
        let record = self.find(id).ok_or_else(|| ApiError::NotFound(format!("{} not found", R::NOUN)))?;
        let data = match R::toggled(&record) {
            Some(data) => data,
            None => return Ok(None),
        };
        if !self.pending.lock_mut().insert(id.to_string()) {
            return Ok(None);
        }

        let token = self.sessions.token();
        let res = {
            let _busy = Busy::new(&self.loading);
            self.client.update(&*self.transport, token.as_deref(), id, &data).await
        };
        self.pending.lock_mut().remove(id);

        match self.guard(res) {
            Ok(item) => {
                self.refresh().await?;
                Ok(Some(item))
            }
            Err(err) => {
                if !err.is_auth() {
                    if let Err(sync) = self.refresh().await {
                        log::warn!("resync after failed toggle: {sync}");
                    }
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use futures::executor::block_on;

    use super::*;
    use crate::dates::FixedClock;
    use crate::resource::{Notes, Todos};
    use crate::storage::MemoryStorage;
    use crate::transport::stub::StubTransport;
    use crate::transport::Method;

    const AUTH_OK: &str = r#"{"token":"tok-1","user":{"id":"u1","username":"alice"}}"#;

    fn note_json(id: &str, title: &str) -> String {
        format!(r#"{{"id":"{id}","title":"{title}","content":"body of {title}",
            "created_at":"2026-10-15T08:00:00Z","updated_at":"2026-10-15T08:00:00Z"}}"#)
    }

    fn notes_json(items: &[(&str, &str)]) -> String {
        let rows = items.iter().map(|(id, title)| note_json(id, title)).collect::<Vec<_>>().join(",");
        format!(r#"{{"notes":[{rows}],"total":{}}}"#, items.len())
    }

    fn todo_json(id: &str, completed: bool, scheduled: &str) -> String {
        format!(r#"{{"id":"{id}","title":"Task {id}","description":"d","completed":{completed},
            "scheduled_for":{scheduled},"created_at":"2026-10-15T08:00:00Z","updated_at":"2026-10-15T08:00:00Z"}}"#)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    struct Fixture<R: Resource> {
        controller: Controller<R>,
        transport: Rc<StubTransport>,
        storage: Rc<MemoryStorage>,
    }

    fn fixture<R: Resource>(transport: StubTransport) -> Fixture<R> {
        fixture_with(transport, FixedClock::utc(now()))
    }

    fn fixture_with<R: Resource>(transport: StubTransport, clock: FixedClock) -> Fixture<R> {
        let transport = Rc::new(transport);
        let storage = Rc::new(MemoryStorage::new());
        let controller = Controller::new(transport.clone(), storage.clone(), Rc::new(clock));
        Fixture { controller, transport, storage }
    }

    fn signed_in<R: Resource>(transport: StubTransport) -> Fixture<R> {
        let fx = fixture::<R>(transport);
        block_on(fx.controller.login(&CredentialsForm::login("alice", "secret1"))).unwrap();
        fx
    }

    #[test]
    fn login_lists_exactly_once() {
        let fx = fixture::<Notes>(StubTransport::new().reply(200, AUTH_OK).reply(200, &notes_json(&[("n1", "a")])));
        assert_eq!(fx.controller.phase(), Phase::Unauthenticated);
        block_on(fx.controller.login(&CredentialsForm::login("alice", "secret1"))).unwrap();

        assert_eq!(fx.controller.phase(), Phase::Authenticated);
        assert_eq!(fx.transport.count(Method::Get, "/api/notes"), 1);
        assert_eq!(fx.transport.calls(), 2);
        assert_eq!(fx.controller.records().len(), 1);
        assert!(!fx.controller.is_loading());
    }

    #[test]
    fn register_lists_exactly_once() {
        let fx = fixture::<Todos>(StubTransport::new().reply(201, AUTH_OK).reply(200, "[]"));
        let form = CredentialsForm { email: Some("a@x.io".into()), ..CredentialsForm::login("alice", "secret1") };
        block_on(fx.controller.register(&form)).unwrap();
        assert_eq!(fx.controller.phase(), Phase::Authenticated);
        assert_eq!(fx.transport.count(Method::Get, "/api/todos"), 1);
    }

    #[test]
    fn mismatched_passwords_make_no_calls() {
        let fx = fixture::<Notes>(StubTransport::new());
        let form = CredentialsForm { confirm_password: Some("secret2".into()), ..CredentialsForm::login("alice", "secret1") };
        let res = block_on(fx.controller.register(&form));
        assert!(matches!(res, Err(ApiError::Validation(_))));
        assert_eq!(fx.transport.calls(), 0);
        assert_eq!(fx.controller.phase(), Phase::Unauthenticated);
    }

    #[test]
    fn logout_twice_is_harmless() {
        let fx = signed_in::<Notes>(StubTransport::new().reply(200, AUTH_OK).reply(200, &notes_json(&[("n1", "a")])));
        fx.controller.set_filter("a");
        fx.controller.logout();
        fx.controller.logout();
        assert_eq!(fx.controller.phase(), Phase::Unauthenticated);
        assert!(fx.controller.records().is_empty());
        assert!(fx.controller.selection().is_none());
        assert_eq!(fx.controller.filter(), "");
        assert!(fx.storage.is_empty());
    }

    #[test]
    fn create_then_delete_round_trip() {
        let fx = signed_in::<Notes>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, &notes_json(&[("n1", "a")]))
            .reply(201, &note_json("n2", "b"))
            .reply(200, &notes_json(&[("n1", "a"), ("n2", "b")]))
            .reply(204, "")
            .reply(200, &notes_json(&[("n1", "a")])));

        fx.controller.open_new();
        let form = RecordForm { title: "b".into(), body: "body of b".into(), ..RecordForm::default() };
        assert_eq!(block_on(fx.controller.submit(&form)), Ok(Saved::Created));
        assert!(fx.controller.records().iter().any(|n| n.id == "n2"));
        assert!(fx.controller.selection().is_none());

        assert!(fx.controller.open_delete("n2"));
        block_on(fx.controller.confirm_delete()).unwrap();
        assert!(fx.controller.records().iter().all(|n| n.id != "n2"));
        assert_eq!(fx.controller.records().len(), 1);
        assert_eq!(fx.transport.count(Method::Delete, "/api/notes/n2"), 1);
        assert_eq!(fx.transport.count(Method::Get, "/api/notes"), 3);
        assert!(fx.controller.selection().is_none());
    }

    #[test]
    fn edit_prefills_and_updates() {
        let fx = signed_in::<Notes>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, &notes_json(&[("n1", "a")]))
            .reply(200, &note_json("n1", "a2"))
            .reply(200, &notes_json(&[("n1", "a2")])));

        assert!(fx.controller.open_edit("n1"));
        let mut form = fx.controller.form_values();
        assert_eq!(form.title, "a");
        assert_eq!(form.body, "body of a");
        form.title = "a2".into();
        assert_eq!(block_on(fx.controller.submit(&form)), Ok(Saved::Updated));
        assert_eq!(fx.transport.count(Method::Put, "/api/notes/n1"), 1);
        assert_eq!(fx.controller.records()[0].title, "a2");
    }

    #[test]
    fn failed_submit_keeps_the_dialog_open() {
        let fx = signed_in::<Notes>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, &notes_json(&[("n1", "a")]))
            .reply(500, r#"{"error":"note_creation_failed","message":"database down"}"#));

        fx.controller.open_new();
        let form = RecordForm { title: "b".into(), body: "c".into(), ..RecordForm::default() };
        let res = block_on(fx.controller.submit(&form));
        assert_eq!(res, Err(ApiError::Server { status: 500, message: "database down".into() }));
        assert_eq!(fx.controller.selection(), Selection::Editing(None));
        assert_eq!(fx.transport.count(Method::Get, "/api/notes"), 1);
    }

    #[test]
    fn invalid_record_form_makes_no_calls() {
        let fx = signed_in::<Notes>(StubTransport::new().reply(200, AUTH_OK).reply(200, &notes_json(&[])));
        let calls = fx.transport.calls();
        fx.controller.open_new();
        let res = block_on(fx.controller.submit(&RecordForm::default()));
        assert!(matches!(res, Err(ApiError::Validation(_))));
        assert_eq!(fx.transport.calls(), calls);
    }

    #[test]
    fn filter_narrows_without_refetch() {
        let fx = signed_in::<Notes>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, &notes_json(&[("n1", "Buy milk"), ("n2", "Call Bob")])));
        let calls = fx.transport.calls();

        fx.controller.set_filter("bOB");
        let listing = fx.controller.listing();
        let visible = listing.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "n2");
        assert_eq!(listing.records.len(), 2);

        fx.controller.set_filter("");
        assert_eq!(fx.controller.listing().visible().len(), 2);
        assert_eq!(fx.transport.calls(), calls);
    }

    #[test]
    fn past_schedule_is_rejected_locally() {
        let fx = signed_in::<Todos>(StubTransport::new().reply(200, AUTH_OK).reply(200, "[]"));
        let calls = fx.transport.calls();
        let form = RecordForm { title: "Late".into(), schedule: "2026-10-17T11:59".into(), ..RecordForm::default() };
        assert!(matches!(block_on(fx.controller.submit(&form)), Err(ApiError::Validation(_))));
        assert_eq!(fx.transport.calls(), calls);
    }

    #[test]
    fn future_schedule_is_sent_as_a_timestamp() {
        let fx = signed_in::<Todos>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, "[]")
            .reply(201, &todo_json("t1", false, r#""2026-10-18T09:30:00Z""#))
            .reply(200, &format!("[{}]", todo_json("t1", false, r#""2026-10-18T09:30:00Z""#))));

        let form = RecordForm { title: "Dentist".into(), schedule: "2026-10-18T09:30".into(), ..RecordForm::default() };
        assert_eq!(block_on(fx.controller.submit(&form)), Ok(Saved::Created));

        let request = fx.transport.requests.borrow().iter()
            .find(|r| r.method == Method::Post && r.path == "/api/todos").cloned().unwrap();
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        let sent = DateTime::parse_from_rfc3339(body["scheduled_for"].as_str().unwrap()).unwrap();
        assert_eq!(sent, Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap());
        assert!(body["description"].is_null());
    }

    #[test]
    fn unauthorized_call_signs_out() {
        let fx = signed_in::<Todos>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, &format!("[{}]", todo_json("t1", false, "null")))
            .reply(401, r#"{"error":"Unauthorized"}"#));

        assert!(fx.storage.get("token").is_some());
        assert!(fx.controller.open_delete("t1"));
        let res = block_on(fx.controller.confirm_delete());
        assert!(matches!(res, Err(ApiError::Auth(_))));
        assert_eq!(fx.controller.phase(), Phase::Unauthenticated);
        assert!(fx.controller.records().is_empty());
        assert!(fx.controller.selection().is_none());
        assert!(fx.storage.is_empty());
    }

    #[test]
    fn toggle_sends_full_update_then_refetches() {
        let fx = signed_in::<Todos>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, &format!("[{}]", todo_json("t1", false, r#""2026-10-20T10:00:00Z""#)))
            .reply(200, &todo_json("t1", true, r#""2026-10-20T10:00:00Z""#))
            .reply(200, &format!("[{}]", todo_json("t1", true, r#""2026-10-20T10:00:00Z""#))));

        let item = block_on(fx.controller.toggle("t1")).unwrap().unwrap();
        assert!(item.completed);
        assert!(fx.controller.records()[0].completed);
        assert!(fx.controller.listing().pending.is_empty());

        let request = fx.transport.requests.borrow().iter()
            .find(|r| r.method == Method::Put).cloned().unwrap();
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["completed"], serde_json::json!(true));
        assert!(body["scheduled_for"].is_string());
    }

    #[test]
    fn failed_toggle_resyncs_from_the_server() {
        let fx = signed_in::<Todos>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, &format!("[{}]", todo_json("t1", false, "null")))
            .reply(500, r#"{"error":"Internal server error"}"#)
            .reply(200, &format!("[{}]", todo_json("t1", false, "null"))));

        let res = block_on(fx.controller.toggle("t1"));
        assert_eq!(res, Err(ApiError::Server { status: 500, message: "Internal server error".into() }));
        assert!(!fx.controller.records()[0].completed);
        assert!(fx.controller.listing().pending.is_empty());
        assert_eq!(fx.transport.count(Method::Get, "/api/todos"), 2);
        assert_eq!(fx.controller.phase(), Phase::Authenticated);
    }

    #[test]
    fn failed_first_list_closes_a_notes_session() {
        let fx = fixture::<Notes>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(500, r#"{"message":"db down"}"#));
        let res = block_on(fx.controller.login(&CredentialsForm::login("alice", "secret1")));
        assert_eq!(res, Err(ApiError::Server { status: 500, message: "db down".into() }));
        assert_eq!(fx.controller.phase(), Phase::Unauthenticated);
        assert!(fx.storage.is_empty());
        assert!(!fx.controller.is_loading());
    }

    #[test]
    fn failed_first_list_after_restore_closes_a_notes_session() {
        let fx = fixture::<Notes>(StubTransport::new()
            .reply(200, r#"{"id":"u1","username":"alice"}"#)
            .fail(ApiError::Network("Network error occurred".into())));
        fx.storage.set("auth_token", "tok-3");
        let res = block_on(fx.controller.start());
        assert_eq!(res, Err(ApiError::Network("Network error occurred".into())));
        assert_eq!(fx.controller.phase(), Phase::Unauthenticated);
        assert!(fx.storage.is_empty());
    }

    #[test]
    fn unreachable_server_after_login_keeps_a_todo_session() {
        let fx = fixture::<Todos>(StubTransport::new()
            .reply(200, AUTH_OK)
            .fail(ApiError::Network("Network error occurred".into())));
        let res = block_on(fx.controller.login(&CredentialsForm::login("alice", "secret1")));
        assert_eq!(res, Err(ApiError::Network("Network error occurred".into())));
        assert_eq!(fx.controller.phase(), Phase::Authenticated);
        assert_eq!(fx.storage.get("token").as_deref(), Some("tok-1"));
        assert!(fx.controller.records().is_empty());
        assert!(!fx.controller.is_loading());
    }

    #[test]
    fn second_toggle_while_in_flight_sends_nothing() {
        let (transport, release) = StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, &format!("[{}]", todo_json("t1", false, "null")))
            .reply(200, &todo_json("t1", true, "null"))
            .reply(200, &format!("[{}]", todo_json("t1", true, "null")))
            .hold(Method::Put);
        let fx = signed_in::<Todos>(transport);
        let controller = &fx.controller;

        let (first, second) = block_on(async move {
            let first = controller.toggle("t1");
            let second = async move {
                assert!(controller.listing().pending.contains("t1"));
                assert!(controller.is_loading());
                let second = controller.toggle("t1").await;
                release.send(()).unwrap();
                second
            };
            futures::join!(first, second)
        });

        assert_eq!(second, Ok(None));
        assert!(first.unwrap().unwrap().completed);
        assert_eq!(fx.transport.count(Method::Put, "/api/todos/t1"), 1);
        assert!(fx.controller.listing().pending.is_empty());
        assert!(fx.controller.records()[0].completed);
    }

    #[test]
    fn schedule_across_a_clock_change_keeps_its_wall_time() {
        let summer = FixedOffset::east_opt(2 * 3600).unwrap();
        let winter = FixedOffset::east_opt(3600).unwrap();
        let clock = FixedClock::zoned(now(), summer)
            .changing_at(Utc.with_ymd_and_hms(2026, 10, 25, 1, 0, 0).unwrap(), winter);
        let stored = r#""2026-11-01T08:30:00Z""#;
        let fx = fixture_with::<Todos>(StubTransport::new()
            .reply(200, AUTH_OK)
            .reply(200, "[]")
            .reply(201, &todo_json("t1", false, stored))
            .reply(200, &format!("[{}]", todo_json("t1", false, stored))), clock);
        block_on(fx.controller.login(&CredentialsForm::login("alice", "secret1"))).unwrap();

        let form = RecordForm { title: "Dentist".into(), schedule: "2026-11-01T09:30".into(), ..RecordForm::default() };
        assert_eq!(block_on(fx.controller.submit(&form)), Ok(Saved::Created));
        let request = fx.transport.requests.borrow().iter()
            .find(|r| r.method == Method::Post).cloned().unwrap();
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        let sent = DateTime::parse_from_rfc3339(body["scheduled_for"].as_str().unwrap()).unwrap();
        assert_eq!(sent, Utc.with_ymd_and_hms(2026, 11, 1, 8, 30, 0).unwrap());

        assert!(fx.controller.open_edit("t1"));
        assert_eq!(fx.controller.form_values().schedule, "2026-11-01T09:30");
    }

    #[test]
    fn start_restores_and_lists() {
        let fx = fixture::<Todos>(StubTransport::new().reply(200, "[]"));
        fx.storage.set("token", "tok-7");
        fx.storage.set("user", r#"{"id":"u7","username":"kim"}"#);
        block_on(fx.controller.start()).unwrap();
        assert_eq!(fx.controller.phase(), Phase::Authenticated);
        assert_eq!(fx.controller.user().map(|u| u.username), Some("kim".to_string()));
        assert_eq!(fx.transport.last().unwrap().bearer.as_deref(), Some("tok-7"));
    }

    #[test]
    fn start_without_session_stays_signed_out() {
        let fx = fixture::<Notes>(StubTransport::new());
        block_on(fx.controller.start()).unwrap();
        assert_eq!(fx.controller.phase(), Phase::Unauthenticated);
        assert_eq!(fx.transport.calls(), 0);
    }

    #[test]
    fn close_clears_selection() {
        let fx = signed_in::<Notes>(StubTransport::new().reply(200, AUTH_OK).reply(200, &notes_json(&[("n1", "a")])));
        assert!(fx.controller.open_edit("n1"));
        fx.controller.close();
        assert!(fx.controller.selection().is_none());
        assert!(!fx.controller.open_edit("missing"));
        assert!(fx.controller.selection().is_none());
    }
}
