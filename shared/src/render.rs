use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::controller::Listing;
use crate::dates::{format_relative, format_scheduled, is_overdue, Clock};
use crate::resource::{Notes, Record, Resource, Todos};
use crate::types::{Note, Todo};

pub static ATTR_ACTION: &'static str = "action";
pub static ATTR_ID: &'static str = "id";

pub static ACTION_EDIT: &'static str = "edit";
pub static ACTION_DELETE: &'static str = "delete";
pub static ACTION_TOGGLE: &'static str = "toggle";

/// Escapes text for element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One reading of the clock shared by every row of a render.
pub struct RenderContext {
    pub now: DateTime<Utc>,
    pub clock: Rc<dyn Clock>,
}

impl RenderContext {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self { now: clock.now(), clock }
    }

    fn relative(&self, at: &DateTime<Utc>) -> String {
        format_relative(at, &self.now, &*self.clock)
    }

    fn scheduled(&self, at: &DateTime<Utc>) -> String {
        format_scheduled(at, &*self.clock)
    }
}

/// Markup of one record row.
pub trait Render: Resource {
    const EMPTY_TITLE: &'static str;
    const EMPTY_HINT: &'static str;

    /// `busy` marks a row with a request in flight.
    fn card(item: &Self::Item, busy: bool, ctx: &RenderContext) -> String;
}

fn action_button(class: &str, action: &str, id: &str, label: &str) -> String {
    format!(r#"<button type="button" class="{class}" data-{ATTR_ACTION}="{action}" data-{ATTR_ID}="{id}">{label}</button>"#)
}

fn dates_markup<I: Record>(item: &I, ctx: &RenderContext, tag: &str, class: &str) -> String {
    let mut out = format!(r#"<{tag} class="{class}">Created: {}</{tag}>"#, ctx.relative(item.created_at()));
    if item.updated_at() != item.created_at() {
        out.push_str(&format!(r#"<{tag} class="{class}">Updated: {}</{tag}>"#, ctx.relative(item.updated_at())));
    }
    out
}

impl Render for Notes {
    const EMPTY_TITLE: &'static str = "No notes yet";
    const EMPTY_HINT: &'static str = "Create your first note to get started!";

    fn card(note: &Note, _busy: bool, ctx: &RenderContext) -> String {
        let id = escape_html(&note.id);
        format!(
            concat!(
                r#"<div class="note-card" data-{attr}="{id}">"#,
                r#"<div class="note-header"><h3 class="note-title">{title}</h3>"#,
                r#"<div class="note-actions">{edit}{delete}</div></div>"#,
                r#"<div class="note-content">{content}</div>"#,
                r#"<div class="note-meta">{dates}</div>"#,
                "</div>",
            ),
            attr = ATTR_ID,
            id = id,
            title = escape_html(&note.title),
            edit = action_button("note-action-btn edit-btn", ACTION_EDIT, &id, "Edit"),
            delete = action_button("note-action-btn delete-btn", ACTION_DELETE, &id, "Delete"),
            content = escape_html(&note.content),
            dates = dates_markup(note, ctx, "span", "note-date"),
        )
    }
}

impl Render for Todos {
    const EMPTY_TITLE: &'static str = "No todos yet";
    const EMPTY_HINT: &'static str = "Add your first todo above to get started!";

    fn card(todo: &Todo, busy: bool, ctx: &RenderContext) -> String {
        let id = escape_html(&todo.id);
        let mut classes = vec!["todo-item"];
        if todo.completed {
            classes.push("completed");
        }
        classes.push(if todo.scheduled_for.is_some() { "scheduled" } else { "unscheduled" });
        if busy {
            classes.push("busy");
        }

        let schedule = todo.scheduled_for.as_ref().map(|at| {
            let when = ctx.scheduled(at);
            if is_overdue(at, &ctx.now) {
                format!(r#"<div class="todo-schedule">Scheduled for: <span class="overdue">{when} (Overdue)</span></div>"#)
            } else {
                format!(r#"<div class="todo-schedule">Scheduled for: {when}</div>"#)
            }
        });
        let description = todo.description.as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| format!(r#"<div class="todo-description">{}</div>"#, escape_html(d)));

        let mut out = format!(r#"<div class="{}" data-{ATTR_ID}="{id}">"#, classes.join(" "));
        out.push_str(&format!(
            r#"<div class="todo-header"><div class="todo-title"><input type="checkbox" class="todo-checkbox" data-{ATTR_ACTION}="{ACTION_TOGGLE}" data-{ATTR_ID}="{id}"{}{}>"#,
            if todo.completed { " checked" } else { "" },
            if busy { " disabled" } else { "" },
        ));
        out.push_str(&format!(r#"<div class="todo-title-content"><h4>{}</h4>"#, escape_html(&todo.title)));
        out.push_str(&schedule.unwrap_or_default());
        out.push_str(&format!(
            r#"</div></div><div class="todo-actions">{}{}</div></div>"#,
            action_button("btn btn-secondary", ACTION_EDIT, &id, "Edit"),
            action_button("btn btn-danger", ACTION_DELETE, &id, "Delete"),
        ));
        out.push_str(&description.unwrap_or_default());
        out.push_str(&format!(
            r#"<div class="todo-meta"><div class="todo-dates">{}</div><div class="todo-status">Status: <strong>{}</strong></div></div>"#,
            dates_markup(todo, ctx, "div", "todo-date"),
            if todo.completed { "Completed" } else { "Pending" },
        ));
        out.push_str("</div>");
        out
    }
}

fn placeholder(title: &str, hint: &str) -> String {
    format!(r#"<div class="empty-state"><h3>{}</h3><p>{}</p></div>"#, escape_html(title), escape_html(hint))
}

/// Grid markup, or a placeholder when nothing is left to show.
pub fn listing_html<R: Render>(listing: &Listing<R::Item>, ctx: &RenderContext) -> String {
    let visible = listing.visible();
    if listing.records.is_empty() {
        return placeholder(R::EMPTY_TITLE, R::EMPTY_HINT);
    }
    if visible.is_empty() {
        let title = format!("No {}s match \"{}\"", R::NOUN, listing.filter.trim());
        return placeholder(&title, "Try a different search term.");
    }
    visible.iter()
        .map(|item| R::card(item, listing.pending.contains(item.id()), ctx))
        .collect::<Vec<_>>()
        .join("")
}
