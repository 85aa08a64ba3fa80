pub static PROP_HTML: &'static str = "innerHTML";
pub static PROP_PLACEHOLDER: &'static str = "placeholder";
pub static PROP_TITLE: &'static str = "title";
pub static PROP_NAME: &'static str = "name";
pub static PROP_TYPE: &'static str = "type";
pub static PROP_VALUE: &'static str = "value";
pub static PROP_MIN: &'static str = "min";
pub static PROP_ROWS: &'static str = "rows";

pub static TAG_DIV: &'static str = "div";
pub static TAG_SPAN: &'static str = "span";
pub static TAG_INPUT: &'static str = "input";
pub static TAG_TEXTAREA: &'static str = "textarea";
pub static TAG_BUTTON: &'static str = "button";
pub static TAG_LABEL: &'static str = "label";
pub static TAG_H1: &'static str = "h1";
pub static TAG_H2: &'static str = "h2";

pub static INPUT_PASSWORD: &'static str = "password";
pub static INPUT_EMAIL: &'static str = "email";
pub static INPUT_SEARCH: &'static str = "search";
pub static INPUT_DATETIME: &'static str = "datetime-local";

pub static KEY_ENTER: &'static str = "Enter";
pub static KEY_ESCAPE: &'static str = "Escape";
pub static KEY_NEW: &'static str = "n";

pub static FIELD_USERNAME: &'static str = "username";
pub static FIELD_EMAIL: &'static str = "email";
pub static FIELD_PASSWORD: &'static str = "password";
pub static FIELD_CONFIRM: &'static str = "confirm-password";
pub static FIELD_TITLE: &'static str = "record-title";
pub static FIELD_BODY: &'static str = "record-body";
pub static FIELD_SCHEDULE: &'static str = "record-schedule";
pub static FIELD_SEARCH: &'static str = "search";

pub static NOTICE_HIDE_MS: u32 = 5_000;
