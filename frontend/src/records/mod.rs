pub mod app_records;
pub mod record_dialog;
pub mod record_events;
