//! iCalendar export.

pub mod export;
pub mod format;

pub use export::{CalendarService, attachment_file_name};
