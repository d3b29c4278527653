//! Calendar export configuration.

use serde::{Deserialize, Serialize};

/// Settings for the iCalendar writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// `PRODID` written into every document.
    #[serde(default = "default_product_id")]
    pub product_id: String,
    /// Domain appended to event ids to build `UID`s.
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
    /// Length of every exported event.
    #[serde(default = "default_duration")]
    pub default_duration_minutes: i64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            product_id: default_product_id(),
            uid_domain: default_uid_domain(),
            default_duration_minutes: default_duration(),
        }
    }
}

fn default_product_id() -> String {
    "-//WorldExplorer//EN".to_string()
}

fn default_uid_domain() -> String {
    "worldexplorer.app".to_string()
}

fn default_duration() -> i64 {
    120
}
