use serde::{Deserialize, Serialize};

/// Kind given to notifications created without one
pub const DEFAULT_NOTIFICATION_KIND: &str = "info";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    /// Defaults to `info`
    pub kind: Option<String>,
}
