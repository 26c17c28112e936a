use chrono::NaiveDate;
use entity::version::VersionKind;
use serde::{Deserialize, Serialize};

/// Input of version creation, the version number is always assigned by the sequencer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVersion {
    pub device_id: i32,
    pub kind: VersionKind,
    /// Required for renewals, must be `None` for new versions
    pub base_version_id: Option<i32>,
    pub release_date: Option<NaiveDate>,
    pub changes: String,
}

impl NewVersion {
    pub fn new_version(device_id: i32) -> Self {
        Self {
            device_id,
            kind: VersionKind::NewVersion,
            base_version_id: None,
            release_date: None,
            changes: String::new(),
        }
    }

    pub fn renewal(device_id: i32, base_version_id: i32) -> Self {
        Self {
            device_id,
            kind: VersionKind::Renewal,
            base_version_id: Some(base_version_id),
            release_date: None,
            changes: String::new(),
        }
    }
}

/// Partial version update, fields left as `None` are preserved.
///
/// `release_date: Some(None)` clears the date. Kind, device and base version are fixed at
/// creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionPatch {
    pub version_number: Option<String>,
    pub release_date: Option<Option<NaiveDate>>,
    pub changes: Option<String>,
    pub status: Option<String>,
}
