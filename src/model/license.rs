use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status given to licenses created without one
pub const DEFAULT_LICENSE_STATUS: &str = "pending";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLicense {
    pub project_id: i32,
    pub market_id: i32,
    pub version_id: i32,
    pub license_number: String,
    /// Defaults to `pending`
    pub status: Option<String>,
    pub issued_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub notes: String,
}

/// Partial license update, fields left as `None` are preserved.
///
/// `Some(None)` clears a date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicensePatch {
    pub license_number: Option<String>,
    pub status: Option<String>,
    pub issued_date: Option<Option<NaiveDate>>,
    pub expiry_date: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
}
