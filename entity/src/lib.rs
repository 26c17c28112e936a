//! SeaORM entities for the AuthenTcare regulatory hierarchy.

pub mod prelude;

pub mod device;
pub mod license;
pub mod market;
pub mod notification;
pub mod project;
pub mod version;

/// Status value every list read filters on unless told otherwise.
pub const STATUS_ACTIVE: &str = "active";

/// Status callers set to retire a row without deleting it.
pub const STATUS_INACTIVE: &str = "inactive";
