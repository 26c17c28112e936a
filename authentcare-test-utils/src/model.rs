//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main authentcare crate.

pub type ProjectModel = entity::project::Model;
pub type DeviceModel = entity::device::Model;
pub type VersionModel = entity::version::Model;
pub type MarketModel = entity::market::Model;
pub type LicenseModel = entity::license::Model;
pub type NotificationModel = entity::notification::Model;
