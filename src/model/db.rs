//! Database model type aliases.
//!
//! Short names for the SeaORM models of the `entity` crate, used throughout the data and service
//! layers.

/// Top-level medical-device product line, unique by name.
pub type ProjectModel = entity::project::Model;

/// Device belonging to exactly one project.
///
/// # Fields (from `entity::device::Model`)
/// - `device_type` - Free-form device type, stored in the `type` column
/// - `specifications` - Free-form technical specifications
pub type DeviceModel = entity::device::Model;

/// Versioned release of a device.
///
/// # Fields (from `entity::version::Model`)
/// - `version_number` - `v<N>` for new versions, `R-v<B>-<S>` for renewals
/// - `kind` - Whether the row is a new version or a renewal
/// - `base_version_id` - The new version a renewal is based on, `None` for new versions
pub type VersionModel = entity::version::Model;

/// Regulatory jurisdiction, unique by name ignoring case.
pub type MarketModel = entity::market::Model;

/// Regulatory approval of one version of a project's device in one market.
pub type LicenseModel = entity::license::Model;

pub type NotificationModel = entity::notification::Model;
