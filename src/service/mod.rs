//! Service layer: validation, uniqueness checks, cascading deletes and version sequencing.
//!
//! Services borrow the [`DatabaseConnection`](sea_orm::DatabaseConnection) held by
//! [`AppContext`](crate::context::AppContext) and open their own transactions where an
//! operation touches more than one row.

pub mod bulk_delete;
pub mod device;
pub mod license;
pub mod market;
pub mod notification;
pub mod project;
pub mod version;
