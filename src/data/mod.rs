//! Repositories over the `entity` tables.
//!
//! Repositories are generic over [`sea_orm::ConnectionTrait`] so the same queries run against
//! the pooled connection or inside a transaction. They perform no validation; that lives in the
//! service layer.

pub mod device;
pub mod license;
pub mod market;
pub mod notification;
pub mod project;
pub mod version;
