//! Inputs, outputs and type aliases shared by the data and service layers.

pub mod bulk_delete;
pub mod db;
pub mod device;
pub mod license;
pub mod list;
pub mod market;
pub mod notification;
pub mod project;
pub mod version;
