//! Test fixture modules for database record creation.
//!
//! - `hierarchy` - Projects, devices, versions, markets and licenses inserted as raw rows

pub mod hierarchy;
