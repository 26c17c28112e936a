//! Helpers shared by the version services.
//!
//! Parsing and formatting of hierarchical version identifiers, and the per-device locks that
//! serialize version number assignment.

pub mod lock;
pub mod version_identifier;
