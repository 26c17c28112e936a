use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDevice {
    pub project_id: i32,
    pub name: String,
    pub device_type: String,
    pub specifications: String,
}

/// Partial device update, fields left as `None` are preserved.
///
/// A device cannot be moved to another project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub specifications: Option<String>,
    pub status: Option<String>,
}
