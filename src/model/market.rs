use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMarket {
    pub name: String,
    pub region: String,
    pub regulatory_body: String,
    pub requirements: String,
}

/// Partial market update, fields left as `None` are preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketPatch {
    pub name: Option<String>,
    pub region: Option<String>,
    pub regulatory_body: Option<String>,
    pub requirements: Option<String>,
    pub status: Option<String>,
}
