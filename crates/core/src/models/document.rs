use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::portfolio::Portfolio;

/// Schema version written into every document this crate produces.
pub const CURRENT_VERSION: u32 = 2;

/// The persisted root object: refresh setting plus all portfolios.
///
/// Documents returned by this crate always have `version == 2`,
/// `refresh_ms >= 5000` and at least one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: u32,

    /// Quote refresh interval in milliseconds.
    pub refresh_ms: u64,

    pub portfolios: Vec<Portfolio>,
}

impl Document {
    /// Look up a portfolio by id.
    #[must_use]
    pub fn portfolio(&self, id: &str) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.id == id)
    }

    /// Serialize to compact JSON for the host to persist.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize document: {e}")))
    }

    /// Serialize to pretty-printed JSON (exports, debugging).
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize document: {e}")))
    }
}
