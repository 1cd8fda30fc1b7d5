use serde::{Deserialize, Serialize};

/// Default refresh interval for quote polling, in milliseconds.
pub const DEFAULT_REFRESH_MS: u64 = 30_000;

/// Smallest refresh interval a document may carry.
pub const MIN_REFRESH_MS: u64 = 5_000;

/// Defaults applied while migrating and repairing documents.
///
/// Every field has a default, so a partial (or empty) config deserializes
/// cleanly. The placeholder names are user-visible and localized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// `refreshMs` written when the stored value is missing or invalid.
    pub default_refresh_ms: u64,

    /// Stored `refreshMs` values below this are replaced by the default.
    pub min_refresh_ms: u64,

    /// Name of the portfolio a legacy document is migrated into, and of the
    /// one inserted when a document has no portfolios ("Default Portfolio").
    pub default_portfolio_name: String,

    /// Name given to a portfolio created without one ("New Portfolio").
    pub new_portfolio_name: String,

    /// Name given to a stored portfolio whose name is blank ("Unnamed Portfolio").
    pub unnamed_portfolio_name: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            default_refresh_ms: DEFAULT_REFRESH_MS,
            min_refresh_ms: MIN_REFRESH_MS,
            default_portfolio_name: "默认账本".to_string(),
            new_portfolio_name: "新账本".to_string(),
            unnamed_portfolio_name: "未命名账本".to_string(),
        }
    }
}
