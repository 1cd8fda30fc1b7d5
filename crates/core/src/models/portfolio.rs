use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::records::{Fund, Group, PendingTrade};

/// One user-named ledger: its funds plus everything that refers to them.
///
/// Serialized with the camelCase keys the app stores (`createdAt`,
/// `pendingTrades`). Unknown keys written by newer app builds are kept in
/// `extra` and written back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Unique within a document, never changed after creation.
    pub id: String,

    /// Display name shown in the portfolio switcher.
    pub name: String,

    /// RFC 3339 creation timestamp (UTC, millisecond precision).
    pub created_at: String,

    /// Fund records, in insertion order.
    #[serde(default)]
    pub funds: Vec<Fund>,

    /// Codes of starred funds, as stored.
    #[serde(default)]
    pub favorites: Vec<Value>,

    #[serde(default)]
    pub groups: Vec<Group>,

    /// Fund code → holding record (shares, cost...).
    #[serde(default)]
    pub holdings: Map<String, Value>,

    #[serde(default)]
    pub pending_trades: Vec<PendingTrade>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Portfolio {
    /// An empty portfolio with the given identity.
    pub fn empty(
        id: impl Into<String>,
        name: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: created_at.into(),
            funds: Vec::new(),
            favorites: Vec::new(),
            groups: Vec::new(),
            holdings: Map::new(),
            pending_trades: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Identity keys of all funds that carry a code, in fund order.
    #[must_use]
    pub fn fund_codes(&self) -> Vec<String> {
        self.funds.iter().filter_map(Fund::code).collect()
    }

    #[must_use]
    pub fn has_fund(&self, code: &str) -> bool {
        self.funds.iter().any(|f| f.code().as_deref() == Some(code))
    }
}
