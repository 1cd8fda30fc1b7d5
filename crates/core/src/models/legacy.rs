use serde_json::{Map, Value};

use super::records::{Fund, Group, PendingTrade};
use super::shape;

/// Lenient view of a v1 (single-portfolio) document.
///
/// v1 documents kept one ledger's collections at the top level. Each field is
/// `None` when it was missing or had the wrong type, so callers decide the
/// default. Collections are copied entry for entry; nothing here checks that
/// they agree with each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyDocument {
    /// `refreshMs`, only when it already satisfies the floor.
    pub refresh_ms: Option<u64>,
    pub funds: Option<Vec<Fund>>,
    pub favorites: Option<Vec<Value>>,
    pub groups: Option<Vec<Group>>,
    pub holdings: Option<Map<String, Value>>,
    pub pending_trades: Option<Vec<PendingTrade>>,
}

impl LegacyDocument {
    /// Read the v1 fields out of an arbitrary value. Non-objects yield an
    /// all-`None` view.
    #[must_use]
    pub fn from_value(value: &Value, min_refresh_ms: u64) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            refresh_ms: shape::refresh_ms_field(obj, "refreshMs", min_refresh_ms),
            funds: shape::array_field(obj, "funds")
                .map(|funds| funds.iter().cloned().map(Fund).collect()),
            favorites: shape::array_field(obj, "favorites").cloned(),
            groups: shape::array_field(obj, "groups")
                .map(|groups| groups.iter().cloned().map(Group).collect()),
            holdings: shape::object_field(obj, "holdings").cloned(),
            pending_trades: shape::array_field(obj, "pendingTrades")
                .map(|trades| trades.iter().cloned().map(PendingTrade).collect()),
        }
    }
}
