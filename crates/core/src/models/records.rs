use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::shape::{is_field_truthy, is_truthy, key_part};

/// A fund record inside a portfolio.
///
/// The record is opaque to this crate (quotes, names, cost basis... belong to
/// the app), except for `code`, which is the identity key every other
/// collection refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fund(pub Value);

impl Fund {
    /// Minimal fund record carrying only its code.
    pub fn new(code: impl Into<String>) -> Self {
        let mut obj = Map::new();
        obj.insert("code".into(), Value::String(code.into()));
        Self(Value::Object(obj))
    }

    /// The fund's identity key: its `code` in text form, when the code is
    /// truthy. Numeric codes (`110022`) key the same as `"110022"`.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        let code = self.0.get("code").filter(|c| is_truthy(c))?;
        Some(key_part(Some(code)))
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Fund {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A user-defined group of funds: `{id, codes, ...}`.
///
/// Stored as raw JSON so migration and validation carry it over exactly as
/// written; only merging reads `id` and `codes` and rewrites `codes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(pub Value);

impl Group {
    pub fn new(id: impl Into<String>, codes: Vec<String>) -> Self {
        let mut obj = Map::new();
        obj.insert("id".into(), Value::String(id.into()));
        obj.insert(
            "codes".into(),
            Value::Array(codes.into_iter().map(Value::String).collect()),
        );
        Self(Value::Object(obj))
    }

    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    /// Key groups are matched on while merging. Ids compare by text form,
    /// so `1`, `1.0` and `"1"` are the same group; a missing id keys as `""`.
    #[must_use]
    pub fn identity_key(&self) -> String {
        key_part(self.id())
    }

    /// Member codes; empty when `codes` is missing or not an array.
    #[must_use]
    pub fn codes(&self) -> &[Value] {
        self.0
            .get("codes")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Any other field of the group (label, colour...).
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Copy of this group with `codes` replaced and every other field kept.
    /// A non-object group becomes `{codes}`.
    #[must_use]
    pub fn with_codes(&self, codes: Vec<Value>) -> Self {
        let mut obj = self.0.as_object().cloned().unwrap_or_default();
        obj.insert("codes".into(), Value::Array(codes));
        Self(Value::Object(obj))
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Group {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// An unsettled buy/sell instruction.
///
/// Opaque apart from `fundCode` (the fund it targets) and the fields that
/// make up its identity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingTrade(pub Value);

impl PendingTrade {
    /// The targeted fund code in text form, when it is truthy.
    #[must_use]
    pub fn fund_code(&self) -> Option<String> {
        let code = self.0.get("fundCode").filter(|c| is_truthy(c))?;
        Some(key_part(Some(code)))
    }

    /// The trade id, when it is set to something truthy.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id").filter(|v| is_truthy(v))
    }

    /// Key under which two trades are considered the same instruction.
    ///
    /// Trades with an id are keyed by it alone. Id-less trades are keyed by
    /// `(fundCode, type, date, share, amount, isAfter3pm)`. The two key
    /// spaces carry different prefixes so they can never collide.
    #[must_use]
    pub fn identity_key(&self) -> String {
        if let Some(id) = self.id() {
            return format!("id:{}", key_part(Some(id)));
        }
        let field = |name: &str| key_part(self.0.get(name));
        let after_3pm = if is_field_truthy(self.0.get("isAfter3pm")) {
            "1"
        } else {
            "0"
        };
        format!(
            "k:{}|{}|{}|{}|{}|{}",
            field("fundCode"),
            field("type"),
            field("date"),
            field("share"),
            field("amount"),
            after_3pm,
        )
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for PendingTrade {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
