use serde_json::Value;

use crate::models::document::CURRENT_VERSION;
use crate::models::shape;

/// Tells v1 documents apart from everything else.
///
/// Pure structural check on three top-level fields (`version`, `funds`,
/// `holdings`); never looks any deeper.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetectionService;

impl DetectionService {
    pub fn new() -> Self {
        Self
    }

    /// `true` when `value` is an object that predates multi-portfolio
    /// documents.
    ///
    /// - non-objects (null, scalars, top-level arrays) are never legacy
    /// - a truthy `version >= 2` means the document is already current
    /// - otherwise the document is legacy if it has a `funds` array or any
    ///   `holdings` key at all, even `null`
    #[must_use]
    pub fn is_legacy_data(&self, value: &Value) -> bool {
        let Some(obj) = value.as_object() else {
            return false;
        };

        let current = obj
            .get("version")
            .filter(|v| shape::is_truthy(v))
            .and_then(shape::version_number)
            .is_some_and(|v| v >= f64::from(CURRENT_VERSION));
        if current {
            return false;
        }

        shape::array_field(obj, "funds").is_some() || obj.contains_key("holdings")
    }
}
