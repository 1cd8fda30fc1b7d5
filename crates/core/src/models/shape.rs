//! Shape checks shared by every lenient parser in the crate.
//!
//! Stored documents come from older app builds and hand-edited files, so
//! fields are read as loose JSON and classified here. Each helper answers
//! one question about one value and never fails.

use serde_json::{Map, Value};

/// JavaScript-style truthiness, which is what older app builds used when
/// deciding whether a field was "set".
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; every array and object
/// (even empty) is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether an optional field is truthy. A missing field is falsy.
#[must_use]
pub fn is_field_truthy(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// The field as an array, or `None` when it is missing or any other type.
#[must_use]
pub fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key).and_then(Value::as_array)
}

/// The field as a (non-array) object, or `None` otherwise.
#[must_use]
pub fn object_field<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}

/// The field rendered as text when it is truthy, `None` when it is missing
/// or falsy. Truthy non-strings (`42`, `true`) are kept in their text form.
#[must_use]
pub fn truthy_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .filter(|v| is_truthy(v))
        .map(|v| key_part(Some(v)))
}

/// A refresh interval that satisfies the floor, or `None` when the field is
/// missing, not a number, or below `min_ms`. Fractional milliseconds are
/// floored.
#[must_use]
pub fn refresh_ms_field(obj: &Map<String, Value>, key: &str, min_ms: u64) -> Option<u64> {
    let value = obj.get(key)?;
    if let Some(ms) = value.as_u64() {
        return (ms >= min_ms).then_some(ms);
    }
    let ms = value.as_f64().filter(|f| f.is_finite())?;
    if ms < min_ms as f64 {
        return None;
    }
    Some(if ms >= u64::MAX as f64 { u64::MAX } else { ms.floor() as u64 })
}

/// Numeric reading of a version tag. Numeric strings count, matching the
/// loose comparison the stored documents were written against.
#[must_use]
pub fn version_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Text form of a scalar used when building composite identity keys.
///
/// Integral numbers render without a fractional part (`100.0` → `"100"`),
/// missing and `null` render as the empty string.
#[must_use]
pub fn key_part(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}
