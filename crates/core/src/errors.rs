use thiserror::Error;

/// Unified error type for the fund-ledger-core library.
///
/// Document operations themselves never fail: malformed input is repaired.
/// Only the JSON text entry points return `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── JSON text ───────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
