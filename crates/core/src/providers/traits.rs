/// Source of unique identifiers for new portfolios.
///
/// Injected wherever ids are minted, so tests can swap in a deterministic
/// generator. Implementations must return a syntactically valid version-4
/// UUID string and must never fail.
pub trait IdGenerator: Send + Sync {
    /// Human-readable name of this generator (for logs).
    fn name(&self) -> &str;

    /// Produce a new identifier.
    fn generate_id(&self) -> String;
}
