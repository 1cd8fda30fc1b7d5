use tracing::warn;
use uuid::Builder;

use super::pseudo_random::PseudoRandomIdGenerator;
use super::traits::IdGenerator;

/// Default generator: UUID v4 from the platform's secure random source.
///
/// If the OS (or the browser, on wasm32) cannot supply random bytes, ids
/// come from a [`PseudoRandomIdGenerator`] instead. Those are still
/// well-formed and unlikely to collide for client-local data, but are not
/// safe against an adversary.
#[derive(Debug, Default)]
pub struct SystemIdGenerator {
    fallback: PseudoRandomIdGenerator,
}

impl SystemIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SystemIdGenerator {
    fn name(&self) -> &str {
        "system"
    }

    fn generate_id(&self) -> String {
        let mut bytes = [0u8; 16];
        match getrandom::getrandom(&mut bytes) {
            Ok(()) => Builder::from_random_bytes(bytes)
                .into_uuid()
                .hyphenated()
                .to_string(),
            Err(e) => {
                warn!(error = %e, "secure random source unavailable, using pseudo-random ids");
                self.fallback.generate_id()
            }
        }
    }
}
