use std::sync::atomic::{AtomicU64, Ordering};

use super::traits::IdGenerator;

/// Textual layout of a v4 UUID. `x` is any hex digit, `y` is the variant
/// digit (one of `8`, `9`, `a`, `b`).
const UUID_TEMPLATE: &str = "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx";

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Non-cryptographic UUID v4 generator (xorshift64*).
///
/// Used when the platform has no secure random source, and in tests via
/// [`PseudoRandomIdGenerator::with_seed`], where the same seed always
/// produces the same sequence of ids.
#[derive(Debug)]
pub struct PseudoRandomIdGenerator {
    state: AtomicU64,
}

impl PseudoRandomIdGenerator {
    /// Seeded from the wall clock.
    pub fn new() -> Self {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .unsigned_abs();
        Self::with_seed(nanos)
    }

    /// Deterministic generator. A zero seed is remapped (xorshift has no
    /// zero state).
    pub fn with_seed(seed: u64) -> Self {
        let seed = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self {
            state: AtomicU64::new(seed),
        }
    }

    fn next_u64(&self) -> u64 {
        let mut current = self.state.load(Ordering::Relaxed);
        loop {
            let next = xorshift(current);
            match self.state.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next.wrapping_mul(0x2545_F491_4F6C_DD1D),
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for PseudoRandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for PseudoRandomIdGenerator {
    fn name(&self) -> &str {
        "pseudo-random"
    }

    fn generate_id(&self) -> String {
        let mut bits = self.next_u64();
        let mut remaining = 16;
        UUID_TEMPLATE
            .chars()
            .map(|c| {
                if c != 'x' && c != 'y' {
                    return c;
                }
                if remaining == 0 {
                    bits = self.next_u64();
                    remaining = 16;
                }
                let nibble = (bits & 0xf) as usize;
                bits >>= 4;
                remaining -= 1;
                let digit = if c == 'x' { nibble } else { (nibble & 0x3) | 0x8 };
                char::from(HEX[digit])
            })
            .collect()
    }
}

fn xorshift(mut x: u64) -> u64 {
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let a = PseudoRandomIdGenerator::with_seed(42);
        let b = PseudoRandomIdGenerator::with_seed(42);
        assert_eq!(a.generate_id(), b.generate_id());
        assert_eq!(a.generate_id(), b.generate_id());
    }

    #[test]
    fn zero_seed_still_varies() {
        let g = PseudoRandomIdGenerator::with_seed(0);
        assert_ne!(g.generate_id(), g.generate_id());
    }
}
