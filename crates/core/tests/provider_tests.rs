// ═══════════════════════════════════════════════════════════════════
// Provider Tests — id generators
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashSet;

use fund_ledger_core::providers::pseudo_random::PseudoRandomIdGenerator;
use fund_ledger_core::providers::system::SystemIdGenerator;
use fund_ledger_core::providers::traits::IdGenerator;
use uuid::{Uuid, Variant};

fn assert_v4(id: &str) {
    assert_eq!(id.len(), 36, "unexpected length: {id}");
    let parsed = Uuid::parse_str(id).unwrap();
    assert_eq!(parsed.get_version_num(), 4, "not v4: {id}");
    assert_eq!(parsed.get_variant(), Variant::RFC4122, "bad variant: {id}");
    assert_eq!(id, id.to_lowercase());
    let dashes: Vec<usize> = id.match_indices('-').map(|(i, _)| i).collect();
    assert_eq!(dashes, vec![8, 13, 18, 23]);
}

// ═══════════════════════════════════════════════════════════════════
// SystemIdGenerator
// ═══════════════════════════════════════════════════════════════════

mod system {
    use super::*;

    #[test]
    fn produces_v4_uuid() {
        let g = SystemIdGenerator::new();
        assert_v4(&g.generate_id());
    }

    #[test]
    fn ids_are_unique() {
        let g = SystemIdGenerator::new();
        let ids: HashSet<String> = (0..1000).map(|_| g.generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn name() {
        assert_eq!(SystemIdGenerator::new().name(), "system");
    }

    #[test]
    fn free_function_matches_format() {
        assert_v4(&fund_ledger_core::generate_id());
    }
}

// ═══════════════════════════════════════════════════════════════════
// PseudoRandomIdGenerator
// ═══════════════════════════════════════════════════════════════════

mod pseudo_random {
    use super::*;

    #[test]
    fn produces_v4_uuid() {
        let g = PseudoRandomIdGenerator::with_seed(7);
        for _ in 0..200 {
            assert_v4(&g.generate_id());
        }
    }

    #[test]
    fn version_and_variant_digits() {
        let g = PseudoRandomIdGenerator::with_seed(12345);
        for _ in 0..200 {
            let id = g.generate_id();
            assert_eq!(&id[14..15], "4");
            assert!(matches!(&id[19..20], "8" | "9" | "a" | "b"), "variant digit in {id}");
        }
    }

    #[test]
    fn deterministic_for_seed() {
        let a = PseudoRandomIdGenerator::with_seed(99);
        let b = PseudoRandomIdGenerator::with_seed(99);
        let seq_a: Vec<String> = (0..5).map(|_| a.generate_id()).collect();
        let seq_b: Vec<String> = (0..5).map(|_| b.generate_id()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = PseudoRandomIdGenerator::with_seed(1);
        let b = PseudoRandomIdGenerator::with_seed(2);
        assert_ne!(a.generate_id(), b.generate_id());
    }

    #[test]
    fn no_repeats_in_sequence() {
        let g = PseudoRandomIdGenerator::with_seed(3);
        let ids: HashSet<String> = (0..1000).map(|_| g.generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn clock_seeded_is_valid() {
        assert_v4(&PseudoRandomIdGenerator::new().generate_id());
    }

    #[test]
    fn usable_as_trait_object() {
        let g: Box<dyn IdGenerator> = Box::new(PseudoRandomIdGenerator::with_seed(5));
        assert_eq!(g.name(), "pseudo-random");
        assert_v4(&g.generate_id());
    }
}
