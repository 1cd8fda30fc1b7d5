// ═══════════════════════════════════════════════════════════════════
// Integration Tests — LedgerMigrator facade and the load pipeline
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use fund_ledger_core::errors::CoreError;
use fund_ledger_core::models::settings::MigrationConfig;
use fund_ledger_core::providers::pseudo_random::PseudoRandomIdGenerator;
use fund_ledger_core::LedgerMigrator;
use serde_json::{json, Value};

fn migrator() -> LedgerMigrator {
    LedgerMigrator::with_id_generator(
        MigrationConfig::default(),
        Arc::new(PseudoRandomIdGenerator::with_seed(77)),
    )
}

fn legacy_doc() -> Value {
    json!({
        "refreshMs": 15000,
        "funds": [
            { "code": "110022", "name": "易方达消费行业" },
            { "code": "161725", "name": "招商中证白酒" }
        ],
        "favorites": ["161725"],
        "groups": [{ "id": "g-consumer", "name": "消费", "codes": ["110022", "161725"] }],
        "holdings": { "110022": { "share": 1000, "cost": 3.2 } },
        "pendingTrades": [
            { "id": "t-1", "fundCode": "110022", "type": "buy", "amount": 500, "date": "2024-03-01" }
        ]
    })
}

// ── Load pipeline ───────────────────────────────────────────────────

mod upgrade {
    use super::*;

    #[test]
    fn legacy_document_is_migrated() {
        let m = migrator();
        let d = m.upgrade_document(&legacy_doc());
        assert_eq!(d.version, 2);
        assert_eq!(d.refresh_ms, 15_000);
        assert_eq!(d.portfolios.len(), 1);
        let p = &d.portfolios[0];
        assert_eq!(p.name, "默认账本");
        assert_eq!(p.fund_codes(), vec!["110022", "161725"]);
        assert_eq!(p.favorites, vec![json!("161725")]);
        assert_eq!(p.groups[0].codes().len(), 2);
        assert_eq!(p.holdings["110022"]["share"], 1000);
        assert_eq!(p.pending_trades.len(), 1);
    }

    #[test]
    fn v2_document_is_only_validated() {
        let m = migrator();
        let stored = json!({
            "version": 2,
            "refreshMs": 60000,
            "portfolios": [{ "id": "p1", "name": "A", "createdAt": "2024-01-01T00:00:00.000Z", "funds": [] }]
        });
        let d = m.upgrade_document(&stored);
        assert_eq!(d.refresh_ms, 60_000);
        assert_eq!(d.portfolios[0].id, "p1");
        assert!(d.portfolios[0].holdings.is_empty());
    }

    #[test]
    fn garbage_becomes_empty_document() {
        let d = migrator().upgrade_document(&json!("corrupted"));
        assert_eq!(d.portfolios.len(), 1);
        assert_eq!(d.refresh_ms, 30_000);
    }

    #[test]
    fn upgrade_is_stable_on_its_output() {
        let m = migrator();
        let first = m.upgrade_document(&legacy_doc());
        let again = m.upgrade_document(&serde_json::to_value(&first).unwrap());
        assert_eq!(first, again);
    }

    #[test]
    fn upgrade_json_parses_text() {
        let text = serde_json::to_string(&legacy_doc()).unwrap();
        let d = migrator().upgrade_json(&text).unwrap();
        assert_eq!(d.portfolios[0].funds.len(), 2);
    }

    #[test]
    fn upgrade_json_rejects_malformed_text() {
        let err = migrator().upgrade_json("{\"funds\": [").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn upgrade_json_accepts_any_valid_json() {
        let d = migrator().upgrade_json("42").unwrap();
        assert_eq!(d.portfolios.len(), 1);
    }

    #[test]
    fn document_json_roundtrip() {
        let m = migrator();
        let d = m.upgrade_document(&legacy_doc());
        let text = d.to_json().unwrap();
        assert!(text.contains("\"refreshMs\":15000"));
        assert!(text.contains("\"pendingTrades\""));
        let back = m.upgrade_json(&text).unwrap();
        assert_eq!(back, d);
    }
}

// ── Merging into an existing document ───────────────────────────────

mod merge_into_document {
    use super::*;

    #[test]
    fn merges_into_matching_portfolio() {
        let m = migrator();
        let mut doc = m.create_empty_v2_data();
        let second = m.create_portfolio(Some("第二账本"));
        let target = second.id.clone();
        doc.portfolios.push(second);

        let merged = m.merge_legacy_into_document(doc, &target, &legacy_doc());
        assert!(merged.portfolios[0].funds.is_empty());
        let p = merged.portfolio(&target).unwrap();
        assert_eq!(p.name, "第二账本");
        assert_eq!(p.fund_codes(), vec!["110022", "161725"]);
        assert_eq!(p.pending_trades.len(), 1);
    }

    #[test]
    fn unknown_id_leaves_document_unchanged() {
        let m = migrator();
        let mut doc = m.create_empty_v2_data();
        doc.portfolios.push(m.create_portfolio(Some("第二账本")));
        let merged = m.merge_legacy_into_document(doc.clone(), "nope", &legacy_doc());
        assert_eq!(merged, doc);
        assert!(merged.portfolios.iter().all(|p| p.funds.is_empty()));
    }

    #[test]
    fn merging_twice_does_not_duplicate() {
        let m = migrator();
        let doc = m.create_empty_v2_data();
        let id = doc.portfolios[0].id.clone();
        let once = m.merge_legacy_into_document(doc, &id, &legacy_doc());
        let twice = m.merge_legacy_into_document(once.clone(), &id, &legacy_doc());
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_keeps_refresh_setting_of_document() {
        let m = migrator();
        let mut doc = m.create_empty_v2_data();
        doc.refresh_ms = 45_000;
        let id = doc.portfolios[0].id.clone();
        let merged = m.merge_legacy_into_document(doc, &id, &legacy_doc());
        assert_eq!(merged.refresh_ms, 45_000);
        assert_eq!(merged.portfolios[0].funds.len(), 2);
    }
}

// ── Facade ──────────────────────────────────────────────────────────

mod facade {
    use super::*;

    #[test]
    fn custom_config_flows_through() {
        let config = MigrationConfig {
            default_portfolio_name: "Default".into(),
            unnamed_portfolio_name: "Unnamed".into(),
            default_refresh_ms: 20_000,
            ..MigrationConfig::default()
        };
        let m = LedgerMigrator::with_config(config);
        assert_eq!(m.config().default_refresh_ms, 20_000);
        let d = m.migrate_to_v2(&json!({ "funds": [] }), None);
        assert_eq!(d.portfolios[0].name, "Default");
        assert_eq!(d.refresh_ms, 20_000);
        let v = m.validate_v2_data(&json!({ "portfolios": [{}] }));
        assert_eq!(v.portfolios[0].name, "Unnamed");
    }

    #[test]
    fn seeded_migrators_mint_same_ids() {
        assert_eq!(migrator().generate_id(), migrator().generate_id());
    }

    #[test]
    fn facade_matches_services() {
        let m = LedgerMigrator::new();
        assert!(m.is_legacy_data(&legacy_doc()));
        assert!(!m.is_legacy_data(&json!({ "version": 2, "funds": [] })));
        let p = m.create_portfolio(None);
        let merged = m.merge_old_data_to_portfolio(&p, &legacy_doc());
        assert_eq!(merged.id, p.id);
        assert_eq!(merged.funds.len(), 2);
    }

    #[test]
    fn debug_does_not_panic() {
        let debug = format!("{:?}", migrator());
        assert!(debug.contains("LedgerMigrator"));
        assert!(debug.contains("pseudo-random"));
    }
}

// ── Free functions ──────────────────────────────────────────────────

mod free_functions {
    use super::*;
    use fund_ledger_core as ledger;

    #[test]
    fn create_empty_v2_data() {
        let d = ledger::create_empty_v2_data();
        assert_eq!(d.version, 2);
        assert_eq!(d.refresh_ms, 30_000);
        assert_eq!(d.portfolios.len(), 1);
    }

    #[test]
    fn create_portfolio() {
        assert_eq!(ledger::create_portfolio(Some("X")).name, "X");
        assert_eq!(ledger::create_portfolio(None).name, "新账本");
    }

    #[test]
    fn migrate_example() {
        let d = ledger::migrate_to_v2(&json!({ "funds": [{ "code": "A" }], "refreshMs": 1000 }), None);
        assert_eq!(d.refresh_ms, 30_000);
        assert_eq!(serde_json::to_value(&d.portfolios[0].funds).unwrap(), json!([{ "code": "A" }]));
    }

    #[test]
    fn validate_null_matches_empty_shape() {
        let v = ledger::validate_v2_data(&Value::Null);
        let e = ledger::create_empty_v2_data();
        assert_eq!(v.version, e.version);
        assert_eq!(v.refresh_ms, e.refresh_ms);
        assert_eq!(v.portfolios.len(), e.portfolios.len());
        assert_eq!(v.portfolios[0].name, e.portfolios[0].name);
    }

    #[test]
    fn validate_empty_portfolios() {
        assert_eq!(ledger::validate_v2_data(&json!({ "portfolios": [] })).portfolios.len(), 1);
    }

    #[test]
    fn legacy_detection() {
        assert!(ledger::is_legacy_data(&json!({ "funds": [] })));
        assert!(!ledger::is_legacy_data(&json!(null)));
    }

    #[test]
    fn merge_and_upgrade() {
        let p = ledger::create_portfolio(Some("P"));
        let merged = ledger::merge_old_data_to_portfolio(&p, &legacy_doc());
        assert_eq!(merged.favorites, vec![json!("161725")]);
        let d = ledger::upgrade_document(&legacy_doc());
        assert_eq!(d.portfolios[0].funds.len(), 2);
        assert!(ledger::upgrade_json("not json").is_err());
    }
}
