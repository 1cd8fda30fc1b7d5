pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use errors::CoreError;
use models::{document::Document, portfolio::Portfolio, settings::MigrationConfig};
use providers::{system::SystemIdGenerator, traits::IdGenerator};
use services::{
    detection_service::DetectionService, factory_service::FactoryService,
    merge_service::MergeService, migration_service::MigrationService,
    validation_service::ValidationService,
};

/// Main entry point for the fund-ledger-core library.
///
/// Owns the config and id generator and wires up every service. The host
/// reads the stored value, hands it to [`LedgerMigrator::upgrade_document`]
/// (or the individual steps) and persists whatever comes back.
#[must_use]
pub struct LedgerMigrator {
    factory: FactoryService,
    detection_service: DetectionService,
    migration_service: MigrationService,
    merge_service: MergeService,
    validation_service: ValidationService,
}

impl std::fmt::Debug for LedgerMigrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerMigrator")
            .field("factory", &self.factory)
            .finish()
    }
}

impl Default for LedgerMigrator {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerMigrator {
    /// Default config, secure random ids.
    pub fn new() -> Self {
        Self::with_config(MigrationConfig::default())
    }

    /// Custom defaults (names, refresh interval), secure random ids.
    pub fn with_config(config: MigrationConfig) -> Self {
        Self::build(config, Arc::new(SystemIdGenerator::new()))
    }

    /// Custom config and id source. Tests pass a seeded generator here.
    pub fn with_id_generator(config: MigrationConfig, ids: Arc<dyn IdGenerator>) -> Self {
        Self::build(config, ids)
    }

    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        self.factory.config()
    }

    // ── Identifiers & Construction ──────────────────────────────────

    /// A fresh portfolio id.
    #[must_use]
    pub fn generate_id(&self) -> String {
        self.factory.generate_id()
    }

    /// A new empty portfolio. `None` or `""` uses the "new portfolio" name.
    pub fn create_portfolio(&self, name: Option<&str>) -> Portfolio {
        self.factory.create_portfolio(name)
    }

    /// A v2 document with one empty default portfolio.
    pub fn create_empty_v2_data(&self) -> Document {
        self.factory.create_empty_v2_data()
    }

    // ── Migration ───────────────────────────────────────────────────

    /// Whether a stored value is a v1 (single-portfolio) document.
    #[must_use]
    pub fn is_legacy_data(&self, value: &Value) -> bool {
        self.detection_service.is_legacy_data(value)
    }

    /// Lift a v1 document into a v2 document with one portfolio.
    /// `portfolio_name` defaults to the configured default portfolio name.
    pub fn migrate_to_v2(&self, legacy: &Value, portfolio_name: Option<&str>) -> Document {
        self.migration_service.migrate_to_v2(legacy, portfolio_name)
    }

    /// Fold a v1 document into an existing portfolio.
    pub fn merge_old_data_to_portfolio(&self, portfolio: &Portfolio, legacy: &Value) -> Portfolio {
        self.merge_service.merge_old_data_to_portfolio(portfolio, legacy)
    }

    /// Repair any value into a well-formed v2 document.
    pub fn validate_v2_data(&self, value: &Value) -> Document {
        self.validation_service.validate_v2_data(value)
    }

    // ── Load Pipeline ───────────────────────────────────────────────

    /// The standard load step: migrate if legacy, then validate.
    pub fn upgrade_document(&self, value: &Value) -> Document {
        if self.is_legacy_data(value) {
            debug!("stored document is legacy, migrating");
            let migrated = self.migrate_to_v2(value, None);
            return self.validation_service.repair(migrated);
        }
        self.validate_v2_data(value)
    }

    /// Parse stored JSON text and upgrade it.
    ///
    /// Malformed JSON is an error; well-formed JSON of any shape is repaired.
    pub fn upgrade_json(&self, json: &str) -> Result<Document, CoreError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(self.upgrade_document(&value))
    }

    /// Fold a v1 document into one portfolio of an existing v2 document.
    ///
    /// Targets the portfolio with id `portfolio_id`. When no portfolio has
    /// that id nothing is merged and the repaired document is returned as
    /// is, so legacy data never lands in an unrelated portfolio.
    pub fn merge_legacy_into_document(
        &self,
        document: Document,
        portfolio_id: &str,
        legacy: &Value,
    ) -> Document {
        let mut document = self.validation_service.repair(document);
        match document.portfolios.iter_mut().find(|p| p.id == portfolio_id) {
            Some(target) => {
                *target = self.merge_service.merge_old_data_to_portfolio(target, legacy);
            }
            None => debug!(portfolio_id, "portfolio not found, nothing merged"),
        }
        document
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(config: MigrationConfig, ids: Arc<dyn IdGenerator>) -> Self {
        let factory = FactoryService::new(ids, Arc::new(config));
        let detection_service = DetectionService::new();
        let migration_service = MigrationService::new(factory.clone());
        let merge_service = MergeService::new();
        let validation_service = ValidationService::new(factory.clone());

        Self {
            factory,
            detection_service,
            migration_service,
            merge_service,
            validation_service,
        }
    }
}

// ── Free functions (default config, secure random ids) ──────────────

/// A new UUID v4 string.
#[must_use]
pub fn generate_id() -> String {
    SystemIdGenerator::new().generate_id()
}

/// Whether `value` is a v1 document. See [`DetectionService::is_legacy_data`].
#[must_use]
pub fn is_legacy_data(value: &Value) -> bool {
    DetectionService::new().is_legacy_data(value)
}

/// A new empty portfolio; `None` or `""` gets the default "new" name.
#[must_use]
pub fn create_portfolio(name: Option<&str>) -> Portfolio {
    LedgerMigrator::new().create_portfolio(name)
}

/// A v2 document with one empty default portfolio.
#[must_use]
pub fn create_empty_v2_data() -> Document {
    LedgerMigrator::new().create_empty_v2_data()
}

/// Lift a v1 document into a v2 document with one portfolio.
#[must_use]
pub fn migrate_to_v2(legacy: &Value, portfolio_name: Option<&str>) -> Document {
    LedgerMigrator::new().migrate_to_v2(legacy, portfolio_name)
}

/// Fold a v1 document into an existing portfolio.
#[must_use]
pub fn merge_old_data_to_portfolio(portfolio: &Portfolio, legacy: &Value) -> Portfolio {
    MergeService::new().merge_old_data_to_portfolio(portfolio, legacy)
}

/// Repair any value into a well-formed v2 document.
#[must_use]
pub fn validate_v2_data(value: &Value) -> Document {
    LedgerMigrator::new().validate_v2_data(value)
}

/// Migrate if legacy, then validate.
#[must_use]
pub fn upgrade_document(value: &Value) -> Document {
    LedgerMigrator::new().upgrade_document(value)
}

/// Parse stored JSON text and upgrade it.
pub fn upgrade_json(json: &str) -> Result<Document, CoreError> {
    LedgerMigrator::new().upgrade_json(json)
}
