use serde_json::Value;
use tracing::debug;

use crate::models::document::{Document, CURRENT_VERSION};
use crate::models::legacy::LegacyDocument;
use crate::models::portfolio::Portfolio;

use super::factory_service::FactoryService;

/// Lifts a v1 document into a v2 document with a single portfolio.
///
/// This is a straight structural copy: collections are carried over as they
/// were stored, without dedup or cross-reference checks. Each call mints a
/// new portfolio id and timestamp, so migrating twice gives two different
/// documents.
#[derive(Debug, Clone)]
pub struct MigrationService {
    factory: FactoryService,
}

impl MigrationService {
    pub fn new(factory: FactoryService) -> Self {
        Self { factory }
    }

    /// Migrate a raw v1 value. `portfolio_name` defaults to the configured
    /// default portfolio name.
    #[must_use]
    pub fn migrate_to_v2(&self, legacy: &Value, portfolio_name: Option<&str>) -> Document {
        let config = self.factory.config();
        let view = LegacyDocument::from_value(legacy, config.min_refresh_ms);
        let name = portfolio_name.unwrap_or(&config.default_portfolio_name);
        self.migrate_view(view, name)
    }

    /// Migrate an already-parsed legacy view.
    #[must_use]
    pub fn migrate_view(&self, legacy: LegacyDocument, portfolio_name: &str) -> Document {
        let config = self.factory.config();

        let refresh_ms = legacy.refresh_ms.unwrap_or_else(|| {
            debug!(
                default = config.default_refresh_ms,
                "legacy refreshMs missing or invalid, using default"
            );
            config.default_refresh_ms
        });

        let portfolio = Portfolio {
            funds: legacy.funds.unwrap_or_default(),
            favorites: legacy.favorites.unwrap_or_default(),
            groups: legacy.groups.unwrap_or_default(),
            holdings: legacy.holdings.unwrap_or_default(),
            pending_trades: legacy.pending_trades.unwrap_or_default(),
            ..Portfolio::empty(
                self.factory.generate_id(),
                portfolio_name,
                self.factory.now_timestamp(),
            )
        };

        debug!(
            id = %portfolio.id,
            funds = portfolio.funds.len(),
            pending_trades = portfolio.pending_trades.len(),
            "migrated legacy document to v2"
        );

        Document {
            version: CURRENT_VERSION,
            refresh_ms,
            portfolios: vec![portfolio],
        }
    }
}
