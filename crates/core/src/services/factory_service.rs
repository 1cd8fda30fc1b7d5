use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::models::document::{Document, CURRENT_VERSION};
use crate::models::portfolio::Portfolio;
use crate::models::settings::MigrationConfig;
use crate::providers::traits::IdGenerator;

/// Mints new portfolios and empty documents.
///
/// Holds the id generator and config so every other service that needs a
/// fresh portfolio goes through one place.
#[derive(Clone)]
pub struct FactoryService {
    ids: Arc<dyn IdGenerator>,
    config: Arc<MigrationConfig>,
}

impl FactoryService {
    pub fn new(ids: Arc<dyn IdGenerator>, config: Arc<MigrationConfig>) -> Self {
        Self { ids, config }
    }

    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// A fresh identifier from the injected generator.
    #[must_use]
    pub fn generate_id(&self) -> String {
        self.ids.generate_id()
    }

    /// Current time as stored in `createdAt`, e.g. `2024-03-01T08:15:30.123Z`.
    #[must_use]
    pub fn now_timestamp(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// A new empty portfolio. Blank or missing names get the configured
    /// "new portfolio" name.
    #[must_use]
    pub fn create_portfolio(&self, name: Option<&str>) -> Portfolio {
        let name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => self.config.new_portfolio_name.clone(),
        };
        let portfolio = Portfolio::empty(self.generate_id(), name, self.now_timestamp());
        debug!(id = %portfolio.id, generator = self.ids.name(), "created portfolio");
        portfolio
    }

    /// A v2 document holding one empty portfolio with the default name.
    #[must_use]
    pub fn create_empty_v2_data(&self) -> Document {
        Document {
            version: CURRENT_VERSION,
            refresh_ms: self.config.default_refresh_ms,
            portfolios: vec![self.create_portfolio(Some(&self.config.default_portfolio_name))],
        }
    }
}

impl std::fmt::Debug for FactoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryService")
            .field("ids", &self.ids.name())
            .field("config", &self.config)
            .finish()
    }
}
