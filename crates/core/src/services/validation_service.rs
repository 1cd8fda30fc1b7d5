use serde_json::{Map, Value};
use tracing::debug;

use crate::models::document::{Document, CURRENT_VERSION};
use crate::models::portfolio::Portfolio;
use crate::models::records::{Fund, Group, PendingTrade};
use crate::models::shape;

use super::factory_service::FactoryService;

/// Keys of a stored portfolio that map onto typed fields; anything else is
/// carried in `Portfolio::extra`.
const PORTFOLIO_KEYS: [&str; 8] = [
    "id",
    "name",
    "createdAt",
    "funds",
    "favorites",
    "groups",
    "holdings",
    "pendingTrades",
];

/// Turns anything claiming to be a v2 document into one that is.
///
/// Every field is checked on its own and replaced with a default when it has
/// the wrong shape. Cross-references (favorites, group codes, holdings,
/// trades pointing at funds) are NOT checked here; only merging enforces
/// them. The repair is silent and lossy: the result does not say what was
/// fixed.
#[derive(Debug, Clone)]
pub struct ValidationService {
    factory: FactoryService,
}

impl ValidationService {
    pub fn new(factory: FactoryService) -> Self {
        Self { factory }
    }

    /// Validate a raw value. Non-objects are discarded for a fresh empty
    /// document.
    #[must_use]
    pub fn validate_v2_data(&self, value: &Value) -> Document {
        let Some(obj) = value.as_object() else {
            debug!("document is not an object, replacing with empty document");
            return self.factory.create_empty_v2_data();
        };
        let config = self.factory.config();

        let refresh_ms = shape::refresh_ms_field(obj, "refreshMs", config.min_refresh_ms)
            .unwrap_or_else(|| {
                debug!("refreshMs missing or invalid, using default");
                config.default_refresh_ms
            });

        let portfolios = match shape::array_field(obj, "portfolios") {
            Some(stored) if !stored.is_empty() => {
                stored.iter().map(|p| self.normalize_portfolio(p)).collect()
            }
            _ => {
                debug!("document has no portfolios, inserting default portfolio");
                vec![self.default_portfolio()]
            }
        };

        Document {
            version: CURRENT_VERSION,
            refresh_ms,
            portfolios,
        }
    }

    /// Repair one stored portfolio. A non-object entry is treated as `{}`.
    ///
    /// Scalars are kept whenever they are truthy (a numeric id `42` becomes
    /// `"42"`); collections of the right kind are kept entry for entry.
    #[must_use]
    pub fn normalize_portfolio(&self, value: &Value) -> Portfolio {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        let config = self.factory.config();

        let id = shape::truthy_text(obj, "id").unwrap_or_else(|| {
            debug!("portfolio id missing, generating one");
            self.factory.generate_id()
        });
        let name = shape::truthy_text(obj, "name")
            .unwrap_or_else(|| config.unnamed_portfolio_name.clone());
        let created_at = shape::truthy_text(obj, "createdAt")
            .unwrap_or_else(|| self.factory.now_timestamp());

        let funds = shape::array_field(obj, "funds")
            .map(|funds| funds.iter().cloned().map(Fund).collect())
            .unwrap_or_default();
        let favorites = shape::array_field(obj, "favorites")
            .cloned()
            .unwrap_or_default();
        let groups = shape::array_field(obj, "groups")
            .map(|groups| groups.iter().cloned().map(Group).collect())
            .unwrap_or_default();
        let holdings = shape::object_field(obj, "holdings")
            .cloned()
            .unwrap_or_default();
        let pending_trades = shape::array_field(obj, "pendingTrades")
            .map(|trades| trades.iter().cloned().map(PendingTrade).collect())
            .unwrap_or_default();

        let extra = obj
            .iter()
            .filter(|(k, _)| !PORTFOLIO_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Portfolio {
            id,
            name,
            created_at,
            funds,
            favorites,
            groups,
            holdings,
            pending_trades,
            extra,
        }
    }

    /// Apply the same scalar repairs to an already-typed document: version,
    /// refresh floor, at least one portfolio, and no blank id, name or
    /// timestamp.
    #[must_use]
    pub fn repair(&self, mut document: Document) -> Document {
        let config = self.factory.config();

        document.version = CURRENT_VERSION;
        if document.refresh_ms < config.min_refresh_ms {
            debug!(refresh_ms = document.refresh_ms, "refreshMs below floor, using default");
            document.refresh_ms = config.default_refresh_ms;
        }
        if document.portfolios.is_empty() {
            debug!("document has no portfolios, inserting default portfolio");
            document.portfolios.push(self.default_portfolio());
        }

        for portfolio in &mut document.portfolios {
            if portfolio.id.is_empty() {
                portfolio.id = self.factory.generate_id();
            }
            if portfolio.name.is_empty() {
                portfolio.name = config.unnamed_portfolio_name.clone();
            }
            if portfolio.created_at.is_empty() {
                portfolio.created_at = self.factory.now_timestamp();
            }
        }

        document
    }

    fn default_portfolio(&self) -> Portfolio {
        self.factory
            .create_portfolio(Some(&self.factory.config().default_portfolio_name))
    }
}
