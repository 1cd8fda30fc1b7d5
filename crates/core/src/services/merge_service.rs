use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::models::legacy::LegacyDocument;
use crate::models::portfolio::Portfolio;
use crate::models::records::{Fund, Group, PendingTrade};
use crate::models::settings::MIN_REFRESH_MS;
use crate::models::shape::{is_truthy, key_part};

/// Folds a v1 document's collections into an existing portfolio.
///
/// Unlike migration, merging reconciles the two sides: funds are unique by
/// code (compared in text form, so `110022` and `"110022"` are one fund), and
/// favorites, group codes, holdings and pending trades only keep
/// entries that point at a fund present after the merge.
///
/// Pure business logic, no I/O. Each step is public so it can be tested on
/// its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeService;

impl MergeService {
    pub fn new() -> Self {
        Self
    }

    /// Merge a raw legacy value. Anything that is not an object leaves the
    /// portfolio unchanged.
    #[must_use]
    pub fn merge_old_data_to_portfolio(&self, portfolio: &Portfolio, legacy: &Value) -> Portfolio {
        if !legacy.is_object() {
            debug!(id = %portfolio.id, "no legacy object to merge, portfolio unchanged");
            return portfolio.clone();
        }
        self.merge(portfolio, &LegacyDocument::from_value(legacy, MIN_REFRESH_MS))
    }

    /// Merge a parsed legacy view. Returns a new portfolio; `id`, `name`,
    /// `createdAt` and unknown fields are kept from `portfolio`.
    #[must_use]
    pub fn merge(&self, portfolio: &Portfolio, legacy: &LegacyDocument) -> Portfolio {
        let funds = self.merge_funds(&portfolio.funds, legacy.funds.as_deref().unwrap_or_default());
        let all_codes: HashSet<String> = funds.iter().filter_map(Fund::code).collect();

        let favorites = self.merge_favorites(
            &portfolio.favorites,
            legacy.favorites.as_deref().unwrap_or_default(),
            &all_codes,
        );
        let groups = self.merge_groups(
            &portfolio.groups,
            legacy.groups.as_deref().unwrap_or_default(),
            &all_codes,
        );
        let empty = Map::new();
        let holdings = self.merge_holdings(
            &portfolio.holdings,
            legacy.holdings.as_ref().unwrap_or(&empty),
            &all_codes,
        );
        let pending_trades = self.merge_pending_trades(
            &portfolio.pending_trades,
            legacy.pending_trades.as_deref().unwrap_or_default(),
            &all_codes,
        );

        debug!(
            id = %portfolio.id,
            funds = funds.len(),
            favorites = favorites.len(),
            groups = groups.len(),
            holdings = holdings.len(),
            pending_trades = pending_trades.len(),
            "merged legacy data into portfolio"
        );

        Portfolio {
            funds,
            favorites,
            groups,
            holdings,
            pending_trades,
            ..portfolio.clone()
        }
    }

    /// Existing funds first (first occurrence per code wins), then incoming
    /// funds whose code is set and not already present, in incoming order.
    /// Existing funds without a code are kept; incoming ones are dropped.
    #[must_use]
    pub fn merge_funds(&self, existing: &[Fund], incoming: &[Fund]) -> Vec<Fund> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut funds = Vec::with_capacity(existing.len() + incoming.len());

        for fund in existing {
            match fund.code() {
                Some(code) if !seen.insert(code.clone()) => {
                    trace!(code = %code, "dropping duplicate fund already in portfolio");
                }
                _ => funds.push(fund.clone()),
            }
        }

        for fund in incoming {
            match fund.code() {
                Some(code) if seen.insert(code.clone()) => funds.push(fund.clone()),
                Some(code) => trace!(code = %code, "legacy fund already in portfolio"),
                None => trace!("dropping legacy fund without code"),
            }
        }

        funds
    }

    /// Union of both favorite lists, deduplicated, restricted to `all_codes`.
    /// Entries keep their stored form (`5` stays a number).
    #[must_use]
    pub fn merge_favorites(
        &self,
        existing: &[Value],
        incoming: &[Value],
        all_codes: &HashSet<String>,
    ) -> Vec<Value> {
        known_unique_codes(existing.iter().chain(incoming), all_codes)
    }

    /// Groups from the portfolio, overlaid with incoming groups by
    /// [`Group::identity_key`].
    ///
    /// A matching group keeps all of its own fields and only has `codes`
    /// replaced by the union of both sides. Unmatched incoming groups are
    /// appended. Every group's codes end up restricted to `all_codes`.
    #[must_use]
    pub fn merge_groups(
        &self,
        existing: &[Group],
        incoming: &[Group],
        all_codes: &HashSet<String>,
    ) -> Vec<Group> {
        let mut groups: Vec<Group> = existing
            .iter()
            .map(|g| g.with_codes(known_unique_codes(g.codes(), all_codes)))
            .collect();

        for group in incoming {
            let key = group.identity_key();
            match groups.iter_mut().find(|g| g.identity_key() == key) {
                Some(current) => {
                    let codes = known_unique_codes(current.codes().iter().chain(group.codes()), all_codes);
                    *current = current.with_codes(codes);
                }
                None => groups.push(group.with_codes(known_unique_codes(group.codes(), all_codes))),
            }
        }

        groups
    }

    /// Incoming holdings overwrite existing ones on the same code; entries
    /// for codes outside `all_codes` are removed.
    #[must_use]
    pub fn merge_holdings(
        &self,
        existing: &Map<String, Value>,
        incoming: &Map<String, Value>,
        all_codes: &HashSet<String>,
    ) -> Map<String, Value> {
        let mut merged = existing.clone();
        for (code, holding) in incoming {
            merged.insert(code.clone(), holding.clone());
        }

        merged
            .into_iter()
            .filter(|(code, _)| {
                let known = all_codes.contains(code);
                if !known {
                    trace!(code = %code, "dropping holding for unknown fund");
                }
                known
            })
            .collect()
    }

    /// Existing trades then incoming trades, deduplicated by
    /// [`PendingTrade::identity_key`].
    ///
    /// On a key collision the later trade replaces the earlier one but keeps
    /// its position, so incoming data wins while order stays stable. Trades
    /// for funds outside `all_codes` are dropped from both sides.
    #[must_use]
    pub fn merge_pending_trades(
        &self,
        existing: &[PendingTrade],
        incoming: &[PendingTrade],
        all_codes: &HashSet<String>,
    ) -> Vec<PendingTrade> {
        let mut trades: Vec<PendingTrade> = Vec::with_capacity(existing.len() + incoming.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for trade in existing.iter().chain(incoming) {
            let fund_code = trade.fund_code();
            if !fund_code.as_ref().is_some_and(|code| all_codes.contains(code)) {
                trace!(fund_code = ?fund_code, "dropping pending trade for unknown fund");
                continue;
            }

            let key = trade.identity_key();
            match positions.get(&key) {
                Some(&pos) => {
                    trace!(key = %key, "replacing pending trade with same identity");
                    trades[pos] = trade.clone();
                }
                None => {
                    positions.insert(key, trades.len());
                    trades.push(trade.clone());
                }
            }
        }

        trades
    }
}

/// Deduplicate `codes` by text form (first occurrence wins) and keep only
/// truthy entries found in `all_codes`. Kept entries are returned as stored.
fn known_unique_codes<'a>(
    codes: impl IntoIterator<Item = &'a Value>,
    all_codes: &HashSet<String>,
) -> Vec<Value> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    for code in codes.into_iter().filter(|c| is_truthy(c)) {
        let key = key_part(Some(code));
        if all_codes.contains(&key) && seen.insert(key) {
            unique.push(code.clone());
        }
    }
    unique
}
