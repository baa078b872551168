// 🧭 Compliance Service - use cases composing the core rules with the ports
//
// Bookkeeping convention for stored balances:
//   stored CB   = the ship's own CB + every banked amount applied so far
//   adjusted CB = stored CB - total applied = the ship's own CB
// `apply_banked` persists cb_after; `compute_cb` re-adds the applied total
// when it recomputes from routes, so both paths keep the same convention.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::banking::{ApplyBankedResult, BankApplication, BankEntry, BankLedger};
use crate::compliance::{ComplianceBalance, ComplianceCalculator};
use crate::error::{ComplianceError, Result};
use crate::pooling::{self, Pool, PoolCandidate};
use crate::ports::{BankStore, ComplianceStore, PoolStore, RouteRepository};
use crate::route::{Route, RouteFilters};

// ============================================================================
// RESULT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteComparison {
    pub route: Route,
    pub percent_diff: f64,
    pub compliant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub baseline: Route,
    pub comparisons: Vec<RouteComparison>,
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct ComplianceService<'a> {
    routes: &'a dyn RouteRepository,
    balances: &'a dyn ComplianceStore,
    bank: &'a dyn BankStore,
    pools: &'a dyn PoolStore,
    calculator: ComplianceCalculator,
}

impl<'a> ComplianceService<'a> {
    pub fn new(
        routes: &'a dyn RouteRepository,
        balances: &'a dyn ComplianceStore,
        bank: &'a dyn BankStore,
        pools: &'a dyn PoolStore,
    ) -> Self {
        ComplianceService {
            routes,
            balances,
            bank,
            pools,
            calculator: ComplianceCalculator::default(),
        }
    }

    /// Service over a single store that implements every port
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: RouteRepository + ComplianceStore + BankStore + PoolStore,
    {
        Self::new(store, store, store, store)
    }

    pub fn with_calculator(mut self, calculator: ComplianceCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn calculator(&self) -> &ComplianceCalculator {
        &self.calculator
    }

    // ------------------------------------------------------------------------
    // Routes
    // ------------------------------------------------------------------------

    pub fn get_routes(&self, filters: &RouteFilters) -> Result<Vec<Route>> {
        self.routes.find_all(filters)
    }

    /// Make `route_id` the one and only baseline
    pub fn set_baseline(&self, route_id: &str) -> Result<()> {
        if self.routes.find_by_id(route_id)?.is_none() {
            return Err(ComplianceError::not_found(format!("Route {route_id}")));
        }

        self.routes.replace_baseline(route_id)?;

        tracing::info!(route_id, "Baseline route set");
        Ok(())
    }

    /// Every non-baseline route against the baseline's intensity
    pub fn get_comparison(&self) -> Result<ComparisonResult> {
        let baseline = self.routes.find_baseline()?.ok_or_else(|| {
            ComplianceError::not_found("Baseline route (set a baseline route first)")
        })?;

        let comparisons = self
            .routes
            .find_all(&RouteFilters::default())?
            .into_iter()
            .filter(|route| route.route_id != baseline.route_id)
            .map(|route| {
                let percent_diff = route.percent_diff(&baseline, &self.calculator)?;
                let compliant = route.is_compliant(&self.calculator);
                Ok(RouteComparison {
                    route,
                    percent_diff,
                    compliant,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ComparisonResult {
            baseline,
            comparisons,
        })
    }

    // ------------------------------------------------------------------------
    // Compliance balances
    // ------------------------------------------------------------------------

    /// Compute and store a ship's CB.
    ///
    /// A route whose id equals the ship id is used directly; otherwise the
    /// ship gets the mean CB of all routes in that year.
    pub fn compute_cb(&self, ship_id: &str, year: i32) -> Result<ComplianceBalance> {
        let raw_cb = match self.routes.find_by_id(ship_id)? {
            Some(route) => route.calculate_cb(&self.calculator)?,
            None => {
                let routes = self.routes.find_all(&RouteFilters::for_year(year))?;
                if routes.is_empty() {
                    return Err(ComplianceError::not_found(format!(
                        "Routes for ship {ship_id} in year {year}"
                    )));
                }

                let mut total = 0.0;
                for route in &routes {
                    total += route.calculate_cb(&self.calculator)?;
                }
                total / routes.len() as f64
            }
        };

        self.store_computed_cb(ship_id, year, raw_cb)
    }

    pub fn compute_cb_from_route(
        &self,
        route_id: &str,
        ship_id: &str,
        year: i32,
    ) -> Result<ComplianceBalance> {
        let route = self
            .routes
            .find_by_id(route_id)?
            .ok_or_else(|| ComplianceError::not_found(format!("Route {route_id}")))?;

        let raw_cb = route.calculate_cb(&self.calculator)?;
        self.store_computed_cb(ship_id, year, raw_cb)
    }

    fn store_computed_cb(&self, ship_id: &str, year: i32, raw_cb: f64) -> Result<ComplianceBalance> {
        let applied = self.bank.get_total_applied(ship_id, year)?;
        let cb = ComplianceBalance::new(ship_id, year, raw_cb).adjust(applied);

        let saved = self.balances.save_cb(&cb)?;
        tracing::info!(ship_id, year, cb = saved.cb_gco2eq, "Compliance balance computed");
        Ok(saved)
    }

    fn require_cb(&self, ship_id: &str, year: i32) -> Result<ComplianceBalance> {
        self.balances.get_cb(ship_id, year)?.ok_or_else(|| {
            ComplianceError::not_found(format!(
                "Compliance balance for ship {ship_id} in year {year}"
            ))
        })
    }

    /// Stored CB with applied bank amounts taken back out
    pub fn get_adjusted_cb(&self, ship_id: &str, year: i32) -> Result<ComplianceBalance> {
        let original = self.require_cb(ship_id, year)?;
        let applied = self.bank.get_total_applied(ship_id, year)?;

        Ok(ComplianceBalance {
            cb_gco2eq: BankLedger::adjusted_cb(original.cb_gco2eq, applied),
            ..original
        })
    }

    // ------------------------------------------------------------------------
    // Banking
    // ------------------------------------------------------------------------

    /// Bank part of the ship's own surplus.
    ///
    /// Checked against the adjusted CB: amounts applied back from the bank
    /// are not surplus that can be banked a second time.
    pub fn bank_surplus(&self, ship_id: &str, year: i32, amount: f64) -> Result<BankEntry> {
        if !(amount > 0.0) {
            return Err(ComplianceError::InvalidAmount(amount));
        }

        let own_cb = self.get_adjusted_cb(ship_id, year)?;
        let already_banked = self.bank.get_total_banked(ship_id, year)?;

        let entry = BankLedger::bank_surplus(ship_id, year, own_cb.cb_gco2eq, already_banked, amount)
            .inspect_err(|e| tracing::warn!(ship_id, year, amount, error = %e, "Banking rejected"))?;

        let saved = self.bank.save_bank_entry(&entry)?;
        tracing::info!(ship_id, year, amount, "Surplus banked");
        Ok(saved)
    }

    pub fn apply_banked(&self, ship_id: &str, year: i32, amount: f64) -> Result<ApplyBankedResult> {
        if !(amount > 0.0) {
            return Err(ComplianceError::InvalidAmount(amount));
        }

        let cb = self.require_cb(ship_id, year)?;
        let total_banked = self.bank.get_total_banked(ship_id, year)?;
        let total_applied = self.bank.get_total_applied(ship_id, year)?;

        let result = BankLedger::apply_banked(cb.cb_gco2eq, total_banked, total_applied, amount)
            .inspect_err(|e| tracing::warn!(ship_id, year, amount, error = %e, "Application rejected"))?;

        self.bank
            .apply_to_balance(&cb.adjust(result.applied), result.applied)?;

        tracing::info!(
            ship_id,
            year,
            cb_before = result.cb_before,
            cb_after = result.cb_after,
            "Banked surplus applied"
        );
        Ok(result)
    }

    pub fn get_bank_records(&self, ship_id: &str, year: i32) -> Result<Vec<BankEntry>> {
        self.bank.get_bank_records(ship_id, year)
    }

    /// Applications of banked surplus, newest first
    pub fn get_applications(&self, ship_id: &str, year: i32) -> Result<Vec<BankApplication>> {
        self.bank.get_applications(ship_id, year)
    }

    // ------------------------------------------------------------------------
    // Pooling
    // ------------------------------------------------------------------------

    /// Pool the given ships' adjusted CBs for one year.
    ///
    /// Nothing is persisted unless the allocated pool passes validation.
    pub fn create_pool(&self, year: i32, ship_ids: &[String]) -> Result<Pool> {
        if ship_ids.is_empty() {
            return Err(ComplianceError::InvalidInput(
                "Pool must have at least one member".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = ship_ids.iter().find(|id| !seen.insert(id.as_str())) {
            return Err(ComplianceError::InvalidInput(format!(
                "Ship {dup} listed more than once"
            )));
        }

        let mut candidates = Vec::with_capacity(ship_ids.len());
        for ship_id in ship_ids {
            let adjusted = self.get_adjusted_cb(ship_id, year).map_err(|e| match e {
                ComplianceError::NotFound(what) => ComplianceError::NotFound(format!(
                    "Failed to get adjusted CB for ship {ship_id}: {what}"
                )),
                other => other,
            })?;
            candidates.push(PoolCandidate::new(ship_id.as_str(), adjusted.cb_gco2eq));
        }

        let total: f64 = candidates.iter().map(|c| c.cb_before).sum();
        if total < 0.0 {
            tracing::warn!(year, total, "Pool rejected before allocation");
            return Err(ComplianceError::ValidationFailed(vec![
                pooling::negative_sum_message(total),
            ]));
        }

        let members = pooling::allocate(&candidates);
        let pool = Pool::new(self.pools.get_next_id()?, year, members);
        pool.validate().into_result()?;

        let saved = self.pools.save(&pool)?;
        tracing::info!(
            pool_id = saved.id,
            year,
            members = saved.members.len(),
            total = saved.total_sum(),
            "Pool created"
        );
        Ok(saved)
    }

    pub fn get_pool(&self, pool_id: i64) -> Result<Pool> {
        self.pools
            .find_by_id(pool_id)?
            .ok_or_else(|| ComplianceError::not_found(format!("Pool {pool_id}")))
    }
}

// ============================================================================
// TESTS
// ============================================================================
