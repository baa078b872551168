// 🗃️ In-memory store - every port backed by append-friendly vectors

use chrono::Utc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::banking::{self, BankApplication, BankEntry};
use crate::compliance::ComplianceBalance;
use crate::error::{ComplianceError, Result};
use crate::pooling::Pool;
use crate::ports::{BankStore, ComplianceStore, PoolStore, RouteRepository};
use crate::route::{Route, RouteFilters};

#[derive(Debug, Default)]
pub struct MemoryStore {
    routes: RwLock<Vec<Route>>,
    balances: RwLock<Vec<ComplianceBalance>>,
    bank_entries: RwLock<Vec<BankEntry>>,
    applications: RwLock<Vec<BankApplication>>,
    pools: RwLock<Vec<Pool>>,
}

// A panicked writer leaves plain data behind, so poisoning is ignored
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn upsert_balance(balances: &mut Vec<ComplianceBalance>, cb: &ComplianceBalance) -> ComplianceBalance {
    let position = balances
        .iter()
        .position(|b| b.ship_id == cb.ship_id && b.year == cb.year);

    match position {
        Some(idx) => {
            let existing = &mut balances[idx];
            existing.cb_gco2eq = cb.cb_gco2eq;
            existing.clone()
        }
        None => {
            let mut stored = cb.clone();
            stored.id = Some(balances.len() as i64 + 1);
            stored.created_at = Some(Utc::now());
            balances.push(stored.clone());
            stored
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the given routes
    pub fn with_routes(routes: Vec<Route>) -> Self {
        MemoryStore {
            routes: RwLock::new(routes),
            ..Default::default()
        }
    }
}

// ============================================================================
// ROUTES
// ============================================================================

impl RouteRepository for MemoryStore {
    fn find_all(&self, filters: &RouteFilters) -> Result<Vec<Route>> {
        Ok(read(&self.routes)
            .iter()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, route_id: &str) -> Result<Option<Route>> {
        Ok(read(&self.routes)
            .iter()
            .find(|r| r.route_id == route_id)
            .cloned())
    }

    fn find_baseline(&self) -> Result<Option<Route>> {
        Ok(read(&self.routes).iter().find(|r| r.is_baseline).cloned())
    }

    fn set_baseline(&self, route_id: &str) -> Result<()> {
        for route in write(&self.routes).iter_mut() {
            if route.route_id == route_id {
                route.is_baseline = true;
            }
        }
        Ok(())
    }

    fn clear_all_baselines(&self) -> Result<()> {
        for route in write(&self.routes).iter_mut() {
            route.is_baseline = false;
        }
        Ok(())
    }

    fn replace_baseline(&self, route_id: &str) -> Result<()> {
        for route in write(&self.routes).iter_mut() {
            route.is_baseline = route.route_id == route_id;
        }
        Ok(())
    }

    fn save(&self, route: &Route) -> Result<Route> {
        let mut routes = write(&self.routes);
        match routes.iter_mut().find(|r| r.route_id == route.route_id) {
            Some(existing) => *existing = route.clone(),
            None => routes.push(route.clone()),
        }
        Ok(route.clone())
    }
}

// ============================================================================
// COMPLIANCE BALANCES
// ============================================================================

impl ComplianceStore for MemoryStore {
    fn get_cb(&self, ship_id: &str, year: i32) -> Result<Option<ComplianceBalance>> {
        Ok(read(&self.balances)
            .iter()
            .find(|cb| cb.ship_id == ship_id && cb.year == year)
            .cloned())
    }

    fn save_cb(&self, cb: &ComplianceBalance) -> Result<ComplianceBalance> {
        Ok(upsert_balance(&mut write(&self.balances), cb))
    }
}

// ============================================================================
// BANK LEDGER
// ============================================================================

impl BankStore for MemoryStore {
    fn get_total_banked(&self, ship_id: &str, year: i32) -> Result<f64> {
        Ok(banking::total_banked(read(&self.bank_entries).iter(), ship_id, year))
    }

    fn get_total_applied(&self, ship_id: &str, year: i32) -> Result<f64> {
        Ok(banking::total_applied(read(&self.applications).iter(), ship_id, year))
    }

    fn save_bank_entry(&self, entry: &BankEntry) -> Result<BankEntry> {
        let mut entries = write(&self.bank_entries);

        let mut stored = entry.clone();
        stored.id = Some(entries.len() as i64 + 1);
        stored.created_at = Some(Utc::now());
        entries.push(stored.clone());

        Ok(stored)
    }

    fn record_application(&self, ship_id: &str, year: i32, amount: f64) -> Result<()> {
        write(&self.applications).push(BankApplication {
            ship_id: ship_id.to_string(),
            year,
            amount_gco2eq: amount,
            created_at: Some(Utc::now()),
        });
        Ok(())
    }

    fn apply_to_balance(&self, cb_after: &ComplianceBalance, amount: f64) -> Result<ComplianceBalance> {
        // Both locks held so readers never see one write without the other
        let mut balances = write(&self.balances);
        let mut applications = write(&self.applications);

        let saved = upsert_balance(&mut balances, cb_after);
        applications.push(BankApplication {
            ship_id: cb_after.ship_id.clone(),
            year: cb_after.year,
            amount_gco2eq: amount,
            created_at: Some(Utc::now()),
        });
        Ok(saved)
    }

    fn get_bank_records(&self, ship_id: &str, year: i32) -> Result<Vec<BankEntry>> {
        Ok(read(&self.bank_entries)
            .iter()
            .rev()
            .filter(|e| e.ship_id == ship_id && e.year == year)
            .cloned()
            .collect())
    }

    fn get_applications(&self, ship_id: &str, year: i32) -> Result<Vec<BankApplication>> {
        Ok(read(&self.applications)
            .iter()
            .rev()
            .filter(|a| a.ship_id == ship_id && a.year == year)
            .cloned()
            .collect())
    }
}

// ============================================================================
// POOLS
// ============================================================================

impl PoolStore for MemoryStore {
    fn save(&self, pool: &Pool) -> Result<Pool> {
        let mut pools = write(&self.pools);

        if pools.iter().any(|p| p.id == pool.id) {
            return Err(ComplianceError::Conflict(format!("Pool {} already exists", pool.id)));
        }

        let mut stored = pool.clone();
        if stored.created_at.is_none() {
            stored.created_at = Some(Utc::now());
        }
        pools.push(stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, pool_id: i64) -> Result<Option<Pool>> {
        Ok(read(&self.pools).iter().find(|p| p.id == pool_id).cloned())
    }

    fn get_next_id(&self) -> Result<i64> {
        Ok(read(&self.pools).iter().map(|p| p.id).max().unwrap_or(0) + 1)
    }
}

// ============================================================================
// TESTS
// ============================================================================
