// 🔌 Ports - collaborator contracts the use cases depend on
// Adapters in `store` implement them; the core never touches storage itself.

use crate::banking::{BankApplication, BankEntry};
use crate::compliance::ComplianceBalance;
use crate::error::Result;
use crate::pooling::Pool;
use crate::route::{Route, RouteFilters};

pub trait RouteRepository {
    fn find_all(&self, filters: &RouteFilters) -> Result<Vec<Route>>;

    fn find_by_id(&self, route_id: &str) -> Result<Option<Route>>;

    fn find_baseline(&self) -> Result<Option<Route>>;

    /// Mark one route as baseline (does not clear others)
    fn set_baseline(&self, route_id: &str) -> Result<()>;

    fn clear_all_baselines(&self) -> Result<()>;

    /// Clear every baseline flag and mark `route_id`, as one unit
    fn replace_baseline(&self, route_id: &str) -> Result<()>;

    /// Insert or replace by route id
    fn save(&self, route: &Route) -> Result<Route>;
}

pub trait ComplianceStore {
    fn get_cb(&self, ship_id: &str, year: i32) -> Result<Option<ComplianceBalance>>;

    /// Insert or replace the balance for (ship, year)
    fn save_cb(&self, cb: &ComplianceBalance) -> Result<ComplianceBalance>;
}

/// Banking side ledger. Totals are sums over recorded rows, never counters.
pub trait BankStore {
    fn get_total_banked(&self, ship_id: &str, year: i32) -> Result<f64>;

    fn get_total_applied(&self, ship_id: &str, year: i32) -> Result<f64>;

    fn save_bank_entry(&self, entry: &BankEntry) -> Result<BankEntry>;

    fn record_application(&self, ship_id: &str, year: i32, amount: f64) -> Result<()>;

    /// Save the post-application CB and record the applied amount together.
    /// Either both land or neither does.
    fn apply_to_balance(&self, cb_after: &ComplianceBalance, amount: f64) -> Result<ComplianceBalance>;

    /// Newest first
    fn get_bank_records(&self, ship_id: &str, year: i32) -> Result<Vec<BankEntry>>;

    fn get_applications(&self, ship_id: &str, year: i32) -> Result<Vec<BankApplication>>;
}

pub trait PoolStore {
    /// Persist a new pool and its members as one unit.
    /// An id that is already taken fails with `Conflict`.
    fn save(&self, pool: &Pool) -> Result<Pool>;

    fn find_by_id(&self, pool_id: i64) -> Result<Option<Pool>>;

    fn get_next_id(&self) -> Result<i64>;
}
