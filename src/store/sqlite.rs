// 💾 SQLite store - rusqlite adapter for every port
//
// Tables: routes, ship_compliance, bank_entries, bank_applications,
// pools, pool_members. Bank totals are SUM() queries over the entry tables.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;

use crate::banking::{BankApplication, BankEntry};
use crate::compliance::ComplianceBalance;
use crate::error::{ComplianceError, Result};
use crate::pooling::{Pool, PoolMember};
use crate::ports::{BankStore, ComplianceStore, PoolStore, RouteRepository};
use crate::route::{Route, RouteFilters};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file in WAL mode and ensure the schema
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        let store = SqliteStore { conn };
        store.setup_database()?;
        tracing::debug!(path = %path.display(), journal_mode = %mode, "Opened compliance database");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = SqliteStore {
            conn: Connection::open_in_memory()?,
        };
        store.setup_database()?;
        Ok(store)
    }

    fn setup_database(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS routes (
                route_id TEXT PRIMARY KEY,
                vessel_type TEXT NOT NULL,
                fuel_type TEXT NOT NULL,
                year INTEGER NOT NULL,
                ghg_intensity REAL NOT NULL,
                fuel_consumption REAL NOT NULL,
                distance REAL NOT NULL,
                total_emissions REAL NOT NULL,
                is_baseline INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS ship_compliance (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ship_id TEXT NOT NULL,
                year INTEGER NOT NULL,
                cb_gco2eq REAL NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (ship_id, year)
            );

            CREATE TABLE IF NOT EXISTS bank_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ship_id TEXT NOT NULL,
                year INTEGER NOT NULL,
                amount_gco2eq REAL NOT NULL CHECK (amount_gco2eq > 0),
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS bank_applications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ship_id TEXT NOT NULL,
                year INTEGER NOT NULL,
                amount_gco2eq REAL NOT NULL CHECK (amount_gco2eq > 0),
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS pools (
                id INTEGER PRIMARY KEY,
                year INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS pool_members (
                pool_id INTEGER NOT NULL REFERENCES pools(id),
                position INTEGER NOT NULL,
                ship_id TEXT NOT NULL,
                cb_before REAL NOT NULL,
                cb_after REAL NOT NULL,
                PRIMARY KEY (pool_id, position)
            );

            CREATE INDEX IF NOT EXISTS idx_bank_entries_ship ON bank_entries(ship_id, year);
            CREATE INDEX IF NOT EXISTS idx_bank_applications_ship ON bank_applications(ship_id, year);",
        )?;

        tracing::debug!("Compliance schema ready");
        Ok(())
    }

    /// Upsert a batch of routes in one transaction
    pub fn import_routes(&self, routes: &[Route]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for route in routes {
            upsert_route(&tx, route)?;
        }
        tx.commit()?;

        tracing::info!(count = routes.len(), "Imported routes");
        Ok(routes.len())
    }
}

// ============================================================================
// ROW MAPPING
// ============================================================================

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn route_from_row(row: &Row) -> rusqlite::Result<Route> {
    Ok(Route {
        route_id: row.get(0)?,
        vessel_type: row.get(1)?,
        fuel_type: row.get(2)?,
        year: row.get(3)?,
        ghg_intensity: row.get(4)?,
        fuel_consumption: row.get(5)?,
        distance: row.get(6)?,
        total_emissions: row.get(7)?,
        is_baseline: row.get(8)?,
    })
}

fn balance_from_row(row: &Row) -> rusqlite::Result<ComplianceBalance> {
    Ok(ComplianceBalance {
        id: Some(row.get(0)?),
        ship_id: row.get(1)?,
        year: row.get(2)?,
        cb_gco2eq: row.get(3)?,
        created_at: Some(parse_timestamp(row, 4)?),
    })
}

fn bank_entry_from_row(row: &Row) -> rusqlite::Result<BankEntry> {
    Ok(BankEntry {
        id: Some(row.get(0)?),
        ship_id: row.get(1)?,
        year: row.get(2)?,
        amount_gco2eq: row.get(3)?,
        created_at: Some(parse_timestamp(row, 4)?),
    })
}

fn upsert_balance(conn: &Connection, cb: &ComplianceBalance) -> rusqlite::Result<ComplianceBalance> {
    conn.execute(
        "INSERT INTO ship_compliance (ship_id, year, cb_gco2eq, created_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(ship_id, year) DO UPDATE SET cb_gco2eq = excluded.cb_gco2eq",
        params![cb.ship_id, cb.year, cb.cb_gco2eq, Utc::now().to_rfc3339()],
    )?;

    conn.query_row(
        "SELECT id, ship_id, year, cb_gco2eq, created_at
         FROM ship_compliance WHERE ship_id = ?1 AND year = ?2",
        params![cb.ship_id, cb.year],
        balance_from_row,
    )
}

fn insert_application(conn: &Connection, ship_id: &str, year: i32, amount: f64) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO bank_applications (ship_id, year, amount_gco2eq, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![ship_id, year, amount, Utc::now().to_rfc3339()],
    )
}

const ROUTE_COLUMNS: &str = "route_id, vessel_type, fuel_type, year, ghg_intensity, \
     fuel_consumption, distance, total_emissions, is_baseline";

fn upsert_route(conn: &Connection, route: &Route) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO routes (
            route_id, vessel_type, fuel_type, year, ghg_intensity,
            fuel_consumption, distance, total_emissions, is_baseline
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(route_id) DO UPDATE SET
            vessel_type = excluded.vessel_type,
            fuel_type = excluded.fuel_type,
            year = excluded.year,
            ghg_intensity = excluded.ghg_intensity,
            fuel_consumption = excluded.fuel_consumption,
            distance = excluded.distance,
            total_emissions = excluded.total_emissions,
            is_baseline = excluded.is_baseline",
        params![
            route.route_id,
            route.vessel_type,
            route.fuel_type,
            route.year,
            route.ghg_intensity,
            route.fuel_consumption,
            route.distance,
            route.total_emissions,
            route.is_baseline,
        ],
    )
}

// ============================================================================
// ROUTES
// ============================================================================

impl RouteRepository for SqliteStore {
    fn find_all(&self, filters: &RouteFilters) -> Result<Vec<Route>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes
             WHERE (?1 IS NULL OR vessel_type = ?1)
               AND (?2 IS NULL OR fuel_type = ?2)
               AND (?3 IS NULL OR year = ?3)
             ORDER BY route_id"
        ))?;

        let routes = stmt
            .query_map(
                params![filters.vessel_type, filters.fuel_type, filters.year],
                route_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(routes)
    }

    fn find_by_id(&self, route_id: &str) -> Result<Option<Route>> {
        let route = self
            .conn
            .query_row(
                &format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE route_id = ?1"),
                params![route_id],
                route_from_row,
            )
            .optional()?;
        Ok(route)
    }

    fn find_baseline(&self) -> Result<Option<Route>> {
        let route = self
            .conn
            .query_row(
                &format!(
                    "SELECT {ROUTE_COLUMNS} FROM routes WHERE is_baseline = 1 ORDER BY route_id LIMIT 1"
                ),
                [],
                route_from_row,
            )
            .optional()?;
        Ok(route)
    }

    fn set_baseline(&self, route_id: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE routes SET is_baseline = 1 WHERE route_id = ?1",
            params![route_id],
        )?;
        Ok(())
    }

    fn clear_all_baselines(&self) -> Result<()> {
        self.conn
            .execute("UPDATE routes SET is_baseline = 0 WHERE is_baseline = 1", [])?;
        Ok(())
    }

    fn replace_baseline(&self, route_id: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("UPDATE routes SET is_baseline = 0 WHERE is_baseline = 1", [])?;
        tx.execute(
            "UPDATE routes SET is_baseline = 1 WHERE route_id = ?1",
            params![route_id],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn save(&self, route: &Route) -> Result<Route> {
        upsert_route(&self.conn, route)?;
        Ok(route.clone())
    }
}

// ============================================================================
// COMPLIANCE BALANCES
// ============================================================================

impl ComplianceStore for SqliteStore {
    fn get_cb(&self, ship_id: &str, year: i32) -> Result<Option<ComplianceBalance>> {
        let cb = self
            .conn
            .query_row(
                "SELECT id, ship_id, year, cb_gco2eq, created_at
                 FROM ship_compliance WHERE ship_id = ?1 AND year = ?2",
                params![ship_id, year],
                balance_from_row,
            )
            .optional()?;
        Ok(cb)
    }

    fn save_cb(&self, cb: &ComplianceBalance) -> Result<ComplianceBalance> {
        Ok(upsert_balance(&self.conn, cb)?)
    }
}

// ============================================================================
// BANK LEDGER
// ============================================================================

impl BankStore for SqliteStore {
    fn get_total_banked(&self, ship_id: &str, year: i32) -> Result<f64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(amount_gco2eq), 0.0) FROM bank_entries
             WHERE ship_id = ?1 AND year = ?2",
            params![ship_id, year],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn get_total_applied(&self, ship_id: &str, year: i32) -> Result<f64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(amount_gco2eq), 0.0) FROM bank_applications
             WHERE ship_id = ?1 AND year = ?2",
            params![ship_id, year],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn save_bank_entry(&self, entry: &BankEntry) -> Result<BankEntry> {
        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO bank_entries (ship_id, year, amount_gco2eq, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.ship_id,
                entry.year,
                entry.amount_gco2eq,
                created_at.to_rfc3339()
            ],
        )?;

        Ok(BankEntry {
            id: Some(self.conn.last_insert_rowid()),
            created_at: Some(created_at),
            ..entry.clone()
        })
    }

    fn record_application(&self, ship_id: &str, year: i32, amount: f64) -> Result<()> {
        insert_application(&self.conn, ship_id, year, amount)?;
        Ok(())
    }

    fn apply_to_balance(&self, cb_after: &ComplianceBalance, amount: f64) -> Result<ComplianceBalance> {
        let tx = self.conn.unchecked_transaction()?;
        let saved = upsert_balance(&tx, cb_after)?;
        insert_application(&tx, &cb_after.ship_id, cb_after.year, amount)?;
        tx.commit()?;

        tracing::debug!(ship_id = %cb_after.ship_id, year = cb_after.year, amount, "Recorded application");
        Ok(saved)
    }

    fn get_bank_records(&self, ship_id: &str, year: i32) -> Result<Vec<BankEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, ship_id, year, amount_gco2eq, created_at
             FROM bank_entries
             WHERE ship_id = ?1 AND year = ?2
             ORDER BY id DESC",
        )?;

        let entries = stmt
            .query_map(params![ship_id, year], bank_entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    fn get_applications(&self, ship_id: &str, year: i32) -> Result<Vec<BankApplication>> {
        let mut stmt = self.conn.prepare(
            "SELECT ship_id, year, amount_gco2eq, created_at
             FROM bank_applications
             WHERE ship_id = ?1 AND year = ?2
             ORDER BY id DESC",
        )?;

        let applications = stmt
            .query_map(params![ship_id, year], |row| {
                Ok(BankApplication {
                    ship_id: row.get(0)?,
                    year: row.get(1)?,
                    amount_gco2eq: row.get(2)?,
                    created_at: Some(parse_timestamp(row, 3)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(applications)
    }
}

// ============================================================================
// POOLS
// ============================================================================

impl PoolStore for SqliteStore {
    fn save(&self, pool: &Pool) -> Result<Pool> {
        let created_at = pool.created_at.unwrap_or_else(Utc::now);

        // Pool row and members land together or not at all
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO pools (id, year, created_at) VALUES (?1, ?2, ?3)",
            params![pool.id, pool.year, created_at.to_rfc3339()],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref failure, _)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                ComplianceError::Conflict(format!("Pool {} already exists", pool.id))
            }
            other => other.into(),
        })?;
        for (position, member) in pool.members.iter().enumerate() {
            tx.execute(
                "INSERT INTO pool_members (pool_id, position, ship_id, cb_before, cb_after)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    pool.id,
                    position as i64,
                    member.ship_id,
                    member.cb_before,
                    member.cb_after
                ],
            )?;
        }
        tx.commit()?;

        tracing::debug!(pool_id = pool.id, members = pool.members.len(), "Saved pool");
        Ok(Pool {
            created_at: Some(created_at),
            ..pool.clone()
        })
    }

    fn find_by_id(&self, pool_id: i64) -> Result<Option<Pool>> {
        let header = self
            .conn
            .query_row(
                "SELECT id, year, created_at FROM pools WHERE id = ?1",
                params![pool_id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i32>(1)?, parse_timestamp(row, 2)?)),
            )
            .optional()?;

        let Some((id, year, created_at)) = header else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT ship_id, cb_before, cb_after FROM pool_members
             WHERE pool_id = ?1 ORDER BY position",
        )?;
        let members = stmt
            .query_map(params![id], |row| {
                Ok(PoolMember {
                    ship_id: row.get(0)?,
                    cb_before: row.get(1)?,
                    cb_after: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(Pool {
            id,
            year,
            members,
            created_at: Some(created_at),
        }))
    }

    fn get_next_id(&self) -> Result<i64> {
        let next = self
            .conn
            .query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM pools", [], |row| row.get(0))?;
        Ok(next)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pooling::{allocate, PoolCandidate};
    use crate::route::seed_routes;

    fn seeded() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.import_routes(&seed_routes()).unwrap();
        store
    }

    #[test]
    fn test_route_filters_in_sql() {
        let store = seeded();

        assert_eq!(store.find_all(&RouteFilters::default()).unwrap().len(), 5);
        assert_eq!(store.find_all(&RouteFilters::for_year(2025)).unwrap().len(), 2);

        let hfo = RouteFilters {
            fuel_type: Some("HFO".to_string()),
            ..Default::default()
        };
        let ids: Vec<String> = store
            .find_all(&hfo)
            .unwrap()
            .into_iter()
            .map(|r| r.route_id)
            .collect();
        assert_eq!(ids, vec!["R001", "R004"]);
    }

    #[test]
    fn test_route_lookup_and_baseline() {
        let store = seeded();

        let r2 = RouteRepository::find_by_id(&store, "R002").unwrap().unwrap();
        assert_eq!(r2, seed_routes()[1]);
        assert!(RouteRepository::find_by_id(&store, "R404").unwrap().is_none());

        assert_eq!(store.find_baseline().unwrap().unwrap().route_id, "R001");

        store.clear_all_baselines().unwrap();
        assert!(store.find_baseline().unwrap().is_none());
        store.set_baseline("R003").unwrap();
        assert_eq!(store.find_baseline().unwrap().unwrap().route_id, "R003");
    }

    #[test]
    fn test_replace_baseline_rolls_back_on_failure() {
        let store = seeded();

        store.replace_baseline("R002").unwrap();
        assert_eq!(store.find_baseline().unwrap().unwrap().route_id, "R002");

        // Marking R004 aborts after the clear already ran
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER lock_r004 BEFORE UPDATE OF is_baseline ON routes
                 WHEN NEW.route_id = 'R004' AND NEW.is_baseline = 1
                 BEGIN SELECT RAISE(ABORT, 'R004 locked'); END;",
            )
            .unwrap();

        assert!(store.replace_baseline("R004").is_err());
        assert_eq!(store.find_baseline().unwrap().unwrap().route_id, "R002");
    }

    #[test]
    fn test_import_is_idempotent() {
        let store = seeded();
        store.import_routes(&seed_routes()).unwrap();
        assert_eq!(store.find_all(&RouteFilters::default()).unwrap().len(), 5);
    }

    #[test]
    fn test_compliance_upsert() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get_cb("S001", 2024).unwrap().is_none());

        let first = store.save_cb(&ComplianceBalance::new("S001", 2024, 15000.5)).unwrap();
        let second = store.save_cb(&ComplianceBalance::new("S001", 2024, 9000.0)).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.cb_gco2eq, 9000.0);
        assert!(second.created_at.is_some());
        assert_eq!(store.get_cb("S001", 2024).unwrap().unwrap().cb_gco2eq, 9000.0);
    }

    #[test]
    fn test_bank_ledger_sums() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get_total_banked("S001", 2024).unwrap(), 0.0);

        let saved = store
            .save_bank_entry(&BankEntry::new("S001", 2024, 1200.0).unwrap())
            .unwrap();
        assert!(saved.id.is_some());
        store.save_bank_entry(&BankEntry::new("S001", 2024, 800.0).unwrap()).unwrap();
        store.save_bank_entry(&BankEntry::new("S001", 2025, 50.0).unwrap()).unwrap();
        store.record_application("S001", 2024, 500.0).unwrap();
        store.record_application("S001", 2024, 250.0).unwrap();

        assert_eq!(store.get_total_banked("S001", 2024).unwrap(), 2000.0);
        assert_eq!(store.get_total_applied("S001", 2024).unwrap(), 750.0);

        let records = store.get_bank_records("S001", 2024).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount_gco2eq, 800.0);
        assert_eq!(records[1].amount_gco2eq, 1200.0);

        let applications = store.get_applications("S001", 2024).unwrap();
        assert_eq!(applications.len(), 2);
        assert_eq!(applications[0].amount_gco2eq, 250.0);
    }

    #[test]
    fn test_apply_to_balance_is_all_or_nothing() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save_cb(&ComplianceBalance::new("S001", 2024, -500.0)).unwrap();

        let saved = store
            .apply_to_balance(&ComplianceBalance::new("S001", 2024, -200.0), 300.0)
            .unwrap();
        assert_eq!(saved.cb_gco2eq, -200.0);
        assert_eq!(store.get_total_applied("S001", 2024).unwrap(), 300.0);

        // A zero amount violates the applications CHECK after the CB upsert ran
        let err = store
            .apply_to_balance(&ComplianceBalance::new("S001", 2024, 900.0), 0.0)
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Storage(_)));
        assert_eq!(store.get_cb("S001", 2024).unwrap().unwrap().cb_gco2eq, -200.0);
        assert_eq!(store.get_total_applied("S001", 2024).unwrap(), 300.0);
    }

    #[test]
    fn test_pool_id_clash_keeps_first_pool() {
        let store = SqliteStore::open_in_memory().unwrap();

        let first = allocate(&[PoolCandidate::new("S1", 10.0), PoolCandidate::new("S2", -4.0)]);
        let second = allocate(&[PoolCandidate::new("S9", 99.0)]);
        PoolStore::save(&store, &Pool::new(1, 2024, first.clone())).unwrap();

        let err = PoolStore::save(&store, &Pool::new(1, 2025, second)).unwrap_err();
        assert!(matches!(err, ComplianceError::Conflict(_)));

        let found = PoolStore::find_by_id(&store, 1).unwrap().unwrap();
        assert_eq!(found.year, 2024);
        assert_eq!(found.members, first);
    }

    #[test]
    fn test_pool_persisted_with_member_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get_next_id().unwrap(), 1);

        let members = allocate(&[
            PoolCandidate::new("S3", -5000.0),
            PoolCandidate::new("S1", 15000.0),
            PoolCandidate::new("S2", 3000.0),
        ]);
        let saved = PoolStore::save(&store, &Pool::new(1, 2024, members.clone())).unwrap();
        assert_eq!(store.get_next_id().unwrap(), 2);

        let found = PoolStore::find_by_id(&store, 1).unwrap().unwrap();
        assert_eq!(found.members, members);
        assert_eq!(found.year, 2024);
        assert_eq!(found.created_at.map(|t| t.timestamp()), saved.created_at.map(|t| t.timestamp()));

        assert!(PoolStore::find_by_id(&store, 99).unwrap().is_none());
    }

    #[test]
    fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fueleu.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.import_routes(&seed_routes()).unwrap();
            store.save_cb(&ComplianceBalance::new("S002", 2024, -5000.2)).unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.find_all(&RouteFilters::default()).unwrap().len(), 5);
        assert_eq!(reopened.get_cb("S002", 2024).unwrap().unwrap().cb_gco2eq, -5000.2);
    }
}
