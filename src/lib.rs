// FuelEU Compliance - Core Library
// Exposes all modules for use in the CLI and tests

pub mod banking;     // Banking ledger rules
pub mod compliance;  // CB calculator + balance value type
pub mod config;      // Regulatory constants, JSON overrides
pub mod error;
pub mod pooling;     // Greedy pool allocation + validation
pub mod ports;       // Repository contracts
pub mod route;       // Route data, filters, CSV import
pub mod service;     // Use cases over the ports
pub mod store;       // Memory + SQLite adapters

// Re-export commonly used types
pub use banking::{ApplyBankedResult, BankApplication, BankEntry, BankLedger};
pub use compliance::{
    seed_balances, ComplianceBalance, ComplianceCalculator, ENERGY_PER_TONNE, TARGET_INTENSITY,
};
pub use config::ComplianceConfig;
pub use error::{ComplianceError, Result};
pub use pooling::{allocate, Pool, PoolCandidate, PoolMember, PoolValidation};
pub use ports::{BankStore, ComplianceStore, PoolStore, RouteRepository};
pub use route::{load_routes_csv, seed_routes, Route, RouteFilters};
pub use service::{ComparisonResult, ComplianceService, RouteComparison};
pub use store::{MemoryStore, SqliteStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
