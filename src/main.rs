// FuelEU Compliance CLI
// Routes, compliance balances, banking and pooling over a SQLite file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fueleu_compliance::{
    load_routes_csv, seed_balances, seed_routes, ComplianceCalculator, ComplianceConfig,
    ComplianceError, ComplianceService, ComplianceStore, RouteFilters, SqliteStore,
};

#[derive(Parser)]
#[command(name = "fueleu")]
#[command(about = "FuelEU Maritime compliance: CB, banking and pooling", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, default_value = "fueleu.db")]
    db: PathBuf,

    /// JSON file overriding the regulatory constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the reference fleet and sample balances
    Seed,

    /// Import routes from a CSV file
    Import { csv: PathBuf },

    /// List routes
    Routes {
        #[arg(long)]
        vessel_type: Option<String>,
        #[arg(long)]
        fuel_type: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Make a route the comparison baseline
    Baseline { route_id: String },

    /// Compare every route against the baseline
    Compare,

    /// Compute and store a ship's compliance balance
    ComputeCb {
        ship_id: String,
        year: i32,
        /// Use this route instead of matching by ship id
        #[arg(long)]
        route: Option<String>,
    },

    /// Show the CB with applied bank amounts removed
    AdjustedCb { ship_id: String, year: i32 },

    /// Bank part of a surplus
    Bank { ship_id: String, year: i32, amount: f64 },

    /// Apply banked surplus to the CB
    Apply { ship_id: String, year: i32, amount: f64 },

    /// List bank entries (newest first)
    Records { ship_id: String, year: i32 },

    /// List applications of banked surplus (newest first)
    Applications { ship_id: String, year: i32 },

    /// Create a pool from ships' adjusted CBs
    Pool {
        year: i32,
        #[arg(required = true)]
        ship_ids: Vec<String>,
    },

    /// Show a stored pool
    ShowPool { pool_id: i64 },
}

/// Exit status for a request the compliance rules refused
const EXIT_RULE_VIOLATION: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {:#}", err);
            let rejected = err
                .downcast_ref::<ComplianceError>()
                .is_some_and(ComplianceError::is_rule_violation);
            if rejected {
                ExitCode::from(EXIT_RULE_VIOLATION)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ComplianceConfig::from_file(path)?,
        None => ComplianceConfig::default(),
    };

    let store = SqliteStore::open(&cli.db)
        .with_context(|| format!("Failed to open database: {:?}", cli.db))?;
    let service =
        ComplianceService::from_store(&store).with_calculator(ComplianceCalculator::new(config));

    match cli.command {
        Commands::Seed => {
            let count = store.import_routes(&seed_routes())?;
            for cb in seed_balances() {
                store.save_cb(&cb)?;
            }
            println!("✅ Seeded {} routes and {} balances", count, seed_balances().len());
        }
        Commands::Import { csv } => {
            let routes = load_routes_csv(&csv)
                .with_context(|| format!("Failed to load routes from {:?}", csv))?;
            let count = store.import_routes(&routes)?;
            println!("✅ Imported {} routes", count);
        }
        Commands::Routes {
            vessel_type,
            fuel_type,
            year,
        } => {
            let filters = RouteFilters {
                vessel_type,
                fuel_type,
                year,
            };
            print_json(&service.get_routes(&filters)?)?;
        }
        Commands::Baseline { route_id } => {
            service.set_baseline(&route_id)?;
            println!("✅ Baseline set to {}", route_id);
        }
        Commands::Compare => {
            print_json(&service.get_comparison()?)?;
            println!(
                "🎯 Target intensity: {:.4} gCO₂e/MJ",
                service.calculator().target_intensity()
            );
        }
        Commands::ComputeCb {
            ship_id,
            year,
            route,
        } => {
            let cb = match route {
                Some(route_id) => service.compute_cb_from_route(&route_id, &ship_id, year)?,
                None => service.compute_cb(&ship_id, year)?,
            };
            print_json(&cb)?;
        }
        Commands::AdjustedCb { ship_id, year } => {
            print_json(&service.get_adjusted_cb(&ship_id, year)?)?
        }
        Commands::Bank {
            ship_id,
            year,
            amount,
        } => print_json(&service.bank_surplus(&ship_id, year, amount)?)?,
        Commands::Apply {
            ship_id,
            year,
            amount,
        } => print_json(&service.apply_banked(&ship_id, year, amount)?)?,
        Commands::Records { ship_id, year } => {
            print_json(&service.get_bank_records(&ship_id, year)?)?
        }
        Commands::Applications { ship_id, year } => {
            print_json(&service.get_applications(&ship_id, year)?)?
        }
        Commands::Pool { year, ship_ids } => {
            let pool = service.create_pool(year, &ship_ids)?;
            print_json(&pool)?;
            println!("✅ Pool {} created ({} members)", pool.id, pool.members.len());
        }
        Commands::ShowPool { pool_id } => print_json(&service.get_pool(pool_id)?)?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
