// 🚢 Routes - physical voyage data that Compliance Balances derive from

use crate::compliance::ComplianceCalculator;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub route_id: String,
    pub vessel_type: String,
    pub fuel_type: String,
    pub year: i32,

    /// gCO₂e/MJ
    pub ghg_intensity: f64,

    /// tonnes
    pub fuel_consumption: f64,

    /// km
    pub distance: f64,

    /// tonnes
    pub total_emissions: f64,

    #[serde(default)]
    pub is_baseline: bool,
}

impl Route {
    pub fn calculate_cb(&self, calculator: &ComplianceCalculator) -> Result<f64> {
        calculator.calculate(self.ghg_intensity, self.fuel_consumption)
    }

    pub fn is_compliant(&self, calculator: &ComplianceCalculator) -> bool {
        calculator.is_compliant(self.ghg_intensity)
    }

    /// Percent difference of this route's intensity against `baseline`
    pub fn percent_diff(&self, baseline: &Route, calculator: &ComplianceCalculator) -> Result<f64> {
        calculator.percent_diff(self.ghg_intensity, baseline.ghg_intensity)
    }
}

// ============================================================================
// FILTERS
// ============================================================================

/// Optional filters for route queries; `None` matches everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteFilters {
    pub vessel_type: Option<String>,
    pub fuel_type: Option<String>,
    pub year: Option<i32>,
}

impl RouteFilters {
    pub fn for_year(year: i32) -> Self {
        RouteFilters {
            year: Some(year),
            ..Default::default()
        }
    }

    pub fn matches(&self, route: &Route) -> bool {
        self.vessel_type
            .as_ref()
            .map_or(true, |v| *v == route.vessel_type)
            && self.fuel_type.as_ref().map_or(true, |f| *f == route.fuel_type)
            && self.year.map_or(true, |y| y == route.year)
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load routes from a CSV file with camelCase headers
/// (`routeId,vesselType,fuelType,year,ghgIntensity,...`)
pub fn load_routes_csv(csv_path: &Path) -> Result<Vec<Route>> {
    let mut rdr = csv::Reader::from_path(csv_path)?;

    let mut routes = Vec::new();
    for result in rdr.deserialize() {
        let route: Route = result?;
        routes.push(route);
    }

    Ok(routes)
}

/// Reference fleet used to seed a fresh database (R001 is the baseline)
pub fn seed_routes() -> Vec<Route> {
    let rows: [(&str, &str, &str, i32, f64, f64, f64, f64, bool); 5] = [
        ("R001", "Container", "HFO", 2024, 91.0, 5000.0, 12000.0, 4500.0, true),
        ("R002", "BulkCarrier", "LNG", 2024, 88.0, 4800.0, 11500.0, 4200.0, false),
        ("R003", "Tanker", "MGO", 2024, 93.5, 5100.0, 12500.0, 4700.0, false),
        ("R004", "RoRo", "HFO", 2025, 89.2, 4900.0, 11800.0, 4300.0, false),
        ("R005", "Container", "LNG", 2025, 90.5, 4950.0, 11900.0, 4400.0, false),
    ];

    rows.iter()
        .map(
            |&(id, vessel, fuel, year, ghg, consumption, distance, emissions, baseline)| Route {
                route_id: id.to_string(),
                vessel_type: vessel.to_string(),
                fuel_type: fuel.to_string(),
                year,
                ghg_intensity: ghg,
                fuel_consumption: consumption,
                distance,
                total_emissions: emissions,
                is_baseline: baseline,
            },
        )
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
