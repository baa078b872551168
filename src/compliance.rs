// 🧮 Compliance Calculator - CB from physical route data
//
//   CB = (target - actual GHG intensity) × energy in scope
//   energy in scope = fuel consumption (t) × 41 000 MJ/t
//
// Positive CB = surplus, negative CB = deficit.

use crate::config::ComplianceConfig;
use crate::error::{ComplianceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::config::{ENERGY_PER_TONNE, TARGET_INTENSITY};

// ============================================================================
// CALCULATOR
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplianceCalculator {
    config: ComplianceConfig,
}

impl ComplianceCalculator {
    pub fn new(config: ComplianceConfig) -> Self {
        ComplianceCalculator { config }
    }

    pub fn target_intensity(&self) -> f64 {
        self.config.target_intensity
    }

    /// Compliance Balance in gCO₂e for one route's intensity and fuel use
    ///
    /// Zero consumption yields zero. Negative or non-finite inputs are rejected.
    pub fn calculate(&self, ghg_intensity: f64, fuel_consumption: f64) -> Result<f64> {
        if !ghg_intensity.is_finite() {
            return Err(ComplianceError::InvalidInput(format!(
                "GHG intensity must be finite (got {})",
                ghg_intensity
            )));
        }
        if !fuel_consumption.is_finite() || fuel_consumption < 0.0 {
            return Err(ComplianceError::InvalidInput(format!(
                "Fuel consumption must be a non-negative number (got {})",
                fuel_consumption
            )));
        }

        let energy_in_scope = fuel_consumption * self.config.energy_per_tonne;
        Ok((self.config.target_intensity - ghg_intensity) * energy_in_scope)
    }

    /// Percentage difference of a candidate intensity against a baseline
    pub fn percent_diff(&self, candidate_intensity: f64, baseline_intensity: f64) -> Result<f64> {
        if baseline_intensity == 0.0 {
            return Err(ComplianceError::DivisionByZero(
                "Baseline GHG intensity cannot be zero".to_string(),
            ));
        }
        Ok((candidate_intensity / baseline_intensity - 1.0) * 100.0)
    }

    pub fn is_compliant(&self, ghg_intensity: f64) -> bool {
        ghg_intensity <= self.config.target_intensity
    }
}

// ============================================================================
// COMPLIANCE BALANCE
// ============================================================================

/// A ship's compliance balance for one reporting year
///
/// Immutable: `adjust` returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceBalance {
    pub ship_id: String,
    pub year: i32,
    pub cb_gco2eq: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ComplianceBalance {
    pub fn new(ship_id: impl Into<String>, year: i32, cb_gco2eq: f64) -> Self {
        ComplianceBalance {
            ship_id: ship_id.into(),
            year,
            cb_gco2eq,
            id: None,
            created_at: None,
        }
    }

    pub fn is_surplus(&self) -> bool {
        self.cb_gco2eq > 0.0
    }

    pub fn is_deficit(&self) -> bool {
        self.cb_gco2eq < 0.0
    }

    pub fn is_balanced(&self) -> bool {
        self.cb_gco2eq == 0.0
    }

    pub fn abs_value(&self) -> f64 {
        self.cb_gco2eq.abs()
    }

    /// New balance shifted by `delta`, keeping identity fields
    pub fn adjust(&self, delta: f64) -> ComplianceBalance {
        ComplianceBalance {
            cb_gco2eq: self.cb_gco2eq + delta,
            ..self.clone()
        }
    }
}

/// Sample balances seeded alongside the reference fleet
pub fn seed_balances() -> Vec<ComplianceBalance> {
    vec![
        ComplianceBalance::new("S001", 2024, 15000.5),
        ComplianceBalance::new("S002", 2024, -5000.2),
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn test_below_target_is_surplus() {
        let calc = ComplianceCalculator::default();

        // R002 from the seed fleet: 88.0 gCO₂e/MJ, 4800 t
        let cb = calc.calculate(88.0, 4800.0).unwrap();
        let expected = (89.3368 - 88.0) * 4800.0 * 41000.0;

        assert!(approx_eq(cb, expected));
        assert!(cb > 0.0);
    }

    #[test]
    fn test_above_target_is_deficit() {
        let calc = ComplianceCalculator::default();
        let cb = calc.calculate(93.5, 5100.0).unwrap();
        assert!(cb < 0.0);
    }

    #[test]
    fn test_exact_target_is_zero() {
        let calc = ComplianceCalculator::default();
        for fuel in [0.0, 1.0, 4800.0, 123_456.789] {
            assert_eq!(calc.calculate(TARGET_INTENSITY, fuel).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_linear_in_fuel_consumption() {
        let calc = ComplianceCalculator::default();
        let single = calc.calculate(91.0, 1000.0).unwrap();
        let triple = calc.calculate(91.0, 3000.0).unwrap();
        assert!(approx_eq(triple, 3.0 * single));
    }

    #[test]
    fn test_zero_consumption_is_zero() {
        let calc = ComplianceCalculator::default();
        assert_eq!(calc.calculate(95.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_consumption_rejected() {
        let calc = ComplianceCalculator::default();
        let err = calc.calculate(88.0, -1.0).unwrap_err();
        assert!(matches!(err, ComplianceError::InvalidInput(_)));

        assert!(calc.calculate(f64::NAN, 10.0).is_err());
        assert!(calc.calculate(88.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_custom_config() {
        let calc = ComplianceCalculator::new(ComplianceConfig {
            target_intensity: 90.0,
            energy_per_tonne: 1000.0,
        });

        assert_eq!(calc.target_intensity(), 90.0);
        assert_eq!(calc.calculate(89.0, 2.0).unwrap(), 2000.0);
        assert!(calc.is_compliant(90.0));
        assert!(!calc.is_compliant(90.1));
    }

    #[test]
    fn test_percent_diff() {
        let calc = ComplianceCalculator::default();

        let diff = calc.percent_diff(88.0, 91.0).unwrap();
        assert!(approx_eq(diff, (88.0 / 91.0 - 1.0) * 100.0));
        assert!(diff < 0.0);

        assert_eq!(calc.percent_diff(91.0, 91.0).unwrap(), 0.0);
    }

    #[test]
    fn test_percent_diff_zero_baseline_fails() {
        let calc = ComplianceCalculator::default();
        for candidate in [0.0, 1.0, -5.0, 89.3368] {
            let err = calc.percent_diff(candidate, 0.0).unwrap_err();
            assert!(matches!(err, ComplianceError::DivisionByZero(_)));
        }
    }

    #[test]
    fn test_is_compliant_boundary() {
        let calc = ComplianceCalculator::default();
        assert!(calc.is_compliant(TARGET_INTENSITY));
        assert!(calc.is_compliant(88.0));
        assert!(!calc.is_compliant(89.4));
    }

    #[test]
    fn test_balance_sign_queries() {
        let surplus = ComplianceBalance::new("S001", 2024, 15000.5);
        let deficit = ComplianceBalance::new("S002", 2024, -5000.2);
        let balanced = ComplianceBalance::new("S003", 2024, 0.0);

        assert!(surplus.is_surplus() && !surplus.is_deficit());
        assert!(deficit.is_deficit() && !deficit.is_surplus());
        assert!(balanced.is_balanced());
        assert_eq!(deficit.abs_value(), 5000.2);
    }

    #[test]
    fn test_adjust_returns_new_value() {
        let cb = ComplianceBalance::new("S001", 2024, 1000.0);
        let adjusted = cb.adjust(-250.0);

        assert_eq!(cb.cb_gco2eq, 1000.0);
        assert_eq!(adjusted.cb_gco2eq, 750.0);
        assert_eq!(adjusted.ship_id, "S001");
        assert_eq!(adjusted.year, 2024);
    }

    #[test]
    fn test_adjust_composes_additively() {
        let cb = ComplianceBalance::new("S001", 2024, 1000.0);
        let stepwise = cb.adjust(300.0).adjust(-1200.0);
        let combined = cb.adjust(300.0 + -1200.0);
        assert_eq!(stepwise, combined);
    }

    #[test]
    fn test_balance_json_uses_camel_case() {
        let cb = ComplianceBalance::new("S001", 2024, 15000.5);
        let json = serde_json::to_value(&cb).unwrap();

        assert_eq!(json["shipId"], "S001");
        assert_eq!(json["cbGco2eq"], 15000.5);
        assert!(json.get("id").is_none());
    }
}
