// 🏦 Banking - setting aside surplus CB for later years (Article 20)
//
// The ledger never keeps a running total. Banked and applied amounts are
// always recomputed by summing the recorded entries for a ship and year.

use crate::error::{ComplianceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// BANK ENTRY
// ============================================================================

/// Surplus banked by a ship in a given year. Amount is always > 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankEntry {
    pub ship_id: String,
    pub year: i32,
    pub amount_gco2eq: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl BankEntry {
    pub fn new(ship_id: impl Into<String>, year: i32, amount_gco2eq: f64) -> Result<Self> {
        // NaN fails this check too
        if !(amount_gco2eq > 0.0) {
            return Err(ComplianceError::InvalidAmount(amount_gco2eq));
        }

        Ok(BankEntry {
            ship_id: ship_id.into(),
            year,
            amount_gco2eq,
            id: None,
            created_at: None,
        })
    }

    pub fn is_valid(&self) -> bool {
        !self.ship_id.is_empty() && self.year > 0 && self.amount_gco2eq > 0.0
    }

    /// Whether this entry alone covers a deficit of the given size
    pub fn can_cover(&self, deficit: f64) -> bool {
        self.amount_gco2eq >= deficit.abs()
    }

    /// Amount left after `applied` has been drawn, floored at zero
    pub fn remaining(&self, applied: f64) -> f64 {
        (self.amount_gco2eq - applied).max(0.0)
    }
}

/// A recorded draw on banked surplus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankApplication {
    pub ship_id: String,
    pub year: i32,
    pub amount_gco2eq: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of applying banked surplus to a ship's CB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyBankedResult {
    pub cb_before: f64,
    pub applied: f64,
    pub cb_after: f64,
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Sum of banked amounts for one ship and year
pub fn total_banked<'a, I>(entries: I, ship_id: &str, year: i32) -> f64
where
    I: IntoIterator<Item = &'a BankEntry>,
{
    entries
        .into_iter()
        .filter(|e| e.ship_id == ship_id && e.year == year)
        .map(|e| e.amount_gco2eq)
        .sum()
}

/// Sum of applied amounts for one ship and year
pub fn total_applied<'a, I>(applications: I, ship_id: &str, year: i32) -> f64
where
    I: IntoIterator<Item = &'a BankApplication>,
{
    applications
        .into_iter()
        .filter(|a| a.ship_id == ship_id && a.year == year)
        .map(|a| a.amount_gco2eq)
        .sum()
}

// ============================================================================
// LEDGER RULES
// ============================================================================

/// Banking and application rules over externally supplied aggregates
pub struct BankLedger;

impl BankLedger {
    /// Validate a banking request and build the entry to record.
    ///
    /// The CB itself is untouched: banking only writes to the side ledger.
    pub fn bank_surplus(
        ship_id: &str,
        year: i32,
        current_cb: f64,
        already_banked: f64,
        amount: f64,
    ) -> Result<BankEntry> {
        if !(amount > 0.0) {
            return Err(ComplianceError::InvalidAmount(amount));
        }
        if current_cb <= 0.0 {
            return Err(ComplianceError::NotPositiveBalance(current_cb));
        }

        let available_to_bank = current_cb - already_banked;
        if amount > available_to_bank {
            return Err(ComplianceError::ExceedsAvailable {
                operation: "bank",
                requested: amount,
                available: available_to_bank,
            });
        }

        BankEntry::new(ship_id, year, amount)
    }

    /// Validate an application of banked surplus and compute the new CB
    pub fn apply_banked(
        current_cb: f64,
        total_banked: f64,
        total_applied: f64,
        amount: f64,
    ) -> Result<ApplyBankedResult> {
        if !(amount > 0.0) {
            return Err(ComplianceError::InvalidAmount(amount));
        }

        let available_banked = total_banked - total_applied;
        if amount > available_banked {
            return Err(ComplianceError::ExceedsAvailable {
                operation: "apply",
                requested: amount,
                available: available_banked,
            });
        }

        Ok(ApplyBankedResult {
            cb_before: current_cb,
            applied: amount,
            cb_after: current_cb + amount,
        })
    }

    /// Stored CB with every applied amount taken back out
    pub fn adjusted_cb(original_cb: f64, total_applied: f64) -> f64 {
        original_cb - total_applied
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_entry_rejects_non_positive_amount() {
        assert!(BankEntry::new("S001", 2024, 100.0).is_ok());
        assert!(matches!(
            BankEntry::new("S001", 2024, 0.0),
            Err(ComplianceError::InvalidAmount(_))
        ));
        assert!(BankEntry::new("S001", 2024, -1.0).is_err());
        assert!(BankEntry::new("S001", 2024, f64::NAN).is_err());
    }

    #[test]
    fn test_bank_entry_helpers() {
        let entry = BankEntry::new("S001", 2024, 5000.0).unwrap();

        assert!(entry.is_valid());
        assert!(entry.can_cover(-5000.0));
        assert!(entry.can_cover(4999.0));
        assert!(!entry.can_cover(-5000.01));
        assert_eq!(entry.remaining(1500.0), 3500.0);
        assert_eq!(entry.remaining(6000.0), 0.0);

        let mut empty_ship = entry.clone();
        empty_ship.ship_id.clear();
        assert!(!empty_ship.is_valid());
    }

    #[test]
    fn test_bank_exact_boundary_succeeds() {
        let entry = BankLedger::bank_surplus("S001", 2024, 10000.0, 0.0, 10000.0).unwrap();
        assert_eq!(entry.amount_gco2eq, 10000.0);
        assert_eq!(entry.ship_id, "S001");
        assert_eq!(entry.year, 2024);
    }

    #[test]
    fn test_bank_over_boundary_fails() {
        let err = BankLedger::bank_surplus("S001", 2024, 10000.0, 0.0, 10000.01).unwrap_err();
        match err {
            ComplianceError::ExceedsAvailable {
                requested,
                available,
                ..
            } => {
                assert_eq!(requested, 10000.01);
                assert_eq!(available, 10000.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bank_counts_already_banked() {
        assert!(BankLedger::bank_surplus("S001", 2024, 10000.0, 4000.0, 6000.0).is_ok());
        assert!(BankLedger::bank_surplus("S001", 2024, 10000.0, 4000.0, 6000.5).is_err());
    }

    #[test]
    fn test_bank_from_non_surplus_fails_regardless_of_amount() {
        for cb in [0.0, -1.0, -5000.2] {
            for amount in [0.01, 1.0, 1e9] {
                let err = BankLedger::bank_surplus("S002", 2024, cb, 0.0, amount).unwrap_err();
                assert!(matches!(err, ComplianceError::NotPositiveBalance(_)));
            }
        }
    }

    #[test]
    fn test_bank_invalid_amount_checked_first() {
        let err = BankLedger::bank_surplus("S002", 2024, -10.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ComplianceError::InvalidAmount(_)));
    }

    #[test]
    fn test_apply_boundary() {
        // available = 8000 - 2000 = 6000
        let result = BankLedger::apply_banked(-5000.0, 8000.0, 2000.0, 6000.0).unwrap();
        assert_eq!(result.cb_before, -5000.0);
        assert_eq!(result.applied, 6000.0);
        assert_eq!(result.cb_after, 1000.0);

        let err = BankLedger::apply_banked(-5000.0, 8000.0, 2000.0, 6000.01).unwrap_err();
        assert!(matches!(
            err,
            ComplianceError::ExceedsAvailable { available, .. } if available == 6000.0
        ));
    }

    #[test]
    fn test_apply_invalid_amount() {
        for amount in [0.0, -100.0] {
            let err = BankLedger::apply_banked(-5000.0, 8000.0, 0.0, amount).unwrap_err();
            assert!(matches!(err, ComplianceError::InvalidAmount(_)));
        }
    }

    #[test]
    fn test_apply_with_nothing_banked_fails() {
        let err = BankLedger::apply_banked(-5000.0, 0.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, ComplianceError::ExceedsAvailable { .. }));
    }

    #[test]
    fn test_adjusted_cb() {
        assert_eq!(BankLedger::adjusted_cb(1000.0, 0.0), 1000.0);
        assert_eq!(BankLedger::adjusted_cb(1000.0, 6000.0), -5000.0);
    }

    #[test]
    fn test_totals_are_sums_over_matching_records() {
        let entries = vec![
            BankEntry::new("S001", 2024, 1000.0).unwrap(),
            BankEntry::new("S001", 2024, 2500.0).unwrap(),
            BankEntry::new("S001", 2025, 700.0).unwrap(),
            BankEntry::new("S002", 2024, 900.0).unwrap(),
        ];
        assert_eq!(total_banked(&entries, "S001", 2024), 3500.0);
        assert_eq!(total_banked(&entries, "S001", 2025), 700.0);
        assert_eq!(total_banked(&entries, "S003", 2024), 0.0);

        let applications = vec![
            BankApplication {
                ship_id: "S001".to_string(),
                year: 2024,
                amount_gco2eq: 400.0,
                created_at: None,
            },
            BankApplication {
                ship_id: "S001".to_string(),
                year: 2024,
                amount_gco2eq: 100.0,
                created_at: None,
            },
        ];
        assert_eq!(total_applied(&applications, "S001", 2024), 500.0);
        assert_eq!(total_applied(&applications, "S002", 2024), 0.0);
    }
}
