// 🤝 Pooling - combining ships' adjusted CBs within one year (Article 21)
//
// Allocation is a greedy, forward-only sweep:
//   1. sort members by cb_before, largest surplus first (stable for ties)
//   2. each member still holding surplus gives to every later member still
//      in deficit, min(available, needed) at a time
//   3. no re-sorting mid-pass; members already passed never receive again
//
// Every transfer moves the same amount out of one member and into another,
// so Σ cb_after == Σ cb_before for any input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ComplianceError, Result};

// ============================================================================
// MEMBERS
// ============================================================================

/// A ship entering a pool with its adjusted CB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCandidate {
    pub ship_id: String,
    pub cb_before: f64,
}

impl PoolCandidate {
    pub fn new(ship_id: impl Into<String>, cb_before: f64) -> Self {
        PoolCandidate {
            ship_id: ship_id.into(),
            cb_before,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMember {
    pub ship_id: String,
    pub cb_before: f64,
    pub cb_after: f64,
}

impl PoolMember {
    pub fn change(&self) -> f64 {
        self.cb_after - self.cb_before
    }

    pub fn has_improved(&self) -> bool {
        self.cb_after > self.cb_before
    }

    pub fn has_worsened(&self) -> bool {
        self.cb_after < self.cb_before
    }

    pub fn was_deficit(&self) -> bool {
        self.cb_before < 0.0
    }

    pub fn was_surplus(&self) -> bool {
        self.cb_before > 0.0
    }

    pub fn is_compliant_after(&self) -> bool {
        self.cb_after >= 0.0
    }
}

// ============================================================================
// ALLOCATION
// ============================================================================

/// Redistribute surplus to deficits, returning members in input order
pub fn allocate(candidates: &[PoolCandidate]) -> Vec<PoolMember> {
    let mut cb_after: Vec<f64> = candidates.iter().map(|c| c.cb_before).collect();

    // Stable: equal cb_before keeps input order
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| candidates[b].cb_before.total_cmp(&candidates[a].cb_before));

    for (pos, &giver) in order.iter().enumerate() {
        if cb_after[giver] <= 0.0 {
            continue;
        }

        for &receiver in &order[pos + 1..] {
            if cb_after[receiver] >= 0.0 {
                continue;
            }

            let available = cb_after[giver];
            let needed = cb_after[receiver].abs();
            let transfer = available.min(needed);

            if transfer > 0.0 {
                cb_after[giver] -= transfer;
                cb_after[receiver] += transfer;
            }
        }
    }

    candidates
        .iter()
        .zip(cb_after)
        .map(|(c, after)| PoolMember {
            ship_id: c.ship_id.clone(),
            cb_before: c.cb_before,
            cb_after: after,
        })
        .collect()
}

// ============================================================================
// VALIDATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl PoolValidation {
    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ComplianceError::ValidationFailed(self.errors))
        }
    }
}

/// Message used when the members' combined CB is below zero
pub fn negative_sum_message(total: f64) -> String {
    format!("Pool sum is negative ({:.2}). Sum must be >= 0.", total)
}

// ============================================================================
// POOL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: i64,
    pub year: i32,
    pub members: Vec<PoolMember>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Pool {
    pub fn new(id: i64, year: i32, members: Vec<PoolMember>) -> Self {
        Pool {
            id,
            year,
            members,
            created_at: None,
        }
    }

    /// Check the three pooling rules, reporting every violation:
    /// 1. Σ cb_before >= 0
    /// 2. a deficit ship does not exit worse than it entered
    /// 3. a surplus ship does not exit negative
    pub fn validate(&self) -> PoolValidation {
        let mut errors = Vec::new();

        let total = self.total_sum();
        if total < 0.0 {
            errors.push(negative_sum_message(total));
        }

        for member in self.members.iter().filter(|m| m.was_deficit()) {
            if member.has_worsened() {
                errors.push(format!(
                    "Ship {} (deficit) cannot exit worse. Before: {:.2}, After: {:.2}",
                    member.ship_id, member.cb_before, member.cb_after
                ));
            }
        }

        for member in self.members.iter().filter(|m| m.was_surplus()) {
            if member.cb_after < 0.0 {
                errors.push(format!(
                    "Ship {} (surplus) cannot exit negative. After: {:.2}",
                    member.ship_id, member.cb_after
                ));
            }
        }

        PoolValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Σ cb_before
    pub fn total_sum(&self) -> f64 {
        self.members.iter().map(|m| m.cb_before).sum()
    }

    /// Σ cb_after (equals `total_sum` after allocation)
    pub fn total_sum_after(&self) -> f64 {
        self.members.iter().map(|m| m.cb_after).sum()
    }

    pub fn is_compliant(&self) -> bool {
        self.total_sum() >= 0.0
    }

    pub fn deficit_count(&self) -> usize {
        self.members.iter().filter(|m| m.was_deficit()).count()
    }

    pub fn surplus_count(&self) -> usize {
        self.members.iter().filter(|m| m.was_surplus()).count()
    }

    pub fn member(&self, ship_id: &str) -> Option<&PoolMember> {
        self.members.iter().find(|m| m.ship_id == ship_id)
    }
}

// ============================================================================
// TESTS
// ============================================================================
