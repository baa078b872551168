// ⚙️ Compliance configuration
// Regulatory constants as data: defaults are the 2025 target values,
// a JSON file can override them without recompiling.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 2025 GHG intensity target (gCO₂e/MJ)
pub const TARGET_INTENSITY: f64 = 89.3368;

/// Energy content per tonne of fuel (MJ/t)
pub const ENERGY_PER_TONNE: f64 = 41_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Target GHG intensity in gCO₂e/MJ
    #[serde(default = "default_target_intensity")]
    pub target_intensity: f64,

    /// MJ per tonne of fuel consumed
    #[serde(default = "default_energy_per_tonne")]
    pub energy_per_tonne: f64,
}

fn default_target_intensity() -> f64 {
    TARGET_INTENSITY
}

fn default_energy_per_tonne() -> f64 {
    ENERGY_PER_TONNE
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        ComplianceConfig {
            target_intensity: TARGET_INTENSITY,
            energy_per_tonne: ENERGY_PER_TONNE,
        }
    }
}

impl ComplianceConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: ComplianceConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.target_intensity.is_finite() || self.target_intensity <= 0.0 {
            bail!(
                "target_intensity must be a positive number (got {})",
                self.target_intensity
            );
        }
        if !self.energy_per_tonne.is_finite() || self.energy_per_tonne <= 0.0 {
            bail!(
                "energy_per_tonne must be a positive number (got {})",
                self.energy_per_tonne
            );
        }
        Ok(())
    }
}
