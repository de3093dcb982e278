//! Engine assumptions: cost-estimation heuristics, tax treatment, short-term
//! rental model and advisory thresholds

mod property;
mod investment;
pub mod loader;

pub use property::{AgeBand, AgeBands, InsuranceAssumptions, MaintenanceAssumptions};
pub use investment::{AdvisoryThresholds, DepreciationAssumptions, ShortTermRentalModel};
pub use loader::DEFAULT_ASSUMPTIONS_PATH;

use crate::error::{EngineError, EngineResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Year used to derive building age when the caller does not supply one
pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;

/// Container for all engine assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Calendar year building ages are measured against
    pub reference_year: i32,
    pub insurance: InsuranceAssumptions,
    pub maintenance: MaintenanceAssumptions,
    pub depreciation: DepreciationAssumptions,
    pub short_term_rental: ShortTermRentalModel,
    pub thresholds: AdvisoryThresholds,
}

impl Assumptions {
    /// Standard underwriting assumptions
    pub fn standard() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            insurance: InsuranceAssumptions::default(),
            maintenance: MaintenanceAssumptions::default(),
            depreciation: DepreciationAssumptions::default(),
            short_term_rental: ShortTermRentalModel::default(),
            thresholds: AdvisoryThresholds::default(),
        }
    }

    /// Same assumptions anchored at a different calendar year
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// Load overrides from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Standard assumptions with overrides from `engine_assumptions.csv` in `path`
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let overrides = loader::load_overrides(path)?;
        let mut assumptions = Self::standard();
        for (key, value) in &overrides {
            assumptions.apply_override(key, *value)?;
        }
        Ok(assumptions)
    }

    /// Apply a single `key = value` override
    pub fn apply_override(&mut self, key: &str, value: Decimal) -> EngineResult<()> {
        let unknown = || EngineError::validation(key, "unknown assumption key");

        if let Some(min_age) = key.strip_prefix("insurance.age_band.") {
            self.insurance.age_factors.set(parse_age(key, min_age)?, value);
            return Ok(());
        }
        if let Some(min_age) = key.strip_prefix("maintenance.age_band.") {
            self.maintenance.age_factors.set(parse_age(key, min_age)?, value);
            return Ok(());
        }

        match key {
            "reference_year" => {
                self.reference_year = value
                    .to_i32()
                    .ok_or_else(|| EngineError::validation(key, "must be a calendar year"))?;
            }
            "insurance.reference_value" => self.insurance.reference_value = value,
            "insurance.base_annual_premium" => self.insurance.base_annual_premium = value,
            "insurance.multiplier.single_family" => self.insurance.single_family_multiplier = value,
            "insurance.multiplier.condo" => self.insurance.condo_multiplier = value,
            "insurance.multiplier.multi_family" => self.insurance.multi_family_multiplier = value,
            "insurance.multiplier.commercial" => self.insurance.commercial_multiplier = value,
            "depreciation.building_ratio" => self.depreciation.building_ratio = value,
            "depreciation.recovery_years" => self.depreciation.recovery_years = value,
            "short_term_rental.average_stay_nights" => {
                self.short_term_rental.average_stay_nights = value
            }
            "short_term_rental.maintenance_multiplier" => {
                self.short_term_rental.maintenance_multiplier = value
            }
            "short_term_rental.seasonal_swing_percent" => {
                self.short_term_rental.seasonal_swing_percent = value
            }
            "thresholds.min_dscr" => self.thresholds.min_dscr = value,
            "thresholds.strong_coc_percent" => self.thresholds.strong_coc_percent = value,
            "thresholds.poor_coc_percent" => self.thresholds.poor_coc_percent = value,
            "thresholds.down_payment_cushion" => self.thresholds.down_payment_cushion = value,
            _ => return Err(unknown()),
        }
        Ok(())
    }

    /// Age of a building in whole years; future build years count as new
    pub fn building_age(&self, year_built: i32) -> u32 {
        (self.reference_year - year_built).max(0) as u32
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::standard()
    }
}

fn parse_age(key: &str, raw: &str) -> EngineResult<u32> {
    raw.parse::<u32>()
        .map_err(|_| EngineError::validation(key, "age band suffix must be a whole number of years"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_building_age() {
        let assumptions = Assumptions::standard();
        assert_eq!(assumptions.building_age(2000), 25);
        assert_eq!(assumptions.building_age(2030), 0);
        assert_eq!(assumptions.with_reference_year(2030).building_age(2000), 30);
    }

    #[test]
    fn test_apply_override() {
        let mut assumptions = Assumptions::standard();
        assumptions.apply_override("insurance.multiplier.condo", dec!(0.6)).unwrap();
        assumptions.apply_override("reference_year", dec!(2031)).unwrap();
        assumptions.apply_override("maintenance.age_band.75", dec!(2.0)).unwrap();

        assert_eq!(assumptions.insurance.condo_multiplier, dec!(0.6));
        assert_eq!(assumptions.reference_year, 2031);
        assert_eq!(assumptions.maintenance.age_factors.factor_for(80), dec!(2.0));
    }

    #[test]
    fn test_unknown_override_rejected() {
        let mut assumptions = Assumptions::standard();
        let err = assumptions.apply_override("insurance.flood_zone", dec!(1)).unwrap_err();
        assert_eq!(err.field(), Some("insurance.flood_zone"));
    }

    #[test]
    fn test_load_default_assumptions() {
        let result = Assumptions::from_csv();
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());
        assert_eq!(result.unwrap(), Assumptions::standard());
    }
}
