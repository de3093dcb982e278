//! Property-level cost heuristics: insurance premium and maintenance reserve

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Multiplier that applies from `min_age` years onward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBand {
    pub min_age: u32,
    pub factor: Decimal,
}

/// Age-banded multipliers, kept sorted by `min_age`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBands(Vec<AgeBand>);

impl AgeBands {
    pub fn new(mut bands: Vec<AgeBand>) -> Self {
        bands.sort_by_key(|b| b.min_age);
        Self(bands)
    }

    /// Factor of the oldest band the age has reached (1.0 below the first band)
    pub fn factor_for(&self, age: u32) -> Decimal {
        self.0
            .iter()
            .rev()
            .find(|band| age >= band.min_age)
            .map(|band| band.factor)
            .unwrap_or(Decimal::ONE)
    }

    /// Insert or replace the band starting at `min_age`
    pub fn set(&mut self, min_age: u32, factor: Decimal) {
        match self.0.iter_mut().find(|b| b.min_age == min_age) {
            Some(band) => band.factor = factor,
            None => {
                self.0.push(AgeBand { min_age, factor });
                self.0.sort_by_key(|b| b.min_age);
            }
        }
    }

    pub fn bands(&self) -> &[AgeBand] {
        &self.0
    }
}

/// Homeowner/landlord insurance estimate, used when the caller supplies no premium
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceAssumptions {
    /// Property value the base premium is quoted at
    pub reference_value: Decimal,
    /// Annual premium for a single-family home at the reference value
    pub base_annual_premium: Decimal,
    pub single_family_multiplier: Decimal,
    pub condo_multiplier: Decimal,
    pub multi_family_multiplier: Decimal,
    pub commercial_multiplier: Decimal,
    /// Older buildings cost more to insure
    pub age_factors: AgeBands,
}

impl Default for InsuranceAssumptions {
    fn default() -> Self {
        Self {
            reference_value: dec!(250000),
            base_annual_premium: dec!(1200),
            single_family_multiplier: dec!(1.0),
            condo_multiplier: dec!(0.7),
            multi_family_multiplier: dec!(1.3),
            commercial_multiplier: dec!(1.5),
            age_factors: AgeBands::new(vec![
                AgeBand { min_age: 0, factor: dec!(1.0) },
                AgeBand { min_age: 10, factor: dec!(1.1) },
                AgeBand { min_age: 25, factor: dec!(1.25) },
                AgeBand { min_age: 50, factor: dec!(1.4) },
            ]),
        }
    }
}

/// Maintenance reserve scaling by building age
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceAssumptions {
    pub age_factors: AgeBands,
}

impl Default for MaintenanceAssumptions {
    fn default() -> Self {
        Self {
            age_factors: AgeBands::new(vec![
                AgeBand { min_age: 0, factor: dec!(1.0) },
                AgeBand { min_age: 30, factor: dec!(1.2) },
                AgeBand { min_age: 50, factor: dec!(1.5) },
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_lookup() {
        let bands = MaintenanceAssumptions::default().age_factors;
        assert_eq!(bands.factor_for(0), dec!(1.0));
        assert_eq!(bands.factor_for(29), dec!(1.0));
        assert_eq!(bands.factor_for(30), dec!(1.2));
        assert_eq!(bands.factor_for(120), dec!(1.5));
    }

    #[test]
    fn test_insurance_age_factors_monotonic() {
        let bands = InsuranceAssumptions::default().age_factors;
        let factors: Vec<Decimal> = (0..80).map(|age| bands.factor_for(age)).collect();
        assert!(factors.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_set_keeps_bands_sorted() {
        let mut bands = AgeBands::new(vec![AgeBand { min_age: 20, factor: dec!(1.3) }]);
        bands.set(5, dec!(1.1));
        bands.set(20, dec!(1.4));
        let ages: Vec<u32> = bands.bands().iter().map(|b| b.min_age).collect();
        assert_eq!(ages, vec![5, 20]);
        assert_eq!(bands.factor_for(3), Decimal::ONE);
        assert_eq!(bands.factor_for(25), dec!(1.4));
    }
}
