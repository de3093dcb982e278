//! Operating cost heuristics: property tax, insurance premium, maintenance reserve

use crate::assumptions::Assumptions;
use crate::money::{percent_to_rate, quantize_currency, Currency, Percent};
use crate::property::PropertyType;
use rust_decimal::Decimal;

/// Estimates annual costs from property characteristics
pub struct CostEstimator<'a> {
    assumptions: &'a Assumptions,
}

impl<'a> CostEstimator<'a> {
    pub fn new(assumptions: &'a Assumptions) -> Self {
        Self { assumptions }
    }

    /// value × rate/100
    pub fn property_tax_annual(&self, value: Currency, rate_percent: Percent) -> Currency {
        quantize_currency(value * percent_to_rate(rate_percent))
    }

    /// Base premium scaled by value, property type and building age
    pub fn insurance_annual(
        &self,
        value: Currency,
        property_type: PropertyType,
        year_built: i32,
    ) -> Currency {
        let insurance = &self.assumptions.insurance;
        if insurance.reference_value.is_zero() {
            return Decimal::ZERO;
        }

        let type_multiplier = match property_type {
            PropertyType::SingleFamily => insurance.single_family_multiplier,
            PropertyType::Condo => insurance.condo_multiplier,
            PropertyType::MultiFamily => insurance.multi_family_multiplier,
            PropertyType::Commercial => insurance.commercial_multiplier,
        };
        let age = self.assumptions.building_age(year_built);
        let age_multiplier = insurance.age_factors.factor_for(age);

        quantize_currency(
            insurance.base_annual_premium * (value / insurance.reference_value)
                * type_multiplier
                * age_multiplier,
        )
    }

    /// value × percent/100, scaled up for older buildings
    pub fn maintenance_reserve_annual(
        &self,
        value: Currency,
        year_built: i32,
        annual_percent: Percent,
    ) -> Currency {
        let age = self.assumptions.building_age(year_built);
        let factor = self.assumptions.maintenance.age_factors.factor_for(age);
        quantize_currency(value * percent_to_rate(annual_percent) * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_property_tax() {
        let assumptions = Assumptions::standard();
        let estimator = CostEstimator::new(&assumptions);
        assert_eq!(estimator.property_tax_annual(dec!(350000), dec!(2.1)), dec!(7350.00));
        assert_eq!(estimator.property_tax_annual(dec!(350000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_insurance_reference_property() {
        let assumptions = Assumptions::standard();
        let estimator = CostEstimator::new(&assumptions);
        // New single-family home at the reference value pays the base premium
        let premium = estimator.insurance_annual(dec!(250000), PropertyType::SingleFamily, 2020);
        assert_eq!(premium, dec!(1200.00));
    }

    #[test]
    fn test_insurance_scales_with_type_and_age() {
        let assumptions = Assumptions::standard();
        let estimator = CostEstimator::new(&assumptions);

        let condo = estimator.insurance_annual(dec!(350000), PropertyType::Condo, 2020);
        let house = estimator.insurance_annual(dec!(350000), PropertyType::SingleFamily, 2020);
        let commercial = estimator.insurance_annual(dec!(350000), PropertyType::Commercial, 2020);
        assert!(condo < house && house < commercial);

        // 30 years old: 1200 × 1.4 × 1.25
        let older = estimator.insurance_annual(dec!(350000), PropertyType::SingleFamily, 1995);
        assert_eq!(older, dec!(2100.00));
        assert!(older > house);
    }

    #[test]
    fn test_maintenance_age_tiers() {
        let assumptions = Assumptions::standard();
        let estimator = CostEstimator::new(&assumptions);

        assert_eq!(estimator.maintenance_reserve_annual(dec!(350000), 2010, dec!(1.0)), dec!(3500.00));
        assert_eq!(estimator.maintenance_reserve_annual(dec!(350000), 1995, dec!(1.0)), dec!(4200.00));
        assert_eq!(estimator.maintenance_reserve_annual(dec!(350000), 1950, dec!(1.0)), dec!(5250.00));
    }
}
