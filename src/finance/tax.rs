//! Tax benefit of ownership: mortgage interest deduction plus straight-line
//! depreciation of the building share of value

use super::mortgage::interest_paid_in_year;
use crate::assumptions::DepreciationAssumptions;
use crate::money::{percent_to_rate, quantize_currency, Currency, Percent};
use crate::property::FinancingTerms;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deductions and resulting tax saving for one year of ownership
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxDeductions {
    pub mortgage_interest: Currency,
    pub depreciation: Currency,
    pub total_deductions: Currency,
    pub tax_savings: Currency,
}

pub struct TaxBenefitEstimator<'a> {
    depreciation: &'a DepreciationAssumptions,
}

impl<'a> TaxBenefitEstimator<'a> {
    pub fn new(depreciation: &'a DepreciationAssumptions) -> Self {
        Self { depreciation }
    }

    /// Depreciation for ownership year `year` (1-indexed)
    ///
    /// Full deduction each year until the recovery period runs out; a final
    /// partial year gets the matching fraction.
    pub fn depreciation_for_year(&self, property_value: Currency, year: u32) -> Currency {
        let recovery = self.depreciation.recovery_years;
        if year == 0 || recovery <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let remaining = (recovery - Decimal::from(year - 1)).max(Decimal::ZERO).min(Decimal::ONE);
        let full_year = property_value * self.depreciation.building_ratio / recovery;
        quantize_currency(full_year * remaining)
    }

    pub fn deductions_for_year(
        &self,
        financing: &FinancingTerms,
        property_value: Currency,
        tax_bracket_percent: Percent,
        year: u32,
    ) -> TaxDeductions {
        if year == 0 {
            return TaxDeductions::default();
        }

        let mortgage_interest = if financing.is_financed() {
            interest_paid_in_year(
                financing.loan_amount,
                financing.interest_rate,
                financing.loan_term_years,
                year,
            )
        } else {
            Decimal::ZERO
        };
        let depreciation = self.depreciation_for_year(property_value, year);
        let total_deductions = mortgage_interest + depreciation;

        TaxDeductions {
            mortgage_interest,
            depreciation,
            total_deductions,
            tax_savings: quantize_currency(total_deductions * percent_to_rate(tax_bracket_percent)),
        }
    }

    /// Tax saved in ownership year `year` at the given marginal bracket
    pub fn benefit_for_year(
        &self,
        financing: &FinancingTerms,
        property_value: Currency,
        tax_bracket_percent: Percent,
        year: u32,
    ) -> Currency {
        self.deductions_for_year(financing, property_value, tax_bracket_percent, year)
            .tax_savings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn financed() -> FinancingTerms {
        FinancingTerms {
            down_payment: dec!(70000),
            loan_amount: dec!(280000),
            interest_rate: dec!(7.5),
            loan_term_years: 30,
            closing_costs: dec!(8500),
            loan_points: dec!(2800),
        }
    }

    #[test]
    fn test_all_cash_depreciation_only() {
        let depreciation = DepreciationAssumptions::default();
        let estimator = TaxBenefitEstimator::new(&depreciation);
        let benefit = estimator.benefit_for_year(&FinancingTerms::all_cash(dec!(350000)), dec!(350000), dec!(24), 1);
        assert_eq!(benefit, dec!(2443.64));
    }

    #[test]
    fn test_financed_year1() {
        let depreciation = DepreciationAssumptions::default();
        let estimator = TaxBenefitEstimator::new(&depreciation);
        let deductions = estimator.deductions_for_year(&financed(), dec!(350000), dec!(24), 1);

        assert_eq!(deductions.mortgage_interest, dec!(20912.47));
        assert_eq!(deductions.depreciation, dec!(10181.82));
        assert_eq!(deductions.total_deductions, dec!(31094.29));
        assert_eq!(deductions.tax_savings, dec!(7462.63));
    }

    #[test]
    fn test_benefit_declines_with_interest() {
        let depreciation = DepreciationAssumptions::default();
        let estimator = TaxBenefitEstimator::new(&depreciation);
        let year1 = estimator.benefit_for_year(&financed(), dec!(350000), dec!(24), 1);
        let year5 = estimator.benefit_for_year(&financed(), dec!(350000), dec!(24), 5);
        assert!(year5 < year1);
    }

    #[test]
    fn test_depreciation_ends_after_recovery_period() {
        let depreciation = DepreciationAssumptions::default();
        let estimator = TaxBenefitEstimator::new(&depreciation);

        assert_eq!(estimator.depreciation_for_year(dec!(350000), 27), dec!(10181.82));
        assert_eq!(estimator.depreciation_for_year(dec!(350000), 28), dec!(5090.91));
        assert_eq!(estimator.depreciation_for_year(dec!(350000), 29), Decimal::ZERO);
        assert_eq!(estimator.depreciation_for_year(dec!(350000), 0), Decimal::ZERO);
    }
}
