//! Input validation, run before any computation
//!
//! Each check returns the first offending field as `EngineError::Validation`,
//! using the request's camelCase path as the field name.

use super::data::{AcquisitionInput, FinancingTerms, OperatingExpenseAssumptions, RentalIncomeAssumptions};
use crate::error::{EngineError, EngineResult};
use crate::money::ONE_HUNDRED;
use rust_decimal::Decimal;

pub const MIN_YEAR_BUILT: i32 = 1800;
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

pub(crate) fn require_positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(EngineError::validation(field, "must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::validation(field, "must not be negative"));
    }
    Ok(())
}

pub(crate) fn require_percent(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > ONE_HUNDRED {
        return Err(EngineError::validation(field, "must be between 0 and 100"));
    }
    Ok(())
}

impl AcquisitionInput {
    pub fn validate(&self) -> EngineResult<()> {
        require_positive("propertyDetails.purchasePrice", self.purchase_price)?;
        if self.year_built < MIN_YEAR_BUILT {
            return Err(EngineError::validation(
                "propertyDetails.yearBuilt",
                format!("must be {} or later", MIN_YEAR_BUILT),
            ));
        }
        Ok(())
    }
}

impl FinancingTerms {
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("financing.downPayment", self.down_payment)?;
        require_non_negative("financing.loanAmount", self.loan_amount)?;
        require_non_negative("financing.interestRate", self.interest_rate)?;
        if self.loan_term_years < 1 || self.loan_term_years > MAX_LOAN_TERM_YEARS {
            return Err(EngineError::validation(
                "financing.loanTermYears",
                format!("must be between 1 and {}", MAX_LOAN_TERM_YEARS),
            ));
        }
        require_non_negative("financing.closingCosts", self.closing_costs)?;
        require_non_negative("financing.loanPoints", self.loan_points)?;
        Ok(())
    }
}

impl OperatingExpenseAssumptions {
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("operatingExpenses.propertyTaxRate", self.property_tax_rate)?;
        if let Some(insurance) = self.insurance_annual {
            require_non_negative("operatingExpenses.insuranceAnnual", insurance)?;
        }
        require_non_negative("operatingExpenses.hoaMonthly", self.hoa_monthly)?;
        require_non_negative("operatingExpenses.utilitiesMonthly", self.utilities_monthly)?;
        require_non_negative(
            "operatingExpenses.maintenanceAnnualPercent",
            self.maintenance_annual_percent,
        )?;
        require_percent(
            "operatingExpenses.propertyManagementPercent",
            self.property_management_percent,
        )?;
        require_percent("operatingExpenses.vacancyRatePercent", self.vacancy_rate_percent)?;
        Ok(())
    }
}

impl RentalIncomeAssumptions {
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("rentalIncome.monthlyRent", self.monthly_rent)?;
        require_non_negative("rentalIncome.otherMonthlyIncome", self.other_monthly_income)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;
    use rust_decimal_macros::dec;

    fn financing() -> FinancingTerms {
        FinancingTerms {
            down_payment: dec!(60000),
            loan_amount: dec!(240000),
            interest_rate: dec!(6.5),
            loan_term_years: 30,
            closing_costs: dec!(0),
            loan_points: dec!(0),
        }
    }

    #[test]
    fn test_zero_price_rejected() {
        let acquisition = AcquisitionInput {
            purchase_price: Decimal::ZERO,
            property_type: PropertyType::Condo,
            year_built: 2000,
            square_feet: None,
            location: None,
        };
        let err = acquisition.validate().unwrap_err();
        assert_eq!(err.field(), Some("propertyDetails.purchasePrice"));
    }

    #[test]
    fn test_loan_term_bounds() {
        let mut terms = financing();
        assert!(terms.validate().is_ok());

        terms.loan_term_years = 0;
        assert_eq!(terms.validate().unwrap_err().field(), Some("financing.loanTermYears"));

        terms.loan_term_years = 51;
        assert!(terms.validate().is_err());

        terms.loan_term_years = 50;
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut terms = financing();
        terms.interest_rate = dec!(-0.5);
        assert_eq!(terms.validate().unwrap_err().field(), Some("financing.interestRate"));
    }

    #[test]
    fn test_vacancy_above_hundred_rejected() {
        let expenses = OperatingExpenseAssumptions {
            property_tax_rate: dec!(2.1),
            insurance_annual: None,
            hoa_monthly: dec!(0),
            utilities_monthly: dec!(200),
            maintenance_annual_percent: dec!(1),
            property_management_percent: dec!(10),
            vacancy_rate_percent: dec!(100.5),
        };
        assert_eq!(
            expenses.validate().unwrap_err().field(),
            Some("operatingExpenses.vacancyRatePercent")
        );
    }
}
