//! Rental cash flow: gross income through net cash flow

use super::carrying::CarryingCostBreakdown;
use crate::money::{percent_to_rate, quantize_currency, Currency, MONTHS_PER_YEAR};
use crate::property::{OperatingExpenseAssumptions, RentalIncomeAssumptions};
use serde::{Deserialize, Serialize};

/// Cash flow lines for one period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowPeriod {
    pub gross_rental_income: Currency,
    pub vacancy_loss: Currency,
    pub effective_gross_income: Currency,
    pub operating_expenses: Currency,
    pub noi: Currency,
    pub debt_service: Currency,
    pub property_management: Currency,
    pub net_cash_flow: Currency,
}

impl CashFlowPeriod {
    fn scaled(&self, factor: Currency) -> Self {
        Self {
            gross_rental_income: self.gross_rental_income * factor,
            vacancy_loss: self.vacancy_loss * factor,
            effective_gross_income: self.effective_gross_income * factor,
            operating_expenses: self.operating_expenses * factor,
            noi: self.noi * factor,
            debt_service: self.debt_service * factor,
            property_management: self.property_management * factor,
            net_cash_flow: self.net_cash_flow * factor,
        }
    }
}

/// Monthly cash flow and its annual equivalent (monthly × 12, no seasonality)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    pub monthly: CashFlowPeriod,
    pub annual: CashFlowPeriod,
}

/// Project monthly and annual cash flow from rent, expenses and carrying costs
///
/// Mortgage is debt service and management is deducted after NOI; neither
/// is an operating expense.
pub fn project(
    income: &RentalIncomeAssumptions,
    expenses: &OperatingExpenseAssumptions,
    carrying_costs: &CarryingCostBreakdown,
) -> CashFlowStatement {
    let costs = &carrying_costs.monthly;

    let gross_rental_income = quantize_currency(income.gross_monthly());
    let vacancy_loss = quantize_currency(gross_rental_income * percent_to_rate(expenses.vacancy_rate_percent));
    let effective_gross_income = gross_rental_income - vacancy_loss;
    let operating_expenses = costs.operating_expenses();
    let noi = effective_gross_income - operating_expenses;
    let debt_service = costs.mortgage;
    let property_management = costs.property_management;
    let net_cash_flow = noi - debt_service - property_management;

    let monthly = CashFlowPeriod {
        gross_rental_income,
        vacancy_loss,
        effective_gross_income,
        operating_expenses,
        noi,
        debt_service,
        property_management,
        net_cash_flow,
    };
    let annual = monthly.scaled(MONTHS_PER_YEAR);

    CashFlowStatement { monthly, annual }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::carrying::{CarryingCostPeriod, InsuranceSource};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn carrying_costs() -> CarryingCostBreakdown {
        let monthly = CarryingCostPeriod {
            mortgage: dec!(1957.80),
            property_tax: dec!(612.50),
            insurance: dec!(150.00),
            hoa: Decimal::ZERO,
            utilities: dec!(200.00),
            maintenance: dec!(350.00),
            property_management: dec!(250.00),
            total: dec!(3520.30),
        };
        let annual = CarryingCostPeriod {
            mortgage: dec!(23493.60),
            property_tax: dec!(7350.00),
            insurance: dec!(1800.00),
            hoa: Decimal::ZERO,
            utilities: dec!(2400.00),
            maintenance: dec!(4200.00),
            property_management: dec!(3000.00),
            total: dec!(42243.60),
        };
        CarryingCostBreakdown {
            monthly,
            annual,
            insurance_source: InsuranceSource::UserProvided,
        }
    }

    fn expenses() -> OperatingExpenseAssumptions {
        OperatingExpenseAssumptions {
            property_tax_rate: dec!(2.1),
            insurance_annual: Some(dec!(1800)),
            hoa_monthly: Decimal::ZERO,
            utilities_monthly: dec!(200),
            maintenance_annual_percent: dec!(1.0),
            property_management_percent: dec!(10),
            vacancy_rate_percent: dec!(8),
        }
    }

    #[test]
    fn test_project_monthly() {
        let income = RentalIncomeAssumptions {
            monthly_rent: dec!(2500),
            other_monthly_income: Decimal::ZERO,
        };
        let statement = project(&income, &expenses(), &carrying_costs());

        let monthly = &statement.monthly;
        assert_eq!(monthly.gross_rental_income, dec!(2500.00));
        assert_eq!(monthly.vacancy_loss, dec!(200.00));
        assert_eq!(monthly.effective_gross_income, dec!(2300.00));
        assert_eq!(monthly.operating_expenses, dec!(1312.50));
        assert_eq!(monthly.noi, dec!(987.50));
        assert_eq!(monthly.debt_service, dec!(1957.80));
        assert_eq!(monthly.net_cash_flow, dec!(-1220.30));
    }

    #[test]
    fn test_annual_is_twelve_months() {
        let income = RentalIncomeAssumptions {
            monthly_rent: dec!(2500),
            other_monthly_income: dec!(75),
        };
        let statement = project(&income, &expenses(), &carrying_costs());

        assert_eq!(statement.monthly.gross_rental_income, dec!(2575.00));
        assert_eq!(statement.annual.noi, statement.monthly.noi * dec!(12));
        assert_eq!(statement.annual.net_cash_flow, statement.monthly.net_cash_flow * dec!(12));
        assert_eq!(
            statement.annual.noi - statement.annual.debt_service - statement.annual.property_management,
            statement.annual.net_cash_flow
        );
    }
}
