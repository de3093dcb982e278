//! Long-term buy-and-hold rental

use super::{default_appreciation_rate, default_holding_years, default_tax_bracket};
use crate::assumptions::Assumptions;
use crate::error::{EngineError, EngineResult};
use crate::finance::carrying::CarryingCostBreakdown;
use crate::finance::cashflow;
use crate::finance::roi::{ProjectionSettings, RoiProjector};
use crate::money::{Currency, Percent};
use crate::property::validate::require_non_negative;
use crate::property::{AcquisitionInput, FinancingTerms, OperatingExpenseAssumptions, RentalIncomeAssumptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalAssumptions {
    pub monthly_rent: Currency,

    #[serde(default)]
    pub other_monthly_income: Currency,

    #[serde(default = "default_holding_years")]
    pub holding_period_years: u32,

    /// Annual appreciation in percent
    #[serde(default = "default_appreciation_rate")]
    pub appreciation_rate: Percent,

    #[serde(default = "default_tax_bracket")]
    pub tax_bracket: Percent,
}

impl RentalAssumptions {
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("assumptions.rental.monthlyRent", self.monthly_rent)?;
        require_non_negative("assumptions.rental.otherMonthlyIncome", self.other_monthly_income)?;
        if self.holding_period_years < 1 {
            return Err(EngineError::validation(
                "assumptions.rental.holdingPeriodYears",
                "must be at least 1",
            ));
        }
        self.projection_settings().validate()
    }

    pub fn projection_settings(&self) -> ProjectionSettings {
        ProjectionSettings {
            appreciation_rate_percent: self.appreciation_rate,
            tax_bracket_percent: self.tax_bracket,
            projection_years: self.holding_period_years,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResult {
    pub total_investment: Currency,
    pub monthly_cash_flow: Currency,
    pub year1_cash_flow: Currency,
    pub total_cash_flow: Currency,
    pub equity_buildup: Currency,
    pub appreciation: Currency,
    pub total_tax_benefits: Currency,
    pub total_gain: Currency,
    pub roi: Percent,
    pub annualized_return: Percent,
    pub holding_period_years: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr: Option<Percent>,
}

/// Evaluate a buy-and-hold rental over its holding period
pub fn evaluate(
    engine_assumptions: &Assumptions,
    acquisition: &AcquisitionInput,
    financing: &FinancingTerms,
    expenses: &OperatingExpenseAssumptions,
    carrying_costs: &CarryingCostBreakdown,
    assumptions: &RentalAssumptions,
) -> EngineResult<RentalResult> {
    let costs = carrying_costs
        .clone()
        .with_property_management(assumptions.monthly_rent, expenses.property_management_percent);
    let income = RentalIncomeAssumptions {
        monthly_rent: assumptions.monthly_rent,
        other_monthly_income: assumptions.other_monthly_income,
    };
    let statement = cashflow::project(&income, expenses, &costs);

    let total_investment = financing.total_cash_invested();
    let projection = RoiProjector::new(engine_assumptions).project(
        acquisition,
        financing,
        total_investment,
        statement.annual.net_cash_flow,
        &assumptions.projection_settings(),
    )?;
    let totals = projection.projected;

    Ok(RentalResult {
        total_investment,
        monthly_cash_flow: statement.monthly.net_cash_flow,
        year1_cash_flow: statement.annual.net_cash_flow,
        total_cash_flow: totals.total_cash_flow,
        equity_buildup: totals.total_principal_paydown,
        appreciation: totals.total_appreciation,
        total_tax_benefits: totals.total_tax_benefits,
        total_gain: totals.total_return,
        roi: totals.roi,
        annualized_return: totals.annualized_roi,
        holding_period_years: totals.years,
        irr: totals.irr,
    })
}
