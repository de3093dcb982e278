//! Fix-and-flip: buy, renovate, carry for a few months, sell

use crate::error::{EngineError, EngineResult};
use crate::finance::carrying::CarryingCostBreakdown;
use crate::finance::metrics::ratio;
use crate::finance::mortgage::principal_paid_over_months;
use crate::finance::roi::annualized_return;
use crate::money::{quantize_currency, ratio_to_percent, Currency, Percent, MONTHS_PER_YEAR};
use crate::property::validate::require_non_negative;
use crate::property::FinancingTerms;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipAssumptions {
    pub renovation_costs: Currency,
    pub holding_period_months: u32,
    pub expected_sale_price: Currency,
    /// Commissions, transfer taxes and seller concessions
    pub selling_costs: Currency,
}

impl FlipAssumptions {
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("assumptions.flip.renovationCosts", self.renovation_costs)?;
        if self.holding_period_months < 1 {
            return Err(EngineError::validation(
                "assumptions.flip.holdingPeriodMonths",
                "must be at least 1",
            ));
        }
        require_non_negative("assumptions.flip.expectedSalePrice", self.expected_sale_price)?;
        require_non_negative("assumptions.flip.sellingCosts", self.selling_costs)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipResult {
    /// Down payment + closing costs + renovation
    pub total_investment: Currency,
    pub holding_costs: Currency,
    pub renovation_costs: Currency,
    pub sale_proceeds: Currency,
    pub selling_costs: Currency,
    /// Loan payoff at sale
    pub remaining_loan: Currency,
    pub net_profit: Currency,
    pub roi: Percent,
    pub annualized_return: Percent,
    pub timeframe_months: u32,
}

/// Evaluate a flip against the shared carrying costs
///
/// Holding costs are mortgage, property tax, insurance and utilities for each
/// month held; an unoccupied flip carries no management fee.
pub fn evaluate(
    financing: &FinancingTerms,
    carrying_costs: &CarryingCostBreakdown,
    assumptions: &FlipAssumptions,
) -> FlipResult {
    let months = assumptions.holding_period_months;
    let monthly = &carrying_costs.monthly;

    let monthly_holding = monthly.mortgage + monthly.property_tax + monthly.insurance + monthly.utilities;
    let holding_costs = quantize_currency(monthly_holding * Decimal::from(months));

    let renovation_costs = quantize_currency(assumptions.renovation_costs);
    let total_investment = financing.down_payment + financing.closing_costs + renovation_costs;

    let remaining_loan = financing.loan_amount
        - principal_paid_over_months(
            financing.loan_amount,
            financing.interest_rate,
            financing.loan_term_years,
            months,
        );

    let sale_proceeds = quantize_currency(assumptions.expected_sale_price);
    let selling_costs = quantize_currency(assumptions.selling_costs);
    let net_profit = quantize_currency(
        sale_proceeds - selling_costs - remaining_loan - holding_costs - total_investment,
    );

    let roi = ratio_to_percent(ratio(net_profit, total_investment));
    let years = Decimal::from(months) / MONTHS_PER_YEAR;

    FlipResult {
        total_investment: quantize_currency(total_investment),
        holding_costs,
        renovation_costs,
        sale_proceeds,
        selling_costs,
        remaining_loan: quantize_currency(remaining_loan),
        net_profit,
        roi,
        annualized_return: annualized_return(roi, years),
        timeframe_months: months,
    }
}
