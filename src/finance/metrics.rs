//! Return metrics: NOI, cap rate, cash-on-cash, DSCR, break-even rent
//!
//! Zero denominators: `ratio` and the metric functions built on it return 0,
//! since request validation already rules out a zero purchase price. The
//! `try_*` variants are for direct numeric use and report `DivisionGuard`
//! instead.

use super::carrying::CarryingCostBreakdown;
use super::cashflow::CashFlowStatement;
use crate::error::{EngineError, EngineResult};
use crate::money::{percent_to_rate, quantize, quantize_currency, quantize_ratio, ratio_to_percent, Currency, Percent, MONTHS_PER_YEAR, ONE_HUNDRED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// numerator / denominator at 4 dp; 0 when the denominator is 0
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    quantize_ratio(numerator / denominator)
}

/// numerator / denominator at 4 dp; `DivisionGuard` when the denominator is 0
pub fn try_ratio(numerator: Decimal, denominator: Decimal, context: &str) -> EngineResult<Decimal> {
    if denominator.is_zero() {
        return Err(EngineError::division_guard(format!("{} must be non-zero", context)));
    }
    Ok(quantize_ratio(numerator / denominator))
}

/// Effective gross income minus operating expenses
pub fn noi(effective_gross_income: Currency, operating_expenses: Currency) -> Currency {
    quantize_currency(effective_gross_income - operating_expenses)
}

/// Annual NOI / purchase price, as a percent
pub fn cap_rate(annual_noi: Currency, purchase_price: Currency) -> Percent {
    ratio_to_percent(ratio(annual_noi, purchase_price))
}

pub fn try_cap_rate(annual_noi: Currency, purchase_price: Currency) -> EngineResult<Percent> {
    try_ratio(annual_noi, purchase_price, "purchase_price").map(ratio_to_percent)
}

/// Annual cash flow / total cash invested, as a percent
pub fn cash_on_cash(annual_cash_flow: Currency, total_cash_invested: Currency) -> Percent {
    ratio_to_percent(ratio(annual_cash_flow, total_cash_invested))
}

pub fn try_cash_on_cash(annual_cash_flow: Currency, total_cash_invested: Currency) -> EngineResult<Percent> {
    try_ratio(annual_cash_flow, total_cash_invested, "total_cash_invested").map(ratio_to_percent)
}

/// Annual NOI / annual debt service, 2 dp (0 for an all-cash purchase)
pub fn dscr(annual_noi: Currency, annual_debt_service: Currency) -> Decimal {
    quantize(ratio(annual_noi, annual_debt_service), 2)
}

pub fn try_dscr(annual_noi: Currency, annual_debt_service: Currency) -> EngineResult<Decimal> {
    try_ratio(annual_noi, annual_debt_service, "annual_debt_service").map(|r| quantize(r, 2))
}

/// Rent needed to cover costs after vacancy and management leakage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakEvenRent {
    pub monthly: Currency,
    pub annual: Currency,
    /// Monthly rent / break-even rent (0 when rent is unknown or break-even is 0)
    pub coverage_ratio: Decimal,
}

impl BreakEvenRent {
    /// Attach the coverage of an actual rent, 2 dp
    pub fn with_coverage(mut self, monthly_rent: Currency) -> Self {
        self.coverage_ratio = if self.monthly > Decimal::ZERO {
            quantize(monthly_rent / self.monthly, 2)
        } else {
            Decimal::ZERO
        };
        self
    }

    /// Percent by which break-even exceeds `monthly_rent`, whole number; None if it does not
    pub fn percent_over(&self, monthly_rent: Currency) -> Option<Percent> {
        if self.monthly <= monthly_rent || monthly_rent <= Decimal::ZERO {
            return None;
        }
        Some(quantize((self.monthly - monthly_rent) / monthly_rent * ONE_HUNDRED, 0))
    }
}

/// Solve rent·(1 − vacancy)·(1 − management) = costs for rent
///
/// A vacancy or management rate of 100% leaves no collectable rent and is
/// reported as `DivisionGuard`.
pub fn break_even_rent(
    monthly_costs_excluding_management: Currency,
    vacancy_rate_percent: Percent,
    management_fee_percent: Percent,
) -> EngineResult<BreakEvenRent> {
    if vacancy_rate_percent >= ONE_HUNDRED || management_fee_percent >= ONE_HUNDRED {
        return Err(EngineError::division_guard(format!(
            "break-even rent undefined at {}% vacancy and {}% management",
            vacancy_rate_percent, management_fee_percent
        )));
    }

    let collected = (Decimal::ONE - percent_to_rate(vacancy_rate_percent))
        * (Decimal::ONE - percent_to_rate(management_fee_percent));
    let rent = monthly_costs_excluding_management / collected;

    Ok(BreakEvenRent {
        monthly: quantize_currency(rent),
        annual: quantize_currency(rent * MONTHS_PER_YEAR),
        coverage_ratio: Decimal::ZERO,
    })
}

/// Cash-on-cash quality bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CocInterpretation {
    Negative,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CocInterpretation {
    pub fn from_percent(coc_percent: Percent) -> Self {
        if coc_percent < Decimal::ZERO {
            CocInterpretation::Negative
        } else if coc_percent < Decimal::from(5) {
            CocInterpretation::Poor
        } else if coc_percent < Decimal::from(8) {
            CocInterpretation::Fair
        } else if coc_percent < Decimal::from(12) {
            CocInterpretation::Good
        } else {
            CocInterpretation::Excellent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CocInterpretation::Negative => "negative",
            CocInterpretation::Poor => "poor",
            CocInterpretation::Fair => "fair",
            CocInterpretation::Good => "good",
            CocInterpretation::Excellent => "excellent",
        }
    }
}

impl fmt::Display for CocInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headline return metrics for a rental
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnMetrics {
    pub cap_rate: Percent,
    pub cash_on_cash_return: Percent,
    pub debt_service_coverage_ratio: Decimal,
    pub break_even_rent: BreakEvenRent,
}

impl ReturnMetrics {
    /// Metrics for a rental whose carrying costs already include management
    pub fn compute(
        statement: &CashFlowStatement,
        carrying_costs: &CarryingCostBreakdown,
        purchase_price: Currency,
        total_cash_invested: Currency,
        monthly_rent: Currency,
        vacancy_rate_percent: Percent,
        management_fee_percent: Percent,
    ) -> EngineResult<Self> {
        let annual = &statement.annual;
        let break_even = break_even_rent(
            carrying_costs.monthly.excluding_management(),
            vacancy_rate_percent,
            management_fee_percent,
        )?
        .with_coverage(monthly_rent);

        Ok(Self {
            cap_rate: cap_rate(annual.noi, purchase_price),
            cash_on_cash_return: cash_on_cash(annual.net_cash_flow, total_cash_invested),
            debt_service_coverage_ratio: dscr(annual.noi, annual.debt_service),
            break_even_rent: break_even,
        })
    }
}
