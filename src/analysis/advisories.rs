//! Threshold rules that attach warnings and suggestions to an analysis
//!
//! Every rule is evaluated independently; a deal can trigger several.

use crate::assumptions::AdvisoryThresholds;
use crate::finance::BreakEvenRent;
use crate::money::{quantize_currency, Currency, Percent};
use crate::property::FinancingTerms;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Down payment that would bring cash flow to break-even (increase_down_payment only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_down_payment: Option<Currency>,
}

/// Figures the rules look at
#[derive(Debug, Clone)]
pub struct AdvisoryInputs<'a> {
    pub monthly_rent: Currency,
    pub monthly_net_cash_flow: Currency,
    pub monthly_carrying_total: Currency,
    pub monthly_payment: Currency,
    pub break_even: &'a BreakEvenRent,
    pub dscr: Decimal,
    pub coc_percent: Percent,
    pub financing: &'a FinancingTerms,
}

pub fn warnings(inputs: &AdvisoryInputs<'_>, thresholds: &AdvisoryThresholds) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if inputs.monthly_net_cash_flow < Decimal::ZERO {
        warnings.push(Warning {
            kind: "negative_cash_flow".to_string(),
            severity: Severity::High,
            message: format!(
                "Property shows negative cash flow. Monthly rent of ${} does not cover monthly carrying costs of ${}.",
                inputs.monthly_rent, inputs.monthly_carrying_total
            ),
        });
    }

    if inputs.break_even.monthly > inputs.monthly_rent {
        // No percentage against a zero rent
        let margin = inputs
            .break_even
            .percent_over(inputs.monthly_rent)
            .map(|percent| format!(" by {}%", percent))
            .unwrap_or_default();
        warnings.push(Warning {
            kind: "break_even_mismatch".to_string(),
            severity: Severity::High,
            message: format!(
                "Break-even rent (${}) exceeds market rent (${}){}. Property may not be viable as rental.",
                inputs.break_even.monthly, inputs.monthly_rent, margin
            ),
        });
    }

    if inputs.financing.is_financed() && inputs.dscr < thresholds.min_dscr {
        warnings.push(Warning {
            kind: "low_dcr".to_string(),
            severity: Severity::Medium,
            message: format!(
                "Debt Coverage Ratio of {} is below lender minimum ({}). Refinancing may be difficult.",
                inputs.dscr, thresholds.min_dscr
            ),
        });
    }

    warnings
}

pub fn suggestions(inputs: &AdvisoryInputs<'_>, thresholds: &AdvisoryThresholds) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let financing = inputs.financing;
    let negative = inputs.monthly_net_cash_flow < Decimal::ZERO;
    let positive = inputs.monthly_net_cash_flow > Decimal::ZERO;

    if negative && financing.is_financed() && inputs.monthly_payment > Decimal::ZERO {
        // Payment scales linearly with principal at a fixed rate and term
        let payment_per_dollar = inputs.monthly_payment / financing.loan_amount;
        let shortfall = -inputs.monthly_net_cash_flow;
        let loan_reduction = quantize_currency(
            (shortfall / payment_per_dollar * thresholds.down_payment_cushion).min(financing.loan_amount),
        );
        let suggested = financing.down_payment + loan_reduction;

        suggestions.push(Suggestion {
            kind: "increase_down_payment".to_string(),
            message: format!(
                "Increase the down payment to about ${} (a ${} smaller loan) to reach positive monthly cash flow.",
                suggested, loan_reduction
            ),
            suggested_down_payment: Some(suggested),
        });
    }

    if inputs.coc_percent < thresholds.poor_coc_percent {
        suggestions.push(Suggestion {
            kind: "consider_flip".to_string(),
            message: format!(
                "Rental economics are weak ({}% cash-on-cash). Compare a fix-and-flip strategy for this property.",
                inputs.coc_percent
            ),
            suggested_down_payment: None,
        });
    }

    if financing.is_financed() && positive && inputs.dscr < thresholds.min_dscr {
        suggestions.push(Suggestion {
            kind: "refinance".to_string(),
            message: format!(
                "Cash flow is positive but the debt coverage ratio of {} is below {}. Look for a lower rate or longer term.",
                inputs.dscr, thresholds.min_dscr
            ),
            suggested_down_payment: None,
        });
    }

    if positive && inputs.coc_percent > thresholds.strong_coc_percent {
        suggestions.push(Suggestion {
            kind: "strong_investment".to_string(),
            message: format!(
                "Strong investment: positive cash flow with a {}% cash-on-cash return.",
                inputs.coc_percent
            ),
            suggested_down_payment: None,
        });
    }

    suggestions
}
