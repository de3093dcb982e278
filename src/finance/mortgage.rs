//! Mortgage amortization: level payment, principal paydown and schedules
//!
//! Paydown over partial terms is simulated month by month with the cent-rounded
//! payment, because the rounded path differs from the closed form.

use crate::money::{percent_to_rate, quantize_currency, Currency, Percent, MONTHS_PER_YEAR};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

/// Monthly periodic rate from an annual percentage: 7.5 -> 0.00625
pub fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    percent_to_rate(annual_rate_percent) / MONTHS_PER_YEAR
}

/// Number of scheduled payments; a zero term is treated as a single payment
fn total_months(term_years: u32) -> u32 {
    term_years.saturating_mul(12).max(1)
}

/// (1 + r)^n, or None when it leaves the decimal range
fn growth_factor(rate: Decimal, periods: u32) -> Option<Decimal> {
    (Decimal::ONE + rate).checked_powi(periods as i64)
}

/// Level monthly payment M = P·r·(1+r)^n / ((1+r)^n − 1), rounded to cents
pub fn monthly_payment(loan_amount: Currency, annual_rate_percent: Percent, term_years: u32) -> Currency {
    if loan_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let n = total_months(term_years);
    if annual_rate_percent.is_zero() {
        return quantize_currency(loan_amount / Decimal::from(n));
    }

    let r = monthly_rate(annual_rate_percent);
    let payment = match growth_factor(r, n) {
        // Same formula, divided through by (1+r)^n to keep intermediates small
        Some(factor) => loan_amount * r / (Decimal::ONE - Decimal::ONE / factor),
        // Factor beyond range: payment has converged to interest-only
        None => loan_amount * r,
    };
    quantize_currency(payment)
}

/// Principal repaid over the first `months` payments
pub fn principal_paid_over_months(
    loan_amount: Currency,
    annual_rate_percent: Percent,
    term_years: u32,
    months: u32,
) -> Currency {
    if loan_amount <= Decimal::ZERO || months == 0 {
        return Decimal::ZERO;
    }

    let n = total_months(term_years);
    let elapsed = months.min(n);

    if annual_rate_percent.is_zero() {
        // Equal principal payments
        return quantize_currency(loan_amount * Decimal::from(elapsed) / Decimal::from(n));
    }

    let r = monthly_rate(annual_rate_percent);
    let payment = monthly_payment(loan_amount, annual_rate_percent, term_years);

    let mut balance = loan_amount;
    let mut paid = Decimal::ZERO;
    for _ in 0..elapsed {
        let interest = balance * r;
        let principal = (payment - interest).min(balance);
        paid += principal;
        balance -= principal;
        if balance <= Decimal::ZERO {
            break;
        }
    }

    quantize_currency(paid)
}

/// Principal repaid over the first `num_years` years
pub fn principal_paid_over_years(
    loan_amount: Currency,
    annual_rate_percent: Percent,
    term_years: u32,
    num_years: u32,
) -> Currency {
    principal_paid_over_months(
        loan_amount,
        annual_rate_percent,
        term_years,
        num_years.saturating_mul(12),
    )
}

/// Outstanding balance after `months_elapsed` payments (closed form, full precision)
///
/// B_k = P·(1+r)^k − M·((1+r)^k − 1)/r with M the cent-rounded payment.
pub fn remaining_balance(
    loan_amount: Currency,
    annual_rate_percent: Percent,
    term_years: u32,
    months_elapsed: u32,
) -> Decimal {
    if loan_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let n = total_months(term_years);
    let k = months_elapsed.min(n);

    if annual_rate_percent.is_zero() {
        return loan_amount - loan_amount * Decimal::from(k) / Decimal::from(n);
    }

    let r = monthly_rate(annual_rate_percent);
    let payment = monthly_payment(loan_amount, annual_rate_percent, term_years);

    let balance = match growth_factor(r, k) {
        Some(factor) => loan_amount * factor - payment * (factor - Decimal::ONE) / r,
        None => loan_amount - principal_paid_over_months(loan_amount, annual_rate_percent, term_years, k),
    };
    balance.max(Decimal::ZERO)
}

/// Interest paid during loan year `year` (1-indexed)
///
/// Starts from the closed-form balance at the beginning of the year, then
/// steps through the year's payments.
pub fn interest_paid_in_year(
    loan_amount: Currency,
    annual_rate_percent: Percent,
    term_years: u32,
    year: u32,
) -> Currency {
    if loan_amount <= Decimal::ZERO || annual_rate_percent.is_zero() || year == 0 {
        return Decimal::ZERO;
    }

    let n = total_months(term_years);
    let start = (year - 1).saturating_mul(12);
    if start >= n {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_percent);
    let payment = monthly_payment(loan_amount, annual_rate_percent, term_years);
    let mut balance = remaining_balance(loan_amount, annual_rate_percent, term_years, start);

    let mut interest_total = Decimal::ZERO;
    for _ in 0..12.min(n - start) {
        if balance <= Decimal::ZERO {
            break;
        }
        let interest = balance * r;
        let principal = (payment - interest).min(balance);
        interest_total += interest;
        balance -= principal;
    }

    quantize_currency(interest_total)
}

/// One month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    /// Payment number (1-indexed)
    pub month: u32,
    /// Loan year the payment falls in (1-indexed)
    pub year: u32,
    pub payment: Currency,
    pub interest: Currency,
    pub principal: Currency,
    /// Balance after the payment
    pub balance: Currency,
}

/// Full payment-by-payment schedule; the last payment is trimmed to clear the balance
pub fn amortization_schedule(
    loan_amount: Currency,
    annual_rate_percent: Percent,
    term_years: u32,
) -> Vec<AmortizationRow> {
    if loan_amount <= Decimal::ZERO {
        return Vec::new();
    }

    let n = total_months(term_years);
    let r = monthly_rate(annual_rate_percent);
    let payment = monthly_payment(loan_amount, annual_rate_percent, term_years);

    let mut rows = Vec::with_capacity(n as usize);
    let mut balance = loan_amount;

    for month in 1..=n {
        let interest = balance * r;
        let mut principal = (payment - interest).min(balance);
        if month == n {
            // Rounding residue is settled with the final payment
            principal = balance;
        }
        balance -= principal;

        rows.push(AmortizationRow {
            month,
            year: (month - 1) / 12 + 1,
            payment: quantize_currency(interest + principal),
            interest: quantize_currency(interest),
            principal: quantize_currency(principal),
            balance: quantize_currency(balance),
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    rows
}
