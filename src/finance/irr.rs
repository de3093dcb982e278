//! Internal Rate of Return (IRR) and Net Present Value (NPV)
//!
//! The root search runs in f64 (Newton-Raphson with a bisection fallback);
//! inputs and the returned rate are decimals.

use crate::error::{EngineError, EngineResult};
use crate::money::{quantize, quantize_currency, Currency};
use log::warn;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};

/// Iteration bound shared by both solvers
pub const MAX_ITERATIONS: usize = 1000;

/// Convergence tolerance on the rate (and on NPV for bisection)
pub const TOLERANCE: f64 = 1e-10;

/// Starting rate for Newton-Raphson
const INITIAL_GUESS: f64 = 0.05;

/// Search bounds for the periodic rate
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

/// Periodic IRR of `cash_flows` as a decimal rate (1.0 = 100%), 4 dp
///
/// Fails with `NoSolution` when the flows are empty, all zero, all one sign,
/// or when neither solver finds a root inside the search bounds.
pub fn irr(cash_flows: &[Decimal]) -> EngineResult<Decimal> {
    let flows: Vec<f64> = cash_flows
        .iter()
        .map(|cf| cf.to_f64().unwrap_or(0.0))
        .collect();

    if flows.is_empty() {
        return Err(EngineError::no_solution("IRR", "no cash flows"));
    }
    if flows.iter().all(|cf| cf.abs() < TOLERANCE) {
        return Err(EngineError::no_solution("IRR", "all cash flows are zero"));
    }

    // A root requires at least one sign change
    let has_positive = flows.iter().any(|&cf| cf > TOLERANCE);
    let has_negative = flows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_positive || !has_negative {
        return Err(EngineError::no_solution(
            "IRR",
            "cash flows never change sign",
        ));
    }

    let rate = solve_newton(&flows)
        .or_else(|| solve_bisection(&flows))
        .ok_or_else(|| {
            if !brackets_root(&flows) {
                warn!("IRR root for {} cash flows lies outside [{}, {}]", flows.len(), MIN_RATE, MAX_RATE);
                return EngineError::no_solution("IRR", "root outside search bounds");
            }
            warn!("IRR did not converge for {} cash flows", flows.len());
            EngineError::no_solution("IRR", "did not converge within the iteration bound")
        })?;

    let rate = Decimal::from_f64(rate)
        .ok_or_else(|| EngineError::no_solution("IRR", "rate is not representable"))?;
    let rate = quantize(rate, 4);
    // Avoid emitting -0.0000 for break-even series
    Ok(if rate.is_zero() { Decimal::ZERO } else { rate })
}

/// NPV = Σ CF_t / (1 + rate)^t, rounded to cents; `rate` must exceed -1
///
/// Fails with `Overflow` when a discount factor or a discounted term falls
/// outside the decimal range, which happens for rates close to -1 over many
/// periods.
pub fn npv(rate: Decimal, cash_flows: &[Decimal]) -> EngineResult<Currency> {
    if rate <= Decimal::NEGATIVE_ONE {
        return Err(EngineError::validation("rate", "must be greater than -1"));
    }

    let base = Decimal::ONE + rate;
    let mut total = Decimal::ZERO;
    for (t, cf) in cash_flows.iter().enumerate() {
        let out_of_range = || EngineError::overflow(format!("NPV term {} at rate {}", t, rate));

        // Underflow to zero counts as out of range
        let discount = base
            .checked_powi(t as i64)
            .filter(|discount| !discount.is_zero())
            .ok_or_else(out_of_range)?;
        let term = cf.checked_div(discount).ok_or_else(out_of_range)?;
        total = total.checked_add(term).ok_or_else(out_of_range)?;
    }

    Ok(quantize_currency(total))
}

/// Newton-Raphson on the periodic rate; None when it stalls or fails to converge
fn solve_newton(cash_flows: &[f64]) -> Option<f64> {
    let mut rate = INITIAL_GUESS;

    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cash_flows, rate);

        if dnpv.abs() < 1e-20 {
            return None;
        }

        let new_rate = (rate - npv / dnpv).max(MIN_RATE).min(MAX_RATE);

        if (new_rate - rate).abs() < TOLERANCE {
            // A clamped fixed point is not a root
            if npv_at_rate(cash_flows, new_rate).abs() > 1e-6 {
                return None;
            }
            return Some(new_rate);
        }

        rate = new_rate;
    }

    None
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cash_flows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / ((1.0 + rate).powi(t as i32 + 1));
        }
    }

    (npv, dnpv)
}

/// Bisection over [MIN_RATE, MAX_RATE]
fn solve_bisection(cash_flows: &[f64]) -> Option<f64> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;

    let mut npv_low = npv_at_rate(cash_flows, low);
    let npv_high = npv_at_rate(cash_flows, high);

    if npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cash_flows, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// True when NPV changes sign across [MIN_RATE, MAX_RATE]
fn brackets_root(cash_flows: &[f64]) -> bool {
    npv_at_rate(cash_flows, MIN_RATE) * npv_at_rate(cash_flows, MAX_RATE) <= 0.0
}

fn npv_at_rate(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
