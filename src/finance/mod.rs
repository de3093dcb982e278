//! Calculation engine: mortgage math, cost estimation, carrying costs, cash
//! flow, return metrics, rate-of-return solving, tax benefits and multi-year ROI
//!
//! Every function here is pure over its inputs.

pub mod mortgage;
pub mod costs;
pub mod carrying;
pub mod cashflow;
pub mod metrics;
pub mod irr;
pub mod tax;
pub mod roi;

pub use carrying::{aggregate, CarryingCostBreakdown, CarryingCostPeriod, CostPercentages, DataQuality, InsuranceSource, PerSquareFoot};
pub use cashflow::{CashFlowPeriod, CashFlowStatement};
pub use costs::CostEstimator;
pub use irr::{irr, npv};
pub use metrics::{break_even_rent, cap_rate, cash_on_cash, dscr, BreakEvenRent, CocInterpretation, ReturnMetrics};
pub use mortgage::{amortization_schedule, monthly_payment, principal_paid_over_years, AmortizationRow};
pub use roi::{annualized_return, appreciation, ProjectionSettings, RoiProjection, RoiProjector};
pub use tax::{TaxBenefitEstimator, TaxDeductions};
