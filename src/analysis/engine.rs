//! Analysis engine: one call per request, no state between calls

use super::advisories::{self, AdvisoryInputs};
use super::report::{AnalysisResult, CarryingCostReport, ComparisonResult, InvestmentMetrics, PropertySummary};
use super::{AnalysisRequest, ComparisonRequest};
use crate::assumptions::Assumptions;
use crate::error::EngineResult;
use crate::finance::{aggregate, cashflow, CocInterpretation, ReturnMetrics, RoiProjector};
use crate::money::quantize_currency;
use crate::strategy::StrategyComparator;
use log::debug;
use std::path::Path;

/// Runs single-property analyses and strategy comparisons against one set of assumptions
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    assumptions: Assumptions,
}

impl AnalysisEngine {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Engine with standard underwriting assumptions
    pub fn standard() -> Self {
        Self::new(Assumptions::standard())
    }

    /// Engine with assumption overrides loaded from `path`
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(Assumptions::from_csv_path(path)?))
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Full rental analysis: carrying costs, cash flow, metrics, ROI and advisories
    pub fn analyze(&self, request: &AnalysisRequest) -> EngineResult<AnalysisResult> {
        request.validate()?;

        let acquisition = &request.property_details;
        let financing = &request.financing;
        let expenses = &request.operating_expenses;
        let income = &request.rental_income;
        let monthly_rent = income.monthly_rent;

        let carrying_costs = aggregate(&self.assumptions, acquisition, financing, expenses)
            .with_property_management(monthly_rent, expenses.property_management_percent);
        let statement = cashflow::project(income, expenses, &carrying_costs);

        let total_cash_invested = financing.total_cash_invested();
        let metrics = ReturnMetrics::compute(
            &statement,
            &carrying_costs,
            acquisition.purchase_price,
            total_cash_invested,
            monthly_rent,
            expenses.vacancy_rate_percent,
            expenses.property_management_percent,
        )?;

        let roi = RoiProjector::new(&self.assumptions).project(
            acquisition,
            financing,
            total_cash_invested,
            statement.annual.net_cash_flow,
            &request.projection,
        )?;

        debug!(
            "Analysis: NOI {}/yr, net cash flow {}/yr, CoC {}%",
            statement.annual.noi, statement.annual.net_cash_flow, metrics.cash_on_cash_return
        );

        let inputs = AdvisoryInputs {
            monthly_rent,
            monthly_net_cash_flow: statement.monthly.net_cash_flow,
            monthly_carrying_total: carrying_costs.monthly.total,
            monthly_payment: carrying_costs.monthly.mortgage,
            break_even: &metrics.break_even_rent,
            dscr: metrics.debt_service_coverage_ratio,
            coc_percent: metrics.cash_on_cash_return,
            financing,
        };
        let thresholds = &self.assumptions.thresholds;
        let warnings = advisories::warnings(&inputs, thresholds);
        let recommendations = advisories::suggestions(&inputs, thresholds);

        Ok(AnalysisResult {
            property: PropertySummary::from_acquisition(acquisition, request.investment_strategy),
            carrying_costs: CarryingCostReport::new(&carrying_costs, acquisition.square_feet),
            cash_flow: statement,
            investment_metrics: InvestmentMetrics {
                total_cash_invested: quantize_currency(total_cash_invested),
                coc_return: metrics.cash_on_cash_return,
                coc_interpretation: CocInterpretation::from_percent(metrics.cash_on_cash_return),
                cap_rate: metrics.cap_rate,
                break_even_rent: metrics.break_even_rent,
                debt_coverage_ratio: metrics.debt_service_coverage_ratio,
                roi,
            },
            warnings,
            recommendations,
        })
    }

    /// Evaluate the requested strategies and recommend one
    pub fn compare(&self, request: &ComparisonRequest) -> EngineResult<ComparisonResult> {
        request.validate()?;

        let comparison = StrategyComparator::new(&self.assumptions).compare(
            &request.property_details,
            &request.financing,
            &request.operating_expenses,
            &request.strategies,
            &request.assumptions,
        )?;

        Ok(ComparisonResult {
            property: PropertySummary::from_acquisition(&request.property_details, None),
            strategies: comparison.strategies,
            recommendation: comparison.recommendation,
        })
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::standard()
    }
}
