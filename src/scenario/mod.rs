//! Scenario runner for batch analyses
//!
//! Pre-loads assumptions once, then runs many property scenarios (in
//! parallel), interest-rate sensitivities or cached single requests without
//! re-reading CSV files.

pub mod loader;

pub use loader::{load_default_scenarios, load_scenarios, load_scenarios_from_reader, Scenario};

use crate::analysis::{AnalysisEngine, AnalysisRequest, AnalysisResult};
use crate::assumptions::Assumptions;
use crate::cache::{cache_key, AnalysisCache};
use crate::error::EngineResult;
use crate::money::{Currency, Percent};
use log::{info, warn};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Instant;

/// Outcome of one scenario in a batch
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub id: String,
    pub result: EngineResult<AnalysisResult>,
}

/// One line of a batch summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    #[serde(rename = "ScenarioID")]
    pub scenario_id: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "PurchasePrice")]
    pub purchase_price: Option<Currency>,
    #[serde(rename = "MonthlyCashFlow")]
    pub monthly_cash_flow: Option<Currency>,
    #[serde(rename = "AnnualCashFlow")]
    pub annual_cash_flow: Option<Currency>,
    #[serde(rename = "CapRate")]
    pub cap_rate: Option<Percent>,
    #[serde(rename = "CashOnCash")]
    pub cash_on_cash: Option<Percent>,
    #[serde(rename = "DSCR")]
    pub dscr: Option<Decimal>,
    #[serde(rename = "BreakEvenRent")]
    pub break_even_rent: Option<Currency>,
    #[serde(rename = "ProjectedROI")]
    pub projected_roi: Option<Percent>,
    #[serde(rename = "Warnings")]
    pub warnings: usize,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl ScenarioSummary {
    pub fn from_outcome(outcome: &ScenarioOutcome) -> Self {
        match &outcome.result {
            Ok(result) => {
                let metrics = &result.investment_metrics;
                Self {
                    scenario_id: outcome.id.clone(),
                    address: result.property.address.clone(),
                    purchase_price: Some(result.property.purchase_price),
                    monthly_cash_flow: Some(result.cash_flow.monthly.net_cash_flow),
                    annual_cash_flow: Some(result.cash_flow.annual.net_cash_flow),
                    cap_rate: Some(metrics.cap_rate),
                    cash_on_cash: Some(metrics.coc_return),
                    dscr: Some(metrics.debt_coverage_ratio),
                    break_even_rent: Some(metrics.break_even_rent.monthly),
                    projected_roi: Some(metrics.roi.projected.roi),
                    warnings: result.warnings.len(),
                    error: None,
                }
            }
            Err(err) => Self {
                scenario_id: outcome.id.clone(),
                address: String::new(),
                purchase_price: None,
                monthly_cash_flow: None,
                annual_cash_flow: None,
                cap_rate: None,
                cash_on_cash: None,
                dscr: None,
                break_even_rent: None,
                projected_roi: None,
                warnings: 0,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Pre-loaded scenario runner for batch analyses
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// let outcomes = runner.run_batch(&load_default_scenarios()?);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with standard in-memory assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::standard(),
        }
    }

    /// Create runner by loading assumption overrides from CSV
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from a specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    fn engine(&self) -> AnalysisEngine {
        AnalysisEngine::new(self.base_assumptions.clone())
    }

    /// Analyze a single request
    pub fn run(&self, request: &AnalysisRequest) -> EngineResult<AnalysisResult> {
        self.engine().analyze(request)
    }

    /// Analyze every scenario in parallel; output order matches input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let engine = self.engine();
        let start = Instant::now();

        let outcomes: Vec<ScenarioOutcome> = scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                id: scenario.id.clone(),
                result: engine.analyze(&scenario.request),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            "Analyzed {} scenarios in {:?} ({} failed)",
            outcomes.len(),
            start.elapsed(),
            failed
        );
        outcomes
    }

    /// Re-run one request at each interest rate (percent)
    pub fn run_rate_sensitivity(
        &self,
        request: &AnalysisRequest,
        interest_rates: &[Percent],
    ) -> Vec<(Percent, EngineResult<AnalysisResult>)> {
        let engine = self.engine();
        interest_rates
            .par_iter()
            .map(|&rate| {
                let mut shifted = request.clone();
                shifted.financing.interest_rate = rate;
                (rate, engine.analyze(&shifted))
            })
            .collect()
    }

    /// Analyze through a cache; `now` is supplied by the caller
    pub fn run_cached(
        &self,
        request: &AnalysisRequest,
        cache: &mut AnalysisCache<AnalysisResult>,
        now: Instant,
    ) -> EngineResult<AnalysisResult> {
        match cache_key(request) {
            Ok(key) => cache.get_or_try_insert_with(key, now, || self.run(request)),
            Err(e) => {
                warn!("Request could not be hashed for caching: {}", e);
                self.run(request)
            }
        }
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::time::Duration;

    fn request() -> AnalysisRequest {
        serde_json::from_value(json!({
            "propertyDetails": {
                "purchasePrice": 350000,
                "propertyType": "single-family",
                "yearBuilt": 1995,
                "location": {"address": "123 Main St"}
            },
            "financing": {
                "downPayment": 70000,
                "loanAmount": 280000,
                "interestRate": 7.5,
                "loanTermYears": 30,
                "closingCosts": 8500,
                "loanPoints": 2800
            },
            "operatingExpenses": {
                "propertyTaxRate": 2.1,
                "insuranceAnnual": 1800,
                "utilitiesMonthly": 200
            },
            "rentalIncome": {"monthlyRent": 2500}
        }))
        .unwrap()
    }

    #[test]
    fn test_run_batch_keeps_order_and_errors() {
        let runner = ScenarioRunner::new();
        let mut broken = request();
        broken.financing.loan_term_years = 0;

        let scenarios = vec![
            Scenario { id: "a".to_string(), request: request() },
            Scenario { id: "b".to_string(), request: broken },
            Scenario { id: "c".to_string(), request: request() },
        ];
        let outcomes = runner.run_batch(&scenarios);

        let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());

        let summary = ScenarioSummary::from_outcome(&outcomes[1]);
        assert!(summary.error.as_deref().unwrap().contains("financing.loanTermYears"));
        assert_eq!(summary.cap_rate, None);

        let summary = ScenarioSummary::from_outcome(&outcomes[0]);
        assert_eq!(summary.monthly_cash_flow, Some(dec!(-1220.30)));
        assert_eq!(summary.warnings, 3);
    }

    #[test]
    fn test_lower_rate_improves_cash_flow() {
        let runner = ScenarioRunner::new();
        let results = runner.run_rate_sensitivity(&request(), &[dec!(5.5), dec!(7.5), dec!(9.5)]);

        let flows: Vec<Decimal> = results
            .iter()
            .map(|(_, r)| r.as_ref().unwrap().cash_flow.monthly.net_cash_flow)
            .collect();
        assert_eq!(results[1].0, dec!(7.5));
        assert!(flows[0] > flows[1]);
        assert!(flows[1] > flows[2]);
    }

    #[test]
    fn test_run_cached() {
        let runner = ScenarioRunner::new();
        let mut cache = AnalysisCache::new(Duration::from_secs(300));
        let now = Instant::now();

        let first = runner.run_cached(&request(), &mut cache, now).unwrap();
        let second = runner.run_cached(&request(), &mut cache, now).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_assumption_overrides_flow_through() {
        let mut runner = ScenarioRunner::default();
        let baseline = runner.run(&request()).unwrap();

        runner.assumptions_mut().thresholds.min_dscr = dec!(0.25);
        let relaxed = runner.run(&request()).unwrap();
        assert_eq!(baseline.warnings.len(), 3);
        assert_eq!(relaxed.warnings.len(), 2);
    }
}
