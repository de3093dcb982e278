//! Request/response assembly around the calculation engine
//!
//! `AnalysisEngine` validates a request, runs the pipeline
//! (carrying costs → cash flow → metrics → ROI, or the strategy comparator)
//! and assembles the report structures callers serialize.

mod advisories;
mod engine;
mod report;

pub use advisories::{AdvisoryInputs, Severity, Suggestion, Warning};
pub use engine::AnalysisEngine;
pub use report::{
    AnalysisResult, CarryingCostReport, ComparisonResult, CostBreakdown, InvestmentMetrics,
    PropertySummary,
};

pub use crate::finance::ProjectionSettings;

use crate::error::EngineResult;
use crate::property::{
    AcquisitionInput, FinancingTerms, InvestmentStrategy, OperatingExpenseAssumptions,
    RentalIncomeAssumptions,
};
use crate::strategy::{StrategyAssumptions, StrategyComparator, StrategyKind};
use serde::{Deserialize, Serialize};

/// Single-property analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub property_details: AcquisitionInput,
    pub financing: FinancingTerms,
    pub operating_expenses: OperatingExpenseAssumptions,
    pub rental_income: RentalIncomeAssumptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_strategy: Option<InvestmentStrategy>,

    /// Appreciation, tax bracket and horizon for the ROI projection
    #[serde(default)]
    pub projection: ProjectionSettings,
}

impl AnalysisRequest {
    pub fn validate(&self) -> EngineResult<()> {
        self.property_details.validate()?;
        self.financing.validate()?;
        self.operating_expenses.validate()?;
        self.rental_income.validate()?;
        self.projection.validate()
    }
}

/// Strategy comparison request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    pub property_details: AcquisitionInput,
    pub financing: FinancingTerms,
    pub operating_expenses: OperatingExpenseAssumptions,
    pub strategies: Vec<StrategyKind>,

    #[serde(default)]
    pub assumptions: StrategyAssumptions,
}

impl ComparisonRequest {
    pub fn validate(&self) -> EngineResult<()> {
        self.property_details.validate()?;
        self.financing.validate()?;
        self.operating_expenses.validate()?;
        StrategyComparator::validate(&self.strategies, &self.assumptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let request: AnalysisRequest = serde_json::from_value(json!({
            "propertyDetails": {
                "purchasePrice": 350000,
                "propertyType": "single-family",
                "location": {"address": "123 Main St"}
            },
            "financing": {
                "downPayment": 70000,
                "loanAmount": 280000,
                "interestRate": 7.5,
                "loanTermYears": 30
            },
            "operatingExpenses": {
                "propertyTaxRate": 2.1,
                "utilitiesMonthly": 200
            },
            "rentalIncome": {"monthlyRent": 2500}
        }))
        .unwrap();

        assert_eq!(request.projection, ProjectionSettings::default());
        assert_eq!(request.projection.tax_bracket_percent, dec!(24));
        assert_eq!(request.investment_strategy, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unknown_strategy_kind_rejected() {
        let result: Result<ComparisonRequest, _> = serde_json::from_value(json!({
            "propertyDetails": {"purchasePrice": 300000, "propertyType": "condo"},
            "financing": {
                "downPayment": 60000,
                "loanAmount": 240000,
                "interestRate": 6.5,
                "loanTermYears": 30
            },
            "operatingExpenses": {"propertyTaxRate": 2.0},
            "strategies": ["flip", "wholesale"]
        }));
        assert!(result.is_err());
    }
}
