//! Serializable result structures for analysis and comparison

use super::advisories::{Suggestion, Warning};
use crate::finance::{
    BreakEvenRent, CarryingCostBreakdown, CarryingCostPeriod, CashFlowStatement, CocInterpretation,
    CostPercentages, DataQuality, PerSquareFoot, RoiProjection,
};
use crate::money::{Currency, Percent};
use crate::property::{AcquisitionInput, InvestmentStrategy, PropertyType};
use crate::strategy::{Recommendation, StrategyResults};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Echo of the property the figures describe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub address: String,
    pub purchase_price: Currency,
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_strategy: Option<InvestmentStrategy>,
}

impl PropertySummary {
    pub fn from_acquisition(acquisition: &AcquisitionInput, strategy: Option<InvestmentStrategy>) -> Self {
        Self {
            address: acquisition
                .location
                .as_ref()
                .map(|location| location.address.clone())
                .unwrap_or_default(),
            purchase_price: acquisition.purchase_price,
            property_type: acquisition.property_type,
            square_feet: acquisition.square_feet,
            investment_strategy: strategy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub percentages: CostPercentages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarryingCostReport {
    pub monthly: CarryingCostPeriod,
    pub annual: CarryingCostPeriod,
    pub breakdown: CostBreakdown,
    pub data_quality: DataQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_square_foot: Option<PerSquareFoot>,
}

impl CarryingCostReport {
    pub fn new(costs: &CarryingCostBreakdown, square_feet: Option<u32>) -> Self {
        Self {
            monthly: costs.monthly.clone(),
            annual: costs.annual.clone(),
            breakdown: CostBreakdown {
                percentages: costs.percentages(),
            },
            data_quality: costs.data_quality(),
            per_square_foot: costs.per_square_foot(square_feet),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentMetrics {
    pub total_cash_invested: Currency,
    pub coc_return: Percent,
    pub coc_interpretation: CocInterpretation,
    pub cap_rate: Percent,
    pub break_even_rent: BreakEvenRent,
    pub debt_coverage_ratio: Decimal,
    pub roi: RoiProjection,
}

/// Single-property analysis output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub property: PropertySummary,
    pub carrying_costs: CarryingCostReport,
    pub cash_flow: CashFlowStatement,
    pub investment_metrics: InvestmentMetrics,
    pub warnings: Vec<Warning>,
    pub recommendations: Vec<Suggestion>,
}

/// Strategy comparison output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub property: PropertySummary,
    pub strategies: StrategyResults,
    pub recommendation: Recommendation,
}
