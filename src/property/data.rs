//! Acquisition scenario data structures matching the analysis request format

use crate::money::{Currency, Percent};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default build year when the caller omits one
fn default_year_built() -> i32 {
    2000
}

fn default_maintenance_percent() -> Percent {
    dec!(1.0)
}

fn default_management_percent() -> Percent {
    dec!(10)
}

fn default_vacancy_percent() -> Percent {
    dec!(8)
}

/// Property classification used for insurance pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    SingleFamily,
    Condo,
    MultiFamily,
    Commercial,
}

impl PropertyType {
    /// Get the string representation used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "single-family",
            PropertyType::Condo => "condo",
            PropertyType::MultiFamily => "multi-family",
            PropertyType::Commercial => "commercial",
        }
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single-family" => Ok(PropertyType::SingleFamily),
            "condo" => Ok(PropertyType::Condo),
            "multi-family" => Ok(PropertyType::MultiFamily),
            "commercial" => Ok(PropertyType::Commercial),
            other => Err(format!("Unknown property type: {}", other)),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Investment strategy the caller intends for a single-property analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentStrategy {
    BuyAndHold,
    Flip,
    VacationRental,
}

/// Street location, carried through to the report only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// The property being acquired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionInput {
    /// Contract price (must be positive)
    pub purchase_price: Currency,

    pub property_type: PropertyType,

    /// Construction year; drives insurance and maintenance age factors
    #[serde(default = "default_year_built")]
    pub year_built: i32,

    /// Living area, enables per-square-foot costs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Loan and cash terms of the purchase
///
/// `down_payment + loan_amount` is expected to approximate the purchase price;
/// the engine does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingTerms {
    pub down_payment: Currency,
    pub loan_amount: Currency,

    /// Annual interest rate in percent (7.5 = 7.5%)
    pub interest_rate: Percent,

    /// Amortization period (1-50 years)
    pub loan_term_years: u32,

    #[serde(default)]
    pub closing_costs: Currency,

    #[serde(default)]
    pub loan_points: Currency,
}

impl FinancingTerms {
    /// All-cash terms for a purchase at `price`
    pub fn all_cash(price: Currency) -> Self {
        Self {
            down_payment: price,
            loan_amount: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            loan_term_years: 30,
            closing_costs: Decimal::ZERO,
            loan_points: Decimal::ZERO,
        }
    }

    pub fn is_financed(&self) -> bool {
        self.loan_amount > Decimal::ZERO
    }

    /// Cash out of pocket at closing: down payment + closing costs + points
    pub fn total_cash_invested(&self) -> Currency {
        self.down_payment + self.closing_costs + self.loan_points
    }
}

/// Operating expense inputs; rates are percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingExpenseAssumptions {
    /// Annual property tax as a percent of value
    pub property_tax_rate: Percent,

    /// Annual premium; estimated from the property when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_annual: Option<Currency>,

    #[serde(default)]
    pub hoa_monthly: Currency,

    #[serde(default)]
    pub utilities_monthly: Currency,

    /// Maintenance reserve as a percent of value per year
    #[serde(default = "default_maintenance_percent")]
    pub maintenance_annual_percent: Percent,

    /// Management fee as a percent of scheduled rent
    #[serde(default = "default_management_percent")]
    pub property_management_percent: Percent,

    /// Expected vacancy, 0-100
    #[serde(default = "default_vacancy_percent")]
    pub vacancy_rate_percent: Percent,
}

/// Long-term rental income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalIncomeAssumptions {
    pub monthly_rent: Currency,

    /// Parking, laundry, storage and similar
    #[serde(default)]
    pub other_monthly_income: Currency,
}

impl RentalIncomeAssumptions {
    pub fn gross_monthly(&self) -> Currency {
        self.monthly_rent + self.other_monthly_income
    }
}
