//! Load property scenarios from a CSV file, one analysis request per row

use crate::analysis::{AnalysisRequest, ProjectionSettings};
use crate::property::{
    AcquisitionInput, FinancingTerms, Location, OperatingExpenseAssumptions, PropertyType,
    RentalIncomeAssumptions,
};
use csv::Reader;
use rust_decimal::Decimal;
use std::error::Error;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Default scenario file shipped with the crate
pub const DEFAULT_SCENARIOS_PATH: &str = "data/scenarios/sample_scenarios.csv";

/// One named analysis request
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub request: AnalysisRequest,
}

/// Raw CSV row; amounts stay text until parsed as exact decimals
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "PropertyType")]
    property_type: String,
    #[serde(rename = "PurchasePrice")]
    purchase_price: String,
    #[serde(rename = "YearBuilt")]
    year_built: i32,
    #[serde(rename = "SquareFeet")]
    square_feet: Option<u32>,
    #[serde(rename = "DownPayment")]
    down_payment: String,
    #[serde(rename = "LoanAmount")]
    loan_amount: String,
    #[serde(rename = "InterestRate")]
    interest_rate: String,
    #[serde(rename = "LoanTermYears")]
    loan_term_years: u32,
    #[serde(rename = "ClosingCosts")]
    closing_costs: String,
    #[serde(rename = "LoanPoints")]
    loan_points: String,
    #[serde(rename = "PropertyTaxRate")]
    property_tax_rate: String,
    #[serde(rename = "InsuranceAnnual")]
    insurance_annual: Option<String>,
    #[serde(rename = "HoaMonthly")]
    hoa_monthly: String,
    #[serde(rename = "UtilitiesMonthly")]
    utilities_monthly: String,
    #[serde(rename = "MaintenancePercent")]
    maintenance_percent: String,
    #[serde(rename = "ManagementPercent")]
    management_percent: String,
    #[serde(rename = "VacancyPercent")]
    vacancy_percent: String,
    #[serde(rename = "MonthlyRent")]
    monthly_rent: String,
    #[serde(rename = "OtherMonthlyIncome")]
    other_monthly_income: String,
}

fn parse_decimal(scenario: &str, column: &str, raw: &str) -> Result<Decimal, Box<dyn Error>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(trimmed)
        .map_err(|e| format!("Scenario {}: invalid {} `{}`: {}", scenario, column, raw, e).into())
}

impl CsvRow {
    fn to_scenario(self) -> Result<Scenario, Box<dyn Error>> {
        let id = self.scenario_id.trim().to_string();
        let amount = |column: &str, raw: &str| parse_decimal(&id, column, raw);

        let property_type = PropertyType::from_str(&self.property_type)
            .map_err(|e| format!("Scenario {}: {}", id, e))?;

        let insurance_annual = match self.insurance_annual.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(amount("InsuranceAnnual", raw)?),
        };

        let request = AnalysisRequest {
            property_details: AcquisitionInput {
                purchase_price: amount("PurchasePrice", &self.purchase_price)?,
                property_type,
                year_built: self.year_built,
                square_feet: self.square_feet,
                location: Some(Location {
                    address: self.address.trim().to_string(),
                    state: None,
                    zip: None,
                }),
            },
            financing: FinancingTerms {
                down_payment: amount("DownPayment", &self.down_payment)?,
                loan_amount: amount("LoanAmount", &self.loan_amount)?,
                interest_rate: amount("InterestRate", &self.interest_rate)?,
                loan_term_years: self.loan_term_years,
                closing_costs: amount("ClosingCosts", &self.closing_costs)?,
                loan_points: amount("LoanPoints", &self.loan_points)?,
            },
            operating_expenses: OperatingExpenseAssumptions {
                property_tax_rate: amount("PropertyTaxRate", &self.property_tax_rate)?,
                insurance_annual,
                hoa_monthly: amount("HoaMonthly", &self.hoa_monthly)?,
                utilities_monthly: amount("UtilitiesMonthly", &self.utilities_monthly)?,
                maintenance_annual_percent: amount("MaintenancePercent", &self.maintenance_percent)?,
                property_management_percent: amount("ManagementPercent", &self.management_percent)?,
                vacancy_rate_percent: amount("VacancyPercent", &self.vacancy_percent)?,
            },
            rental_income: RentalIncomeAssumptions {
                monthly_rent: amount("MonthlyRent", &self.monthly_rent)?,
                other_monthly_income: amount("OtherMonthlyIncome", &self.other_monthly_income)?,
            },
            investment_strategy: None,
            projection: ProjectionSettings::default(),
        };

        Ok(Scenario { id, request })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load scenarios from any reader (e.g., string buffer, network stream)
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>, Box<dyn Error>> {
    collect_rows(Reader::from_reader(reader))
}

/// Load scenarios from the default sample file
pub fn load_default_scenarios() -> Result<Vec<Scenario>, Box<dyn Error>> {
    load_scenarios(DEFAULT_SCENARIOS_PATH)
}

fn collect_rows<R: Read>(mut reader: Reader<R>) -> Result<Vec<Scenario>, Box<dyn Error>> {
    let mut scenarios = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }
    Ok(scenarios)
}
