//! Carrying cost aggregation
//!
//! Every component is rounded to cents first and the total is the sum of the
//! rounded components, so `total` reconciles exactly with its parts at both
//! monthly and annual granularity.

use super::costs::CostEstimator;
use super::mortgage::monthly_payment;
use crate::assumptions::Assumptions;
use crate::money::{percent_to_rate, quantize_currency, quantize_percent, Currency, Percent, MONTHS_PER_YEAR, ONE_HUNDRED};
use crate::property::{AcquisitionInput, FinancingTerms, OperatingExpenseAssumptions};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Carrying costs for one period (a month or a year)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarryingCostPeriod {
    pub mortgage: Currency,
    pub property_tax: Currency,
    pub insurance: Currency,
    pub hoa: Currency,
    pub utilities: Currency,
    pub maintenance: Currency,
    pub property_management: Currency,
    pub total: Currency,
}

impl CarryingCostPeriod {
    fn components(&self) -> [Currency; 7] {
        [
            self.mortgage,
            self.property_tax,
            self.insurance,
            self.hoa,
            self.utilities,
            self.maintenance,
            self.property_management,
        ]
    }

    fn recompute_total(&mut self) {
        self.total = self.components().iter().sum();
    }

    /// Property tax, insurance, HOA, utilities and maintenance (no debt service or management)
    pub fn operating_expenses(&self) -> Currency {
        self.property_tax + self.insurance + self.hoa + self.utilities + self.maintenance
    }

    pub fn excluding_management(&self) -> Currency {
        self.total - self.property_management
    }
}

/// Where the insurance figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceSource {
    Estimated,
    UserProvided,
}

impl InsuranceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceSource::Estimated => "estimated",
            InsuranceSource::UserProvided => "user_provided",
        }
    }
}

/// Provenance tag for each cost line, reported alongside the breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    pub property_tax: String,
    pub insurance: String,
    pub maintenance: String,
    pub utilities: String,
}

/// Each component's share of the annual total, in percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostPercentages {
    pub mortgage: Percent,
    pub property_tax: Percent,
    pub insurance: Percent,
    pub hoa: Percent,
    pub utilities: Percent,
    pub maintenance: Percent,
    pub property_management: Percent,
}

/// Total carrying cost per square foot of living area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerSquareFoot {
    pub monthly: Currency,
    pub annual: Currency,
}

/// Monthly and annual carrying costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarryingCostBreakdown {
    pub monthly: CarryingCostPeriod,
    pub annual: CarryingCostPeriod,
    pub insurance_source: InsuranceSource,
}

impl CarryingCostBreakdown {
    /// Add property management (rent × percent) to both periods and refresh the totals
    pub fn with_property_management(mut self, monthly_rent: Currency, management_percent: Percent) -> Self {
        let monthly = quantize_currency(monthly_rent * percent_to_rate(management_percent));
        self.monthly.property_management = monthly;
        self.annual.property_management = monthly * MONTHS_PER_YEAR;
        self.monthly.recompute_total();
        self.annual.recompute_total();
        self
    }

    /// Cost shares of the annual total (all zero when the total is zero)
    pub fn percentages(&self) -> CostPercentages {
        let annual = &self.annual;
        if annual.total.is_zero() {
            return CostPercentages::default();
        }
        let share = |part: Currency| quantize_percent(part / annual.total * ONE_HUNDRED);
        CostPercentages {
            mortgage: share(annual.mortgage),
            property_tax: share(annual.property_tax),
            insurance: share(annual.insurance),
            hoa: share(annual.hoa),
            utilities: share(annual.utilities),
            maintenance: share(annual.maintenance),
            property_management: share(annual.property_management),
        }
    }

    /// Totals per square foot; None without a positive area
    pub fn per_square_foot(&self, square_feet: Option<u32>) -> Option<PerSquareFoot> {
        let area = Decimal::from(square_feet.filter(|sqft| *sqft > 0)?);
        Some(PerSquareFoot {
            monthly: quantize_currency(self.monthly.total / area),
            annual: quantize_currency(self.annual.total / area),
        })
    }

    pub fn data_quality(&self) -> DataQuality {
        DataQuality {
            property_tax: "calculated".to_string(),
            insurance: self.insurance_source.as_str().to_string(),
            maintenance: "industry_standard".to_string(),
            utilities: "user_provided".to_string(),
        }
    }
}

/// Combine mortgage, tax, insurance, HOA, utilities and maintenance into period totals
///
/// Property management starts at zero; the analysis pipeline adds it with
/// [`CarryingCostBreakdown::with_property_management`] once rent is known.
pub fn aggregate(
    assumptions: &Assumptions,
    acquisition: &AcquisitionInput,
    financing: &FinancingTerms,
    expenses: &OperatingExpenseAssumptions,
) -> CarryingCostBreakdown {
    let estimator = CostEstimator::new(assumptions);
    let price = acquisition.purchase_price;

    let mortgage = monthly_payment(financing.loan_amount, financing.interest_rate, financing.loan_term_years);
    let property_tax = estimator.property_tax_annual(price, expenses.property_tax_rate);

    let (insurance, insurance_source) = match expenses.insurance_annual {
        Some(premium) => (quantize_currency(premium), InsuranceSource::UserProvided),
        None => {
            let premium = estimator.insurance_annual(price, acquisition.property_type, acquisition.year_built);
            debug!(
                "Estimated insurance {} for {} built {}",
                premium, acquisition.property_type, acquisition.year_built
            );
            (premium, InsuranceSource::Estimated)
        }
    };

    let maintenance = estimator.maintenance_reserve_annual(
        price,
        acquisition.year_built,
        expenses.maintenance_annual_percent,
    );

    let per_month = |annual: Currency| quantize_currency(annual / MONTHS_PER_YEAR);
    let hoa = quantize_currency(expenses.hoa_monthly);
    let utilities = quantize_currency(expenses.utilities_monthly);

    let mut monthly = CarryingCostPeriod {
        mortgage,
        property_tax: per_month(property_tax),
        insurance: per_month(insurance),
        hoa,
        utilities,
        maintenance: per_month(maintenance),
        property_management: Decimal::ZERO,
        total: Decimal::ZERO,
    };
    monthly.recompute_total();

    let mut annual = CarryingCostPeriod {
        mortgage: mortgage * MONTHS_PER_YEAR,
        property_tax,
        insurance,
        hoa: hoa * MONTHS_PER_YEAR,
        utilities: utilities * MONTHS_PER_YEAR,
        maintenance,
        property_management: Decimal::ZERO,
        total: Decimal::ZERO,
    };
    annual.recompute_total();

    debug!("Carrying costs: monthly {} annual {}", monthly.total, annual.total);

    CarryingCostBreakdown {
        monthly,
        annual,
        insurance_source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;
    use rust_decimal_macros::dec;

    fn acquisition() -> AcquisitionInput {
        AcquisitionInput {
            purchase_price: dec!(350000),
            property_type: PropertyType::SingleFamily,
            year_built: 1995,
            square_feet: Some(1750),
            location: None,
        }
    }

    fn financing() -> FinancingTerms {
        FinancingTerms {
            down_payment: dec!(70000),
            loan_amount: dec!(280000),
            interest_rate: dec!(7.5),
            loan_term_years: 30,
            closing_costs: dec!(8500),
            loan_points: dec!(2800),
        }
    }

    fn expenses() -> OperatingExpenseAssumptions {
        OperatingExpenseAssumptions {
            property_tax_rate: dec!(2.1),
            insurance_annual: Some(dec!(1800)),
            hoa_monthly: Decimal::ZERO,
            utilities_monthly: dec!(200),
            maintenance_annual_percent: dec!(1.0),
            property_management_percent: dec!(10),
            vacancy_rate_percent: dec!(8),
        }
    }

    fn assert_reconciles(period: &CarryingCostPeriod) {
        let sum = period.mortgage
            + period.property_tax
            + period.insurance
            + period.hoa
            + period.utilities
            + period.maintenance
            + period.property_management;
        assert_eq!(period.total, sum);
    }

    #[test]
    fn test_aggregate_monthly_components() {
        let costs = aggregate(&Assumptions::standard(), &acquisition(), &financing(), &expenses());

        assert_eq!(costs.monthly.mortgage, dec!(1957.80));
        assert_eq!(costs.monthly.property_tax, dec!(612.50));
        assert_eq!(costs.monthly.insurance, dec!(150.00));
        assert_eq!(costs.monthly.maintenance, dec!(350.00));
        assert_eq!(costs.monthly.total, dec!(3270.30));
        assert_eq!(costs.insurance_source, InsuranceSource::UserProvided);
        assert_reconciles(&costs.monthly);
        assert_reconciles(&costs.annual);
    }

    #[test]
    fn test_property_management_added_once() {
        let costs = aggregate(&Assumptions::standard(), &acquisition(), &financing(), &expenses())
            .with_property_management(dec!(2500), dec!(10));

        assert_eq!(costs.monthly.property_management, dec!(250.00));
        assert_eq!(costs.annual.property_management, dec!(3000.00));
        assert_eq!(costs.monthly.total, dec!(3520.30));
        assert_eq!(costs.monthly.excluding_management(), dec!(3270.30));
        assert_reconciles(&costs.monthly);
        assert_reconciles(&costs.annual);

        // Applying again replaces rather than accumulates
        let again = costs.clone().with_property_management(dec!(2500), dec!(10));
        assert_eq!(again.monthly.total, costs.monthly.total);
    }

    #[test]
    fn test_estimated_insurance_reconciles() {
        let mut expenses = expenses();
        expenses.insurance_annual = None;
        expenses.hoa_monthly = dec!(33.333);

        let costs = aggregate(&Assumptions::standard(), &acquisition(), &financing(), &expenses);
        assert_eq!(costs.insurance_source, InsuranceSource::Estimated);
        assert_eq!(costs.annual.insurance, dec!(2100.00));
        assert_eq!(costs.monthly.hoa, dec!(33.33));
        assert_reconciles(&costs.monthly);
        assert_reconciles(&costs.annual);
        assert_eq!(costs.data_quality().insurance, "estimated");
    }

    #[test]
    fn test_all_cash_has_no_mortgage() {
        let costs = aggregate(
            &Assumptions::standard(),
            &acquisition(),
            &FinancingTerms::all_cash(dec!(350000)),
            &expenses(),
        );
        assert_eq!(costs.monthly.mortgage, Decimal::ZERO);
        assert_eq!(costs.monthly.total, costs.monthly.operating_expenses());
    }

    #[test]
    fn test_percentages_and_per_square_foot() {
        let costs = aggregate(&Assumptions::standard(), &acquisition(), &financing(), &expenses());

        let shares = costs.percentages();
        assert_eq!(shares.utilities, dec!(6.1));
        assert_eq!(shares.hoa, Decimal::ZERO);

        let per_sqft = costs.per_square_foot(Some(1750)).unwrap();
        assert_eq!(per_sqft.monthly, dec!(1.87));
        assert!(costs.per_square_foot(None).is_none());
        assert!(costs.per_square_foot(Some(0)).is_none());
    }
}
