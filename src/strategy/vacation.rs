//! Short-term / vacation rental
//!
//! Income is nightly revenue plus cleaning fees on occupied nights. Guest
//! turnover raises maintenance above the long-term reserve, and occupancy
//! replaces the vacancy allowance.

use super::{default_appreciation_rate, default_holding_years, default_tax_bracket};
use crate::assumptions::{Assumptions, ShortTermRentalModel};
use crate::error::{EngineError, EngineResult};
use crate::finance::carrying::CarryingCostBreakdown;
use crate::finance::metrics::cash_on_cash;
use crate::finance::roi::{ProjectionSettings, RoiProjector};
use crate::money::{percent_to_rate, quantize, quantize_currency, Currency, Percent, MONTHS_PER_YEAR};
use crate::property::validate::{require_non_negative, require_percent};
use crate::property::{AcquisitionInput, FinancingTerms};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const NIGHTS_PER_YEAR: Decimal = dec!(365);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRentalAssumptions {
    pub avg_nightly_rate: Currency,

    /// Percent of nights booked, 0-100
    pub avg_occupancy_rate: Percent,

    #[serde(default)]
    pub cleaning_fee_per_stay: Currency,

    /// Nights per booking; the engine default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_stay_nights: Option<Decimal>,

    /// Furniture and setup, added to the cash invested
    #[serde(default)]
    pub furnishing_costs: Currency,

    #[serde(default = "default_holding_years")]
    pub holding_period_years: u32,

    #[serde(default = "default_appreciation_rate")]
    pub appreciation_rate: Percent,

    #[serde(default = "default_tax_bracket")]
    pub tax_bracket: Percent,
}

impl VacationRentalAssumptions {
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("assumptions.vacation_rental.avgNightlyRate", self.avg_nightly_rate)?;
        require_percent("assumptions.vacation_rental.avgOccupancyRate", self.avg_occupancy_rate)?;
        require_non_negative(
            "assumptions.vacation_rental.cleaningFeePerStay",
            self.cleaning_fee_per_stay,
        )?;
        if let Some(nights) = self.avg_stay_nights {
            if nights <= Decimal::ZERO {
                return Err(EngineError::validation(
                    "assumptions.vacation_rental.avgStayNights",
                    "must be greater than zero",
                ));
            }
        }
        require_non_negative("assumptions.vacation_rental.furnishingCosts", self.furnishing_costs)?;
        if self.holding_period_years < 1 {
            return Err(EngineError::validation(
                "assumptions.vacation_rental.holdingPeriodYears",
                "must be at least 1",
            ));
        }
        self.projection_settings().validate()
    }

    pub fn projection_settings(&self) -> ProjectionSettings {
        ProjectionSettings {
            appreciation_rate_percent: self.appreciation_rate,
            tax_bracket_percent: self.tax_bracket,
            projection_years: self.holding_period_years,
        }
    }
}

/// Peak and off-peak monthly income around the average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalityImpact {
    pub peak_monthly_income: Currency,
    pub off_peak_monthly_income: Currency,
    pub swing_percent: Percent,
}

impl SeasonalityImpact {
    fn around(avg_monthly_income: Currency, model: &ShortTermRentalModel) -> Self {
        let swing = percent_to_rate(model.seasonal_swing_percent);
        Self {
            peak_monthly_income: quantize_currency(avg_monthly_income * (Decimal::ONE + swing)),
            off_peak_monthly_income: quantize_currency(avg_monthly_income * (Decimal::ONE - swing)),
            swing_percent: model.seasonal_swing_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRentalResult {
    pub total_investment: Currency,
    pub occupied_nights: Decimal,
    pub number_of_stays: Decimal,
    pub annual_income: Currency,
    pub avg_monthly_income: Currency,
    /// Debt service plus operating expenses, per month
    pub avg_monthly_expenses: Currency,
    pub net_cash_flow_year1: Currency,
    pub coc_return: Percent,
    pub roi: Percent,
    pub annualized_return: Percent,
    pub seasonality_impact: SeasonalityImpact,
}

/// Evaluate a short-term rental over its holding period
pub fn evaluate(
    engine_assumptions: &Assumptions,
    acquisition: &AcquisitionInput,
    financing: &FinancingTerms,
    carrying_costs: &CarryingCostBreakdown,
    assumptions: &VacationRentalAssumptions,
) -> EngineResult<VacationRentalResult> {
    let model = &engine_assumptions.short_term_rental;

    let occupied_nights = NIGHTS_PER_YEAR * percent_to_rate(assumptions.avg_occupancy_rate);
    let stay_nights = assumptions.avg_stay_nights.unwrap_or(model.average_stay_nights);
    let number_of_stays = if stay_nights > Decimal::ZERO {
        occupied_nights / stay_nights
    } else {
        Decimal::ZERO
    };

    let annual_income = quantize_currency(
        occupied_nights * assumptions.avg_nightly_rate + number_of_stays * assumptions.cleaning_fee_per_stay,
    );

    let annual = &carrying_costs.annual;
    let maintenance = quantize_currency(annual.maintenance * model.maintenance_multiplier);
    let operating_expenses = annual.property_tax + annual.insurance + annual.hoa + annual.utilities + maintenance;
    let debt_service = annual.mortgage;
    let net_cash_flow = annual_income - debt_service - operating_expenses;

    debug!(
        "Vacation rental: {} nights, income {}, expenses {}",
        occupied_nights,
        annual_income,
        debt_service + operating_expenses
    );

    let total_investment = financing.total_cash_invested() + assumptions.furnishing_costs;
    let projection = RoiProjector::new(engine_assumptions).project(
        acquisition,
        financing,
        total_investment,
        net_cash_flow,
        &assumptions.projection_settings(),
    )?;

    let avg_monthly_income = quantize_currency(annual_income / MONTHS_PER_YEAR);

    Ok(VacationRentalResult {
        total_investment: quantize_currency(total_investment),
        occupied_nights: quantize(occupied_nights, 2),
        number_of_stays: quantize(number_of_stays, 1),
        annual_income,
        avg_monthly_income,
        avg_monthly_expenses: quantize_currency((debt_service + operating_expenses) / MONTHS_PER_YEAR),
        net_cash_flow_year1: net_cash_flow,
        coc_return: cash_on_cash(net_cash_flow, total_investment),
        roi: projection.projected.roi,
        annualized_return: projection.projected.annualized_roi,
        seasonality_impact: SeasonalityImpact::around(avg_monthly_income, model),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::carrying::aggregate;
    use crate::property::{OperatingExpenseAssumptions, PropertyType};

    fn acquisition() -> AcquisitionInput {
        AcquisitionInput {
            purchase_price: dec!(300000),
            property_type: PropertyType::Condo,
            year_built: 2010,
            square_feet: Some(1200),
            location: None,
        }
    }

    fn financing() -> FinancingTerms {
        FinancingTerms {
            down_payment: dec!(60000),
            loan_amount: dec!(240000),
            interest_rate: dec!(6.5),
            loan_term_years: 30,
            closing_costs: dec!(5000),
            loan_points: Decimal::ZERO,
        }
    }

    fn expenses() -> OperatingExpenseAssumptions {
        OperatingExpenseAssumptions {
            property_tax_rate: dec!(2.1),
            insurance_annual: Some(dec!(1200)),
            hoa_monthly: dec!(300),
            utilities_monthly: dec!(150),
            maintenance_annual_percent: dec!(0.5),
            property_management_percent: dec!(10),
            vacancy_rate_percent: dec!(8),
        }
    }

    fn assumptions() -> VacationRentalAssumptions {
        serde_json::from_value(serde_json::json!({
            "avgNightlyRate": 200,
            "avgOccupancyRate": 65,
            "cleaningFeePerStay": 150
        }))
        .unwrap()
    }

    #[test]
    fn test_vacation_income_and_expenses() {
        let engine = Assumptions::standard();
        let carrying = aggregate(&engine, &acquisition(), &financing(), &expenses());
        let result = evaluate(&engine, &acquisition(), &financing(), &carrying, &assumptions()).unwrap();

        assert_eq!(result.occupied_nights, dec!(237.25));
        assert_eq!(result.number_of_stays, dec!(79.1));
        assert_eq!(result.annual_income, dec!(59312.50));
        assert_eq!(result.avg_monthly_income, dec!(4942.71));

        // Maintenance 1500 × 1.5 on top of tax, insurance, HOA and utilities
        let expected_net = dec!(59312.50) - carrying.annual.mortgage - dec!(15150.00);
        assert_eq!(result.net_cash_flow_year1, expected_net);
        assert_eq!(result.total_investment, dec!(65000));
    }

    #[test]
    fn test_seasonality_band() {
        let engine = Assumptions::standard();
        let carrying = aggregate(&engine, &acquisition(), &financing(), &expenses());
        let result = evaluate(&engine, &acquisition(), &financing(), &carrying, &assumptions()).unwrap();

        let seasonality = &result.seasonality_impact;
        assert_eq!(seasonality.peak_monthly_income, dec!(6425.52));
        assert_eq!(seasonality.off_peak_monthly_income, dec!(3459.90));
        assert_eq!(seasonality.swing_percent, dec!(30));
    }

    #[test]
    fn test_longer_stays_reduce_cleaning_income() {
        let engine = Assumptions::standard();
        let carrying = aggregate(&engine, &acquisition(), &financing(), &expenses());

        let mut weekly = assumptions();
        weekly.avg_stay_nights = Some(dec!(7));
        let short = evaluate(&engine, &acquisition(), &financing(), &carrying, &assumptions()).unwrap();
        let long = evaluate(&engine, &acquisition(), &financing(), &carrying, &weekly).unwrap();
        assert!(long.annual_income < short.annual_income);
    }

    #[test]
    fn test_occupancy_bounds() {
        let mut invalid = assumptions();
        invalid.avg_occupancy_rate = dec!(101);
        assert_eq!(
            invalid.validate().unwrap_err().field(),
            Some("assumptions.vacation_rental.avgOccupancyRate")
        );

        let mut invalid = assumptions();
        invalid.avg_stay_nights = Some(Decimal::ZERO);
        assert!(invalid.validate().is_err());
    }
}
