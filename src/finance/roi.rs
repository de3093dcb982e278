//! Multi-year return on investment
//!
//! Combines cash flow, principal paydown, compound appreciation and tax
//! benefits over a holding period. Cash flow is held constant across years;
//! paydown, appreciation and tax benefits follow their true year-by-year paths.

use super::irr::irr;
use super::mortgage::principal_paid_over_years;
use super::tax::TaxBenefitEstimator;
use crate::assumptions::Assumptions;
use crate::error::{EngineError, EngineResult};
use crate::money::{percent_to_rate, quantize_currency, quantize_percent, quantize_ratio, ratio_to_percent, Currency, Percent, ONE_HUNDRED};
use crate::property::validate::require_percent;
use crate::property::{AcquisitionInput, FinancingTerms};
use log::debug;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Longest holding period the projector accepts
pub const MAX_PROJECTION_YEARS: u32 = 50;

fn default_appreciation_rate() -> Percent {
    dec!(3.0)
}

fn default_tax_bracket() -> Percent {
    dec!(24)
}

fn default_projection_years() -> u32 {
    5
}

/// Growth and tax inputs for a projection, always passed explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSettings {
    /// Annual appreciation in percent
    #[serde(default = "default_appreciation_rate")]
    pub appreciation_rate_percent: Percent,

    /// Marginal income tax bracket in percent
    #[serde(default = "default_tax_bracket")]
    pub tax_bracket_percent: Percent,

    #[serde(default = "default_projection_years")]
    pub projection_years: u32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            appreciation_rate_percent: default_appreciation_rate(),
            tax_bracket_percent: default_tax_bracket(),
            projection_years: default_projection_years(),
        }
    }
}

impl ProjectionSettings {
    pub fn validate(&self) -> EngineResult<()> {
        if self.appreciation_rate_percent <= -ONE_HUNDRED || self.appreciation_rate_percent > ONE_HUNDRED {
            return Err(EngineError::validation(
                "projection.appreciationRatePercent",
                "must be greater than -100 and at most 100",
            ));
        }
        require_percent("projection.taxBracketPercent", self.tax_bracket_percent)?;
        if self.projection_years < 1 || self.projection_years > MAX_PROJECTION_YEARS {
            return Err(EngineError::validation(
                "projection.projectionYears",
                format!("must be between 1 and {}", MAX_PROJECTION_YEARS),
            ));
        }
        Ok(())
    }
}

/// Compound appreciation gained over `years`: value·((1 + rate)^years − 1)
///
/// `Overflow` when the appreciated value leaves the decimal range.
pub fn appreciation(value: Currency, annual_rate_percent: Percent, years: u32) -> EngineResult<Currency> {
    let out_of_range = || {
        EngineError::overflow(format!(
            "appreciation of {} at {}% over {} years",
            value, annual_rate_percent, years
        ))
    };
    let growth = (Decimal::ONE + percent_to_rate(annual_rate_percent))
        .checked_powi(years as i64)
        .ok_or_else(out_of_range)?;
    let gain = value
        .checked_mul(growth - Decimal::ONE)
        .ok_or_else(out_of_range)?;
    Ok(quantize_currency(gain))
}

/// Sum of `parts`, or `Overflow` naming `context`
fn checked_sum(context: &str, parts: &[Decimal]) -> EngineResult<Decimal> {
    parts
        .iter()
        .try_fold(Decimal::ZERO, |acc, part| acc.checked_add(*part))
        .ok_or_else(|| EngineError::overflow(context.to_string()))
}

/// `gain` as a 1 dp percentage of `invested`; 0 when nothing was invested
fn return_percent(gain: Currency, invested: Currency, context: &str) -> EngineResult<Percent> {
    if invested.is_zero() {
        return Ok(Decimal::ZERO);
    }
    gain.checked_div(invested)
        .map(quantize_ratio)
        .and_then(|r| r.checked_mul(ONE_HUNDRED))
        .map(quantize_percent)
        .ok_or_else(|| EngineError::overflow(context.to_string()))
}

/// Convert a holding-period return to an annual rate: (1 + roi)^(1/years) − 1
///
/// `years` may be fractional (a six-month flip is 0.5). A total loss or worse
/// annualizes to −100%.
pub fn annualized_return(roi_percent: Percent, years: Decimal) -> Percent {
    if years <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if roi_percent <= -ONE_HUNDRED {
        return -ONE_HUNDRED;
    }

    let growth = Decimal::ONE + percent_to_rate(roi_percent);
    let annual = growth
        .checked_ln()
        .and_then(|ln| (ln / years).checked_exp())
        .map(|g| g - Decimal::ONE)
        .unwrap_or(Decimal::ZERO);

    quantize_percent(annual * ONE_HUNDRED)
}

/// First-year return and its parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOneReturn {
    pub roi: Percent,
    pub total_return: Currency,
    pub cash_flow: Currency,
    pub principal_paydown: Currency,
    pub appreciation: Currency,
    pub tax_benefits: Currency,
}

/// Totals over the whole holding period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiYearReturn {
    pub years: u32,
    pub roi: Percent,
    pub annualized_roi: Percent,
    pub total_return: Currency,
    pub total_cash_flow: Currency,
    pub total_principal_paydown: Currency,
    pub total_appreciation: Currency,
    pub total_tax_benefits: Currency,
    /// Equity if sold at the end of the hold (value less remaining loan)
    pub ending_equity: Currency,
    /// IRR of the hold in percent; absent when the cash flows have no rate of return
    pub irr: Option<Percent>,
}

/// Share of year-1 total return from each source, in percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnComponents {
    pub cash_flow_return: Percent,
    pub appreciation_return: Percent,
    pub equity_buildup_return: Percent,
    pub tax_benefits_return: Percent,
}

impl ReturnComponents {
    /// Shares of `total`, adjusted so they sum to exactly 100 after rounding
    ///
    /// All zero unless the total is positive.
    fn of_total(
        total: Currency,
        cash_flow: Currency,
        appreciation: Currency,
        principal_paydown: Currency,
        tax_benefits: Currency,
    ) -> Self {
        if total <= Decimal::ZERO {
            return Self::default();
        }

        let share = |part: Currency| quantize_percent(part / total * ONE_HUNDRED);
        let mut shares = [
            share(cash_flow),
            share(appreciation),
            share(principal_paydown),
            share(tax_benefits),
        ];

        // Rounding residue goes to the largest share
        let residue = ONE_HUNDRED - shares.iter().copied().sum::<Decimal>();
        if !residue.is_zero() {
            let mut largest = 0;
            for (i, value) in shares.iter().enumerate() {
                if *value > shares[largest] {
                    largest = i;
                }
            }
            shares[largest] += residue;
        }

        Self {
            cash_flow_return: shares[0],
            appreciation_return: shares[1],
            equity_buildup_return: shares[2],
            tax_benefits_return: shares[3],
        }
    }

    pub fn sum(&self) -> Percent {
        self.cash_flow_return + self.appreciation_return + self.equity_buildup_return + self.tax_benefits_return
    }
}

/// One year of the holding period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReturnRow {
    pub year: u32,
    pub cash_flow: Currency,
    pub principal_paydown: Currency,
    pub appreciation: Currency,
    pub tax_benefits: Currency,
    pub total_return: Currency,
    pub cumulative_return: Currency,
    /// Value at the end of the year
    pub property_value: Currency,
    /// Loan balance at the end of the year
    pub loan_balance: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiProjection {
    pub year1: YearOneReturn,
    #[serde(rename = "yearNProjected")]
    pub projected: MultiYearReturn,
    pub components: ReturnComponents,
    pub breakdown: Vec<YearlyReturnRow>,
}

/// Projects returns over a holding period
pub struct RoiProjector<'a> {
    tax: TaxBenefitEstimator<'a>,
}

impl<'a> RoiProjector<'a> {
    pub fn new(assumptions: &'a Assumptions) -> Self {
        Self {
            tax: TaxBenefitEstimator::new(&assumptions.depreciation),
        }
    }

    pub fn project(
        &self,
        acquisition: &AcquisitionInput,
        financing: &FinancingTerms,
        total_cash_invested: Currency,
        annual_cash_flow: Currency,
        settings: &ProjectionSettings,
    ) -> EngineResult<RoiProjection> {
        let price = acquisition.purchase_price;
        let years = settings.projection_years.max(1);
        let cash_flow = quantize_currency(annual_cash_flow);

        let paid_through = |year: u32| {
            principal_paid_over_years(
                financing.loan_amount,
                financing.interest_rate,
                financing.loan_term_years,
                year,
            )
        };
        let appreciated_through = |year: u32| appreciation(price, settings.appreciation_rate_percent, year);

        let mut breakdown = Vec::with_capacity(years as usize);
        let mut cumulative = Decimal::ZERO;
        let mut total_tax_benefits = Decimal::ZERO;
        let mut irr_flows = vec![-total_cash_invested];
        let mut appreciated_before = Decimal::ZERO;

        for year in 1..=years {
            let paid = paid_through(year);
            let appreciated = appreciated_through(year)?;
            let principal_paydown = paid - paid_through(year - 1);
            let appreciation_gain = appreciated - appreciated_before;
            appreciated_before = appreciated;
            let tax_benefits = self.tax.benefit_for_year(
                financing,
                price,
                settings.tax_bracket_percent,
                year,
            );

            let context = format!("year {} return", year);
            let total_return = checked_sum(&context, &[cash_flow, principal_paydown, appreciation_gain, tax_benefits])?;
            cumulative = checked_sum(&context, &[cumulative, total_return])?;
            total_tax_benefits = checked_sum(&context, &[total_tax_benefits, tax_benefits])?;

            let property_value = checked_sum(&format!("year {} property value", year), &[price, appreciated])?;
            let loan_balance = (financing.loan_amount - paid).max(Decimal::ZERO);

            let mut flow = checked_sum(&context, &[cash_flow, tax_benefits])?;
            if year == years {
                flow = checked_sum(&context, &[flow, property_value - loan_balance])?;
            }
            irr_flows.push(flow);

            breakdown.push(YearlyReturnRow {
                year,
                cash_flow,
                principal_paydown,
                appreciation: appreciation_gain,
                tax_benefits,
                total_return,
                cumulative_return: cumulative,
                property_value,
                loan_balance,
            });
        }

        let first = &breakdown[0];
        let year1_total = first.total_return;
        let year1 = YearOneReturn {
            roi: return_percent(year1_total, total_cash_invested, "year 1 ROI")?,
            total_return: year1_total,
            cash_flow,
            principal_paydown: first.principal_paydown,
            appreciation: first.appreciation,
            tax_benefits: first.tax_benefits,
        };

        let components = ReturnComponents::of_total(
            year1_total,
            cash_flow,
            first.appreciation,
            first.principal_paydown,
            first.tax_benefits,
        );

        let total_principal_paydown = paid_through(years);
        let total_appreciation = appreciated_before;
        let total_cash_flow = cash_flow
            .checked_mul(Decimal::from(years))
            .ok_or_else(|| EngineError::overflow("total cash flow"))?;
        let total_return = checked_sum(
            "total return",
            &[total_cash_flow, total_principal_paydown, total_appreciation, total_tax_benefits],
        )?;
        let roi = return_percent(total_return, total_cash_invested, "holding-period ROI")?;
        let ending_equity = breakdown
            .last()
            .map(|row| row.property_value - row.loan_balance)
            .unwrap_or(Decimal::ZERO);

        let hold_irr = if total_cash_invested > Decimal::ZERO {
            match irr(&irr_flows) {
                Ok(rate) => Some(ratio_to_percent(rate)),
                Err(e) => {
                    debug!("No IRR for {}-year hold: {}", years, e);
                    None
                }
            }
        } else {
            None
        };

        let projected = MultiYearReturn {
            years,
            roi,
            annualized_roi: annualized_return(roi, Decimal::from(years)),
            total_return,
            total_cash_flow,
            total_principal_paydown,
            total_appreciation,
            total_tax_benefits,
            ending_equity,
            irr: hold_irr,
        };

        Ok(RoiProjection {
            year1,
            projected,
            components,
            breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyType;

    fn acquisition() -> AcquisitionInput {
        AcquisitionInput {
            purchase_price: dec!(350000),
            property_type: PropertyType::SingleFamily,
            year_built: 1995,
            square_feet: None,
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

    #[test]
    fn test_appreciation() {
        let gain = appreciation(dec!(350000), dec!(3.0), 5).unwrap();
        assert!((gain - dec!(55745.90)).abs() <= dec!(10));
        assert_eq!(gain, dec!(55745.93));
        assert_eq!(appreciation(dec!(350000), dec!(3.0), 0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_appreciation_out_of_range() {
        // 2^50 growth on 1e14 exceeds the decimal range
        let err = appreciation(dec!(100000000000000), dec!(100), 50).unwrap_err();
        assert!(matches!(err, EngineError::Overflow { .. }));
        assert!(appreciation(dec!(100000000000000), dec!(100), 40).is_ok());
    }

    #[test]
    fn test_projection_overflow_is_reported() {
        let assumptions = Assumptions::standard();
        let projector = RoiProjector::new(&assumptions);
        let mut acquisition = acquisition();
        acquisition.purchase_price = dec!(100000000000000);
        let settings = ProjectionSettings {
            appreciation_rate_percent: dec!(100),
            projection_years: 50,
            ..ProjectionSettings::default()
        };

        let result = projector.project(&acquisition, &financing(), dec!(81300), dec!(5000), &settings);
        assert!(matches!(result, Err(EngineError::Overflow { .. })));
    }

    #[test]
    fn test_annualized_return() {
        assert_eq!(annualized_return(dec!(16.9), dec!(0.5)), dec!(36.7));
        assert_eq!(annualized_return(dec!(21), dec!(2)), dec!(10.0));
        assert_eq!(annualized_return(dec!(-100), dec!(3)), dec!(-100));
        assert_eq!(annualized_return(dec!(-150), dec!(3)), dec!(-100));
        assert_eq!(annualized_return(dec!(12), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_year1_components_sum_to_hundred() {
        let assumptions = Assumptions::standard();
        let projector = RoiProjector::new(&assumptions);
        let projection = projector.project(
            &acquisition(),
            &financing(),
            dec!(81300),
            dec!(5000),
            &ProjectionSettings::default(),
        )
        .unwrap();

        let year1 = &projection.year1;
        assert_eq!(year1.principal_paydown, dec!(2581.13));
        assert_eq!(year1.appreciation, dec!(10500.00));
        assert_eq!(year1.tax_benefits, dec!(7462.63));
        assert_eq!(year1.total_return, dec!(25543.76));
        assert_eq!(year1.roi, dec!(31.4));

        let components = &projection.components;
        assert_eq!(components.cash_flow_return, dec!(19.6));
        assert_eq!(components.appreciation_return, dec!(41.1));
        assert_eq!(components.equity_buildup_return, dec!(10.1));
        assert_eq!(components.tax_benefits_return, dec!(29.2));
        assert_eq!(components.sum(), dec!(100.0));
    }

    #[test]
    fn test_multi_year_totals() {
        let assumptions = Assumptions::standard();
        let projector = RoiProjector::new(&assumptions);
        let projection = projector.project(
            &acquisition(),
            &financing(),
            dec!(81300),
            dec!(5000),
            &ProjectionSettings::default(),
        )
        .unwrap();

        let five = &projection.projected;
        assert_eq!(five.years, 5);
        assert_eq!(five.total_cash_flow, dec!(25000.00));
        assert_eq!(five.total_appreciation, dec!(55745.93));
        assert_eq!(five.total_principal_paydown, dec!(15071.13));

        // Tax benefits are summed year by year, and decline as interest falls
        let summed: Decimal = projection.breakdown.iter().map(|row| row.tax_benefits).sum();
        assert_eq!(five.total_tax_benefits, summed);
        assert!(five.total_tax_benefits < projection.year1.tax_benefits * dec!(5));

        assert_eq!(projection.breakdown.len(), 5);
        assert_eq!(projection.breakdown[4].cumulative_return, five.total_return);
        assert!(five.irr.is_some());
        assert!(five.annualized_roi > Decimal::ZERO);
    }

    #[test]
    fn test_zero_cash_invested_is_guarded() {
        let assumptions = Assumptions::standard();
        let projector = RoiProjector::new(&assumptions);
        let projection = projector.project(
            &acquisition(),
            &financing(),
            Decimal::ZERO,
            dec!(5000),
            &ProjectionSettings::default(),
        )
        .unwrap();
        assert_eq!(projection.year1.roi, Decimal::ZERO);
        assert_eq!(projection.projected.roi, Decimal::ZERO);
        assert_eq!(projection.projected.irr, None);
    }

    #[test]
    fn test_negative_total_has_zero_components() {
        let assumptions = Assumptions::standard();
        let projector = RoiProjector::new(&assumptions);
        let projection = projector.project(
            &acquisition(),
            &financing(),
            dec!(81300),
            dec!(-40000),
            &ProjectionSettings::default(),
        )
        .unwrap();
        assert!(projection.year1.total_return < Decimal::ZERO);
        assert_eq!(projection.components, ReturnComponents::default());
    }

    #[test]
    fn test_settings_validation() {
        assert!(ProjectionSettings::default().validate().is_ok());

        let settings = ProjectionSettings {
            projection_years: 0,
            ..ProjectionSettings::default()
        };
        assert_eq!(settings.validate().unwrap_err().field(), Some("projection.projectionYears"));

        let settings = ProjectionSettings {
            tax_bracket_percent: dec!(120),
            ..ProjectionSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
