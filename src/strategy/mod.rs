//! Investment strategy models and the comparator that ranks them
//!
//! Three independent models share one set of carrying costs:
//! - `flip`: buy, renovate, sell after a holding period in months
//! - `rental`: long-term buy-and-hold, projected over N years
//! - `vacation`: short-term rental driven by nightly rate and occupancy

mod flip;
mod rental;
mod vacation;
mod compare;

pub use compare::{StrategyComparator, StrategyComparison};
pub use flip::{FlipAssumptions, FlipResult};
pub use rental::{RentalAssumptions, RentalResult};
pub use vacation::{SeasonalityImpact, VacationRentalAssumptions, VacationRentalResult};

use crate::money::Percent;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn default_holding_years() -> u32 {
    5
}

fn default_appreciation_rate() -> Percent {
    dec!(3.0)
}

fn default_tax_bracket() -> Percent {
    dec!(24)
}

/// Strategy identifiers as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Flip,
    Rental,
    VacationRental,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [StrategyKind::Flip, StrategyKind::Rental, StrategyKind::VacationRental];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Flip => "flip",
            StrategyKind::Rental => "rental",
            StrategyKind::VacationRental => "vacation_rental",
        }
    }

    /// Human-readable name for reasoning text
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Flip => "Fix-and-flip",
            StrategyKind::Rental => "Long-term rental",
            StrategyKind::VacationRental => "Vacation rental",
        }
    }

    /// Tie-break rank when returns are equal (higher wins)
    pub fn priority(&self) -> u8 {
        match self {
            StrategyKind::Rental => 3,
            StrategyKind::Flip => 2,
            StrategyKind::VacationRental => 1,
        }
    }

    /// Qualitative risks of the strategy
    pub fn risk_factors(&self) -> Vec<String> {
        let factors: &[&str] = match self {
            StrategyKind::Flip => &[
                "Renovation costs may exceed budget",
                "Market conditions may change during the holding period",
                "Sale may take longer than planned, adding holding costs",
                "Profit is taxed as short-term gain",
            ],
            StrategyKind::Rental => &[
                "Extended vacancies reduce cash flow",
                "Tenant damage and turnover costs",
                "Major repairs such as roof or HVAC replacement",
                "Rent growth may lag expenses",
            ],
            StrategyKind::VacationRental => &[
                "Seasonal demand causes income swings",
                "Local short-term rental regulations may restrict operation",
                "Higher wear, cleaning and management effort",
                "Competition from nearby listings pressures nightly rates",
            ],
        };
        factors.iter().map(|f| f.to_string()).collect()
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "flip" => Ok(StrategyKind::Flip),
            "rental" => Ok(StrategyKind::Rental),
            "vacation_rental" => Ok(StrategyKind::VacationRental),
            other => Err(format!("Unknown strategy: {}", other)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-strategy assumption blocks; each requested strategy needs its own
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyAssumptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip: Option<FlipAssumptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental: Option<RentalAssumptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacation_rental: Option<VacationRentalAssumptions>,
}

/// Computed results, present only for the requested strategies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip: Option<FlipResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental: Option<RentalResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacation_rental: Option<VacationRentalResult>,
}

impl StrategyResults {
    /// (kind, roi, annualized return) for every computed strategy
    pub fn returns(&self) -> Vec<(StrategyKind, Percent, Percent)> {
        let mut returns = Vec::new();
        if let Some(flip) = &self.flip {
            returns.push((StrategyKind::Flip, flip.roi, flip.annualized_return));
        }
        if let Some(rental) = &self.rental {
            returns.push((StrategyKind::Rental, rental.roi, rental.annualized_return));
        }
        if let Some(vacation) = &self.vacation_rental {
            returns.push((StrategyKind::VacationRental, vacation.roi, vacation.annualized_return));
        }
        returns
    }

    pub fn is_empty(&self) -> bool {
        self.flip.is_none() && self.rental.is_none() && self.vacation_rental.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub best_strategy: StrategyKind,
    pub reasoning: String,
    pub risk_factors: Vec<String>,
}

impl Recommendation {
    /// Pick the strategy with the highest ROI
    ///
    /// Ties go to the higher annualized return, then to rental over flip over
    /// vacation rental. None when nothing was computed.
    pub fn select(results: &StrategyResults) -> Option<Self> {
        let (kind, roi, annualized) = results
            .returns()
            .into_iter()
            .max_by(|a, b| {
                a.1.cmp(&b.1)
                    .then(a.2.cmp(&b.2))
                    .then(a.0.priority().cmp(&b.0.priority()))
            })?;

        Some(Self {
            best_strategy: kind,
            reasoning: format!(
                "{} offers the highest return on investment at {}% ({}% annualized).",
                kind.label(),
                roi,
                annualized
            ),
            risk_factors: kind.risk_factors(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>().unwrap(), kind);
            assert!(!kind.risk_factors().is_empty());
        }
        assert_eq!(
            serde_json::to_string(&StrategyKind::VacationRental).unwrap(),
            "\"vacation_rental\""
        );
        assert!("buy-and-hold".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_priority_order() {
        assert!(StrategyKind::Rental.priority() > StrategyKind::Flip.priority());
        assert!(StrategyKind::Flip.priority() > StrategyKind::VacationRental.priority());
    }

    #[test]
    fn test_select_empty() {
        assert!(Recommendation::select(&StrategyResults::default()).is_none());
    }
}
