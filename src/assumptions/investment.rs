//! Investment-level assumptions: depreciation schedule, short-term rental model
//! and the thresholds used by warnings and recommendations

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Straight-line residential depreciation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationAssumptions {
    /// Share of property value attributed to the building (land is not depreciable)
    pub building_ratio: Decimal,
    /// Recovery period in years
    pub recovery_years: Decimal,
}

impl Default for DepreciationAssumptions {
    fn default() -> Self {
        Self {
            building_ratio: dec!(0.80),
            recovery_years: dec!(27.5),
        }
    }
}

/// Vacation / short-term rental operating model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortTermRentalModel {
    /// Nights per booking when the caller does not give one
    pub average_stay_nights: Decimal,
    /// Maintenance uplift for guest turnover
    pub maintenance_multiplier: Decimal,
    /// Peak/off-peak deviation from the average month, in percent
    pub seasonal_swing_percent: Decimal,
}

impl Default for ShortTermRentalModel {
    fn default() -> Self {
        Self {
            average_stay_nights: dec!(3),
            maintenance_multiplier: dec!(1.5),
            seasonal_swing_percent: dec!(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryThresholds {
    /// Lender minimum debt service coverage
    pub min_dscr: Decimal,
    /// Cash-on-cash (%) above which a positive-cash-flow deal is "strong"
    pub strong_coc_percent: Decimal,
    /// Cash-on-cash (%) below which rental economics are poor
    pub poor_coc_percent: Decimal,
    /// Multiplier on the loan reduction needed to break even
    pub down_payment_cushion: Decimal,
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        Self {
            min_dscr: dec!(1.25),
            strong_coc_percent: dec!(8),
            poor_coc_percent: dec!(5),
            down_payment_cushion: dec!(1.10),
        }
    }
}
