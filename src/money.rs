//! Decimal helpers shared by every calculator
//!
//! Currency values are quantized to cents, percentages to one decimal place and
//! intermediate ratios to four decimal places. Rounding is half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Currency amount (dollars)
pub type Currency = Decimal;

/// Percentage expressed in points (7.5 means 7.5%)
pub type Percent = Decimal;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);
pub const ONE_HUNDRED: Decimal = dec!(100);

/// Round to `places` decimal places, half away from zero
pub fn quantize(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to cents
pub fn quantize_currency(value: Decimal) -> Currency {
    quantize(value, 2)
}

/// Round a percentage to one decimal place
pub fn quantize_percent(value: Decimal) -> Percent {
    quantize(value, 1)
}

/// Round a raw ratio to four decimal places
pub fn quantize_ratio(value: Decimal) -> Decimal {
    quantize(value, 4)
}

/// 7.5 -> 0.075
pub fn percent_to_rate(percent: Percent) -> Decimal {
    percent / ONE_HUNDRED
}

/// Ratio (kept at 4 dp) expressed as a 1 dp percentage: 0.08126 -> 8.1
pub fn ratio_to_percent(ratio: Decimal) -> Percent {
    quantize_percent(quantize_ratio(ratio) * ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_rounds_half_up() {
        assert_eq!(quantize_currency(dec!(100.125)), dec!(100.13));
        assert_eq!(quantize_currency(dec!(100.456)), dec!(100.46));
    }

    #[test]
    fn test_negative_rounds_away_from_zero() {
        assert_eq!(quantize_currency(dec!(-100.456)), dec!(-100.46));
        assert_eq!(quantize_currency(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn test_custom_places() {
        assert_eq!(quantize(dec!(100.456789), 4), dec!(100.4568));
        assert_eq!(quantize_percent(dec!(16.95)), dec!(17.0));
    }

    #[test]
    fn test_ratio_to_percent_uses_four_dp_first() {
        // 0.08125 -> 0.0813 -> 8.13 -> 8.1
        assert_eq!(ratio_to_percent(dec!(0.08125)), dec!(8.1));
        assert_eq!(percent_to_rate(dec!(7.5)), dec!(0.075));
    }
}
