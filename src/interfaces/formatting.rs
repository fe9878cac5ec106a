//! Display formatting for calculator output.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const MILLION: Decimal = dec!(1000000);
const THOUSAND: Decimal = dec!(1000);

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Abbreviated currency: `$1.25M`, `$950K`, `$420`
pub fn format_currency(value: Decimal) -> String {
    if value >= MILLION {
        format!("${:.2}M", round_half_up(value / MILLION, 2))
    } else if value >= THOUSAND {
        format!("${}K", round_half_up(value / THOUSAND, 0))
    } else {
        format!("${}", round_half_up(value, 0))
    }
}

/// Whole percent, e.g. `864%`
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", round_half_up(value, 0))
}

/// A fractional rate as a percent without trailing zeros, e.g. `0.015` as `1.5%`
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}
