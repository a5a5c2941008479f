//! Display formatting for receipt cells.
//!
//! This is the only place amounts are rounded: two decimal places,
//! midpoints away from zero.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to cents.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as currency, e.g. `$1234.50` or `-$3.00`.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = round_money(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

/// Formats an hourly rate, e.g. `$22.50/hr`.
pub fn format_rate(rate: Decimal, symbol: &str) -> String {
    format!("{}/hr", format_money(rate, symbol))
}

/// Formats hours to two decimal places.
pub fn format_hours(hours: Decimal) -> String {
    format!("{:.2}", round_money(hours))
}

/// Formats a wall-clock timestamp to the minute.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Formats a worked interval, collapsing the date when it starts and ends on the same day.
pub fn format_period(start: NaiveDateTime, end: NaiveDateTime) -> String {
    if start.date() == end.date() {
        format!(
            "{} {} to {}",
            start.format("%Y-%m-%d"),
            start.format("%H:%M"),
            end.format("%H:%M")
        )
    } else {
        format!("{} to {}", format_timestamp(start), format_timestamp(end))
    }
}
