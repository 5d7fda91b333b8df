use num_traits::ToPrimitive;
use separator::Separatable;

use crate::types::{Date, DateTime, Decimal};

pub mod table;

pub fn format_date(date: Date) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_date_time(time: DateTime) -> String {
    time.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Formats volumes with thousands separators keeping up to three fractional digits.
pub fn format_decimal(value: Decimal) -> String {
    let value = value.round_dp(3).normalize();

    match value.to_i64() {
        Some(integer) if value.fract().is_zero() => integer.separated_string(),
        _ => value.to_f64().map(|value| value.separated_string()).unwrap_or_else(|| value.to_string()),
    }
}
