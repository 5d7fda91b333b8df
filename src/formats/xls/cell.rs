//! Tolerant cell coercion.
//!
//! Report cells routinely contain stray annotations ("12,5 т"), formulas stored as text, merged
//! blanks and error values, so every conversion here resolves to a safe default instead of failing.

use std::borrow::Cow;
use std::str::FromStr;

use lazy_static::lazy_static;
use num_traits::{FromPrimitive, ToPrimitive};
use regex::{Captures, Regex};

use crate::time::{self, Date, DateTime};
use crate::types::Decimal;

pub use calamine::Data as Cell;

pub const FORMULA_SIGIL: char = '=';

pub fn get_string_cell(cell: Option<&Cell>) -> Option<&str> {
    match cell {
        Some(Cell::String(value)) => Some(value.trim()),
        _ => None,
    }
}

pub fn is_empty_cell(cell: Option<&Cell>) -> bool {
    match cell {
        None | Some(Cell::Empty) => true,
        Some(Cell::String(value)) => value.trim().is_empty(),
        _ => false,
    }
}

pub fn is_formula(cell: Option<&Cell>) -> bool {
    get_string_cell(cell).is_some_and(|value| value.starts_with(FORMULA_SIGIL))
}

pub fn as_text(cell: Option<&Cell>) -> String {
    let cell = match cell {
        Some(cell) => cell,
        None => return String::new(),
    };

    match cell {
        Cell::String(value) => value.trim().to_owned(),
        Cell::Int(value) => value.to_string(),
        Cell::Float(value) => format_float(*value),
        Cell::Bool(value) => value.to_string(),
        Cell::DateTime(value) => match value.as_datetime() {
            Some(date_time) if date_time.time() == chrono::NaiveTime::MIN => {
                date_time.format("%d.%m.%Y").to_string()
            },
            Some(date_time) => date_time.format("%d.%m.%Y %H:%M:%S").to_string(),
            None => format_float(value.as_f64()),
        },
        Cell::DateTimeIso(value) | Cell::DurationIso(value) => value.trim().to_owned(),
        Cell::Error(_) | Cell::Empty => String::new(),
    }
}

pub fn as_integer(cell: Option<&Cell>) -> i64 {
    match cell {
        Some(Cell::Int(value)) => *value,
        Some(Cell::Float(value)) if value.is_finite() => value.trunc() as i64,
        Some(Cell::String(value)) => parse_number(value)
            .and_then(|value| value.trunc().to_i64())
            .unwrap_or_default(),
        _ => 0,
    }
}

pub fn as_decimal(cell: Option<&Cell>) -> Decimal {
    match cell {
        Some(Cell::Int(value)) => Decimal::from(*value),
        Some(Cell::Float(value)) => Decimal::from_f64(*value).map(|value| value.normalize()).unwrap_or_default(),
        Some(Cell::String(value)) => parse_number(value).unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

pub fn as_date(cell: Option<&Cell>) -> Option<Date> {
    as_date_time(cell).map(|date_time| date_time.date())
}

pub fn as_date_time(cell: Option<&Cell>) -> Option<DateTime> {
    match cell? {
        Cell::DateTime(value) => value.as_datetime(),
        Cell::DateTimeIso(value) => {
            let value = value.trim().trim_end_matches('Z');
            time::parse_date_time(value, "%Y-%m-%dT%H:%M:%S").ok()
                .or_else(|| time::parse_report_date(value))
        },
        Cell::String(value) => time::parse_report_date(value),
        _ => None,
    }
}

/// Extracts the first signed decimal number from free text. Formulas are never evaluated.
pub fn parse_number(value: &str) -> Option<Decimal> {
    lazy_static! {
        static ref DIGIT_GROUPS_REGEX: Regex = Regex::new(r"\b\d{1,3}(?:[\s\u{a0}\u{202f}]\d{3})+\b").unwrap();
        static ref NUMBER_REGEX: Regex = Regex::new(r"[-+]?\d*\.?\d+").unwrap();
    }

    let value = value.trim();
    if value.starts_with(FORMULA_SIGIL) {
        return None;
    }

    // Only thousands groups are joined: "12 5" is 12, not 125
    let value = DIGIT_GROUPS_REGEX.replace_all(value, |captures: &Captures| {
        captures[0].chars().filter(char::is_ascii_digit).collect::<String>()
    }).replace(',', ".");
    let number = NUMBER_REGEX.find(&value)?.as_str();

    let (negative, digits) = match number.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, number.trim_start_matches('+')),
    };

    let digits: Cow<str> = if digits.starts_with('.') {
        format!("0{digits}").into()
    } else {
        digits.into()
    };

    let value = Decimal::from_str(&digits).ok()?;
    Some(if negative { -value } else { value })
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
