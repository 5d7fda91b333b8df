#[cfg(debug_assertions)] use chrono::{Local, TimeZone};

use crate::core::GenericResult;

use super::{Date, DateTime};
#[cfg(debug_assertions)] use super::TzDateTime;

/// Date formats observed in the "Информация по состоянию за:" cell, in priority order.
pub const REPORT_DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

pub fn parse_date(date: &str, format: &str) -> GenericResult<Date> {
    Ok(Date::parse_from_str(date, format).map_err(|_| format!(
        "Invalid date: {:?}", date))?)
}

pub fn parse_date_time(date_time: &str, format: &str) -> GenericResult<DateTime> {
    Ok(DateTime::parse_from_str(date_time, format).map_err(|_| format!(
        "Invalid time: {:?}", date_time))?)
}

/// Tries every report date format in order: the first one that parses wins.
pub fn parse_report_date(value: &str) -> Option<DateTime> {
    let value = value.trim();

    REPORT_DATE_FORMATS.iter().find_map(|format| {
        parse_date_time(value, format).ok()
            .or_else(|| parse_date(value, format).ok().and_then(|date| date.and_hms_opt(0, 0, 0)))
    })
}

#[cfg(debug_assertions)]
pub fn parse_fake_now() -> GenericResult<Option<TzDateTime<Local>>> {
    use std::env::{self, VarError};

    let name = "FUEL_REPORTS_NOW";

    let fake_now = match env::var(name) {
        Ok(value) => {
            chrono::NaiveDateTime::parse_from_str(&value, "%Y.%m.%d %H:%M:%S").ok()
                .and_then(|date_time| Local.from_local_datetime(&date_time).single())
        },
        Err(e) => match e {
            VarError::NotPresent => return Ok(None),
            VarError::NotUnicode(_) => None,
        },
    }.ok_or_else(|| format!("Invalid {} environment variable value", name))?;

    Ok(Some(fake_now))
}
