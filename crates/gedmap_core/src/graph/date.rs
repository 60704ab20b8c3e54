//! Free-form date normalization.
//!
//! # Responsibility
//! - Turn GEDCOM-ish date text into a comparable `DateTriple`.
//!
//! # Invariants
//! - Never fails: absence of a triple is the only failure signal.
//! - Bare 4-digit years yield a year-only triple.
//! - A permissive parse landing on 1970-01-01 is treated as unparseable.

use crate::model::event::DateTriple;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static BARE_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid bare year regex"));
static QUALIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:abt|about|est|cal|circa|c)\.?\s+").expect("valid qualifier regex")
});
static MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\.?\s+(\d{4})$").expect("valid month-year regex"));

const FULL_DATE_FORMATS: &[&str] = &[
    "%d %B %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
];

const MONTH_NAMES: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parses `raw` into a date triple, or `None` when it cannot be understood.
pub fn normalize_date(raw: &str) -> Option<DateTriple> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(triple) = parse_bare_year(trimmed) {
        return Some(triple);
    }

    let unqualified = QUALIFIER_RE.replace(trimmed, "");
    let candidate = unqualified.trim();
    if let Some(triple) = parse_bare_year(candidate) {
        return Some(triple);
    }

    // Month-year first: the full formats would read `MAR 1777` as day 17 of year 77.
    parse_month_year(candidate).or_else(|| parse_full_date(candidate))
}

/// Converts a one-based calendar month to the stored zero-based index.
///
/// A negative result wraps to `12`, matching the legacy month encoding.
pub fn zero_based_month(calendar_month: i32) -> u32 {
    let month = calendar_month - 1;
    if month < 0 {
        12
    } else {
        month as u32
    }
}

fn parse_bare_year(value: &str) -> Option<DateTriple> {
    if !BARE_YEAR_RE.is_match(value) {
        return None;
    }
    value.parse::<i32>().ok().map(DateTriple::from_year)
}

fn parse_full_date(value: &str) -> Option<DateTriple> {
    let date = FULL_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())?;
    if is_epoch_sentinel(date) {
        return None;
    }
    Some(DateTriple::from_ymd(
        date.year(),
        zero_based_month(date.month() as i32),
        date.day(),
    ))
}

fn parse_month_year(value: &str) -> Option<DateTriple> {
    let captures = MONTH_YEAR_RE.captures(value)?;
    let month = month_index(captures.get(1)?.as_str())?;
    let year = captures.get(2)?.as_str().parse::<i32>().ok()?;
    // Month-year resolves to the first of the month.
    let first_day = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    if is_epoch_sentinel(first_day) {
        return None;
    }
    Some(DateTriple::from_year_month(year, month))
}

fn month_index(name: &str) -> Option<u32> {
    let lowered = name.to_ascii_lowercase();
    if lowered.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|full| full.starts_with(lowered.as_str()))
        .map(|index| index as u32)
}

fn is_epoch_sentinel(date: NaiveDate) -> bool {
    NaiveDate::from_ymd_opt(1970, 1, 1) == Some(date)
}
