//! Expiry date parsing and validation

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::ExpiryError;

/// Two-digit years landing further than this in the past roll into the next century
pub const CENTURY_ROLLOVER_YEARS: u32 = 10;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit run pattern is valid"));

/// Month and four-digit year parsed from user input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParsedExpiry {
    pub month: u32,
    pub year: u32,
}

/// Parse `MM/YYYY` or `MM/YY` input relative to today's date
///
/// See [`parse_card_expiry_at`].
pub fn parse_card_expiry(input: &str) -> ParsedExpiry {
    parse_card_expiry_at(input, today())
}

/// Parse `MM/YYYY` or `MM/YY` input relative to `today`
///
/// The first two runs of digits are taken as month and year, whatever
/// separates them. A two-digit year is placed in the current century,
/// or the next one if that would put it more than
/// [`CENTURY_ROLLOVER_YEARS`] in the past. No range checks are made; input
/// without two digit runs parses as month 0, year 0.
///
/// # Example
/// ```
/// use cardutils::{parse_card_expiry_at, ParsedExpiry};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert_eq!(parse_card_expiry_at("09 / 40", today), ParsedExpiry { month: 9, year: 2040 });
/// ```
pub fn parse_card_expiry_at(input: &str, today: NaiveDate) -> ParsedExpiry {
    let mut runs = DIGIT_RUN.find_iter(input).map(|m| m.as_str());

    let (month, year) = match (runs.next(), runs.next()) {
        (Some(month), Some(year)) => (month, year),
        _ => {
            debug!("Expiry input has fewer than two numeric groups");
            return ParsedExpiry::default();
        }
    };

    ParsedExpiry {
        month: month.parse().unwrap_or(0),
        year: expand_year(year, today),
    }
}

fn expand_year(raw: &str, today: NaiveDate) -> u32 {
    let year: u32 = raw.parse().unwrap_or(0);
    if raw.len() != 2 {
        return year;
    }

    let current = current_year(today);
    let expanded = current / 100 * 100 + year;
    if expanded + CENTURY_ROLLOVER_YEARS < current {
        expanded + 100
    } else {
        expanded
    }
}

/// Whether a card stating `month`/`year` is still valid today
///
/// See [`validate_card_expiry_at`].
pub fn validate_card_expiry(month: u32, year: u32) -> bool {
    validate_card_expiry_at(month, year, today())
}

/// Whether a card stating `month`/`year` is still valid on `today`
///
/// Cards are valid through the end of their stated month, so the current
/// month passes and the previous one does not.
pub fn validate_card_expiry_at(month: u32, year: u32, today: NaiveDate) -> bool {
    check_card_expiry_at(month, year, today).is_ok()
}

/// Like [`validate_card_expiry`], but explains the rejection
pub fn check_card_expiry(month: u32, year: u32) -> Result<(), ExpiryError> {
    check_card_expiry_at(month, year, today())
}

pub fn check_card_expiry_at(month: u32, year: u32, today: NaiveDate) -> Result<(), ExpiryError> {
    if !(1..=12).contains(&month) {
        return Err(ExpiryError::InvalidMonth(month));
    }
    if year == 0 {
        return Err(ExpiryError::InvalidYear);
    }

    if (year, month) < (current_year(today), today.month()) {
        debug!("Card expired {:02}/{}", month, year);
        return Err(ExpiryError::Expired { month, year });
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn current_year(today: NaiveDate) -> u32 {
    u32::try_from(today.year()).unwrap_or(0)
}
