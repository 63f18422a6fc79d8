//! Parsing of raw control text at the UI boundary.
//!
//! Widgets hand over strings. Everything is validated here so that malformed text
//! turns into an [`LeasingError::InvalidArgument`] naming the offending field,
//! instead of leaking into the calculation.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculator::validate_term;
use crate::decimal::Money;
use crate::errors::{LeasingError, Result};
use crate::types::Condition;

/// Trims whitespace and drops comma thousands separators.
fn normalize(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a decimal value for `field`. Empty input is an error.
pub fn parse_decimal(field: &'static str, s: &str) -> Result<Decimal> {
    let normalized = normalize(s);
    if normalized.is_empty() {
        warn!(field, "empty numeric input");
        return Err(LeasingError::invalid_argument(field, "a number is required"));
    }

    normalized.parse::<Decimal>().map_err(|e| {
        warn!(field, input = %s, "invalid decimal: {}", e);
        LeasingError::invalid_argument(field, format!("'{}' is not a number", s.trim()))
    })
}

/// Parses the vehicle price; must be strictly positive.
pub fn parse_price(s: &str) -> Result<Money> {
    let value = parse_decimal("price", s)?;
    if value <= Decimal::ZERO {
        return Err(LeasingError::invalid_argument(
            "price",
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(Money::from_decimal(value))
}

/// Parses the down-payment percentage; must lie in [0, 100].
pub fn parse_percent(s: &str) -> Result<Decimal> {
    let value = parse_decimal("down payment percent", s)?;
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(LeasingError::invalid_argument(
            "down payment percent",
            format!("must be between 0 and 100, got {value}"),
        ));
    }
    Ok(value)
}

/// Parses the lease term as a whole number of months in `1..=`[`MAX_TERM_MONTHS`](crate::calculator::MAX_TERM_MONTHS).
pub fn parse_term(s: &str) -> Result<u32> {
    let trimmed = s.trim();
    let months: i64 = trimmed.parse().map_err(|_| {
        warn!(input = %s, "invalid term");
        LeasingError::invalid_argument("term", format!("'{trimmed}' is not a whole number of months"))
    })?;

    if months <= 0 {
        return Err(LeasingError::invalid_argument(
            "term",
            format!("must be at least 1 month, got {months}"),
        ));
    }

    let months = u32::try_from(months)
        .map_err(|_| LeasingError::invalid_argument("term", format!("{months} months is too long")))?;
    validate_term(months)?;
    Ok(months)
}

pub fn parse_condition(s: &str) -> Result<Condition> {
    s.parse()
}

/// Canonical text for a numeric value written back into a control.
pub fn format_number(value: Decimal) -> String {
    value.normalize().to_string()
}
