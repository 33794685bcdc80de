//! Amount Parsing

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, USD};

use crate::fixtures::FixtureError;

/// Parse amount string (e.g., "1.50 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a whole number of minor units, or if the currency code
/// is not recognized.
pub fn parse_amount(s: &str) -> Result<(u64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidAmount(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = parse_currency(currency_code)?;
    let minor_units = parse_minor_units(amount, currency)?;

    Ok((minor_units, currency))
}

/// Parse a bare amount (e.g., "0.50") into minor units of `currency`
///
/// # Errors
///
/// Returns an error if the amount is negative, not a number, or not a whole
/// number of minor units.
pub fn parse_minor_units(s: &str, currency: &'static Currency) -> Result<u64, FixtureError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidAmount(s.to_string()))?;

    let scale = 10_u64
        .checked_pow(currency.exponent)
        .ok_or_else(|| FixtureError::InvalidAmount(s.to_string()))?;

    let minor = amount
        .checked_mul(Decimal::from(scale))
        .filter(|value| value.fract().is_zero() && !value.is_sign_negative())
        .and_then(|value| value.to_u64())
        .ok_or_else(|| FixtureError::InvalidAmount(s.to_string()))?;

    Ok(minor)
}

/// Parse an ISO currency code
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
