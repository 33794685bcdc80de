//! Coin Fixtures

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    coins::{CoinPurse, Denomination},
    fixtures::{
        FixtureError,
        amounts::{parse_amount, parse_minor_units},
    },
};

/// Wrapper for coins in YAML
#[derive(Debug, Deserialize)]
pub struct CoinsFixture {
    /// Map of coin face value (e.g., "0.50 GBP") -> count
    pub coins: FxHashMap<String, u32>,
}

impl CoinsFixture {
    /// Parse each face value into a denomination.
    ///
    /// # Errors
    ///
    /// Returns an error if a face value cannot be parsed or is zero.
    pub fn into_coins(self) -> Result<Vec<(Denomination, u32, &'static Currency)>, FixtureError> {
        self.coins
            .into_iter()
            .map(|(face_value, count)| -> Result<_, FixtureError> {
                let (minor_units, currency) = parse_amount(&face_value)?;

                Ok((Denomination::new(minor_units)?, count, currency))
            })
            .collect()
    }
}

/// Parse a comma-separated list of coins (e.g., "1.00, 0.50") in `currency`
///
/// # Errors
///
/// Returns an error if any coin cannot be parsed or is zero.
pub fn parse_coin_list(s: &str, currency: &'static Currency) -> Result<CoinPurse, FixtureError> {
    let values = s
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_minor_units(part, currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CoinPurse::from_values(values)?)
}
