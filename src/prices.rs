//! Prices

use std::{fmt, ops::Deref};

use rusty_money::{Money, iso::Currency};

/// Represents a unit price in pence/cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a new Price
    pub fn new(value: u64) -> Self {
        Price { value }
    }

    /// Express the price as money in the given currency.
    ///
    /// Returns `None` if the minor units do not fit the money representation.
    pub fn to_money(self, currency: &'static Currency) -> Option<Money<'static, Currency>> {
        let minor = i64::try_from(self.value).ok()?;

        Some(Money::from_minor(minor, currency))
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
