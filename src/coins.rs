//! Coins

use std::{collections::BTreeMap, fmt, ops::Deref};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors related to coin handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoinError {
    /// A denomination must be worth something.
    #[error("coin denomination must be greater than zero")]
    ZeroDenomination,

    /// The purse holds fewer coins of a denomination than were requested (denomination, held, requested).
    #[error("purse holds {1} coins of {0}, but {2} were requested")]
    InsufficientReserve(Denomination, u32, u32),

    /// A total value does not fit in minor units.
    #[error("coin value overflowed")]
    ValueOverflow,

    /// The purse cannot hold any more coins of a denomination.
    #[error("too many coins of {0}")]
    CountOverflow(Denomination),
}

/// Face value of a coin in pence/cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denomination {
    value: u64,
}

impl Denomination {
    /// Creates a new denomination.
    ///
    /// # Errors
    ///
    /// Returns [`CoinError::ZeroDenomination`] for a zero value.
    pub fn new(value: u64) -> Result<Self, CoinError> {
        if value == 0 {
            return Err(CoinError::ZeroDenomination);
        }

        Ok(Denomination { value })
    }
}

impl Deref for Denomination {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl TryFrom<u64> for Denomination {
    type Error = CoinError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Denomination::new(value)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A multiset of coins: denomination to held count.
///
/// Denominations with a zero count are never stored, so two purses holding the
/// same coins compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinPurse {
    coins: BTreeMap<Denomination, u32>,
}

impl CoinPurse {
    /// Create an empty purse.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a purse from `(denomination, count)` pairs. Repeated denominations add up.
    ///
    /// # Errors
    ///
    /// Returns [`CoinError::CountOverflow`] if a denomination's count exceeds `u32::MAX`.
    pub fn with_coins(
        coins: impl IntoIterator<Item = (Denomination, u32)>,
    ) -> Result<Self, CoinError> {
        let mut purse = Self::new();

        for (denomination, count) in coins {
            purse.add(denomination, count)?;
        }

        Ok(purse)
    }

    /// Create a purse from raw minor-unit values, one entry per coin.
    ///
    /// # Errors
    ///
    /// Returns [`CoinError::ZeroDenomination`] if any value is zero, or
    /// [`CoinError::CountOverflow`] if a denomination is repeated too often.
    pub fn from_values(values: impl IntoIterator<Item = u64>) -> Result<Self, CoinError> {
        let mut purse = Self::new();

        for value in values {
            purse.add(Denomination::new(value)?, 1)?;
        }

        Ok(purse)
    }

    /// Add `count` coins of a single denomination.
    ///
    /// # Errors
    ///
    /// Returns [`CoinError::CountOverflow`] if the held count would exceed
    /// `u32::MAX`; the purse is unchanged.
    pub fn add(&mut self, denomination: Denomination, count: u32) -> Result<(), CoinError> {
        if count == 0 {
            return Ok(());
        }

        let total = self
            .count(denomination)
            .checked_add(count)
            .ok_or(CoinError::CountOverflow(denomination))?;

        self.coins.insert(denomination, total);

        Ok(())
    }

    /// Number of coins held of a denomination.
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.coins.get(&denomination).copied().unwrap_or_default()
    }

    /// Total value of the purse in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`CoinError::ValueOverflow`] if the total does not fit in `u64`.
    pub fn total_value(&self) -> Result<u64, CoinError> {
        self.iter().try_fold(0_u64, |total, (denomination, count)| {
            denomination
                .checked_mul(u64::from(count))
                .and_then(|value| total.checked_add(value))
                .ok_or(CoinError::ValueOverflow)
        })
    }

    /// Total value of the purse as money in the given currency.
    ///
    /// # Errors
    ///
    /// Returns [`CoinError::ValueOverflow`] if the total does not fit the money
    /// representation.
    pub fn to_money(
        &self,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, CoinError> {
        let minor =
            i64::try_from(self.total_value()?).map_err(|_err| CoinError::ValueOverflow)?;

        Ok(Money::from_minor(minor, currency))
    }

    /// Total number of coins held.
    pub fn coin_count(&self) -> u64 {
        self.coins.values().map(|&count| u64::from(count)).sum()
    }

    /// Add every coin of `coins` to this purse.
    ///
    /// All counts are checked before any is incremented; a failed deposit
    /// leaves the purse unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CoinError::CountOverflow`] for the first denomination whose
    /// count would exceed `u32::MAX`.
    pub fn deposit(&mut self, coins: &CoinPurse) -> Result<(), CoinError> {
        coins.iter().try_for_each(|(denomination, count)| {
            self.count(denomination)
                .checked_add(count)
                .map(|_| ())
                .ok_or(CoinError::CountOverflow(denomination))
        })?;

        for (denomination, count) in coins.iter() {
            self.add(denomination, count)?;
        }

        Ok(())
    }

    /// Remove every coin of `coins` from this purse.
    ///
    /// All counts are checked before any is decremented; a failed withdrawal
    /// leaves the purse unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CoinError::InsufficientReserve`] for the first denomination held in
    /// smaller numbers than requested.
    pub fn withdraw(&mut self, coins: &CoinPurse) -> Result<(), CoinError> {
        coins.iter().try_for_each(|(denomination, requested)| {
            let held = self.count(denomination);

            if held >= requested {
                Ok(())
            } else {
                Err(CoinError::InsufficientReserve(denomination, held, requested))
            }
        })?;

        for (denomination, requested) in coins.iter() {
            if let Some(held) = self.coins.get_mut(&denomination) {
                *held -= requested;

                if *held == 0 {
                    self.coins.remove(&denomination);
                }
            }
        }

        Ok(())
    }

    /// Take every coin out, leaving the purse empty.
    pub fn take_all(&mut self) -> CoinPurse {
        std::mem::take(self)
    }

    /// Iterate over `(denomination, count)` in ascending denomination order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Denomination, u32)> + '_ {
        self.coins.iter().map(|(&denomination, &count)| (denomination, count))
    }

    /// Check if the purse holds no coins.
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}
