//! Change
//!
//! Exact change from a finite purse. The search is a depth-first walk over
//! denominations, largest first, trying the largest usable count of each before
//! smaller ones. It runs on an explicit stack so deep purses cannot exhaust the
//! call stack, and abandons a branch once the coins left below it are worth less
//! than the amount still owed, or once the amount owed is not a multiple of the
//! greatest common divisor of the denominations left to try. The search is
//! exhaustive: if no combination of the held coins sums to the amount, it
//! reports [`ChangeError::Infeasible`].

use num_integer::Integer;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::coins::{CoinPurse, Denomination};

/// Errors from the change solver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChangeError {
    /// No combination of held coins sums exactly to the amount.
    #[error("cannot make exact change for {amount}")]
    Infeasible {
        /// Amount requested, in minor units
        amount: u64,
    },
}

type Taken = SmallVec<[(Denomination, u32); 8]>;

#[derive(Debug)]
struct Frame {
    index: usize,
    remaining: u64,
    taken: Taken,
}

/// Find coins in `purse` summing exactly to `amount` minor units.
///
/// The returned coins never exceed the counts held in `purse`. An amount of
/// zero is always satisfied with no coins.
///
/// # Errors
///
/// Returns [`ChangeError::Infeasible`] if no such combination exists.
pub fn make_change(purse: &CoinPurse, amount: u64) -> Result<CoinPurse, ChangeError> {
    if amount == 0 {
        return Ok(CoinPurse::new());
    }

    let denominations: SmallVec<[(Denomination, u32); 8]> = purse.iter().rev().collect();

    // reachable[i]: value of every coin from denomination i onwards.
    let mut reachable: SmallVec<[u64; 9]> = SmallVec::with_capacity(denominations.len() + 1);
    reachable.push(0);
    for (denomination, count) in denominations.iter().rev() {
        let below = reachable.last().copied().unwrap_or_default();
        reachable.push(below.saturating_add(denomination.saturating_mul(u64::from(*count))));
    }
    reachable.reverse();

    // divisor[i]: gcd of every denomination from i onwards.
    let mut divisor: SmallVec<[u64; 9]> = SmallVec::with_capacity(denominations.len() + 1);
    divisor.push(0);
    for (denomination, _) in denominations.iter().rev() {
        let below = divisor.last().copied().unwrap_or_default();
        divisor.push(denomination.gcd(&below));
    }
    divisor.reverse();

    let mut stack = vec![Frame {
        index: 0,
        remaining: amount,
        taken: Taken::new(),
    }];

    while let Some(frame) = stack.pop() {
        if frame.remaining == 0 {
            // Each denomination appears once, with at most the held count.
            let Ok(change) = CoinPurse::with_coins(frame.taken) else {
                continue;
            };

            debug!(amount, coins = change.coin_count(), "found exact change");

            return Ok(change);
        }

        let (Some(&(denomination, held)), Some(&available), Some(&step)) = (
            denominations.get(frame.index),
            reachable.get(frame.index),
            divisor.get(frame.index),
        ) else {
            continue;
        };

        if available < frame.remaining || frame.remaining % step != 0 {
            continue;
        }

        let usable = frame.remaining / *denomination;
        let max = u32::try_from(usable).unwrap_or(u32::MAX).min(held);

        // Pushed smallest first so the largest count is explored first.
        for count in 0..=max {
            let mut taken = frame.taken.clone();
            if count > 0 {
                taken.push((denomination, count));
            }

            stack.push(Frame {
                index: frame.index + 1,
                remaining: frame.remaining - *denomination * u64::from(count),
                taken,
            });
        }
    }

    debug!(amount, "no exact change");

    Err(ChangeError::Infeasible { amount })
}
