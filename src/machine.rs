//! Machine
//!
//! The machine owns its assortment, slot layout and coin reserve, and is the
//! only place they change. Loads are all-or-nothing: a rejected delivery leaves
//! the previous assortment and layout in place. Purchases are all-or-nothing
//! too, but never fail: a declined purchase hands every inserted coin back.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    assortment::Assortment,
    change::make_change,
    coins::{CoinError, CoinPurse},
    menu::{Menu, MenuEntry},
    products::{Product, ProductConflict},
    slots::{Slot, SlotCode, SlotError, SlotLayout, arrange},
};

/// Errors related to machine construction and reporting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    /// The configuration cannot describe a working machine.
    #[error("invalid machine configuration: {0}")]
    InvalidConfig(&'static str),

    /// A value does not fit the money representation.
    #[error("value overflowed the money representation")]
    ValueOverflow,
}

/// Errors from loading a delivery. The machine is unchanged when one is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The delivery prices a product differently from the machine.
    #[error(transparent)]
    ProductConflict(#[from] ProductConflict),

    /// The delivery does not fit in the machine.
    #[error(transparent)]
    MachineOverloaded(#[from] SlotError),
}

/// Physical dimensions and currency of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of slots
    pub slot_count: usize,

    /// Maximum units per slot
    pub slot_depth: u32,

    /// Currency the reserve and prices are counted in
    pub currency: &'static Currency,
}

/// Why a purchase handed the inserted coins back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundReason {
    /// No slot has the chosen code.
    UnknownSlot,

    /// The chosen slot holds nothing.
    EmptySlot,

    /// The chosen slot's product has no units left.
    SoldOut,

    /// The inserted coins are worth less than the price.
    InsufficientFunds,

    /// The inserted coins could not be counted or held in the reserve.
    UncountablePayment,

    /// The reserve cannot make exact change.
    ExactChangeUnavailable,
}

/// Result of a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// One unit was sold.
    Dispensed {
        /// The unit sold, with a quantity of one
        product: Product,

        /// Change paid out of the reserve
        change: CoinPurse,
    },

    /// Nothing was sold and the inserted coins are returned untouched.
    Refunded {
        /// The coins that were inserted
        coins: CoinPurse,

        /// Why the purchase was declined
        reason: RefundReason,
    },
}

impl Outcome {
    /// Whether a product was dispensed.
    pub fn is_dispensed(&self) -> bool {
        matches!(self, Outcome::Dispensed { .. })
    }

    /// The dispensed product, if any.
    pub fn product(&self) -> Option<&Product> {
        match self {
            Outcome::Dispensed { product, .. } => Some(product),
            Outcome::Refunded { .. } => None,
        }
    }

    /// Coins handed back to the buyer: change or a full refund.
    pub fn returned_coins(&self) -> &CoinPurse {
        match self {
            Outcome::Dispensed { change, .. } => change,
            Outcome::Refunded { coins, .. } => coins,
        }
    }
}

/// Coin-operated vending machine
#[derive(Debug, Clone)]
pub struct Machine {
    config: MachineConfig,
    assortment: Assortment,
    slots: SlotLayout,
    reserve: CoinPurse,
}

impl Machine {
    /// Create an empty machine.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::InvalidConfig`] if the machine has no slots or
    /// its slots cannot hold anything.
    pub fn new(config: MachineConfig) -> Result<Self, MachineError> {
        if config.slot_count == 0 {
            return Err(MachineError::InvalidConfig("slot count must be positive"));
        }

        if config.slot_depth == 0 {
            return Err(MachineError::InvalidConfig("slot depth must be positive"));
        }

        Ok(Self {
            config,
            assortment: Assortment::new(),
            slots: SlotLayout::empty(config.slot_count, config.slot_depth),
            reserve: CoinPurse::new(),
        })
    }

    /// Add a delivery to the assortment and lay the result out across the slots.
    ///
    /// The layout is rebuilt from scratch, so existing products may move.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the delivery conflicts with stocked prices or
    /// does not fit; the machine is left as it was.
    #[tracing::instrument(skip_all, fields(products = delivery.len(), units = delivery.total_units()))]
    pub fn load_products(&mut self, delivery: &Assortment) -> Result<(), LoadError> {
        let result = self.assortment.merge(delivery).map_err(LoadError::from).and_then(|merged| {
            let layout = arrange(&merged, self.config.slot_count, self.config.slot_depth)?;

            Ok((merged, layout))
        });

        match result {
            Ok((assortment, slots)) => {
                self.assortment = assortment;
                self.slots = slots;

                info!(
                    occupied = self.slots.occupied().count(),
                    units = self.slots.units(),
                    "loaded products"
                );

                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "rejected delivery");

                Err(err)
            }
        }
    }

    /// Add coins to the reserve.
    ///
    /// # Errors
    ///
    /// Returns [`CoinError::CountOverflow`] if the reserve cannot hold that many
    /// coins of a denomination; the reserve is left as it was.
    #[tracing::instrument(skip_all, fields(coins = coins.coin_count()))]
    pub fn load_coins(&mut self, coins: &CoinPurse) -> Result<(), CoinError> {
        self.reserve.deposit(coins)?;

        debug!("loaded coins");

        Ok(())
    }

    /// Products available for sale, each with the first slot holding it.
    ///
    /// The menu is a copy; it does not follow later changes to the machine.
    pub fn available_products(&self) -> Menu {
        let entries = self.assortment.iter().filter_map(|product| {
            let slot = self
                .slots
                .codes_for(&product.name)
                .find(|&code| self.slots.get(code).is_some_and(|slot| slot.quantity > 0))?;

            (product.quantity > 0).then(|| {
                (
                    product.name.clone(),
                    MenuEntry {
                        slot,
                        price: product.price,
                        quantity: product.quantity,
                    },
                )
            })
        });

        Menu::new(entries, self.config.currency)
    }

    /// Buy one unit from the slot at `code`, paying with `inserted`.
    ///
    /// Either the sale completes (the reserve gains the price, stock drops by one
    /// and change leaves the reserve) or nothing changes and every inserted coin
    /// is returned.
    #[tracing::instrument(skip_all, fields(slot = %code))]
    pub fn choose_product(&mut self, code: SlotCode, inserted: CoinPurse) -> Outcome {
        let slot = match self.purchasable(code) {
            Ok(slot) => slot.clone(),
            Err(reason) => return refund(inserted, reason),
        };

        let Ok(paid) = inserted.total_value() else {
            return refund(inserted, RefundReason::UncountablePayment);
        };

        let Some(owed) = paid.checked_sub(*slot.price) else {
            return refund(inserted, RefundReason::InsufficientFunds);
        };

        let mut reserve = self.reserve.clone();
        if reserve.deposit(&inserted).is_err() {
            return refund(inserted, RefundReason::UncountablePayment);
        }

        let Ok(change) = make_change(&reserve, owed) else {
            return refund(inserted, RefundReason::ExactChangeUnavailable);
        };

        if let Err(err) = reserve.withdraw(&change) {
            warn!(error = %err, "change could not be withdrawn");

            return refund(inserted, RefundReason::ExactChangeUnavailable);
        }

        if !self.slots.take_one(code) || !self.assortment.take_one(&slot.product) {
            return refund(inserted, RefundReason::SoldOut);
        }

        self.reserve = reserve;

        info!(product = %slot.product, paid, change = owed, "dispensed product");

        Outcome::Dispensed {
            product: Product {
                name: slot.product,
                quantity: 1,
                price: slot.price,
            },
            change,
        }
    }

    /// Total value of the reserve.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::ValueOverflow`] if the total cannot be expressed as money.
    pub fn balance(&self) -> Result<Money<'static, Currency>, MachineError> {
        self.reserve
            .to_money(self.config.currency)
            .map_err(|_err| MachineError::ValueOverflow)
    }

    /// Empty the reserve, returning everything it held.
    #[tracing::instrument(skip(self))]
    pub fn cash_out(&mut self) -> CoinPurse {
        let coins = self.reserve.take_all();

        info!(coins = coins.coin_count(), "cashed out");

        coins
    }

    /// The coin reserve.
    pub fn reserve(&self) -> &CoinPurse {
        &self.reserve
    }

    /// Stocked products.
    pub fn assortment(&self) -> &Assortment {
        &self.assortment
    }

    /// The slot layout.
    pub fn slots(&self) -> &SlotLayout {
        &self.slots
    }

    /// The slot at `code`, if it holds anything.
    pub fn slot(&self, code: SlotCode) -> Option<&Slot> {
        self.slots.get(code)
    }

    /// The machine's configuration.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    fn purchasable(&self, code: SlotCode) -> Result<&Slot, RefundReason> {
        if code.0 >= self.slots.len() {
            return Err(RefundReason::UnknownSlot);
        }

        let slot = self.slots.get(code).ok_or(RefundReason::EmptySlot)?;

        let in_stock = self
            .assortment
            .get(&slot.product)
            .is_some_and(|product| product.quantity > 0);

        if slot.quantity == 0 || !in_stock {
            return Err(RefundReason::SoldOut);
        }

        Ok(slot)
    }
}

fn refund(coins: CoinPurse, reason: RefundReason) -> Outcome {
    debug!(?reason, "refunded purchase");

    Outcome::Refunded { coins, reason }
}
