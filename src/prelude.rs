//! Vending prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    assortment::Assortment,
    change::{ChangeError, make_change},
    coins::{CoinError, CoinPurse, Denomination},
    fixtures::{Fixture, FixtureError},
    machine::{LoadError, Machine, MachineConfig, MachineError, Outcome, RefundReason},
    menu::{Menu, MenuEntry, MenuError},
    prices::Price,
    products::{Product, ProductConflict},
    slots::{Slot, SlotCode, SlotError, SlotLayout, arrange},
};
