//! Vending
//!
//! Vending is a coin-operated vending machine engine: it stocks products into
//! fixed-depth slots, takes coins for a purchase and pays exact change out of a
//! finite coin reserve.

pub mod assortment;
pub mod change;
pub mod coins;
pub mod fixtures;
pub mod machine;
pub mod menu;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod slots;
pub mod utils;
