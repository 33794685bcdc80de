//! Slots
//!
//! A machine has a fixed number of slots, each holding up to `depth` units of a
//! single product. [`arrange`] lays a whole assortment out from scratch: products
//! are walked in assortment order and each one takes `ceil(quantity / depth)`
//! consecutive slots, the last of which may be partially filled.

use std::fmt;

use thiserror::Error;

use crate::{assortment::Assortment, prices::Price};

/// Errors related to slot arrangement.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlotError {
    /// The assortment needs more slots than the machine has.
    #[error("assortment needs {required} slots, but the machine has {available}")]
    MachineOverloaded {
        /// Slots the assortment would occupy
        required: usize,

        /// Slots in the machine
        available: usize,
    },
}

/// Position of a slot, in `0..slot_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotCode(pub usize);

impl fmt::Display for SlotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Units of one product physically placed in a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Product name
    pub product: String,

    /// Unit price
    pub price: Price,

    /// Units in the slot, at most the slot depth
    pub quantity: u32,
}

/// The contents of every slot in a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    depth: u32,
    slots: Vec<Option<Slot>>,
}

impl SlotLayout {
    /// Create a layout of `count` empty slots.
    pub fn empty(count: usize, depth: u32) -> Self {
        Self {
            depth,
            slots: vec![None; count],
        }
    }

    /// Get the slot at `code`. Returns `None` for unknown codes and empty slots.
    pub fn get(&self, code: SlotCode) -> Option<&Slot> {
        self.slots.get(code.0).and_then(Option::as_ref)
    }

    /// Iterate over every slot code with its contents.
    pub fn iter(&self) -> impl Iterator<Item = (SlotCode, Option<&Slot>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(idx, slot)| (SlotCode(idx), slot.as_ref()))
    }

    /// Iterate over occupied slots only.
    pub fn occupied(&self) -> impl Iterator<Item = (SlotCode, &Slot)> {
        self.iter()
            .filter_map(|(code, slot)| slot.map(|slot| (code, slot)))
    }

    /// Codes of all slots holding the named product, in ascending order.
    pub fn codes_for<'a>(&'a self, product: &'a str) -> impl Iterator<Item = SlotCode> + 'a {
        self.occupied()
            .filter(move |(_, slot)| slot.product == product)
            .map(|(code, _)| code)
    }

    /// Remove one unit from the slot at `code`.
    ///
    /// Returns `false` if the slot is unknown, empty, or has no units left.
    pub fn take_one(&mut self, code: SlotCode) -> bool {
        match self.slots.get_mut(code.0) {
            Some(Some(slot)) if slot.quantity > 0 => {
                slot.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the machine has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum units a single slot holds.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Maximum units the whole layout holds.
    pub fn capacity(&self) -> u64 {
        u64::from(self.depth)
            .saturating_mul(u64::try_from(self.slots.len()).unwrap_or(u64::MAX))
    }

    /// Units currently placed across all slots.
    pub fn units(&self) -> u64 {
        self.occupied()
            .map(|(_, slot)| u64::from(slot.quantity))
            .sum()
    }
}

/// Number of slots of `depth` needed to hold `quantity` units.
pub fn slots_needed(quantity: u32, depth: u32) -> usize {
    if depth == 0 {
        return if quantity == 0 { 0 } else { usize::MAX };
    }

    usize::try_from(quantity.div_ceil(depth)).unwrap_or(usize::MAX)
}

/// Lay out an assortment across `slot_count` slots of `depth` units each.
///
/// Products with no units take no slots. The result is a fresh layout; nothing
/// is written anywhere on failure.
///
/// # Errors
///
/// Returns [`SlotError::MachineOverloaded`] if the assortment needs more slots
/// than the machine has.
pub fn arrange(
    assortment: &Assortment,
    slot_count: usize,
    depth: u32,
) -> Result<SlotLayout, SlotError> {
    let required = assortment
        .iter()
        .map(|product| slots_needed(product.quantity, depth))
        .fold(0_usize, usize::saturating_add);

    if required > slot_count {
        return Err(SlotError::MachineOverloaded {
            required,
            available: slot_count,
        });
    }

    let mut layout = SlotLayout::empty(slot_count, depth);
    let mut slots = layout.slots.iter_mut();

    for product in assortment.iter() {
        let mut remaining = product.quantity;

        while remaining > 0 {
            let Some(slot) = slots.next() else {
                return Err(SlotError::MachineOverloaded {
                    required,
                    available: slot_count,
                });
            };

            let units = remaining.min(depth);

            *slot = Some(Slot {
                product: product.name.clone(),
                price: product.price,
                quantity: units,
            });

            remaining -= units;
        }
    }

    Ok(layout)
}
