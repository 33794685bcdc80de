//! Menu

use std::{collections::BTreeMap, io};

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::Columns, object::Rows},
};
use thiserror::Error;

use crate::{prices::Price, slots::SlotCode};

/// Errors that can occur when writing a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    /// IO error
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Where to find a product and what it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    /// First slot holding the product
    pub slot: SlotCode,

    /// Unit price
    pub price: Price,

    /// Units left for sale
    pub quantity: u32,
}

/// Products available for sale, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    entries: BTreeMap<String, MenuEntry>,
    currency: &'static Currency,
}

impl Menu {
    /// Create a menu from `(name, entry)` pairs.
    pub fn new(
        entries: impl IntoIterator<Item = (String, MenuEntry)>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            currency,
        }
    }

    /// Look up a product by name.
    pub fn get(&self, name: &str) -> Option<&MenuEntry> {
        self.entries.get(name)
    }

    /// Iterate over entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MenuEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of products on the menu.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is for sale.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currency prices are shown in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the menu as a table, ordered by slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), MenuError> {
        let mut builder = Builder::default();

        builder.push_record(["Slot", "Product", "Price", "Left"]);

        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_by_key(|(_, entry)| entry.slot);

        for (name, entry) in rows {
            builder.push_record([
                format!("{}", entry.slot),
                name.to_string(),
                self.format_price(entry.price),
                entry.quantity.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..4), Alignment::right());

        writeln!(out, "{table}")?;

        Ok(())
    }

    fn format_price(&self, price: Price) -> String {
        price
            .to_money(self.currency)
            .map_or_else(|| price.to_string(), |money| money.to_string())
    }
}
