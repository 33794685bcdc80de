//! Products

use thiserror::Error;

use crate::prices::Price;

/// Two products share a name but not a price.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("product {name} is priced at {existing} and {incoming}")]
pub struct ProductConflict {
    /// Product name
    pub name: String,

    /// Price already held
    pub existing: Price,

    /// Price of the conflicting product
    pub incoming: Price,
}

/// A quantity of a single product type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product name, unique within an assortment
    pub name: String,

    /// Number of units
    pub quantity: u32,

    /// Unit price
    pub price: Price,
}

impl Product {
    /// Create a new product priced at `price` minor units.
    pub fn new(name: impl Into<String>, quantity: u32, price: u64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price: Price::new(price),
        }
    }

    /// Whether both products are the same type: equal name and price.
    pub fn is_same_type(&self, other: &Product) -> bool {
        self.name == other.name && self.price == other.price
    }

    /// Combine two products of the same type, summing their quantities.
    ///
    /// # Errors
    ///
    /// Returns [`ProductConflict`] if the products differ in name or price.
    pub fn combine(&self, other: &Product) -> Result<Product, ProductConflict> {
        if !self.is_same_type(other) {
            return Err(ProductConflict {
                name: self.name.clone(),
                existing: self.price,
                incoming: other.price,
            });
        }

        Ok(Product {
            name: self.name.clone(),
            quantity: self.quantity.saturating_add(other.quantity),
            price: self.price,
        })
    }
}
