//! Assortment

use std::collections::{BTreeMap, btree_map};

use crate::products::{Product, ProductConflict};

/// Products for sale keyed by name, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assortment {
    products: BTreeMap<String, Product>,
}

impl Assortment {
    /// Create an empty assortment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an assortment from products, combining entries that share a name.
    ///
    /// # Errors
    ///
    /// Returns [`ProductConflict`] if two products share a name but not a price.
    pub fn with_products(
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self, ProductConflict> {
        let mut assortment = Self::new();

        for product in products {
            assortment.insert(product)?;
        }

        Ok(assortment)
    }

    /// Add a product, combining it with an existing entry of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`ProductConflict`] on a price mismatch; the assortment is left unchanged.
    pub fn insert(&mut self, product: Product) -> Result<(), ProductConflict> {
        match self.products.entry(product.name.clone()) {
            btree_map::Entry::Occupied(mut entry) => {
                let combined = entry.get().combine(&product)?;
                entry.insert(combined);
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(product);
            }
        }

        Ok(())
    }

    /// Merge two assortments into a new one, leaving both inputs untouched.
    ///
    /// Products present in both must agree on price; their quantities add.
    ///
    /// # Errors
    ///
    /// Returns [`ProductConflict`] for the first name whose prices disagree.
    pub fn merge(&self, incoming: &Assortment) -> Result<Assortment, ProductConflict> {
        let mut merged = self.clone();

        for product in incoming.iter() {
            merged.insert(product.clone())?;
        }

        Ok(merged)
    }

    /// Look up a product by name.
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.get(name)
    }

    /// Remove one unit of the named product.
    ///
    /// Returns `false` if the product is unknown or has no units left.
    pub fn take_one(&mut self, name: &str) -> bool {
        match self.products.get_mut(name) {
            Some(product) if product.quantity > 0 => {
                product.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Iterate over products in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Total number of units across all products.
    pub fn total_units(&self) -> u64 {
        self.iter().map(|product| u64::from(product.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the assortment is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::prices::Price;

    fn snacks() -> Result<Assortment, ProductConflict> {
        Assortment::with_products([
            Product::new("Chocolate bar", 10, 120),
            Product::new("Orange juice", 20, 200),
        ])
    }

    #[test]
    fn merge_with_empty_is_identity() -> TestResult {
        let snacks = snacks()?;

        assert_eq!(Assortment::new().merge(&snacks)?, snacks);
        assert_eq!(snacks.merge(&Assortment::new())?, snacks);

        Ok(())
    }

    #[test]
    fn merge_adds_quantities_and_carries_the_rest() -> TestResult {
        let delivery = Assortment::with_products([
            Product::new("Orange juice", 5, 200),
            Product::new("Apple juice", 15, 210),
        ])?;

        let merged = snacks()?.merge(&delivery)?;

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("Chocolate bar").map(|p| p.quantity), Some(10));
        assert_eq!(merged.get("Orange juice").map(|p| p.quantity), Some(25));
        assert_eq!(merged.get("Apple juice").map(|p| p.quantity), Some(15));
        assert_eq!(merged.total_units(), 50);

        Ok(())
    }

    #[test]
    fn merge_rejects_price_conflict_without_touching_inputs() -> TestResult {
        let existing = snacks()?;
        let delivery = Assortment::with_products([Product::new("Orange juice", 5, 250)])?;

        let result = existing.merge(&delivery);

        assert_eq!(
            result,
            Err(ProductConflict {
                name: "Orange juice".to_string(),
                existing: Price::new(200),
                incoming: Price::new(250),
            })
        );
        assert_eq!(existing, snacks()?);

        Ok(())
    }

    #[test]
    fn merge_is_commutative_in_quantities() -> TestResult {
        let a = snacks()?;
        let b = Assortment::with_products([
            Product::new("Chocolate bar", 3, 120),
            Product::new("Water", 7, 90),
        ])?;

        assert_eq!(a.merge(&b)?, b.merge(&a)?);

        Ok(())
    }

    #[test]
    fn merge_is_associative_in_quantities() -> TestResult {
        let a = snacks()?;
        let b = Assortment::with_products([Product::new("Water", 7, 90)])?;
        let c = Assortment::with_products([Product::new("Chocolate bar", 1, 120)])?;

        assert_eq!(a.merge(&b)?.merge(&c)?, a.merge(&b.merge(&c)?)?);

        Ok(())
    }

    #[test]
    fn with_products_combines_duplicates() -> TestResult {
        let assortment =
            Assortment::with_products([Product::new("Soda", 2, 150), Product::new("Soda", 3, 150)])?;

        assert_eq!(assortment.len(), 1);
        assert_eq!(assortment.get("Soda").map(|p| p.quantity), Some(5));

        Ok(())
    }

    #[test]
    fn take_one_stops_at_zero() -> TestResult {
        let mut assortment = Assortment::with_products([Product::new("Soda", 1, 150)])?;

        assert!(assortment.take_one("Soda"));
        assert!(!assortment.take_one("Soda"));
        assert!(!assortment.take_one("Water"));
        assert_eq!(assortment.get("Soda").map(|p| p.quantity), Some(0));

        Ok(())
    }
}
