//! Delivery Fixtures

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, amounts::parse_amount},
    products::Product,
};

/// Wrapper for a delivery in YAML
#[derive(Debug, Deserialize)]
pub struct DeliveryFixture {
    /// Map of product name -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Units delivered
    pub quantity: u32,

    /// Unit price (e.g., "1.50 GBP")
    pub price: String,
}

impl ProductFixture {
    /// Turn the fixture into a named product and the currency it is priced in.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn into_product(
        self,
        name: String,
    ) -> Result<(Product, &'static Currency), FixtureError> {
        let (minor_units, currency) = parse_amount(&self.price)?;

        Ok((
            Product::new(name, self.quantity, minor_units),
            currency,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn into_product_parses_price() -> TestResult {
        let fixture: DeliveryFixture = serde_norway::from_str(
            "products:\n  Water:\n    quantity: 12\n    price: \"0.90 EUR\"\n",
        )?;

        let (name, product_fixture) = fixture
            .products
            .into_iter()
            .next()
            .ok_or("missing product")?;

        let (product, currency) = product_fixture.into_product(name)?;

        assert_eq!(product, Product::new("Water", 12, 90));
        assert_eq!(currency, EUR);

        Ok(())
    }

    #[test]
    fn into_product_rejects_bad_price() {
        let fixture = ProductFixture {
            quantity: 1,
            price: "cheap".to_string(),
        };

        assert!(matches!(
            fixture.into_product("Gum".to_string()),
            Err(FixtureError::InvalidAmount(_))
        ));
    }
}
