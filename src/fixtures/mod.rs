//! Fixtures
//!
//! YAML descriptions of machines, deliveries and coin loads, read from
//! `./fixtures/{machines,deliveries,coins}/<name>.yml`.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    assortment::Assortment,
    coins::{CoinError, CoinPurse},
    fixtures::{coins::CoinsFixture, deliveries::DeliveryFixture, machines::MachineFixture},
    machine::{LoadError, Machine, MachineConfig, MachineError},
    products::ProductConflict,
};

pub mod amounts;
pub mod coins;
pub mod deliveries;
pub mod machines;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid amount format
    #[error("Invalid amount format: {0}")]
    InvalidAmount(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between fixture files
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No machine loaded yet
    #[error("No machine loaded; cannot build a machine")]
    NoMachine,

    /// Invalid coin
    #[error(transparent)]
    Coin(#[from] CoinError),

    /// Conflicting products within a delivery
    #[error(transparent)]
    Product(#[from] ProductConflict),

    /// Invalid machine
    #[error(transparent)]
    Machine(#[from] MachineError),

    /// Delivery rejected by the machine
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    config: Option<MachineConfig>,
    delivery: Assortment,
    coins: CoinPurse,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            config: None,
            delivery: Assortment::new(),
            coins: CoinPurse::new(),
            currency: None,
        }
    }

    /// Load a machine configuration from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its currency
    /// differs from previously loaded files.
    pub fn load_machine(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: MachineFixture = self.read("machines", name)?;
        let config = MachineConfig::try_from(fixture)?;

        self.currency = Some(check_currency(self.currency, config.currency)?);
        self.config = Some(config);

        Ok(self)
    }

    /// Load a product delivery from a YAML fixture file
    ///
    /// Deliveries accumulate: loading several files merges them. A file that
    /// fails to load leaves the fixture as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is invalid,
    /// a product conflicts with an earlier delivery, or the currency differs from
    /// previously loaded files.
    pub fn load_delivery(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: DeliveryFixture = self.read("deliveries", name)?;

        let mut currency = self.currency;
        let mut delivery = Assortment::new();

        for (product_name, product_fixture) in fixture.products {
            let (product, product_currency) = product_fixture.into_product(product_name)?;

            currency = Some(check_currency(currency, product_currency)?);
            delivery.insert(product)?;
        }

        self.delivery = self.delivery.merge(&delivery)?;
        self.currency = currency;

        Ok(self)
    }

    /// Load a coin float from a YAML fixture file
    ///
    /// Floats accumulate. A file that fails to load leaves the fixture as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a coin is invalid,
    /// or the currency differs from previously loaded files.
    pub fn load_coins(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CoinsFixture = self.read("coins", name)?;

        let mut currency = self.currency;
        let mut coins = CoinPurse::new();

        for (denomination, count, coin_currency) in fixture.into_coins()? {
            currency = Some(check_currency(currency, coin_currency)?);
            coins.add(denomination, count)?;
        }

        self.coins.deposit(&coins)?;
        self.currency = currency;

        Ok(self)
    }

    /// Load a complete fixture set (machine, delivery and coins with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_machine(name)?
            .load_delivery(name)?
            .load_coins(name)?;

        Ok(fixture)
    }

    /// Build a machine from the loaded configuration, stocked with the loaded
    /// delivery and coins.
    ///
    /// # Errors
    ///
    /// Returns an error if no machine was loaded or the delivery does not fit.
    pub fn machine(&self) -> Result<Machine, FixtureError> {
        let config = self.config.ok_or(FixtureError::NoMachine)?;
        let mut machine = Machine::new(config)?;

        machine.load_products(&self.delivery)?;
        machine.load_coins(&self.coins)?;

        Ok(machine)
    }

    /// Get the loaded machine configuration
    pub fn config(&self) -> Option<&MachineConfig> {
        self.config.as_ref()
    }

    /// Get the loaded delivery
    pub fn delivery(&self) -> &Assortment {
        &self.delivery
    }

    /// Get the loaded coins
    pub fn coins(&self) -> &CoinPurse {
        &self.coins
    }

    /// Get the currency for the fixture set
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    fn read<T: serde::de::DeserializeOwned>(
        &self,
        kind: &str,
        name: &str,
    ) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

fn check_currency(
    expected: Option<&'static Currency>,
    currency: &'static Currency,
) -> Result<&'static Currency, FixtureError> {
    match expected {
        Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
            existing.iso_alpha_code.to_string(),
            currency.iso_alpha_code.to_string(),
        )),
        _ => Ok(currency),
    }
}
