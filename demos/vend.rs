//! Vending Example
//!
//! This example stocks a machine from a fixture set and makes one purchase.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to choose the slot to buy from
//! Use `-c` to list the coins to insert, e.g. `-c 1.00,0.50`
//!
//! Set `RUST_LOG=vending=debug` to see the machine's logs.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vending::{
    fixtures::{Fixture, coins::parse_coin_list},
    machine::Outcome,
    slots::SlotCode,
    utils::ExampleMachineArgs,
};

/// Vending Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ExampleMachineArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let mut machine = fixture.machine()?;
    let currency = machine.config().currency;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    machine.available_products().write_to(&mut handle)?;

    let inserted = parse_coin_list(&args.coins, currency)
        .with_context(|| format!("invalid coins: {}", args.coins))?;

    match machine.choose_product(SlotCode(args.slot), inserted) {
        Outcome::Dispensed { product, change } => {
            println!("\nDispensed: {}", product.name);
            println!(
                "Change: {} coins worth {}",
                change.coin_count(),
                change.to_money(currency)?
            );
        }
        Outcome::Refunded { coins, reason } => {
            println!("\nRefunded {} coins: {reason:?}", coins.coin_count());
        }
    }

    println!("Balance: {}", machine.balance()?);

    Ok(())
}
