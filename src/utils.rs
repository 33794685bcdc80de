//! Utils

use clap::Parser;

/// Arguments for the vending demo
#[derive(Debug, Parser)]
pub struct ExampleMachineArgs {
    /// Fixture set to use for the machine, delivery & coin float
    #[clap(short, long, default_value = "snacks")]
    pub fixture: String,

    /// Slot to buy from
    #[clap(short, long, default_value_t = 0)]
    pub slot: usize,

    /// Coins to insert, comma separated (e.g. "1.00,0.50")
    #[clap(short, long, default_value = "1.00,1.00,0.50")]
    pub coins: String,
}
