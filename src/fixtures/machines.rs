//! Machine Fixtures

use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, amounts::parse_currency},
    machine::MachineConfig,
};

/// Machine Fixture
#[derive(Debug, Deserialize)]
pub struct MachineFixture {
    /// Number of slots
    pub slots: usize,

    /// Maximum units per slot
    pub depth: u32,

    /// ISO currency code (e.g., "GBP")
    pub currency: String,
}

impl TryFrom<MachineFixture> for MachineConfig {
    type Error = FixtureError;

    fn try_from(fixture: MachineFixture) -> Result<Self, Self::Error> {
        Ok(MachineConfig {
            slot_count: fixture.slots,
            slot_depth: fixture.depth,
            currency: parse_currency(&fixture.currency)?,
        })
    }
}
