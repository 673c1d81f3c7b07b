//! Order Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_norway::Value;

use crate::{
    fixtures::{FixtureError, prices::parse_price},
    items::ItemLine,
};

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Map of order key -> lines
    pub orders: FxHashMap<String, Vec<LineFixture>>,
}

/// Order Line Fixture
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// Unit price, e.g. `"10.00 USD"` or `{ usd: 10.00 }`
    pub price: Value,

    /// Quantity, defaults to 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl TryFrom<&LineFixture> for ItemLine {
    type Error = FixtureError;

    fn try_from(fixture: &LineFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        Ok(ItemLine::with_quantity(price, fixture.quantity)?)
    }
}
