//! Range Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_norway::Value;

use crate::{
    fixtures::{FixtureError, prices::parse_price},
    items::variants::VariantItem,
};

/// Wrapper for ranges in YAML
#[derive(Debug, Deserialize)]
pub struct RangesFixture {
    /// Map of range key -> variants
    pub ranges: FxHashMap<String, Vec<VariantFixture>>,
}

/// Variant Fixture
#[derive(Debug, Deserialize)]
pub struct VariantFixture {
    /// Variant name
    pub name: String,

    /// Base price, e.g. `"5.00 USD"` or `{ usd: 5.00 }`
    pub price: Value,

    /// Prices keyed by selector, e.g. a price list name
    #[serde(default)]
    pub overrides: FxHashMap<String, Value>,
}

impl TryFrom<&VariantFixture> for VariantItem {
    type Error = FixtureError;

    fn try_from(fixture: &VariantFixture) -> Result<Self, Self::Error> {
        let base = parse_price(&fixture.price)?;

        fixture
            .overrides
            .iter()
            .try_fold(
                VariantItem::new(base),
                |item, (key, price)| -> Result<VariantItem, FixtureError> {
                    Ok(item.with_override(key.as_str(), parse_price(price)?))
                },
            )
    }
}
