//! Variant Items

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    items::{ItemError, Priced},
    prices::Price,
};

/// An item whose price depends on a selector, such as a price list name.
///
/// Selecting with `()` or with an unknown key gives the base price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantItem {
    base: Price,
    overrides: FxHashMap<String, Price>,
}

impl VariantItem {
    /// Creates a new variant item with only a base price.
    pub fn new(base: Price) -> Self {
        Self {
            base,
            overrides: FxHashMap::default(),
        }
    }

    /// Adds a price to use when the selector is `key`.
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, price: Price) -> Self {
        self.overrides.insert(key.into(), price);
        self
    }

    /// Returns the base price.
    pub fn base_price(&self) -> &Price {
        &self.base
    }

    /// Returns the price for `key`, falling back to the base price.
    ///
    /// A key with no override is not an error; it is logged at `debug`.
    pub fn price_for(&self, key: &str) -> &Price {
        self.overrides.get(key).unwrap_or_else(|| {
            debug!(selector = key, "no override for selector, using base price");

            &self.base
        })
    }
}

/// Prices by selector key. Unknown keys price at the base price.
impl Priced<str> for VariantItem {
    fn price_per_item(&self, selector: &str) -> Result<Price, ItemError> {
        Ok(self.price_for(selector).clone())
    }
}

impl Priced for VariantItem {
    fn price_per_item(&self, _selector: &()) -> Result<Price, ItemError> {
        Ok(self.base.clone())
    }
}
