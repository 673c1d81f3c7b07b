//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    fixtures::{orders::OrdersFixture, ranges::RangesFixture},
    items::{ItemError, ItemLine, ranges::ItemRange, sets::ItemSet, variants::VariantItem},
    prices::PriceError,
};

pub mod orders;
pub mod prices;
pub mod ranges;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Range not found
    #[error("Range not found: {0}")]
    RangeNotFound(String),

    /// Order not found
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Invalid price data
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Invalid item data
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// A catalog of item ranges and orders loaded from YAML.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Ranges by key
    ranges: FxHashMap<String, ItemRange<VariantItem>>,

    /// Orders by key
    orders: FxHashMap<String, ItemSet<ItemLine>>,
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
            ranges: FxHashMap::default(),
            orders: FxHashMap::default(),
        }
    }

    /// Load ranges from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a price is invalid.
    pub fn load_ranges(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("ranges").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: RangesFixture = serde_norway::from_str(&contents)?;

        debug!(path = %file_path.display(), ranges = fixture.ranges.len(), "loading range fixtures");

        for (key, variants) in fixture.ranges {
            let range = variants
                .iter()
                .map(VariantItem::try_from)
                .collect::<Result<ItemRange<_>, FixtureError>>()?;

            self.ranges.insert(key, range);
        }

        Ok(self)
    }

    /// Load orders from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a line is invalid.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrdersFixture = serde_norway::from_str(&contents)?;

        debug!(path = %file_path.display(), orders = fixture.orders.len(), "loading order fixtures");

        for (key, lines) in fixture.orders {
            let order = lines
                .iter()
                .map(ItemLine::try_from)
                .collect::<Result<ItemSet<_>, FixtureError>>()?;

            self.orders.insert(key, order);
        }

        Ok(self)
    }

    /// Load a complete fixture set (ranges and orders with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_ranges(name)?.load_orders(name)?;

        Ok(fixture)
    }

    /// Get a range by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the range is not found.
    pub fn range(&self, key: &str) -> Result<&ItemRange<VariantItem>, FixtureError> {
        self.ranges
            .get(key)
            .ok_or_else(|| FixtureError::RangeNotFound(key.to_string()))
    }

    /// Get an order by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found.
    pub fn order(&self, key: &str) -> Result<&ItemSet<ItemLine>, FixtureError> {
        self.orders
            .get(key)
            .ok_or_else(|| FixtureError::OrderNotFound(key.to_string()))
    }

    /// Range keys, sorted
    pub fn range_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.ranges.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Order keys, sorted
    pub fn order_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.orders.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
