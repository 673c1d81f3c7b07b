//! Pricewise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fixtures::{Fixture, FixtureError},
    items::{
        Item, ItemError, ItemLine, Priced, ranges::ItemRange, sets::ItemSet,
        variants::VariantItem,
    },
    prices::{AmountMode, CurrencyCode, Price, PriceError},
    pricing::{discounted, max, min, mul, parse_amount, price_to_decimal, price_to_int, sum},
};
