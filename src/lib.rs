//! Pricewise
//!
//! Multi-currency prices held in whole minor units, and the items, ranges and
//! sets that build totals on top of them.

pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod utils;
