//! Items

use thiserror::Error;

use crate::{
    prices::{Price, PriceError},
    pricing::mul,
};

pub mod ranges;
pub mod sets;
pub mod variants;

/// Errors related to item construction or totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    /// A price range was requested from a range with no items.
    #[error("cannot calculate a price range for an empty item range")]
    EmptyRange,

    /// A total was requested from a set with no items.
    #[error("cannot calculate a total for an empty item set")]
    EmptySet,

    /// An item line was given a quantity of zero.
    #[error("item line quantity must be at least 1")]
    ZeroQuantity,

    /// Wrapped price arithmetic error.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Something that can be priced per unit and in total.
///
/// `S` is the selector type: caller-supplied context that a priced thing may
/// use to decide which price applies. Most implementations ignore it.
pub trait Priced<S: ?Sized = ()> {
    /// Returns the price of a single unit.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if the unit price cannot be determined.
    fn price_per_item(&self, selector: &S) -> Result<Price, ItemError>;

    /// Returns the price of this item in its current context.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if the price cannot be determined.
    fn price(&self, selector: &S) -> Result<Price, ItemError> {
        self.price_per_item(selector)
    }

    /// Number of units.
    fn quantity(&self) -> u32 {
        1
    }

    /// Returns the unit price multiplied by the quantity.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if the unit price cannot be determined or the
    /// multiplication overflows.
    fn total(&self, selector: &S) -> Result<Price, ItemError> {
        Ok(mul(&self.price_per_item(selector)?, self.quantity())?)
    }
}

impl<S: ?Sized, T: Priced<S> + ?Sized> Priced<S> for &T {
    fn price_per_item(&self, selector: &S) -> Result<Price, ItemError> {
        (**self).price_per_item(selector)
    }

    fn price(&self, selector: &S) -> Result<Price, ItemError> {
        (**self).price(selector)
    }

    fn quantity(&self) -> u32 {
        (**self).quantity()
    }

    fn total(&self, selector: &S) -> Result<Price, ItemError> {
        (**self).total(selector)
    }
}

/// A single item or variant with a unit price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    price: Price,
}

impl Item {
    /// Creates a new item with the given price
    pub fn new(price: Price) -> Self {
        Self { price }
    }

    /// Returns the unit price of the item
    pub fn unit_price(&self) -> &Price {
        &self.price
    }
}

impl<S: ?Sized> Priced<S> for Item {
    fn price_per_item(&self, _selector: &S) -> Result<Price, ItemError> {
        Ok(self.price.clone())
    }
}

/// A single line of an order: a unit price and a quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemLine {
    price: Price,
    quantity: u32,
}

impl ItemLine {
    /// Creates a new line with a quantity of one.
    pub fn new(price: Price) -> Self {
        Self { price, quantity: 1 }
    }

    /// Creates a new line with the given quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::ZeroQuantity`] if `quantity` is zero.
    pub fn with_quantity(price: Price, quantity: u32) -> Result<Self, ItemError> {
        if quantity == 0 {
            return Err(ItemError::ZeroQuantity);
        }

        Ok(Self { price, quantity })
    }

    /// Returns the unit price of the line
    pub fn unit_price(&self) -> &Price {
        &self.price
    }
}

impl<S: ?Sized> Priced<S> for ItemLine {
    fn price_per_item(&self, _selector: &S) -> Result<Price, ItemError> {
        Ok(self.price.clone())
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}
