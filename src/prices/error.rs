//! Price errors

use thiserror::Error;

use crate::prices::currency::CurrencyCode;

/// Errors that can occur while constructing prices or doing price arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// A price was constructed without any currencies.
    #[error("price map cannot be empty")]
    EmptyPriceMap,

    /// A value that is not a price was supplied where a price was expected.
    #[error("invalid type for price, {found}. Must be 'Price'")]
    InvalidPriceType {
        /// Kind of the offending value
        found: &'static str,
    },

    /// The requested currency is not present in the price.
    #[error("price has no amount for currency {0}")]
    MissingCurrency(CurrencyCode),

    /// No prices were provided, so there is no currency set to work from.
    #[error("no prices provided; cannot determine currencies")]
    NoPrices,

    /// An amount could not be parsed as a decimal number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// An amount does not fit in minor units.
    #[error("amount overflowed minor units")]
    Overflow,

    /// A currency code was empty.
    #[error("currency code cannot be empty")]
    EmptyCurrencyCode,

    /// An amount cannot be represented exactly in a currency's minor units.
    #[error("amount for {0} cannot be represented in whole minor units")]
    SubMinorUnit(CurrencyCode),
}
