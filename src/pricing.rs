//! Pricing
//!
//! Arithmetic over [`Price`] values. Everything stays in whole minor units;
//! fractional results are rounded to the nearest cent, half away from zero.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use tracing::debug;

use crate::prices::{Price, PriceError};

/// Convert a decimal amount to cents, rounding to two decimal places first.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] if the result does not fit in an `i64`.
pub fn price_to_int(amount: Decimal) -> Result<i64, PriceError> {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or(PriceError::Overflow)
}

/// Convert cents back to a decimal string with two fractional digits.
pub fn price_to_decimal(amount: i64) -> String {
    format!("{:.2}", Decimal::new(amount, 2))
}

/// Parse a decimal amount such as `"10.50"`.
///
/// # Errors
///
/// Returns [`PriceError::InvalidAmount`] if `s` is not a decimal number.
pub fn parse_amount(s: &str) -> Result<Decimal, PriceError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidAmount(s.to_string()))
}

/// Round a possibly fractional minor-unit amount to whole cents.
pub(crate) fn round_minor(amount: Decimal) -> Result<i64, PriceError> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PriceError::Overflow)
}

/// Multiply every amount in `price` by `multiplier`.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] if a product does not fit in minor units.
pub fn mul(price: &Price, multiplier: impl Into<Decimal>) -> Result<Price, PriceError> {
    let multiplier = multiplier.into();

    price.try_map_amounts(|_, amount| {
        Decimal::from(amount)
            .checked_mul(multiplier)
            .ok_or(PriceError::Overflow)
            .and_then(round_minor)
    })
}

/// Take `rate` off every amount in `price`, e.g. a rate of `0.1` is 10% off.
///
/// The rate is not bounds-checked: a negative rate raises the price and a rate
/// above one makes it negative.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] if a discounted amount does not fit in minor units.
pub fn discounted(price: &Price, rate: Decimal) -> Result<Price, PriceError> {
    price.try_map_amounts(|_, amount| {
        let amount = Decimal::from(amount);

        amount
            .checked_mul(rate)
            .and_then(|less| amount.checked_sub(less))
            .ok_or(PriceError::Overflow)
            .and_then(round_minor)
    })
}

/// Sum prices per currency.
///
/// The currencies of the first price decide the currencies of the result.
///
/// # Errors
///
/// - [`PriceError::NoPrices`]: `prices` was empty.
/// - [`PriceError::MissingCurrency`]: a later price lacks one of the first price's currencies.
/// - [`PriceError::Overflow`]: a total does not fit in minor units.
pub fn sum<'a>(prices: impl IntoIterator<Item = &'a Price>) -> Result<Price, PriceError> {
    fold_currencies(prices, "sum", i64::checked_add)
}

/// Lowest amount per currency across `prices`.
///
/// # Errors
///
/// - [`PriceError::NoPrices`]: `prices` was empty.
/// - [`PriceError::MissingCurrency`]: a later price lacks one of the first price's currencies.
pub fn min<'a>(prices: impl IntoIterator<Item = &'a Price>) -> Result<Price, PriceError> {
    fold_currencies(prices, "min", |a, b| Some(a.min(b)))
}

/// Highest amount per currency across `prices`.
///
/// # Errors
///
/// - [`PriceError::NoPrices`]: `prices` was empty.
/// - [`PriceError::MissingCurrency`]: a later price lacks one of the first price's currencies.
pub fn max<'a>(prices: impl IntoIterator<Item = &'a Price>) -> Result<Price, PriceError> {
    fold_currencies(prices, "max", |a, b| Some(a.max(b)))
}

/// Fold each of the first price's currencies across every price with `op`.
fn fold_currencies<'a>(
    prices: impl IntoIterator<Item = &'a Price>,
    operation: &'static str,
    op: impl Fn(i64, i64) -> Option<i64>,
) -> Result<Price, PriceError> {
    let mut prices = prices.into_iter();
    let first = prices.next().ok_or(PriceError::NoPrices)?;
    let mut acc = first.clone();

    for price in prices {
        for dropped in price.currencies().filter(|code| !first.contains(code)) {
            debug!(currency = %dropped, operation, "currency missing from first price, dropping");
        }

        acc = acc.try_map_amounts(|code, amount| {
            op(amount, price.value(code)?).ok_or(PriceError::Overflow)
        })?;
    }

    Ok(acc)
}
