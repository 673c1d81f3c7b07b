//! Prices

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};
use smallvec::SmallVec;

use crate::pricing::{parse_amount, price_to_decimal, price_to_int, round_minor};

pub mod currency;
pub mod error;

pub use currency::CurrencyCode;
pub use error::PriceError;

/// How the amounts handed to [`Price::new`] should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountMode {
    /// Amounts are decimal major units (e.g. `10.50`) and are converted to cents.
    Decimal,

    /// Amounts are already minor units (e.g. `1050`).
    Minor,
}

/// A multi-currency price, held as whole minor units per currency.
///
/// A price always has at least one currency and is never mutated; every
/// arithmetic operation in [`crate::pricing`] returns a new `Price`.
#[derive(Clone, Debug)]
pub struct Price {
    entries: SmallVec<[(CurrencyCode, i64); 4]>,
}

impl Price {
    /// Creates a new price from currency/amount pairs.
    ///
    /// In [`AmountMode::Decimal`] every amount is rounded to two decimal places and
    /// scaled to cents. In [`AmountMode::Minor`] amounts are taken as cents, with any
    /// fractional part rounded half away from zero.
    ///
    /// # Errors
    ///
    /// - [`PriceError::EmptyPriceMap`]: no currencies were supplied.
    /// - [`PriceError::Overflow`]: an amount does not fit in minor units.
    pub fn new<K, V>(
        entries: impl IntoIterator<Item = (K, V)>,
        mode: AmountMode,
    ) -> Result<Self, PriceError>
    where
        K: Into<CurrencyCode>,
        V: Into<Decimal>,
    {
        let entries = entries
            .into_iter()
            .map(|(code, amount)| {
                let amount = amount.into();
                let minor = match mode {
                    AmountMode::Decimal => price_to_int(amount)?,
                    AmountMode::Minor => round_minor(amount)?,
                };

                Ok((code.into(), minor))
            })
            .collect::<Result<Vec<_>, PriceError>>()?;

        Self::from_entries(entries)
    }

    /// Creates a new price from decimal amounts, converting them to cents.
    ///
    /// # Errors
    ///
    /// See [`Price::new`].
    pub fn from_decimal<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self, PriceError>
    where
        K: Into<CurrencyCode>,
        V: Into<Decimal>,
    {
        Self::new(entries, AmountMode::Decimal)
    }

    /// Creates a new price from amounts that are already in cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::EmptyPriceMap`] if no currencies were supplied.
    pub fn from_minor<K>(entries: impl IntoIterator<Item = (K, i64)>) -> Result<Self, PriceError>
    where
        K: Into<CurrencyCode>,
    {
        Self::from_entries(entries.into_iter().map(|(code, amount)| (code.into(), amount)))
    }

    /// Build a price from normalised entries. Later duplicates replace earlier ones.
    pub(crate) fn from_entries(
        entries: impl IntoIterator<Item = (CurrencyCode, i64)>,
    ) -> Result<Self, PriceError> {
        let mut collected: SmallVec<[(CurrencyCode, i64); 4]> = SmallVec::new();

        for (code, amount) in entries {
            if code.as_str().is_empty() {
                return Err(PriceError::EmptyCurrencyCode);
            }

            match collected.iter_mut().find(|(existing, _)| *existing == code) {
                Some(slot) => slot.1 = amount,
                None => collected.push((code, amount)),
            }
        }

        if collected.is_empty() {
            return Err(PriceError::EmptyPriceMap);
        }

        Ok(Self { entries: collected })
    }

    /// Apply `f` to every amount, keeping the currency set.
    pub(crate) fn try_map_amounts(
        &self,
        mut f: impl FnMut(&CurrencyCode, i64) -> Result<i64, PriceError>,
    ) -> Result<Self, PriceError> {
        let entries = self
            .entries
            .iter()
            .map(|(code, amount)| Ok((code.clone(), f(code, *amount)?)))
            .collect::<Result<SmallVec<_>, PriceError>>()?;

        Ok(Self { entries })
    }

    /// Returns the currencies in this price, in the order they were supplied.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.entries.iter().map(|(code, _)| code)
    }

    /// Iterate over currency/amount pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, i64)> {
        self.entries.iter().map(|(code, amount)| (code, *amount))
    }

    /// Number of currencies in the price.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a price cannot be constructed without a currency.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether the price has an amount for `currency` (case-insensitive).
    pub fn contains(&self, currency: impl AsRef<str>) -> bool {
        self.lookup(currency.as_ref()).is_some()
    }

    /// Returns the amount in cents for `currency` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::MissingCurrency`] if the price has no such currency.
    pub fn value(&self, currency: impl AsRef<str>) -> Result<i64, PriceError> {
        let currency = currency.as_ref();

        self.lookup(currency)
            .ok_or_else(|| PriceError::MissingCurrency(CurrencyCode::new(currency)))
    }

    /// Returns the amount for `currency` as a two-digit decimal string.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::MissingCurrency`] if the price has no such currency.
    pub fn to_decimal(&self, currency: impl AsRef<str>) -> Result<String, PriceError> {
        self.value(currency).map(price_to_decimal)
    }

    /// Alias of [`Price::to_decimal`].
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::MissingCurrency`] if the price has no such currency.
    pub fn net(&self, currency: impl AsRef<str>) -> Result<String, PriceError> {
        self.to_decimal(currency)
    }

    /// Returns the amount for an ISO currency as [`Money`].
    ///
    /// Cents are rescaled to the currency's own exponent, so `5.00 JPY` becomes
    /// `¥5` and `1.00 BHD` becomes 1000 fils.
    ///
    /// # Errors
    ///
    /// - [`PriceError::MissingCurrency`]: the price has no such currency.
    /// - [`PriceError::SubMinorUnit`]: the amount has cents the currency cannot hold.
    /// - [`PriceError::Overflow`]: the rescaled amount does not fit in an `i64`.
    pub fn money(
        &self,
        currency: &'static iso::Currency,
    ) -> Result<Money<'static, iso::Currency>, PriceError> {
        let code = CurrencyCode::from(currency);
        let cents = self.value(&code)?;
        let minor = rescale(cents, CENT_EXPONENT, currency.exponent, &code)?;

        Ok(Money::from_minor(minor, currency))
    }

    fn lookup(&self, currency: &str) -> Option<i64> {
        let code = CurrencyCode::new(currency);

        self.entries
            .iter()
            .find(|(existing, _)| *existing == code)
            .map(|(_, amount)| *amount)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(code, amount)| other.lookup(code.as_str()) == Some(*amount))
    }
}

impl Eq for Price {}

impl TryFrom<Money<'_, iso::Currency>> for Price {
    type Error = PriceError;

    /// Builds a single-currency price, rescaling the money's minor units to cents.
    fn try_from(money: Money<'_, iso::Currency>) -> Result<Self, Self::Error> {
        let currency = money.currency();
        let code = CurrencyCode::from(currency);
        let cents = rescale(
            money.to_minor_units(),
            currency.exponent,
            CENT_EXPONENT,
            &code,
        )?;

        Self::from_entries([(code, cents)])
    }
}

/// Prices always hold hundredths of a major unit.
const CENT_EXPONENT: u32 = 2;

/// Move `amount` from `from` decimal places to `to` decimal places without losing precision.
fn rescale(amount: i64, from: u32, to: u32, code: &CurrencyCode) -> Result<i64, PriceError> {
    let factor = 10_i64
        .checked_pow(to)
        .map(Decimal::from)
        .ok_or(PriceError::Overflow)?;

    let scaled = Decimal::try_new(amount, from)
        .map_err(|_err| PriceError::Overflow)?
        .checked_mul(factor)
        .ok_or(PriceError::Overflow)?;

    if !scaled.fract().is_zero() {
        return Err(PriceError::SubMinorUnit(code.clone()));
    }

    scaled.to_i64().ok_or(PriceError::Overflow)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (code, amount)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{} {code}", price_to_decimal(*amount))?;
        }

        Ok(())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    /// Parses `"AMOUNT CODE"` pairs separated by commas, e.g. `"10.00 USD, 9.50 EUR"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entries = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut parts = part.split_whitespace();

                match (parts.next(), parts.next(), parts.next()) {
                    (Some(amount), Some(code), None) => Ok((code, parse_amount(amount)?)),
                    _ => Err(PriceError::InvalidAmount(format!(
                        "expected format 'AMOUNT CURRENCY', got: {part}"
                    ))),
                }
            })
            .collect::<Result<Vec<_>, PriceError>>()?;

        Self::from_decimal(entries)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl<'de> Visitor<'de> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of currency codes to minor units")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Price, A::Error> {
                let mut entries = Vec::new();

                while let Some((code, amount)) = map.next_entry::<CurrencyCode, i64>()? {
                    entries.push((code, amount));
                }

                Price::from_entries(entries).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_map(PriceVisitor)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_decimal_converts_to_cents() -> TestResult {
        let price = Price::from_decimal([("usd", Decimal::new(1050, 2))])?;

        assert_eq!(price.value("usd")?, 1050);

        Ok(())
    }

    #[test]
    fn from_decimal_rounds_to_two_places() -> TestResult {
        let price = Price::from_decimal([
            ("usd", Decimal::new(10_005, 3)),
            ("eur", Decimal::new(-10_005, 3)),
        ])?;

        assert_eq!(price.value("usd")?, 1001);
        assert_eq!(price.value("eur")?, -1001);

        Ok(())
    }

    #[test]
    fn minor_mode_keeps_cents() -> TestResult {
        let price = Price::new([("gbp", 299)], AmountMode::Minor)?;

        assert_eq!(price.value("gbp")?, 299);

        Ok(())
    }

    #[test]
    fn minor_mode_rounds_fractional_cents() -> TestResult {
        let price = Price::new([("gbp", Decimal::new(2995, 1))], AmountMode::Minor)?;

        assert_eq!(price.value("gbp")?, 300);

        Ok(())
    }

    #[test]
    fn empty_map_is_rejected_in_every_mode() {
        let none: [(&str, i64); 0] = [];

        assert_eq!(Price::from_minor(none), Err(PriceError::EmptyPriceMap));
        assert_eq!(Price::from_decimal(none), Err(PriceError::EmptyPriceMap));
        assert_eq!(
            Price::new(none, AmountMode::Minor),
            Err(PriceError::EmptyPriceMap)
        );
    }

    #[test]
    fn lookup_is_case_insensitive() -> TestResult {
        let price = Price::from_minor([("USD", 100)])?;

        assert_eq!(price.value("usd")?, 100);
        assert_eq!(price.value("Usd")?, 100);
        assert!(price.contains("USD"));

        Ok(())
    }

    #[test]
    fn missing_currency_is_reported() -> TestResult {
        let price = Price::from_minor([("usd", 100)])?;

        assert_eq!(
            price.value("EUR"),
            Err(PriceError::MissingCurrency(CurrencyCode::new("eur")))
        );
        assert!(price.to_decimal("eur").is_err());

        Ok(())
    }

    #[test]
    fn blank_currency_codes_are_rejected() {
        assert_eq!(
            Price::from_minor([("", 5)]),
            Err(PriceError::EmptyCurrencyCode)
        );
        assert_eq!(
            Price::from_minor([("usd", 5), ("  ", 1)]),
            Err(PriceError::EmptyCurrencyCode)
        );
        assert!(serde_norway::from_str::<Price>("'': 500").is_err());
    }

    #[test]
    fn later_duplicate_currency_wins() -> TestResult {
        let price = Price::from_minor([("usd", 100), ("USD", 200)])?;

        assert_eq!(price.len(), 1);
        assert_eq!(price.value("usd")?, 200);

        Ok(())
    }

    #[test]
    fn to_decimal_and_net_format_two_digits() -> TestResult {
        let price = Price::from_minor([("usd", 1050), ("eur", -5)])?;

        assert_eq!(price.to_decimal("usd")?, "10.50");
        assert_eq!(price.net("eur")?, "-0.05");

        Ok(())
    }

    #[test]
    fn equality_ignores_currency_order() -> TestResult {
        let a = Price::from_minor([("usd", 100), ("eur", 90)])?;
        let b = Price::from_minor([("eur", 90), ("usd", 100)])?;
        let c = Price::from_minor([("usd", 100)])?;

        assert_eq!(a, b);
        assert_ne!(a, c);

        Ok(())
    }

    #[test]
    fn currencies_keep_insertion_order() -> TestResult {
        let price = Price::from_minor([("usd", 100), ("eur", 90), ("gbp", 80)])?;

        let codes: Vec<&str> = price.currencies().map(CurrencyCode::as_str).collect();

        assert_eq!(codes, vec!["usd", "eur", "gbp"]);

        Ok(())
    }

    #[test]
    fn display_and_parse_agree() -> TestResult {
        let price: Price = "10.00 USD, 9.5 eur".parse()?;

        assert_eq!(price.to_string(), "10.00 USD, 9.50 EUR");
        assert_eq!(price.to_string().parse::<Price>()?, price);

        Ok(())
    }

    #[test]
    fn parse_rejects_malformed_pairs() {
        assert!(matches!(
            "10.00USD".parse::<Price>(),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            "ten USD".parse::<Price>(),
            Err(PriceError::InvalidAmount(_))
        ));
        assert_eq!("".parse::<Price>(), Err(PriceError::EmptyPriceMap));
    }

    #[test]
    fn money_round_trip() -> TestResult {
        let price = Price::try_from(Money::from_minor(250, iso::GBP))?;

        assert_eq!(price.value("gbp")?, 250);
        assert_eq!(price.money(iso::GBP)?, Money::from_minor(250, iso::GBP));
        assert!(price.money(iso::USD).is_err());

        Ok(())
    }

    #[test]
    fn money_rescales_zero_exponent_currencies() -> TestResult {
        let price = Price::try_from(Money::from_minor(500, iso::JPY))?;

        assert_eq!(price.value("jpy")?, 50_000);
        assert_eq!(price.to_decimal("jpy")?, "500.00");

        let parsed: Price = "500.00 JPY".parse()?;

        assert_eq!(parsed.money(iso::JPY)?, Money::from_minor(500, iso::JPY));

        Ok(())
    }

    #[test]
    fn money_rescales_three_exponent_currencies() -> TestResult {
        let price: Price = "1.00 BHD".parse()?;

        assert_eq!(price.money(iso::BHD)?, Money::from_minor(1000, iso::BHD));
        assert_eq!(
            Price::try_from(Money::from_minor(1250, iso::BHD))?.value("bhd")?,
            125
        );

        Ok(())
    }

    #[test]
    fn money_rejects_amounts_below_minor_units() -> TestResult {
        let yen: Price = "0.05 JPY".parse()?;

        assert_eq!(
            yen.money(iso::JPY),
            Err(PriceError::SubMinorUnit(CurrencyCode::new("jpy")))
        );
        assert_eq!(
            Price::try_from(Money::from_minor(105, iso::BHD)),
            Err(PriceError::SubMinorUnit(CurrencyCode::new("bhd")))
        );

        Ok(())
    }

    #[test]
    fn serde_uses_minor_unit_map() -> TestResult {
        let price = Price::from_minor([("usd", 1000), ("eur", 900)])?;

        let yaml = serde_norway::to_string(&price)?;
        let back: Price = serde_norway::from_str(&yaml)?;

        assert_eq!(back, price);

        let empty = serde_norway::from_str::<Price>("{}");

        assert!(empty.is_err());

        Ok(())
    }
}
