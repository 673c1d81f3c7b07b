//! Item Ranges

use smallvec::SmallVec;

use crate::{
    items::{Item, ItemError, Priced},
    prices::Price,
    pricing::{max, min},
};

/// A group of variants of one product, such as the sizes of a shirt.
///
/// The variants are fixed once the range is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRange<T = Item> {
    items: SmallVec<[T; 8]>,
}

impl<T> ItemRange<T> {
    /// Create a new item range from its variants.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        ItemRange {
            items: items.into_iter().collect(),
        }
    }

    /// Iterate over the variants in the range.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Get a variant by its index.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Get the number of variants in the range.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Price of a single variant in this range.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if the variant cannot be priced.
    pub fn price_per_item<S: ?Sized>(&self, item: &T, selector: &S) -> Result<Price, ItemError>
    where
        T: Priced<S>,
    {
        item.price(selector)
    }

    /// Lowest and highest variant price, per currency.
    ///
    /// # Errors
    ///
    /// - [`ItemError::EmptyRange`]: the range has no variants.
    /// - [`ItemError::Price`]: a variant lacks one of the first variant's currencies.
    pub fn price_range<S: ?Sized>(&self, selector: &S) -> Result<(Price, Price), ItemError>
    where
        T: Priced<S>,
    {
        if self.is_empty() {
            return Err(ItemError::EmptyRange);
        }

        let prices = self
            .items
            .iter()
            .map(|item| self.price_per_item(item, selector))
            .collect::<Result<Vec<_>, ItemError>>()?;

        Ok((min(&prices)?, max(&prices)?))
    }
}

impl<T> Default for ItemRange<T> {
    fn default() -> Self {
        ItemRange {
            items: SmallVec::new(),
        }
    }
}

impl<T> FromIterator<T> for ItemRange<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> IntoIterator for ItemRange<T> {
    type Item = T;
    type IntoIter = smallvec::IntoIter<[T; 8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ItemRange<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{items::variants::VariantItem, prices::PriceError};

    use super::*;

    fn usd(cents: i64) -> Result<Price, PriceError> {
        Price::from_minor([("usd", cents)])
    }

    fn shirt_sizes() -> Result<ItemRange, PriceError> {
        Ok(ItemRange::new([
            Item::new(usd(500)?),
            Item::new(usd(750)?),
            Item::new(usd(325)?),
        ]))
    }

    #[test]
    fn price_range_returns_min_and_max() -> TestResult {
        let range = shirt_sizes()?;

        let (low, high) = range.price_range(&())?;

        assert_eq!(low, usd(325)?);
        assert_eq!(high, usd(750)?);

        Ok(())
    }

    #[test]
    fn price_range_is_per_currency() -> TestResult {
        let range = ItemRange::new([
            Item::new(Price::from_minor([("usd", 500), ("eur", 700)])?),
            Item::new(Price::from_minor([("usd", 600), ("eur", 400)])?),
        ]);

        let (low, high) = range.price_range(&())?;

        assert_eq!(low, Price::from_minor([("usd", 500), ("eur", 400)])?);
        assert_eq!(high, Price::from_minor([("usd", 600), ("eur", 700)])?);

        Ok(())
    }

    #[test]
    fn empty_range_returns_error() {
        let range: ItemRange = ItemRange::default();

        assert_eq!(range.price_range(&()), Err(ItemError::EmptyRange));
    }

    #[test]
    fn single_variant_range_is_degenerate() -> TestResult {
        let range = ItemRange::new([Item::new(usd(999)?)]);

        assert_eq!(range.price_range(&())?, (usd(999)?, usd(999)?));

        Ok(())
    }

    #[test]
    fn price_range_uses_selector() -> TestResult {
        let range = ItemRange::new([
            VariantItem::new(usd(1000)?).with_override("wholesale", usd(800)?),
            VariantItem::new(usd(1200)?).with_override("wholesale", usd(900)?),
        ]);

        assert_eq!(range.price_range(&())?, (usd(1000)?, usd(1200)?));
        assert_eq!(range.price_range("wholesale")?, (usd(800)?, usd(900)?));

        Ok(())
    }

    #[test]
    fn accessors_and_iteration() -> TestResult {
        let range = shirt_sizes()?;

        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
        assert_eq!(range.get(1).map(Item::unit_price), Some(&usd(750)?));
        assert!(range.get(3).is_none());

        let cheap: ItemRange = range
            .iter()
            .filter(|item| item.unit_price().value("usd").is_ok_and(|cents| cents < 600))
            .cloned()
            .collect();

        assert_eq!(cheap.len(), 2);

        let total_cents: i64 = (&cheap)
            .into_iter()
            .filter_map(|item| item.unit_price().value("usd").ok())
            .sum();

        assert_eq!(total_cents, 825);

        Ok(())
    }
}
