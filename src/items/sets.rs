//! Item Sets

use crate::{
    items::{ItemError, ItemLine, Priced},
    prices::Price,
    pricing::sum,
};

/// A set of lines, such as an order or a basket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSet<T = ItemLine> {
    items: Vec<T>,
}

impl<T> ItemSet<T> {
    /// Create a new, empty item set.
    pub fn new() -> Self {
        ItemSet { items: Vec::new() }
    }

    /// Create a new item set with the given lines.
    pub fn with_items(items: impl Into<Vec<T>>) -> Self {
        ItemSet {
            items: items.into(),
        }
    }

    /// Append a line to the set.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Iterate over the lines in the set.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Get a line by its index.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Get the number of lines in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total of a single line.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if the line cannot be priced.
    pub fn sub_total<S: ?Sized>(&self, item: &T, selector: &S) -> Result<Price, ItemError>
    where
        T: Priced<S>,
    {
        item.total(selector)
    }

    /// Sum of every line total.
    ///
    /// # Errors
    ///
    /// - [`ItemError::EmptySet`]: the set has no lines.
    /// - [`ItemError::Price`]: a line lacks one of the first line's currencies, or
    ///   a total overflowed.
    pub fn total<S: ?Sized>(&self, selector: &S) -> Result<Price, ItemError>
    where
        T: Priced<S>,
    {
        if self.is_empty() {
            return Err(ItemError::EmptySet);
        }

        let sub_totals = self
            .items
            .iter()
            .map(|item| self.sub_total(item, selector))
            .collect::<Result<Vec<_>, ItemError>>()?;

        Ok(sum(&sub_totals)?)
    }
}

impl<T> Default for ItemSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ItemSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ItemSet {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for ItemSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for ItemSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ItemSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
