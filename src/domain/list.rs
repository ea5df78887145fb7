//! Positional list with optional per-line prefix glyph.

use std::fmt;

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::format::{is_printable, NEW_LINE};

const NIL_ITEM_MSG: &str = "the item to be added cannot be None";

/// Single value owned by a list at one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T> {
    value: T,
}

impl<T> Item<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> From<T> for Item<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// Ordered sequence of items.
///
/// The push family clamps indices into `[0, len]`, the pop family into
/// `[0, len - 1]`. [`OrderedList::at`] uses exact bounds instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedList<T> {
    items: Vec<Item<T>>,
    /// Glyph written before every line; always printable when set
    prefix: Option<char>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            prefix: None,
        }
    }
}

fn printable_prefix(prefix: Option<char>) -> Option<char> {
    prefix.filter(|&c| is_printable(c))
}

impl<T> OrderedList<T> {
    /// Creates an empty list. A non-printable glyph means no prefix.
    pub fn new(prefix: impl Into<Option<char>>) -> Self {
        Self {
            items: Vec::new(),
            prefix: printable_prefix(prefix.into()),
        }
    }

    pub fn prefix(&self) -> Option<char> {
        self.prefix
    }

    /// Setting a non-printable glyph clears the prefix.
    pub fn set_prefix(&mut self, prefix: impl Into<Option<char>>) {
        let prefix = prefix.into();
        self.prefix = printable_prefix(prefix);
        if prefix.is_some() && self.prefix.is_none() {
            debug!("non-printable prefix {:?} cleared", prefix);
        }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn push_front(&mut self, item: impl Into<Option<Item<T>>>) -> DomainResult<()> {
        let item = Self::require(item.into())?;
        self.items.insert(0, item);
        Ok(())
    }

    #[instrument(level = "trace", skip_all)]
    pub fn push_back(&mut self, item: impl Into<Option<Item<T>>>) -> DomainResult<()> {
        let item = Self::require(item.into())?;
        self.items.push(item);
        Ok(())
    }

    /// Inserts at `idx`. An index past the end appends, a non-positive index
    /// prepends.
    #[instrument(level = "trace", skip(self, item))]
    pub fn push_at(&mut self, item: impl Into<Option<Item<T>>>, idx: isize) -> DomainResult<()> {
        let item = Self::require(item.into())?;
        if idx >= self.items.len() as isize {
            return self.push_back(item);
        }
        if idx <= 0 {
            return self.push_front(item);
        }
        self.items.insert(idx as usize, item);
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<Item<T>> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items.remove(0))
    }

    pub fn pop_back(&mut self) -> Option<Item<T>> {
        self.items.pop()
    }

    /// Removes the item at `idx`. An index past the end removes the last
    /// item, a non-positive index the first one.
    #[instrument(level = "trace", skip(self))]
    pub fn pop_at(&mut self, idx: isize) -> Option<Item<T>> {
        if self.items.is_empty() {
            return None;
        }
        if idx >= self.items.len() as isize {
            return self.pop_back();
        }
        if idx <= 0 {
            return self.pop_front();
        }
        Some(self.items.remove(idx as usize))
    }

    /// Item at `idx`, or `None` when `idx` is negative or not below `len`.
    pub fn at(&self, idx: isize) -> Option<&Item<T>> {
        usize::try_from(idx).ok().and_then(|i| self.items.get(i))
    }

    pub fn at_mut(&mut self, idx: isize) -> Option<&mut Item<T>> {
        usize::try_from(idx).ok().and_then(|i| self.items.get_mut(i))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The stored items themselves, not a copy.
    pub fn slice(&self) -> &[Item<T>] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item<T>> {
        self.items.iter()
    }

    fn require(item: Option<Item<T>>) -> DomainResult<Item<T>> {
        item.ok_or_else(|| {
            debug!("rejected push: {}", NIL_ITEM_MSG);
            DomainError::invalid(NIL_ITEM_MSG)
        })
    }
}

impl<T: fmt::Display> OrderedList<T> {
    /// One line per item, joined by [`NEW_LINE`], each starting with
    /// `"<glyph> "` when a prefix is set. No trailing terminator.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl<T: fmt::Display> fmt::Display for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, item) in self.items.iter().enumerate() {
            if idx > 0 {
                f.write_str(NEW_LINE)?;
            }
            if let Some(prefix) = self.prefix {
                write!(f, "{} ", prefix)?;
            }
            write!(f, "{}", item.value)?;
        }
        Ok(())
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Item::new).collect(),
            prefix: None,
        }
    }
}

impl<T> Extend<T> for OrderedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Item::new));
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a Item<T>;
    type IntoIter = std::slice::Iter<'a, Item<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: i32) -> OrderedList<i32> {
        (0..n).collect()
    }

    #[test]
    fn test_item_value() {
        let mut item = Item::new("test");
        assert_eq!(*item.value(), "test");
        item.set_value("new");
        assert_eq!(item.into_value(), "new");
    }

    #[test]
    fn test_push_none_leaves_list_unchanged() {
        let mut list = numbers(3);
        assert!(list.push_front(None).is_err());
        assert!(list.push_back(None).is_err());
        assert!(list.push_at(None, 1).is_err());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_at_uses_exact_bounds() {
        let list = numbers(2);
        assert!(list.at(-1).is_none());
        assert!(list.at(2).is_none());
        assert_eq!(list.at(1).map(Item::value), Some(&1));
    }

    #[test]
    fn test_format_without_prefix() {
        let list = numbers(3);
        assert_eq!(list.format(), "0\n\r1\n\r2");
    }

    #[test]
    fn test_format_empty_list() {
        let list: OrderedList<i32> = OrderedList::new('*');
        assert_eq!(list.format(), "");
    }
}
