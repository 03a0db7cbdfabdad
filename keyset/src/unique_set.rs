//! A set of borrowed values identified by their address.
use std::{fmt::Debug, iter::FusedIterator};

use crate::{
    algebra::SetAlgebra,
    chain_table::{self, ChainEntry, ChainTable, DEFAULT_CAPACITY},
    error::SetError,
    util::impl_iterator,
};
use keyset_util::hash::{address_key, Key};

/// A reference stored together with the address it points to.
pub struct RefEntry<'a, T: ?Sized> {
    value: &'a T,
    key: Key,
}

impl<'a, T: ?Sized> RefEntry<'a, T> {
    /// Pairs a reference with its address.
    pub fn new(value: &'a T) -> Self {
        RefEntry {
            value,
            key: address_key(value),
        }
    }

    /// Returns the stored reference.
    pub fn value(&self) -> &'a T {
        self.value
    }

    /// Returns the address of the referenced value.
    pub fn key(&self) -> Key {
        self.key
    }
}

impl<T: ?Sized> Clone for RefEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for RefEntry<'_, T> {}

impl<T: ?Sized + Debug> Debug for RefEntry<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefEntry")
            .field("value", &self.value)
            .field("key", &format_args!("{:#x}", self.key))
            .finish()
    }
}

impl<T: ?Sized> ChainEntry for RefEntry<'_, T> {
    type Probe = Key;

    fn key(&self) -> Key {
        self.key
    }

    fn probe(&self) -> Key {
        self.key
    }
}

/// A set of references, identified by the address of the referenced value.
///
/// Two equal values stored at different places are distinct members, while the same value can be
/// inserted only once. The set borrows its members, so they outlive the set.
///
/// Buckets, growth and iteration order behave as for [`HashChainSet`](crate::HashChainSet).
pub struct UniqueSet<'a, T: ?Sized> {
    table: ChainTable<RefEntry<'a, T>>,
}

impl<T: ?Sized> Default for UniqueSet<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for UniqueSet<'_, T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<T: ?Sized + Debug> Debug for UniqueSet<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T: ?Sized> UniqueSet<'a, T> {
    /// Returns an empty set with the default number of buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Returns an empty set with the given number of buckets.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: ChainTable::with_capacity(capacity),
        }
    }

    /// Returns the number of references in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no references.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all references. The number of buckets stays unchanged.
    pub fn clear(&mut self) {
        self.table.clear()
    }

    /// Returns an iterator over the stored references.
    pub fn iter(&self) -> Iter<'_, 'a, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns the stored references, in iteration order.
    pub fn to_vec(&self) -> Vec<&'a T> {
        self.iter().collect()
    }

    /// Inserts a reference.
    ///
    /// Returns `false` if a reference to the same place is already present.
    pub fn insert(&mut self, value: &'a T) -> Result<bool, SetError> {
        self.table.insert(RefEntry::new(value))
    }

    /// Removes the reference to the same place as `value` and returns the stored reference.
    pub fn remove(&mut self, value: &T) -> Result<&'a T, SetError> {
        let key = address_key(value);
        self.table.remove(key, key).map(|entry| entry.value())
    }

    /// Returns `true` if a reference to the same place as `value` is present.
    pub fn contains(&self, value: &T) -> bool {
        let key = address_key(value);
        self.table.contains(key, key)
    }

    /// Inserts all references of an iterator and returns how many of them were newly inserted.
    pub fn insert_all(
        &mut self,
        values: impl IntoIterator<Item = &'a T>,
    ) -> Result<usize, SetError> {
        let mut inserted = 0;
        for value in values {
            inserted += self.insert(value)? as usize;
        }
        Ok(inserted)
    }

    #[cfg(test)]
    pub(crate) fn check(&self) {
        self.table.check();
        for entry in self.table.iter() {
            assert_eq!(entry.key(), address_key(entry.value()));
        }
    }
}

impl<'a, T: ?Sized> SetAlgebra for UniqueSet<'a, T> {
    type Entry = RefEntry<'a, T>;
    type Entries<'s> = chain_table::Iter<'s, RefEntry<'a, T>> where Self: 's;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.table.iter()
    }

    fn contains_entry(&self, entry: &Self::Entry) -> bool {
        self.table.contains(entry.key(), entry.key())
    }

    fn insert_entry(&mut self, entry: Self::Entry) -> Result<bool, SetError> {
        self.table.insert(entry)
    }

    fn empty_like(&self) -> Self {
        Self::new()
    }
}

impl<T: ?Sized> PartialEq for UniqueSet<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}

impl<T: ?Sized> PartialOrd for UniqueSet<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.set_cmp(other)
    }
}

impl<'s, 'a, T: ?Sized> IntoIterator for &'s UniqueSet<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'s, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the references stored in a [`UniqueSet`].
///
/// This struct is created by the [`iter`](UniqueSet::iter) method on [`UniqueSet`].
pub struct Iter<'s, 'a, T: ?Sized> {
    inner: chain_table::Iter<'s, RefEntry<'a, T>>,
}

impl<T: ?Sized> Clone for Iter<'_, '_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T: ?Sized> Iterator for Iter<'_, 'a, T> {
    type Item = &'a T;

    impl_iterator!(|entry: &RefEntry<'a, T>| entry.value());
}

impl<T: ?Sized> ExactSizeIterator for Iter<'_, '_, T> {}

impl<T: ?Sized> FusedIterator for Iter<'_, '_, T> {}
