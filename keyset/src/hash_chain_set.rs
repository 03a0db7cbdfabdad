//! A hash set of values identified by their key.
use std::{borrow::Borrow, fmt::Debug, iter::FusedIterator};

use crate::{
    algebra::SetAlgebra,
    chain_table::{self, ChainTable, DEFAULT_CAPACITY},
    entry::KeyedEntry,
    error::SetError,
    util::impl_iterator,
};
use keyset_util::hash::{Key, KeyHash};

/// A hash set storing values in separately chained buckets.
///
/// Values are identified by their [`Key`]. Inserting a value whose key is already present keeps
/// the stored value and reports that nothing was inserted. For values that implement [`KeyHash`],
/// the key is derived from the value's content, otherwise it is supplied by the caller using the
/// `*_with_key` methods.
///
/// Iteration order is by bucket index and, within a bucket, by insertion order. It changes when
/// the set grows.
pub struct HashChainSet<T> {
    table: ChainTable<KeyedEntry<T>>,
}

impl<T> Default for HashChainSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for HashChainSet<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<T: Debug> Debug for HashChainSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> HashChainSet<T> {
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

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all values. The number of buckets stays unchanged.
    pub fn clear(&mut self) {
        self.table.clear()
    }

    /// Returns an iterator over the values of the set.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the values of the set paired with their keys.
    pub fn entries(&self) -> chain_table::Iter<'_, KeyedEntry<T>> {
        self.table.iter()
    }

    /// Inserts a value using the given key.
    ///
    /// Returns `false` and drops the passed value if the key is already present.
    pub fn insert_with_key(&mut self, value: T, key: Key) -> Result<bool, SetError> {
        self.table.insert(KeyedEntry::new(value, key))
    }

    /// Removes and returns the value with the given key.
    pub fn remove_with_key(&mut self, key: Key) -> Result<T, SetError> {
        self.table.remove(key, key).map(KeyedEntry::into_value)
    }

    /// Returns `true` if a value with the given key is present.
    pub fn contains_key(&self, key: Key) -> bool {
        self.table.contains(key, key)
    }

    /// Returns the value with the given key, if present.
    pub fn get_with_key(&self, key: Key) -> Option<&T> {
        self.table.find(key, key).map(KeyedEntry::value)
    }

    /// Returns a vector of clones of all values, in iteration order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn check(&self) {
        self.table.check()
    }

    #[cfg(test)]
    pub(crate) fn chain_len(&self, bucket: usize) -> usize {
        self.table.chain_len(bucket)
    }
}

impl<T: KeyHash> HashChainSet<T> {
    /// Inserts a value, keyed by its content.
    ///
    /// Returns `false` and drops the passed value if an equally keyed value is already present.
    pub fn insert(&mut self, value: T) -> Result<bool, SetError> {
        let key = value.key_hash();
        self.insert_with_key(value, key)
    }

    /// Removes and returns the value keyed like the given value.
    ///
    /// Fails with [`SetError::ValueNotFound`] if no such value is present.
    pub fn remove<Q>(&mut self, value: &Q) -> Result<T, SetError>
    where
        T: Borrow<Q>,
        Q: KeyHash + ?Sized,
    {
        self.remove_with_key(value.key_hash())
    }

    /// Returns `true` if a value keyed like the given value is present.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: KeyHash + ?Sized,
    {
        self.contains_key(value.key_hash())
    }

    /// Returns the stored value keyed like the given value, if present.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: KeyHash + ?Sized,
    {
        self.get_with_key(value.key_hash())
    }

    /// Inserts all values of an iterator and returns how many of them were newly inserted.
    pub fn insert_all(&mut self, values: impl IntoIterator<Item = T>) -> Result<usize, SetError> {
        let mut inserted = 0;
        for value in values {
            inserted += self.insert(value)? as usize;
        }
        Ok(inserted)
    }
}

impl<T: Clone> SetAlgebra for HashChainSet<T> {
    type Entry = KeyedEntry<T>;
    type Entries<'s> = chain_table::Iter<'s, KeyedEntry<T>> where Self: 's;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.table.iter()
    }

    fn contains_entry(&self, entry: &Self::Entry) -> bool {
        self.contains_key(entry.key())
    }

    fn insert_entry(&mut self, entry: Self::Entry) -> Result<bool, SetError> {
        self.table.insert(entry)
    }

    fn empty_like(&self) -> Self {
        Self::new()
    }
}

impl<T: Clone> PartialEq for HashChainSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}

impl<T: Clone> PartialOrd for HashChainSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.set_cmp(other)
    }
}

impl<'a, T> IntoIterator for &'a HashChainSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the values of a [`HashChainSet`].
///
/// This struct is created by the [`iter`](HashChainSet::iter) method on [`HashChainSet`].
pub struct Iter<'a, T> {
    inner: chain_table::Iter<'a, KeyedEntry<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    impl_iterator!(KeyedEntry::value);
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
