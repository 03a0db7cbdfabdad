//! A hash set holding values of several types.
use std::{any::Any, fmt::Debug, iter::FusedIterator};

use crate::{
    algebra::SetAlgebra,
    chain_table::{self, ChainEntry, ChainTable, DEFAULT_CAPACITY},
    error::SetError,
    type_tag::{Catalog, Tag, TypeRegistry},
    util::impl_iterator,
};
use keyset_util::hash::{Key, KeyHash};

/// A value of a catalog type stored together with its key.
#[derive(Clone, Debug)]
pub struct TaggedEntry<C> {
    payload: C,
    key: Key,
}

impl<C: Catalog> TaggedEntry<C> {
    /// Pairs a catalog value with its key.
    pub fn new(payload: C, key: Key) -> Self {
        TaggedEntry { payload, key }
    }

    /// Returns the tag of the stored value's type.
    pub fn tag(&self) -> Tag {
        self.payload.tag()
    }

    /// Returns the key of the stored value.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Returns the stored value as catalog enum.
    pub fn payload(&self) -> &C {
        &self.payload
    }

    /// Returns the stored value as catalog enum.
    pub fn into_payload(self) -> C {
        self.payload
    }

    /// Returns `true` if the stored value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.payload.downcast_ref::<T>().is_some()
    }

    /// Returns the stored value as `T`.
    ///
    /// Fails with [`SetError::WrongType`] if the stored value has a different type.
    pub fn get_as<T: Any>(&self) -> Result<&T, SetError> {
        self.payload.downcast_ref().ok_or(SetError::WrongType)
    }
}

impl<C: Catalog> ChainEntry for TaggedEntry<C> {
    type Probe = (Tag, Key);

    fn key(&self) -> Key {
        self.key
    }

    fn probe(&self) -> Self::Probe {
        (self.tag(), self.key)
    }
}

/// A hash set accepting values of the types listed in the catalog `C`.
///
/// Values are identified by their type and key, so values of different types never collide, even
/// when their keys are equal. Inserting a value of a type outside the catalog fails with
/// [`SetError::TypeNotAccepted`].
///
/// Buckets, growth and iteration order behave as for [`HashChainSet`](crate::HashChainSet).
pub struct CombinedSet<C> {
    registry: TypeRegistry,
    table: ChainTable<TaggedEntry<C>>,
}

impl<C: Catalog> Default for CombinedSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Catalog + Clone> Clone for CombinedSet<C> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            table: self.table.clone(),
        }
    }
}

impl<C: Catalog + Debug> Debug for CombinedSet<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter().map(TaggedEntry::payload)).finish()
    }
}

impl<C: Catalog> CombinedSet<C> {
    /// Returns an empty set with the default number of buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Returns an empty set with the given number of buckets.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: TypeRegistry::of::<C>(),
            table: ChainTable::with_capacity(capacity),
        }
    }

    /// Returns the registry of accepted types.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Returns the tag of `T`, or [`SetError::TypeNotAccepted`] if `T` is not accepted.
    pub fn tag_of<T: Any>(&self) -> Result<Tag, SetError> {
        self.registry.tag_of::<T>().map_err(|err| {
            log::trace!("type {} is not accepted", std::any::type_name::<T>());
            err
        })
    }

    /// Returns the name of the type with the given tag.
    pub fn type_name(&self, tag: Tag) -> Option<&'static str> {
        self.registry.type_name(tag)
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

    /// Returns an iterator over the stored entries.
    pub fn iter(&self) -> Iter<'_, C> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Inserts a value of an accepted type using the given key.
    ///
    /// Returns `false` and drops the passed value if a value of the same type and key is present.
    pub fn insert_with_key<T: Any>(&mut self, value: T, key: Key) -> Result<bool, SetError> {
        let tag = self.tag_of::<T>()?;
        let payload = C::wrap(&mut Some(value)).ok_or(SetError::Internal)?;
        debug_assert_eq!(payload.tag(), tag);
        self.table.insert(TaggedEntry::new(payload, key))
    }

    /// Inserts a value already wrapped in the catalog enum, using the given key.
    pub fn insert_payload(&mut self, payload: C, key: Key) -> Result<bool, SetError> {
        self.table.insert(TaggedEntry::new(payload, key))
    }

    /// Removes and returns the entry with the given type and key.
    pub fn remove_with_key<T: Any>(&mut self, key: Key) -> Result<TaggedEntry<C>, SetError> {
        let tag = self.tag_of::<T>()?;
        self.table.remove(key, (tag, key))
    }

    /// Returns `true` if a value with the given type and key is present.
    pub fn contains_key<T: Any>(&self, key: Key) -> Result<bool, SetError> {
        let tag = self.tag_of::<T>()?;
        Ok(self.table.contains(key, (tag, key)))
    }

    /// Returns the value with the given type and key.
    pub fn get_with_key<T: Any>(&self, key: Key) -> Result<&T, SetError> {
        let tag = self.tag_of::<T>()?;
        self.table
            .find(key, (tag, key))
            .ok_or(SetError::ValueNotFound)?
            .get_as()
    }

    /// Returns the first value in iteration order as `T`.
    ///
    /// Fails with [`SetError::EmptySet`] on an empty set and with [`SetError::WrongType`] if the
    /// first value has a different type.
    pub fn first_as<T: Any>(&self) -> Result<&T, SetError> {
        self.iter().next().ok_or(SetError::EmptySet)?.get_as()
    }

    /// Inserts a value of an accepted type, keyed by its content.
    pub fn insert<T: Any + KeyHash>(&mut self, value: T) -> Result<bool, SetError> {
        let key = value.key_hash();
        self.insert_with_key(value, key)
    }

    /// Removes and returns the entry with the type and key of the given value.
    pub fn remove<T: Any + KeyHash>(&mut self, value: &T) -> Result<TaggedEntry<C>, SetError> {
        self.remove_with_key::<T>(value.key_hash())
    }

    /// Returns `true` if a value with the type and key of the given value is present.
    pub fn contains<T: Any + KeyHash>(&self, value: &T) -> Result<bool, SetError> {
        self.contains_key::<T>(value.key_hash())
    }

    /// Inserts all values of an iterator and returns how many of them were newly inserted.
    ///
    /// Fails with [`SetError::TypeNotAccepted`] before inserting anything if `T` is not accepted.
    pub fn insert_all<T: Any + KeyHash>(
        &mut self,
        values: impl IntoIterator<Item = T>,
    ) -> Result<usize, SetError> {
        self.tag_of::<T>()?;
        let mut inserted = 0;
        for value in values {
            inserted += self.insert(value)? as usize;
        }
        Ok(inserted)
    }

    /// Inserts wrapped values of possibly different types, each paired with its key.
    ///
    /// Returns how many of them were newly inserted.
    pub fn insert_payloads(
        &mut self,
        payloads: impl IntoIterator<Item = (C, Key)>,
    ) -> Result<usize, SetError> {
        let mut inserted = 0;
        for (payload, key) in payloads {
            inserted += self.insert_payload(payload, key)? as usize;
        }
        Ok(inserted)
    }

    #[cfg(test)]
    pub(crate) fn check(&self) {
        self.table.check();
        for entry in self.iter() {
            assert!(self.registry.type_info(entry.tag()).is_some());
        }
    }

    #[cfg(test)]
    pub(crate) fn chain_len(&self, bucket: usize) -> usize {
        self.table.chain_len(bucket)
    }
}

impl<C: Catalog + Clone> SetAlgebra for CombinedSet<C> {
    type Entry = TaggedEntry<C>;
    type Entries<'s> = chain_table::Iter<'s, TaggedEntry<C>> where Self: 's;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.table.iter()
    }

    fn contains_entry(&self, entry: &Self::Entry) -> bool {
        self.table.contains(entry.key(), entry.probe())
    }

    fn insert_entry(&mut self, entry: Self::Entry) -> Result<bool, SetError> {
        self.table.insert(entry)
    }

    fn empty_like(&self) -> Self {
        Self::new()
    }
}

impl<C: Catalog + Clone> PartialEq for CombinedSet<C> {
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}

impl<C: Catalog + Clone> PartialOrd for CombinedSet<C> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.set_cmp(other)
    }
}

impl<'a, C: Catalog> IntoIterator for &'a CombinedSet<C> {
    type Item = &'a TaggedEntry<C>;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a [`CombinedSet`].
///
/// This struct is created by the [`iter`](CombinedSet::iter) method on [`CombinedSet`].
pub struct Iter<'a, C> {
    inner: chain_table::Iter<'a, TaggedEntry<C>>,
}

impl<C> Clone for Iter<'_, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, C> Iterator for Iter<'a, C> {
    type Item = &'a TaggedEntry<C>;

    impl_iterator!();
}

impl<C> ExactSizeIterator for Iter<'_, C> {}

impl<C> FusedIterator for Iter<'_, C> {}
