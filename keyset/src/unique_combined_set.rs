//! A set of borrowed values of several types, identified by their type and address.
use std::{any::Any, fmt::Debug, iter::FusedIterator};

use crate::{
    algebra::SetAlgebra,
    chain_table::{self, ChainEntry, ChainTable, DEFAULT_CAPACITY},
    error::SetError,
    type_tag::{Catalog, Tag, TypeRegistry},
    util::impl_iterator,
};
use keyset_util::hash::{address_key, Key};

/// A reference to a value of a catalog type stored together with its address.
pub struct TaggedRef<'a, C: Catalog> {
    payload: C::Ref<'a>,
    key: Key,
}

impl<'a, C: Catalog> TaggedRef<'a, C> {
    /// Returns the tag of the referenced value's type.
    pub fn tag(&self) -> Tag {
        C::ref_tag(self.payload)
    }

    /// Returns the address of the referenced value.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Returns the reference as borrowed catalog enum.
    pub fn payload(&self) -> C::Ref<'a> {
        self.payload
    }

    /// Returns the referenced value as `T`.
    ///
    /// Fails with [`SetError::WrongType`] if the referenced value has a different type.
    pub fn get_as<T: Any>(&self) -> Result<&'a T, SetError> {
        C::ref_downcast(self.payload).ok_or(SetError::WrongType)
    }
}

impl<C: Catalog> Clone for TaggedRef<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Catalog> Copy for TaggedRef<'_, C> {}

impl<C: Catalog> Debug for TaggedRef<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggedRef")
            .field("tag", &self.tag())
            .field("key", &format_args!("{:#x}", self.key))
            .finish()
    }
}

impl<C: Catalog> ChainEntry for TaggedRef<'_, C> {
    type Probe = (Tag, Key);

    fn key(&self) -> Key {
        self.key
    }

    fn probe(&self) -> Self::Probe {
        (self.tag(), self.key)
    }
}

/// A set of references to values of the types listed in the catalog `C`.
///
/// Members are identified by their type and the address of the referenced value. A value and its
/// first field may share an address, but they still are distinct members when their types differ.
///
/// Buckets, growth and iteration order behave as for [`HashChainSet`](crate::HashChainSet).
pub struct UniqueCombinedSet<'a, C: Catalog> {
    registry: TypeRegistry,
    table: ChainTable<TaggedRef<'a, C>>,
}

impl<C: Catalog> Default for UniqueCombinedSet<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Catalog> Clone for UniqueCombinedSet<'_, C> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            table: self.table.clone(),
        }
    }
}

impl<C: Catalog> Debug for UniqueCombinedSet<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, C: Catalog> UniqueCombinedSet<'a, C> {
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
        self.registry.tag_of::<T>()
    }

    /// Returns the name of the type with the given tag.
    pub fn type_name(&self, tag: Tag) -> Option<&'static str> {
        self.registry.type_name(tag)
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

    /// Returns an iterator over the stored entries.
    pub fn iter(&self) -> Iter<'_, 'a, C> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Inserts a reference to a value of an accepted type.
    ///
    /// Returns `false` if a reference of the same type to the same place is already present.
    pub fn insert<T: Any>(&mut self, value: &'a T) -> Result<bool, SetError> {
        let tag = self.tag_of::<T>()?;
        let payload = C::wrap_ref(value).ok_or(SetError::Internal)?;
        debug_assert_eq!(C::ref_tag(payload), tag);
        self.table.insert(TaggedRef {
            payload,
            key: address_key(value),
        })
    }

    /// Inserts a reference already wrapped in the borrowed catalog enum.
    pub fn insert_ref(&mut self, payload: C::Ref<'a>) -> Result<bool, SetError> {
        self.table.insert(TaggedRef {
            payload,
            key: C::ref_address(payload),
        })
    }

    /// Inserts all references of an iterator and returns how many of them were newly inserted.
    ///
    /// Fails with [`SetError::TypeNotAccepted`] before inserting anything if `T` is not accepted.
    pub fn insert_all<T: Any>(
        &mut self,
        values: impl IntoIterator<Item = &'a T>,
    ) -> Result<usize, SetError> {
        self.tag_of::<T>()?;
        let mut inserted = 0;
        for value in values {
            inserted += self.insert(value)? as usize;
        }
        Ok(inserted)
    }

    /// Inserts wrapped references of possibly different types and returns how many of them were
    /// newly inserted.
    pub fn insert_refs(
        &mut self,
        payloads: impl IntoIterator<Item = C::Ref<'a>>,
    ) -> Result<usize, SetError> {
        let mut inserted = 0;
        for payload in payloads {
            inserted += self.insert_ref(payload)? as usize;
        }
        Ok(inserted)
    }

    /// Removes and returns the entry with the type and address of `value`.
    pub fn remove<T: Any>(&mut self, value: &T) -> Result<TaggedRef<'a, C>, SetError> {
        let tag = self.tag_of::<T>()?;
        let key = address_key(value);
        self.table.remove(key, (tag, key))
    }

    /// Returns `true` if a reference with the type and address of `value` is present.
    pub fn contains<T: Any>(&self, value: &T) -> Result<bool, SetError> {
        let tag = self.tag_of::<T>()?;
        let key = address_key(value);
        Ok(self.table.contains(key, (tag, key)))
    }

    /// Returns the first reference in iteration order as `T`.
    ///
    /// Fails with [`SetError::EmptySet`] on an empty set and with [`SetError::WrongType`] if the
    /// first reference has a different type.
    pub fn first_as<T: Any>(&self) -> Result<&'a T, SetError> {
        self.iter().next().ok_or(SetError::EmptySet)?.get_as()
    }

    #[cfg(test)]
    pub(crate) fn check(&self) {
        self.table.check();
        for entry in self.iter() {
            assert_eq!(entry.key(), C::ref_address(entry.payload()));
        }
    }
}

impl<'a, C: Catalog> SetAlgebra for UniqueCombinedSet<'a, C> {
    type Entry = TaggedRef<'a, C>;
    type Entries<'s> = chain_table::Iter<'s, TaggedRef<'a, C>> where Self: 's;

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

impl<C: Catalog> PartialEq for UniqueCombinedSet<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}

impl<C: Catalog> PartialOrd for UniqueCombinedSet<'_, C> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.set_cmp(other)
    }
}

impl<'s, 'a, C: Catalog> IntoIterator for &'s UniqueCombinedSet<'a, C> {
    type Item = TaggedRef<'a, C>;
    type IntoIter = Iter<'s, 'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a [`UniqueCombinedSet`].
///
/// This struct is created by the [`iter`](UniqueCombinedSet::iter) method on
/// [`UniqueCombinedSet`].
pub struct Iter<'s, 'a, C: Catalog> {
    inner: chain_table::Iter<'s, TaggedRef<'a, C>>,
}

impl<C: Catalog> Clone for Iter<'_, '_, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, C: Catalog> Iterator for Iter<'_, 'a, C> {
    type Item = TaggedRef<'a, C>;

    impl_iterator!(|entry: &TaggedRef<'a, C>| *entry);
}

impl<C: Catalog> ExactSizeIterator for Iter<'_, '_, C> {}

impl<C: Catalog> FusedIterator for Iter<'_, '_, C> {}
