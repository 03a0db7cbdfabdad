//! The hashed bucket store shared by all hash based collections of this crate.
//!
//! A [`ChainTable`] is an array of buckets, each holding a singly linked chain of entries. The
//! bucket of an entry is its key modulo the number of buckets. Chains are unordered, new entries
//! are appended at the tail, and every lookup walks the full chain of its bucket.
//!
//! When the number of entries exceeds [`RESIZE_THRESHOLD`] times the number of buckets, the bucket
//! array is replaced by one that is [`GROWTH_FACTOR`] times as large and every entry is linked into
//! the bucket selected by its key and the new bucket count.
use std::iter::FusedIterator;

use crate::error::SetError;
use keyset_util::hash::Key;

/// Number of buckets used by the `new` constructors.
pub const DEFAULT_CAPACITY: usize = 10;

/// Load factor above which the bucket array grows.
pub const RESIZE_THRESHOLD: f64 = 0.75;

/// Factor by which the bucket array grows.
pub const GROWTH_FACTOR: usize = 2;

/// Entries that can be stored in a [`ChainTable`].
pub trait ChainEntry {
    /// Identity of an entry within its chain.
    ///
    /// Two entries with equal probes are the same entry, regardless of their payload.
    type Probe: Copy + Eq;

    /// Key used to select the bucket of this entry.
    fn key(&self) -> Key;

    /// Identity of this entry within its chain.
    fn probe(&self) -> Self::Probe;
}

#[derive(Clone)]
struct Link<E> {
    entry: E,
    next: Option<Box<Link<E>>>,
}

impl<E> Link<E> {
    fn new(entry: E) -> Box<Self> {
        Box::new(Link { entry, next: None })
    }

    fn set_next(&mut self, next: Box<Link<E>>) -> Result<(), SetError> {
        if self.next.is_some() {
            return Err(SetError::OccupiedSpace);
        }
        self.next = Some(next);
        Ok(())
    }
}

type Bucket<E> = Option<Box<Link<E>>>;

/// An array of buckets holding chains of entries, see the [module documentation](self).
#[derive(Clone)]
pub struct ChainTable<E> {
    buckets: Vec<Bucket<E>>,
    len: usize,
}

impl<E> Default for ChainTable<E> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

fn empty_buckets<E>(capacity: usize) -> Vec<Bucket<E>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, || None);
    buckets
}

impl<E> ChainTable<E> {
    /// Returns an empty table with the given number of buckets.
    ///
    /// A table always has at least one bucket.
    pub fn with_capacity(capacity: usize) -> Self {
        ChainTable {
            buckets: empty_buckets(capacity.max(1)),
            len: 0,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes all entries, but keeps the number of buckets.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            // unlink one by one, dropping a long chain recursively could overflow the stack
            let mut link = bucket.take();
            while let Some(mut current) = link {
                link = current.next.take();
            }
        }
        self.len = 0;
    }

    /// Returns an iterator over all entries.
    ///
    /// Entries are yielded by ascending bucket index and within a bucket in chain order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            buckets: self.buckets.iter(),
            link: None,
            remaining: self.len,
        }
    }

    fn bucket_index(&self, key: Key) -> usize {
        (key % self.buckets.len() as Key) as usize
    }

    fn exceeds_load_factor(&self) -> bool {
        self.len as f64 > self.buckets.len() as f64 * RESIZE_THRESHOLD
    }
}

impl<E: ChainEntry> ChainTable<E> {
    /// Returns the entry with the given key and probe, if it exists.
    pub fn find(&self, key: Key, probe: E::Probe) -> Option<&E> {
        let mut link = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(current) = link {
            if current.entry.probe() == probe {
                return Some(&current.entry);
            }
            link = current.next.as_deref();
        }
        None
    }

    /// Returns `true` if an entry with the given key and probe exists.
    pub fn contains(&self, key: Key, probe: E::Probe) -> bool {
        self.find(key, probe).is_some()
    }

    /// Appends an entry to the chain of its bucket, unless an entry with the same probe exists.
    ///
    /// Returns `true` if the entry was inserted. Grows the bucket array when the load factor
    /// exceeds [`RESIZE_THRESHOLD`].
    pub fn insert(&mut self, entry: E) -> Result<bool, SetError> {
        let probe = entry.probe();
        let index = self.bucket_index(entry.key());
        let bucket = &mut self.buckets[index];
        match bucket {
            None => *bucket = Some(Link::new(entry)),
            Some(head) => {
                let mut link: &mut Link<E> = head;
                loop {
                    if link.entry.probe() == probe {
                        return Ok(false);
                    }
                    match link.next {
                        Some(ref mut next) => link = &mut **next,
                        None => {
                            link.set_next(Link::new(entry))?;
                            break;
                        }
                    }
                }
            }
        }
        self.len += 1;
        if self.exceeds_load_factor() {
            self.grow()?;
        }
        Ok(true)
    }

    /// Unlinks and returns the entry with the given key and probe.
    ///
    /// Fails with [`SetError::ValueNotFound`] if no such entry exists.
    pub fn remove(&mut self, key: Key, probe: E::Probe) -> Result<E, SetError> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];

        let head_matches = match bucket.as_deref() {
            None => return Err(SetError::ValueNotFound),
            Some(head) => head.entry.probe() == probe,
        };
        if head_matches {
            let mut head = bucket.take().ok_or(SetError::Internal)?;
            *bucket = head.next.take();
            self.len -= 1;
            return Ok(head.entry);
        }

        let mut link = bucket.as_deref_mut().ok_or(SetError::Internal)?;
        loop {
            let next_matches = match link.next.as_deref() {
                None => return Err(SetError::ValueNotFound),
                Some(next) => next.entry.probe() == probe,
            };
            if next_matches {
                let mut removed = link.next.take().ok_or(SetError::Internal)?;
                if let Some(rest) = removed.next.take() {
                    link.set_next(rest)?;
                }
                self.len -= 1;
                return Ok(removed.entry);
            }
            link = link.next.as_deref_mut().ok_or(SetError::Internal)?;
        }
    }

    fn grow(&mut self) -> Result<(), SetError> {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * GROWTH_FACTOR;
        log::debug!(
            "growing bucket table from {old_capacity} to {new_capacity} buckets at {} entries",
            self.len
        );
        self.rehash(new_capacity)
    }

    /// Relinks every entry into a new bucket array with the given number of buckets.
    fn rehash(&mut self, capacity: usize) -> Result<(), SetError> {
        let old_buckets = std::mem::replace(&mut self.buckets, empty_buckets(capacity));
        for mut bucket in old_buckets {
            while let Some(mut link) = bucket {
                bucket = link.next.take();
                let index = self.bucket_index(link.entry.key());
                append(&mut self.buckets[index], link)?;
            }
        }
        Ok(())
    }
}

fn append<E>(bucket: &mut Bucket<E>, link: Box<Link<E>>) -> Result<(), SetError> {
    match bucket {
        None => {
            *bucket = Some(link);
            Ok(())
        }
        Some(head) => {
            let mut tail: &mut Link<E> = head;
            loop {
                match tail.next {
                    Some(ref mut next) => tail = &mut **next,
                    None => return tail.set_next(link),
                }
            }
        }
    }
}

impl<E> Drop for ChainTable<E> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<E: ChainEntry> ChainTable<E> {
    #[cfg(test)]
    pub(crate) fn check(&self) {
        assert!(self.len as f64 <= self.buckets.len() as f64 * RESIZE_THRESHOLD);
        let mut count = 0;
        for (index, bucket) in self.buckets.iter().enumerate() {
            let mut link = bucket.as_deref();
            let mut probes = vec![];
            while let Some(current) = link {
                assert_eq!(self.bucket_index(current.entry.key()), index);
                assert!(!probes.contains(&current.entry.probe()));
                probes.push(current.entry.probe());
                count += 1;
                link = current.next.as_deref();
            }
        }
        assert_eq!(count, self.len);
    }

    #[cfg(test)]
    pub(crate) fn chain_len(&self, bucket: usize) -> usize {
        let mut link = self.buckets[bucket].as_deref();
        let mut len = 0;
        while let Some(current) = link {
            len += 1;
            link = current.next.as_deref();
        }
        len
    }
}

/// An iterator over the entries of a [`ChainTable`].
///
/// This struct is created by the [`iter`](ChainTable::iter) method on [`ChainTable`].
pub struct Iter<'a, E> {
    buckets: std::slice::Iter<'a, Bucket<E>>,
    link: Option<&'a Link<E>>,
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(link) = self.link {
                self.link = link.next.as_deref();
                self.remaining -= 1;
                return Some(&link.entry);
            }
            self.link = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Iter {
            buckets: self.buckets.clone(),
            link: self.link,
            remaining: self.remaining,
        }
    }
}
