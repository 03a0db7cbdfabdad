//! Values stored together with their key.
use crate::chain_table::ChainEntry;
use keyset_util::hash::Key;

/// A value stored together with its key.
///
/// The key is computed once, when the value is inserted, either by [`KeyHash`] or supplied by the
/// caller. Two entries with the same key are considered equal, regardless of their values.
///
/// [`KeyHash`]: keyset_util::hash::KeyHash
#[derive(Clone, Debug)]
pub struct KeyedEntry<T> {
    value: T,
    key: Key,
}

impl<T> KeyedEntry<T> {
    /// Pairs a value with its key.
    pub fn new(value: T, key: Key) -> Self {
        KeyedEntry { value, key }
    }

    /// Returns a reference to the stored value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the key of the stored value.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Returns the stored value.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> ChainEntry for KeyedEntry<T> {
    type Probe = Key;

    fn key(&self) -> Key {
        self.key
    }

    fn probe(&self) -> Key {
        self.key
    }
}
