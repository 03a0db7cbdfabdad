//! Set relations and operations shared by all collections of this crate.
//!
//! Every collection stores entries that pair a value with the identity used for membership tests.
//! [`SetAlgebra`] is implemented in terms of that identity only, so two sets holding different
//! values under the same keys compare as equal.
use std::cmp::Ordering;

use crate::error::SetError;

/// Set operations and comparisons based on entry membership.
///
/// Implementors provide access to their entries and a membership test. The provided methods derive
/// unions, intersections and the subset and superset relations from these.
pub trait SetAlgebra: Clone {
    /// A stored value together with its identity.
    type Entry: Clone;

    /// Iterator over all entries of a set.
    type Entries<'s>: Iterator<Item = &'s Self::Entry>
    where
        Self: 's;

    /// Returns the number of entries.
    fn entry_count(&self) -> usize;

    /// Returns an iterator over all entries.
    fn entries(&self) -> Self::Entries<'_>;

    /// Returns `true` if an entry with the same identity is present.
    fn contains_entry(&self, entry: &Self::Entry) -> bool;

    /// Inserts an entry unless an entry with the same identity is present.
    fn insert_entry(&mut self, entry: Self::Entry) -> Result<bool, SetError>;

    /// Returns an empty set of the same kind.
    fn empty_like(&self) -> Self;

    /// Returns a set containing the entries of both sets.
    ///
    /// The result starts as a copy of `other`. Entries of `self` are added afterwards, so for an
    /// identity present in both sets, the value stored in `other` is kept.
    fn union(&self, other: &Self) -> Result<Self, SetError> {
        let mut result = other.clone();
        for entry in self.entries() {
            result.insert_entry(entry.clone())?;
        }
        Ok(result)
    }

    /// Returns a set containing the entries of `self` whose identity is also present in `other`.
    fn intersection(&self, other: &Self) -> Result<Self, SetError> {
        let mut result = self.empty_like();
        for entry in self.entries() {
            if other.contains_entry(entry) {
                result.insert_entry(entry.clone())?;
            }
        }
        Ok(result)
    }

    /// Returns `true` if every entry of `self` is present in `other`.
    fn is_subset(&self, other: &Self) -> bool {
        self.entries().all(|entry| other.contains_entry(entry))
    }

    /// Returns `true` if every entry of `other` is present in `self`.
    fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a subset of `other` and `other` has more entries.
    fn is_proper_subset(&self, other: &Self) -> bool {
        self.entry_count() < other.entry_count() && self.is_subset(other)
    }

    /// Returns `true` if `self` is a superset of `other` and has more entries.
    fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Returns `true` if both sets contain the same identities.
    fn set_eq(&self, other: &Self) -> bool {
        self.entry_count() == other.entry_count() && self.is_subset(other)
    }

    /// Compares two sets by inclusion.
    ///
    /// Returns `None` if neither set is a subset of the other.
    fn set_cmp(&self, other: &Self) -> Option<Ordering> {
        let ordering = self.entry_count().cmp(&other.entry_count());
        let included = match ordering {
            Ordering::Less | Ordering::Equal => self.is_subset(other),
            Ordering::Greater => other.is_subset(self),
        };
        included.then_some(ordering)
    }
}
