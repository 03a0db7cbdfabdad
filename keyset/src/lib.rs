//! In-memory sets keyed by integer keys.
//!
//! All collections of this crate identify their members by a [`Key`](hash::Key), never by
//! comparing values. Value keyed collections derive the key from the content of a value using
//! [`KeyHash`](hash::KeyHash), so two distinct values with equal keys count as the same member.
//! Identity keyed collections store references and derive the key from the address of the
//! referenced value instead.
//!
//! * [`HashChainSet`] is a hash set using separately chained buckets that grow by doubling.
//! * [`OrderedSet`] is an unbalanced binary search tree with rank and select queries.
//! * [`CombinedSet`] holds values of several types, listed in a catalog declared with
//!   [`type_catalog!`].
//! * [`UniqueSet`] and [`UniqueCombinedSet`] are the identity keyed counterparts of
//!   [`HashChainSet`] and [`CombinedSet`].
//!
//! Set relations and operations are provided by the [`SetAlgebra`] trait, which backs the
//! `PartialEq` and `PartialOrd` implementations of all collections. Fallible operations report a
//! [`SetError`].
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use keyset_util::hash;

pub mod algebra;
pub mod chain_table;
pub mod combined_set;
pub mod entry;
pub mod error;
pub mod hash_chain_set;
pub mod ordered_set;
pub mod type_tag;
pub mod unique_combined_set;
pub mod unique_set;

mod util;

pub use algebra::SetAlgebra;
pub use combined_set::{CombinedSet, TaggedEntry};
pub use entry::KeyedEntry;
pub use error::SetError;
pub use hash_chain_set::HashChainSet;
pub use ordered_set::OrderedSet;
pub use type_tag::{Catalog, Tag, TypeInfo, TypeRegistry};
pub use unique_combined_set::{TaggedRef, UniqueCombinedSet};
pub use unique_set::{RefEntry, UniqueSet};

mod test_util;
mod test_combined_set;
mod test_hash_chain_set;
mod test_ordered_set;
mod test_type_tag;
mod test_unique_combined_set;
mod test_unique_set;
