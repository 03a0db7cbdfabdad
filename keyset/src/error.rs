//! Error conditions reported by keyset collections.
use std::fmt;

/// Error cases of all keyset collections.
///
/// The first five variants report invalid input and leave the collection unchanged.
/// [`SetError::OccupiedSpace`] and [`SetError::Internal`] indicate a broken structural invariant
/// and should be treated as fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetError {
    /// The type of a value is not part of the catalog of a heterogeneous set.
    TypeNotAccepted,
    /// A heterogeneous entry was accessed as a type different from the one it holds.
    WrongType,
    /// A chain link was attached to a slot that already holds a link.
    OccupiedSpace,
    /// A rank is not smaller than the number of entries.
    IndexOutOfRange,
    /// No entry with the requested key exists.
    ValueNotFound,
    /// The operation requires at least one entry.
    EmptySet,
    /// A traversal ended in a state that should be unreachable.
    Internal,
}

impl SetError {
    /// Returns the fixed message of this error.
    pub fn message(self) -> &'static str {
        match self {
            SetError::TypeNotAccepted => "Type not accepted by set!",
            SetError::WrongType => "Wrong type!",
            SetError::OccupiedSpace => "Next is not empty!",
            SetError::IndexOutOfRange => "Index is out of range!",
            SetError::ValueNotFound => "Value not found!",
            SetError::EmptySet => "Set is empty!",
            SetError::Internal => "Something happened",
        }
    }

    /// Returns `true` for errors that indicate a broken internal invariant.
    pub fn is_internal(self) -> bool {
        matches!(self, SetError::OccupiedSpace | SetError::Internal)
    }
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SetError {}
