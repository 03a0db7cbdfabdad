//! Utilities for computing hashes.
//!
//! There are two unrelated kinds of hashes in this workspace. Collection keys are computed by
//! [`KeyHash`], which is a fixed, bit exact policy: the key of a value decides both its bucket and
//! its identity inside a collection, so it must not depend on the hasher in use. Internal lookup
//! tables that are never observable from the outside use [`hash_value`] instead.
use std::hash::{BuildHasher, BuildHasherDefault};

use zwohash::ZwoHasher;

/// Key of a collection entry.
pub type Key = u64;

/// Mask applied to the raw bit pattern of a floating point value.
///
/// Only bits 12 to 31 of the IEEE-754 representation survive, so values that differ just in the
/// lowest mantissa bits share a key.
pub const FLOAT_KEY_MASK: u64 = 0xffff_f000;

/// Multiplier of the rolling text hash.
pub const TEXT_KEY_MULTIPLIER: u32 = 101;

/// Types that have a canonical collection key.
///
/// Two values with the same key are treated as the same entry by every keyset collection, even
/// when the values themselves differ.
pub trait KeyHash {
    /// Returns the key of `self`.
    fn key_hash(&self) -> Key;
}

macro_rules! impl_signed_key_hash {
    ($($t:ty),*) => {
        $(
            impl KeyHash for $t {
                #[inline]
                fn key_hash(&self) -> Key {
                    // sign extension, i.e. -1 maps to u64::MAX
                    *self as i64 as Key
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_key_hash {
    ($($t:ty),*) => {
        $(
            impl KeyHash for $t {
                #[inline]
                fn key_hash(&self) -> Key {
                    *self as Key
                }
            }
        )*
    };
}

impl_signed_key_hash!(i8, i16, i32, i64, isize);
impl_unsigned_key_hash!(u8, u16, u32, u64, usize);

impl KeyHash for bool {
    #[inline]
    fn key_hash(&self) -> Key {
        *self as Key
    }
}

impl KeyHash for char {
    #[inline]
    fn key_hash(&self) -> Key {
        *self as u32 as Key
    }
}

impl KeyHash for f64 {
    #[inline]
    fn key_hash(&self) -> Key {
        float_key(*self)
    }
}

impl KeyHash for f32 {
    #[inline]
    fn key_hash(&self) -> Key {
        float_key(*self as f64)
    }
}

impl KeyHash for str {
    #[inline]
    fn key_hash(&self) -> Key {
        text_key(self.as_bytes())
    }
}

impl KeyHash for String {
    #[inline]
    fn key_hash(&self) -> Key {
        text_key(self.as_bytes())
    }
}

impl<T: KeyHash + ?Sized> KeyHash for &T {
    #[inline]
    fn key_hash(&self) -> Key {
        (**self).key_hash()
    }
}

impl<T: KeyHash + ?Sized> KeyHash for Box<T> {
    #[inline]
    fn key_hash(&self) -> Key {
        (**self).key_hash()
    }
}

/// Computes the key of a floating point value from its raw bit pattern.
#[inline]
pub fn float_key(value: f64) -> Key {
    value.to_bits() & FLOAT_KEY_MASK
}

/// Computes the key of a byte string using the rolling hash `h = h * 101 + byte`.
///
/// The hash is accumulated in 32 bits with wrapping arithmetic and then zero extended.
#[inline]
pub fn text_key(bytes: &[u8]) -> Key {
    bytes.iter().fold(0u32, |h, &byte| {
        h.wrapping_mul(TEXT_KEY_MULTIPLIER).wrapping_add(byte as u32)
    }) as Key
}

/// Computes the key of a value from its address.
///
/// Only the address is used, so for unsized values the metadata of a wide pointer is ignored.
#[inline]
pub fn address_key<T: ?Sized>(value: &T) -> Key {
    (value as *const T).cast::<()>() as usize as Key
}

/// Computes the hash of a value using the default hasher for internal tables.
#[inline]
pub fn hash_value<T: std::hash::Hash>(value: T) -> u64 {
    <BuildHasherDefault<ZwoHasher>>::default().hash_one(value)
}

/// Computes the hash of a reference using the default hasher for internal tables.
///
/// This forwards to [`hash_value`]. Restricting the argument to be a reference is occasionally
/// useful for type inference or for avoiding warnings.
#[inline]
pub fn hash_ref<T: std::hash::Hash>(value: &T) -> u64 {
    hash_value(value)
}
