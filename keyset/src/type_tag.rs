//! Type tags for sets holding values of several types.
//!
//! A heterogeneous set accepts values from a fixed list of types, its catalog. The position of a
//! type within the catalog is its [`Tag`]. Catalogs are declared as enums with one single field
//! variant per accepted type using the [`type_catalog!`](crate::type_catalog) macro, which
//! implements [`Catalog`] for the declared enum.
//!
//! ```
//! use keyset::{type_catalog, type_tag::{Catalog, TypeRegistry}};
//!
//! type_catalog! {
//!     /// Values accepted by a set of scalars.
//!     #[derive(Clone, Debug)]
//!     pub enum Scalar {
//!         /// An integer.
//!         Int(i32),
//!         /// A string.
//!         Text(String),
//!     }
//!     /// Borrowed values accepted by a set of scalars.
//!     pub enum ScalarRef<'a>;
//! }
//!
//! let registry = TypeRegistry::of::<Scalar>();
//! assert_eq!(registry.tag_of::<i32>(), Ok(0));
//! assert_eq!(registry.tag_of::<String>(), Ok(1));
//! assert!(registry.tag_of::<f64>().is_err());
//! assert_eq!(Scalar::Text("x".into()).tag(), 1);
//! ```
use std::any::{Any, TypeId};

use hashbrown::hash_table::{Entry, HashTable};

use crate::error::SetError;
use keyset_util::hash::{hash_value, Key};

/// Position of a type within a catalog.
pub type Tag = u16;

/// Runtime identity of a catalog type.
#[derive(Clone, Copy, Debug)]
pub struct TypeInfo {
    type_id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Returns the identity of `T`.
    pub fn of<T: Any>() -> Self {
        TypeInfo {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the name of the type, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeInfo {}

/// Maps the types of a catalog to their tags.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: Vec<TypeInfo>,
    tags: HashTable<Tag>,
}

impl TypeRegistry {
    /// Builds a registry for the given list of types, assigning tags by position.
    ///
    /// # Panics
    ///
    /// Panics if a type is listed twice or if there are more types than tags.
    pub fn new(types: Vec<TypeInfo>) -> Self {
        assert!(
            types.len() <= Tag::MAX as usize + 1,
            "too many types in one catalog"
        );
        let mut tags = HashTable::with_capacity(types.len());
        for (index, info) in types.iter().enumerate() {
            match tags.entry(
                hash_value(info.type_id),
                |&tag: &Tag| types[tag as usize].type_id == info.type_id,
                |&tag: &Tag| hash_value(types[tag as usize].type_id),
            ) {
                Entry::Occupied(_) => panic!("type {} listed twice in one catalog", info.name),
                Entry::Vacant(entry) => {
                    entry.insert(index as Tag);
                }
            }
        }
        TypeRegistry { types, tags }
    }

    /// Builds the registry of a catalog enum.
    pub fn of<C: Catalog>() -> Self {
        Self::new(C::catalog())
    }

    /// Returns the number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type is accepted.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the tag of `T`.
    ///
    /// Fails with [`SetError::TypeNotAccepted`] if `T` is not part of the catalog.
    pub fn tag_of<T: Any>(&self) -> Result<Tag, SetError> {
        self.tag_of_id(TypeId::of::<T>())
    }

    /// Returns the tag of the type with the given [`TypeId`].
    pub fn tag_of_id(&self, type_id: TypeId) -> Result<Tag, SetError> {
        self.tags
            .find(hash_value(type_id), |&tag| {
                self.types[tag as usize].type_id == type_id
            })
            .copied()
            .ok_or(SetError::TypeNotAccepted)
    }

    /// Returns the identity of the type with the given tag.
    pub fn type_info(&self, tag: Tag) -> Option<&TypeInfo> {
        self.types.get(tag as usize)
    }

    /// Returns the name of the type with the given tag.
    pub fn type_name(&self, tag: Tag) -> Option<&'static str> {
        self.type_info(tag).map(TypeInfo::name)
    }

    /// Returns an iterator over the catalog types in tag order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeInfo> {
        self.types.iter()
    }
}

/// An enum with one variant per accepted type, usually declared with
/// [`type_catalog!`](crate::type_catalog).
///
/// The tag of a variant is its position within the enum, which must match the position of its
/// type within [`catalog`](Catalog::catalog).
pub trait Catalog: Sized + 'static {
    /// The borrowed counterpart of the catalog enum, holding a reference to a value.
    type Ref<'a>: Copy;

    /// Returns the accepted types in tag order.
    fn catalog() -> Vec<TypeInfo>;

    /// Returns the tag of the held value.
    fn tag(&self) -> Tag;

    /// Takes the value out of `slot` and wraps it, if `T` is part of the catalog.
    ///
    /// Leaves `slot` untouched and returns `None` otherwise.
    fn wrap<T: Any>(slot: &mut Option<T>) -> Option<Self>;

    /// Returns the held value if it is of type `T`.
    fn downcast_ref<T: Any>(&self) -> Option<&T>;

    /// Wraps a reference, if `T` is part of the catalog.
    fn wrap_ref<'a, T: Any>(value: &'a T) -> Option<Self::Ref<'a>>;

    /// Returns the tag of the referenced value.
    fn ref_tag(value: Self::Ref<'_>) -> Tag;

    /// Returns the referenced value if it is of type `T`.
    fn ref_downcast<'a, T: Any>(value: Self::Ref<'a>) -> Option<&'a T>;

    /// Returns the address of the referenced value as key.
    fn ref_address(value: Self::Ref<'_>) -> Key;
}

/// Declares a catalog enum and its borrowed counterpart and implements [`Catalog`] for them.
///
/// Each variant holds exactly one field, the accepted type. Variants are tagged in declaration
/// order. See the [module documentation](crate::type_tag) for an example.
#[macro_export]
macro_rules! type_catalog {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_attr:meta])* $variant:ident($ty:ty)),+ $(,)?
        }
        $(#[$ref_attr:meta])*
        $ref_vis:vis enum $ref_name:ident<$lt:lifetime>;
    ) => {
        $(#[$attr])*
        $vis enum $name {
            $($(#[$variant_attr])* $variant($ty)),+
        }

        $(#[$ref_attr])*
        #[allow(missing_docs)]
        #[derive(Clone, Copy)]
        $ref_vis enum $ref_name<$lt> {
            $($variant(&$lt $ty)),+
        }

        impl $crate::type_tag::Catalog for $name {
            type Ref<$lt> = $ref_name<$lt>;

            fn catalog() -> ::std::vec::Vec<$crate::type_tag::TypeInfo> {
                ::std::vec![$($crate::type_tag::TypeInfo::of::<$ty>()),+]
            }

            fn tag(&self) -> $crate::type_tag::Tag {
                enum Tags {
                    $($variant),+
                }
                match self {
                    $(Self::$variant(_) => Tags::$variant as $crate::type_tag::Tag),+
                }
            }

            fn wrap<T: ::std::any::Any>(
                slot: &mut ::std::option::Option<T>,
            ) -> ::std::option::Option<Self> {
                let slot: &mut dyn ::std::any::Any = slot;
                $(
                    if let ::std::option::Option::Some(value) =
                        slot.downcast_mut::<::std::option::Option<$ty>>()
                    {
                        return value.take().map(Self::$variant);
                    }
                )+
                ::std::option::Option::None
            }

            fn downcast_ref<T: ::std::any::Any>(&self) -> ::std::option::Option<&T> {
                match self {
                    $(Self::$variant(value) => {
                        (value as &dyn ::std::any::Any).downcast_ref::<T>()
                    })+
                }
            }

            fn wrap_ref<'r, T: ::std::any::Any>(
                value: &'r T,
            ) -> ::std::option::Option<$ref_name<'r>> {
                let value: &'r dyn ::std::any::Any = value;
                $(
                    if let ::std::option::Option::Some(value) = value.downcast_ref::<$ty>() {
                        return ::std::option::Option::Some($ref_name::$variant(value));
                    }
                )+
                ::std::option::Option::None
            }

            fn ref_tag(value: $ref_name<'_>) -> $crate::type_tag::Tag {
                enum Tags {
                    $($variant),+
                }
                match value {
                    $($ref_name::$variant(_) => Tags::$variant as $crate::type_tag::Tag),+
                }
            }

            fn ref_downcast<'r, T: ::std::any::Any>(
                value: <Self as $crate::type_tag::Catalog>::Ref<'r>,
            ) -> ::std::option::Option<&'r T> {
                match value {
                    $($ref_name::$variant(value) => {
                        (value as &'r dyn ::std::any::Any).downcast_ref::<T>()
                    })+
                }
            }

            fn ref_address(value: $ref_name<'_>) -> $crate::hash::Key {
                match value {
                    $($ref_name::$variant(value) => $crate::hash::address_key(value)),+
                }
            }
        }
    };
}
