#![cfg(test)]
#![allow(missing_docs)]
use crate::{
    test_util::{Point, Scalar, ScalarRef, Shape},
    type_tag::{Catalog, TypeInfo, TypeRegistry},
    SetError,
};
use std::any::{Any, TypeId};

#[test]
fn tags_follow_declaration_order() {
    let registry = TypeRegistry::of::<Scalar>();
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.tag_of::<i32>(), Ok(0));
    assert_eq!(registry.tag_of::<char>(), Ok(1));
    assert_eq!(registry.tag_of::<String>(), Ok(2));
    assert_eq!(registry.tag_of::<bool>(), Ok(3));
    assert_eq!(registry.tag_of_id(TypeId::of::<bool>()), Ok(3));
    assert_eq!(registry.type_name(2), Some(std::any::type_name::<String>()));
    assert_eq!(registry.type_name(4), None);
    assert!(registry
        .iter()
        .map(TypeInfo::type_id)
        .eq([TypeId::of::<i32>(), TypeId::of::<char>(), TypeId::of::<String>(), TypeId::of::<bool>()]));
}

#[test]
fn undeclared_types_are_rejected() {
    let registry = TypeRegistry::of::<Scalar>();
    let err = registry.tag_of::<f64>().unwrap_err();
    assert_eq!(err, SetError::TypeNotAccepted);
    assert_eq!(err.to_string(), "Type not accepted by set!");
    // i64 and &str are distinct from the declared i32 and String
    assert!(registry.tag_of::<i64>().is_err());
    assert!(registry.tag_of::<&'static str>().is_err());
}

#[test]
#[should_panic]
fn duplicate_types_panic() {
    TypeRegistry::new(vec![TypeInfo::of::<i32>(), TypeInfo::of::<i32>()]);
}

#[test]
fn wrap_and_downcast() {
    let mut slot = Some(String::from("text"));
    let payload = Scalar::wrap(&mut slot).unwrap();
    assert!(slot.is_none());
    assert_eq!(payload.tag(), 2);
    assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("text"));
    assert_eq!(payload.downcast_ref::<i32>(), None);

    let mut slot = Some(1.5f64);
    assert!(Scalar::wrap(&mut slot).is_none());
    assert_eq!(slot, Some(1.5));

    assert_eq!(Scalar::Flag(true).tag(), 3);
    assert_eq!(Shape::Point(Point { x: 1, y: 2 }).tag(), 0);
    assert_eq!(Shape::Label(String::new()).tag(), 2);
}

#[test]
fn borrowed_payloads() {
    let value = 'x';
    let payload = Scalar::wrap_ref(&value).unwrap();
    assert!(matches!(payload, ScalarRef::Letter(&'x')));
    assert_eq!(Scalar::ref_tag(payload), 1);
    assert_eq!(Scalar::ref_downcast::<char>(payload), Some(&'x'));
    assert_eq!(Scalar::ref_downcast::<bool>(payload), None);
    assert_eq!(Scalar::ref_address(payload), crate::hash::address_key(&value));
    assert!(Scalar::wrap_ref(&0u8).is_none());
}

fn downcast_all<'a, C: Catalog, T: Any>(refs: &[C::Ref<'a>]) -> Vec<&'a T> {
    refs.iter().filter_map(|&value| C::ref_downcast::<T>(value)).collect()
}

#[test]
fn borrowed_downcast_through_trait() {
    let (int, letter, text) = (3, 'y', String::from("z"));
    let refs = [
        Scalar::wrap_ref(&int).unwrap(),
        Scalar::wrap_ref(&letter).unwrap(),
        Scalar::wrap_ref(&text).unwrap(),
    ];
    assert_eq!(downcast_all::<Scalar, i32>(&refs), [&3]);
    assert_eq!(downcast_all::<Scalar, String>(&refs), [&text]);
    assert!(downcast_all::<Scalar, bool>(&refs).is_empty());
}
