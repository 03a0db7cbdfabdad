#![cfg(test)]
#![allow(missing_docs)]
use crate::{
    test_util::{Point, Scalar, ScalarRef, Shape},
    SetAlgebra, SetError, UniqueCombinedSet,
};

#[test]
fn typed_access() {
    let a = 1;
    let mut set: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    assert!(set.insert(&a).unwrap());
    assert_eq!(set.len(), 1);
    assert_eq!(set.first_as::<i32>(), Ok(&1));
    assert_eq!(set.first_as::<bool>(), Err(SetError::WrongType));
    let entry = set.iter().next().unwrap();
    assert_eq!(entry.tag(), 0);
    assert!(matches!(entry.payload(), ScalarRef::Int(value) if std::ptr::eq(value, &a)));
}

#[test]
fn empty_set() {
    let set: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    assert!(set.is_empty());
    assert!(set.iter().next().is_none());
    assert_eq!(set.first_as::<i32>(), Err(SetError::EmptySet));
}

#[test]
fn mixed_values() {
    let b = 1;
    let a = String::from("aab");
    let c = 2;
    let mut set: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    set.insert(&b).unwrap();
    set.insert(&a).unwrap();
    set.insert(&c).unwrap();
    assert_eq!(set.len(), 3);
    for entry in &set {
        match entry.get_as::<i32>() {
            Ok(value) => assert!(*value == 1 || *value == 2),
            Err(_) => assert_eq!(entry.get_as::<String>(), Ok(&a)),
        }
    }
    set.check();
}

#[test]
fn growth() {
    let values = [1, 2, 22];
    let mut set: UniqueCombinedSet<Scalar> = UniqueCombinedSet::with_capacity(2);
    for value in &values {
        set.insert(value).unwrap();
    }
    assert_eq!(set.len(), 3);
    assert_eq!(set.capacity(), 4);
    set.check();
}

#[test]
fn contains() {
    let numbers = [1, 2, 3, 4, 5, 6];
    let letters = ['a', 'b', 'c', 'd', 'e', 'f'];
    let texts = [String::from("abcd"), String::from("ef"), "a".repeat(53)];
    let flag = false;
    let mut set: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    for (number, letter) in numbers.iter().zip(&letters) {
        set.insert(number).unwrap();
        set.insert(letter).unwrap();
    }
    for text in &texts {
        set.insert(text).unwrap();
    }
    set.insert(&flag).unwrap();
    assert_eq!(set.len(), 16);
    set.check();

    assert_eq!(set.contains(&numbers[1]), Ok(true));
    assert_eq!(set.contains(&letters[0]), Ok(true));
    assert_eq!(set.contains(&texts[0]), Ok(true));
    assert_eq!(set.contains(&texts[2]), Ok(true));
    assert_eq!(set.contains(&flag), Ok(true));

    let text = String::from("abcd");
    let one = 1;
    let letter = 'a';
    assert_eq!(set.contains(&text), Ok(false));
    assert_eq!(set.contains(&one), Ok(false));
    assert_eq!(set.contains(&letter), Ok(false));
    assert_eq!(set.contains(&1.0f64), Err(SetError::TypeNotAccepted));
}

#[test]
fn type_and_address() {
    let shape = Shape::Point(Point { x: 3, y: 4 });
    let point = Point { x: 1, y: 2 };
    let mut set: UniqueCombinedSet<Shape> = UniqueCombinedSet::new();
    set.insert(&point).unwrap();
    // the first field shares the address of the point, but has a different type
    set.insert(&point.x).unwrap();
    assert_eq!(set.len(), 2);
    assert!(!set.insert(&point).unwrap());
    assert_eq!(set.contains(&point.x), Ok(true));
    assert_eq!(set.contains(&point.y), Ok(false));
    assert_eq!(set.insert(&shape), Err(SetError::TypeNotAccepted));
    set.check();
}

#[test]
fn remove() {
    let a = 5;
    let b = 256;
    let c = 'a';
    let d = 'b';
    let mut set: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    set.insert(&a).unwrap();
    set.insert(&c).unwrap();
    set.insert(&b).unwrap();
    set.insert(&d).unwrap();
    assert_eq!(set.len(), 4);

    let removed = set.remove(&a).unwrap();
    assert_eq!(removed.get_as::<i32>(), Ok(&5));
    assert_eq!(set.len(), 3);
    assert_eq!(set.contains(&a), Ok(false));
    set.remove(&c).unwrap();
    set.remove(&b).unwrap();
    assert_eq!(set.len(), 1);

    let err = set.remove(&a).unwrap_err();
    assert_eq!(err, SetError::ValueNotFound);
    assert_eq!(err.to_string(), "Value not found!");
    set.remove(&d).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.remove(&true).unwrap_err(), SetError::ValueNotFound);
    assert_eq!(set.remove(&0u8).unwrap_err(), SetError::TypeNotAccepted);
}

#[test]
fn duplicates_are_ignored() {
    let a = 1;
    let b = 2;
    let c = 'a';
    let d = 'b';
    let mut set: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    set.insert(&a).unwrap();
    set.insert(&b).unwrap();
    set.insert(&c).unwrap();
    set.insert(&d).unwrap();
    assert_eq!(set.len(), 4);
    assert!(!set.insert(&a).unwrap());
    assert_eq!(set.len(), 4);
}

#[test]
fn rejected_types() {
    let flag = false;
    let mut set: UniqueCombinedSet<Shape> = UniqueCombinedSet::new();
    let err = set.insert(&flag).unwrap_err();
    assert_eq!(err, SetError::TypeNotAccepted);
    assert_eq!(err.to_string(), "Type not accepted by set!");
    assert_eq!(set.tag_of::<String>(), Ok(2));
    assert_eq!(set.type_name(1), Some("i32"));
    assert_eq!(set.registry().len(), 3);
}

#[test]
fn set_algebra() {
    let (one, two, three, four) = (1, 2, 3, 4);
    let (a, b, c) = ('a', 'b', 'c');

    let mut set1: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    let mut set2: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    for number in [&one, &three] {
        set1.insert(number).unwrap();
    }
    for letter in [&a, &c] {
        set1.insert(letter).unwrap();
    }
    for number in [&two, &one, &four, &one] {
        set2.insert(number).unwrap();
    }
    for letter in [&b, &c, &c, &a] {
        set2.insert(letter).unwrap();
    }

    let union = set1.union(&set2).unwrap();
    assert_eq!(union.len(), 7);
    for number in [&one, &two, &three, &four] {
        assert_eq!(union.contains(number), Ok(true));
    }
    for letter in [&a, &b, &c] {
        assert_eq!(union.contains(letter), Ok(true));
    }

    let intersection = set1.intersection(&set2).unwrap();
    assert_eq!(intersection.len(), 3);
    assert_eq!(intersection.contains(&one), Ok(true));
    assert_eq!(intersection.contains(&a), Ok(true));
    assert_eq!(intersection.contains(&c), Ok(true));
    assert!(intersection < set1);
    assert!(intersection < set2);

    let mut set3 = set1.clone();
    set3.insert(&two).unwrap();
    assert!(set3 > set1);
    assert!(set3 >= set1);
    assert!(set3 != set1);
    set3.remove(&two).unwrap();
    assert!(set3 == set1);
    set3.remove(&one).unwrap();
    assert!(set3 < set1);
    assert!(!(set3 >= set1));
}

#[test]
fn clear() {
    let values = [1, 2, 3];
    let mut set: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    for value in &values {
        set.insert(value).unwrap();
    }
    let capacity = set.capacity();
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.capacity(), capacity);
    for value in &values {
        assert_eq!(set.contains(value), Ok(false));
    }
    assert_eq!(set.iter().count(), 0);
}

#[test]
fn insert_all() {
    let ints = [1, 1, 2];
    let texts = [String::from("a"), String::from("a")];
    let flag = true;
    let mut set: UniqueCombinedSet<Scalar> = UniqueCombinedSet::new();
    assert_eq!(set.insert_all(&ints), Ok(3));
    assert_eq!(set.insert_all(&ints), Ok(0));
    assert_eq!(set.insert_all(&texts), Ok(2));
    assert_eq!(set.insert_all([&1.5f64]), Err(SetError::TypeNotAccepted));
    assert_eq!(set.len(), 5);

    assert_eq!(
        set.insert_refs([ScalarRef::Flag(&flag), ScalarRef::Int(&ints[0])]),
        Ok(1)
    );
    assert_eq!(set.len(), 6);
    assert_eq!(set.contains(&flag), Ok(true));
    set.check();
}
