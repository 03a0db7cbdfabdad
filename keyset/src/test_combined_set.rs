#![cfg(test)]
#![allow(missing_docs)]
use crate::{
    hash::{Key, KeyHash},
    test_util::{weighted_choose, Point, Scalar, Shape},
    type_catalog, CombinedSet, SetAlgebra, SetError,
};
use indexmap::IndexMap;
use rand::prelude::*;

type_catalog! {
    #[derive(Clone, Debug, PartialEq)]
    enum Number {
        Int(i32),
        Real(f64),
    }
    enum NumberRef<'a>;
}

#[test]
fn typed_access() {
    let mut set: CombinedSet<Number> = CombinedSet::new();
    assert!(set.insert(1i32).unwrap());
    assert_eq!(set.len(), 1);
    assert_eq!(set.first_as::<i32>(), Ok(&1));
    let err = set.first_as::<f64>().unwrap_err();
    assert_eq!(err, SetError::WrongType);
    assert_eq!(err.to_string(), "Wrong type!");
    let entry = set.iter().next().unwrap();
    assert_eq!(entry.tag(), 0);
    assert_eq!(entry.key(), 1);
    assert!(entry.is::<i32>());
    assert_eq!(entry.payload(), &Number::Int(1));
}

#[test]
fn empty_set() {
    let set: CombinedSet<Number> = CombinedSet::new();
    assert!(set.is_empty());
    assert_eq!(set.iter().next().map(|entry| entry.key()), None);
    let err = set.first_as::<i32>().unwrap_err();
    assert_eq!(err, SetError::EmptySet);
    assert_eq!(err.to_string(), "Set is empty!");
}

#[test]
fn mixed_values() {
    let mut set: CombinedSet<Scalar> = CombinedSet::new();
    set.insert(1).unwrap();
    set.insert(String::from("aab")).unwrap();
    set.insert(2).unwrap();
    assert_eq!(set.len(), 3);
    for entry in &set {
        match entry.get_as::<i32>() {
            Ok(value) => assert!(*value == 1 || *value == 2),
            Err(SetError::WrongType) => assert_eq!(entry.get_as::<String>().unwrap(), "aab"),
            Err(err) => panic!("unexpected {err}"),
        }
    }
    // "aab" shares bucket 2 with the integer 2 and was inserted first
    assert_eq!(set.chain_len(2), 2);
    assert_eq!(format!("{set:?}"), r#"{Int(1), Text("aab"), Int(2)}"#);
}

#[test]
fn growth() {
    let mut set: CombinedSet<Number> = CombinedSet::with_capacity(2);
    set.insert(1).unwrap();
    set.insert(2).unwrap();
    set.insert(22).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.capacity(), 4);
    set.check();
    assert!(set
        .iter()
        .all(|entry| [1, 2, 22].contains(entry.get_as::<i32>().unwrap())));
}

#[test]
fn contains() {
    let mut set: CombinedSet<Scalar> = CombinedSet::new();
    for i in 0..10 {
        set.insert(i).unwrap();
    }
    for c in 'a'..'h' {
        set.insert(c).unwrap();
    }
    let long = "a".repeat(53);
    for text in ["abcd", "ef", long.as_str()] {
        set.insert(text.to_string()).unwrap();
    }
    set.insert(false).unwrap();
    assert_eq!(set.len(), 21);
    set.check();

    for i in 0..10 {
        assert_eq!(set.contains(&i), Ok(true));
    }
    assert_eq!(set.contains(&10), Ok(false));
    for c in 'a'..'h' {
        assert_eq!(set.contains(&c), Ok(true));
    }
    assert_eq!(set.contains(&'h'), Ok(false));
    assert_eq!(set.contains(&"abcd".to_string()), Ok(true));
    assert_eq!(set.contains(&long), Ok(true));
    assert_eq!(set.contains(&"aa".to_string()), Ok(false));
    assert_eq!(set.contains(&false), Ok(true));
    assert_eq!(set.contains(&true), Ok(false));
    assert_eq!(set.contains(&1.0f64), Err(SetError::TypeNotAccepted));
}

#[test]
fn same_key_different_types() {
    let mut set: CombinedSet<Scalar> = CombinedSet::new();
    assert!(set.insert(97).unwrap());
    assert!(set.insert('a').unwrap());
    assert!(set.insert(1).unwrap());
    assert!(set.insert(true).unwrap());
    assert_eq!(set.len(), 4);
    assert_eq!('a'.key_hash(), 97i32.key_hash());
    assert_eq!(set.get_with_key::<char>(97), Ok(&'a'));
    assert_eq!(set.get_with_key::<bool>(0), Err(SetError::ValueNotFound));
    assert_eq!(set.remove(&97).map(|entry| entry.tag()), Ok(0));
    assert_eq!(set.contains(&'a'), Ok(true));
}

#[test]
fn explicit_keys() {
    let mut set: CombinedSet<Shape> = CombinedSet::new();
    let a = Point { x: 1, y: 0 };
    let b = Point { x: 2, y: 0 };
    let c = Point { x: 1, y: 5 };
    for point in [&a, &b, &c] {
        set.insert_with_key(point.clone(), point.x as Key).unwrap();
    }
    assert_eq!(set.len(), 2);
    set.insert_with_key(1, 1).unwrap();
    set.insert_with_key(2, 2).unwrap();
    set.insert_with_key(String::from("one"), 1).unwrap();
    assert_eq!(set.len(), 5);
    assert_eq!(set.contains_key::<Point>(1), Ok(true));
    assert_eq!(set.contains_key::<i32>(2), Ok(true));
    assert_eq!(set.contains_key::<String>(2), Ok(false));
    assert_eq!(set.get_with_key::<Point>(1), Ok(&a));

    let removed = set.remove_with_key::<Point>(1).unwrap();
    assert_eq!(removed.get_as::<Point>(), Ok(&a));
    assert!(matches!(removed.into_payload(), Shape::Point(point) if point == a));
    assert_eq!(set.len(), 4);
    assert_eq!(set.remove_with_key::<Point>(1).unwrap_err(), SetError::ValueNotFound);
    assert_eq!(set.remove_with_key::<u8>(1).unwrap_err(), SetError::TypeNotAccepted);
}

#[test]
fn remove() {
    let mut set: CombinedSet<Scalar> = CombinedSet::new();
    set.insert(5).unwrap();
    set.insert('a').unwrap();
    set.insert(256).unwrap();
    set.insert('b').unwrap();
    assert_eq!(set.len(), 4);
    set.remove(&5).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.contains(&5), Ok(false));
    set.remove(&'b').unwrap();
    assert_eq!(set.contains(&'b'), Ok(false));
    set.remove(&256).unwrap();
    assert_eq!(set.len(), 1);

    let err = set.remove(&1).unwrap_err();
    assert_eq!(err, SetError::ValueNotFound);
    assert_eq!(err.to_string(), "Value not found!");
    set.remove(&'a').unwrap();
    assert!(set.is_empty());
}

#[test]
fn rejected_types() {
    let mut set: CombinedSet<Number> = CombinedSet::new();
    let err = set.insert(false).unwrap_err();
    assert_eq!(err, SetError::TypeNotAccepted);
    assert_eq!(err.to_string(), "Type not accepted by set!");
    assert!(set.is_empty());
    assert_eq!(set.tag_of::<f64>(), Ok(1));
    assert_eq!(set.type_name(1), Some("f64"));
}

fn sample_sets() -> (CombinedSet<Scalar>, CombinedSet<Scalar>) {
    let mut set1 = CombinedSet::new();
    let mut set2 = CombinedSet::new();
    for value in [1, 3] {
        set1.insert(value).unwrap();
    }
    for value in ['a', 'c'] {
        set1.insert(value).unwrap();
    }
    for value in [2, 1, 4] {
        set2.insert(value).unwrap();
    }
    for value in ['b', 'c', 'a'] {
        set2.insert(value).unwrap();
    }
    (set1, set2)
}

#[test]
fn union_and_intersection() {
    let (set1, set2) = sample_sets();

    let union = set1.union(&set2).unwrap();
    assert_eq!(union.len(), 7);
    for i in 1..5 {
        assert_eq!(union.contains(&i), Ok(true));
    }
    for c in 'a'..='c' {
        assert_eq!(union.contains(&c), Ok(true));
    }

    let intersection = set1.intersection(&set2).unwrap();
    assert_eq!(intersection.len(), 3);
    assert_eq!(intersection.contains(&1), Ok(true));
    assert_eq!(intersection.contains(&'a'), Ok(true));
    assert_eq!(intersection.contains(&'c'), Ok(true));
    for entry in &intersection {
        match entry.get_as::<i32>() {
            Ok(value) => assert_eq!(*value, 1),
            Err(_) => assert!(['a', 'c'].contains(entry.get_as::<char>().unwrap())),
        }
    }
}

#[test]
fn comparisons() {
    let mut set1: CombinedSet<Scalar> = CombinedSet::new();
    let mut set2: CombinedSet<Scalar> = CombinedSet::new();
    for value in [1, 2, 3] {
        set1.insert(value).unwrap();
    }
    for value in ['a', 'b', 'c'] {
        set1.insert(value).unwrap();
    }
    for value in [1, 2] {
        set2.insert(value).unwrap();
    }
    for value in ['a', 'b'] {
        set2.insert(value).unwrap();
    }

    assert!(set1 > set2);
    assert!(set1 >= set2);
    assert!(!(set1 < set2));
    assert!(!(set1 <= set2));
    assert!(set1 != set2);

    set2.insert(3).unwrap();
    set2.insert('c').unwrap();
    assert!(!(set1 > set2));
    assert!(set1 >= set2);
    assert!(set1 <= set2);
    assert!(set1 == set2);

    set1.remove(&1).unwrap();
    assert!(!(set1 > set2));
    assert!(!(set1 >= set2));
    assert!(set1 < set2);
    assert!(set1 <= set2);
    assert!(set1 != set2);
}

#[test]
fn clear() {
    let (mut set, _) = sample_sets();
    let capacity = set.capacity();
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.capacity(), capacity);
    for i in 1..4 {
        assert_eq!(set.contains(&i), Ok(false));
    }
    assert_eq!(set.iter().count(), 0);
}

#[test]
fn test_suite() {
    let mut set: CombinedSet<Scalar> = CombinedSet::with_capacity(1);
    let mut ref_map: IndexMap<(u16, Key), Scalar> = IndexMap::new();
    let mut rng = rand_pcg::Pcg64::seed_from_u64(25);
    for _ in 0..3000 {
        let value = match rng.gen_range(0..4) {
            0 => Scalar::Int(rng.gen_range(-50..50)),
            1 => Scalar::Letter(rng.gen_range('a'..='z')),
            2 => Scalar::Text((0..rng.gen_range(0..3)).map(|_| rng.gen_range('x'..='z')).collect()),
            _ => Scalar::Flag(rng.gen()),
        };
        let key = match &value {
            Scalar::Int(value) => value.key_hash(),
            Scalar::Letter(value) => value.key_hash(),
            Scalar::Text(value) => value.key_hash(),
            Scalar::Flag(value) => value.key_hash(),
        };
        let probe = (crate::Catalog::tag(&value), key);
        weighted_choose! {&mut rng,
            Insert: 1.0 => {
                let expected = !ref_map.contains_key(&probe);
                if expected {
                    ref_map.insert(probe, value.clone());
                }
                assert_eq!(set.insert_payload(value, key), Ok(expected));
            },
            Remove: 0.7 => {
                let expected = ref_map.shift_remove(&probe);
                let removed = remove_scalar(&mut set, &value, key);
                assert_eq!(removed.ok(), expected);
            },
            Check: 0.1 => {
                set.check();
                assert_eq!(set.len(), ref_map.len());
            }
        };
    }
    set.check();
    for (&(tag, key), value) in ref_map.iter() {
        let found = set.iter().find(|entry| entry.tag() == tag && entry.key() == key);
        assert_eq!(found.map(|entry| entry.payload()), Some(value));
    }
}

fn remove_scalar(
    set: &mut CombinedSet<Scalar>,
    value: &Scalar,
    key: Key,
) -> Result<Scalar, SetError> {
    let entry = match value {
        Scalar::Int(_) => set.remove_with_key::<i32>(key),
        Scalar::Letter(_) => set.remove_with_key::<char>(key),
        Scalar::Text(_) => set.remove_with_key::<String>(key),
        Scalar::Flag(_) => set.remove_with_key::<bool>(key),
    }?;
    Ok(entry.into_payload())
}

#[test]
fn insert_all() {
    let mut set: CombinedSet<Scalar> = CombinedSet::new();
    assert_eq!(set.insert_all([1, 2, 2, 3]), Ok(3));
    assert_eq!(set.insert_all([String::from("a"), String::from("b")]), Ok(2));
    assert_eq!(set.insert_all([1.5f64]), Err(SetError::TypeNotAccepted));
    assert_eq!(set.len(), 5);

    let payloads = [
        (Scalar::Flag(true), true.key_hash()),
        (Scalar::Letter('x'), 'x'.key_hash()),
        (Scalar::Int(1), 1i32.key_hash()),
    ];
    assert_eq!(set.insert_payloads(payloads), Ok(2));
    assert_eq!(set.len(), 7);
    assert_eq!(set.contains(&'x'), Ok(true));
    assert_eq!(set.contains(&true), Ok(true));
    set.check();
}
