#![cfg(test)]
#![allow(missing_docs)]
use crate::{hash::address_key, test_util::weighted_choose, SetAlgebra, SetError, UniqueSet};
use indexmap::IndexSet;
use rand::prelude::*;
use std::cell::Cell;

#[test]
fn identity_not_content() {
    let a = 5;
    let b = 5;
    let c = 5;
    let mut set = UniqueSet::new();
    assert_eq!(set.insert_all([&a, &b, &c, &a, &b]).unwrap(), 3);
    assert_eq!(set.len(), 3);
    assert!(set.iter().all(|value| *value == 5));
    assert!(set.contains(&a));
    assert!(set.contains(&c));
    let d = 5;
    assert!(!set.contains(&d));
    assert!(!set.insert(&a).unwrap());
    set.check();
}

#[test]
fn shared_state_is_visible() {
    let a = Cell::new(0);
    let b = Cell::new(0);
    let mut set = UniqueSet::new();
    set.insert(&a).unwrap();
    a.set(3);
    set.insert(&b).unwrap();
    set.insert(&a).unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.iter().any(|value| value.get() == 3));

    // stored references point to the caller's values
    for value in set.to_vec() {
        if value.get() == 3 {
            value.set(5);
        }
    }
    assert_eq!(a.get(), 5);
}

#[test]
fn unsized_values() {
    let text = String::from("aa");
    let other = String::from("aa");
    let mut set: UniqueSet<str> = UniqueSet::new();
    set.insert(text.as_str()).unwrap();
    set.insert(&text[..]).unwrap();
    assert_eq!(set.len(), 1);
    assert!(!set.contains(other.as_str()));
    assert_eq!(set.to_vec(), vec!["aa"]);

    let values = [1.5, 2.00000000001];
    let mut set: UniqueSet<[f64]> = UniqueSet::new();
    set.insert(&values[..]).unwrap();
    // a subslice starting at the same address is the same member
    set.insert(&values[..1]).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.iter().next(), Some(&values[..]));
}

#[test]
fn growth() {
    let values = [1, 2, 3, 1, 2, 3];
    let mut set = UniqueSet::with_capacity(2);
    set.insert_all(&values).unwrap();
    assert_eq!(set.capacity(), 8);
    assert_eq!(set.len(), 6);
    for value in &values {
        assert!(set.contains(value));
    }
    set.check();

    let mut set = UniqueSet::with_capacity(0);
    assert_eq!(set.capacity(), 1);
    set.insert(&values[0]).unwrap();
    assert_eq!(set.capacity(), 2);
}

#[test]
fn remove() {
    let a = 6;
    let b = 7;
    let mut set = UniqueSet::new();
    let err = set.remove(&a).unwrap_err();
    assert_eq!(err, SetError::ValueNotFound);
    assert_eq!(err.to_string(), "Value not found!");

    set.insert(&a).unwrap();
    set.insert(&b).unwrap();
    let copy = a;
    assert_eq!(set.remove(&copy), Err(SetError::ValueNotFound));
    let removed = set.remove(&a).unwrap();
    assert!(std::ptr::eq(removed, &a));
    assert_eq!(set.to_vec(), vec![&b]);
    assert!(!set.contains(&a));
}

#[test]
fn clear() {
    let a = 1;
    let b = 2;
    let mut set = UniqueSet::new();
    set.insert(&a).unwrap();
    set.insert(&b).unwrap();
    set.clear();
    assert!(set.is_empty());
    assert!(!set.contains(&a));
    assert!(!set.contains(&b));
    set.insert(&a).unwrap();
    assert!(set.contains(&a));
}

#[test]
fn array_elements() {
    let values: Vec<i32> = (0..10).collect();
    let mut set = UniqueSet::new();
    set.insert_all(&values).unwrap();
    assert_eq!(set.len(), 10);
    for value in &values {
        assert!(set.contains(value));
    }
    assert_eq!(format!("{:?}", UniqueSet::<i32>::new()), "{}");
}

#[test]
fn union_and_intersection() {
    let values: Vec<i32> = (0..10).collect();
    let mut set1 = UniqueSet::new();
    let mut set2 = UniqueSet::new();
    set1.insert_all(&values[..6]).unwrap();
    set2.insert_all(&values[5..]).unwrap();

    let union = set1.union(&set2).unwrap();
    assert_eq!(union.len(), 10);
    for value in &values {
        assert!(union.contains(value));
    }

    let intersection = set1.intersection(&set2).unwrap();
    assert_eq!(intersection.len(), 1);
    assert!(intersection.contains(&values[5]));
    let five = 5;
    assert!(!intersection.contains(&five));
}

#[test]
fn comparisons() {
    let one = 1;
    let two = 2;
    let three = 3;
    let mut set1 = UniqueSet::new();
    let mut set2 = UniqueSet::new();
    set1.insert_all([&one, &two]).unwrap();
    set2.insert(&one).unwrap();

    assert!(set2 < set1);
    assert!(!(set2 > set1));
    assert!(set2 != set1);
    assert!(set2 <= set1);
    assert!(!(set2 >= set1));

    set2.insert(&two).unwrap();
    assert!(set2 == set1);
    assert!(set2 <= set1);
    assert!(set2 >= set1);

    set2.insert(&three).unwrap();
    set2.remove(&two).unwrap();
    assert!(!(set2 < set1));
    assert!(!(set2 > set1));
    assert!(set2 != set1);
    assert!(!(set2 <= set1));
    assert!(!(set2 >= set1));

    set1.remove(&two).unwrap();
    assert!(set2 > set1);
    assert!(set2 >= set1);

    // equal content at another place is not equal
    let another_one = 1;
    let mut set3 = UniqueSet::new();
    set3.insert(&another_one).unwrap();
    assert!(set3 != set1);
    assert_eq!(set3.partial_cmp(&set1), None);
}

#[test]
fn test_suite() {
    let values: Vec<u64> = (0..200).map(|i| i % 7).collect();
    let mut set = UniqueSet::with_capacity(1);
    let mut ref_set: IndexSet<usize> = IndexSet::new();
    let mut rng = rand_pcg::Pcg64::seed_from_u64(25);
    for _ in 0..5000 {
        let index = rng.gen_range(0..values.len());
        let value = &values[index];
        weighted_choose! {&mut rng,
            Insert: 1.0 => {
                assert_eq!(set.insert(value), Ok(ref_set.insert(index)));
            },
            Remove: 0.8 => {
                let expected = ref_set.shift_remove(&index);
                assert_eq!(set.remove(value).is_ok(), expected);
            },
            Contains: 0.5 => {
                assert_eq!(set.contains(value), ref_set.contains(&index));
            },
            Check: 0.1 => {
                set.check();
                assert_eq!(set.len(), ref_set.len());
            }
        };
    }
    set.check();
    for entry in set.entries() {
        let offset = (entry.key() - address_key(&values[0])) as usize;
        assert!(ref_set.contains(&(offset / std::mem::size_of::<u64>())));
    }
}
