#![cfg(test)]
#![allow(missing_docs)]
use crate::{
    chain_table::DEFAULT_CAPACITY,
    hash::{Key, KeyHash},
    test_util::weighted_choose,
    HashChainSet, SetAlgebra, SetError,
};
use indexmap::IndexMap;
use rand::prelude::*;
use std::fmt::Debug;

struct CheckedSet<T> {
    dut: HashChainSet<T>,
    ref_map: IndexMap<Key, T>,
}

impl<T: KeyHash + Clone + PartialEq + Debug> CheckedSet<T> {
    fn with_capacity(capacity: usize) -> Self {
        CheckedSet {
            dut: HashChainSet::with_capacity(capacity),
            ref_map: IndexMap::new(),
        }
    }

    fn insert(&mut self, value: T) -> bool {
        let key = value.key_hash();
        let ref_result = !self.ref_map.contains_key(&key);
        if ref_result {
            self.ref_map.insert(key, value.clone());
        }
        let dut_result = self.dut.insert(value).unwrap();
        assert_eq!(ref_result, dut_result);
        ref_result
    }

    fn remove(&mut self, value: &T) -> Option<T> {
        let ref_result = self.ref_map.shift_remove(&value.key_hash());
        let dut_result = self.dut.remove(value);
        assert_eq!(dut_result, ref_result.clone().ok_or(SetError::ValueNotFound));
        ref_result
    }

    fn contains(&self, value: &T) -> bool {
        let ref_result = self.ref_map.contains_key(&value.key_hash());
        assert_eq!(ref_result, self.dut.contains(value));
        ref_result
    }

    fn clear(&mut self) {
        let capacity = self.dut.capacity();
        self.dut.clear();
        self.ref_map.clear();
        assert_eq!(capacity, self.dut.capacity());
        self.check();
    }

    fn check(&self) {
        self.dut.check();
        assert_eq!(self.dut.len(), self.ref_map.len());
        let capacity = self.dut.capacity() as Key;
        let buckets: Vec<Key> = self.dut.entries().map(|e| e.key() % capacity).collect();
        assert!(buckets.windows(2).all(|pair| pair[0] <= pair[1]));
        for (&key, value) in self.ref_map.iter() {
            assert_eq!(self.dut.get_with_key(key), Some(value));
        }
    }
}

fn test_suite<T: KeyHash + Clone + PartialEq + Debug, R: Rng + SeedableRng>(
    capacity: usize,
    mut rand_t: impl FnMut(&mut R) -> T,
) {
    let mut set: CheckedSet<T> = CheckedSet::with_capacity(capacity);
    let mut rng = R::seed_from_u64(25);
    let mut max_size = 0;
    let verbosity = 1;
    for _ in 0..5000 {
        weighted_choose! {&mut rng,
            Insert: 1.0 => {
                let item = rand_t(&mut rng);
                let result = set.insert(item.clone());
                if verbosity > 0 {
                    println!("inserting {item:?} -> {result:?}");
                }
            },
            ContainsPresent: 0.5 => {
                if let Some(item) = set.ref_map.values().choose(&mut rng).cloned() {
                    assert!(set.contains(&item));
                }
            },
            ContainsRandom: 0.5 => {
                let item = rand_t(&mut rng);
                let result = set.contains(&item);
                if verbosity > 0 {
                    println!("looking up {item:?} -> {result:?}");
                }
            },
            RemovePresent: 0.3 => {
                if let Some(item) = set.ref_map.values().choose(&mut rng).cloned() {
                    let result = set.remove(&item);
                    if verbosity > 0 {
                        println!("removing {item:?} -> {result:?}");
                    }
                }
            },
            RemoveRandom: 0.4 => {
                let item = rand_t(&mut rng);
                let result = set.remove(&item);
                if verbosity > 0 {
                    println!("removing {item:?} -> {result:?}");
                }
            },
            Clear: 0.002 => {
                set.clear();
                if verbosity > 0 {
                    println!("clear");
                }
            },
            Check: 0.15 => {
                set.check();
                if verbosity > 0 {
                    println!("check");
                }
            }
        };
        max_size = std::cmp::max(max_size, set.ref_map.len());
    }
    set.check();
    println!("max size: {max_size}, capacity: {}", set.dut.capacity());
}

#[test]
fn test_suite_i64() {
    test_suite::<i64, rand_pcg::Pcg64>(3, |rng| rng.gen_range(-500..500));
}

#[test]
fn test_suite_u64_sparse() {
    test_suite::<u64, rand_pcg::Pcg64>(DEFAULT_CAPACITY, |rng| {
        rng.gen::<u64>() >> rng.gen_range(0..u64::BITS)
    });
}

#[test]
fn test_suite_string() {
    test_suite::<String, rand_pcg::Pcg64>(1, |rng| {
        let len = rng.gen_range(0..4);
        (0..len).map(|_| rng.gen_range('a'..='e')).collect()
    });
}

#[test]
fn test_suite_f64() {
    test_suite::<f64, rand_pcg::Pcg64>(0, |rng| rng.gen_range(0..400) as f64 / 3.0);
}

#[test]
fn string_values() {
    let mut set = HashChainSet::new();
    assert!(set.insert(String::from("aa")).unwrap());
    assert_eq!(set.len(), 1);
    assert_eq!(set.to_vec(), vec!["aa".to_string()]);
    assert!(set.contains("aa"));
    assert!(!set.contains("ab"));
}

#[test]
fn int_values() {
    let mut set = HashChainSet::new();
    set.insert(5i32).unwrap();
    set.insert(-1i32).unwrap();
    assert_eq!(set.len(), 2);
    // both keys land in bucket 5, in insertion order
    assert_eq!(set.chain_len(5), 2);
    assert_eq!(set.to_vec(), vec![5, -1]);
}

#[test]
fn float_values() {
    let mut set = HashChainSet::new();
    set.insert(2.00000000001f64).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.to_vec(), vec![2.00000000001]);

    let mut set = HashChainSet::new();
    set.insert(false).unwrap();
    assert_eq!(set.len(), 1);
}

#[derive(Clone, Debug, PartialEq)]
struct Item {
    key: Key,
    name: &'static str,
}

#[test]
fn explicit_keys() {
    let mut set = HashChainSet::new();
    let a = Item { key: 5, name: "a" };
    let b = Item { key: 4, name: "b" };
    let c = Item { key: 5, name: "c" };
    assert!(set.insert_with_key(a.clone(), a.key).unwrap());
    assert!(set.insert_with_key(b.clone(), b.key).unwrap());
    assert!(!set.insert_with_key(c.clone(), c.key).unwrap());
    assert!(!set.insert_with_key(a.clone(), a.key).unwrap());
    assert_eq!(set.len(), 2);
    assert_eq!(set.iter().next(), Some(&b));
    assert_eq!(set.get_with_key(5), Some(&a));
    assert!(set.contains_key(c.key));

    // an equally keyed value removes the stored one
    assert_eq!(set.remove_with_key(c.key), Ok(a));
    assert_eq!(set.to_vec(), vec![b]);
}

#[test]
fn duplicates_are_ignored() {
    let mut set = HashChainSet::new();
    assert_eq!(set.insert_all(0..5).unwrap(), 5);
    assert_eq!(set.insert_all(0..5).unwrap(), 0);
    assert_eq!(set.len(), 5);
}

#[test]
fn growth() {
    let mut set = HashChainSet::with_capacity(2);
    for i in 0..10 {
        set.insert(i).unwrap();
        set.check();
    }
    assert_eq!(set.capacity(), 16);
    assert_eq!(set.len(), 10);
    assert_eq!(set.to_vec(), (0..10).collect::<Vec<_>>());

    let mut set = HashChainSet::with_capacity(2);
    set.insert_all(0..3).unwrap();
    assert_eq!(set.capacity(), 4);
    set.insert_all(3..6).unwrap();
    assert_eq!(set.capacity(), 8);
}

#[test]
fn zero_capacity() {
    let mut set = HashChainSet::with_capacity(0);
    assert_eq!(set.capacity(), 1);
    assert!(set.insert(7u8).unwrap());
    assert_eq!(set.capacity(), 2);
    assert!(set.contains(&7));
}

#[test]
fn long_chains() {
    let mut set = HashChainSet::with_capacity(4);
    set.insert(1).unwrap();
    set.insert(5).unwrap();
    assert!(set.contains(&1));
    assert!(set.contains(&5));
    assert_eq!(set.chain_len(1), 2);

    set.clear();
    assert!(!set.contains(&1));
    assert!(!set.contains(&5));
    assert_eq!(set.capacity(), 4);
    set.insert(1).unwrap();
    assert!(set.contains(&1));
}

#[test]
fn remove_from_chain() {
    let mut set = HashChainSet::with_capacity(100);
    for i in [3, 103, 203, 303] {
        set.insert(i).unwrap();
    }
    assert_eq!(set.chain_len(3), 4);

    // removing the head keeps the rest of the chain
    assert_eq!(set.remove(&3), Ok(3));
    assert_eq!(set.to_vec(), vec![103, 203, 303]);
    assert_eq!(set.remove(&203), Ok(203));
    assert_eq!(set.to_vec(), vec![103, 303]);
    assert_eq!(set.remove(&303), Ok(303));
    assert_eq!(set.remove(&303), Err(SetError::ValueNotFound));
    assert_eq!(set.to_vec(), vec![103]);
    set.check();
}

#[test]
fn remove_errors() {
    let mut set: HashChainSet<i32> = HashChainSet::new();
    assert!(!set.contains(&2));
    assert_eq!(set.len(), 0);
    let err = set.remove(&4).unwrap_err();
    assert_eq!(err, SetError::ValueNotFound);
    assert_eq!(err.to_string(), "Value not found!");
    set.insert(6).unwrap();
    assert_eq!(set.remove(&6), Ok(6));
    assert!(set.is_empty());
}

#[test]
fn iteration() {
    let set: HashChainSet<u32> = HashChainSet::new();
    assert_eq!(set.iter().next(), None);

    let mut set = HashChainSet::with_capacity(8);
    set.insert_all([9, 1, 17, 2]).unwrap();
    let iter = set.iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.copied().collect::<Vec<_>>(), vec![9, 1, 17, 2]);
    assert_eq!(format!("{set:?}"), "{9, 1, 17, 2}");
    let mut sum = 0;
    for value in &set {
        sum += value;
    }
    assert_eq!(sum, 29);
}

fn split_sets() -> (HashChainSet<i32>, HashChainSet<i32>) {
    let mut set1 = HashChainSet::new();
    let mut set2 = HashChainSet::new();
    for i in 0..10 {
        if i <= 5 {
            set1.insert(i).unwrap();
        }
        if i >= 5 {
            set2.insert(i).unwrap();
        }
    }
    (set1, set2)
}

#[test]
fn union_and_intersection() {
    let (set1, set2) = split_sets();

    let union = set1.union(&set2).unwrap();
    assert_eq!(union.len(), 10);
    for i in 0..10 {
        assert!(union.contains(&i));
    }
    assert!(!union.contains(&10));

    let intersection = set1.intersection(&set2).unwrap();
    assert_eq!(intersection.to_vec(), vec![5]);
    assert!(intersection.is_proper_subset(&set1));
    assert!(intersection.is_proper_subset(&set2));
    assert!(set1.intersection(&HashChainSet::new()).unwrap().is_empty());
}

#[test]
fn comparisons() {
    let mut set1 = HashChainSet::new();
    let mut set2 = HashChainSet::new();
    set1.insert_all([1, 2]).unwrap();
    set2.insert(1).unwrap();

    assert!(set2 < set1);
    assert!(!(set2 > set1));
    assert!(set2 != set1);
    assert!(set2 <= set1);
    assert!(!(set2 >= set1));

    set2.insert(2).unwrap();
    assert!(!(set2 < set1));
    assert!(!(set2 > set1));
    assert!(set2 == set1);
    assert!(set2 <= set1);
    assert!(set2 >= set1);

    set2.insert(3).unwrap();
    set2.remove(&2).unwrap();
    assert!(!(set2 < set1));
    assert!(!(set2 > set1));
    assert!(set2 != set1);
    assert!(!(set2 <= set1));
    assert!(!(set2 >= set1));
    assert_eq!(set2.partial_cmp(&set1), None);

    set1.remove(&2).unwrap();
    assert!(!(set2 < set1));
    assert!(set2 > set1);
    assert!(set2 != set1);
    assert!(!(set2 <= set1));
    assert!(set2 >= set1);
}
