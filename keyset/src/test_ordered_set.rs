#![cfg(test)]
#![allow(missing_docs)]
use crate::{
    hash::{Key, KeyHash},
    test_util::weighted_choose,
    OrderedSet, SetAlgebra, SetError,
};
use rand::prelude::*;
use std::{collections::BTreeMap, fmt::Debug};

struct CheckedSet<T> {
    dut: OrderedSet<T>,
    ref_map: BTreeMap<Key, T>,
}

impl<T: KeyHash + Clone + PartialEq + Debug> CheckedSet<T> {
    fn new() -> Self {
        CheckedSet {
            dut: OrderedSet::new(),
            ref_map: BTreeMap::new(),
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
        let ref_result = self.ref_map.remove(&value.key_hash());
        let dut_result = self.dut.remove(value);
        assert_eq!(dut_result, ref_result.clone().ok_or(SetError::ValueNotFound));
        ref_result
    }

    fn get_item(&self, index: usize) -> Option<&T> {
        let ref_result = self.ref_map.values().nth(index);
        let dut_result = self.dut.get_item(index);
        match ref_result {
            Some(value) => assert_eq!(dut_result, Ok(value)),
            None if self.ref_map.is_empty() => assert_eq!(dut_result, Err(SetError::EmptySet)),
            None => assert_eq!(dut_result, Err(SetError::IndexOutOfRange)),
        }
        ref_result
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        let key = value.key_hash();
        let ref_result = self
            .ref_map
            .contains_key(&key)
            .then(|| self.ref_map.range(..key).count());
        assert_eq!(
            self.dut.index_of(value),
            ref_result.ok_or(SetError::EmptySet)
        );
        ref_result
    }

    fn check(&self) {
        self.dut.check();
        assert_eq!(self.dut.len(), self.ref_map.len());
        assert!(self.ref_map.values().eq(self.dut.iter()));
        assert!(self.ref_map.keys().copied().eq(self.dut.entries().map(|e| e.key())));
        match self.ref_map.values().next() {
            Some(min) => assert_eq!(self.dut.min(), Ok(min)),
            None => assert_eq!(self.dut.min(), Err(SetError::EmptySet)),
        }
        match self.ref_map.values().next_back() {
            Some(max) => assert_eq!(self.dut.max(), Ok(max)),
            None => assert_eq!(self.dut.max(), Err(SetError::EmptySet)),
        }
    }
}

fn test_suite<T: KeyHash + Clone + PartialEq + Debug, R: Rng + SeedableRng>(
    mut rand_t: impl FnMut(&mut R) -> T,
) {
    let mut set: CheckedSet<T> = CheckedSet::new();
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
            RemovePresent: 0.3 => {
                if let Some(item) = set.ref_map.values().choose(&mut rng).cloned() {
                    let result = set.remove(&item);
                    if verbosity > 0 {
                        println!("removing {item:?} -> {result:?}");
                    }
                }
            },
            RemoveRandom: 0.5 => {
                let item = rand_t(&mut rng);
                let result = set.remove(&item);
                if verbosity > 0 {
                    println!("removing {item:?} -> {result:?}");
                }
            },
            GetItem: 0.4 => {
                let len = set.ref_map.len();
                // try to generate invalid indices sometimes
                let index = rng.gen_range(0..=(len + len.div_ceil(10)));
                let result = set.get_item(index);
                if verbosity > 0 {
                    println!("getting item {index} -> {result:?}");
                }
            },
            IndexOf: 0.4 => {
                let item = rand_t(&mut rng);
                let result = set.index_of(&item);
                if verbosity > 0 {
                    println!("getting index of {item:?} -> {result:?}");
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
    println!("max size: {max_size}, depth: {}", set.dut.depth());
}

#[test]
fn test_suite_i32() {
    test_suite::<i32, rand_pcg::Pcg64>(|rng| rng.gen_range(-300..300));
}

#[test]
fn test_suite_u64_sparse() {
    test_suite::<u64, rand_pcg::Pcg64>(|rng| rng.gen::<u64>() >> rng.gen_range(0..u64::BITS));
}

#[test]
fn test_suite_string() {
    test_suite::<String, rand_pcg::Pcg64>(|rng| {
        let len = rng.gen_range(0..4);
        (0..len).map(|_| rng.gen_range('a'..='e')).collect()
    });
}

#[test]
fn duplicates_are_ignored() {
    let mut set = OrderedSet::new();
    set.insert(1).unwrap();
    set.insert(2).unwrap();
    assert!(!set.insert(1).unwrap());
    assert_eq!(set.len(), 2);
    assert!(set.contains(&1));
    assert!(set.contains(&2));
}

#[test]
fn explicit_keys() {
    #[derive(Clone, Debug, PartialEq)]
    struct Item(Key);

    let mut set = OrderedSet::new();
    for key in [3, 1, 2] {
        set.insert_with_key(Item(key), key).unwrap();
    }
    assert_eq!(set.len(), 3);
    assert!(set.contains_key(1));
    assert_eq!(set.get_with_key(2), Some(&Item(2)));
    assert_eq!(set.to_sorted_vec(), vec![Item(1), Item(2), Item(3)]);
    assert_eq!(set.remove_with_key(3), Ok(Item(3)));
    assert_eq!(set.index_of_key(2), Ok(1));
}

#[test]
fn text_order() {
    let mut set = OrderedSet::new();
    set.insert_all(["ab", "ba", "aa", "aaa", "aba", "aaaa"]).unwrap();
    assert_eq!(set.len(), 6);
    assert_eq!(
        set.to_sorted_vec(),
        vec!["aa", "ab", "ba", "aaa", "aba", "aaaa"]
    );
}

#[test]
fn float_values() {
    let mut set = OrderedSet::new();
    set.insert_all([2.5f32, 2.55, 2.555]).unwrap();
    assert_eq!(set.len(), 3);
    assert!(set.contains(&2.55));
}

#[test]
fn negative_keys_sort_last() {
    let mut set = OrderedSet::new();
    set.insert_all([-1i64, 3, -5, 0]).unwrap();
    assert_eq!(set.to_sorted_vec(), vec![0, 3, -5, -1]);
    assert_eq!(set.min(), Ok(&0));
    assert_eq!(set.max(), Ok(&-1));
}

#[test]
fn remove() {
    let mut set = OrderedSet::new();
    set.insert_all(0..4).unwrap();
    assert!(set.contains(&2));
    assert_eq!(set.remove(&2), Ok(2));
    assert!(!set.contains(&2));
    assert_eq!(set.len(), 3);
    set.check();

    let mut set = OrderedSet::new();
    set.insert(2).unwrap();
    assert_eq!(set.remove(&2), Ok(2));
    assert!(set.is_empty());
    assert!(!set.contains(&2));
    let err = set.remove(&2).unwrap_err();
    assert_eq!(err, SetError::ValueNotFound);
    assert_eq!(err.to_string(), "Value not found!");
}

#[test]
fn remove_with_two_children() {
    let mut set = OrderedSet::new();
    set.insert_all([4, 2, 6, 1, 3, 5, 7]).unwrap();
    assert_eq!(set.depth(), 3);
    assert_eq!(set.remove(&4), Ok(4));
    assert!(!set.contains(&4));
    assert_eq!(set.len(), 6);
    set.check();
    assert_eq!(set.to_sorted_vec(), vec![1, 2, 3, 5, 6, 7]);
    for (index, value) in [1, 2, 3, 5, 6, 7].into_iter().enumerate() {
        assert_eq!(set.get_item(index), Ok(&value));
        assert_eq!(set.index_of(&value), Ok(index));
    }

    // the smaller right subtree is attached below the largest key of the left one
    let mut set = OrderedSet::new();
    set.insert_all([10, 5, 15, 3, 7, 2, 4, 6, 8, 20]).unwrap();
    assert_eq!(set.remove(&10), Ok(10));
    set.check();
    assert_eq!(set.get_item(0), Ok(&2));
    assert_eq!(set.index_of(&15), Ok(7));
    assert_eq!(set.depth(), 5);

    // and the smaller left subtree below the smallest key of the right one
    let mut set = OrderedSet::new();
    set.insert_all([10, 5, 15, 12, 18, 11, 13, 20]).unwrap();
    assert_eq!(set.remove(&10), Ok(10));
    set.check();
    assert_eq!(set.to_sorted_vec(), vec![5, 11, 12, 13, 15, 18, 20]);
    assert_eq!(set.index_of(&5), Ok(0));
    assert_eq!(set.index_of(&20), Ok(6));

    // on equal sizes the right subtree goes below the largest key of the left one
    let mut set = OrderedSet::new();
    set.insert_all([4, 2, 1, 3, 6, 7, 8]).unwrap();
    assert_eq!(set.remove(&4), Ok(4));
    set.check();
    assert_eq!(set.depth(), 5);
    assert_eq!(set.to_sorted_vec(), vec![1, 2, 3, 6, 7, 8]);
}

#[test]
fn clear() {
    let mut set = OrderedSet::new();
    let values = [4, 2, 6, 1, 3, 5, 7];
    set.insert_all(values).unwrap();
    set.clear();
    assert_eq!(set.len(), 0);
    for value in values {
        assert!(!set.contains(&value));
    }
    assert_eq!(set.remove(&2), Err(SetError::ValueNotFound));
}

#[test]
fn iteration() {
    let mut set = OrderedSet::new();
    assert_eq!(set.iter().next(), None);
    set.insert_all([4, 2, 6, 1, 3, 5, 7]).unwrap();
    let iter = set.iter();
    assert_eq!(iter.len(), 7);
    assert!(iter.copied().eq(1..=7));
    assert_eq!(format!("{set:?}"), "{1, 2, 3, 4, 5, 6, 7}");

    let mut set = OrderedSet::new();
    set.insert_all([9, 8, 5, 6, 7, 2, 3, 8, 6, 1, 2, 4, 10]).unwrap();
    assert_eq!(set.len(), 10);
    assert_eq!(set.to_sorted_vec(), (1..=10).collect::<Vec<_>>());
}

#[test]
fn min_max() {
    let mut set = OrderedSet::new();
    assert_eq!(set.min(), Err(SetError::EmptySet));
    assert_eq!(set.max(), Err(SetError::EmptySet));
    set.insert_all([9, 5, 6, 7, 2, 3, 6, 1, 4]).unwrap();
    assert_eq!(set.min(), Ok(&1));
    assert_eq!(set.max(), Ok(&9));
}

#[test]
fn get_item() {
    let mut set = OrderedSet::new();
    assert_eq!(set.get_item(0), Err(SetError::EmptySet));
    set.insert_all([6, 1, 9, 7, 3, 2, 8, 5, 9, 4, 2]).unwrap();
    for i in 0..set.len() {
        assert_eq!(set.get_item(i), Ok(&(i as i32 + 1)));
    }
    assert_eq!(set.get_item(9), Err(SetError::IndexOutOfRange));
    set.clear();

    set.insert_all(0..11).unwrap();
    for i in 0..11 {
        assert_eq!(set.get_item(i as usize), Ok(&i));
    }
    assert_eq!(set.depth(), 11);
}

#[test]
fn index_of() {
    let mut set = OrderedSet::new();
    assert_eq!(set.index_of(&1), Err(SetError::EmptySet));
    set.insert_all([6, 1, 9, 7, 3, 2, 8, 5, 9, 4, 2]).unwrap();
    for i in 1..10 {
        assert_eq!(set.index_of(&i), Ok(i as usize - 1));
    }
    assert_eq!(set.index_of(&10), Err(SetError::EmptySet));
    set.clear();

    set.insert_all(0..11).unwrap();
    for i in 0..11 {
        assert_eq!(set.index_of(&i), Ok(i as usize));
    }
    set.clear();

    set.insert_all((0..11).rev()).unwrap();
    for i in 0..11 {
        assert_eq!(set.index_of(&i), Ok(i as usize));
    }
    set.clear();

    set.insert_all([6, 1, 5, 2, 4, 3]).unwrap();
    for i in 0..6 {
        assert_eq!(set.index_of(&(i + 1)), Ok(i as usize));
    }
}

#[test]
fn degenerate_tree() {
    let mut set = OrderedSet::new();
    set.insert_all(0..10_000u32).unwrap();
    assert_eq!(set.len(), 10_000);
    assert_eq!(set.max(), Ok(&9_999));
    let clone = set.clone();
    assert_eq!(clone.depth(), 10_000);
    assert!(clone == set);
    drop(set);
    assert_eq!(clone.get_item(500), Ok(&500));
}

#[test]
fn union_and_intersection() {
    let mut set1 = OrderedSet::new();
    let mut set2 = OrderedSet::new();
    set1.insert_all([4, 2, 6, 1, 3, 5]).unwrap();
    set2.insert_all([7, 6, 8, 10, 9, 1]).unwrap();
    let union = set1.union(&set2).unwrap();
    union.check();
    assert_eq!(union.to_sorted_vec(), (1..=10).collect::<Vec<_>>());

    let mut set2 = OrderedSet::new();
    set2.insert_all([2, 2, 8, 3, 9, 1]).unwrap();
    let intersection = set1.intersection(&set2).unwrap();
    assert_eq!(intersection.to_sorted_vec(), vec![1, 2, 3]);
}

#[test]
fn comparisons() {
    let mut set1 = OrderedSet::new();
    let mut set2 = OrderedSet::new();
    set1.insert_all([1, 2]).unwrap();
    set2.insert(1).unwrap();

    assert!(set2 < set1);
    assert!(!(set2 > set1));
    assert!(set2 != set1);
    assert!(set2 <= set1);
    assert!(!(set2 >= set1));

    set2.insert(2).unwrap();
    assert!(!(set2 < set1));
    assert!(set2 == set1);
    assert!(set2 <= set1);
    assert!(set2 >= set1);

    set2.insert(3).unwrap();
    set2.remove(&2).unwrap();
    assert!(!(set2 < set1));
    assert!(!(set2 > set1));
    assert!(!(set2 <= set1));
    assert!(!(set2 >= set1));

    set1.remove(&2).unwrap();
    assert!(set2 > set1);
    assert!(set2 >= set1);
    assert!(set1.is_proper_subset(&set2));
    assert!(set2.is_proper_superset(&set1));
}
