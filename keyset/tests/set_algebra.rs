#![allow(missing_docs)] // test only
use keyset::*;

type_catalog! {
    #[derive(Clone, Debug)]
    enum Value {
        Int(i64),
        Text(String),
    }
    enum ValueRef<'a>;
}

fn check_laws<S: SetAlgebra + PartialOrd>(a: &S, b: &S) {
    let union = a.union(b).unwrap();
    let intersection = a.intersection(b).unwrap();

    assert!(a.is_subset(&union) && b.is_subset(&union));
    assert!(union.is_superset(a) && union.is_superset(b));
    assert!(intersection.is_subset(a) && intersection.is_subset(b));
    assert_eq!(
        union.entry_count() + intersection.entry_count(),
        a.entry_count() + b.entry_count()
    );
    assert!(union == b.union(a).unwrap());
    assert!(intersection == b.intersection(a).unwrap());

    assert_eq!(a.partial_cmp(b), a.set_cmp(b));
    assert_eq!(a <= b, a.is_subset(b));
    assert_eq!(a < b, a.is_proper_subset(b));
    assert_eq!(a >= b, a.is_superset(b));
    assert_eq!(a > b, a.is_proper_superset(b));
    assert_eq!(a == b, a <= b && a >= b);

    assert!(*a == a.clone());
    let empty = a.empty_like();
    assert!(a.union(&empty).unwrap() == *a);
    assert_eq!(a.intersection(&empty).unwrap().entry_count(), 0);
    assert!(empty <= *a);
    assert_eq!(empty < *a, a.entry_count() > 0);
}

fn check_pairs<S: SetAlgebra + PartialOrd>(sets: &[S]) {
    for a in sets {
        for b in sets {
            check_laws(a, b);
        }
    }
}

#[test]
fn hash_chain_set() {
    let mut sets = vec![];
    for range in [0..20, 10..30, 0..5, 0..0, 5..15] {
        let mut set = HashChainSet::with_capacity(3);
        set.insert_all(range).unwrap();
        sets.push(set);
    }
    check_pairs(&sets);
}

#[test]
fn ordered_set() {
    let mut sets = vec![];
    for words in [
        &["delta", "alpha", "echo", "bravo"][..],
        &["alpha", "bravo"][..],
        &["charlie", "echo", "foxtrot"][..],
        &[][..],
    ] {
        let mut set = OrderedSet::new();
        set.insert_all(words.iter().map(|word| word.to_string())).unwrap();
        sets.push(set);
    }
    check_pairs(&sets);
}

#[test]
fn combined_set() {
    let mut sets = vec![];
    for (numbers, texts) in [
        (&[1, 2, 3][..], &["1", "2"][..]),
        (&[2, 3][..], &["2"][..]),
        (&[][..], &["1", "3"][..]),
        (&[1, 2, 3, 4][..], &["1", "2", "3"][..]),
    ] {
        let mut set: CombinedSet<Value> = CombinedSet::new();
        for &number in numbers {
            set.insert(number as i64).unwrap();
        }
        for &text in texts {
            set.insert(text.to_string()).unwrap();
        }
        sets.push(set);
    }
    check_pairs(&sets);
}

#[test]
fn unique_set() {
    let values: Vec<u32> = vec![7; 12];
    let mut sets = vec![];
    for range in [0..12, 0..6, 4..10, 11..12] {
        let mut set = UniqueSet::new();
        set.insert_all(&values[range]).unwrap();
        sets.push(set);
    }
    check_pairs(&sets);
}

#[test]
fn unique_combined_set() {
    let numbers: Vec<i64> = (0..8).collect();
    let texts: Vec<String> = numbers.iter().map(|number| number.to_string()).collect();
    let mut sets = vec![];
    for (low, high) in [(0, 8), (2, 5), (4, 8), (0, 0)] {
        let mut set: UniqueCombinedSet<Value> = UniqueCombinedSet::new();
        for index in low..high {
            set.insert(&numbers[index]).unwrap();
            set.insert(&texts[index]).unwrap();
        }
        sets.push(set);
    }
    check_pairs(&sets);
}

#[test]
fn union_keeps_values_of_other() {
    let mut a = HashChainSet::new();
    let mut b = HashChainSet::new();
    a.insert_with_key("from a", 1).unwrap();
    a.insert_with_key("only a", 2).unwrap();
    b.insert_with_key("from b", 1).unwrap();

    let union = a.union(&b).unwrap();
    assert_eq!(union.len(), 2);
    assert_eq!(union.get_with_key(1), Some(&"from b"));
    assert_eq!(union.get_with_key(2), Some(&"only a"));

    // intersection keeps the values of self
    let intersection = a.intersection(&b).unwrap();
    assert_eq!(intersection.to_vec(), vec!["from a"]);
    assert!(a.set_eq(&a.union(&intersection).unwrap()));
}
