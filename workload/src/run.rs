//! Operation loops for every collection kind.
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::{self, Debug},
};

use color_eyre::eyre::{ensure, Result};
use keyset::{
    hash::{Key, KeyHash},
    type_catalog, Catalog, CombinedSet, HashChainSet, OrderedSet, SetError, Tag, TaggedEntry,
    UniqueCombinedSet, UniqueSet,
};
use rand::{seq::SliceRandom, Rng};

/// Parameters shared by all workloads.
pub struct Config {
    pub ops: usize,
    pub capacity: usize,
    pub key_range: u64,
}

impl Config {
    /// Draws an integer from a range of `key_range` values centered on zero.
    fn random_int(&self, rng: &mut impl Rng) -> i64 {
        rng.gen_range(0..self.key_range) as i64 - (self.key_range / 2) as i64
    }

    fn random_index(&self, rng: &mut impl Rng) -> usize {
        rng.gen_range(0..self.key_range as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Insert,
    Remove,
    Contains,
    Rank,
}

fn choose_op(rng: &mut impl Rng, with_rank: bool) -> Result<Op> {
    let weights = [
        (Op::Insert, 5u32),
        (Op::Remove, 3),
        (Op::Contains, 2),
        (Op::Rank, if with_rank { 2 } else { 0 }),
    ];
    Ok(weights.choose_weighted(rng, |x| x.1)?.0)
}

/// Turns a missing value into `None` and keeps every other error.
fn found<T>(result: Result<T, SetError>) -> Result<Option<T>, SetError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(SetError::ValueNotFound) => Ok(None),
        Err(err) => Err(err),
    }
}

fn check<T: PartialEq + Debug>(index: usize, what: &str, actual: T, expected: T) -> Result<T> {
    ensure!(
        actual == expected,
        "operation {index}: {what} returned {actual:?}, expected {expected:?}"
    );
    Ok(actual)
}

#[derive(Clone, Copy, Default, Debug)]
pub struct Counts {
    pub inserts: usize,
    pub inserted: usize,
    pub removes: usize,
    pub removed: usize,
    pub lookups: usize,
    pub hits: usize,
    pub ranks: usize,
}

impl Counts {
    fn insert(&mut self, inserted: bool) {
        self.inserts += 1;
        self.inserted += inserted as usize;
    }

    fn remove(&mut self, removed: bool) {
        self.removes += 1;
        self.removed += removed as usize;
    }

    fn lookup(&mut self, hit: bool) {
        self.lookups += 1;
        self.hits += hit as usize;
    }
}

/// Final state of a workload.
#[derive(Debug)]
pub struct Summary {
    pub kind: &'static str,
    pub len: usize,
    pub capacity: Option<usize>,
    pub depth: Option<usize>,
    pub counts: Counts,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Counts {
            inserts,
            inserted,
            removes,
            removed,
            lookups,
            hits,
            ranks,
        } = self.counts;
        write!(f, "{}: final size {}", self.kind, self.len)?;
        if let Some(capacity) = self.capacity {
            write!(f, ", capacity {capacity}")?;
        }
        if let Some(depth) = self.depth {
            write!(f, ", depth {depth}")?;
        }
        write!(
            f,
            ", {inserted}/{inserts} inserts, {removed}/{removes} removes, {hits}/{lookups} lookups"
        )?;
        if ranks > 0 {
            write!(f, ", {ranks} rank checks")?;
        }
        Ok(())
    }
}

pub fn hash(config: &Config, rng: &mut impl Rng) -> Result<Summary> {
    let mut set = HashChainSet::with_capacity(config.capacity);
    let mut reference: HashMap<Key, i64> = HashMap::new();
    let mut counts = Counts::default();

    for index in 0..config.ops {
        let value = config.random_int(rng);
        let key = value.key_hash();
        match choose_op(rng, false)? {
            Op::Insert => {
                let expected = !reference.contains_key(&key);
                if expected {
                    reference.insert(key, value);
                }
                counts.insert(check(index, "insert", set.insert(value)?, expected)?);
            }
            Op::Remove => {
                let expected = reference.remove(&key);
                let removed = check(index, "remove", found(set.remove(&value))?, expected)?;
                counts.remove(removed.is_some());
            }
            Op::Contains | Op::Rank => {
                let expected = reference.contains_key(&key);
                counts.lookup(check(index, "contains", set.contains(&value), expected)?);
            }
        }
        check(index, "len", set.len(), reference.len())?;
    }

    for value in &set {
        ensure!(
            reference.get(&value.key_hash()) == Some(value),
            "iteration yielded unexpected value {value}"
        );
    }

    Ok(Summary {
        kind: "hash",
        len: set.len(),
        capacity: Some(set.capacity()),
        depth: None,
        counts,
    })
}

pub fn ordered(config: &Config, rng: &mut impl Rng) -> Result<Summary> {
    let mut set = OrderedSet::new();
    let mut reference: BTreeMap<Key, i64> = BTreeMap::new();
    let mut counts = Counts::default();

    for index in 0..config.ops {
        let value = config.random_int(rng);
        let key = value.key_hash();
        match choose_op(rng, true)? {
            Op::Insert => {
                let expected = !reference.contains_key(&key);
                if expected {
                    reference.insert(key, value);
                }
                counts.insert(check(index, "insert", set.insert(value)?, expected)?);
            }
            Op::Remove => {
                let expected = reference.remove(&key);
                let removed = check(index, "remove", found(set.remove(&value))?, expected)?;
                counts.remove(removed.is_some());
            }
            Op::Contains => {
                let expected = reference.contains_key(&key);
                counts.lookup(check(index, "contains", set.contains(&value), expected)?);
            }
            Op::Rank => {
                if reference.is_empty() {
                    ensure!(
                        set.get_item(0) == Err(SetError::EmptySet),
                        "operation {index}: get_item on an empty set did not fail"
                    );
                    continue;
                }
                let rank = rng.gen_range(0..reference.len());
                let expected = reference.values().nth(rank);
                let item = check(index, "get_item", set.get_item(rank).ok(), expected)?;
                let item = *item.ok_or(SetError::Internal)?;
                check(index, "index_of", set.index_of(&item)?, rank)?;
                counts.ranks += 1;
            }
        }
        check(index, "len", set.len(), reference.len())?;
    }

    ensure!(
        set.iter().eq(reference.values()),
        "in-order iteration differs from the sorted reference"
    );

    Ok(Summary {
        kind: "ordered",
        len: set.len(),
        capacity: None,
        depth: Some(set.depth()),
        counts,
    })
}

type_catalog! {
    #[derive(Clone, Debug, PartialEq)]
    pub enum Scalar {
        Int(i64),
        Text(String),
        Flag(bool),
    }
    pub enum ScalarRef<'a>;
}

impl Scalar {
    fn key(&self) -> Key {
        match self {
            Scalar::Int(value) => value.key_hash(),
            Scalar::Text(value) => value.key_hash(),
            Scalar::Flag(value) => value.key_hash(),
        }
    }

    fn random(config: &Config, rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..3) {
            0 => Scalar::Int(config.random_int(rng)),
            1 => Scalar::Text(format!("k{}", config.random_index(rng))),
            _ => Scalar::Flag(rng.gen()),
        }
    }
}

fn remove_scalar(set: &mut CombinedSet<Scalar>, value: &Scalar) -> Result<Option<Scalar>, SetError> {
    let removed = match value {
        Scalar::Int(value) => set.remove(value),
        Scalar::Text(value) => set.remove(value),
        Scalar::Flag(value) => set.remove(value),
    };
    Ok(found(removed)?.map(TaggedEntry::into_payload))
}

fn contains_scalar(set: &CombinedSet<Scalar>, value: &Scalar) -> Result<bool, SetError> {
    match value {
        Scalar::Int(value) => set.contains(value),
        Scalar::Text(value) => set.contains(value),
        Scalar::Flag(value) => set.contains(value),
    }
}

pub fn combined(config: &Config, rng: &mut impl Rng) -> Result<Summary> {
    let mut set = CombinedSet::<Scalar>::with_capacity(config.capacity);
    let mut reference: HashMap<(Tag, Key), Scalar> = HashMap::new();
    let mut counts = Counts::default();

    for index in 0..config.ops {
        let value = Scalar::random(config, rng);
        let probe = (value.tag(), value.key());
        match choose_op(rng, false)? {
            Op::Insert => {
                let expected = !reference.contains_key(&probe);
                if expected {
                    reference.insert(probe, value.clone());
                }
                let inserted = set.insert_payload(value, probe.1)?;
                counts.insert(check(index, "insert", inserted, expected)?);
            }
            Op::Remove => {
                let expected = reference.remove(&probe);
                let removed = check(index, "remove", remove_scalar(&mut set, &value)?, expected)?;
                counts.remove(removed.is_some());
            }
            Op::Contains | Op::Rank => {
                let expected = reference.contains_key(&probe);
                counts.lookup(check(index, "contains", contains_scalar(&set, &value)?, expected)?);
                ensure!(
                    set.contains(&0.5f64) == Err(SetError::TypeNotAccepted),
                    "operation {index}: a foreign type was accepted"
                );
            }
        }
        check(index, "len", set.len(), reference.len())?;
    }

    for entry in &set {
        ensure!(
            reference.get(&(entry.tag(), entry.key())) == Some(entry.payload()),
            "iteration yielded unexpected entry {entry:?}"
        );
    }

    Ok(Summary {
        kind: "combined",
        len: set.len(),
        capacity: Some(set.capacity()),
        depth: None,
        counts,
    })
}

pub fn unique(config: &Config, rng: &mut impl Rng) -> Result<Summary> {
    // Equal contents at distinct addresses.
    let pool: Vec<i64> = (0..config.key_range as i64).map(|i| i % 8).collect();
    let mut set = UniqueSet::with_capacity(config.capacity);
    let mut reference: HashSet<usize> = HashSet::new();
    let mut counts = Counts::default();

    for index in 0..config.ops {
        let slot = config.random_index(rng);
        let value = &pool[slot];
        match choose_op(rng, false)? {
            Op::Insert => {
                let expected = reference.insert(slot);
                counts.insert(check(index, "insert", set.insert(value)?, expected)?);
            }
            Op::Remove => {
                let expected = reference.remove(&slot);
                let removed = found(set.remove(value))?;
                ensure!(
                    removed.map_or(!expected, |removed| expected && std::ptr::eq(removed, value)),
                    "operation {index}: remove of slot {slot} returned {removed:?}"
                );
                counts.remove(expected);
            }
            Op::Contains | Op::Rank => {
                let expected = reference.contains(&slot);
                counts.lookup(check(index, "contains", set.contains(value), expected)?);
            }
        }
        check(index, "len", set.len(), reference.len())?;
    }

    Ok(Summary {
        kind: "unique",
        len: set.len(),
        capacity: Some(set.capacity()),
        depth: None,
        counts,
    })
}

pub fn unique_combined(config: &Config, rng: &mut impl Rng) -> Result<Summary> {
    let ints: Vec<i64> = (0..config.key_range as i64).map(|i| i % 8).collect();
    let texts: Vec<String> = (0..config.key_range).map(|i| format!("t{}", i % 8)).collect();
    let mut set = UniqueCombinedSet::<Scalar>::with_capacity(config.capacity);
    let mut reference: HashSet<(bool, usize)> = HashSet::new();
    let mut counts = Counts::default();

    for index in 0..config.ops {
        let slot = (rng.gen::<bool>(), config.random_index(rng));
        let (is_text, position) = slot;
        match choose_op(rng, false)? {
            Op::Insert => {
                let expected = reference.insert(slot);
                let inserted = if is_text {
                    set.insert(&texts[position])?
                } else {
                    set.insert(&ints[position])?
                };
                counts.insert(check(index, "insert", inserted, expected)?);
            }
            Op::Remove => {
                let expected = reference.remove(&slot);
                let removed = if is_text {
                    found(set.remove(&texts[position]))?
                } else {
                    found(set.remove(&ints[position]))?
                };
                check(index, "remove", removed.is_some(), expected)?;
                counts.remove(expected);
            }
            Op::Contains | Op::Rank => {
                let expected = reference.contains(&slot);
                let contained = if is_text {
                    set.contains(&texts[position])?
                } else {
                    set.contains(&ints[position])?
                };
                counts.lookup(check(index, "contains", contained, expected)?);
            }
        }
        check(index, "len", set.len(), reference.len())?;
    }

    let text_tag = set.tag_of::<String>()?;
    for entry in &set {
        let is_text = entry.tag() == text_tag;
        let position = if is_text {
            let value = entry.get_as::<String>()?;
            texts.iter().position(|text| std::ptr::eq(text, value))
        } else {
            let value = entry.get_as::<i64>()?;
            ints.iter().position(|int| std::ptr::eq(int, value))
        };
        ensure!(
            position.is_some_and(|position| reference.contains(&(is_text, position))),
            "iteration yielded unexpected entry {entry:?}"
        );
    }

    Ok(Summary {
        kind: "unique-combined",
        len: set.len(),
        capacity: Some(set.capacity()),
        depth: None,
        counts,
    })
}
