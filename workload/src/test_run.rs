#![cfg(test)]
use rand::{rngs::SmallRng, SeedableRng};

use crate::run::{self, Config, Summary};

fn config(key_range: u64) -> Config {
    Config {
        ops: 5_000,
        capacity: 4,
        key_range,
    }
}

fn assert_balanced(summary: &Summary) {
    let counts = summary.counts;
    assert_eq!(counts.inserted - counts.removed, summary.len);
    assert!(counts.inserts > 0 && counts.removes > 0 && counts.lookups > 0);
    assert!(counts.hits <= counts.lookups);
}

#[test]
fn hash_workload() {
    for seed in 0..4 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let summary = run::hash(&config(200), &mut rng).unwrap();
        assert_balanced(&summary);
        assert!(summary.capacity.unwrap() as f64 * 0.75 >= summary.len as f64);
    }
}

#[test]
fn ordered_workload() {
    for seed in 0..4 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let summary = run::ordered(&config(200), &mut rng).unwrap();
        assert_balanced(&summary);
        assert!(summary.counts.ranks > 0);
        assert!(summary.depth.unwrap() >= 1);
    }
}

#[test]
fn combined_workload() {
    let mut rng = SmallRng::seed_from_u64(7);
    let summary = run::combined(&config(100), &mut rng).unwrap();
    assert_balanced(&summary);
}

#[test]
fn unique_workload() {
    let mut rng = SmallRng::seed_from_u64(11);
    let summary = run::unique(&config(64), &mut rng).unwrap();
    assert_balanced(&summary);
}

#[test]
fn unique_combined_workload() {
    let mut rng = SmallRng::seed_from_u64(13);
    let summary = run::unique_combined(&config(64), &mut rng).unwrap();
    assert_balanced(&summary);
}

#[test]
fn single_key_range() {
    let mut rng = SmallRng::seed_from_u64(0);
    let summary = run::ordered(&config(1), &mut rng).unwrap();
    assert!(summary.len <= 1);
}

#[test]
fn summary_mentions_capacity() {
    let mut rng = SmallRng::seed_from_u64(1);
    let summary = run::hash(&config(10), &mut rng).unwrap();
    let text = summary.to_string();
    assert!(text.starts_with("hash: final size "));
    assert!(text.contains(", capacity "));
}
