//! Randomized validation of BatchSet against a sort + dedup reference.
//!
//! Each round inserts a block of random keys into the set and into a plain
//! vector, then compares the set against the vector after sorting and
//! deduplicating it. Seeds are fixed so failures reproduce.

use batchset::{BatchSet, BatchSetConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

const ROUNDS: usize = 64;
const KEYS_PER_ROUND: usize = 1024;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Runs the validation rounds and returns the number of mismatching checks.
fn run_rounds(seed: u64, config: BatchSetConfig, key_space: u64) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = BatchSet::with_config(config);
    let mut reference: Vec<u64> = Vec::with_capacity(ROUNDS * KEYS_PER_ROUND);
    let mut errors = 0;

    for round in 0..ROUNDS {
        for _ in 0..KEYS_PER_ROUND {
            let key = rng.gen_range(0..key_space);
            reference.push(key);
            set.insert(key);
        }

        reference.sort_unstable();
        reference.dedup();

        if set.len() != reference.len() {
            tracing::error!(round, expected = reference.len(), actual = set.len(), "length mismatch");
            errors += 1;
            continue;
        }
        for (position, expected) in reference.iter().enumerate() {
            if set.at(position) != expected {
                tracing::error!(round, position, "element mismatch");
                errors += 1;
            }
        }
    }
    errors
}

#[rstest]
#[case::default_buffer_sparse_keys(1, BatchSetConfig::default(), u64::MAX)]
#[case::default_buffer_dense_keys(2, BatchSetConfig::default(), 20_000)]
#[case::small_buffer(3, BatchSetConfig::new(0, 64), 50_000)]
#[case::odd_buffer(4, BatchSetConfig::new(0, 1000), 30_000)]
#[case::preallocated(5, BatchSetConfig::new(1 << 16, 4096), 100_000)]
fn random_rounds_match_reference(
    #[case] seed: u64,
    #[case] config: BatchSetConfig,
    #[case] key_space: u64,
) {
    init_tracing();
    assert_eq!(run_rounds(seed, config, key_space), 0);
}

#[rstest]
fn ten_thousand_random_keys_with_modest_duplicates() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let keys: Vec<u64> = (0..10_000).map(|_| rng.gen_range(0..40_000)).collect();

    let mut set = BatchSet::with_capacity(0, 1024);
    set.extend(keys.iter().copied());

    let mut expected = keys;
    expected.sort_unstable();
    expected.dedup();
    assert_eq!(set.into_sorted_vec(), expected);
}

#[rstest]
fn random_inserts_and_removals_match_reference() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(7);
    let mut set = BatchSet::with_capacity(0, 64);
    let mut reference = std::collections::BTreeSet::new();

    for step in 0..20_000 {
        let key: u32 = rng.gen_range(0..2_000);
        if rng.gen_bool(0.2) {
            assert_eq!(set.remove(&key), reference.remove(&key), "step {step}");
        } else {
            set.insert(key);
            reference.insert(key);
        }
    }

    assert!(set.iter().eq(reference.iter()));
}
