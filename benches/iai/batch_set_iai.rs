//! IAI-Callgrind benchmark for BatchSet inserts and flushes.
//!
//! Measures instruction counts for buffered inserts (small vs default buffer)
//! and bulk construction from the same keys.
//! Data sizes: 1000 and 100000 keys with a fixed pseudo-random permutation.

use batchset::{BatchSet, BatchSetConfig};
use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use std::hint::black_box;

/// Deterministic scrambled keys with every value appearing twice.
fn scrambled_keys(size: u64) -> Vec<u64> {
    (0..size)
        .map(|index| (index * 2_654_435_761) % (size / 2).max(1))
        .collect()
}

fn setup_keys_1000() -> Vec<u64> {
    scrambled_keys(1000)
}

fn setup_keys_100000() -> Vec<u64> {
    scrambled_keys(100_000)
}

fn insert_all(elements: Vec<u64>, buffer_capacity: usize) -> BatchSet<u64> {
    let mut set = BatchSet::with_config(BatchSetConfig::default().with_buffer_capacity(buffer_capacity));
    for element in elements {
        set.insert(black_box(element));
    }
    set.flush();
    set
}

#[library_benchmark]
#[bench::with_setup(setup_keys_1000())]
fn insert_small_buffer_1000(elements: Vec<u64>) -> BatchSet<u64> {
    black_box(insert_all(black_box(elements), 64))
}

#[library_benchmark]
#[bench::with_setup(setup_keys_100000())]
fn insert_small_buffer_100000(elements: Vec<u64>) -> BatchSet<u64> {
    black_box(insert_all(black_box(elements), 64))
}

#[library_benchmark]
#[bench::with_setup(setup_keys_1000())]
fn insert_default_buffer_1000(elements: Vec<u64>) -> BatchSet<u64> {
    black_box(insert_all(black_box(elements), 1024))
}

#[library_benchmark]
#[bench::with_setup(setup_keys_100000())]
fn insert_default_buffer_100000(elements: Vec<u64>) -> BatchSet<u64> {
    black_box(insert_all(black_box(elements), 1024))
}

#[library_benchmark]
#[bench::with_setup(setup_keys_1000())]
fn from_vec_1000(elements: Vec<u64>) -> BatchSet<u64> {
    black_box(BatchSet::from_vec(black_box(elements)))
}

#[library_benchmark]
#[bench::with_setup(setup_keys_100000())]
fn from_vec_100000(elements: Vec<u64>) -> BatchSet<u64> {
    black_box(BatchSet::from_vec(black_box(elements)))
}

library_benchmark_group!(
    name = batch_set_group;
    benchmarks =
        insert_small_buffer_1000, insert_small_buffer_100000,
        insert_default_buffer_1000, insert_default_buffer_100000,
        from_vec_1000, from_vec_100000
);

main!(library_benchmark_groups = batch_set_group);
