//! Input patterns shared by the integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `len` values `i >> shift`, shuffled. Larger shifts mean more duplicates: every value
/// occurs `2^shift` times.
pub fn random_shifted(len: usize, shift: u32, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut v = Vec::with_capacity(len);
    // Inside-out shuffle.
    for i in 0..len {
        let j = rng.random_range(0..=i);
        v.push(0);
        v[i] = v[j];
        v[j] = (i >> shift) as u32;
    }
    v
}

pub fn random(len: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random()).collect()
}

pub fn ascending(len: usize) -> Vec<u32> {
    (0..len as u32).collect()
}

pub fn descending(len: usize) -> Vec<u32> {
    (0..len as u32).rev().collect()
}

pub fn all_equal(len: usize) -> Vec<u32> {
    vec![66; len]
}

pub fn pipe_organ(len: usize) -> Vec<u32> {
    let half = len / 2;
    (0..half as u32)
        .chain((0..(len - half) as u32).rev())
        .collect()
}

pub fn saw_ascending(len: usize, saw_count: usize, seed: u64) -> Vec<u32> {
    let mut v = random_shifted(len, 0, seed);
    let chunk = (len / saw_count.max(1)).max(1);
    v.chunks_mut(chunk).for_each(|c| c.sort_unstable());
    v
}

pub fn is_sorted<T: Ord>(v: &[T]) -> bool {
    v.windows(2).all(|w| w[0] <= w[1])
}

/// Asserts that `actual` is the sorted permutation of `input`.
pub fn assert_sorted_permutation<T: Ord + Copy + std::fmt::Debug>(input: &[T], actual: &[T]) {
    let mut expected = input.to_vec();
    expected.sort();

    if actual != expected.as_slice() {
        for (i, (a, b)) in actual.iter().zip(expected.iter()).enumerate() {
            if a != b {
                panic!("Mismatch at index {}: Got {:?}, Expected {:?}", i, a, b);
            }
        }
        panic!(
            "Lengths differ? Actual: {}, Expected: {}",
            actual.len(),
            expected.len()
        );
    }
}
