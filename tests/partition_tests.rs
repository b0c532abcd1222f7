mod common;

use common::*;
use logsort::core::ceil_log2;
use logsort::partition::{block_read, block_xor, partition};
use logsort::pivot::{choose_pivot, select_nth};
use logsort::smallsort::{insertion_sort, insertion_sort_unguarded};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn le(x: &u32, p: &u32) -> bool {
    x <= p
}

fn lt(x: &u32, p: &u32) -> bool {
    x < p
}

fn check(input: &[u32], b_len: usize, pivot: u32, pred: &mut impl FnMut(&u32, &u32) -> bool) {
    let mut v = input.to_vec();
    let mut scratch = vec![0; b_len];
    let mid = partition(&mut v, &mut scratch, &pivot, pred);

    assert!(
        v[..mid].iter().all(|x| pred(x, &pivot)),
        "len {} b_len {}",
        input.len(),
        b_len
    );
    assert!(
        v[mid..].iter().all(|x| !pred(x, &pivot)),
        "len {} b_len {}",
        input.len(),
        b_len
    );
    assert_eq!(mid, input.iter().filter(|&&x| pred(&x, &pivot)).count());

    let mut sorted = v.clone();
    sorted.sort_unstable();
    assert_sorted_permutation(input, &sorted);
}

#[test]
fn test_concrete_scenario() {
    let input = [5, 3, 8, 3, 9, 1, 3, 7];

    for b_len in [3, 4, 8, 16] {
        let mut v = input;
        let mut scratch = vec![0; b_len];
        let mid = partition(&mut v, &mut scratch, &3, &mut le);

        assert_eq!(mid, 4);
        let mut left = v[..mid].to_vec();
        let mut right = v[mid..].to_vec();
        left.sort_unstable();
        right.sort_unstable();
        assert_eq!(left, vec![1, 3, 3, 3]);
        assert_eq!(right, vec![5, 7, 8, 9]);
    }

    let mut v = input;
    logsort::logsort(&mut v);
    assert_eq!(v, [1, 3, 3, 3, 5, 7, 8, 9]);
}

#[test]
fn test_block_len_equal_to_len_uses_linear_path() {
    // The linear path keeps both sides in their original relative order.
    let input = random_shifted(512, 0, 21);
    let mut v = input.clone();
    let mut scratch = vec![0; input.len()];
    let mid = partition(&mut v, &mut scratch, &200, &mut le);

    let expected_left: Vec<u32> = input.iter().copied().filter(|&x| x <= 200).collect();
    let expected_right: Vec<u32> = input.iter().copied().filter(|&x| x > 200).collect();
    assert_eq!(&v[..mid], expected_left.as_slice());
    assert_eq!(&v[mid..], expected_right.as_slice());
}

#[test]
fn test_partition_sizes_and_pivots() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..300 {
        let len = rng.random_range(0..3_000);
        let shift = rng.random_range(0..6);
        let input = random_shifted(len, shift, rng.random());
        let max = (len >> shift) as u32 + 1;
        let pivot = rng.random_range(0..=max);
        let b_len = rng.random_range(ceil_log2(len) + 1..=64);

        check(&input, b_len, pivot, &mut le);
        check(&input, b_len, pivot, &mut lt);
    }
}

#[test]
fn test_partition_block_multiples() {
    // Exact multiples of the block length leave no leftovers.
    for blocks in 1..12 {
        let b_len = 16;
        let input = random_shifted(blocks * b_len, 0, blocks as u64);
        for pivot in [0, 10, (blocks * b_len / 2) as u32, 1_000] {
            check(&input, b_len, pivot, &mut le);
        }
    }
}

#[test]
fn test_partition_extreme_minorities() {
    // One satisfying block among many, and one non-satisfying block among many.
    let b_len = 10;
    let mut input: Vec<u32> = vec![100; 200];
    input[150..160].iter_mut().for_each(|x| *x = 1);
    check(&input, b_len, 50, &mut le);

    let mut input: Vec<u32> = vec![1; 200];
    input[20..30].iter_mut().for_each(|x| *x = 100);
    check(&input, b_len, 50, &mut le);
}

#[test]
fn test_partition_blocks_shorter_than_tag() {
    // 64 elements in blocks of two: up to 16 tagged pairs would need a 4-element tag.
    let input = random_shifted(64, 0, 64);
    for pivot in [0, 20, 31, 50, 64] {
        check(&input, 2, pivot, &mut le);
    }

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let len = rng.random_range(0..2_000);
        let shift = rng.random_range(0..4);
        let input = random_shifted(len, shift, rng.random());
        let pivot = rng.random_range(0..=(len >> shift) as u32 + 1);
        let b_len = rng.random_range(1..=ceil_log2(len).max(1));

        check(&input, b_len, pivot, &mut le);
        check(&input, b_len, pivot, &mut lt);
    }
}

#[test]
fn test_tag_helpers() {
    let w = 6;
    let mask = (1 << w) - 1;
    for tag in [0usize, 1, 5, 42, 63] {
        let mut left = [0u32; 8];
        let mut right = [10u32; 8];
        block_xor(&mut left, &mut right, tag);

        assert_eq!(block_read(&right, &5, w, &mut le), tag);
        assert_eq!(mask ^ block_read(&left, &5, w, &mut le), tag);

        block_xor(&mut left, &mut right, tag);
        assert_eq!(left, [0; 8]);
        assert_eq!(right, [10; 8]);
    }
}

#[test]
fn test_insertion_sorts() {
    let mut rng = StdRng::seed_from_u64(7);
    for len in 0..40 {
        let input: Vec<u32> = (0..len).map(|_| rng.random_range(1..20)).collect();

        let mut v = input.clone();
        insertion_sort(&mut v, &mut lt);
        assert_sorted_permutation(&input, &v);

        // Guard element in front, tail sorted behind it.
        let mut guarded = vec![0];
        guarded.extend_from_slice(&input);
        insertion_sort_unguarded(&mut guarded, &mut lt);
        assert_eq!(guarded[0], 0);
        assert_sorted_permutation(&input, &guarded[1..]);
    }
}

#[test]
fn test_unguarded_with_violated_guard_stays_in_bounds() {
    let input = vec![5u32, 4, 3, 2, 1];
    let mut v = input.clone();
    insertion_sort_unguarded(&mut v, &mut lt);

    let mut sorted = v.clone();
    sorted.sort_unstable();
    assert_sorted_permutation(&input, &sorted);
}

#[test]
fn test_choose_pivot_is_element() {
    for len in [9, 100, 2_047, 2_048, 100_000] {
        let input = random_shifted(len, 2, len as u64);
        let mut scratch = vec![0; 512.min(len)];
        let pivot = choose_pivot(&input, &mut scratch, &mut lt);
        assert!(input.contains(&pivot));
    }
}

#[test]
fn test_choose_pivot_balanced_on_ascending() {
    let input = ascending(1 << 16);
    let mut scratch = vec![0; 512];
    let pivot = choose_pivot(&input, &mut scratch, &mut lt) as usize;
    let quarter = input.len() / 4;
    assert!(pivot > quarter && pivot < 3 * quarter, "pivot {}", pivot);
}

#[test]
fn test_select_nth_random() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let len = rng.random_range(1..600);
        let input: Vec<u32> = (0..len).map(|_| rng.random_range(0..100)).collect();
        let k = rng.random_range(0..len);

        let mut v = input.clone();
        select_nth(&mut v, k, &mut lt);

        let mut sorted = input.clone();
        sorted.sort_unstable();
        assert_eq!(v[k], sorted[k]);
    }
}
