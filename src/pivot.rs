//! Pivot selection.
//!
//! Short regions use the median of nine evenly spaced elements. Longer regions gather an
//! evenly spaced sample into scratch and take its exact median with [`select_nth`].

use crate::core::{MAX_SAMPLE_LEN, MEDIAN_OF_NINE_LIMIT, SELECT_CUTOFF};
use crate::smallsort::insertion_sort;

/// Returns a copy of an approximate median of `v`.
///
/// `scratch` holds the sample and should be at least 9 elements long.
///
/// # Panics
///
/// Panics if `v` is empty, or if `scratch` is shorter than 9 elements while `v` is shorter
/// than [`MEDIAN_OF_NINE_LIMIT`]. Longer regions only need 2.
pub fn choose_pivot<T, F>(v: &[T], scratch: &mut [T], is_less: &mut F) -> T
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < MEDIAN_OF_NINE_LIMIT {
        median_of_nine(v, scratch, is_less)
    } else {
        sampled_median(v, scratch, is_less)
    }
}

/// Median of nine elements taken at an even stride.
///
/// # Panics
///
/// Panics if `v` is empty or `scratch` is shorter than 9 elements.
pub fn median_of_nine<T, F>(v: &[T], scratch: &mut [T], is_less: &mut F) -> T
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let sample = gather(v, &mut scratch[..9]);
    insertion_sort(sample, is_less);
    sample[4]
}

/// Length of the sample used for a region of `len` elements with block length `b_len`.
///
/// Grows roughly with the cube root of `len`, capped by [`MAX_SAMPLE_LEN`] and by the block
/// length, and is always even.
pub fn sample_len(len: usize, b_len: usize) -> usize {
    let mut c = 32;
    while c < MAX_SAMPLE_LEN && len / c > c * c {
        c *= 2;
    }
    c.min(b_len) & !1
}

/// Exact median of an evenly spaced sample of `v`.
///
/// # Panics
///
/// Panics if `v` is empty or `scratch` is shorter than 2 elements.
pub fn sampled_median<T, F>(v: &[T], scratch: &mut [T], is_less: &mut F) -> T
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let r = sample_len(v.len(), scratch.len());
    let sample = gather(v, &mut scratch[..r]);
    select_nth(sample, r / 2, is_less);
    sample[r / 2]
}

/// Fills `dst` with elements of `v` at an even stride, from the middle of each stride.
fn gather<'a, T: Copy>(v: &[T], dst: &'a mut [T]) -> &'a mut [T] {
    let step = v.len() / dst.len();
    for (i, slot) in dst.iter_mut().enumerate() {
        *slot = v[i * step + step / 2];
    }
    dst
}

/// Reorders `v` so that `v[k]` holds the element that would be there if `v` were sorted,
/// with nothing greater before it and nothing smaller after it.
///
/// Quickselect with Hoare partitioning and median-of-three pivots. Sub-ranges of
/// [`SELECT_CUTOFF`] elements or fewer are finished with insertion sort.
///
/// # Panics
///
/// Panics if `k >= v.len()`.
///
/// # Examples
///
/// ```
/// use logsort::pivot::select_nth;
///
/// let mut v: Vec<u32> = (0..100).rev().collect();
/// select_nth(&mut v, 37, &mut |a: &u32, b: &u32| a < b);
/// assert_eq!(v[37], 37);
/// ```
pub fn select_nth<T, F>(mut v: &mut [T], mut k: usize, is_less: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    assert!(
        k < v.len(),
        "select index {} out of range for length {}",
        k,
        v.len()
    );

    loop {
        let len = v.len();
        if len <= SELECT_CUTOFF {
            insertion_sort(v, is_less);
            return;
        }

        let mid = (len - 1) / 2;
        sort3(v, 0, mid, len - 1, is_less);
        let pivot = v[mid];

        let split = hoare_partition(v, &pivot, is_less);
        if k < split {
            v = &mut v[..split];
        } else {
            v = &mut v[split..];
            k -= split;
        }
    }
}

/// Splits `v` into `[..i]` with nothing greater than `pivot` and `[i..]` with nothing smaller.
///
/// Expects `v[0] <= pivot <= v[len - 1]`. Returns `i` in `1..len`.
fn hoare_partition<T, F>(v: &mut [T], pivot: &T, is_less: &mut F) -> usize
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    let (mut i, mut j) = (0, len - 1);

    // The index guards only matter for comparators that are not a total order.
    loop {
        while i < len - 1 && is_less(&v[i], pivot) {
            i += 1;
        }
        while j > 0 && is_less(pivot, &v[j]) {
            j -= 1;
        }
        if i >= j {
            break;
        }
        v.swap(i, j);
        i += 1;
        j -= 1;
    }

    i.clamp(1, len - 1)
}

/// Sorts `v[a]`, `v[b]`, `v[c]` in place.
fn sort3<T, F>(v: &mut [T], a: usize, b: usize, c: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(&v[b], &v[a]) {
        v.swap(a, b);
    }
    if is_less(&v[c], &v[b]) {
        v.swap(b, c);
        if is_less(&v[b], &v[a]) {
            v.swap(a, b);
        }
    }
}
