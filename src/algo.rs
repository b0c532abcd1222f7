//! Public entry points and the recursive driver.
//!
//! The driver repeatedly picks a pivot, partitions with "<= pivot" and continues on both
//! halves: it recurses into the shorter one and loops on the longer one, which keeps the
//! recursion depth logarithmic. When "<= pivot" accepts the whole region (typically many
//! copies of the pivot), the region is split again with "< pivot" and the run of pivot-equal
//! elements at the end is done.
//!
//! The main entry points are [`logsort`] and [`logsort_by`].

use crate::core::{LogSort, SortError, SortStats};
use crate::partition::partition;
use crate::pivot::choose_pivot;
use crate::smallsort::{insertion_sort, insertion_sort_unguarded};
use log::{debug, trace};
use std::cmp::Ordering;

/// Sorts the slice in ascending order, without preserving the order of equal elements.
///
/// Only a single buffer of one block (at most [`DEFAULT_BLOCK_LEN`](crate::core::DEFAULT_BLOCK_LEN)
/// elements) is allocated for the whole call, regardless of the slice length.
///
/// # Examples
///
/// ```
/// use logsort::logsort;
///
/// let mut data = vec![5, 3, 8, 3, 9, 1, 3, 7];
/// logsort(&mut data);
///
/// assert_eq!(data, vec![1, 3, 3, 3, 5, 7, 8, 9]);
/// ```
pub fn logsort<T: Ord + Copy>(v: &mut [T]) {
    logsort_by(v, T::cmp);
}

/// Sorts the slice with a comparator function, without preserving the order of equal
/// elements.
///
/// The comparator must define a total order. If it does not, the resulting order is
/// unspecified, but the call terminates and all original elements remain in `v` as long as
/// the comparator does not panic.
///
/// # Examples
///
/// ```
/// use logsort::logsort_by;
///
/// let mut data = vec![1.5f64, -2.0, 0.25, 9.0];
/// logsort_by(&mut data, |a, b| b.partial_cmp(a).unwrap());
///
/// assert_eq!(data, vec![9.0, 1.5, 0.25, -2.0]);
/// ```
pub fn logsort_by<T, F>(v: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let config = LogSort::default();
    let is_less = &mut |a: &T, b: &T| compare(a, b) == Ordering::Less;

    let len = v.len();
    if len <= config.threshold() {
        insertion_sort(v, is_less);
        return;
    }

    let mut scratch = vec![v[0]; config.effective_block_len(len)];
    drive(v, &mut scratch, is_less, &config);
}

/// Fallible variant used by [`LogSort::try_sort_by`].
///
/// The scratch buffer is reserved before `v` is touched.
pub(crate) fn try_sort_with<T, F>(
    v: &mut [T],
    is_less: &mut F,
    config: &LogSort,
) -> Result<SortStats, SortError>
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len <= config.threshold() {
        insertion_sort(v, is_less);
        return Ok(SortStats::default());
    }

    let b_len = config.effective_block_len(len);
    let mut scratch = Vec::new();
    scratch
        .try_reserve_exact(b_len)
        .map_err(|source| SortError::ScratchAlloc { len: b_len, source })?;
    scratch.resize(b_len, v[0]);

    Ok(drive(v, &mut scratch, is_less, config))
}

fn drive<T, F>(v: &mut [T], scratch: &mut [T], is_less: &mut F, config: &LogSort) -> SortStats
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    let mut sorter = Sorter {
        stats: SortStats {
            block_len: scratch.len(),
            ..SortStats::default()
        },
        scratch,
        is_less,
        threshold: config.threshold(),
    };
    sorter.sort_range(v, 0, len, false, 0);

    let stats = sorter.stats;
    debug!(
        "logsort: len={} block_len={} partitions={} strict={} max_depth={}",
        len, stats.block_len, stats.partitions, stats.strict_partitions, stats.max_depth
    );
    stats
}

/// State shared by every level of one top-level sort.
struct Sorter<'a, T, F> {
    scratch: &'a mut [T],
    is_less: &'a mut F,
    threshold: usize,
    stats: SortStats,
}

impl<T, F> Sorter<'_, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    /// Sorts `v[start..end]`.
    ///
    /// `bounded` means `v[start - 1]` is not greater than any element of the range, so the
    /// final insertion sort can use it as a guard.
    fn sort_range(
        &mut self,
        v: &mut [T],
        mut start: usize,
        mut end: usize,
        mut bounded: bool,
        depth: usize,
    ) {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        while end - start > self.threshold {
            let region = &mut v[start..end];
            let len = region.len();
            let pivot = choose_pivot(region, self.scratch, self.is_less);

            let mid = self.partition_le(region, &pivot);
            trace!("partition <=: len={} mid={} depth={}", len, mid, depth);

            if mid == len {
                let mid = self.partition_lt(region, &pivot);
                self.stats.strict_partitions += 1;
                debug!(
                    "all {} elements <= pivot, split again with <: mid={}",
                    len, mid
                );

                if mid == len {
                    // Only reachable with a comparator that is not a total order.
                    insertion_sort(region, self.is_less);
                    return;
                }

                // Everything in `region[mid..]` equals the pivot.
                end = start + mid;
                continue;
            }

            if mid == 0 {
                // Same as above: the pivot itself must satisfy "<= pivot".
                insertion_sort(region, self.is_less);
                return;
            }

            let split = start + mid;
            if mid < len - mid {
                self.sort_range(v, start, split, bounded, depth + 1);
                start = split;
                bounded = true;
            } else {
                self.sort_range(v, split, end, true, depth + 1);
                end = split;
            }
        }

        if bounded && start > 0 {
            insertion_sort_unguarded(&mut v[start - 1..end], self.is_less);
        } else {
            insertion_sort(&mut v[start..end], self.is_less);
        }
    }

    fn partition_le(&mut self, region: &mut [T], pivot: &T) -> usize {
        self.stats.partitions += 1;
        let is_less = &mut *self.is_less;
        let mut le = |x: &T, p: &T| !is_less(p, x);
        partition(region, self.scratch, pivot, &mut le)
    }

    fn partition_lt(&mut self, region: &mut [T], pivot: &T) -> usize {
        self.stats.partitions += 1;
        let is_less = &mut *self.is_less;
        let mut lt = |x: &T, p: &T| is_less(x, p);
        partition(region, self.scratch, pivot, &mut lt)
    }
}
