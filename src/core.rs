//! Core types and tuning constants for Logsort.
//!
//! This module defines:
//! - [`LogSort`]: The configuration builder and fallible entry point.
//! - [`SortStats`]: Counters describing a finished sort.
//! - [`SortError`]: Errors reported before the input is touched.

use std::cmp::Ordering;
use std::collections::TryReserveError;
use std::fmt;

/// Default block length, which is also the scratch buffer length.
pub const DEFAULT_BLOCK_LEN: usize = 512;

/// Smallest usable block length. The median-of-nine sample lives in scratch.
pub const MIN_BLOCK_LEN: usize = 9;

/// Regions at or below this length are finished with insertion sort.
pub const DEFAULT_SMALL_SORT_THRESHOLD: usize = 32;

/// Smallest accepted small-sort threshold.
pub const MIN_SMALL_SORT_THRESHOLD: usize = 16;

/// Regions shorter than this pick their pivot with median-of-nine.
pub const MEDIAN_OF_NINE_LIMIT: usize = 2048;

/// Quickselect hands sub-ranges of this length or less to insertion sort.
pub const SELECT_CUTOFF: usize = 16;

/// Upper bound for the pivot sample gathered on large regions.
pub const MAX_SAMPLE_LEN: usize = 2048;

/// Returns the smallest `r` such that `2^r >= n`.
///
/// `ceil_log2(0)` and `ceil_log2(1)` are both `0`.
#[inline]
pub fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}

/// Counters collected during one top-level sort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Number of partition engine calls, strict re-partitions included.
    pub partitions: usize,
    /// Number of times a "<= pivot" partition swallowed the whole region and the
    /// region was split again with "< pivot".
    pub strict_partitions: usize,
    /// Deepest recursion level reached. The top-level loop is level 0.
    pub max_depth: usize,
    /// Block length used for this input, 0 if no scratch was needed.
    pub block_len: usize,
}

/// Errors reported by [`LogSort::try_sort`] and [`LogSort::try_sort_by`].
///
/// Every error is raised before the slice is modified.
#[derive(Debug, Clone)]
pub enum SortError {
    /// The configured small-sort threshold is too small for median-of-nine sampling.
    InvalidThreshold { threshold: usize, min: usize },

    /// The scratch buffer could not be reserved.
    ScratchAlloc { len: usize, source: TryReserveError },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::InvalidThreshold { threshold, min } => {
                write!(
                    f,
                    "invalid small-sort threshold: need at least {}, got {}",
                    min, threshold
                )
            }
            SortError::ScratchAlloc { len, source } => {
                write!(
                    f,
                    "failed to allocate scratch buffer of {} elements: {}",
                    len, source
                )
            }
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SortError::ScratchAlloc { source, .. } => Some(source),
            SortError::InvalidThreshold { .. } => None,
        }
    }
}

/// Configurable Logsort.
///
/// Use this when the block length or the insertion sort cutoff need tuning, or when
/// allocation failure of the scratch buffer must be handled instead of aborting.
///
/// # Examples
///
/// ```
/// use logsort::LogSort;
///
/// let mut data = vec![5, 3, 8, 3, 9, 1, 3, 7];
/// let stats = LogSort::new().block_len(64).try_sort(&mut data).unwrap();
///
/// assert_eq!(data, vec![1, 3, 3, 3, 5, 7, 8, 9]);
/// assert_eq!(stats.partitions, 0); // short enough for insertion sort alone
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogSort {
    block_len: usize,
    small_sort_threshold: usize,
}

impl Default for LogSort {
    fn default() -> Self {
        Self {
            block_len: DEFAULT_BLOCK_LEN,
            small_sort_threshold: DEFAULT_SMALL_SORT_THRESHOLD,
        }
    }
}

impl LogSort {
    /// Creates a configuration with [`DEFAULT_BLOCK_LEN`] and [`DEFAULT_SMALL_SORT_THRESHOLD`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the requested block length.
    ///
    /// The value is a request: see [`LogSort::effective_block_len`] for the length that is
    /// actually allocated.
    pub fn block_len(mut self, block_len: usize) -> Self {
        self.block_len = block_len;
        self
    }

    /// Sets the length at or below which regions are sorted by insertion sort.
    pub fn small_sort_threshold(mut self, threshold: usize) -> Self {
        self.small_sort_threshold = threshold;
        self
    }

    /// Returns the configured small-sort threshold.
    pub fn threshold(&self) -> usize {
        self.small_sort_threshold
    }

    /// Block length used for an input of `len` elements.
    ///
    /// The requested length is raised to [`MIN_BLOCK_LEN`] and to `ceil_log2(len) + 1`, so a
    /// block tag never reaches the element used to classify the block, then capped at `len`.
    pub fn effective_block_len(&self, len: usize) -> usize {
        self.block_len
            .max(MIN_BLOCK_LEN)
            .max(ceil_log2(len) + 1)
            .min(len)
    }

    pub(crate) fn validate(&self) -> Result<(), SortError> {
        if self.small_sort_threshold < MIN_SMALL_SORT_THRESHOLD {
            return Err(SortError::InvalidThreshold {
                threshold: self.small_sort_threshold,
                min: MIN_SMALL_SORT_THRESHOLD,
            });
        }
        Ok(())
    }

    /// Sorts `v` in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`SortError`] if the configuration is invalid or the scratch buffer cannot be
    /// allocated. In both cases `v` is left untouched.
    pub fn try_sort<T: Ord + Copy>(&self, v: &mut [T]) -> Result<SortStats, SortError> {
        self.try_sort_by(v, T::cmp)
    }

    /// Sorts `v` with a comparator function.
    ///
    /// The comparator must define a total order. If it does not, the resulting order is
    /// unspecified, but the call still terminates and never indexes out of bounds.
    ///
    /// # Errors
    ///
    /// Same as [`LogSort::try_sort`].
    pub fn try_sort_by<T, F>(&self, v: &mut [T], mut compare: F) -> Result<SortStats, SortError>
    where
        T: Copy,
        F: FnMut(&T, &T) -> Ordering,
    {
        self.validate()?;
        crate::algo::try_sort_with(v, &mut |a: &T, b: &T| compare(a, b) == Ordering::Less, self)
    }
}
