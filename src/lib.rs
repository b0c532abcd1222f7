//! # Logsort
//!
//! `logsort` is an in-place, unstable quicksort that needs only one small scratch buffer (a
//! single *block* of elements) per call, instead of scratch memory proportional to the input.
//!
//! ## Key Features
//!
//! - **Constant Scratch**: One buffer of [`DEFAULT_BLOCK_LEN`](crate::core::DEFAULT_BLOCK_LEN)
//!   elements (or fewer, for short inputs) is allocated once and reused by every partition
//!   step.
//! - **Block Partitioning**: Partitioning works on whole blocks. Misplaced blocks are tagged by
//!   swapping a few elements between paired blocks, which encodes each block's destination in
//!   the block itself. A cycle over the blocks then puts them in place with no index array.
//!   See [`partition`](partition::partition).
//! - **Duplicate Tolerant**: Inputs dominated by a few distinct values are handled by a second
//!   "< pivot" partition that removes the pivot-equal run, so every step makes progress.
//! - **Bounded Recursion**: The driver recurses only into the shorter half of each split, so
//!   the stack depth stays logarithmic in the input length.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! use logsort::logsort;
//!
//! let mut data = vec![42, 7, 19, 7, 3, 88];
//! logsort(&mut data);
//!
//! assert_eq!(data, vec![3, 7, 7, 19, 42, 88]);
//! ```
//!
//! ### Custom Order
//!
//! ```rust
//! use logsort::logsort_by;
//!
//! let mut pairs = vec![(2, 'b'), (1, 'z'), (3, 'a')];
//! logsort_by(&mut pairs, |a, b| a.1.cmp(&b.1));
//!
//! assert_eq!(pairs, vec![(3, 'a'), (2, 'b'), (1, 'z')]);
//! ```
//!
//! ### Configuration
//!
//! [`LogSort`] exposes the block length and the insertion sort cutoff, reports allocation
//! failure as an error and returns [`SortStats`] for the finished sort.
//!
//! ```rust
//! use logsort::LogSort;
//!
//! let mut data: Vec<u32> = (0..10_000).rev().collect();
//! let stats = LogSort::new().block_len(128).try_sort(&mut data).unwrap();
//!
//! assert!(data.windows(2).all(|w| w[0] <= w[1]));
//! assert_eq!(stats.block_len, 128);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Time**: *O*(*n* log *n*) expected. The pivot is the median of a sample that grows with
//!   the input, which keeps partitions balanced with high probability.
//! - **Memory Overhead**: One block of elements plus *O*(log *n*) stack.
//! - **Stability**: Not stable. Equal elements may be reordered.
//!
//! Elements must be `Copy`: the partition step moves elements through the scratch buffer by
//! value.

pub mod algo;
pub mod core;
pub mod partition;
pub mod pivot;
pub mod smallsort;

pub use crate::algo::{logsort, logsort_by};
pub use crate::core::{LogSort, SortError, SortStats};

pub mod prelude {
    pub use crate::algo::{logsort, logsort_by};
    pub use crate::core::{LogSort, SortError, SortStats};
}
