//! Block partitioning with a single block of scratch memory.
//!
//! [`partition`] splits a region into the elements that satisfy `pred(elem, pivot)` followed by
//! the ones that do not. Regions that fit into the scratch buffer take a direct linear path.
//! Longer regions go through four steps:
//!
//! 1. **Grouping**: One scan packs the region into full blocks of a single kind. Satisfying
//!    elements are compacted in place, the others collect in scratch and are spliced back as a
//!    whole block each time scratch fills up.
//! 2. **Tagging**: Each block of the minority kind is paired with a block of the majority kind,
//!    and the pair's index is written into their first `w` elements by swapping elements across
//!    the pair ([`block_xor`]). Reading the predicate over those `w` elements
//!    ([`block_read`]) recovers the index.
//! 3. **Relocation**: Majority blocks are moved to their side, keeping their relative order.
//!    This scrambles the minority blocks.
//! 4. **Block cycle**: Minority blocks are cycled back into tag order. Each one is then paired
//!    with its majority partner again and the tag is undone by the same swaps.
//!
//! The leftovers of the grouping scan are finally put back between the two block runs.

/// Reads a `w`-bit tag from the start of `block`.
///
/// Bit `i` of the result is `pred(&block[i], pivot)`.
///
/// # Examples
///
/// ```
/// use logsort::partition::block_read;
///
/// let block = [1, 9, 9, 1, 5];
/// let tag = block_read(&block, &5, 4, &mut |x: &i32, p: &i32| x <= p);
/// assert_eq!(tag, 0b1001);
/// ```
#[inline]
pub fn block_read<T, P>(block: &[T], pivot: &T, w: usize, pred: &mut P) -> usize
where
    P: FnMut(&T, &T) -> bool,
{
    block[..w]
        .iter()
        .enumerate()
        .fold(0, |acc, (i, x)| acc | ((pred(x, pivot) as usize) << i))
}

/// Swaps `a[i]` with `b[i]` for every bit `i` set in `v`.
///
/// Applying the same `v` twice restores both slices. When `a` holds only satisfying elements
/// and `b` only non-satisfying ones, this writes `v` into `b` and its complement into `a`, as
/// seen by [`block_read`].
#[inline]
pub fn block_xor<T>(a: &mut [T], b: &mut [T], mut v: usize) {
    let mut i = 0;
    while v != 0 {
        if v & 1 != 0 {
            std::mem::swap(&mut a[i], &mut b[i]);
        }
        v >>= 1;
        i += 1;
    }
}

/// Partitions `v` around `pivot`.
///
/// On return every element of `v[..mid]` satisfies `pred(elem, pivot)` and no element of
/// `v[mid..]` does, where `mid` is the returned split point. The elements of `v` are permuted,
/// never duplicated or lost, provided `pred` does not panic.
///
/// `scratch.len()` is the block length. At most that many elements are held in `scratch` at
/// any time. Block tags take `ceil_log2(min(lb, rb))` elements, where `lb` and `rb` count the
/// full blocks of each kind. When that is not less than the block length, misplaced blocks are
/// swapped pairwise instead. [`crate::LogSort::effective_block_len`] always leaves room for the
/// tag.
///
/// # Panics
///
/// Panics if `scratch` is empty while `v` is not.
///
/// # Examples
///
/// ```
/// use logsort::partition::partition;
///
/// let mut v = [5, 3, 8, 3, 9, 1, 3, 7];
/// let mut scratch = [0; 4];
/// let mid = partition(&mut v, &mut scratch, &3, &mut |x: &i32, p: &i32| x <= p);
///
/// assert_eq!(mid, 4);
/// assert!(v[..mid].iter().all(|&x| x <= 3));
/// assert!(v[mid..].iter().all(|&x| x > 3));
/// ```
pub fn partition<T, P>(v: &mut [T], scratch: &mut [T], pivot: &T, pred: &mut P) -> usize
where
    T: Copy,
    P: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len == 0 {
        return 0;
    }

    let b_len = scratch.len();
    assert!(b_len > 0, "partition needs a non-empty scratch buffer");

    if len <= b_len {
        return partition_easy(v, scratch, pivot, pred);
    }

    // 1. Group into blocks.
    //
    // `p` is the start of the block currently being filled with satisfying elements. Nothing
    // is written past the read position: everything placed so far is at most what was read.
    let mut p = 0;
    let (mut l, mut r, mut lb, mut rb) = (0, 0, 0, 0);

    for i in 0..len {
        let x = v[i];
        if pred(&x, pivot) {
            v[p + l] = x;
            l += 1;
        } else {
            scratch[r] = x;
            r += 1;
        }

        if l == b_len {
            p += b_len;
            l = 0;
            lb += 1;
        }
        if r == b_len {
            // Shift the partial left block up and drop the full right block in front of it.
            v.copy_within(p..p + l, p + b_len);
            v[p..p + b_len].copy_from_slice(scratch);

            p += b_len;
            r = 0;
            rb += 1;
        }
    }
    v[p + l..p + l + r].copy_from_slice(&scratch[..r]);

    let m = lb * b_len;
    let min = lb.min(rb);
    if min > 0 {
        if crate::core::ceil_log2(min) < b_len {
            relocate(v, scratch, pivot, pred, lb, rb);
        } else {
            // The tag would cover the classifying element.
            swap_misplaced_blocks(v, scratch, pivot, pred, lb);
        }
    }

    // Clean up leftovers: left fragment goes between the two block runs.
    scratch[..l].copy_from_slice(&v[p..p + l]);
    v.copy_within(m..m + rb * b_len, m + l);
    v[m..m + l].copy_from_slice(&scratch[..l]);

    m + l
}

/// Steps 2 to 4 of [`partition`] on the grouped blocks.
///
/// Needs `ceil_log2(min(lb, rb)) < scratch.len()`.
fn relocate<T, P>(v: &mut [T], scratch: &mut [T], pivot: &T, pred: &mut P, lb: usize, rb: usize)
where
    T: Copy,
    P: FnMut(&T, &T) -> bool,
{
    let b_len = scratch.len();
    let blocks = lb + rb;
    let left = lb < rb;
    let min = if left { lb } else { rb };
    let max = blocks - min;
    let w = crate::core::ceil_log2(min);

    // Blocks are classified by their first element past the tag.
    let is_left = |v: &[T], k: usize, pred: &mut P| pred(&v[k * b_len + w], pivot);

    // 2. Tag the first `min` blocks of each kind with their pair index.
    let (mut ka, mut kb) = (0, 0);
    for tag in 0..min {
        while !is_left(v, ka, &mut *pred) {
            ka += 1;
        }
        while is_left(v, kb, &mut *pred) {
            kb += 1;
        }
        let (a, b) = block_pair(v, ka, kb, b_len);
        block_xor(a, b, tag);
        ka += 1;
        kb += 1;
    }

    // 3. Move the majority blocks to their side, in order.
    let mut moved = 0;
    if left {
        let mut dst = blocks;
        for k in (0..blocks).rev() {
            if moved == max {
                break;
            }
            if !is_left(v, k, &mut *pred) {
                dst -= 1;
                swap_blocks(v, k, dst, scratch);
                moved += 1;
            }
        }
    } else {
        let mut dst = 0;
        for k in 0..blocks {
            if moved == max {
                break;
            }
            if is_left(v, k, &mut *pred) {
                swap_blocks(v, k, dst, scratch);
                dst += 1;
                moved += 1;
            }
        }
    }

    // 4. Cycle the minority blocks home and clear the tags.
    //
    // Satisfying minority blocks read back the complement of their tag.
    let mask = if left { (1usize << w) - 1 } else { 0 };
    let minority = if left { 0 } else { lb };
    let majority = if left { lb } else { 0 };

    for tag in 0..min {
        let k = minority + tag;
        let mut dst = mask ^ block_read(&v[k * b_len..], pivot, w, pred);
        while dst != tag && dst < min {
            swap_blocks(v, k, minority + dst, scratch);
            dst = mask ^ block_read(&v[k * b_len..], pivot, w, pred);
        }
        let (a, b) = block_pair(v, k, majority + tag, b_len);
        block_xor(a, b, tag);
    }
}

/// Moves the `lb` satisfying blocks to the front by exchanging misplaced pairs.
///
/// Used when blocks are too short to carry a tag. Block order is not kept.
fn swap_misplaced_blocks<T, P>(v: &mut [T], scratch: &mut [T], pivot: &T, pred: &mut P, lb: usize)
where
    T: Copy,
    P: FnMut(&T, &T) -> bool,
{
    let b_len = scratch.len();
    let mut kb = lb;
    for ka in 0..lb {
        if pred(&v[ka * b_len], pivot) {
            continue;
        }
        while !pred(&v[kb * b_len], pivot) {
            kb += 1;
        }
        swap_blocks(v, ka, kb, scratch);
        kb += 1;
    }
}

/// Linear partition for regions no longer than the scratch buffer.
fn partition_easy<T, P>(v: &mut [T], scratch: &mut [T], pivot: &T, pred: &mut P) -> usize
where
    T: Copy,
    P: FnMut(&T, &T) -> bool,
{
    let (mut l, mut r) = (0, 0);
    for i in 0..v.len() {
        let x = v[i];
        if pred(&x, pivot) {
            v[l] = x;
            l += 1;
        } else {
            scratch[r] = x;
            r += 1;
        }
    }
    v[l..].copy_from_slice(&scratch[..r]);

    l
}

/// Mutable views of two distinct blocks.
fn block_pair<T>(v: &mut [T], ka: usize, kb: usize, b_len: usize) -> (&mut [T], &mut [T]) {
    debug_assert_ne!(ka, kb);
    if ka < kb {
        let (lo, hi) = v.split_at_mut(kb * b_len);
        (&mut lo[ka * b_len..(ka + 1) * b_len], &mut hi[..b_len])
    } else {
        let (lo, hi) = v.split_at_mut(ka * b_len);
        (&mut hi[..b_len], &mut lo[kb * b_len..(kb + 1) * b_len])
    }
}

/// Exchanges blocks `ka` and `kb` through scratch.
fn swap_blocks<T: Copy>(v: &mut [T], ka: usize, kb: usize, scratch: &mut [T]) {
    if ka == kb {
        return;
    }
    let b_len = scratch.len();
    let (a, b) = block_pair(v, ka, kb, b_len);
    scratch.copy_from_slice(a);
    a.copy_from_slice(b);
    b.copy_from_slice(scratch);
}
