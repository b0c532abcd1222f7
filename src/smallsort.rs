//! Insertion sorts that finish short regions.
//!
//! Both variants work in place with O(1) extra memory:
//! - [`insertion_sort`]: Guarded. Moves the minimum to the front first so it can act as the
//!   guard for every later insertion.
//! - [`insertion_sort_unguarded`]: Relies on an element that is already known to be no greater
//!   than the rest, and skips the minimum pass.

/// Sorts `v` with insertion sort after placing its minimum at index 0.
///
/// # Examples
///
/// ```
/// use logsort::smallsort::insertion_sort;
///
/// let mut v = [4, 1, 3, 1, 2];
/// insertion_sort(&mut v, &mut |a: &i32, b: &i32| a < b);
/// assert_eq!(v, [1, 1, 2, 3, 4]);
/// ```
pub fn insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    // Single backward pass, the minimum ends up at v[0].
    for i in (1..len).rev() {
        if is_less(&v[i], &v[i - 1]) {
            v.swap(i, i - 1);
        }
    }

    insertion_sort_unguarded(v, is_less);
}

/// Sorts `v[1..]`, using `v[0]` as the guard.
///
/// The caller must ensure that `v[0]` is not greater than any element of `v[1..]`. Inside the
/// sort this holds when `v[0]` is the last element of a "<= pivot" prefix and `v[1..]` is the
/// "> pivot" suffix that follows it.
///
/// If the guard property is violated the tail is left in an unspecified order. The elements are
/// still a permutation of the input and no access leaves the slice.
pub fn insertion_sort_unguarded<T, F>(v: &mut [T], is_less: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    for i in 2..v.len() {
        let tmp = v[i];
        let mut j = i;

        while is_less(&tmp, &v[j - 1]) {
            v[j] = v[j - 1];
            j -= 1;
            if j == 0 {
                break;
            }
        }
        v[j] = tmp;
    }
}
