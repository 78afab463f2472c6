//! Core sorting algorithms (generic quicksort and merge sorts).
//!
//! Everything here works on logical positions only, through a [`SortAccessor`]:
//! - **Quicksort**: Bentley–McIlroy three-way partitioning with a pseudomedian-of-9
//!   pivot, driven by an explicit, cache-aligned work stack instead of recursion.
//! - **Merge sort**: Stable, and needs no auxiliary storage at all; halves are merged
//!   by binary-searched cuts and block rotation.
//! - **Buffered merge sort**: Stable, merges in linear comparisons using
//!   caller-supplied index buffers.
//! - **Insertion Sort**: Fallback for small ranges.
//!
//! The main entry points are [`quicksort`], [`mergesort`] and [`mergesort_buffered`].

use crate::core::SortAccessor;
use crate::permute::PermutationBuffers;
use cuneiform::cuneiform;
use std::cmp::Ordering;

/// Ranges shorter than this are insertion sorted.
pub const SMALL: usize = 7;

/// Ranges longer than this pick their pivot as a pseudomedian of 9.
pub const MEDIUM: usize = 40;

/// Maximum number of deferred ranges. The smaller side is always processed first,
/// so every deferred range is at most half the size of the one deferred before it.
const STACK_CAPACITY: usize = usize::BITS as usize;

/// Sorts positions `[off, off + len)` of `seq` into non-decreasing order.
///
/// Only [`SortAccessor::compare`] and [`SortAccessor::swap`] are used, so the
/// elements themselves never move through this function. The sort is not stable.
///
/// Ranges are not validated; positions outside the caller's storage are whatever
/// the accessor makes of them.
///
/// # Arguments
///
/// * `off` - First position of the range.
/// * `len` - Number of positions to sort.
/// * `seq` - The collection to be sorted.
///
/// # Examples
///
/// ```
/// use idxsort::quicksort;
///
/// let mut data = vec![5, 1, 4, 1, 3];
/// quicksort(0, data.len(), &mut data);
///
/// assert_eq!(data, vec![1, 1, 3, 4, 5]);
/// ```
pub fn quicksort<S: SortAccessor + ?Sized>(off: usize, len: usize, seq: &mut S) {
    let mut stack = WorkStack::new();
    let mut current = Some((off, len));

    while let Some((off, len)) = current.take().or_else(|| stack.pop()) {
        if len < SMALL {
            insertion_sort(seq, off, off + len);
            continue;
        }

        let (lower, upper) = partition_three_way(seq, off, len);
        let (smaller, larger) = if lower.1 <= upper.1 {
            (lower, upper)
        } else {
            (upper, lower)
        };

        if larger.1 > 1 {
            stack.push(larger);
        }
        if smaller.1 > 1 {
            current = Some(smaller);
        }
    }
}

/// Sorts positions `[from, to)` of `seq` stably, without any auxiliary storage.
///
/// Merging is done by rotation, which costs `O(n log n)` swaps per level instead of
/// `O(n)`, for `O(n log² n)` overall. Already ordered neighbouring halves are
/// detected with a single comparison and left alone, so nearly sorted input
/// approaches linear time.
///
/// Use [`mergesort_buffered`] when index buffers can be afforded.
///
/// # Examples
///
/// ```
/// use idxsort::mergesort;
///
/// let mut data = vec!["pear", "fig", "apple", "kiwi"];
/// mergesort(0, data.len(), &mut data);
///
/// assert_eq!(data, vec!["apple", "fig", "kiwi", "pear"]);
/// ```
pub fn mergesort<S: SortAccessor + ?Sized>(from: usize, to: usize, seq: &mut S) {
    debug_assert!(from <= to, "invalid range {from}..{to}");

    let len = to - from;
    if len < SMALL {
        insertion_sort(seq, from, to);
        return;
    }

    let mid = from + len / 2;
    mergesort(from, mid, seq);
    mergesort(mid, to, seq);

    if seq.compare(mid - 1, mid) != Ordering::Greater {
        return;
    }
    merge_in_place(seq, from, mid, to);
}

/// Sorts positions `[from, to)` of `seq` stably, merging through index buffers.
///
/// Each merge computes the merged order of positions with a linear number of
/// comparisons, then applies it with at most `n` swaps through the accessor.
/// `buffers` can be reused across calls to avoid reallocating.
///
/// # Examples
///
/// ```
/// use idxsort::{mergesort_buffered, PermutationBuffers};
///
/// let mut buffers = PermutationBuffers::new();
/// let mut data = vec![9, 7, 8, 1, 3, 2, 6, 5, 4, 0];
/// mergesort_buffered(0, data.len(), &mut data, &mut buffers);
///
/// assert_eq!(data, (0..10).collect::<Vec<_>>());
/// ```
pub fn mergesort_buffered<S: SortAccessor + ?Sized>(
    from: usize,
    to: usize,
    seq: &mut S,
    buffers: &mut PermutationBuffers,
) {
    debug_assert!(from <= to, "invalid range {from}..{to}");

    let len = to - from;
    if len < SMALL {
        insertion_sort(seq, from, to);
        return;
    }

    let mid = from + len / 2;
    mergesort_buffered(from, mid, seq, buffers);
    mergesort_buffered(mid, to, seq, buffers);

    if seq.compare(mid - 1, mid) != Ordering::Greater {
        return;
    }
    merge_buffered(seq, from, mid, to, buffers);
}

/// Stable insertion sort of `[from, to)` by adjacent swaps.
pub(crate) fn insertion_sort<S: SortAccessor + ?Sized>(seq: &mut S, from: usize, to: usize) {
    for i in (from + 1)..to {
        let mut j = i;
        while j > from && seq.compare(j - 1, j) == Ordering::Greater {
            seq.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Picks a pivot position for a range of `len` elements starting at `lo`.
///
/// `mid` is the middle element used for short ranges. Ranges longer than
/// [`SMALL`] use the median of three; ranges longer than [`MEDIUM`] use the
/// median of three medians taken `len / 8` apart.
pub(crate) fn choose_pivot<F>(compare: F, lo: usize, mid: usize, len: usize) -> usize
where
    F: Fn(usize, usize) -> Ordering,
{
    if len <= SMALL {
        return mid;
    }

    let mut l = lo;
    let mut m = mid;
    let mut n = lo + len - 1;
    if len > MEDIUM {
        let s = len / 8;
        l = med3(&compare, l, l + s, l + 2 * s);
        m = med3(&compare, m - s, m, m + s);
        n = med3(&compare, n - 2 * s, n - s, n);
    }
    med3(&compare, l, m, n)
}

/// Returns the position holding the median of the elements at `a`, `b` and `c`.
#[inline]
fn med3<F>(compare: &F, a: usize, b: usize, c: usize) -> usize
where
    F: Fn(usize, usize) -> Ordering,
{
    if compare(a, b) == Ordering::Less {
        if compare(b, c) == Ordering::Less {
            b
        } else if compare(a, c) == Ordering::Less {
            c
        } else {
            a
        }
    } else if compare(b, c) == Ordering::Greater {
        b
    } else if compare(a, c) == Ordering::Greater {
        c
    } else {
        a
    }
}

/// Position of the partitioning element while the partition loop moves it around.
///
/// Every swap performed while the pivot is in use goes through [`TrackedPivot::swap`],
/// which keeps `pos` pointing at wherever the pivot value currently lives. Comparing
/// against a stale position would silently compare against some other element.
struct TrackedPivot {
    pos: usize,
}

impl TrackedPivot {
    #[inline(always)]
    fn swap<S: SortAccessor + ?Sized>(&mut self, seq: &mut S, a: usize, b: usize) {
        if self.pos == a {
            self.pos = b;
        } else if self.pos == b {
            self.pos = a;
        }
        seq.swap(a, b);
    }
}

/// Bentley–McIlroy partition of `[off, off + len)`.
///
/// Builds `v* (<v)* (>v)* v*`, moves both runs of pivot-equal elements to the
/// middle and returns the `(offset, length)` of the `< v` and `> v` parts.
fn partition_three_way<S: SortAccessor + ?Sized>(
    seq: &mut S,
    off: usize,
    len: usize,
) -> ((usize, usize), (usize, usize)) {
    let mid = choose_pivot(|a, b| seq.compare(a, b), off, off + len / 2, len);
    let mut pivot = TrackedPivot { pos: mid };

    let end = off + len;
    // [off, a) and [d, end) hold pivot-equal elements, [a, b) is < v, [c, d) is > v.
    let (mut a, mut b, mut c, mut d) = (off, off, end, end);
    loop {
        while b < c {
            let ord = seq.compare(b, pivot.pos);
            if ord == Ordering::Greater {
                break;
            }
            if ord == Ordering::Equal {
                pivot.swap(seq, a, b);
                a += 1;
            }
            b += 1;
        }
        while c > b {
            let ord = seq.compare(c - 1, pivot.pos);
            if ord == Ordering::Less {
                break;
            }
            if ord == Ordering::Equal {
                pivot.swap(seq, c - 1, d - 1);
                d -= 1;
            }
            c -= 1;
        }
        if b >= c {
            break;
        }
        pivot.swap(seq, b, c - 1);
        b += 1;
        c -= 1;
    }
    debug_assert!(
        pivot.pos < a || pivot.pos >= d,
        "pivot escaped the equal runs"
    );

    let s = (a - off).min(b - a);
    swap_blocks(seq, off, b - s, s);
    let s = (d - c).min(end - d);
    swap_blocks(seq, b, end - s, s);

    let upper_len = d - c;
    ((off, b - a), (end - upper_len, upper_len))
}

/// Swaps `[a, a + n)` with `[b, b + n)` element by element.
#[inline]
fn swap_blocks<S: SortAccessor + ?Sized>(seq: &mut S, a: usize, b: usize, n: usize) {
    for i in 0..n {
        seq.swap(a + i, b + i);
    }
}

/// Reverses `[from, to)`.
#[inline]
fn reverse<S: SortAccessor + ?Sized>(seq: &mut S, mut from: usize, mut to: usize) {
    while from + 1 < to {
        to -= 1;
        seq.swap(from, to);
        from += 1;
    }
}

/// Exchanges the blocks `[first, middle)` and `[middle, last)` by triple reversal.
fn rotate<S: SortAccessor + ?Sized>(seq: &mut S, first: usize, middle: usize, last: usize) {
    if first == middle || middle == last {
        return;
    }
    reverse(seq, first, middle);
    reverse(seq, middle, last);
    reverse(seq, first, last);
}

/// First position in `[first, last)` whose element is not less than the one at `x`.
fn lower_bound<S: SortAccessor + ?Sized>(seq: &S, mut first: usize, last: usize, x: usize) -> usize {
    let mut len = last - first;
    while len > 0 {
        let half = len / 2;
        let middle = first + half;
        if seq.compare(middle, x) == Ordering::Less {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    first
}

/// First position in `[first, last)` whose element is greater than the one at `x`.
fn upper_bound<S: SortAccessor + ?Sized>(seq: &S, mut first: usize, last: usize, x: usize) -> usize {
    let mut len = last - first;
    while len > 0 {
        let half = len / 2;
        let middle = first + half;
        if seq.compare(x, middle) == Ordering::Less {
            len = half;
        } else {
            first = middle + 1;
            len -= half + 1;
        }
    }
    first
}

/// Merges the sorted neighbours `[first, middle)` and `[middle, last)` in place.
///
/// The larger side is cut in half, the matching cut in the other side is found by
/// binary search, the two inner blocks are rotated into place and both halves are
/// merged the same way. Left elements stay ahead of equal right elements.
fn merge_in_place<S: SortAccessor + ?Sized>(seq: &mut S, first: usize, middle: usize, last: usize) {
    if first >= middle || middle >= last {
        return;
    }
    if last - first == 2 {
        if seq.compare(middle, first) == Ordering::Less {
            seq.swap(first, middle);
        }
        return;
    }

    let (first_cut, second_cut) = if middle - first > last - middle {
        let first_cut = first + (middle - first) / 2;
        (first_cut, lower_bound(seq, middle, last, first_cut))
    } else {
        let second_cut = middle + (last - middle) / 2;
        (upper_bound(seq, first, middle, second_cut), second_cut)
    };

    rotate(seq, first_cut, middle, second_cut);
    let new_middle = first_cut + (second_cut - middle);

    merge_in_place(seq, first, first_cut, new_middle);
    merge_in_place(seq, new_middle, second_cut, last);
}

/// Merges the sorted neighbours `[first, middle)` and `[middle, last)` through
/// `buffers`: the merged order is collected first, then applied by swaps.
fn merge_buffered<S: SortAccessor + ?Sized>(
    seq: &mut S,
    first: usize,
    middle: usize,
    last: usize,
    buffers: &mut PermutationBuffers,
) {
    let PermutationBuffers { order, tracker } = buffers;

    order.clear();
    let (mut i, mut j) = (first, middle);
    while i < middle && j < last {
        if seq.compare(j, i) == Ordering::Less {
            order.push(j - first);
            j += 1;
        } else {
            order.push(i - first);
            i += 1;
        }
    }
    order.extend((i..middle).map(|p| p - first));
    order.extend((j..last).map(|p| p - first));

    let mut window = |a: usize, b: usize| seq.swap(first + a, first + b);
    tracker.apply(order.as_slice(), &mut window);
}

/// Deferred `(offset, length)` ranges of the quicksort.
///
/// Aligned to the cache line; it is touched on every partitioning step.
#[cuneiform]
struct WorkStack {
    frames: [(usize, usize); STACK_CAPACITY],
    len: usize,
}

impl WorkStack {
    fn new() -> Self {
        Self {
            frames: [(0, 0); STACK_CAPACITY],
            len: 0,
        }
    }

    #[inline]
    fn push(&mut self, frame: (usize, usize)) {
        debug_assert!(self.len < STACK_CAPACITY, "quicksort work stack overflow");
        self.frames[self.len] = frame;
        self.len += 1;
    }

    #[inline]
    fn pop(&mut self) -> Option<(usize, usize)> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.frames[self.len])
    }
}
