//! Two-way and multi-way partitioning around splitter values.
//!
//! A set of `k` ascending, duplicate-free splitters `s0 < s1 < … < s(k-1)` defines
//! `k + 1` buckets `(-inf, s0), [s0, s1), …, [s(k-1), +inf)`. Partitioning reorders a
//! range so that every bucket is contiguous and reports where each one ends.
//!
//! Results are *boundaries*: a partition of `[from, to)` around one splitter returns
//! `b` such that `[from, b)` holds the elements less than the splitter and `[b, to)`
//! the rest. The multi-way variants write one boundary per splitter: boundary `j`
//! is the end of the region holding everything below `splitters[j]`.
//!
//! Every entry point comes in four flavours:
//! - single slice ([`partition`], [`partition_splitters`]);
//! - primary slice plus one companion slice that follows every swap
//!   ([`dual_partition`], [`dual_partition_splitters`]);
//! - primary slice plus two companions ([`triple_partition`],
//!   [`triple_partition_splitters`]);
//! - fully generic over a [`SplitterAccessor`] ([`partition_generic`],
//!   [`partition_splitters_generic`]).
//!
//! Splitter order and ranges are trusted, see [`Splitters`](crate::Splitters) for the
//! checked interface. With splitters out of order the buckets are silently wrong.

use crate::algo::choose_pivot;
use crate::core::SplitterAccessor;
use std::cmp::Ordering;
use std::ops::Range;

/// Slices that mirror every swap of the primary slice.
///
/// Implemented for `()` (no companions), `&mut [U]` and `(&mut [U], &mut [V])`.
pub trait Companions {
    fn swap(&mut self, a: usize, b: usize);
}

impl Companions for () {
    #[inline(always)]
    fn swap(&mut self, _: usize, _: usize) {}
}

impl<U> Companions for &mut [U] {
    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        <[U]>::swap(self, a, b)
    }
}

impl<U, V> Companions for (&mut [U], &mut [V]) {
    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        <[U]>::swap(self.0, a, b);
        <[V]>::swap(self.1, a, b);
    }
}

/// Partitions `list[from..to]` around `splitter`.
///
/// Elements less than `splitter` are moved to the front of the range by a single
/// forward scan. Returns the boundary `b`: `list[from..b]` is less than `splitter`,
/// `list[b..to]` is not. Returns `from` when nothing is smaller.
///
/// Incomparable values (NaN) are never less than the splitter.
///
/// # Examples
///
/// ```
/// use idxsort::partition;
///
/// let mut list = vec![7, 4, 5, 50, 6, 4, 3, 6];
/// let boundary = partition(&mut list, 0, 8, &5);
///
/// assert_eq!(boundary, 3);
/// assert_eq!(list, vec![4, 4, 3, 50, 6, 7, 5, 6]);
/// ```
pub fn partition<T: PartialOrd>(list: &mut [T], from: usize, to: usize, splitter: &T) -> usize {
    partition_with(list, &mut (), from, to, splitter)
}

/// Like [`partition`], applying every swap to `secondary` as well.
///
/// ```
/// use idxsort::dual_partition;
///
/// let mut keys = vec![9, 1, 8, 2];
/// let mut ids = vec!['a', 'b', 'c', 'd'];
/// let boundary = dual_partition(&mut keys, &mut ids, 0, 4, &5);
///
/// assert_eq!(boundary, 2);
/// assert_eq!(keys, vec![1, 2, 8, 9]);
/// assert_eq!(ids, vec!['b', 'd', 'c', 'a']);
/// ```
pub fn dual_partition<T: PartialOrd, U>(
    list: &mut [T],
    secondary: &mut [U],
    from: usize,
    to: usize,
    splitter: &T,
) -> usize {
    partition_with(list, &mut &mut *secondary, from, to, splitter)
}

/// Like [`partition`], applying every swap to `secondary` and `tertiary` as well.
pub fn triple_partition<T: PartialOrd, U, V>(
    list: &mut [T],
    secondary: &mut [U],
    tertiary: &mut [V],
    from: usize,
    to: usize,
    splitter: &T,
) -> usize {
    partition_with(list, &mut (secondary, tertiary), from, to, splitter)
}

/// Partitions `list[from..to]` around `splitter`, mirroring swaps on `companions`.
pub fn partition_with<T: PartialOrd, C: Companions + ?Sized>(
    list: &mut [T],
    companions: &mut C,
    from: usize,
    to: usize,
    splitter: &T,
) -> usize {
    debug_assert!(from <= to, "invalid range {from}..{to}");

    let mut low = from;
    for i in from..to {
        if list[i] < *splitter {
            list.swap(i, low);
            companions.swap(i, low);
            low += 1;
        }
    }
    low
}

/// Partitions `[from, to)` of `seq` around splitter number `splitter`.
///
/// An element goes to the low side when the splitter compares greater than it.
/// Returns the boundary as [`partition`] does.
pub fn partition_generic<S: SplitterAccessor + ?Sized>(
    from: usize,
    to: usize,
    splitter: usize,
    seq: &mut S,
) -> usize {
    debug_assert!(from <= to, "invalid range {from}..{to}");

    let mut low = from;
    for i in from..to {
        if seq.compare_splitter(splitter, i) == Ordering::Greater {
            seq.swap(i, low);
            low += 1;
        }
    }
    low
}

/// Partitions `list[from..to]` into the buckets delimited by
/// `splitters[split_from..split_to]`.
///
/// `split_indexes[j]` receives, for every `j` in `split_from..split_to`, the end of
/// the region holding all elements less than `splitters[j]`. Bucket `j + 1` therefore
/// spans `split_indexes[j]..split_indexes[j + 1]`; use [`bucket_ranges`] to walk
/// them. Empty buckets show up as equal neighbouring boundaries.
///
/// The splitters actually used must be strictly ascending, and `split_indexes` must be
/// at least `split_to` long. Takes `O(n log k)` comparisons for `k` splitters on
/// typical data: each round partitions around the splitter closest to a sampled
/// median of the range, and buckets found empty are settled without another pass.
///
/// # Examples
///
/// ```
/// use idxsort::partition_splitters;
///
/// let mut list = vec![7, 4, 5, 50, 6, 4, 3, 6];
/// let splitters = [5, 10, 30];
/// let mut split_indexes = [0; 3];
/// partition_splitters(&mut list, 0, 8, &splitters, 0, 3, &mut split_indexes);
///
/// assert_eq!(split_indexes, [3, 7, 7]);
/// assert_eq!(list, vec![4, 4, 3, 6, 7, 5, 6, 50]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn partition_splitters<T: PartialOrd>(
    list: &mut [T],
    from: usize,
    to: usize,
    splitters: &[T],
    split_from: usize,
    split_to: usize,
    split_indexes: &mut [usize],
) {
    partition_splitters_with(
        list,
        &mut (),
        from,
        to,
        splitters,
        split_from,
        split_to,
        split_indexes,
    )
}

/// Like [`partition_splitters`], applying every swap to `secondary` as well.
#[allow(clippy::too_many_arguments)]
pub fn dual_partition_splitters<T: PartialOrd, U>(
    list: &mut [T],
    secondary: &mut [U],
    from: usize,
    to: usize,
    splitters: &[T],
    split_from: usize,
    split_to: usize,
    split_indexes: &mut [usize],
) {
    partition_splitters_with(
        list,
        &mut &mut *secondary,
        from,
        to,
        splitters,
        split_from,
        split_to,
        split_indexes,
    )
}

/// Like [`partition_splitters`], applying every swap to `secondary` and `tertiary`
/// as well.
#[allow(clippy::too_many_arguments)]
pub fn triple_partition_splitters<T: PartialOrd, U, V>(
    list: &mut [T],
    secondary: &mut [U],
    tertiary: &mut [V],
    from: usize,
    to: usize,
    splitters: &[T],
    split_from: usize,
    split_to: usize,
    split_indexes: &mut [usize],
) {
    partition_splitters_with(
        list,
        &mut (secondary, tertiary),
        from,
        to,
        splitters,
        split_from,
        split_to,
        split_indexes,
    )
}

/// Multi-way partition of `list[from..to]`, mirroring swaps on `companions`.
#[allow(clippy::too_many_arguments)]
pub fn partition_splitters_with<T: PartialOrd, C: Companions + ?Sized>(
    list: &mut [T],
    companions: &mut C,
    from: usize,
    to: usize,
    splitters: &[T],
    split_from: usize,
    split_to: usize,
    split_indexes: &mut [usize],
) {
    debug_assert!(
        split_from >= split_to || splitters[split_from..split_to].windows(2).all(|w| w[0] < w[1]),
        "splitters must be strictly ascending"
    );

    let mut buckets = SliceBuckets {
        list,
        companions,
        splitters,
    };
    split_recursively(&mut buckets, from, to, split_from, split_to, split_indexes);
}

/// Multi-way partition of `[from, to)` of `seq` around its splitters
/// `split_from..split_to`; see [`partition_splitters`].
pub fn partition_splitters_generic<S: SplitterAccessor + ?Sized>(
    from: usize,
    to: usize,
    split_from: usize,
    split_to: usize,
    split_indexes: &mut [usize],
    seq: &mut S,
) {
    let mut buckets = AccessorBuckets { seq };
    split_recursively(&mut buckets, from, to, split_from, split_to, split_indexes);
}

/// Turns the boundaries of a multi-way partition of `[from, to)` into the
/// `boundaries.len() + 1` bucket ranges, in bucket order.
///
/// ```
/// use idxsort::bucket_ranges;
///
/// let ranges: Vec<_> = bucket_ranges(0, 8, &[3, 7, 7]).collect();
/// assert_eq!(ranges, vec![0..3, 3..7, 7..7, 7..8]);
/// ```
pub fn bucket_ranges(
    from: usize,
    to: usize,
    boundaries: &[usize],
) -> impl Iterator<Item = Range<usize>> + '_ {
    let starts = std::iter::once(from).chain(boundaries.iter().copied());
    let ends = boundaries.iter().copied().chain(std::iter::once(to));
    starts.zip(ends).map(|(start, end)| start..end)
}

/// What the multi-way driver needs from the data being bucketed.
trait Bucketing {
    /// Position of a representative element of the non-empty range `[from, to)`.
    fn pivot(&self, from: usize, to: usize) -> usize;

    /// Index in `split_from..split_to` of the splitter closest to the element at `pivot`.
    fn locate(&self, pivot: usize, split_from: usize, split_to: usize) -> usize;

    /// Two-way partition of `[from, to)` around splitter number `splitter`.
    fn split(&mut self, from: usize, to: usize, splitter: usize) -> usize;
}

struct SliceBuckets<'a, T, C: ?Sized> {
    list: &'a mut [T],
    companions: &'a mut C,
    splitters: &'a [T],
}

impl<T: PartialOrd, C: Companions + ?Sized> Bucketing for SliceBuckets<'_, T, C> {
    fn pivot(&self, from: usize, to: usize) -> usize {
        let list = &*self.list;
        let len = to - from;
        choose_pivot(
            |a, b| list[a].partial_cmp(&list[b]).unwrap_or(Ordering::Equal),
            from,
            from + (len - 1) / 2,
            len,
        )
    }

    fn locate(&self, pivot: usize, split_from: usize, split_to: usize) -> usize {
        let value = &self.list[pivot];
        let splitters = self.splitters;
        locate_splitter(
            |s| splitters[s].partial_cmp(value).unwrap_or(Ordering::Equal),
            split_from,
            split_to,
        )
    }

    fn split(&mut self, from: usize, to: usize, splitter: usize) -> usize {
        partition_with(
            self.list,
            self.companions,
            from,
            to,
            &self.splitters[splitter],
        )
    }
}

struct AccessorBuckets<'a, S: ?Sized> {
    seq: &'a mut S,
}

impl<S: SplitterAccessor + ?Sized> Bucketing for AccessorBuckets<'_, S> {
    fn pivot(&self, from: usize, to: usize) -> usize {
        let seq = &*self.seq;
        let len = to - from;
        choose_pivot(|a, b| seq.compare(a, b), from, from + (len - 1) / 2, len)
    }

    fn locate(&self, pivot: usize, split_from: usize, split_to: usize) -> usize {
        let seq = &*self.seq;
        locate_splitter(|s| seq.compare_splitter(s, pivot), split_from, split_to)
    }

    fn split(&mut self, from: usize, to: usize, splitter: usize) -> usize {
        partition_generic(from, to, splitter, self.seq)
    }
}

/// Binary search over the splitters `split_from..split_to` for a value, given how
/// each splitter compares against it. Returns the matching splitter or the insertion
/// point, clamped to the last splitter.
fn locate_splitter<F>(compare: F, split_from: usize, split_to: usize) -> usize
where
    F: Fn(usize) -> Ordering,
{
    let (mut lo, mut hi) = (split_from, split_to);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match compare(mid) {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
            Ordering::Equal => return mid,
        }
    }
    lo.min(split_to - 1)
}

/// A range of elements still to be bucketed by a range of splitters.
#[derive(Clone, Copy, Debug)]
struct Task {
    from: usize,
    to: usize,
    split_from: usize,
    split_to: usize,
}

impl Task {
    fn has_splitters(&self) -> bool {
        self.split_from < self.split_to
    }
}

/// Divide and conquer over the splitters, run from an explicit work list.
///
/// Pending tasks own disjoint, non-empty splitter ranges, so the list never holds
/// more entries than there are splitters.
fn split_recursively<B: Bucketing + ?Sized>(
    buckets: &mut B,
    from: usize,
    to: usize,
    split_from: usize,
    split_to: usize,
    split_indexes: &mut [usize],
) {
    debug_assert!(from <= to, "invalid range {from}..{to}");
    debug_assert!(
        split_from >= split_to || split_indexes.len() >= split_to,
        "split_indexes too short"
    );

    let mut pending: Vec<Task> = Vec::new();
    let mut current = Some(Task {
        from,
        to,
        split_from,
        split_to,
    });

    while let Some(task) = current.take().or_else(|| pending.pop()) {
        if !task.has_splitters() {
            continue;
        }
        if task.from == task.to {
            split_indexes[task.split_from..task.split_to].fill(task.from);
            continue;
        }

        let median = if task.split_to - task.split_from == 1 {
            task.split_from
        } else {
            let pivot = buckets.pivot(task.from, task.to);
            buckets.locate(pivot, task.split_from, task.split_to)
        };

        let boundary = buckets.split(task.from, task.to, median);
        split_indexes[median] = boundary;

        let mut lower = Task {
            from: task.from,
            to: boundary,
            split_from: task.split_from,
            split_to: median,
        };
        let mut upper = Task {
            from: boundary,
            to: task.to,
            split_from: median + 1,
            split_to: task.split_to,
        };

        // Nothing below the chosen splitter means nothing below any smaller one
        // either, and symmetrically above.
        if boundary == task.from {
            split_indexes[lower.split_from..lower.split_to].fill(boundary);
            lower.split_to = lower.split_from;
        } else if boundary == task.to {
            split_indexes[upper.split_from..upper.split_to].fill(boundary);
            upper.split_from = upper.split_to;
        }

        if upper.has_splitters() {
            pending.push(upper);
        }
        if lower.has_splitters() {
            current = Some(lower);
        }
    }
}
