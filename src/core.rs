//! Core capability traits for idxsort.
//!
//! This module defines:
//! - [`SortAccessor`]: The main trait users implement to sort their own storage.
//! - [`SplitterAccessor`]: Extends [`SortAccessor`] with splitter comparisons for the
//!   multi-way partitioners.
//! - [`IndexComparator`] / [`IndexSwapper`]: The two capabilities on their own, with
//!   blanket implementations for closures.
//! - [`Capabilities`]: Pairs an independent comparator and swapper into a [`SortAccessor`].

use std::cmp::Ordering;
use std::collections::VecDeque;

/// Three-way comparison of the elements at two logical positions.
///
/// Must describe a total order that does not change for the duration of one call.
pub trait IndexComparator {
    fn compare(&self, a: usize, b: usize) -> Ordering;
}

impl<F> IndexComparator for F
where
    F: Fn(usize, usize) -> Ordering,
{
    #[inline(always)]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self(a, b)
    }
}

/// Exchanges the elements at two logical positions of caller-owned storage.
///
/// Swapping the same pair twice must restore the previous state, and `swap(i, i)`
/// must leave the storage unchanged.
pub trait IndexSwapper {
    fn swap(&mut self, a: usize, b: usize);
}

impl<F> IndexSwapper for F
where
    F: FnMut(usize, usize),
{
    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        self(a, b)
    }
}

/// A trait for comparing and swapping elements of a collection by position.
///
/// This is all the engine ever sees of the data: the sort, partition and permutation
/// routines never read, copy or move elements themselves. Anything that can answer
/// "how do positions `a` and `b` compare" and "exchange positions `a` and `b`" can be
/// reordered, including parallel arrays, matrix rows or index views.
///
/// # Examples
///
/// Sorting two parallel arrays by the first one:
///
/// ```
/// use idxsort::{quicksort, SortAccessor};
/// use std::cmp::Ordering;
///
/// struct Columns {
///     keys: Vec<u32>,
///     names: Vec<&'static str>,
/// }
///
/// impl SortAccessor for Columns {
///     fn compare(&self, a: usize, b: usize) -> Ordering {
///         self.keys[a].cmp(&self.keys[b])
///     }
///
///     fn swap(&mut self, a: usize, b: usize) {
///         self.keys.swap(a, b);
///         self.names.swap(a, b);
///     }
/// }
///
/// let mut columns = Columns {
///     keys: vec![3, 1, 2],
///     names: vec!["c", "a", "b"],
/// };
/// quicksort(0, 3, &mut columns);
///
/// assert_eq!(columns.keys, vec![1, 2, 3]);
/// assert_eq!(columns.names, vec!["a", "b", "c"]);
/// ```
pub trait SortAccessor {
    /// Compares the elements at positions `a` and `b`.
    fn compare(&self, a: usize, b: usize) -> Ordering;

    /// Exchanges the elements at positions `a` and `b`.
    fn swap(&mut self, a: usize, b: usize);
}

/// A [`SortAccessor`] that can also compare a splitter value against an element.
///
/// Splitters live outside the sequence being partitioned (typically in a separate
/// ascending slice), so they are addressed by their own index.
pub trait SplitterAccessor: SortAccessor {
    /// Compares splitter number `splitter` with the element at position `index`.
    fn compare_splitter(&self, splitter: usize, index: usize) -> Ordering;
}

/// Pairs an independent comparator and swapper.
///
/// Useful when the comparator reads one structure and the swapper mutates another
/// (for example a key table and an index view), or when both capabilities are
/// closures over interior-mutable storage.
///
/// ```
/// use idxsort::{mergesort, Capabilities};
/// use std::cell::RefCell;
///
/// let data = RefCell::new(vec![5, 3, 9, 1]);
/// let mut caps = Capabilities::new(
///     |a: usize, b: usize| {
///         let data = data.borrow();
///         data[a].cmp(&data[b])
///     },
///     |a: usize, b: usize| data.borrow_mut().swap(a, b),
/// );
/// mergesort(0, 4, &mut caps);
///
/// assert_eq!(*data.borrow(), vec![1, 3, 5, 9]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Capabilities<C, S> {
    pub comparator: C,
    pub swapper: S,
}

impl<C, S> Capabilities<C, S> {
    pub fn new(comparator: C, swapper: S) -> Self {
        Self {
            comparator,
            swapper,
        }
    }
}

impl<C: IndexComparator, S: IndexSwapper> SortAccessor for Capabilities<C, S> {
    #[inline(always)]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self.comparator.compare(a, b)
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        self.swapper.swap(a, b)
    }
}

// Forwarding impl so accessors can be handed down by reference.
impl<A: SortAccessor + ?Sized> SortAccessor for &mut A {
    #[inline(always)]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        (**self).compare(a, b)
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        (**self).swap(a, b)
    }
}

impl<A: SplitterAccessor + ?Sized> SplitterAccessor for &mut A {
    #[inline(always)]
    fn compare_splitter(&self, splitter: usize, index: usize) -> Ordering {
        (**self).compare_splitter(splitter, index)
    }
}

// Blanket implementation for slices of totally ordered elements.
impl<T: Ord> SortAccessor for [T] {
    #[inline(always)]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self[a].cmp(&self[b])
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        <[T]>::swap(self, a, b)
    }
}

// Explicit Vec impl to improve ergonomics (avoiding .as_mut_slice()).
impl<T: Ord> SortAccessor for Vec<T> {
    #[inline(always)]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self[a].cmp(&self[b])
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        <[T]>::swap(self.as_mut_slice(), a, b)
    }
}

// VecDeque has O(1) random access, so it can be reordered in place as well.
impl<T: Ord> SortAccessor for VecDeque<T> {
    #[inline(always)]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self[a].cmp(&self[b])
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        VecDeque::swap(self, a, b)
    }
}
