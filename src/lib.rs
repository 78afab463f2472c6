//! # idxsort
//!
//! `idxsort` sorts, partitions and permutes sequences it never sees. Every algorithm
//! works on *logical positions* and needs only two capabilities from the caller:
//!
//! - a **comparator** telling how the elements at positions `a` and `b` compare;
//! - a **swapper** exchanging the elements at positions `a` and `b`.
//!
//! Because element storage stays entirely on the caller's side, the same code sorts
//! plain slices, parallel ("structure of arrays") data, matrix rows through an index
//! view, or any composite record, without copying or boxing.
//!
//! ## Key Features
//!
//! - **Quicksort**: Three-way (Bentley–McIlroy) partitioning with a pseudomedian-of-9
//!   pivot and a fixed-size work stack, so degenerate input cannot exhaust the call
//!   stack.
//! - **Merge sort**: Stable, and with [`mergesort`] entirely buffer-free (merging by
//!   block rotation); [`mergesort_buffered`] trades a few index buffers for
//!   linear-time merges.
//! - **Multi-way partitioning**: Buckets a range by `k` sorted splitters in
//!   `O(n log k)` ([`partition_splitters`]), with companion-array variants that keep
//!   parallel slices aligned.
//! - **Permutations**: Lehmer-code enumeration ([`permutation`]) and in-place
//!   application through a swapper ([`permute_in_place`]).
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! Slices, `Vec`s and `VecDeque`s of [`Ord`] elements implement [`SortAccessor`]
//! directly.
//!
//! ```rust
//! use idxsort::{mergesort, quicksort};
//!
//! let mut data = vec!["banana", "apple", "cherry", "date"];
//! quicksort(0, data.len(), &mut data);
//! assert_eq!(data, vec!["apple", "banana", "cherry", "date"]);
//!
//! let mut numbers = vec![3, 1, 2];
//! mergesort(0, numbers.len(), &mut numbers);
//! assert_eq!(numbers, vec![1, 2, 3]);
//! ```
//!
//! ### Custom Storage
//!
//! Implement [`SortAccessor`] to sort anything addressable by position. Here the
//! rows of a row-major matrix are ordered by their first column through an index
//! view, without moving any matrix data.
//!
//! ```rust
//! use idxsort::{quicksort, SortAccessor};
//! use std::cmp::Ordering;
//!
//! struct RowView<'a> {
//!     cells: &'a [f64],
//!     columns: usize,
//!     rows: Vec<usize>,
//! }
//!
//! impl SortAccessor for RowView<'_> {
//!     fn compare(&self, a: usize, b: usize) -> Ordering {
//!         let key = |row: usize| self.cells[self.rows[row] * self.columns];
//!         key(a).total_cmp(&key(b))
//!     }
//!
//!     fn swap(&mut self, a: usize, b: usize) {
//!         self.rows.swap(a, b);
//!     }
//! }
//!
//! let cells = [3.0, 30.0, 1.0, 10.0, 2.0, 20.0];
//! let mut view = RowView { cells: &cells, columns: 2, rows: vec![0, 1, 2] };
//! quicksort(0, 3, &mut view);
//!
//! assert_eq!(view.rows, vec![1, 2, 0]);
//! ```
//!
//! ### Bucketing
//!
//! ```rust
//! use idxsort::{bucket_ranges, Splitters};
//!
//! let splitters = Splitters::new(&[5, 10, 30]).unwrap();
//! let mut list = vec![7, 4, 5, 50, 6, 4, 3, 6];
//! let len = list.len();
//! let boundaries = splitters.partition(&mut list, 0, len).unwrap();
//!
//! let sizes: Vec<usize> = bucket_ranges(0, len, &boundaries)
//!     .map(|bucket| bucket.len())
//!     .collect();
//! assert_eq!(sizes, vec![3, 4, 0, 1]);
//! ```
//!
//! ## Preconditions
//!
//! The algorithms in [`algo`], [`partition`](mod@partition) and [`permute_in_place`] trust their
//! caller: ranges must lie inside the storage and splitters must be strictly
//! ascending. Debug builds assert what can be asserted cheaply. Use [`Splitters`],
//! [`check_range`] and the `Result`-returning functions for validated input; they
//! fail with a [`SortError`] before modifying anything.
//!
//! The engine holds no state between calls and never synchronizes. Disjoint storage
//! can be processed from several threads at once; overlapping calls on the same
//! storage are prevented by the `&mut` borrows.
//!
//! ## Features
//!
//! | Flag | Description |
//! | ---- | ----------- |
//! | `tracing` | Rejected input and enumeration fallbacks are reported through `tracing::debug`. |

pub mod algo;
pub mod checked;
pub mod core;
pub mod error;
pub mod partition;
pub mod permute;

pub use algo::{mergesort, mergesort_buffered, quicksort};
pub use checked::{Splitters, check_range};
pub use crate::core::{
    Capabilities, IndexComparator, IndexSwapper, SortAccessor, SplitterAccessor,
};
pub use error::SortError;
pub use partition::{
    bucket_ranges, dual_partition, dual_partition_splitters, partition, partition_generic,
    partition_splitters, partition_splitters_generic, triple_partition,
    triple_partition_splitters,
};
pub use permute::{
    CycleTracker, Enumeration, PermutationBuffers, factorial, invert, is_permutation, permutation,
    permutation_with, permute, permute_in_place, validate_permutation,
};

pub mod prelude {
    pub use crate::algo::{mergesort, mergesort_buffered, quicksort};
    pub use crate::checked::Splitters;
    pub use crate::core::{Capabilities, SortAccessor, SplitterAccessor};
    pub use crate::partition::{partition, partition_splitters};
    pub use crate::permute::{PermutationBuffers, permutation, permute_in_place};
}
