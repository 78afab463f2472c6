//! Computing and applying permutations.
//!
//! A permutation is written as `indexes[new_position] = original_position`: after it
//! has been applied, position `i` holds what used to be at `indexes[i]`.
//!
//! - [`permutation`] decodes the p-th permutation of `0..n` from its rank in the
//!   factorial number system (Lehmer code).
//! - [`permute`] applies a permutation to a slice through a full copy.
//! - [`permute_in_place`] applies a permutation through an [`IndexSwapper`] only, for
//!   storage the caller cannot or will not copy.

use crate::core::IndexSwapper;
use crate::error::{SortError, reject};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest `n` whose `n!` fits into a `u64`.
pub const MAX_EXACT_ELEMENTS: usize = 20;

const FACTORIALS: [u64; MAX_EXACT_ELEMENTS + 1] = {
    let mut table = [1u64; MAX_EXACT_ELEMENTS + 1];
    let mut i = 1;
    while i <= MAX_EXACT_ELEMENTS {
        table[i] = table[i - 1] * i as u64;
        i += 1;
    }
    table
};

/// Returns `n!`, or `None` if it does not fit into a `u64`.
pub fn factorial(n: usize) -> Option<u64> {
    FACTORIALS.get(n).copied()
}

/// How [`permutation_with`] handles sequences too long to enumerate exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Enumeration {
    /// Exact Lehmer decoding; fails for more than [`MAX_EXACT_ELEMENTS`] elements.
    #[default]
    Exact,
    /// Exact decoding where possible, otherwise a Fisher–Yates shuffle of `0..n`
    /// seeded with the rank. Ranks then no longer enumerate anything; they only make
    /// the shuffle reproducible.
    Shuffled,
}

/// Returns the `rank`-th (1-indexed) permutation of `0..n` in lexicographic order.
///
/// # Errors
///
/// * [`SortError::RankOutOfRange`] if `rank` is 0 or greater than `n!`.
/// * [`SortError::TooManyElements`] if `n` exceeds [`MAX_EXACT_ELEMENTS`].
///
/// # Examples
///
/// ```
/// use idxsort::permutation;
///
/// assert_eq!(permutation(1, 3).unwrap(), vec![0, 1, 2]);
/// assert_eq!(permutation(4, 3).unwrap(), vec![1, 2, 0]);
/// assert_eq!(permutation(6, 3).unwrap(), vec![2, 1, 0]);
/// ```
pub fn permutation(rank: u64, n: usize) -> Result<Vec<usize>, SortError> {
    permutation_with(rank, n, Enumeration::Exact)
}

/// Like [`permutation`], with an explicit choice for sequences longer than
/// [`MAX_EXACT_ELEMENTS`].
pub fn permutation_with(rank: u64, n: usize, mode: Enumeration) -> Result<Vec<usize>, SortError> {
    let Some(count) = factorial(n) else {
        if rank == 0 {
            return Err(reject(SortError::RankOutOfRange {
                rank,
                count: u64::MAX,
            }));
        }
        return match mode {
            Enumeration::Exact => Err(reject(SortError::TooManyElements {
                n,
                max: MAX_EXACT_ELEMENTS,
            })),
            Enumeration::Shuffled => {
                #[cfg(feature = "tracing")]
                tracing::debug!(rank, n, "permutation too long to enumerate, shuffling");

                Ok(seeded_shuffle(rank, n))
            }
        };
    };

    if rank == 0 || rank > count {
        return Err(reject(SortError::RankOutOfRange { rank, count }));
    }

    let mut candidates: Vec<usize> = (0..n).collect();
    let mut result = Vec::with_capacity(n);
    let mut remainder = rank - 1;
    for m in (1..n).rev() {
        let weight = FACTORIALS[m];
        let digit = (remainder / weight) as usize;
        remainder %= weight;
        result.push(candidates.remove(digit));
    }
    result.append(&mut candidates);

    Ok(result)
}

/// Fisher–Yates shuffle of `0..n`; only reached for `n > MAX_EXACT_ELEMENTS`.
fn seeded_shuffle(seed: u64, n: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut result: Vec<usize> = (0..n).collect();
    for i in 0..n - 1 {
        let j = rng.random_range(i..n);
        result.swap(i, j);
    }
    result
}

/// Reorders `sequence` so that `sequence[i]` becomes the old `sequence[indexes[i]]`.
///
/// Works on a full copy of the sequence, so `indexes` may repeat or omit positions.
///
/// # Errors
///
/// Fails before modifying anything if the lengths differ or an index is out of
/// bounds.
///
/// # Examples
///
/// ```
/// use idxsort::permute;
///
/// let mut data = vec!['a', 'b', 'c', 'd'];
/// permute(&mut data, &[3, 0, 2, 1]).unwrap();
///
/// assert_eq!(data, vec!['d', 'a', 'c', 'b']);
/// ```
pub fn permute<T: Clone>(sequence: &mut [T], indexes: &[usize]) -> Result<(), SortError> {
    let len = sequence.len();
    if indexes.len() != len {
        return Err(reject(SortError::LengthMismatch {
            expected: len,
            got: indexes.len(),
        }));
    }
    if let Some((position, &index)) = indexes.iter().enumerate().find(|(_, i)| **i >= len) {
        return Err(reject(SortError::NotAPermutation { position, index }));
    }

    let copy = sequence.to_vec();
    sequence
        .iter_mut()
        .zip(indexes)
        .for_each(|(slot, &index)| *slot = copy[index].clone());
    Ok(())
}

/// Applies `indexes` to caller-owned storage through `swapper` alone.
///
/// After the call, position `i` holds the element that was at `indexes[i]`. At most
/// `indexes.len() - 1` swaps are made. `indexes` must be a permutation of
/// `0..indexes.len()`; this is only checked in debug builds (see
/// [`validate_permutation`]).
///
/// # Examples
///
/// ```
/// use idxsort::{permute_in_place, PermutationBuffers};
///
/// let mut rows = vec!["r0", "r1", "r2"];
/// let mut buffers = PermutationBuffers::new();
/// permute_in_place(&[2, 0, 1], &mut |a: usize, b: usize| rows.swap(a, b), &mut buffers);
///
/// assert_eq!(rows, vec!["r2", "r0", "r1"]);
/// ```
pub fn permute_in_place<W: IndexSwapper + ?Sized>(
    indexes: &[usize],
    swapper: &mut W,
    buffers: &mut PermutationBuffers,
) {
    debug_assert!(
        validate_permutation(indexes).is_ok(),
        "indexes are not a permutation"
    );
    buffers.tracker.apply(indexes, swapper);
}

/// Returns the inverse of a permutation: `invert(p)[p[i]] == i`.
///
/// Applying `p` and then `invert(p)` restores the original order.
pub fn invert(indexes: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; indexes.len()];
    for (position, &index) in indexes.iter().enumerate() {
        inverse[index] = position;
    }
    inverse
}

/// Checks that `indexes` contains every position in `0..indexes.len()` exactly once.
///
/// # Errors
///
/// [`SortError::NotAPermutation`] naming the first entry that is out of range or
/// repeated.
pub fn validate_permutation(indexes: &[usize]) -> Result<(), SortError> {
    let mut seen = vec![false; indexes.len()];
    for (position, &index) in indexes.iter().enumerate() {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(SortError::NotAPermutation { position, index }),
        }
    }
    Ok(())
}

/// Returns `true` if `indexes` is a permutation of `0..indexes.len()`.
pub fn is_permutation(indexes: &[usize]) -> bool {
    validate_permutation(indexes).is_ok()
}

/// Reusable work space for [`permute_in_place`] and
/// [`mergesort_buffered`](crate::mergesort_buffered).
#[derive(Clone, Debug, Default)]
pub struct PermutationBuffers {
    pub(crate) order: Vec<usize>,
    pub(crate) tracker: CycleTracker,
}

impl PermutationBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocates room for sequences of up to `n` elements.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            order: Vec::with_capacity(n),
            tracker: CycleTracker::with_capacity(n),
        }
    }
}

/// Where every element currently is while a permutation is being applied.
///
/// Two mutually inverse maps are kept:
/// - `tracks[original]` is the current position of the element that started at
///   `original`;
/// - `pos[current]` is the starting position of the element now at `current`.
///
/// A permutation names *original* positions, but by the time an entry is reached
/// earlier swaps may have moved that element, so each swap is redirected to where
/// the element actually lives.
#[derive(Clone, Debug, Default)]
pub struct CycleTracker {
    tracks: Vec<usize>,
    pos: Vec<usize>,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            tracks: Vec::with_capacity(n),
            pos: Vec::with_capacity(n),
        }
    }

    /// Current position of the element that started at `original`.
    pub fn current_position(&self, original: usize) -> usize {
        self.tracks[original]
    }

    /// Starting position of the element that is now at `position`.
    pub fn original_at(&self, position: usize) -> usize {
        self.pos[position]
    }

    /// Forgets all moves and tracks `n` elements in their starting positions.
    pub fn reset(&mut self, n: usize) {
        self.tracks.clear();
        self.tracks.extend(0..n);
        self.pos.clear();
        self.pos.extend(0..n);
    }

    /// Applies `indexes` through `swapper`, see [`permute_in_place`].
    pub fn apply<W: IndexSwapper + ?Sized>(&mut self, indexes: &[usize], swapper: &mut W) {
        self.reset(indexes.len());

        for (i, &index) in indexes.iter().enumerate() {
            let track = self.tracks[index];
            if i == track {
                continue;
            }

            swapper.swap(i, track);
            let displaced = self.pos[i];
            self.tracks[index] = i;
            self.tracks[displaced] = track;
            self.pos.swap(i, track);

            debug_assert_eq!(self.pos[i], index);
            debug_assert_eq!(self.tracks[self.pos[track]], track);
        }
    }
}
