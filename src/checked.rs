//! Validated entry points for partitioning.
//!
//! The partitioners in [`partition`](crate::partition) trust their caller: ranges and
//! splitter order are not checked, and violating them gives wrong buckets or a panic
//! from slice indexing. This module checks everything once, up front:
//! - [`Splitters`] validates the splitter set when it is built, then reuses it for any
//!   number of partitions;
//! - [`check_range`] validates a `[from, to)` range against a length.

use crate::error::{SortError, reject};
use crate::partition::{Companions, partition_splitters_with};
use std::cmp::Ordering;

/// Checks that `[from, to)` is a valid range of a sequence of length `len`.
///
/// # Examples
///
/// ```
/// use idxsort::{check_range, SortError};
///
/// assert!(check_range(10, 2, 5).is_ok());
/// assert_eq!(check_range(10, 5, 2), Err(SortError::InvalidRange { from: 5, to: 2 }));
/// assert_eq!(check_range(10, 0, 11), Err(SortError::OutOfBounds { to: 11, len: 10 }));
/// ```
pub fn check_range(len: usize, from: usize, to: usize) -> Result<(), SortError> {
    if from > to {
        return Err(reject(SortError::InvalidRange { from, to }));
    }
    if to > len {
        return Err(reject(SortError::OutOfBounds { to, len }));
    }
    Ok(())
}

/// A strictly ascending set of splitter values.
///
/// Holding a `Splitters` proves the ordering was checked, so the partitioning calls
/// only have to validate their ranges.
///
/// # Examples
///
/// ```
/// use idxsort::Splitters;
///
/// let splitters = Splitters::new(&[5, 10, 30]).unwrap();
/// let mut list = vec![7, 4, 5, 50, 6, 4, 3, 6];
/// let boundaries = splitters.partition(&mut list, 0, 8).unwrap();
///
/// assert_eq!(boundaries, vec![3, 7, 7]);
/// assert_eq!(splitters.bucket_of(&7), 1);
///
/// assert!(Splitters::new(&[1, 3, 3]).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splitters<'a, T> {
    values: &'a [T],
}

impl<'a, T: PartialOrd> Splitters<'a, T> {
    /// Validates that `values` is strictly ascending.
    ///
    /// # Errors
    ///
    /// [`SortError::UnsortedSplitters`] with the position of the first value that is
    /// not greater than its predecessor (duplicates and NaN included).
    pub fn new(values: &'a [T]) -> Result<Self, SortError> {
        let unsorted = values
            .windows(2)
            .position(|w| w[0].partial_cmp(&w[1]) != Some(Ordering::Less));
        if let Some(index) = unsorted {
            return Err(reject(SortError::UnsortedSplitters { index: index + 1 }));
        }
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of buckets the splitters define, one more than there are splitters.
    pub fn bucket_count(&self) -> usize {
        self.values.len() + 1
    }

    /// Bucket that `value` belongs to: `0` below the first splitter, `j` for
    /// `[s(j-1), s(j))`, `len()` at or above the last splitter.
    pub fn bucket_of(&self, value: &T) -> usize {
        self.values
            .partition_point(|s| value.partial_cmp(s) != Some(Ordering::Less))
    }

    /// Partitions `list[from..to]` into the buckets and returns one boundary per
    /// splitter, as [`partition_splitters`](crate::partition_splitters) does.
    pub fn partition(
        &self,
        list: &mut [T],
        from: usize,
        to: usize,
    ) -> Result<Vec<usize>, SortError> {
        let mut split_indexes = vec![from; self.values.len()];
        self.partition_into(list, from, to, &mut split_indexes)?;
        Ok(split_indexes)
    }

    /// Like [`Splitters::partition`], writing the boundaries into `split_indexes`.
    pub fn partition_into(
        &self,
        list: &mut [T],
        from: usize,
        to: usize,
        split_indexes: &mut [usize],
    ) -> Result<(), SortError> {
        self.partition_checked(list, &mut (), from, to, split_indexes)
    }

    /// Like [`Splitters::partition`], applying every swap to `secondary` as well.
    pub fn dual_partition<U>(
        &self,
        list: &mut [T],
        secondary: &mut [U],
        from: usize,
        to: usize,
    ) -> Result<Vec<usize>, SortError> {
        check_companion(list.len(), secondary.len())?;

        let mut split_indexes = vec![from; self.values.len()];
        self.partition_checked(list, &mut &mut *secondary, from, to, &mut split_indexes)?;
        Ok(split_indexes)
    }

    /// Like [`Splitters::partition`], applying every swap to `secondary` and
    /// `tertiary` as well.
    pub fn triple_partition<U, V>(
        &self,
        list: &mut [T],
        secondary: &mut [U],
        tertiary: &mut [V],
        from: usize,
        to: usize,
    ) -> Result<Vec<usize>, SortError> {
        check_companion(list.len(), secondary.len())?;
        check_companion(list.len(), tertiary.len())?;

        let mut split_indexes = vec![from; self.values.len()];
        self.partition_checked(
            list,
            &mut (secondary, tertiary),
            from,
            to,
            &mut split_indexes,
        )?;
        Ok(split_indexes)
    }

    fn partition_checked<C: Companions + ?Sized>(
        &self,
        list: &mut [T],
        companions: &mut C,
        from: usize,
        to: usize,
        split_indexes: &mut [usize],
    ) -> Result<(), SortError> {
        check_range(list.len(), from, to)?;
        if split_indexes.len() < self.values.len() {
            return Err(reject(SortError::SplitIndexesTooShort {
                got: split_indexes.len(),
                need: self.values.len(),
            }));
        }

        partition_splitters_with(
            list,
            companions,
            from,
            to,
            self.values,
            0,
            self.values.len(),
            split_indexes,
        );
        Ok(())
    }
}

fn check_companion(expected: usize, got: usize) -> Result<(), SortError> {
    if expected != got {
        return Err(reject(SortError::LengthMismatch { expected, got }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicates_and_descending_values() {
        assert_eq!(
            Splitters::new(&[1, 2, 2, 3]),
            Err(SortError::UnsortedSplitters { index: 2 })
        );
        assert_eq!(
            Splitters::new(&[3, 1]),
            Err(SortError::UnsortedSplitters { index: 1 })
        );
        assert!(Splitters::new(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn empty_and_single_splitters_are_valid() {
        let empty: Splitters<'_, i32> = Splitters::new(&[]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.bucket_count(), 1);

        let one = Splitters::new(&[4]).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one.bucket_of(&3), 0);
        assert_eq!(one.bucket_of(&4), 1);
    }

    #[test]
    fn bucket_of_matches_half_open_buckets() {
        let splitters = Splitters::new(&[5, 10, 30]).unwrap();
        assert_eq!(splitters.bucket_of(&4), 0);
        assert_eq!(splitters.bucket_of(&5), 1);
        assert_eq!(splitters.bucket_of(&9), 1);
        assert_eq!(splitters.bucket_of(&10), 2);
        assert_eq!(splitters.bucket_of(&30), 3);
        assert_eq!(splitters.bucket_of(&1000), 3);
    }

    #[test]
    fn range_errors_leave_data_untouched() {
        let splitters = Splitters::new(&[5]).unwrap();
        let mut list = vec![9, 1, 8];

        assert_eq!(
            splitters.partition(&mut list, 2, 1),
            Err(SortError::InvalidRange { from: 2, to: 1 })
        );
        assert_eq!(
            splitters.partition(&mut list, 0, 4),
            Err(SortError::OutOfBounds { to: 4, len: 3 })
        );
        assert_eq!(list, vec![9, 1, 8]);
    }

    #[test]
    fn short_split_index_buffer_is_rejected() {
        let splitters = Splitters::new(&[1, 2, 3]).unwrap();
        let mut list = vec![3, 2, 1];
        let mut split_indexes = [0; 2];

        assert_eq!(
            splitters.partition_into(&mut list, 0, 3, &mut split_indexes),
            Err(SortError::SplitIndexesTooShort { got: 2, need: 3 })
        );
    }

    #[test]
    fn dual_partition_moves_companion_along() {
        let values = [10, 20];
        let splitters = Splitters::new(&values).unwrap();
        assert_eq!(splitters.as_slice(), &[10, 20]);

        let keys = vec![25, 5, 15, 30, 10, 1];
        let mut list = keys.clone();
        let mut ids: Vec<usize> = (0..keys.len()).collect();
        let boundaries = splitters.dual_partition(&mut list, &mut ids, 0, 6).unwrap();

        assert_eq!(boundaries, vec![2, 4]);
        assert!(list[..2].iter().all(|&v| v < 10));
        assert!(list[2..4].iter().all(|&v| (10..20).contains(&v)));
        assert!(list[4..].iter().all(|&v| v >= 20));
        for (y, &x) in ids.iter().enumerate() {
            assert_eq!(list[y], keys[x]);
        }
    }

    #[test]
    fn companion_length_mismatch_is_rejected() {
        let splitters = Splitters::new(&[5]).unwrap();
        let mut list = vec![9, 1, 8];
        let mut ids = vec![0, 1];

        assert_eq!(
            splitters.dual_partition(&mut list, &mut ids, 0, 3),
            Err(SortError::LengthMismatch { expected: 3, got: 2 })
        );
    }
}
