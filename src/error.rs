//! Error type of the checked entry points.
//!
//! The core algorithms in [`algo`](crate::algo) and [`partition`](crate::partition) trust
//! their caller and never fail. Everything that validates input first, such as
//! [`Splitters`](crate::Splitters), [`check_range`](crate::check_range) and the
//! permutation helpers, reports problems through [`SortError`] before touching any
//! data.

/// All the ways a checked operation can reject its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("invalid range: from ({from}) is greater than to ({to})")]
    InvalidRange { from: usize, to: usize },
    #[error("range end {to} is beyond the sequence length {len}")]
    OutOfBounds { to: usize, len: usize },
    #[error("length mismatch: expected {expected} elements, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("splitters must be strictly ascending, violated at position {index}")]
    UnsortedSplitters { index: usize },
    #[error("split index buffer holds {got} entries, need at least {need}")]
    SplitIndexesTooShort { got: usize, need: usize },
    #[error("permutations are enumerated 1..={count}, got rank {rank}")]
    RankOutOfRange { rank: u64, count: u64 },
    #[error("exact enumeration supports at most {max} elements, got {n}")]
    TooManyElements { n: usize, max: usize },
    #[error("entry {index} at position {position} does not make a permutation")]
    NotAPermutation { position: usize, index: usize },
}

/// Passes `err` through, logging it when the `tracing` feature is enabled.
#[inline]
pub(crate) fn reject(err: SortError) -> SortError {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %err, "rejected input");

    err
}
