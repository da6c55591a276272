//! Error and result types.

use thiserror::Error;

/// Result type alias for sparse-tsp operations.
pub type TspResult<T> = Result<T, TspError>;

/// Errors raised by distance model construction and tour operations.
///
/// All operations in this crate are pure in-memory computation, so no error
/// here is retryable; each one reports a contract violation or degenerate
/// input to the immediate caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// The graph (or the subgraph induced by a tour's cities) has no positive
    /// edge, so the average distance is undefined.
    #[error("no positive edges: average distance is undefined")]
    EmptyGraph,

    /// Crossover was invoked on parents that cannot be recombined: differing
    /// lengths, differing distance models, or city sets that are not
    /// rearrangements of each other.
    #[error("crossover parents are incompatible ({left} vs {right} cities)")]
    IncompatibleParents {
        /// Length of the first parent.
        left: usize,
        /// Length of the second parent.
        right: usize,
    },

    /// A crossover segment with `begin >= end`, which copies nothing useful
    /// and cannot produce a meaningful recombination.
    #[error("degenerate crossover segment [{begin}, {end}]")]
    DegenerateInterval {
        /// Start of the segment (inclusive).
        begin: usize,
        /// End of the segment (inclusive).
        end: usize,
    },

    /// An index or city identifier outside the known universe was passed to a
    /// fallible entry point.
    #[error("index {index} is out of range for {len} cities")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Size of the universe it was checked against.
        len: usize,
    },

    /// A distance grid whose length does not match the declared city count.
    #[error("distance grid of {len} entries does not match {size}x{size} cities")]
    DimensionMismatch {
        /// Length of the supplied grid.
        len: usize,
        /// Declared number of cities.
        size: usize,
    },
}
