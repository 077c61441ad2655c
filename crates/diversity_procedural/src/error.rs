//! # Procedural Error Types
//!
//! Errors raised by the generation building blocks. All of them are
//! precondition violations: callers are expected to never trigger them with
//! well-formed tables and a bound stream.

use thiserror::Error;

/// Errors that can occur in the procedural components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProceduralError {
    /// A draw was requested before the stream was bound to a seed.
    #[error("random stream used before a seed was bound")]
    Unseeded,

    /// A bounded draw was requested with an empty range.
    #[error("invalid range: max {max} must be greater than min {min}")]
    InvalidRange {
        /// Inclusive lower bound.
        min: i32,
        /// Exclusive upper bound.
        max: i32,
    },

    /// A chance table does not add up to exactly 100 percent.
    #[error("chance table sums to {sum}%, expected exactly 100%")]
    InvalidWeights {
        /// Actual sum of all percentages.
        sum: u64,
    },

    /// A fragment or element table is empty.
    #[error("table is empty: {0}")]
    EmptyTable(String),

    /// Name synthesis kept producing reserved names.
    #[error("no non-reserved name produced after {attempts} attempts")]
    ReservedNamesExhausted {
        /// Number of attempts made.
        attempts: u32,
    },

    /// A positional designator cannot be expressed.
    #[error("no positional designator for orbital index {0}")]
    DesignatorOutOfRange(usize),
}

/// Result type for procedural operations.
pub type ProceduralResult<T> = Result<T, ProceduralError>;
