//! Error kinds raised by the enumeration engine (spec §7).
//!
//! `compute()` either runs to completion or raises one of these; the
//! driver does not catch any of them, so they bubble straight to the
//! caller. Whatever state the [`crate::full_cone::FullCone`] is in at that
//! point should be discarded, not inspected.

use thiserror::Error;

/// Why a generator matrix or mode combination was rejected before any
/// enumeration work began.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BadInputReason {
    #[error("generator matrix has rank {rank} in dimension {dim}, expected full rank {dim}")]
    NotFullRank { rank: usize, dim: usize },

    #[error("inhomogeneous mode: generator set has inconsistent truncation (no valid degree-0 hyperplane separates homogeneous and lifted generators)")]
    InconsistentTruncation,

    #[error("explicit grading is non-positive on generator {generator_index} (value {value})")]
    NonPositiveGrading { generator_index: usize, value: i64 },

    #[error("task requires a grading but none was supplied and none could be derived")]
    GradingRequiredButNotDerivable,

    #[error("no generators supplied")]
    Empty,

    #[error("generator row {index} has length {actual}, expected {expected}")]
    RaggedRow {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Errors the engine can raise.
#[derive(Debug, Error)]
pub enum ConeError {
    /// The input (or the task-flag combination against that input) is
    /// invalid; no enumeration work was lost because none was done.
    #[error("bad input: {0}")]
    BadInput(#[from] BadInputReason),

    /// A mod-p shadow computation caught an overflow in the fixed-width
    /// ring during a pivot step (spec §4.1 Failure semantics). Retry with
    /// a wider ring, e.g. [`crate::ring_native::BigIntRing`].
    #[error("arithmetic overflow while pivoting in generator {generator}: {context}")]
    Arithmetic { generator: usize, context: String },

    /// An internal invariant was violated. This indicates a bug in the
    /// engine, not bad input; any state on the [`crate::full_cone::FullCone`]
    /// at this point should be discarded.
    #[error("internal invariant violated: {0}")]
    Fatal(String),
}

pub type ConeResult<T> = Result<T, ConeError>;
