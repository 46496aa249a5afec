//! Error types for tickstream
//!
//! One tagged error enum covers the whole surface; variants carry the
//! diagnostic payloads (sizes, indices, kinds) and `thiserror` provides
//! the shared message contract. Callers match coarsely on the enum or
//! finely on a variant.

use crate::scalar::ScalarKind;
use thiserror::Error;

/// Result type alias for tickstream operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for stream operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No widen/narrow/stringify path between the two kinds for this
    /// operation.
    #[error("no {operation} conversion from {from} to {to}")]
    Type {
        /// Kind the value actually has
        from: ScalarKind,
        /// Kind the operation asked for
        to: ScalarKind,
        /// Which surface rejected it ("push" or "read")
        operation: &'static str,
    },

    /// Caller-supplied arguments are unusable (e.g. `beg > end` after
    /// normalization, or a secondary read on a primary-only stream).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A normalized index fell outside `[0, physical_capacity)`.
    #[error("index out of range: size {size}, beg {beg}, end {end}")]
    IndexOutOfRange {
        /// Physical capacity at the time of the read
        size: usize,
        /// Normalized begin index
        beg: i64,
        /// Normalized end index
        end: i64,
    },

    /// Physical buffer length disagrees with the configured bound.
    /// Indicates internal corruption, never caller error.
    #[error("size violation: physical length {actual} disagrees with bound {bound}")]
    SizeViolation {
        /// Configured bound
        bound: usize,
        /// Observed physical length
        actual: usize,
    },

    /// Marker-based read before any positioning read set the cursor.
    #[error("marker unset: no positioned read has occurred on this stream")]
    UnsetMarker,
}
