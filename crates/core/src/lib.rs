//! Core types for tickstream
//!
//! This crate defines the foundational types used throughout the system:
//! - ScalarKind/ScalarValue: the closed set of sample representations and
//!   the total widen/narrow/stringify coercion table over them
//! - Scalar: trait mapping native Rust types to their kind tag
//! - Error: the tagged error taxonomy shared by every operation
//! - Timestamp: default secondary attribute type
//! - Limits: physical bound cap and string field width

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod scalar;
pub mod timestamp;

// Re-export commonly used types
pub use error::{Error, Result};
pub use limits::{clamp_bound, MAX_BOUND, STRING_FIELD_WIDTH};
pub use scalar::{Scalar, ScalarKind, ScalarValue};
pub use timestamp::Timestamp;
