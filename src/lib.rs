//! tickstream - Bounded, thread-safe, most-recent-first sample buffers
//!
//! A `tickstream` [`Stream`] retains the newest `bound` samples of one
//! scalar kind, newest at index 0, and hands them back converted to any
//! wider kind or to canonical strings. An optional secondary channel
//! stores one index-aligned attribute per sample (a [`Timestamp`] by
//! default), and a per-stream cursor lets consumers sweep "everything
//! since my last read" without tracking indices themselves.
//!
//! # Quick Start
//!
//! ```
//! use tickstream::{ScalarKind, Stream};
//!
//! // Keep the 256 most recent trade prices.
//! let prices: Stream = Stream::new(256, ScalarKind::F64);
//!
//! prices.push(101.25_f64)?;
//! prices.push(101.5_f32)?; // widened to f64 on the way in
//!
//! assert_eq!(prices.at(0)?.to_string(), "101.5");
//!
//! // Sweep everything newer than the last read.
//! prices.push(102.0_f64)?;
//! let mut fresh = [0.0_f64; 8];
//! let n = prices.read_from_cursor_into(&mut fresh, 0, None)?;
//! assert_eq!(&fresh[..n], &[102.0]);
//! # Ok::<(), tickstream::Error>(())
//! ```
//!
//! # Architecture
//!
//! The workspace splits along concerns: `tickstream-core` holds the
//! scalar model, error taxonomy, and limits; `tickstream-concurrency`
//! holds the writer-preference lock; `tickstream-stream` composes them
//! into the ring buffer, cursor, and [`Stream`]. This facade re-exports
//! the public surface of all three.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use tickstream_concurrency::WriterPreferenceLock;
pub use tickstream_core::{
    clamp_bound, Error, Result, Scalar, ScalarKind, ScalarValue, Timestamp, MAX_BOUND,
    STRING_FIELD_WIDTH,
};
pub use tickstream_stream::{Cursor, RingBuffer, SecondaryChannel, Stream};
