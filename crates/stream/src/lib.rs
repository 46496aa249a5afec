//! Stream layer for tickstream
//!
//! Composes the bounded ring buffer, the resumable-read cursor, and the
//! writer-preference lock into [`Stream`], the thread-safe
//! most-recent-first sample buffer. See the module docs in [`stream`]
//! for the ordering, coercion, and cursor contracts.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod ring;
pub mod stream;

pub use cursor::Cursor;
pub use ring::{RingBuffer, SecondaryChannel};
pub use stream::Stream;
