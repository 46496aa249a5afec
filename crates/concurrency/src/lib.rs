//! Concurrency layer for tickstream
//!
//! One primitive lives here: [`WriterPreferenceLock`], the exclusive
//! lock that serializes every stream operation while keeping producer
//! latency bounded under read contention. See the module docs in
//! [`lock`] for the acquisition and fairness rules.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lock;

pub use lock::{ReadGuard, WriteGuard, WriterPreferenceLock};
