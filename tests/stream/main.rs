//! Stream Integration Tests
//!
//! End-to-end coverage of the public stream surface: ordering and
//! capacity, scalar coercion, marker sweeps, resize, the secondary
//! channel, and multi-threaded stress.

#[path = "../common/mod.rs"]
mod common;

mod resize;
mod secondary;
mod stress;
