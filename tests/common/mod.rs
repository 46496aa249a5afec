//! Shared test utilities for the integration test suites.
//!
//! Import via `mod common;` from a suite's main.rs.

#![allow(dead_code)]

use tickstream::{ScalarKind, Stream, Timestamp};

/// An i64 stream pre-filled with `1..=pushes` in push order.
pub fn i64_stream(bound: usize, pushes: i64) -> Stream {
    let stream = Stream::new(bound, ScalarKind::I64);
    for v in 1..=pushes {
        stream.push(v).unwrap();
    }
    stream
}

/// An f64 stream with a timestamped secondary channel; sample `i` of
/// `pushes` carries value `i as f64` and timestamp `i` millis.
pub fn timestamped_f64_stream(bound: usize, pushes: i64) -> Stream {
    let stream = Stream::with_secondary(bound, ScalarKind::F64);
    for i in 1..=pushes {
        stream
            .push_with(i as f64, Timestamp::from_millis(i))
            .unwrap();
    }
    stream
}

/// Drain a stream newest-to-oldest into plain i64s.
pub fn drain_i64(stream: &Stream) -> Vec<i64> {
    let mut dest = vec![0i64; stream.bound().max(1)];
    let copied = stream.read_into(&mut dest, -1, 0, None).unwrap();
    dest.truncate(copied);
    dest
}
