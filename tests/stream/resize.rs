//! Capacity changes at runtime.

use crate::common::{drain_i64, i64_stream, timestamped_f64_stream};
use tickstream::{Error, Timestamp};

#[test]
fn grow_keeps_every_retained_sample() {
    let stream = i64_stream(3, 3);
    assert_eq!(stream.set_bound(10), 10);
    assert_eq!(stream.bound(), 10);
    assert_eq!(stream.len(), 3);
    assert_eq!(drain_i64(&stream), vec![3, 2, 1]);
    // New headroom fills before anything is evicted again.
    for v in 4..=10 {
        stream.push(v).unwrap();
    }
    assert_eq!(stream.len(), 10);
}

#[test]
fn shrink_keeps_only_the_newest() {
    let stream = i64_stream(10, 10);
    stream.set_bound(4);
    assert_eq!(drain_i64(&stream), vec![10, 9, 8, 7]);
    assert!(matches!(
        stream.at(4),
        Err(Error::IndexOutOfRange { size: 4, .. })
    ));
}

#[test]
fn shrink_resizes_both_channels_together() {
    let stream = timestamped_f64_stream(6, 6);
    stream.set_bound(2);
    let times = stream.secondary_to_vec(-1, 0).unwrap();
    assert_eq!(times, vec![Timestamp::from_millis(6), Timestamp::from_millis(5)]);
    let (value, time) = stream.pair_at(1).unwrap();
    assert_eq!(value.to_string(), "5");
    assert_eq!(time, Timestamp::from_millis(5));
}

#[test]
fn shrink_clamps_an_out_of_range_cursor() {
    let stream = i64_stream(10, 10);
    let _ = stream.at(8).unwrap();
    assert_eq!(stream.marker_position(), Some(7));
    stream.set_bound(4);
    assert_eq!(stream.marker_position(), Some(3));
    // The clamped cursor still drives a valid (empty) sweep.
    let mut dest = [0i64; 10];
    assert!(stream.read_from_cursor_into(&mut dest, 0, None).is_ok());
}

#[test]
fn resize_to_zero_then_back() {
    let stream = i64_stream(4, 4);
    assert_eq!(stream.set_bound(0), 0);
    assert_eq!(stream.len(), 0);
    assert_eq!(stream.set_bound(4), 4);
    assert!(stream.is_empty());
    stream.push(1).unwrap();
    assert_eq!(drain_i64(&stream), vec![1]);
}

#[test]
fn shrink_to_one_keeps_only_the_newest() {
    let stream = i64_stream(4, 2);
    assert_eq!(stream.set_bound(1), 1);
    assert_eq!(drain_i64(&stream), vec![2]);
}
