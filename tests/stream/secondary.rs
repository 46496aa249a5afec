//! Secondary-channel alignment and the primary-only fallbacks.

use crate::common::timestamped_f64_stream;
use tickstream::{Error, ScalarKind, Stream, Timestamp};

#[test]
fn channel_stays_aligned_across_eviction() {
    let stream = timestamped_f64_stream(3, 7);
    // Samples 7, 6, 5 remain; each index pairs value i with timestamp i.
    for idx in 0..3i64 {
        let (value, time) = stream.pair_at(idx).unwrap();
        let expect = 7 - idx;
        assert_eq!(value.to_string(), expect.to_string());
        assert_eq!(time, Timestamp::from_millis(expect));
    }
}

#[test]
fn bulk_reads_carry_the_attributes() {
    let stream = timestamped_f64_stream(4, 4);
    let mut dest = [0.0f64; 4];
    let mut times = [Timestamp::default(); 4];
    let copied = stream.read_into(&mut dest, -1, 0, Some(&mut times)).unwrap();
    assert_eq!(copied, 4);
    assert_eq!(dest, [4.0, 3.0, 2.0, 1.0]);
    let expect: Vec<_> = (1..=4).rev().map(Timestamp::from_millis).collect();
    assert_eq!(&times[..], &expect[..]);
}

#[test]
fn string_reads_carry_the_attributes_too() {
    let stream = timestamped_f64_stream(2, 2);
    let mut dest = vec![String::new(); 2];
    let mut times = [Timestamp::default(); 2];
    let copied = stream
        .read_strings_into(&mut dest, 32, -1, 0, Some(&mut times))
        .unwrap();
    assert_eq!(copied, 2);
    assert_eq!(dest, ["2", "1"]);
    assert_eq!(times[0], Timestamp::from_millis(2));
}

#[test]
fn plain_push_records_a_default_attribute() {
    let stream = timestamped_f64_stream(4, 1);
    stream.push(2.0f64).unwrap();
    assert_eq!(stream.secondary_at(0).unwrap(), Timestamp::default());
    assert_eq!(stream.secondary_at(1).unwrap(), Timestamp::from_millis(1));
}

#[test]
fn secondary_vec_window_matches_primary_window() {
    let stream = timestamped_f64_stream(6, 6);
    let values = stream.to_vec(3, 1).unwrap();
    let times = stream.secondary_to_vec(3, 1).unwrap();
    assert_eq!(values.len(), times.len());
    for (value, time) in values.iter().zip(&times) {
        assert_eq!(value.to_string(), time.as_millis().to_string());
    }
}

#[test]
fn primary_only_stream_degrades_quietly() {
    let stream: Stream = Stream::new(4, ScalarKind::F64);
    stream.push(1.5f64).unwrap();

    // Point access to the missing channel is the one loud failure.
    assert!(matches!(
        stream.secondary_at(0),
        Err(Error::InvalidArgument(_))
    ));

    // Paired and bulk forms substitute defaults.
    let (_, time) = stream.pair_at(0).unwrap();
    assert_eq!(time, Timestamp::default());
    assert_eq!(
        stream.secondary_to_vec(-1, 0).unwrap(),
        vec![Timestamp::default()]
    );

    // A supplied attribute buffer is simply left untouched.
    let sentinel = Timestamp::from_millis(-1);
    let mut dest = [0.0f64; 1];
    let mut times = [sentinel];
    stream.read_into(&mut dest, -1, 0, Some(&mut times)).unwrap();
    assert_eq!(times[0], sentinel);

    // And push_with discards the attribute rather than failing.
    stream.push_with(2.5f64, Timestamp::now()).unwrap();
    assert_eq!(stream.len(), 2);
}

#[test]
fn secondary_reads_position_the_cursor_only_with_a_channel() {
    let with = timestamped_f64_stream(4, 3);
    let _ = with.secondary_to_vec(-1, 1).unwrap();
    assert_eq!(with.marker_position(), Some(0));

    let without: Stream = Stream::new(4, ScalarKind::F64);
    without.push(1.0f64).unwrap();
    let _ = without.secondary_to_vec(-1, 0).unwrap();
    assert_eq!(without.marker_position(), None);
}
