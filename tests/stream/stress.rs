//! Multi-threaded stress over one shared stream.
//!
//! Heavy cases are #[ignore] for opt-in execution:
//! cargo test --test stream stress -- --ignored

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use rand::Rng;
use tickstream::{ScalarKind, Stream};

#[test]
fn stress_concurrent_pushes_keep_the_count_exact() {
    let stream: Arc<Stream> = Arc::new(Stream::new(1 << 14, ScalarKind::I64));
    let threads = 8;
    let per_thread = 1_000i64;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let stream = Arc::clone(&stream);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..per_thread {
                    stream.push(t as i64 * per_thread + i).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(stream.len(), threads * per_thread as usize);
    // Every pushed value is retained exactly once.
    let mut dest = vec![0i64; threads * per_thread as usize];
    let copied = stream.read_into(&mut dest, -1, 0, None).unwrap();
    assert_eq!(copied, dest.len());
    dest.sort_unstable();
    let expect: Vec<i64> = (0..threads as i64 * per_thread).collect();
    assert_eq!(dest, expect);
}

#[test]
fn stress_snapshots_are_never_torn() {
    // One writer pushes consecutive integers; any consistent snapshot
    // window is therefore a contiguous descending run.
    let stream: Arc<Stream> = Arc::new(Stream::new(64, ScalarKind::I64));
    for v in 1..=64i64 {
        stream.push(v).unwrap();
    }
    let stop = Arc::new(AtomicBool::new(false));

    let writer = {
        let stream = Arc::clone(&stream);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut next = 65i64;
            while !stop.load(Ordering::Relaxed) {
                stream.push(next).unwrap();
                next += 1;
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let stream = Arc::clone(&stream);
            thread::spawn(move || {
                let mut dest = [0i64; 64];
                for _ in 0..2_000 {
                    let n = stream.read_into(&mut dest, -1, 0, None).unwrap();
                    for pair in dest[..n].windows(2) {
                        assert_eq!(pair[0], pair[1] + 1, "torn snapshot: {:?}", &dest[..n]);
                    }
                }
            })
        })
        .collect();

    for r in readers {
        r.join().unwrap();
    }
    stop.store(true, Ordering::Relaxed);
    writer.join().unwrap();
}

#[test]
fn stress_marker_sweeps_lose_nothing() {
    let total = 4_000i64;
    let stream: Arc<Stream> = Arc::new(Stream::new(total as usize, ScalarKind::I64));

    let producer = {
        let stream = Arc::clone(&stream);
        thread::spawn(move || {
            for v in 1..=total {
                stream.push(v).unwrap();
            }
        })
    };

    // Single consumer: one positioned read to set the origin, then
    // marker sweeps until every sample has been seen once.
    let mut collected: Vec<i64> = Vec::with_capacity(total as usize);
    let mut dest = vec![0i64; total as usize];
    let n = stream.read_into(&mut dest, -1, 0, None).unwrap();
    collected.extend(dest[..n].iter().rev());
    while collected.len() < total as usize {
        let n = stream.read_from_cursor_into(&mut dest, 0, None).unwrap();
        collected.extend(dest[..n].iter().rev());
        thread::yield_now();
    }
    producer.join().unwrap();

    // No gaps, no duplicates, in push order.
    let expect: Vec<i64> = (1..=total).collect();
    assert_eq!(collected, expect);
}

#[test]
fn stress_writers_progress_under_read_pressure() {
    let stream: Arc<Stream> = Arc::new(Stream::new(256, ScalarKind::F64));
    stream.push(0.0f64).unwrap();
    let stop = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..6)
        .map(|_| {
            let stream = Arc::clone(&stream);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let _ = stream.at(0).unwrap();
                }
            })
        })
        .collect();

    // The writer must finish despite the readers never pausing.
    for v in 1..=5_000 {
        stream.push(v as f64).unwrap();
    }

    stop.store(true, Ordering::Relaxed);
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(stream.at(0).unwrap().to_string(), "5000");
}

/// Random mixed workload, resizes included.
#[test]
#[ignore]
fn stress_mixed_workload_with_resizes() {
    let stream: Arc<Stream> = Arc::new(Stream::new(512, ScalarKind::I64));
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let pushes = Arc::new(AtomicU64::new(0));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let stream = Arc::clone(&stream);
            let barrier = Arc::clone(&barrier);
            let pushes = Arc::clone(&pushes);
            thread::spawn(move || {
                let mut rng = rand::thread_rng();
                barrier.wait();
                for i in 0..50_000i64 {
                    match rng.gen_range(0..100) {
                        0..=59 => {
                            stream.push(i).unwrap();
                            pushes.fetch_add(1, Ordering::Relaxed);
                        }
                        60..=79 => {
                            let _ = stream.at(rng.gen_range(-8..8)).is_ok();
                        }
                        80..=97 => {
                            let mut dest = [0i64; 32];
                            let _ = stream.read_into(&mut dest, 31, 0, None).is_ok();
                        }
                        _ => {
                            stream.set_bound(rng.gen_range(32..1024));
                        }
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert!(pushes.load(Ordering::Relaxed) > 0);
    assert!(stream.len() <= stream.bound());
    assert!(stream.at(0).is_ok());
}
