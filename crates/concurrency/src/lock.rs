//! Writer-preference lock
//!
//! Mutual exclusion over owned data, biased toward the single producer.
//!
//! ## Design
//!
//! Two parking_lot mutexes: the data mutex serializing all access, and a
//! small gate tracking how many writers are currently blocked on the
//! data mutex. Acquisition paths:
//!
//! - `write()`: try-lock the data mutex without blocking; on failure,
//!   register at the gate and block. Registration is what readers
//!   observe, bounding how long a producer waits behind a read storm.
//! - `read()`: park on the gate condvar while any writer is registered,
//!   then contend for the data mutex normally.
//!
//! ## Fairness contract
//!
//! A pending writer beats every reader that arrives after it registers.
//! Among readers (and among writers) ordering falls back to
//! parking_lot's eventual fairness. This is a latency bias for the
//! producer, not a FIFO or priority scheduler.
//!
//! Both guards are exclusive: read operations on a stream update its
//! cursor, so there is no shared-access mode. The lock is deliberately
//! not re-entrant; a re-entrant lock handing out `&mut T` cannot be
//! sound, so callers acquire once and delegate to non-locking helpers.
//!
//! There is no timeout or cancellation on any blocking path.

use parking_lot::{Condvar, Mutex, MutexGuard};
use std::ops::{Deref, DerefMut};

#[derive(Default)]
struct Gate {
    waiting_writers: usize,
}

/// Exclusive lock with writer-preference acquisition, owning its data.
pub struct WriterPreferenceLock<T> {
    data: Mutex<T>,
    gate: Mutex<Gate>,
    readers_allowed: Condvar,
}

impl<T> WriterPreferenceLock<T> {
    /// Create a lock owning `value`.
    pub fn new(value: T) -> Self {
        Self {
            data: Mutex::new(value),
            gate: Mutex::new(Gate::default()),
            readers_allowed: Condvar::new(),
        }
    }

    /// Acquire on the producer path.
    ///
    /// Tries without blocking first; otherwise registers as a waiting
    /// writer (stalling new readers at the gate) and blocks until the
    /// data mutex is free.
    pub fn write(&self) -> WriteGuard<'_, T> {
        if let Some(guard) = self.data.try_lock() {
            return WriteGuard { inner: guard };
        }

        self.gate.lock().waiting_writers += 1;
        let guard = self.data.lock();
        let mut gate = self.gate.lock();
        gate.waiting_writers -= 1;
        if gate.waiting_writers == 0 {
            self.readers_allowed.notify_all();
        }
        drop(gate);

        WriteGuard { inner: guard }
    }

    /// Acquire on the reader path.
    ///
    /// Yields to any registered writer before contending for the data
    /// mutex. The guard is still exclusive (reads mutate the cursor).
    pub fn read(&self) -> ReadGuard<'_, T> {
        let mut gate = self.gate.lock();
        while gate.waiting_writers > 0 {
            self.readers_allowed.wait(&mut gate);
        }
        drop(gate);

        ReadGuard {
            inner: self.data.lock(),
        }
    }

    /// Number of writers currently blocked on acquisition.
    ///
    /// Diagnostic snapshot; may be stale the moment it returns.
    pub fn waiting_writers(&self) -> usize {
        self.gate.lock().waiting_writers
    }

    /// Consume the lock, returning the owned data.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

/// Guard for the producer path. Releases on drop.
pub struct WriteGuard<'a, T> {
    inner: MutexGuard<'a, T>,
}

impl<T> Deref for WriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for WriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

/// Guard for the reader path. Releases on drop.
pub struct ReadGuard<'a, T> {
    inner: MutexGuard<'a, T>,
}

impl<T> Deref for ReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for ReadGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}
