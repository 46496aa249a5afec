//! Stream: bounded, thread-safe, time-ordered sample buffer
//!
//! ## Design
//!
//! One `Stream` composes a primary [`RingBuffer`] of native scalars, an
//! optional index-aligned [`SecondaryChannel`], one [`Cursor`], and one
//! [`WriterPreferenceLock`] serializing everything. Index 0 is the most
//! recent sample; index `len() - 1` the oldest retained.
//!
//! 1. **Push coercion**: a pushed value is widened into the stream's
//!    native kind, or falls back to its string form exactly once (see
//!    `tickstream_core::scalar`). Coercion happens before the lock is
//!    taken; the buffer only ever stores native-kind values.
//!
//! 2. **Reads position the cursor**: every successful ranged read
//!    (single index, vector extraction, paired read, ranged copy) sets
//!    the cursor to `beg - 1` after the read completes, so marker reads
//!    resume exactly where the last read left off. Failed reads never
//!    move it.
//!
//! 3. **Exclusive snapshots**: the whole of every operation runs under
//!    the lock, so each read observes a consistent snapshot and pushes
//!    are totally ordered by lock arrival.
//!
//! ## Single-cursor limitation
//!
//! The cursor belongs to the logical stream, not to a reader. Readers
//! racing marker reads against one shared `Arc<Stream>` each reposition
//! the same cursor and the last write wins; callers needing independent
//! sweep positions should clone the stream (clones deep-copy buffers
//! and cursor) or coordinate externally.

use crate::cursor::Cursor;
use crate::ring::{RingBuffer, SecondaryChannel};
use tickstream_concurrency::WriterPreferenceLock;
use tickstream_core::{Error, Result, Scalar, ScalarKind, ScalarValue, Timestamp};
use tracing::{debug, trace};

/// Internal buffered state, guarded as one unit.
#[derive(Debug, Clone)]
struct StreamState<S: Clone> {
    primary: RingBuffer<ScalarValue>,
    secondary: Option<SecondaryChannel<S>>,
    cursor: Cursor,
}

/// Bounded, thread-safe, most-recent-first sample buffer with an
/// optional secondary attribute per sample.
///
/// `S` is the secondary attribute type, [`Timestamp`] by default.
pub struct Stream<S = Timestamp>
where
    S: Clone + Default,
{
    native: ScalarKind,
    uses_secondary: bool,
    state: WriterPreferenceLock<StreamState<S>>,
}

impl<S> Stream<S>
where
    S: Clone + Default,
{
    /// Create a stream retaining at most `bound` samples of `native`
    /// kind, with no secondary channel. The bound is clamped to
    /// [`tickstream_core::MAX_BOUND`].
    pub fn new(bound: usize, native: ScalarKind) -> Self {
        Self::build(bound, native, false)
    }

    /// Create a stream that also stores one secondary attribute per
    /// sample, index-aligned with the primary values. The configuration
    /// is fixed for the stream's lifetime.
    pub fn with_secondary(bound: usize, native: ScalarKind) -> Self {
        Self::build(bound, native, true)
    }

    fn build(bound: usize, native: ScalarKind, uses_secondary: bool) -> Self {
        let primary = RingBuffer::new(bound, native.default_value());
        let secondary = if uses_secondary {
            Some(RingBuffer::new(bound, S::default()))
        } else {
            None
        };
        Self {
            native,
            uses_secondary,
            state: WriterPreferenceLock::new(StreamState {
                primary,
                secondary,
                cursor: Cursor::unset(),
            }),
        }
    }

    /// The scalar kind this stream natively stores.
    pub fn native_kind(&self) -> ScalarKind {
        self.native
    }

    /// Whether a secondary channel was configured at construction.
    pub fn uses_secondary(&self) -> bool {
        self.uses_secondary
    }

    /// Current physical capacity.
    pub fn bound(&self) -> usize {
        self.state.read().primary.bound()
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.state.read().primary.len()
    }

    /// True when no sample has been retained yet.
    pub fn is_empty(&self) -> bool {
        self.state.read().primary.is_empty()
    }

    /// Current marker position, if any positioned read has occurred.
    pub fn marker_position(&self) -> Option<i64> {
        self.state.read().cursor.position()
    }

    /// Change the physical capacity; shrinking truncates the retained
    /// samples to the newest `new_bound`. Exclusive operation on the
    /// producer lock path; never invoked implicitly. Returns the
    /// clamped bound now in effect.
    pub fn set_bound(&self, new_bound: usize) -> usize {
        let mut st = self.state.write();
        let old_len = st.primary.len();
        let bound = st.primary.resize(new_bound);
        if let Some(chan) = st.secondary.as_mut() {
            chan.resize(new_bound);
        }
        st.cursor.clamp_to(bound);
        if st.primary.len() < old_len {
            debug!(
                bound,
                truncated_to = st.primary.len(),
                "stream shrunk below logical count"
            );
        }
        bound
    }

    /// Push one sample, evicting the oldest retained slot.
    ///
    /// The value is coerced into the native kind per the widening
    /// rules; on a secondary-channel stream the attribute defaults.
    pub fn push(&self, value: impl Into<ScalarValue>) -> Result<()> {
        self.push_impl(value.into(), None)
    }

    /// Push one sample together with its secondary attribute.
    ///
    /// On a stream without a secondary channel the attribute is
    /// discarded, matching the uniform producer interface.
    pub fn push_with(&self, value: impl Into<ScalarValue>, secondary: S) -> Result<()> {
        self.push_impl(value.into(), Some(secondary))
    }

    fn push_impl(&self, value: ScalarValue, secondary: Option<S>) -> Result<()> {
        let offered = value.kind();
        let value = value.coerce_push(self.native)?;
        if value.kind() != offered && value.kind() == ScalarKind::String {
            trace!(offered = %offered, "push fell back to string representation");
        }

        let mut st = self.state.write();
        st.primary.push(value);
        if let Some(chan) = st.secondary.as_mut() {
            chan.push(secondary.unwrap_or_default());
        }
        let bound = st.primary.bound();
        st.cursor.advance(bound);
        Ok(())
    }

    /// Single sample by index (0 = most recent, negative = from the
    /// oldest end), returned in the native kind. Positions the cursor
    /// at `index - 1`.
    ///
    /// A physically valid index at or past `len()` returns the native
    /// default: single access checks the physical range only.
    pub fn at(&self, index: i64) -> Result<ScalarValue> {
        let mut st = self.state.read();
        let idx = st.primary.normalize_index(index)?;
        let value = st.primary.slot(idx);
        st.cursor.mark_before(idx);
        Ok(value)
    }

    /// Sample plus secondary attribute at one index. On a stream
    /// without a secondary channel the attribute is `S::default()`.
    pub fn pair_at(&self, index: i64) -> Result<(ScalarValue, S)> {
        let mut st = self.state.read();
        let idx = st.primary.normalize_index(index)?;
        let value = st.primary.slot(idx);
        let sec = match st.secondary.as_ref() {
            Some(chan) => chan.slot(idx),
            None => S::default(),
        };
        st.cursor.mark_before(idx);
        Ok((value, sec))
    }

    /// Secondary attribute at one index. Fails with `InvalidArgument`
    /// on a stream without a secondary channel.
    pub fn secondary_at(&self, index: i64) -> Result<S> {
        let mut st = self.state.read();
        let (idx, sec) = {
            let chan = st.secondary.as_ref().ok_or_else(no_secondary)?;
            let idx = chan.normalize_index(index)?;
            (idx, chan.slot(idx))
        };
        st.cursor.mark_before(idx);
        Ok(sec)
    }

    /// Copy the inclusive window `[beg, end]` into `dest`, converting
    /// to the requested scalar type; returns the number of elements
    /// copied (clamped by `dest.len()` and by the retained count).
    ///
    /// `secondary` receives the index-aligned attributes when supplied
    /// and the stream has a secondary channel; it is left untouched
    /// otherwise.
    pub fn read_into<T: Scalar>(
        &self,
        dest: &mut [T],
        end: i64,
        beg: i64,
        secondary: Option<&mut [S]>,
    ) -> Result<usize> {
        self.check_readable(T::KIND)?;
        let mut st = self.state.read();
        Self::ranged_copy(&mut st, dest, end, beg, secondary)
    }

    /// Copy the inclusive window `[beg, end]` into `dest` as canonical
    /// strings, each truncated to at most `width` bytes. Succeeds for
    /// every native kind.
    pub fn read_strings_into(
        &self,
        dest: &mut [String],
        width: usize,
        end: i64,
        beg: i64,
        secondary: Option<&mut [S]>,
    ) -> Result<usize> {
        let mut st = self.state.read();
        Self::ranged_copy_strings(&mut st, dest, width, end, beg, secondary)
    }

    /// Everything the last positioned read has not yet seen, converted
    /// to the requested type. Requires the cursor to be set; sweeps
    /// compose with no gap or overlap.
    ///
    /// Returns 0 (and leaves the cursor in place) when nothing newer
    /// than the mark exists.
    pub fn read_from_cursor_into<T: Scalar>(
        &self,
        dest: &mut [T],
        beg: i64,
        secondary: Option<&mut [S]>,
    ) -> Result<usize> {
        self.check_readable(T::KIND)?;
        let mut st = self.state.read();
        let Some((end, beg)) = Self::cursor_window(&st, beg)? else {
            return Ok(0);
        };
        Self::ranged_copy(&mut st, dest, end, beg, secondary)
    }

    /// String-form variant of [`Stream::read_from_cursor_into`].
    pub fn read_strings_from_cursor_into(
        &self,
        dest: &mut [String],
        width: usize,
        beg: i64,
        secondary: Option<&mut [S]>,
    ) -> Result<usize> {
        let mut st = self.state.read();
        let Some((end, beg)) = Self::cursor_window(&st, beg)? else {
            return Ok(0);
        };
        Self::ranged_copy_strings(&mut st, dest, width, end, beg, secondary)
    }

    /// Extract the inclusive window `[beg, end]` as native values.
    pub fn to_vec(&self, end: i64, beg: i64) -> Result<Vec<ScalarValue>> {
        let mut st = self.state.read();
        let (b, e) = st.primary.normalize_range(beg, end)?;
        let values = st.primary.range_vec(b, e);
        st.cursor.mark_before(b);
        Ok(values)
    }

    /// Extract the inclusive window `[beg, end]` of secondary
    /// attributes. On a stream without a secondary channel this yields
    /// default attributes of the window's retained length and does not
    /// move the cursor.
    pub fn secondary_to_vec(&self, end: i64, beg: i64) -> Result<Vec<S>> {
        let mut st = self.state.read();
        let (b, e) = st.primary.normalize_range(beg, end)?;
        if let Some(values) = st.secondary.as_ref().map(|chan| chan.range_vec(b, e)) {
            st.cursor.mark_before(b);
            return Ok(values);
        }
        let len = (e + 1 - b).min(st.primary.len());
        Ok(vec![S::default(); len])
    }

    fn check_readable(&self, requested: ScalarKind) -> Result<()> {
        if self.native.readable_as(requested) {
            Ok(())
        } else {
            Err(Error::Type {
                from: self.native,
                to: requested,
                operation: "read",
            })
        }
    }

    /// Resolve a marker read into a concrete `(end, beg)` window.
    /// `Ok(None)` means the mark is set but nothing newer exists.
    fn cursor_window(st: &StreamState<S>, beg: i64) -> Result<Option<(i64, i64)>> {
        let pos = st.cursor.position().ok_or(Error::UnsetMarker)?;
        let bound = st.primary.bound() as i64;
        let beg = if beg < 0 { beg + bound } else { beg };
        if pos < beg {
            return Ok(None);
        }
        Ok(Some((pos, beg)))
    }

    fn ranged_copy<T: Scalar>(
        st: &mut StreamState<S>,
        dest: &mut [T],
        end: i64,
        beg: i64,
        secondary: Option<&mut [S]>,
    ) -> Result<usize> {
        let (b, e) = st.primary.normalize_range(beg, end)?;

        let mut copied = 0;
        for (offset, slot) in st.primary.iter_window(b, e, dest.len()).enumerate() {
            let converted = slot.convert_to(T::KIND)?;
            let native = converted.kind();
            dest[offset] = T::from_value(converted).ok_or(Error::Type {
                from: native,
                to: T::KIND,
                operation: "read",
            })?;
            copied += 1;
        }

        if let (Some(sec_dest), Some(chan)) = (secondary, st.secondary.as_ref()) {
            chan.copy_range_into(sec_dest, b, e);
        }

        st.cursor.mark_before(b);
        Ok(copied)
    }

    fn ranged_copy_strings(
        st: &mut StreamState<S>,
        dest: &mut [String],
        width: usize,
        end: i64,
        beg: i64,
        secondary: Option<&mut [S]>,
    ) -> Result<usize> {
        let (b, e) = st.primary.normalize_range(beg, end)?;

        let mut copied = 0;
        for (offset, slot) in st.primary.iter_window(b, e, dest.len()).enumerate() {
            dest[offset] = slot.to_truncated_string(width);
            copied += 1;
        }

        if let (Some(sec_dest), Some(chan)) = (secondary, st.secondary.as_ref()) {
            chan.copy_range_into(sec_dest, b, e);
        }

        st.cursor.mark_before(b);
        Ok(copied)
    }
}

/// Deep copy: the clone owns fresh buffers, a fresh lock, and an
/// independent cursor reflecting the original's position at clone
/// time. Duplicated handles never alias read-sweep state; share one
/// logical stream through `Arc<Stream>` instead.
impl<S> Clone for Stream<S>
where
    S: Clone + Default,
{
    fn clone(&self) -> Self {
        let snapshot = self.state.read().clone();
        Self {
            native: self.native,
            uses_secondary: self.uses_secondary,
            state: WriterPreferenceLock::new(snapshot),
        }
    }
}

fn no_secondary() -> Error {
    Error::InvalidArgument("stream does not use a secondary channel".to_string())
}
