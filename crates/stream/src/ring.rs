//! Bounded most-recent-first ring buffer
//!
//! ## Design
//!
//! 1. **Fixed physical length**: the backing deque always holds exactly
//!    `bound` slots; slots past the logical count hold a fill value
//!    supplied at construction. Push is therefore always push-front plus
//!    pop-back, O(1), with no occupancy branching.
//!
//! 2. **Logical count**: grows by one per push until it reaches the
//!    bound, never beyond. Range reads are clamped to the count so they
//!    never expose fill slots; single-slot access performs the physical
//!    check only (callers of `slot` accept seeing the fill value).
//!
//! 3. **Python-style indexing**: negative begin/end indices gain the
//!    physical capacity before validation, so `-1` names the oldest
//!    retained slot.
//!
//! The same type serves as the secondary channel: the stream pushes
//! both buffers in the same call, so index i of each always refers to
//! the same sample and the logical counts stay equal by construction.

use std::collections::VecDeque;
use tickstream_core::{clamp_bound, Error, Result};

/// Fixed-capacity deque ordered most-recent-first.
#[derive(Debug, Clone)]
pub struct RingBuffer<T: Clone> {
    slots: VecDeque<T>,
    bound: usize,
    count: usize,
    fill: T,
}

/// Index-aligned auxiliary buffer; identical mechanics, driven by the
/// same push call as the primary.
pub type SecondaryChannel<T> = RingBuffer<T>;

impl<T: Clone> RingBuffer<T> {
    /// Create a buffer with `bound` physical slots pre-filled with
    /// `fill`. The bound is clamped to [`tickstream_core::MAX_BOUND`].
    pub fn new(bound: usize, fill: T) -> Self {
        let bound = clamp_bound(bound);
        let mut slots = VecDeque::with_capacity(bound);
        slots.resize(bound, fill.clone());
        Self {
            slots,
            bound,
            count: 0,
            fill,
        }
    }

    /// Physical capacity.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Logical sample count (≤ bound).
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when no sample has been retained.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Insert at the front, evicting the oldest slot.
    pub fn push(&mut self, value: T) {
        self.slots.push_front(value);
        self.slots.pop_back();
        if self.count < self.bound {
            self.count += 1;
        }
    }

    /// Change the physical capacity, truncating the logical count when
    /// shrinking. Returns the (clamped) new bound.
    pub fn resize(&mut self, new_bound: usize) -> usize {
        let new_bound = clamp_bound(new_bound);
        self.slots.resize(new_bound, self.fill.clone());
        if new_bound < self.count {
            self.count = new_bound;
        }
        self.bound = new_bound;
        new_bound
    }

    /// Physical-length invariant check. A mismatch means internal
    /// corruption, not caller error.
    fn check_physical(&self) -> Result<()> {
        if self.slots.len() != self.bound {
            return Err(Error::SizeViolation {
                bound: self.bound,
                actual: self.slots.len(),
            });
        }
        Ok(())
    }

    /// Normalize a single index. Index 0 is the fast path: no range
    /// arithmetic, just the physical checks.
    pub fn normalize_index(&self, index: i64) -> Result<usize> {
        self.check_physical()?;
        if index == 0 {
            if self.bound == 0 {
                return Err(Error::IndexOutOfRange {
                    size: 0,
                    beg: 0,
                    end: 0,
                });
            }
            return Ok(0);
        }
        let size = self.bound as i64;
        let adj = if index < 0 { index + size } else { index };
        if adj < 0 || adj >= size {
            return Err(Error::IndexOutOfRange {
                size: self.bound,
                beg: 0,
                end: adj,
            });
        }
        Ok(adj as usize)
    }

    /// Normalize an inclusive `[beg, end]` range.
    pub fn normalize_range(&self, beg: i64, end: i64) -> Result<(usize, usize)> {
        self.check_physical()?;
        let size = self.bound as i64;
        let end = if end < 0 { end + size } else { end };
        let beg = if beg < 0 { beg + size } else { beg };
        if beg < 0 || end < 0 || beg >= size || end >= size {
            return Err(Error::IndexOutOfRange {
                size: self.bound,
                beg,
                end,
            });
        }
        if beg > end {
            return Err(Error::InvalidArgument(format!(
                "beg index {} > end index {}",
                beg, end
            )));
        }
        Ok((beg as usize, end as usize))
    }

    /// Clone out one slot by normalized index. May observe the fill
    /// value when `idx >= len()`.
    pub fn slot(&self, idx: usize) -> T {
        self.slots[idx].clone()
    }

    /// Iterate the normalized window `[beg, end]`, clamped to at most
    /// `max` elements and never past the logical count.
    pub fn iter_window(&self, beg: usize, end: usize, max: usize) -> impl Iterator<Item = &T> {
        let stop = beg
            .saturating_add(max)
            .min(end + 1)
            .min(self.count)
            .max(beg);
        self.slots.iter().take(stop).skip(beg)
    }

    /// Copy the normalized window into `dest`; returns elements copied.
    pub fn copy_range_into(&self, dest: &mut [T], beg: usize, end: usize) -> usize {
        let mut copied = 0;
        for (offset, slot) in self.iter_window(beg, end, dest.len()).enumerate() {
            dest[offset] = slot.clone();
            copied += 1;
        }
        copied
    }

    /// Clone the normalized window out as a vector.
    pub fn range_vec(&self, beg: usize, end: usize) -> Vec<T> {
        self.iter_window(beg, end, usize::MAX).cloned().collect()
    }
}
