//! Resumable-read marker
//!
//! A cursor records where the last positioned read began so marker
//! reads can sweep forward through history without the caller tracking
//! indices. `None` is the explicit unset sentinel; a set cursor holds a
//! position in `[-1, bound - 1]`, where `-1` means "positioned, but
//! nothing newer than the last sweep yet".

/// Optional marker position for one logical stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor(Option<i64>);

impl Cursor {
    /// A cursor that has never been positioned.
    pub fn unset() -> Self {
        Cursor(None)
    }

    /// True once any positioned read has completed.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Current position, if set.
    pub fn position(&self) -> Option<i64> {
        self.0
    }

    /// Record a completed read that began at normalized index `beg`:
    /// the next sweep covers everything newer, i.e. up to `beg - 1`.
    pub fn mark_before(&mut self, beg: usize) {
        self.0 = Some(beg as i64 - 1);
    }

    /// A push ages every retained sample by one slot, so a set cursor
    /// follows it, saturating at the last physical slot.
    pub fn advance(&mut self, bound: usize) {
        if let Some(p) = self.0 {
            if p < bound as i64 - 1 {
                self.0 = Some(p + 1);
            }
        }
    }

    /// Keep a set cursor valid across a shrink.
    pub fn clamp_to(&mut self, bound: usize) {
        if let Some(p) = self.0 {
            let max = bound as i64 - 1;
            if p > max {
                self.0 = Some(max);
            }
        }
    }
}
