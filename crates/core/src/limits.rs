//! Size limits for stream buffers
//!
//! The physical bound is hard-capped at `i32::MAX` so signed range
//! arithmetic (negative from-the-end indexing) never overflows, and the
//! default per-element width for string extraction matches the wire
//! field width of the feed layer (0xFF bytes).

/// Maximum physical capacity of any stream buffer.
pub const MAX_BOUND: usize = i32::MAX as usize;

/// Default per-element byte width for string-array extraction.
pub const STRING_FIELD_WIDTH: usize = 0xFF;

/// Clamp a requested bound to [`MAX_BOUND`].
pub fn clamp_bound(requested: usize) -> usize {
    requested.min(MAX_BOUND)
}
