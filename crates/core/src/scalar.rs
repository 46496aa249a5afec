//! Scalar kinds and values for tickstream
//!
//! This module defines:
//! - ScalarKind: closed enumeration of the representations a stream can carry
//! - ScalarValue: tagged union holding one sample in any of those kinds
//! - Scalar: trait connecting native Rust types to their kind tag
//!
//! ## Coercion Model (Frozen)
//!
//! Conversions are a total function over kind pairs, partitioned into:
//!
//! - **Widen** (push side): `i8→i16→i32→i64`, `u8→u16→u32→u64`, `f32→f64`.
//!   A pushed value whose kind chains up to the stream's native kind is
//!   silently widened and stored.
//! - **Stringify fallback** (push side): a value that cannot widen into the
//!   native kind is rendered to its canonical string form and retried
//!   exactly once as a string. The second non-widening attempt is a
//!   `Type` error; the fallback never recurses.
//! - **Narrow** (read side): requesting kind R against native kind N
//!   succeeds iff N is reachable from R walking the chain downward
//!   (`i64→i32→i16→i8`, unsigned alike, `f64→f32`). The stored value is
//!   then cast up to R, which is lossless.
//! - **Stringify** (read side): requesting strings always succeeds, for
//!   every native kind.
//!
//! Cross-family requests (signed vs. unsigned vs. float) and numeric
//! requests against a string-native stream have no defined path and fail
//! with a `Type` error.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of representations a stream can natively carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit IEEE-754 float
    F32,
    /// 64-bit IEEE-754 float
    F64,
    /// UTF-8 string
    String,
}

impl ScalarKind {
    /// Next kind up the lossless widening chain, if any.
    ///
    /// `i64`, `u64`, `f64` and `String` are chain terminals.
    pub fn widen_step(self) -> Option<ScalarKind> {
        match self {
            ScalarKind::I8 => Some(ScalarKind::I16),
            ScalarKind::I16 => Some(ScalarKind::I32),
            ScalarKind::I32 => Some(ScalarKind::I64),
            ScalarKind::U8 => Some(ScalarKind::U16),
            ScalarKind::U16 => Some(ScalarKind::U32),
            ScalarKind::U32 => Some(ScalarKind::U64),
            ScalarKind::F32 => Some(ScalarKind::F64),
            ScalarKind::I64 | ScalarKind::U64 | ScalarKind::F64 | ScalarKind::String => None,
        }
    }

    /// Next kind down the narrowing chain, if any.
    ///
    /// `i8`, `u8` and `f32` are chain terminals: a read request walking
    /// into them without meeting the native kind has no defined path.
    pub fn narrow_step(self) -> Option<ScalarKind> {
        match self {
            ScalarKind::I64 => Some(ScalarKind::I32),
            ScalarKind::I32 => Some(ScalarKind::I16),
            ScalarKind::I16 => Some(ScalarKind::I8),
            ScalarKind::U64 => Some(ScalarKind::U32),
            ScalarKind::U32 => Some(ScalarKind::U16),
            ScalarKind::U16 => Some(ScalarKind::U8),
            ScalarKind::F64 => Some(ScalarKind::F32),
            ScalarKind::I8 | ScalarKind::U8 | ScalarKind::F32 | ScalarKind::String => None,
        }
    }

    /// True if this kind reaches `native` by walking the widening chain.
    pub fn widens_to(self, native: ScalarKind) -> bool {
        let mut kind = self;
        while let Some(wider) = kind.widen_step() {
            if wider == native {
                return true;
            }
            kind = wider;
        }
        false
    }

    /// True if a stream with this native kind can serve reads of
    /// `requested` (not counting the always-available string form).
    pub fn readable_as(self, requested: ScalarKind) -> bool {
        if requested == self || requested == ScalarKind::String {
            return true;
        }
        let mut kind = requested;
        while let Some(narrower) = kind.narrow_step() {
            if narrower == self {
                return true;
            }
            kind = narrower;
        }
        false
    }

    /// The value used to pre-fill physical buffer slots of this kind.
    pub fn default_value(self) -> ScalarValue {
        match self {
            ScalarKind::I8 => ScalarValue::I8(0),
            ScalarKind::I16 => ScalarValue::I16(0),
            ScalarKind::I32 => ScalarValue::I32(0),
            ScalarKind::I64 => ScalarValue::I64(0),
            ScalarKind::U8 => ScalarValue::U8(0),
            ScalarKind::U16 => ScalarValue::U16(0),
            ScalarKind::U32 => ScalarValue::U32(0),
            ScalarKind::U64 => ScalarValue::U64(0),
            ScalarKind::F32 => ScalarValue::F32(0.0),
            ScalarKind::F64 => ScalarValue::F64(0.0),
            ScalarKind::String => ScalarValue::String(String::new()),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::String => "string",
        };
        write!(f, "{}", name)
    }
}

/// One sample in any of the supported representations.
///
/// Carries its originating kind as the variant tag. Equality is
/// per-variant: different kinds are never equal, and float variants
/// follow IEEE-754 (`NaN != NaN`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    /// 8-bit signed sample
    I8(i8),
    /// 16-bit signed sample
    I16(i16),
    /// 32-bit signed sample
    I32(i32),
    /// 64-bit signed sample
    I64(i64),
    /// 8-bit unsigned sample
    U8(u8),
    /// 16-bit unsigned sample
    U16(u16),
    /// 32-bit unsigned sample
    U32(u32),
    /// 64-bit unsigned sample
    U64(u64),
    /// 32-bit float sample
    F32(f32),
    /// 64-bit float sample
    F64(f64),
    /// String sample
    String(String),
}

impl ScalarValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::I8(_) => ScalarKind::I8,
            ScalarValue::I16(_) => ScalarKind::I16,
            ScalarValue::I32(_) => ScalarKind::I32,
            ScalarValue::I64(_) => ScalarKind::I64,
            ScalarValue::U8(_) => ScalarKind::U8,
            ScalarValue::U16(_) => ScalarKind::U16,
            ScalarValue::U32(_) => ScalarKind::U32,
            ScalarValue::U64(_) => ScalarKind::U64,
            ScalarValue::F32(_) => ScalarKind::F32,
            ScalarValue::F64(_) => ScalarKind::F64,
            ScalarValue::String(_) => ScalarKind::String,
        }
    }

    /// Signed payload, when this is a signed variant.
    fn signed(&self) -> Option<i64> {
        match self {
            ScalarValue::I8(v) => Some(i64::from(*v)),
            ScalarValue::I16(v) => Some(i64::from(*v)),
            ScalarValue::I32(v) => Some(i64::from(*v)),
            ScalarValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Unsigned payload, when this is an unsigned variant.
    fn unsigned(&self) -> Option<u64> {
        match self {
            ScalarValue::U8(v) => Some(u64::from(*v)),
            ScalarValue::U16(v) => Some(u64::from(*v)),
            ScalarValue::U32(v) => Some(u64::from(*v)),
            ScalarValue::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload, when this is a float variant.
    fn float(&self) -> Option<f64> {
        match self {
            ScalarValue::F32(v) => Some(f64::from(*v)),
            ScalarValue::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Cast this value up its family chain to `target`.
    ///
    /// Only valid when `target` is at or above this value's kind within
    /// the same family; callers validate reachability first.
    fn widened_to(&self, target: ScalarKind) -> Option<ScalarValue> {
        Some(match target {
            ScalarKind::I16 => ScalarValue::I16(self.signed()? as i16),
            ScalarKind::I32 => ScalarValue::I32(self.signed()? as i32),
            ScalarKind::I64 => ScalarValue::I64(self.signed()?),
            ScalarKind::U16 => ScalarValue::U16(self.unsigned()? as u16),
            ScalarKind::U32 => ScalarValue::U32(self.unsigned()? as u32),
            ScalarKind::U64 => ScalarValue::U64(self.unsigned()?),
            ScalarKind::F64 => ScalarValue::F64(self.float()?),
            _ => return None,
        })
    }

    /// Push-side coercion of this value into a stream's native kind.
    ///
    /// Widens along the family chain when possible; otherwise falls back
    /// to the canonical string form and retries exactly once. The second
    /// consecutive non-widening attempt is a `Type` error.
    pub fn coerce_push(self, native: ScalarKind) -> Result<ScalarValue> {
        let from = self.kind();
        if from == native {
            return Ok(self);
        }
        if from.widens_to(native) {
            if let Some(widened) = self.widened_to(native) {
                return Ok(widened);
            }
        }
        // Bounded stringify fallback: succeeds only on string-native
        // streams, since a string retried anywhere else cannot widen.
        if native == ScalarKind::String {
            return Ok(ScalarValue::String(self.to_string()));
        }
        Err(Error::Type {
            from,
            to: native,
            operation: "push",
        })
    }

    /// Read-side conversion of a stored native value into `requested`.
    pub fn convert_to(&self, requested: ScalarKind) -> Result<ScalarValue> {
        let native = self.kind();
        if requested == native {
            return Ok(self.clone());
        }
        if requested == ScalarKind::String {
            return Ok(ScalarValue::String(self.to_string()));
        }
        if native.readable_as(requested) {
            if let Some(cast) = self.widened_to(requested) {
                return Ok(cast);
            }
        }
        Err(Error::Type {
            from: native,
            to: requested,
            operation: "read",
        })
    }

    /// Canonical string form truncated to at most `width` bytes,
    /// never splitting a UTF-8 sequence.
    pub fn to_truncated_string(&self, width: usize) -> String {
        let full = self.to_string();
        if full.len() <= width {
            return full;
        }
        let mut end = width;
        while end > 0 && !full.is_char_boundary(end) {
            end -= 1;
        }
        full[..end].to_string()
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::I8(v) => write!(f, "{}", v),
            ScalarValue::I16(v) => write!(f, "{}", v),
            ScalarValue::I32(v) => write!(f, "{}", v),
            ScalarValue::I64(v) => write!(f, "{}", v),
            ScalarValue::U8(v) => write!(f, "{}", v),
            ScalarValue::U16(v) => write!(f, "{}", v),
            ScalarValue::U32(v) => write!(f, "{}", v),
            ScalarValue::U64(v) => write!(f, "{}", v),
            ScalarValue::F32(v) => write!(f, "{}", v),
            ScalarValue::F64(v) => write!(f, "{}", v),
            ScalarValue::String(v) => write!(f, "{}", v),
        }
    }
}

/// Native Rust types that map onto a [`ScalarKind`].
///
/// Read paths use this to copy out of a stream into typed buffers once
/// the kind-level conversion has been validated.
pub trait Scalar: Sized + Clone {
    /// The kind tag for this type.
    const KIND: ScalarKind;

    /// Wrap into the exchange representation.
    fn into_value(self) -> ScalarValue;

    /// Unwrap from the exchange representation; `None` on a kind
    /// mismatch (callers convert first).
    fn from_value(value: ScalarValue) -> Option<Self>;
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident) => {
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$variant;

            fn into_value(self) -> ScalarValue {
                ScalarValue::$variant(self)
            }

            fn from_value(value: ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }

        impl From<$ty> for ScalarValue {
            fn from(v: $ty) -> Self {
                ScalarValue::$variant(v)
            }
        }
    };
}

impl_scalar!(i8, I8);
impl_scalar!(i16, I16);
impl_scalar!(i32, I32);
impl_scalar!(i64, I64);
impl_scalar!(u8, U8);
impl_scalar!(u16, U16);
impl_scalar!(u32, U32);
impl_scalar!(u64, U64);
impl_scalar!(f32, F32);
impl_scalar!(f64, F64);
impl_scalar!(String, String);

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}
