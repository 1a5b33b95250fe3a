// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! S15.16 fixed point helpers.
//!
//! Values are plain `i32`s, so they can be mixed freely with integer pixel math.

use crate::SaturateCast;

/// A 16.16 fixed point.
pub type FDot16 = i32;

/// `0.5` in 16.16.
pub const HALF: FDot16 = (1 << 16) / 2;
/// `1.0` in 16.16.
pub const ONE: FDot16 = 1 << 16;
/// The fractional part mask.
pub const FRACT_MASK: FDot16 = ONE - 1;

/// Converts an `f32` into 16.16 by decomposing its IEEE 754 representation.
///
/// The mantissa (with the implicit bit restored) is shifted by `134 - exponent`,
/// right when positive and left otherwise. Denormals and zero map to zero.
/// NaN and infinities are not treated specially. Values that do not fit saturate.
pub fn from_f32(n: f32) -> FDot16 {
    let bits = n.to_bits();
    let exponent = ((bits >> 23) & 0xFF) as i32;
    if exponent == 0 {
        return 0;
    }

    let mantissa = ((bits & 0x007F_FFFF) | 0x0080_0000) as i32;
    let shift = 134 - exponent;
    let magnitude = if shift >= 0 {
        if shift > 31 {
            0
        } else {
            mantissa >> shift
        }
    } else {
        // The mantissa has 24 significant bits, so anything above 7 overflows.
        let shift = -shift;
        if shift > 7 {
            i32::MAX
        } else {
            mantissa << shift
        }
    };

    if bits >> 31 != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Converts a 16.16 into `f32`.
#[inline]
pub fn to_f32(n: FDot16) -> f32 {
    n as f32 * (1.0 / ONE as f32)
}

/// Converts an `f64` into 16.16, rounding to nearest and saturating.
#[inline]
pub fn from_f64(n: f64) -> FDot16 {
    i32::saturate_from((n * ONE as f64).round())
}

/// Converts a 16.16 into `f64`.
#[inline]
pub fn to_f64(n: FDot16) -> f64 {
    n as f64 / ONE as f64
}

/// Converts an integer into 16.16, saturating on overflow.
#[inline]
pub fn from_i32(n: i32) -> FDot16 {
    n.saturating_mul(ONE)
}

/// Rounds towards negative infinity.
#[inline]
pub fn floor_to_i32(x: FDot16) -> i32 {
    x >> 16
}

/// Rounds towards positive infinity.
#[inline]
pub fn ceil_to_i32(x: FDot16) -> i32 {
    ((i64::from(x) + i64::from(ONE) - 1) >> 16) as i32
}

/// Rounds half up.
#[inline]
pub fn round_to_i32(x: FDot16) -> i32 {
    ((i64::from(x) + i64::from(HALF)) >> 16) as i32
}

/// Rounds down to a whole 16.16 value.
#[inline]
pub fn floor(x: FDot16) -> FDot16 {
    x & !FRACT_MASK
}

/// Rounds up to a whole 16.16 value, saturating at the largest whole value.
#[inline]
pub fn ceil(x: FDot16) -> FDot16 {
    let c = (i64::from(x) + i64::from(FRACT_MASK)) & !i64::from(FRACT_MASK);
    c.min(i64::from(i32::MAX & !FRACT_MASK)) as FDot16
}

/// Returns the fractional part. Always in `0..ONE`, also for negative values.
#[inline]
pub fn fract(x: FDot16) -> FDot16 {
    x & FRACT_MASK
}

/// Multiplies two 16.16 values.
#[inline]
pub fn mul(a: FDot16, b: FDot16) -> FDot16 {
    ((i64::from(a) * i64::from(b)) >> 16) as FDot16
}

/// Divides two 16.16 values.
///
/// Saturates on overflow. A zero `denom` saturates towards the sign of `numer`.
pub fn div(numer: FDot16, denom: FDot16) -> FDot16 {
    if denom == 0 {
        return match numer {
            0 => 0,
            n if n > 0 => i32::MAX,
            _ => i32::MIN,
        };
    }

    // The divide may exceed 32 bits. Clamp to a signed 32 bit result.
    let v = (i64::from(numer) << 16) / i64::from(denom);
    v.max(i64::from(i32::MIN)).min(i64::from(i32::MAX)) as FDot16
}

/// Maps a `0..=ONE` fraction onto `0..=255` with rounding.
#[inline]
pub fn to_coverage(x: FDot16) -> u8 {
    let x = x.max(0).min(ONE);
    ((x * 255 + HALF) >> 16) as u8
}
