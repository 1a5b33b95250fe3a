// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayref::array_ref;

use crate::fixed::{self, FDot16, ONE};

/// An affine transformation matrix in 16.16 fixed point.
///
/// Maps `(x, y)` to `(sx*x + kx*y + tx, ky*x + sy*y + ty)`.
/// Paint transforms map destination space into paint space.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transform {
    pub sx: FDot16,
    pub kx: FDot16,
    pub ky: FDot16,
    pub sy: FDot16,
    pub tx: FDot16,
    pub ty: FDot16,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            sx: ONE,
            kx: 0,
            ky: 0,
            sy: ONE,
            tx: 0,
            ty: 0,
        }
    }
}

impl Transform {
    /// Creates an identity transform.
    pub fn identity() -> Self {
        Transform::default()
    }

    /// Creates a new `Transform`.
    ///
    /// We are using column-major-column-vector matrix notation, therefore it's ky-kx, not kx-ky.
    pub fn from_row(sx: FDot16, ky: FDot16, kx: FDot16, sy: FDot16, tx: FDot16, ty: FDot16) -> Self {
        Transform { sx, ky, kx, sy, tx, ty }
    }

    /// Creates a new `Transform` from floats.
    pub fn from_row_f32(sx: f32, ky: f32, kx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Transform::from_row(
            fixed::from_f32(sx),
            fixed::from_f32(ky),
            fixed::from_f32(kx),
            fixed::from_f32(sy),
            fixed::from_f32(tx),
            fixed::from_f32(ty),
        )
    }

    /// Creates a new `Transform` from a row-ordered slice of at least six values:
    /// `[sx, kx, tx, ky, sy, ty]`.
    ///
    /// Returns `None` when the slice is too short.
    pub fn from_slice(m: &[FDot16]) -> Option<Self> {
        if m.len() < 6 {
            return None;
        }

        let m = array_ref![m, 0, 6];
        Some(Transform {
            sx: m[0],
            kx: m[1],
            tx: m[2],
            ky: m[3],
            sy: m[4],
            ty: m[5],
        })
    }

    /// Creates a new translating `Transform`.
    pub fn from_translate(tx: FDot16, ty: FDot16) -> Self {
        Transform::from_row(ONE, 0, 0, ONE, tx, ty)
    }

    /// Creates a new scaling `Transform`.
    pub fn from_scale(sx: FDot16, sy: FDot16) -> Self {
        Transform::from_row(sx, 0, 0, sy, 0, 0)
    }

    /// Checks that transform is identity.
    pub fn is_identity(&self) -> bool {
        *self == Transform::default()
    }

    /// Checks that transform contains only translate.
    pub fn is_translate(&self) -> bool {
        self.sx == ONE && self.sy == ONE && self.kx == 0 && self.ky == 0
    }

    /// Returns the matrix as `f64`s: `[sx, kx, tx, ky, sy, ty]`.
    pub fn to_f64(&self) -> [f64; 6] {
        [
            fixed::to_f64(self.sx),
            fixed::to_f64(self.kx),
            fixed::to_f64(self.tx),
            fixed::to_f64(self.ky),
            fixed::to_f64(self.sy),
            fixed::to_f64(self.ty),
        ]
    }

    /// Maps a point in `f64`, without any rounding.
    pub fn map_point_f64(&self, x: f64, y: f64) -> (f64, f64) {
        let [sx, kx, tx, ky, sy, ty] = self.to_f64();
        (sx * x + kx * y + tx, ky * x + sy * y + ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::HALF;

    #[test]
    fn map() {
        let ts = Transform::from_row(2 * ONE, 0, 0, 3 * ONE, ONE, -ONE);
        assert_eq!(ts.map_point_f64(0.5, 1.0), (2.0, 2.0));

        let rot = Transform::from_row(0, ONE, -ONE, 0, 0, 0);
        assert_eq!(rot.map_point_f64(1.0, 0.0), (0.0, 1.0));
        assert_eq!(rot.map_point_f64(0.0, 1.0), (-1.0, 0.0));
    }

    #[test]
    fn from_slice() {
        let ts = Transform::from_slice(&[ONE, 0, 3 * ONE, 0, ONE, 4 * ONE]).unwrap();
        assert!(ts.is_translate());
        assert_eq!(ts, Transform::from_translate(3 * ONE, 4 * ONE));
        assert_eq!(Transform::from_slice(&[ONE; 5]), None);
    }

    #[test]
    fn from_floats() {
        let ts = Transform::from_row_f32(1.0, 0.0, 0.0, 1.0, 0.5, -0.5);
        assert_eq!(ts, Transform::from_translate(HALF, -HALF));
    }
}
