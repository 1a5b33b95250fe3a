// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use pisces_geom::fixed::{self, FDot16};
use pisces_geom::Transform;

use crate::blitter::FillCursor;
use crate::SpreadMode;

use super::gradient::GradientRamp;

/// A linear gradient shader.
///
/// The gradient parameter is an affine function of the destination pixel,
/// `t = a*x + b*y + c`, so stepping one column adds `a` and one row adds `b`.
#[derive(Clone, PartialEq, Debug)]
pub struct LinearGradient {
    ramp: GradientRamp,
    spread: SpreadMode,
    a: f64,
    b: f64,
    c: f64,
    dx: FDot16,
    dy: FDot16,
}

impl LinearGradient {
    /// Creates a new linear gradient shader.
    ///
    /// `(x0, y0)` and `(x1, y1)` are in paint space, `transform` maps destination
    /// pixels into paint space.
    ///
    /// Returns `None` when start and end are the same point.
    pub fn new(
        x0: FDot16,
        y0: FDot16,
        x1: FDot16,
        y1: FDot16,
        ramp: GradientRamp,
        spread: SpreadMode,
        transform: Transform,
    ) -> Option<Self> {
        let (x0, y0) = (fixed::to_f64(x0), fixed::to_f64(y0));
        let vx = fixed::to_f64(x1) - x0;
        let vy = fixed::to_f64(y1) - y0;
        let len2 = vx * vx + vy * vy;
        if len2 <= 0.0 {
            log::warn!("linear gradient has identical end points. Nothing will be rendered");
            return None;
        }

        // Project the transformed pixel onto the unit axis.
        let [sx, kx, tx, ky, sy, ty] = transform.to_f64();
        let a = (vx * sx + vy * ky) / len2;
        let b = (vx * kx + vy * sy) / len2;
        let c = (vx * (tx - x0) + vy * (ty - y0)) / len2;

        Some(LinearGradient {
            ramp,
            spread,
            a,
            b,
            c,
            dx: fixed::from_f64(a),
            dy: fixed::from_f64(b),
        })
    }

    /// Checks that every produced color is opaque.
    pub fn is_opaque(&self) -> bool {
        self.ramp.is_opaque()
    }

    /// Returns the gradient parameter at a destination point.
    pub fn parameter_at(&self, x: f64, y: f64) -> FDot16 {
        fixed::from_f64(self.a * x + self.b * y + self.c)
    }

    pub(crate) fn fill(&self, cursor: &FillCursor, rows: usize, out: &mut [u32]) {
        if cursor.width == 0 {
            return;
        }

        let mut t_row = self.parameter_at(
            f64::from(cursor.x) + 0.5,
            f64::from(cursor.y) + 0.5,
        );
        for line in out.chunks_exact_mut(cursor.width).take(rows) {
            let mut t = t_row;
            for p in line {
                *p = self.ramp.lookup(t, self.spread).get();
                t = t.saturating_add(self.dx);
            }

            t_row = t_row.saturating_add(self.dy);
        }
    }
}
