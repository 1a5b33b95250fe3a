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

// A focus on the circle makes the quadratic degenerate.
const MAX_FOCUS_RATIO: f64 = 0.99;

/// A two point radial gradient.
///
/// Colors are spread between the focus (`t = 0`) and the circle (`t = 1`).
#[derive(Clone, PartialEq, Debug)]
pub struct RadialGradient {
    ramp: GradientRamp,
    spread: SpreadMode,
    fx: f64,
    fy: f64,
    // Center relative to the focus.
    ex: f64,
    ey: f64,
    // r^2 - |e|^2, always positive.
    a: f64,
    transform: Transform,
}

impl RadialGradient {
    /// Creates a new radial gradient shader.
    ///
    /// The focus is moved inside the circle when it lies on or outside of it.
    /// `transform` maps destination pixels into paint space.
    ///
    /// Returns `None` when `radius` is not positive.
    pub fn new(
        cx: FDot16,
        cy: FDot16,
        fx: FDot16,
        fy: FDot16,
        radius: FDot16,
        ramp: GradientRamp,
        spread: SpreadMode,
        transform: Transform,
    ) -> Option<Self> {
        if radius <= 0 {
            log::warn!("radial gradient radius must be positive. Nothing will be rendered");
            return None;
        }

        let (cx, cy) = (fixed::to_f64(cx), fixed::to_f64(cy));
        let (mut fx, mut fy) = (fixed::to_f64(fx), fixed::to_f64(fy));
        let r = fixed::to_f64(radius);

        let max_dist = r * MAX_FOCUS_RATIO;
        let dist = ((fx - cx) * (fx - cx) + (fy - cy) * (fy - cy)).sqrt();
        if dist > max_dist {
            log::debug!("radial gradient focus was moved inside the circle");
            let scale = max_dist / dist;
            fx = cx + (fx - cx) * scale;
            fy = cy + (fy - cy) * scale;
        }

        let ex = cx - fx;
        let ey = cy - fy;

        Some(RadialGradient {
            ramp,
            spread,
            fx,
            fy,
            ex,
            ey,
            a: r * r - (ex * ex + ey * ey),
            transform,
        })
    }

    /// Checks that every produced color is opaque.
    pub fn is_opaque(&self) -> bool {
        self.ramp.is_opaque()
    }

    /// Returns the gradient parameter at a paint space point.
    pub fn parameter_at(&self, px: f64, py: f64) -> f64 {
        let dx = px - self.fx;
        let dy = py - self.fy;
        let de = dx * self.ex + dy * self.ey;
        let dd = dx * dx + dy * dy;
        (-de + (de * de + self.a * dd).sqrt()) / self.a
    }

    pub(crate) fn fill(&self, cursor: &FillCursor, rows: usize, out: &mut [u32]) {
        if cursor.width == 0 {
            return;
        }

        let [sx, _, _, ky, _, _] = self.transform.to_f64();
        for (row, line) in out.chunks_exact_mut(cursor.width).take(rows).enumerate() {
            let (mut px, mut py) = self.transform.map_point_f64(
                f64::from(cursor.x) + 0.5,
                f64::from(cursor.y) + row as f64 + 0.5,
            );
            for p in line {
                let t = fixed::from_f64(self.parameter_at(px, py));
                *p = self.ramp.lookup(t, self.spread).get();
                px += sx;
                py += ky;
            }
        }
    }
}
