// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use pisces_geom::IntRect;

/// A rectangular clip in destination pixels.
///
/// Bounds are inclusive and always lie inside the surface, so
/// `0 <= min_x <= max_x + 1 <= width` holds, and the same for `y`.
/// The clip is empty when `min_x == max_x + 1` or `min_y == max_y + 1`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ClipRect {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    surface_width: i32,
    surface_height: i32,
}

impl ClipRect {
    /// Creates a clip that covers the whole surface.
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        let surface_width = surface_width.min(i32::MAX as u32) as i32;
        let surface_height = surface_height.min(i32::MAX as u32) as i32;
        ClipRect {
            min_x: 0,
            min_y: 0,
            max_x: surface_width - 1,
            max_y: surface_height - 1,
            surface_width,
            surface_height,
        }
    }

    /// Resets the clip to the whole surface.
    pub fn reset(&mut self) {
        *self = ClipRect::new(self.surface_width as u32, self.surface_height as u32);
    }

    /// Replaces the clip with `(x, y, w, h)` intersected with the surface.
    ///
    /// A non-positive size produces an empty clip.
    pub fn set(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.reset();
        self.intersect(x, y, w, h);
    }

    /// Intersects the clip with `(x, y, w, h)`. The clip never grows.
    pub fn intersect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let x0 = i64::from(x);
        let y0 = i64::from(y);
        let x1 = x0 + i64::from(w) - 1;
        let y1 = y0 + i64::from(h) - 1;

        self.min_x = i64::from(self.min_x).max(x0) as i32;
        self.min_y = i64::from(self.min_y).max(y0) as i32;
        self.max_x = i64::from(self.max_x).min(x1).max(i64::from(i32::MIN)) as i32;
        self.max_y = i64::from(self.max_y).min(y1).max(i64::from(i32::MIN)) as i32;

        collapse(&mut self.min_x, &mut self.max_x, self.surface_width);
        collapse(&mut self.min_y, &mut self.max_y, self.surface_height);
    }

    /// Checks that nothing can be drawn.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Left edge, inclusive.
    #[inline]
    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    /// Top edge, inclusive.
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Right edge, inclusive.
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    /// Bottom edge, inclusive.
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Returns the clip as a rect.
    ///
    /// Returns `None` when the clip is empty.
    pub fn to_int_rect(&self) -> Option<IntRect> {
        if self.is_empty() {
            return None;
        }

        IntRect::from_ltrb(self.min_x, self.min_y, self.max_x + 1, self.max_y + 1)
    }

    /// Intersects `rect` with the clip.
    pub fn clip_int_rect(&self, rect: &IntRect) -> Option<IntRect> {
        self.to_int_rect()?.intersect(rect)
    }
}

// An empty range keeps its start inside the surface and ends right before it.
fn collapse(min: &mut i32, max: &mut i32, size: i32) {
    if *min > *max {
        *min = (*min).min(size);
        *max = *min - 1;
    }
}
