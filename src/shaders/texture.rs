// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use pisces_geom::fixed::{self, HALF};
use pisces_geom::{IntRect, Transform};

use crate::blitter::FillCursor;
use crate::color::ColorU8;
use crate::PixelFormat;

/// Controls how much filtering to be done when transforming images.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FilterQuality {
    /// Nearest-neighbor. Low quality, but fastest.
    Nearest,
    /// Bilinear.
    Bilinear,
}

impl Default for FilterQuality {
    fn default() -> Self {
        FilterQuality::Nearest
    }
}

/// How a partially covered rectangle edge is treated.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EdgeMode {
    /// Keeps fractional coverage.
    Keep,
    /// Expands the edge to the pixel boundary, so the edge pixel is fully covered.
    Pad,
    /// Shrinks the edge to the pixel boundary, so the edge pixel is skipped.
    Trim,
}

impl Default for EdgeMode {
    fn default() -> Self {
        EdgeMode::Keep
    }
}

/// Per-side rectangle edge policies.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct EdgeRules {
    pub left: EdgeMode,
    pub top: EdgeMode,
    pub right: EdgeMode,
    pub bottom: EdgeMode,
}

impl EdgeRules {
    /// Keeps fractional coverage on every side.
    pub const KEEP: Self = EdgeRules::uniform(EdgeMode::Keep);

    /// Uses the same mode on every side.
    pub const fn uniform(mode: EdgeMode) -> Self {
        EdgeRules {
            left: mode,
            top: mode,
            right: mode,
            bottom: mode,
        }
    }
}

/// An image paint.
///
/// Borrows caller pixels for as long as it is set on a renderer.
#[derive(Clone, Debug)]
pub struct Texture<'a> {
    pixels: &'a [u32],
    stride: usize,
    format: PixelFormat,
    bounds: IntRect,
    transform: Transform,
    repeat: bool,
    has_alpha: bool,
    quality: FilterQuality,
    edges: EdgeRules,
}

impl<'a> Texture<'a> {
    /// Creates a new texture from packed `0xAARRGGBB` pixels.
    ///
    /// `stride` is in pixels. By default the texture has an alpha channel,
    /// is padded, uses nearest sampling and an identity transform.
    ///
    /// Returns `None` when the size is zero or `pixels` is too short.
    pub fn new(
        pixels: &'a [u32],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Option<Self> {
        let bounds = match IntRect::from_xywh(0, 0, width, height) {
            Some(v) => v,
            None => {
                log::warn!("texture has an invalid size {}x{}", width, height);
                return None;
            }
        };

        let required = stride
            .checked_mul(height as usize - 1)
            .and_then(|n| n.checked_add(width as usize));
        if stride < width as usize || required.map_or(true, |n| pixels.len() < n) {
            log::warn!("texture data is too short for {}x{} with stride {}", width, height, stride);
            return None;
        }

        Some(Texture {
            pixels,
            stride,
            format,
            bounds,
            transform: Transform::identity(),
            repeat: false,
            has_alpha: true,
            quality: FilterQuality::Nearest,
            edges: EdgeRules::KEEP,
        })
    }

    /// Sets a transform from destination pixels to texture pixels.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Enables tiling. Otherwise edge texels are replicated.
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Marks the texture as having a meaningful alpha channel.
    ///
    /// Without one, sampled alpha is forced to 255.
    pub fn with_alpha(mut self, has_alpha: bool) -> Self {
        self.has_alpha = has_alpha;
        self
    }

    /// Sets the sampling quality.
    pub fn with_quality(mut self, quality: FilterQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Sets rectangle edge policies used when filling rects with this texture.
    pub fn with_edges(mut self, edges: EdgeRules) -> Self {
        self.edges = edges;
        self
    }

    /// Restricts sampling to a sub-image.
    ///
    /// Returns `None` when `bounds` is not inside the image.
    pub fn with_bounds(mut self, bounds: IntRect) -> Option<Self> {
        if !self.bounds.contains(&bounds) {
            log::warn!("texture sub-image bounds are outside of the image");
            return None;
        }

        self.bounds = bounds;
        Some(self)
    }

    /// Returns rectangle edge policies.
    pub fn edges(&self) -> EdgeRules {
        self.edges
    }

    /// Checks that every sampled color is opaque.
    pub fn is_opaque(&self) -> bool {
        !self.has_alpha
    }

    pub(crate) fn fill(&self, cursor: &FillCursor, rows: usize, out: &mut [u32]) {
        if cursor.width == 0 {
            return;
        }

        let ts = self.transform;
        let mut quality = self.quality;
        if ts.is_translate() && fixed::fract(ts.tx) == 0 && fixed::fract(ts.ty) == 0 {
            quality = FilterQuality::Nearest;
        }

        for (row, line) in out.chunks_exact_mut(cursor.width).take(rows).enumerate() {
            // Destination columns may exceed 16.16, texel coordinates may not.
            let (u, v) = ts.map_point_f64(
                f64::from(cursor.x) + 0.5,
                f64::from(cursor.y) + row as f64 + 0.5,
            );
            let mut u = fixed::from_f64(u);
            let mut v = fixed::from_f64(v);

            for p in line {
                *p = match quality {
                    FilterQuality::Nearest => {
                        self.fetch(fixed::floor_to_i32(u), fixed::floor_to_i32(v))
                    }
                    FilterQuality::Bilinear => {
                        self.sample_bilinear(u.saturating_sub(HALF), v.saturating_sub(HALF))
                    }
                };

                u = u.saturating_add(ts.sx);
                v = v.saturating_add(ts.ky);
            }
        }
    }

    fn sample_bilinear(&self, u: i32, v: i32) -> u32 {
        let x0 = fixed::floor_to_i32(u);
        let y0 = fixed::floor_to_i32(v);
        let fx = (fixed::fract(u) >> 8) as u32;
        let fy = (fixed::fract(v) >> 8) as u32;

        let c00 = self.fetch(x0, y0);
        let c10 = self.fetch(x0.saturating_add(1), y0);
        let c01 = self.fetch(x0, y0.saturating_add(1));
        let c11 = self.fetch(x0.saturating_add(1), y0.saturating_add(1));

        let w00 = (256 - fx) * (256 - fy);
        let w10 = fx * (256 - fy);
        let w01 = (256 - fx) * fy;
        let w11 = fx * fy;

        let mut out = 0;
        for shift in [0, 8, 16, 24] {
            let ch = |c: u32| (c >> shift) & 0xFF;
            let sum = ch(c00) * w00 + ch(c10) * w10 + ch(c01) * w01 + ch(c11) * w11;
            out |= ((sum + 0x8000) >> 16).min(255) << shift;
        }

        out
    }

    /// Returns a premultiplied texel, wrapping or clamping into the sub-image.
    fn fetch(&self, x: i32, y: i32) -> u32 {
        let x = self.bounds.x() + wrap(x - self.bounds.x(), self.bounds.width() as i32, self.repeat);
        let y = self.bounds.y() + wrap(y - self.bounds.y(), self.bounds.height() as i32, self.repeat);

        let raw = self.pixels[y as usize * self.stride + x as usize];
        if !self.has_alpha {
            raw | 0xFF00_0000
        } else if self.format == PixelFormat::Argb8888 {
            ColorU8::from_argb(raw).premultiply().get()
        } else {
            raw
        }
    }
}

#[inline]
fn wrap(n: i32, len: i32, repeat: bool) -> i32 {
    if repeat {
        n.rem_euclid(len)
    } else {
        n.max(0).min(len - 1)
    }
}
