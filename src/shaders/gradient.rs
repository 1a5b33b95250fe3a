// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use pisces_geom::fixed::{self, FDot16, HALF, ONE};
use strict_num::NormalizedF32;

use crate::color::{pack_argb, ColorU8, PremultipliedColorU8};
use crate::{Color, SpreadMode};

/// Number of entries in a gradient ramp.
pub const RAMP_SIZE: usize = 256;

/// A gradient point.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GradientStop {
    pub(crate) position: NormalizedF32,
    pub(crate) color: Color,
}

impl GradientStop {
    /// Creates a new gradient point.
    ///
    /// `position` will be clamped to a 0..=1 range.
    pub fn new(position: f32, color: Color) -> Self {
        GradientStop {
            position: NormalizedF32::new_clamped(position),
            color,
        }
    }
}

/// A precomputed table of premultiplied gradient colors.
#[derive(Clone, PartialEq)]
pub struct GradientRamp {
    colors: Vec<PremultipliedColorU8>,
    is_opaque: bool,
}

impl GradientRamp {
    /// Builds a ramp from stops.
    ///
    /// Stops are sorted by position. Colors are interpolated in straight alpha
    /// and premultiplied afterwards.
    ///
    /// Returns `None` when `stops` is empty.
    pub fn from_stops(stops: &[GradientStop]) -> Option<Self> {
        if stops.is_empty() {
            return None;
        }

        let mut stops = stops.to_vec();
        stops.sort_by(|a, b| a.position.get().total_cmp(&b.position.get()));

        let mut colors = Vec::with_capacity(RAMP_SIZE);
        let mut last_u = 0.0;
        let mut last_c = ColorF64::from_color(stops[0].color);
        let mut this_u = f64::from(stops[0].position.get());
        let mut this_c = last_c;
        let mut j = 0;
        for i in 0..RAMP_SIZE {
            let u = i as f64 / (RAMP_SIZE - 1) as f64;
            while u > this_u {
                last_u = this_u;
                last_c = this_c;
                if let Some(s) = stops.get(j + 1) {
                    this_u = f64::from(s.position.get());
                    this_c = ColorF64::from_color(s.color);
                    j += 1;
                } else {
                    break;
                }
            }

            let du = this_u - last_u;
            let c = if du < 1e-9 || u > this_u {
                this_c
            } else if u < last_u {
                last_c
            } else {
                last_c.lerp(&this_c, (u - last_u) / du)
            };
            colors.push(c.to_premultiplied());
        }

        Some(GradientRamp::from_colors(colors))
    }

    /// Builds a ramp from straight alpha `0xAARRGGBB` colors spread evenly over `0..=1`.
    ///
    /// Returns `None` when `argb` is empty.
    pub fn from_argb(argb: &[u32]) -> Option<Self> {
        let stops: Vec<GradientStop> = match argb.len() {
            0 => return None,
            1 => vec![GradientStop::new(0.0, Color::from(ColorU8::from_argb(argb[0])))],
            n => argb
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    GradientStop::new(i as f32 / (n - 1) as f32, Color::from(ColorU8::from_argb(*c)))
                })
                .collect(),
        };

        GradientRamp::from_stops(&stops)
    }

    fn from_colors(colors: Vec<PremultipliedColorU8>) -> Self {
        let is_opaque = colors.iter().all(|c| c.is_opaque());
        GradientRamp { colors, is_opaque }
    }

    /// Checks that every ramp entry is opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.is_opaque
    }

    /// Returns ramp entries.
    #[inline]
    pub fn colors(&self) -> &[PremultipliedColorU8] {
        &self.colors
    }

    /// Returns the color at the parameter `t` after applying `spread`.
    #[inline]
    pub fn lookup(&self, t: FDot16, spread: SpreadMode) -> PremultipliedColorU8 {
        let t = apply_spread(t, spread);
        let idx = ((t as i64 * (RAMP_SIZE as i64 - 1) + i64::from(HALF)) >> 16) as usize;
        self.colors[idx.min(RAMP_SIZE - 1)]
    }
}

impl std::fmt::Debug for GradientRamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientRamp")
            .field("first", &self.colors[0])
            .field("last", &self.colors[RAMP_SIZE - 1])
            .field("is_opaque", &self.is_opaque)
            .finish()
    }
}

/// Maps a gradient parameter into `0..=ONE`.
///
/// `Repeat` maps whole numbers onto the ramp start, so `1.0` and `2.0` sample
/// the same color as `0.0`.
pub fn apply_spread(t: FDot16, spread: SpreadMode) -> FDot16 {
    match spread {
        SpreadMode::Pad => t.max(0).min(ONE),
        SpreadMode::Repeat => fixed::fract(t),
        SpreadMode::Reflect => {
            let m = t & (2 * ONE - 1);
            if m > ONE {
                2 * ONE - m
            } else {
                m
            }
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct ColorF64([f64; 4]);

impl ColorF64 {
    fn from_color(color: Color) -> Self {
        ColorF64([
            f64::from(color.red()),
            f64::from(color.green()),
            f64::from(color.blue()),
            f64::from(color.alpha()),
        ])
    }

    fn lerp(&self, other: &Self, a: f64) -> Self {
        fn l(x: f64, y: f64, a: f64) -> f64 {
            x * (1.0 - a) + y * a
        }

        ColorF64([
            l(self.0[0], other.0[0], a),
            l(self.0[1], other.0[1], a),
            l(self.0[2], other.0[2], a),
            l(self.0[3], other.0[3], a),
        ])
    }

    fn to_premultiplied(&self) -> PremultipliedColorU8 {
        fn to_u8(n: f64) -> u8 {
            (n.max(0.0).min(1.0) * 255.0 + 0.5) as u8
        }

        let a = self.0[3].max(0.0).min(1.0);
        PremultipliedColorU8::from_argb_unchecked(pack_argb(
            to_u8(self.0[0] * a),
            to_u8(self.0[1] * a),
            to_u8(self.0[2] * a),
            to_u8(a),
        ))
    }
}
