// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Coverage accumulation.
//!
//! Converts rasterizer deltas and caller masks into 8-bit per-pixel coverage.

/// Running coverage that means "fully covered".
pub const FULL_COVERAGE: i32 = 256;

/// A 256-entry LCD gamma lookup table.
///
/// Maps a sub-pixel coverage byte `v` to `255 * (v / 255) ^ (1 / gamma)`.
#[derive(Clone, PartialEq)]
pub struct LcdGammaTable {
    gamma: f32,
    table: [u8; 256],
}

impl LcdGammaTable {
    /// Creates a new table.
    ///
    /// Gamma must be finite and positive. Otherwise an identity table is created.
    pub fn new(gamma: f32) -> Self {
        if !(gamma.is_finite() && gamma > 0.0) {
            log::warn!("LCD gamma {} is invalid. Using 1.0 instead", gamma);
            return Self::identity();
        }

        if gamma == 1.0 {
            return Self::identity();
        }

        let inv = 1.0 / f64::from(gamma);
        let mut table = [0; 256];
        for (i, v) in table.iter_mut().enumerate() {
            let n = (i as f64 / 255.0).powf(inv);
            *v = (n * 255.0 + 0.5).min(255.0) as u8;
        }

        LcdGammaTable { gamma, table }
    }

    fn identity() -> Self {
        let mut table = [0; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }

        LcdGammaTable { gamma: 1.0, table }
    }

    /// Returns the gamma this table was built for.
    #[inline]
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Maps a single coverage byte.
    #[inline]
    pub fn apply(&self, v: u8) -> u8 {
        self.table[usize::from(v)]
    }
}

impl Default for LcdGammaTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Debug for LcdGammaTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcdGammaTable").field("gamma", &self.gamma).finish()
    }
}

#[inline]
fn map_coverage(a: i32, alpha_map: Option<&[u8]>) -> u8 {
    match alpha_map {
        Some(map) if !map.is_empty() => {
            map[(a.max(0) as usize).min(map.len() - 1)]
        }
        _ => {
            let a = a.max(0).min(FULL_COVERAGE);
            (a - (a >> 8)) as u8
        }
    }
}

/// Accumulates a dense delta row into `out` and zeroes the consumed deltas.
///
/// `deltas[i]` is the coverage change at column `i` of the row. Columns before
/// `skip` are summed but not written, columns past `skip + out.len()` are
/// only cleared.
/// One extra trailing delta (`deltas[width]`) is cleared when present, since
/// rasterizers put the closing edge of the last span there.
pub(crate) fn accumulate_dense(
    deltas: &mut [i32],
    width: usize,
    skip: usize,
    alpha_map: Option<&[u8]>,
    out: &mut [u8],
) {
    let mut a = 0i32;
    for (i, d) in deltas.iter().take(width).enumerate() {
        a = a.saturating_add(*d);
        if let Some(o) = i.checked_sub(skip).and_then(|i| out.get_mut(i)) {
            *o = map_coverage(a, alpha_map);
        }
    }

    let end = deltas.len().min(width + 1);
    for d in &mut deltas[..end] {
        *d = 0;
    }
}

/// Accumulates `(column, delta)` pairs into `out`.
///
/// Pairs must be sorted by column. Columns are relative to the row start,
/// pairs at or past `width` are ignored. `skip` works as in [`accumulate_dense`].
pub(crate) fn accumulate_sparse(
    deltas: &[(u32, i32)],
    width: usize,
    skip: usize,
    alpha_map: Option<&[u8]>,
    out: &mut [u8],
) {
    let mut a = 0i32;
    let mut next = deltas.iter().peekable();
    for i in 0..width {
        while let Some((col, d)) = next.peek() {
            if *col as usize > i {
                break;
            }

            a = a.saturating_add(*d);
            next.next();
        }

        if let Some(o) = i.checked_sub(skip).and_then(|i| out.get_mut(i)) {
            *o = map_coverage(a, alpha_map);
        }
    }
}

/// Copies LCD coverage channels through the gamma table.
///
/// The first `lead` channels of `out` and any channel past the end of `src`
/// get no coverage.
pub(crate) fn copy_lcd_row(src: &[u8], lead: usize, gamma: &LcdGammaTable, out: &mut [[u8; 3]]) {
    for (i, c) in out.iter_mut().flat_map(|o| o.iter_mut()).enumerate() {
        *c = i
            .checked_sub(lead)
            .and_then(|i| src.get(i))
            .map_or(0, |v| gamma.apply(*v));
    }
}
