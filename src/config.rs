// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// The maximum number of rows processed per batch.
pub const MAX_BATCH_ROWS: usize = 8;

/// Renderer tuning.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RenderConfig {
    /// How many full rows are generated and composited at once.
    ///
    /// Clamped to 1..=8.
    ///
    /// Default: 8
    pub batch_rows: usize,

    /// The largest number of elements any scratch buffer may grow to.
    ///
    /// Fills that need more fail with `FillError::OutOfMemory`.
    ///
    /// Default: 16M
    pub max_scratch_len: usize,

    /// Initial LCD gamma.
    ///
    /// Default: 1.0
    pub lcd_gamma: f32,
}

impl Default for RenderConfig {
    #[inline]
    fn default() -> Self {
        RenderConfig {
            batch_rows: MAX_BATCH_ROWS,
            max_scratch_len: 16 * 1024 * 1024,
            lcd_gamma: 1.0,
        }
    }
}

impl RenderConfig {
    #[inline]
    pub(crate) fn batch_rows(&self) -> usize {
        self.batch_rows.max(1).min(MAX_BATCH_ROWS)
    }
}
