// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use pisces_geom::fixed::{self, FDot16, ONE};
use pisces_geom::FixedRect;

use crate::blitter::{shade_and_emit, Coverage, FillCursor, Paint};
use crate::scratch::Scratch;
use crate::surface::SurfaceView;
use crate::{BlendMode, ClipRect, EdgeMode, EdgeRules, FillError, RenderConfig};

/// Inclusive pixel range along one axis with the coverage of both ends.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
struct AxisSpan {
    from: i32,
    to: i32,
    lead: FDot16,
    trail: FDot16,
}

fn axis_span(
    start: FDot16,
    end: FDot16,
    lead_edge: EdgeMode,
    trail_edge: EdgeMode,
    clip_min: i32,
    clip_max: i32,
) -> Option<AxisSpan> {
    let start = match lead_edge {
        EdgeMode::Keep => start,
        EdgeMode::Pad => fixed::floor(start),
        EdgeMode::Trim => fixed::ceil(start),
    };
    let end = match trail_edge {
        EdgeMode::Keep => end,
        EdgeMode::Pad => fixed::ceil(end),
        EdgeMode::Trim => fixed::floor(end),
    };

    if start >= end {
        return None;
    }

    let mut from = fixed::floor_to_i32(start);
    let mut to = fixed::ceil_to_i32(end) - 1;
    let mut lead = ((i64::from(from) + 1) * i64::from(ONE) - i64::from(start)) as FDot16;
    let mut trail = (i64::from(end) - i64::from(to) * i64::from(ONE)) as FDot16;

    if from < clip_min {
        from = clip_min;
        lead = ONE;
    }

    if to > clip_max {
        to = clip_max;
        trail = ONE;
    }

    if from > to {
        return None;
    }

    if from == to {
        lead = lead + trail - ONE;
        trail = ONE;
    }

    Some(AxisSpan { from, to, lead, trail })
}

/// A rectangle resolved into clipped pixel bounds and edge coverage.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct RectSpan {
    pub x: i32,
    pub width: usize,
    pub left: FDot16,
    pub right: FDot16,
    pub y_from: i32,
    pub y_to: i32,
    pub top: FDot16,
    pub bottom: FDot16,
}

impl RectSpan {
    /// Applies edge policies and the clip.
    ///
    /// Returns `None` when nothing is left to draw.
    pub fn new(rect: &FixedRect, edges: EdgeRules, clip: &ClipRect) -> Option<Self> {
        if rect.is_empty() || clip.is_empty() {
            return None;
        }

        let h = axis_span(rect.x, rect.right(), edges.left, edges.right, clip.min_x(), clip.max_x())?;
        let v = axis_span(rect.y, rect.bottom(), edges.top, edges.bottom, clip.min_y(), clip.max_y())?;

        Some(RectSpan {
            x: h.from,
            width: (h.to - h.from + 1) as usize,
            left: h.lead,
            right: h.trail,
            y_from: v.from,
            y_to: v.to,
            top: v.lead,
            bottom: v.trail,
        })
    }

    /// Splits rows into a fractional top row, batches of full rows
    /// and a fractional bottom row.
    pub fn rows(&self, batch_rows: usize) -> RowBatches {
        RowBatches {
            state: RowState::Top,
            y: self.y_from,
            y_to: self.y_to,
            top: self.top,
            bottom: self.bottom,
            batch_rows: batch_rows.max(1),
        }
    }
}

/// A block of rows sharing one vertical coverage.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct RowBatch {
    pub y: i32,
    pub rows: usize,
    pub coverage: FDot16,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum RowState {
    Top,
    Full,
    Bottom,
    Done,
}

pub(crate) struct RowBatches {
    state: RowState,
    y: i32,
    y_to: i32,
    top: FDot16,
    bottom: FDot16,
    batch_rows: usize,
}

impl Iterator for RowBatches {
    type Item = RowBatch;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                RowState::Top => {
                    if self.y == self.y_to {
                        // Both fractions are already folded into `top`.
                        self.state = RowState::Done;
                        return Some(RowBatch { y: self.y, rows: 1, coverage: self.top });
                    }

                    self.state = RowState::Full;
                    if self.top < ONE {
                        let y = self.y;
                        self.y += 1;
                        return Some(RowBatch { y, rows: 1, coverage: self.top });
                    }
                }
                RowState::Full => {
                    let last_full = if self.bottom == ONE { self.y_to } else { self.y_to - 1 };
                    if self.y > last_full {
                        self.state = RowState::Bottom;
                        continue;
                    }

                    let left = (last_full - self.y + 1) as usize;
                    let rows = left.min(self.batch_rows);
                    let y = self.y;
                    self.y += rows as i32;
                    return Some(RowBatch { y, rows, coverage: ONE });
                }
                RowState::Bottom => {
                    self.state = RowState::Done;
                    if self.bottom < ONE {
                        return Some(RowBatch { y: self.y_to, rows: 1, coverage: self.bottom });
                    }
                }
                RowState::Done => return None,
            }
        }
    }
}

/// Fills a resolved rectangle, one row batch at a time.
pub(crate) fn fill(
    view: &mut SurfaceView,
    scratch: &mut Scratch,
    config: &RenderConfig,
    span: &RectSpan,
    paint: Paint,
    mode: BlendMode,
) -> Result<(), FillError> {
    let batch_rows = config.batch_rows();
    let paint_len = match paint {
        Paint::Shader(_) => span.width.saturating_mul(batch_rows),
        Paint::Solid(_) => 0,
    };
    let (paint_buf, _) = scratch.paint_and_coverage(paint_len, 0, config.max_scratch_len)?;

    for batch in span.rows(batch_rows) {
        log::trace!("rect rows {}..{} coverage {:#x}", batch.y, batch.y + batch.rows as i32, batch.coverage);
        let cursor = FillCursor { x: span.x, y: batch.y, width: span.width };
        let coverage = Coverage::Rect {
            row: batch.coverage,
            left: span.left,
            right: span.right,
        };
        shade_and_emit(view, paint_buf, &cursor, batch.rows, paint, coverage, mode);
    }

    Ok(())
}
