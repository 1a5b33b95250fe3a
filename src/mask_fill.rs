// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::accumulator::{copy_lcd_row, LcdGammaTable};
use crate::blitter::{shade_and_emit, Coverage, FillCursor, Paint};
use crate::scratch::Scratch;
use crate::surface::SurfaceView;
use crate::{BlendMode, ClipRect, FillError, RenderConfig};

/// Bytes per pixel of a coverage mask.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum MaskKind {
    Alpha,
    Lcd,
}

impl MaskKind {
    fn bytes_per_pixel(self) -> usize {
        match self {
            MaskKind::Alpha => 1,
            MaskKind::Lcd => 3,
        }
    }
}

/// A caller mask placement in destination space.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct MaskPlacement {
    pub x: i32,
    pub y: i32,
    /// In bytes.
    pub width: u32,
    pub height: u32,
    /// In bytes.
    pub offset: usize,
    /// In bytes.
    pub stride: usize,
    /// LCD only. Shifts the mask right by this many sub-pixels.
    pub sub_pixel_x: u8,
}

/// The part of a mask that survives clipping.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct MaskSpan {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    /// Byte offset of the first mask byte read for the clipped top-left pixel.
    pub start: usize,
    pub stride: usize,
    /// Leading coverage channels of the first row pixel that have no mask byte.
    pub lead: usize,
    /// Mask bytes read per row.
    pub row_len: usize,
    pub kind: MaskKind,
}

impl MaskSpan {
    /// Clips a mask placement and validates that `mask_len` bytes are enough.
    ///
    /// A sub-pixel shift of an LCD mask adds one destination column: the first
    /// pixel gets the leading channels of the first triple and the last pixel
    /// the trailing ones.
    ///
    /// Returns `Ok(None)` when nothing is left to draw.
    pub fn new(
        placement: &MaskPlacement,
        kind: MaskKind,
        mask_len: usize,
        clip: &ClipRect,
    ) -> Result<Option<Self>, FillError> {
        let bpp = kind.bytes_per_pixel();
        let mask_pixels = placement.width as usize / bpp;
        if mask_pixels == 0 || placement.height == 0 || clip.is_empty() {
            return Ok(None);
        }

        // Whole pixels of the shift move the placement itself.
        let (x0, shift) = match kind {
            MaskKind::Alpha => (i64::from(placement.x), 0),
            MaskKind::Lcd => {
                let sub = usize::from(placement.sub_pixel_x);
                (i64::from(placement.x) + (sub / 3) as i64, sub % 3)
            }
        };
        let pixel_width = mask_pixels + usize::from(shift != 0);

        let y0 = i64::from(placement.y);
        let cx0 = x0.max(i64::from(clip.min_x()));
        let cy0 = y0.max(i64::from(clip.min_y()));
        let cx1 = (x0 + pixel_width as i64 - 1).min(i64::from(clip.max_x()));
        let cy1 = (y0 + i64::from(placement.height) - 1).min(i64::from(clip.max_y()));
        if cx0 > cx1 || cy0 > cy1 {
            return Ok(None);
        }

        let width = (cx1 - cx0 + 1) as usize;
        let height = (cy1 - cy0 + 1) as usize;

        // Channel range of the clipped columns, relative to the mask row.
        let first = (cx0 - x0) as usize * bpp;
        let last = ((cx1 - x0 + 1) as usize * bpp - shift).min(mask_pixels * bpp);
        let lead = shift.saturating_sub(first);
        let byte_start = first.saturating_sub(shift);
        let row_len = last - byte_start;

        let too_small = |required| {
            log::debug!("mask of {} bytes is too small for {} rows of {} pixels", mask_len, height, width);
            FillError::MaskTooSmall { required, actual: mask_len }
        };

        let start = ((cy0 - y0) as usize)
            .checked_mul(placement.stride)
            .and_then(|n| n.checked_add(byte_start))
            .and_then(|n| n.checked_add(placement.offset));
        let required = start
            .and_then(|s| (height - 1).checked_mul(placement.stride).and_then(|n| n.checked_add(s)))
            .and_then(|n| n.checked_add(row_len));
        let (start, required) = match (start, required) {
            (Some(s), Some(r)) => (s, r),
            _ => return Err(too_small(usize::MAX)),
        };

        if mask_len < required {
            return Err(too_small(required));
        }

        Ok(Some(MaskSpan {
            x: cx0 as i32,
            y: cy0 as i32,
            width,
            height,
            start,
            stride: placement.stride,
            lead,
            row_len,
            kind,
        }))
    }

    fn row<'m>(&self, mask: &'m [u8], row: usize) -> &'m [u8] {
        let start = self.start + row * self.stride;
        &mask[start..start + self.row_len]
    }
}

/// Composites a clipped mask, one row batch at a time.
#[allow(clippy::too_many_arguments)]
pub(crate) fn fill(
    view: &mut SurfaceView,
    scratch: &mut Scratch,
    config: &RenderConfig,
    gamma: &LcdGammaTable,
    span: &MaskSpan,
    mask: &[u8],
    paint: Paint,
    mode: BlendMode,
) -> Result<(), FillError> {
    let batch_rows = config.batch_rows();
    let batch_len = span.width.saturating_mul(batch_rows);
    let paint_len = match paint {
        Paint::Shader(_) => batch_len,
        Paint::Solid(_) => 0,
    };

    let mut row = 0;
    match span.kind {
        MaskKind::Alpha => {
            let (paint_buf, coverage) = scratch.paint_and_coverage(paint_len, batch_len, config.max_scratch_len)?;
            while row < span.height {
                let rows = (span.height - row).min(batch_rows);
                for (i, line) in coverage.chunks_exact_mut(span.width).take(rows).enumerate() {
                    line.copy_from_slice(span.row(mask, row + i));
                }

                let cursor = FillCursor { x: span.x, y: span.y + row as i32, width: span.width };
                let coverage = Coverage::Mask(&coverage[..span.width * rows]);
                shade_and_emit(view, paint_buf, &cursor, rows, paint, coverage, mode);
                row += rows;
            }
        }
        MaskKind::Lcd => {
            let (paint_buf, lcd) = scratch.paint_and_lcd(paint_len, batch_len, config.max_scratch_len)?;
            while row < span.height {
                let rows = (span.height - row).min(batch_rows);
                for (i, line) in lcd.chunks_exact_mut(span.width).take(rows).enumerate() {
                    copy_lcd_row(span.row(mask, row + i), span.lead, gamma, line);
                }

                let cursor = FillCursor { x: span.x, y: span.y + row as i32, width: span.width };
                let coverage = Coverage::Lcd(&lcd[..span.width * rows]);
                shade_and_emit(view, paint_buf, &cursor, rows, paint, coverage, mode);
                row += rows;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: i32, y: i32, width: u32, height: u32, stride: usize) -> MaskPlacement {
        MaskPlacement { x, y, width, height, offset: 0, stride, sub_pixel_x: 0 }
    }

    #[test]
    fn unclipped() {
        let clip = ClipRect::new(10, 10);
        let s = MaskSpan::new(&placement(1, 2, 3, 2, 4), MaskKind::Alpha, 7, &clip).unwrap().unwrap();
        assert_eq!((s.x, s.y, s.width, s.height, s.start), (1, 2, 3, 2, 0));
    }

    #[test]
    fn clipped_top_left() {
        let clip = ClipRect::new(10, 10);
        let mut p = placement(-1, -2, 4, 4, 5);
        p.offset = 3;
        let s = MaskSpan::new(&p, MaskKind::Alpha, 100, &clip).unwrap().unwrap();
        assert_eq!((s.x, s.y, s.width, s.height), (0, 0, 3, 2));
        assert_eq!(s.start, 3 + 2 * 5 + 1);
    }

    #[test]
    fn lcd_width_is_in_pixels() {
        let clip = ClipRect::new(10, 10);
        let s = MaskSpan::new(&placement(-1, 0, 9, 1, 9), MaskKind::Lcd, 9, &clip).unwrap().unwrap();
        assert_eq!((s.x, s.width, s.start), (0, 2, 3));
    }

    #[test]
    fn too_small() {
        let clip = ClipRect::new(10, 10);
        assert_eq!(
            MaskSpan::new(&placement(0, 0, 3, 2, 4), MaskKind::Alpha, 6, &clip),
            Err(FillError::MaskTooSmall { required: 7, actual: 6 })
        );
    }

    #[test]
    fn outside() {
        let clip = ClipRect::new(10, 10);
        assert_eq!(MaskSpan::new(&placement(10, 0, 3, 2, 4), MaskKind::Alpha, 0, &clip), Ok(None));
        assert_eq!(MaskSpan::new(&placement(0, 0, 2, 2, 2), MaskKind::Lcd, 0, &clip), Ok(None));
    }

    #[test]
    fn huge_offset_or_stride() {
        let clip = ClipRect::new(10, 10);
        let mut p = placement(0, 0, 1, 1, 1);
        p.offset = usize::MAX;
        assert_eq!(
            MaskSpan::new(&p, MaskKind::Alpha, 1, &clip),
            Err(FillError::MaskTooSmall { required: usize::MAX, actual: 1 })
        );

        let p = placement(0, 0, 1, 3, usize::MAX / 2);
        assert!(MaskSpan::new(&p, MaskKind::Alpha, 1, &clip).is_err());
    }

    #[test]
    fn lcd_sub_pixel_shift() {
        let clip = ClipRect::new(10, 10);
        let mut p = placement(2, 0, 6, 1, 6);
        p.sub_pixel_x = 1;
        let s = MaskSpan::new(&p, MaskKind::Lcd, 6, &clip).unwrap().unwrap();
        assert_eq!((s.x, s.width, s.start, s.lead, s.row_len), (2, 3, 0, 1, 6));

        // The first column is clipped away.
        let clip = ClipRect::new(10, 10);
        let mut clipped = clip;
        clipped.intersect(3, 0, 10, 10);
        let s = MaskSpan::new(&p, MaskKind::Lcd, 6, &clipped).unwrap().unwrap();
        assert_eq!((s.x, s.width, s.start, s.lead, s.row_len), (3, 2, 2, 0, 4));

        // Whole pixels move the placement.
        p.sub_pixel_x = 4;
        let s = MaskSpan::new(&p, MaskKind::Lcd, 6, &clip).unwrap().unwrap();
        assert_eq!((s.x, s.width, s.lead), (3, 3, 1));
    }
}
