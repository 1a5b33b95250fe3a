// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Scanline emission.
//!
//! An emitter composites a block of rows into the surface. The destination format,
//! compositing rule, paint source and coverage kind are resolved once per call,
//! the per-pixel loop is monomorphized for each combination.

mod blend;

use pisces_geom::fixed::{self, FDot16, ONE};

use crate::color::PremultipliedColorU8;
use crate::shaders::Shader;
use crate::surface::SurfaceView;
use crate::{BlendMode, PixelFormat};

use blend::{CompositeRule, PixelBlend, Premultiplied, SourceOverRule, SourceRule, Unpremultiplied};

/// Where the current block of rows starts.
///
/// Lives for a single fill call only.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct FillCursor {
    /// First destination column.
    pub x: i32,
    /// Current destination row.
    pub y: i32,
    /// Number of columns in every row.
    pub width: usize,
}

/// Per-pixel source colors.
pub(crate) trait PaintSource {
    fn color_at(&self, row: usize, col: usize) -> PremultipliedColorU8;
    fn is_opaque(&self) -> bool;
    fn solid(&self) -> Option<PremultipliedColorU8>;
}

/// A single color broadcast to every pixel.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SolidPaint(pub PremultipliedColorU8);

impl PaintSource for SolidPaint {
    #[inline]
    fn color_at(&self, _: usize, _: usize) -> PremultipliedColorU8 {
        self.0
    }

    #[inline]
    fn is_opaque(&self) -> bool {
        self.0.is_opaque()
    }

    #[inline]
    fn solid(&self) -> Option<PremultipliedColorU8> {
        Some(self.0)
    }
}

/// Colors generated by a shader, `stride` per row.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PaintBuffer<'a> {
    pub data: &'a [u32],
    pub stride: usize,
    pub is_opaque: bool,
}

impl PaintSource for PaintBuffer<'_> {
    #[inline]
    fn color_at(&self, row: usize, col: usize) -> PremultipliedColorU8 {
        PremultipliedColorU8::from_argb_unchecked(self.data[row * self.stride + col])
    }

    #[inline]
    fn is_opaque(&self) -> bool {
        self.is_opaque
    }

    #[inline]
    fn solid(&self) -> Option<PremultipliedColorU8> {
        None
    }
}

/// The renderer's current paint, resolved for a single fill.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Paint<'a> {
    Solid(PremultipliedColorU8),
    Shader(&'a Shader<'a>),
}

/// Generates paint for the block of rows (when needed) and emits it.
///
/// `paint_buf` must hold at least `cursor.width * rows` values when the paint is a shader.
pub(crate) fn shade_and_emit(
    view: &mut SurfaceView,
    paint_buf: &mut [u32],
    cursor: &FillCursor,
    rows: usize,
    paint: Paint,
    coverage: Coverage,
    mode: BlendMode,
) {
    match paint {
        Paint::Shader(shader) if mode != BlendMode::Clear => {
            let len = cursor.width * rows;
            let out = &mut paint_buf[..len];
            shader.fill(cursor, rows, out);
            let buf = PaintBuffer {
                data: out,
                stride: cursor.width,
                is_opaque: shader.is_opaque(),
            };
            emit(view, cursor, rows, &buf, coverage, mode);
        }
        Paint::Shader(_) => {
            emit(view, cursor, rows, &SolidPaint(PremultipliedColorU8::TRANSPARENT), coverage, mode);
        }
        Paint::Solid(c) => emit(view, cursor, rows, &SolidPaint(c), coverage, mode),
    }
}

/// Coverage of the current block of rows.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Coverage<'a> {
    /// Uniform coverage with fractional first and last columns.
    ///
    /// A single column uses `left` only.
    Rect {
        row: FDot16,
        left: FDot16,
        right: FDot16,
    },
    /// One byte per pixel, `cursor.width` per row.
    Mask(&'a [u8]),
    /// Three sub-pixel bytes per pixel, `cursor.width` per row.
    Lcd(&'a [[u8; 3]]),
}

trait CoverageSource {
    fn at(&self, row: usize, col: usize) -> u8;
}

struct RectCoverage {
    left: u8,
    mid: u8,
    right: u8,
    last: usize,
}

impl CoverageSource for RectCoverage {
    #[inline]
    fn at(&self, _: usize, col: usize) -> u8 {
        if col == 0 {
            self.left
        } else if col == self.last {
            self.right
        } else {
            self.mid
        }
    }
}

struct MaskCoverage<'a> {
    data: &'a [u8],
    stride: usize,
}

impl CoverageSource for MaskCoverage<'_> {
    #[inline]
    fn at(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.stride + col]
    }
}

// LCD coverage under rules without a per-channel form.
struct LcdGrayCoverage<'a> {
    data: &'a [[u8; 3]],
    stride: usize,
}

impl CoverageSource for LcdGrayCoverage<'_> {
    #[inline]
    fn at(&self, row: usize, col: usize) -> u8 {
        let [r, g, b] = self.data[row * self.stride + col];
        ((u32::from(r) + u32::from(g) + u32::from(b)) / 3) as u8
    }
}

/// Composites `rows` rows of `cursor.width` pixels starting at the cursor.
///
/// Pixels outside of the surface are never touched.
pub(crate) fn emit<P: PaintSource>(
    view: &mut SurfaceView,
    cursor: &FillCursor,
    rows: usize,
    paint: &P,
    coverage: Coverage,
    mode: BlendMode,
) {
    if cursor.width == 0 || rows == 0 || cursor.x < 0 || cursor.y < 0 {
        return;
    }

    match view.format() {
        PixelFormat::Argb8888Pre => emit_format::<Premultiplied, P>(view, cursor, rows, paint, coverage, mode),
        PixelFormat::Argb8888 => emit_format::<Unpremultiplied, P>(view, cursor, rows, paint, coverage, mode),
    }
}

fn emit_format<B: PixelBlend, P: PaintSource>(
    view: &mut SurfaceView,
    cursor: &FillCursor,
    rows: usize,
    paint: &P,
    coverage: Coverage,
    mode: BlendMode,
) {
    if let (BlendMode::SourceOver, Coverage::Lcd(data)) = (mode, coverage) {
        emit_lcd::<B, P>(view, cursor, rows, paint, data);
        return;
    }

    match mode.strength_reduce(paint.is_opaque()) {
        BlendMode::Clear => {
            let clear = SolidPaint(PremultipliedColorU8::TRANSPARENT);
            with_coverage::<B, SourceRule, _>(view, cursor, rows, &clear, coverage)
        }
        BlendMode::Source => with_coverage::<B, SourceRule, P>(view, cursor, rows, paint, coverage),
        BlendMode::SourceOver => with_coverage::<B, SourceOverRule, P>(view, cursor, rows, paint, coverage),
    }
}

fn with_coverage<B: PixelBlend, R: CompositeRule, P: PaintSource>(
    view: &mut SurfaceView,
    cursor: &FillCursor,
    rows: usize,
    paint: &P,
    coverage: Coverage,
) {
    match coverage {
        Coverage::Rect { row, left, right } => {
            let cov = RectCoverage {
                left: fixed::to_coverage(fixed::mul(row, left)),
                mid: fixed::to_coverage(row),
                right: fixed::to_coverage(fixed::mul(row, right)),
                last: cursor.width - 1,
            };

            if let Some(color) = paint.solid() {
                if R::REPLACES && row == ONE && left == ONE && (right == ONE || cursor.width == 1) {
                    fill_solid::<B>(view, cursor, rows, color);
                    return;
                }
            }

            emit_rows::<B, R, P, _>(view, cursor, rows, paint, &cov);
        }
        Coverage::Mask(data) => {
            let cov = MaskCoverage { data, stride: cursor.width };
            emit_rows::<B, R, P, _>(view, cursor, rows, paint, &cov);
        }
        Coverage::Lcd(data) => {
            let cov = LcdGrayCoverage { data, stride: cursor.width };
            emit_rows::<B, R, P, _>(view, cursor, rows, paint, &cov);
        }
    }
}

fn emit_rows<B: PixelBlend, R: CompositeRule, P: PaintSource, C: CoverageSource>(
    view: &mut SurfaceView,
    cursor: &FillCursor,
    rows: usize,
    paint: &P,
    coverage: &C,
) {
    let x = cursor.x as usize;
    for r in 0..rows {
        let dst = view.row_mut(x, cursor.y as usize + r, cursor.width);
        for (col, d) in dst.iter_mut().enumerate() {
            *d = R::apply::<B>(*d, paint.color_at(r, col), coverage.at(r, col));
        }
    }
}

fn emit_lcd<B: PixelBlend, P: PaintSource>(
    view: &mut SurfaceView,
    cursor: &FillCursor,
    rows: usize,
    paint: &P,
    data: &[[u8; 3]],
) {
    let x = cursor.x as usize;
    for r in 0..rows {
        let dst = view.row_mut(x, cursor.y as usize + r, cursor.width);
        let cov = &data[r * cursor.width..];
        for (col, d) in dst.iter_mut().enumerate() {
            *d = blend::lcd_src_over::<B>(*d, paint.color_at(r, col), cov[col]);
        }
    }
}

fn fill_solid<B: PixelBlend>(
    view: &mut SurfaceView,
    cursor: &FillCursor,
    rows: usize,
    color: PremultipliedColorU8,
) {
    let c = B::store(color);
    let x = cursor.x as usize;
    for r in 0..rows {
        for p in view.row_mut(x, cursor.y as usize + r, cursor.width) {
            *p = c;
        }
    }
}
