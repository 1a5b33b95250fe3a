// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use pisces_geom::{FDot16, FixedRect, IntRect, Transform};

use crate::accumulator::{self, LcdGammaTable};
use crate::blitter::{shade_and_emit, Coverage, FillCursor, Paint};
use crate::mask_fill::{self, MaskKind, MaskPlacement, MaskSpan};
use crate::pixmap::encode_color;
use crate::rect_fill::{self, RectSpan};
use crate::scratch::Scratch;
use crate::shaders::{GradientRamp, LinearGradient, RadialGradient, Shader, SpreadMode, Texture};
use crate::surface::{Surface, SurfaceLock};
use crate::{BlendMode, ClipRect, Color, ColorU8, EdgeRules, FillError, RenderConfig};

/// A drawing context.
///
/// Borrows a surface for its whole lifetime and keeps the current clip, color,
/// blend mode and paint between calls. Every drawing call acquires the surface
/// once and releases it again, also when nothing is drawn or the call fails.
///
/// Drawing calls return `Err` on failure and also remember the error,
/// see [`take_error`](Renderer::take_error).
pub struct Renderer<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    clip: ClipRect,
    color: ColorU8,
    mode: BlendMode,
    shader: Option<Shader<'a>>,
    gamma: LcdGammaTable,
    config: RenderConfig,
    scratch: Scratch,
    last_error: Option<FillError>,
}

impl<'a, S: Surface + ?Sized> Renderer<'a, S> {
    /// Creates a new renderer with the default config.
    ///
    /// The clip covers the whole surface, the color is opaque black.
    pub fn new(surface: &'a mut S) -> Self {
        Self::with_config(surface, RenderConfig::default())
    }

    /// Creates a new renderer.
    pub fn with_config(surface: &'a mut S, config: RenderConfig) -> Self {
        let clip = ClipRect::new(surface.width(), surface.height());
        Renderer {
            surface,
            clip,
            color: ColorU8::from_rgba(0, 0, 0, 255),
            mode: BlendMode::default(),
            shader: None,
            gamma: LcdGammaTable::new(config.lcd_gamma),
            config,
            scratch: Scratch::default(),
            last_error: None,
        }
    }

    /// Returns the destination surface.
    pub fn surface(&self) -> &S {
        &*self.surface
    }

    /// Returns the current clip.
    pub fn clip(&self) -> &ClipRect {
        &self.clip
    }

    /// Returns the current color.
    pub fn color(&self) -> ColorU8 {
        self.color
    }

    /// Returns the current blend mode.
    pub fn blend_mode(&self) -> BlendMode {
        self.mode
    }

    /// Returns the current shader.
    ///
    /// `None` means that the solid color is used.
    pub fn shader(&self) -> Option<&Shader<'a>> {
        self.shader.as_ref()
    }

    /// Returns the LCD gamma table.
    pub fn lcd_gamma(&self) -> &LcdGammaTable {
        &self.gamma
    }

    /// Returns the renderer config.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Sets the clip to `(x, y, w, h)` intersected with the surface.
    pub fn set_clip(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.clip.set(x, y, w, h);
    }

    /// Resets the clip to the whole surface.
    pub fn reset_clip(&mut self) {
        self.clip.reset();
    }

    /// Sets a solid color paint.
    ///
    /// Removes the current shader.
    pub fn set_color(&mut self, color: Color) {
        self.color = color.to_color_u8();
        self.shader = None;
    }

    /// Sets a solid color paint from straight alpha components.
    ///
    /// Removes the current shader.
    pub fn set_color_rgba8(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.color = ColorU8::from_rgba(r, g, b, a);
        self.shader = None;
    }

    /// Sets the compositing rule.
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.mode = mode;
    }

    /// Sets a linear gradient paint.
    ///
    /// `ramp` contains straight alpha `0xAARRGGBB` colors spread evenly from the
    /// start point to the end point. `transform` maps destination pixels into
    /// gradient space.
    ///
    /// Returns `false` and keeps the current paint when the gradient is invalid.
    #[allow(clippy::too_many_arguments)]
    pub fn set_linear_gradient(
        &mut self,
        x0: FDot16,
        y0: FDot16,
        x1: FDot16,
        y1: FDot16,
        ramp: &[u32],
        spread: SpreadMode,
        transform: Transform,
    ) -> bool {
        let gradient = GradientRamp::from_argb(ramp)
            .and_then(|ramp| LinearGradient::new(x0, y0, x1, y1, ramp, spread, transform));
        match gradient {
            Some(g) => {
                self.shader = Some(g.into());
                true
            }
            None => false,
        }
    }

    /// Sets a radial gradient paint.
    ///
    /// `(cx, cy)` and `radius` describe the end circle, `(fx, fy)` is the focus.
    ///
    /// Returns `false` and keeps the current paint when the gradient is invalid.
    #[allow(clippy::too_many_arguments)]
    pub fn set_radial_gradient(
        &mut self,
        cx: FDot16,
        cy: FDot16,
        fx: FDot16,
        fy: FDot16,
        radius: FDot16,
        ramp: &[u32],
        spread: SpreadMode,
        transform: Transform,
    ) -> bool {
        let gradient = GradientRamp::from_argb(ramp)
            .and_then(|ramp| RadialGradient::new(cx, cy, fx, fy, radius, ramp, spread, transform));
        match gradient {
            Some(g) => {
                self.shader = Some(g.into());
                true
            }
            None => false,
        }
    }

    /// Sets a texture paint.
    pub fn set_texture(&mut self, texture: Texture<'a>) {
        self.shader = Some(texture.into());
    }

    /// Sets any shader as paint.
    pub fn set_shader(&mut self, shader: Shader<'a>) {
        self.shader = Some(shader);
    }

    /// Switches back to the solid color paint.
    pub fn reset_paint(&mut self) {
        self.shader = None;
    }

    /// Rebuilds the LCD gamma table.
    pub fn set_lcd_gamma(&mut self, gamma: f32) {
        self.gamma = LcdGammaTable::new(gamma);
    }

    /// Returns the last error and forgets it.
    pub fn take_error(&mut self) -> Option<FillError> {
        self.last_error.take()
    }

    fn record(&mut self, result: Result<(), FillError>) -> Result<(), FillError> {
        if let Err(e) = result {
            log::debug!("fill aborted: {}", e);
            self.last_error = Some(e);
        }

        result
    }

    /// Overwrites pixels with the current color.
    ///
    /// Ignores the blend mode and the shader. Limited by the clip.
    pub fn clear_rect(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<(), FillError> {
        let result = self.clear_rect_impl(x, y, w, h);
        self.record(result)
    }

    fn clear_rect_impl(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<(), FillError> {
        let Renderer { surface, clip, color, .. } = self;
        let value = encode_color(*color, surface.format());
        let mut lock = SurfaceLock::acquire(&mut **surface)?;

        let rect = match IntRect::from_xywh(x, y, w, h).and_then(|r| clip.clip_int_rect(&r)) {
            Some(v) => v,
            None => return Ok(()),
        };

        lock.view().fill_rect(
            rect.x() as usize,
            rect.y() as usize,
            rect.width() as usize,
            rect.height() as usize,
            value,
        );
        Ok(())
    }

    /// Fills a rectangle with the current paint.
    ///
    /// Edge policies come from the texture paint, all other paints keep
    /// fractional edges.
    pub fn fill_rect(&mut self, rect: FixedRect) -> Result<(), FillError> {
        let edges = self.shader.as_ref().map_or(EdgeRules::KEEP, |s| s.edges());
        self.fill_rect_with_edges(rect, edges)
    }

    /// Fills a rectangle with the current paint using explicit edge policies.
    pub fn fill_rect_with_edges(&mut self, rect: FixedRect, edges: EdgeRules) -> Result<(), FillError> {
        let result = self.fill_rect_impl(rect, edges);
        self.record(result)
    }

    fn fill_rect_impl(&mut self, rect: FixedRect, edges: EdgeRules) -> Result<(), FillError> {
        let Renderer { surface, clip, shader, scratch, config, color, mode, .. } = self;
        let mut lock = SurfaceLock::acquire(&mut **surface)?;

        let span = match RectSpan::new(&rect, edges, clip) {
            Some(v) => v,
            None => return Ok(()),
        };

        let paint = match shader {
            Some(s) => Paint::Shader(s),
            None => Paint::Solid(color.premultiply()),
        };

        rect_fill::fill(&mut lock.view(), scratch, config, &span, paint, *mode)
    }

    /// Composites an 8-bit coverage mask with the current paint.
    ///
    /// The mask covers `mask_width * mask_height` pixels at `(x, y)`, its first
    /// byte is at `offset` and rows are `stride` bytes apart.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_alpha_mask(
        &mut self,
        mask: &[u8],
        x: i32,
        y: i32,
        mask_width: u32,
        mask_height: u32,
        offset: usize,
        stride: usize,
    ) -> Result<(), FillError> {
        let placement = MaskPlacement {
            x,
            y,
            width: mask_width,
            height: mask_height,
            offset,
            stride,
            sub_pixel_x: 0,
        };
        let result = self.fill_mask_impl(mask, &placement, MaskKind::Alpha);
        self.record(result)
    }

    /// Composites an LCD sub-pixel mask with the current paint.
    ///
    /// Every pixel has three coverage bytes, so `mask_width` is in bytes and
    /// covers `mask_width / 3` pixels. Coverage is gamma corrected with the
    /// table set by [`set_lcd_gamma`](Renderer::set_lcd_gamma).
    ///
    /// `sub_pixel_x` moves the mask right by that many color channels. When it
    /// is not a multiple of three, the mask spans one more pixel: the first
    /// pixel gets coverage only for its trailing channels and the last pixel
    /// only for its leading ones.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_lcd_alpha_mask(
        &mut self,
        mask: &[u8],
        x: i32,
        y: i32,
        mask_width: u32,
        mask_height: u32,
        offset: usize,
        stride: usize,
        sub_pixel_x: u8,
    ) -> Result<(), FillError> {
        let placement = MaskPlacement {
            x,
            y,
            width: mask_width,
            height: mask_height,
            offset,
            stride,
            sub_pixel_x,
        };
        let result = self.fill_mask_impl(mask, &placement, MaskKind::Lcd);
        self.record(result)
    }

    fn fill_mask_impl(&mut self, mask: &[u8], placement: &MaskPlacement, kind: MaskKind) -> Result<(), FillError> {
        let Renderer { surface, clip, shader, scratch, config, color, mode, gamma, .. } = self;
        let mut lock = SurfaceLock::acquire(&mut **surface)?;

        let span = match MaskSpan::new(placement, kind, mask.len(), clip)? {
            Some(v) => v,
            None => return Ok(()),
        };

        let paint = match shader {
            Some(s) => Paint::Shader(s),
            None => Paint::Solid(color.premultiply()),
        };

        mask_fill::fill(&mut lock.view(), scratch, config, gamma, &span, mask, paint, *mode)
    }

    /// Accumulates a row of coverage deltas, composites it and zeroes the deltas.
    ///
    /// `deltas[i]` is the coverage change at column `x_from + i`, where `256`
    /// means full coverage. The row spans `x_from..=x_to`. With an `alpha_map`,
    /// the running sum indexes into it, otherwise it is scaled down to 8 bits.
    ///
    /// Deltas are zeroed even when the row is clipped out.
    #[allow(clippy::too_many_arguments)]
    pub fn emit_and_clear_alpha_row(
        &mut self,
        alpha_map: Option<&[u8]>,
        deltas: &mut [i32],
        y: i32,
        x_from: i32,
        x_to: i32,
        row_num: i32,
    ) -> Result<(), FillError> {
        log::trace!("alpha row {} at y {}: {}..={}", row_num, y, x_from, x_to);
        let result = self.emit_alpha_row_impl(alpha_map, AlphaDeltas::Dense(deltas), y, x_from, x_to);
        self.record(result)
    }

    /// Like [`emit_and_clear_alpha_row`](Renderer::emit_and_clear_alpha_row),
    /// but for `(column, delta)` pairs sorted by column.
    ///
    /// Columns are relative to `x_from`.
    pub fn emit_sparse_alpha_row(
        &mut self,
        alpha_map: Option<&[u8]>,
        deltas: &[(u32, i32)],
        y: i32,
        x_from: i32,
        x_to: i32,
    ) -> Result<(), FillError> {
        let result = self.emit_alpha_row_impl(alpha_map, AlphaDeltas::Sparse(deltas), y, x_from, x_to);
        self.record(result)
    }

    fn emit_alpha_row_impl(
        &mut self,
        alpha_map: Option<&[u8]>,
        mut deltas: AlphaDeltas,
        y: i32,
        x_from: i32,
        x_to: i32,
    ) -> Result<(), FillError> {
        let row_width = if x_to < x_from {
            0
        } else {
            (i64::from(x_to) - i64::from(x_from) + 1) as usize
        };

        let Renderer { surface, clip, shader, scratch, config, color, mode, .. } = self;
        let mut lock = match SurfaceLock::acquire(&mut **surface) {
            Ok(v) => v,
            Err(e) => {
                deltas.clear(row_width);
                return Err(e);
            }
        };

        if row_width == 0 {
            deltas.clear(0);
            return Ok(());
        }

        if let AlphaDeltas::Dense(ref d) = deltas {
            if d.len() < row_width {
                return Err(FillError::DeltasTooSmall { required: row_width, actual: d.len() });
            }
        }

        let cx0 = x_from.max(clip.min_x());
        let cx1 = x_to.min(clip.max_x());
        if clip.is_empty() || y < clip.min_y() || y > clip.max_y() || cx0 > cx1 {
            deltas.clear(row_width);
            return Ok(());
        }

        let width = (cx1 - cx0 + 1) as usize;
        let skip = (i64::from(cx0) - i64::from(x_from)) as usize;

        let paint_len = if shader.is_some() { width } else { 0 };
        let (paint_buf, coverage) = match scratch.paint_and_coverage(paint_len, width, config.max_scratch_len) {
            Ok(v) => v,
            Err(e) => {
                deltas.clear(row_width);
                return Err(e);
            }
        };

        match deltas {
            AlphaDeltas::Dense(d) => accumulator::accumulate_dense(d, row_width, skip, alpha_map, coverage),
            AlphaDeltas::Sparse(d) => accumulator::accumulate_sparse(d, row_width, skip, alpha_map, coverage),
        }

        let paint = match shader {
            Some(s) => Paint::Shader(s),
            None => Paint::Solid(color.premultiply()),
        };

        let cursor = FillCursor { x: cx0, y, width };
        shade_and_emit(&mut lock.view(), paint_buf, &cursor, 1, paint, Coverage::Mask(coverage), *mode);
        Ok(())
    }
}

impl<S: Surface + ?Sized> std::fmt::Debug for Renderer<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("clip", &self.clip)
            .field("color", &self.color)
            .field("mode", &self.mode)
            .field("shader", &self.shader)
            .field("gamma", &self.gamma)
            .field("config", &self.config)
            .finish()
    }
}

enum AlphaDeltas<'d> {
    Dense(&'d mut [i32]),
    Sparse(&'d [(u32, i32)]),
}

impl AlphaDeltas<'_> {
    fn clear(&mut self, width: usize) {
        if let AlphaDeltas::Dense(d) = self {
            let end = d.len().min(width + 1);
            for v in &mut d[..end] {
                *v = 0;
            }
        }
    }
}
