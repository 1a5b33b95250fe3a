// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

mod gradient;
mod linear_gradient;
mod radial_gradient;
mod texture;

pub use gradient::{apply_spread, GradientRamp, GradientStop, RAMP_SIZE};
pub use linear_gradient::LinearGradient;
pub use radial_gradient::RadialGradient;
pub use texture::{EdgeMode, EdgeRules, FilterQuality, Texture};

use crate::blitter::FillCursor;

/// A gradient cycle method.
///
/// Decides how a parameter outside of `0..=1` maps back into the ramp.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SpreadMode {
    /// Replicate the edge color if the shader draws outside of its
    /// original bounds.
    Pad,

    /// Repeat the shader's image, alternating mirror images so that
    /// adjacent images always seam.
    Reflect,

    /// Repeat the shader's image.
    Repeat,
}

impl Default for SpreadMode {
    fn default() -> Self {
        SpreadMode::Pad
    }
}

/// A shader specifies per-pixel source colors.
///
/// When no shader is set, a renderer uses its solid color instead.
#[derive(Clone, Debug)]
pub enum Shader<'a> {
    /// A linear gradient shader.
    LinearGradient(LinearGradient),
    /// A radial gradient shader.
    RadialGradient(RadialGradient),
    /// An image shader.
    Texture(Texture<'a>),
}

impl<'a> Shader<'a> {
    /// Checks if the shader is guaranteed to produce only opaque colors.
    pub fn is_opaque(&self) -> bool {
        match self {
            Shader::LinearGradient(ref g) => g.is_opaque(),
            Shader::RadialGradient(ref g) => g.is_opaque(),
            Shader::Texture(ref t) => t.is_opaque(),
        }
    }

    /// Returns rectangle edge policies attached to the shader.
    pub fn edges(&self) -> EdgeRules {
        match self {
            Shader::Texture(ref t) => t.edges(),
            _ => EdgeRules::KEEP,
        }
    }

    /// Writes `cursor.width * rows` premultiplied colors for rows starting at `cursor.y`.
    pub(crate) fn fill(&self, cursor: &FillCursor, rows: usize, out: &mut [u32]) {
        debug_assert!(out.len() >= cursor.width * rows);
        match self {
            Shader::LinearGradient(ref g) => g.fill(cursor, rows, out),
            Shader::RadialGradient(ref g) => g.fill(cursor, rows, out),
            Shader::Texture(ref t) => t.fill(cursor, rows, out),
        }
    }
}

impl From<LinearGradient> for Shader<'_> {
    fn from(g: LinearGradient) -> Self {
        Shader::LinearGradient(g)
    }
}

impl From<RadialGradient> for Shader<'_> {
    fn from(g: RadialGradient) -> Self {
        Shader::RadialGradient(g)
    }
}

impl<'a> From<Texture<'a>> for Shader<'a> {
    fn from(t: Texture<'a>) -> Self {
        Shader::Texture(t)
    }
}
