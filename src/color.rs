// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use strict_num::NormalizedF32;

/// 8-bit type for an alpha value. 255 is 100% opaque, zero is 100% transparent.
pub type AlphaU8 = u8;

/// Represents fully transparent AlphaU8 value.
pub const ALPHA_U8_TRANSPARENT: AlphaU8 = 0x00;

/// Represents fully opaque AlphaU8 value.
pub const ALPHA_U8_OPAQUE: AlphaU8 = 0xFF;

/// A 32-bit straight alpha color value.
///
/// Packed as `0xAARRGGBB`, which is BGRA in memory on little-endian targets.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorU8(u32);

impl ColorU8 {
    /// A transparent color.
    pub const TRANSPARENT: Self = ColorU8::from_rgba(0, 0, 0, 0);

    /// Creates a new color.
    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8(pack_argb(r, g, b, a))
    }

    /// Creates a new color from a packed `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        ColorU8(argb)
    }

    /// Returns color's red component.
    #[inline]
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Returns color's green component.
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Returns color's blue component.
    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns color's alpha component.
    #[inline]
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Check that color is opaque.
    ///
    /// Alpha == 255
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha() == ALPHA_U8_OPAQUE
    }

    /// Returns the value as a primitive type.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Converts into a premultiplied color.
    #[inline]
    pub fn premultiply(&self) -> PremultipliedColorU8 {
        let a = self.alpha();
        if a != ALPHA_U8_OPAQUE {
            PremultipliedColorU8::from_rgba_unchecked(
                premultiply_u8(self.red(), a),
                premultiply_u8(self.green(), a),
                premultiply_u8(self.blue(), a),
                a,
            )
        } else {
            PremultipliedColorU8(self.0)
        }
    }
}

impl std::fmt::Debug for ColorU8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorU8")
            .field("r", &self.red())
            .field("g", &self.green())
            .field("b", &self.blue())
            .field("a", &self.alpha())
            .finish()
    }
}

/// A 32-bit premultiplied color value.
///
/// Packed as `0xAARRGGBB`. Color components are <= alpha.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PremultipliedColorU8(u32);

impl PremultipliedColorU8 {
    /// A transparent color.
    pub const TRANSPARENT: Self = PremultipliedColorU8::from_rgba_unchecked(0, 0, 0, 0);

    /// Creates a new premultiplied color.
    ///
    /// RGB components must be <= alpha.
    #[inline]
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Option<Self> {
        if r <= a && g <= a && b <= a {
            Some(PremultipliedColorU8::from_rgba_unchecked(r, g, b, a))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) const fn from_rgba_unchecked(r: u8, g: u8, b: u8, a: u8) -> Self {
        PremultipliedColorU8(pack_argb(r, g, b, a))
    }

    /// Reinterprets a packed `0xAARRGGBB` value that is known to be premultiplied.
    #[inline]
    pub(crate) const fn from_argb_unchecked(argb: u32) -> Self {
        PremultipliedColorU8(argb)
    }

    /// Returns color's red component.
    #[inline]
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Returns color's green component.
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Returns color's blue component.
    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns color's alpha component.
    #[inline]
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Check that color is opaque.
    ///
    /// Alpha == 255
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha() == ALPHA_U8_OPAQUE
    }

    /// Returns the value as a primitive type.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns a demultiplied color.
    #[inline]
    pub fn demultiply(&self) -> ColorU8 {
        let a = self.alpha();
        match a {
            ALPHA_U8_OPAQUE => ColorU8(self.0),
            ALPHA_U8_TRANSPARENT => ColorU8::TRANSPARENT,
            _ => ColorU8::from_rgba(
                demultiply_u8(self.red(), a),
                demultiply_u8(self.green(), a),
                demultiply_u8(self.blue(), a),
                a,
            ),
        }
    }
}

impl std::fmt::Debug for PremultipliedColorU8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PremultipliedColorU8")
            .field("r", &self.red())
            .field("g", &self.green())
            .field("b", &self.blue())
            .field("a", &self.alpha())
            .finish()
    }
}

/// RGBA color value, holding four floating point components.
///
/// The container guarantees that all components are in a 0..=1 range.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color {
    r: NormalizedF32,
    g: NormalizedF32,
    b: NormalizedF32,
    a: NormalizedF32,
}

const NV_ZERO: NormalizedF32 = NormalizedF32::ZERO;
const NV_ONE: NormalizedF32 = NormalizedF32::ONE;

impl Color {
    /// A transparent color.
    pub const TRANSPARENT: Color = Color { r: NV_ZERO, g: NV_ZERO, b: NV_ZERO, a: NV_ZERO };
    /// A black color.
    pub const BLACK: Color = Color { r: NV_ZERO, g: NV_ZERO, b: NV_ZERO, a: NV_ONE };
    /// A white color.
    pub const WHITE: Color = Color { r: NV_ONE, g: NV_ONE, b: NV_ONE, a: NV_ONE };

    /// Creates a new color from 4 components.
    ///
    /// All values must be in 0..=1 range.
    #[inline]
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Option<Self> {
        Some(Color {
            r: NormalizedF32::new(r)?,
            g: NormalizedF32::new(g)?,
            b: NormalizedF32::new(b)?,
            a: NormalizedF32::new(a)?,
        })
    }

    /// Creates a new color from 4 components.
    ///
    /// u8 will be divided by 255 to get the float component.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color {
            r: normalize_u8(r),
            g: normalize_u8(g),
            b: normalize_u8(b),
            a: normalize_u8(a),
        }
    }

    /// Returns color's red component.
    #[inline]
    pub fn red(&self) -> f32 {
        self.r.get()
    }

    /// Returns color's green component.
    #[inline]
    pub fn green(&self) -> f32 {
        self.g.get()
    }

    /// Returns color's blue component.
    #[inline]
    pub fn blue(&self) -> f32 {
        self.b.get()
    }

    /// Returns color's alpha component.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.a.get()
    }

    /// Check that color is opaque.
    ///
    /// Alpha == 1.0
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == NV_ONE
    }

    /// Converts into `ColorU8`.
    #[inline]
    pub fn to_color_u8(&self) -> ColorU8 {
        ColorU8::from_rgba(
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b),
            to_u8(self.a),
        )
    }
}

impl From<ColorU8> for Color {
    fn from(c: ColorU8) -> Self {
        Color::from_rgba8(c.red(), c.green(), c.blue(), c.alpha())
    }
}

#[inline]
fn normalize_u8(n: u8) -> NormalizedF32 {
    NormalizedF32::new_clamped(n as f32 / 255.0)
}

#[inline]
fn to_u8(n: NormalizedF32) -> u8 {
    (n.get() * 255.0 + 0.5) as u8
}

/// Return a*b/255, rounding any fractional bits.
#[inline]
pub fn premultiply_u8(c: u8, a: u8) -> u8 {
    let prod = u32::from(c) * u32::from(a) + 128;
    ((prod + (prod >> 8)) >> 8) as u8
}

/// Return c*255/a, rounded and clamped to 255.
#[inline]
pub fn demultiply_u8(c: u8, a: u8) -> u8 {
    debug_assert_ne!(a, 0);
    let a = u32::from(a);
    ((u32::from(c) * 255 + a / 2) / a).min(255) as u8
}

#[inline]
pub(crate) const fn pack_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing() {
        let c = ColorU8::from_rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.get(), 0x44112233);
        assert_eq!(ColorU8::from_argb(0x44112233), c);
    }

    #[test]
    fn premultiply_u8() {
        assert_eq!(
            ColorU8::from_rgba(10, 20, 30, 40).premultiply(),
            PremultipliedColorU8::from_rgba_unchecked(2, 3, 5, 40)
        );
    }

    #[test]
    fn premultiply_u8_opaque() {
        assert_eq!(
            ColorU8::from_rgba(10, 20, 30, 255).premultiply(),
            PremultipliedColorU8::from_rgba_unchecked(10, 20, 30, 255)
        );
    }

    #[test]
    fn demultiply_u8() {
        assert_eq!(
            PremultipliedColorU8::from_rgba_unchecked(2, 3, 5, 40).demultiply(),
            ColorU8::from_rgba(13, 19, 32, 40)
        );
        assert_eq!(
            PremultipliedColorU8::TRANSPARENT.demultiply(),
            ColorU8::TRANSPARENT
        );
    }

    #[test]
    fn premultiplied_validation() {
        assert!(PremultipliedColorU8::from_rgba(10, 10, 10, 5).is_none());
        assert!(PremultipliedColorU8::from_rgba(5, 5, 5, 5).is_some());
    }

    #[test]
    fn float_color() {
        assert!(Color::from_rgba(1.5, 0.0, 0.0, 1.0).is_none());
        let c = Color::from_rgba(1.0, 0.5, 0.0, 1.0).unwrap();
        assert_eq!(c.to_color_u8(), ColorU8::from_rgba(255, 128, 0, 255));
        assert!(Color::BLACK.is_opaque());
        assert_eq!(Color::from(ColorU8::from_rgba(1, 2, 3, 4)).to_color_u8(), ColorU8::from_rgba(1, 2, 3, 4));
    }
}
