// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Per-pixel compositing math.
//!
//! Sources are always premultiplied. Destinations are either premultiplied or
//! straight, which is abstracted by [`PixelBlend`].

use crate::color::{pack_argb, ColorU8, PremultipliedColorU8};

/// Returns `x / 255` for `x` in `0..=255*255`. Exact for multiples of 255.
#[inline]
pub fn div255(x: u32) -> u32 {
    (x * 257 + 257) >> 16
}

#[inline]
fn channels(c: u32) -> [u32; 4] {
    [(c >> 24) & 0xFF, (c >> 16) & 0xFF, (c >> 8) & 0xFF, c & 0xFF]
}

#[inline]
fn pack(a: u32, r: u32, g: u32, b: u32) -> u32 {
    pack_argb(r.min(255) as u8, g.min(255) as u8, b.min(255) as u8, a.min(255) as u8)
}

/// Scales a premultiplied color by an 8-bit coverage.
#[inline]
pub fn scale(s: PremultipliedColorU8, cov: u8) -> [u32; 4] {
    let cov = u32::from(cov);
    let [a, r, g, b] = channels(s.get());
    [div255(a * cov), div255(r * cov), div255(g * cov), div255(b * cov)]
}

/// Destination pixel format.
pub(crate) trait PixelBlend {
    /// Encodes a premultiplied color, replacing the destination.
    fn store(s: PremultipliedColorU8) -> u32;

    /// Decodes a destination pixel into premultiplied form.
    fn load(d: u32) -> PremultipliedColorU8;

    /// `s*c + d*(1 - sa*c)`
    fn src_over(d: u32, s: PremultipliedColorU8, cov: u8) -> u32;

    /// `s*c + d*(1 - c)`
    fn source(d: u32, s: PremultipliedColorU8, cov: u8) -> u32;
}

/// Premultiplied destination.
pub(crate) struct Premultiplied;

impl PixelBlend for Premultiplied {
    #[inline]
    fn store(s: PremultipliedColorU8) -> u32 {
        s.get()
    }

    #[inline]
    fn load(d: u32) -> PremultipliedColorU8 {
        PremultipliedColorU8::from_argb_unchecked(d)
    }

    #[inline]
    fn src_over(d: u32, s: PremultipliedColorU8, cov: u8) -> u32 {
        let [sa, sr, sg, sb] = scale(s, cov);
        let [da, dr, dg, db] = channels(d);
        let inv = 255 - sa;
        pack(
            sa + div255(da * inv),
            sr + div255(dr * inv),
            sg + div255(dg * inv),
            sb + div255(db * inv),
        )
    }

    #[inline]
    fn source(d: u32, s: PremultipliedColorU8, cov: u8) -> u32 {
        let c = u32::from(cov);
        let inv = 255 - c;
        let [sa, sr, sg, sb] = channels(s.get());
        let [da, dr, dg, db] = channels(d);
        pack(
            div255(sa * c + da * inv),
            div255(sr * c + dr * inv),
            div255(sg * c + dg * inv),
            div255(sb * c + db * inv),
        )
    }
}

/// Straight alpha destination.
pub(crate) struct Unpremultiplied;

impl PixelBlend for Unpremultiplied {
    #[inline]
    fn store(s: PremultipliedColorU8) -> u32 {
        s.demultiply().get()
    }

    #[inline]
    fn load(d: u32) -> PremultipliedColorU8 {
        ColorU8::from_argb(d).premultiply()
    }

    fn src_over(d: u32, s: PremultipliedColorU8, cov: u8) -> u32 {
        let [sa, sr, sg, sb] = scale(s, cov);
        let [da, dr, dg, db] = channels(d);

        // 255 * resulting alpha
        let denom = sa * 255 + da * (255 - sa);
        if denom == 0 {
            return 0;
        }

        let fd = da * (255 - sa);
        let mix = |sc: u32, dc: u32| (sc * 65025 + dc * fd + denom / 2) / denom;
        pack(div255(denom), mix(sr, dr), mix(sg, dg), mix(sb, db))
    }

    fn source(d: u32, s: PremultipliedColorU8, cov: u8) -> u32 {
        let c = u32::from(cov);
        let inv = 255 - c;
        let [sa, sr, sg, sb] = channels(s.get());
        let [da, dr, dg, db] = channels(d);

        // 255 * resulting alpha
        let denom = c * sa + inv * da;
        if denom == 0 {
            return 0;
        }

        let fd = inv * da;
        let mix = |sc: u32, dc: u32| (c * sc * 255 + dc * fd + denom / 2) / denom;
        pack(div255(denom), mix(sr, dr), mix(sg, dg), mix(sb, db))
    }
}

/// A compositing rule with the zero and full coverage shortcuts folded in.
pub(crate) trait CompositeRule {
    /// Full coverage replaces the destination regardless of the source.
    const REPLACES: bool;

    fn apply<B: PixelBlend>(d: u32, s: PremultipliedColorU8, cov: u8) -> u32;
}

pub(crate) struct SourceRule;

impl CompositeRule for SourceRule {
    const REPLACES: bool = true;

    #[inline]
    fn apply<B: PixelBlend>(d: u32, s: PremultipliedColorU8, cov: u8) -> u32 {
        match cov {
            0 => d,
            255 => B::store(s),
            _ => B::source(d, s, cov),
        }
    }
}

pub(crate) struct SourceOverRule;

impl CompositeRule for SourceOverRule {
    const REPLACES: bool = false;

    #[inline]
    fn apply<B: PixelBlend>(d: u32, s: PremultipliedColorU8, cov: u8) -> u32 {
        if cov == 0 || s.alpha() == 0 {
            d
        } else if cov == 255 && s.is_opaque() {
            B::store(s)
        } else {
            B::src_over(d, s, cov)
        }
    }
}

/// Per-channel coverage blend. The result is always opaque.
#[inline]
pub(crate) fn lcd_src_over<B: PixelBlend>(d: u32, s: PremultipliedColorU8, cov: [u8; 3]) -> u32 {
    if cov == [0, 0, 0] {
        return d;
    }

    if cov == [255, 255, 255] && s.is_opaque() {
        return B::store(s);
    }

    let [_, dr, dg, db] = channels(B::load(d).get());
    let [sa, sr, sg, sb] = channels(s.get());
    let mix = |c: u8, sc: u32, dc: u32| {
        let c = u32::from(c);
        div255(c * sc + (255 - div255(c * sa)) * dc)
    };

    let out = pack(255, mix(cov[0], sr, dr), mix(cov[1], sg, dg), mix(cov[2], sb, db));
    B::store(PremultipliedColorU8::from_argb_unchecked(out))
}
