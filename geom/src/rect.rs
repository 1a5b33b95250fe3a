// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::convert::TryFrom;

use crate::fixed::{self, FDot16};

/// An integer rectangle.
///
/// # Guarantees
///
/// - Width and height are in 1..=i32::MAX range.
/// - x+width and y+height does not overflow.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct IntRect {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl IntRect {
    /// Creates a new `IntRect`.
    #[inline]
    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        x.checked_add(i32::try_from(width).ok()?)?;
        y.checked_add(i32::try_from(height).ok()?)?;

        Some(IntRect {
            x,
            y,
            width,
            height,
        })
    }

    /// Creates a new `IntRect` from exclusive right and bottom edges.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Option<Self> {
        let width = u32::try_from(right.checked_sub(left)?).ok()?;
        let height = u32::try_from(bottom.checked_sub(top)?).ok()?;
        IntRect::from_xywh(left, top, width, height)
    }

    /// Returns rect's X position.
    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Returns rect's Y position.
    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns rect's width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns rect's height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns rect's left edge.
    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Returns rect's top edge.
    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Returns rect's right edge. Exclusive.
    #[inline]
    pub fn right(&self) -> i32 {
        // No overflow is guaranteed by constructors.
        self.x + self.width as i32
    }

    /// Returns rect's bottom edge. Exclusive.
    #[inline]
    pub fn bottom(&self) -> i32 {
        // No overflow is guaranteed by constructors.
        self.y + self.height as i32
    }

    /// Checks that the rect completely includes `other`.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Returns an intersection of two rectangles.
    ///
    /// Returns `None` when they do not overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);

        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        IntRect::from_ltrb(left, top, right, bottom)
    }
}

/// A rectangle in 16.16 fixed point.
///
/// Unlike [`IntRect`], the size may be zero or negative, which simply means
/// that nothing is covered.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct FixedRect {
    pub x: FDot16,
    pub y: FDot16,
    pub w: FDot16,
    pub h: FDot16,
}

impl FixedRect {
    /// Creates a new rect from 16.16 values.
    #[inline]
    pub fn from_xywh(x: FDot16, y: FDot16, w: FDot16, h: FDot16) -> Self {
        FixedRect { x, y, w, h }
    }

    /// Creates a new rect from floats, converting each value with [`fixed::from_f32`].
    pub fn from_xywh_f32(x: f32, y: f32, w: f32, h: f32) -> Self {
        FixedRect {
            x: fixed::from_f32(x),
            y: fixed::from_f32(y),
            w: fixed::from_f32(w),
            h: fixed::from_f32(h),
        }
    }

    /// Checks that the rect has a positive area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Returns the right edge, saturating on overflow.
    #[inline]
    pub fn right(&self) -> FDot16 {
        self.x.saturating_add(self.w)
    }

    /// Returns the bottom edge, saturating on overflow.
    #[inline]
    pub fn bottom(&self) -> FDot16 {
        self.y.saturating_add(self.h)
    }
}
