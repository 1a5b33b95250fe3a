// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::FillError;

/// A destination pixel format.
///
/// Pixels are always `u32` values packed as `0xAARRGGBB`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PixelFormat {
    /// Straight (unpremultiplied) alpha.
    Argb8888,
    /// Premultiplied alpha.
    Argb8888Pre,
}

impl Default for PixelFormat {
    fn default() -> Self {
        PixelFormat::Argb8888Pre
    }
}

/// A destination that a [`Renderer`](crate::Renderer) draws into.
///
/// Every fill brackets its pixel access with exactly one `acquire` and one
/// `release`, also when it fails halfway.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Row stride in pixels. Must be >= width.
    fn stride(&self) -> usize;

    /// Pixel format.
    fn format(&self) -> PixelFormat;

    /// Grants exclusive pixel access until [`release`](Surface::release).
    fn acquire(&mut self) -> Result<(), FillError>;

    /// Ends pixel access.
    fn release(&mut self);

    /// Returns all pixels. Only called between `acquire` and `release`.
    ///
    /// The slice must hold at least `stride * (height - 1) + width` pixels.
    fn pixels_mut(&mut self) -> &mut [u32];
}

/// A scoped surface acquisition.
///
/// Releases the surface on drop.
pub struct SurfaceLock<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: Surface + ?Sized> SurfaceLock<'s, S> {
    /// Acquires the surface.
    pub fn acquire(surface: &'s mut S) -> Result<Self, FillError> {
        surface.acquire()?;
        Ok(SurfaceLock { surface })
    }

    /// Returns a view of the locked pixels.
    pub fn view(&mut self) -> SurfaceView<'_> {
        let width = self.surface.width() as usize;
        let height = self.surface.height() as usize;
        let stride = self.surface.stride();
        let format = self.surface.format();
        SurfaceView {
            data: self.surface.pixels_mut(),
            width,
            height,
            stride,
            format,
        }
    }
}

impl<S: Surface + ?Sized> Drop for SurfaceLock<'_, S> {
    fn drop(&mut self) {
        self.surface.release();
    }
}

impl<S: Surface + ?Sized> std::fmt::Debug for SurfaceLock<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceLock")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .finish()
    }
}

/// Row access into locked surface pixels.
#[derive(Debug)]
pub struct SurfaceView<'a> {
    data: &'a mut [u32],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> SurfaceView<'a> {
    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns `len` pixels of row `y` starting at column `x`.
    ///
    /// The span is clamped to the surface, so a span outside of it is empty.
    pub fn row_mut(&mut self, x: usize, y: usize, len: usize) -> &mut [u32] {
        if y >= self.height || x >= self.width {
            return &mut [];
        }

        let len = len.min(self.width - x);
        let start = y * self.stride + x;
        let end = (start + len).min(self.data.len());
        let start = start.min(end);
        &mut self.data[start..end]
    }

    /// Overwrites a block of pixels with `value`.
    ///
    /// The first row is filled and then copied into the remaining rows.
    /// The block is clamped to the surface.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, value: u32) {
        if x >= self.width || y >= self.height {
            return;
        }

        let width = width.min(self.width - x);
        let height = height.min(self.height - y);
        if width == 0 || height == 0 {
            return;
        }

        let first = y * self.stride + x;
        if first + width > self.data.len() {
            return;
        }

        self.data[first..first + width].fill(value);
        for row in 1..height {
            let start = first + row * self.stride;
            if start + width > self.data.len() {
                break;
            }

            self.data.copy_within(first..first + width, start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting {
        data: Vec<u32>,
        acquired: u32,
        released: u32,
    }

    impl Surface for Counting {
        fn width(&self) -> u32 { 3 }
        fn height(&self) -> u32 { 2 }
        fn stride(&self) -> usize { 4 }
        fn format(&self) -> PixelFormat { PixelFormat::Argb8888Pre }
        fn acquire(&mut self) -> Result<(), FillError> {
            self.acquired += 1;
            Ok(())
        }
        fn release(&mut self) { self.released += 1; }
        fn pixels_mut(&mut self) -> &mut [u32] { &mut self.data }
    }

    #[test]
    fn lock_releases_on_drop() {
        let mut s = Counting { data: vec![0; 7], acquired: 0, released: 0 };
        {
            let mut lock = SurfaceLock::acquire(&mut s).unwrap();
            let mut view = lock.view();
            view.row_mut(1, 1, 10).iter_mut().for_each(|p| *p = 1);
        }
        assert_eq!(s.acquired, 1);
        assert_eq!(s.released, 1);
        assert_eq!(s.data, vec![0, 0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn fill_rect_is_clamped() {
        let mut s = Counting { data: vec![9; 7], acquired: 0, released: 0 };
        {
            let mut lock = SurfaceLock::acquire(&mut s).unwrap();
            let mut view = lock.view();
            view.fill_rect(1, 0, 5, 5, 0);
        }
        assert_eq!(s.data, vec![9, 0, 0, 9, 9, 0, 0]);
    }

    #[test]
    fn row_outside_is_empty() {
        let mut s = Counting { data: vec![0; 7], acquired: 0, released: 0 };
        let mut lock = SurfaceLock::acquire(&mut s).unwrap();
        let mut view = lock.view();
        assert!(view.row_mut(0, 2, 3).is_empty());
        assert!(view.row_mut(3, 0, 3).is_empty());
        assert_eq!(view.row_mut(0, 0, 3).len(), 3);
    }
}
