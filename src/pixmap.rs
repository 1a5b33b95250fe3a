// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{Color, FillError, PixelFormat, Surface};

use crate::color::ColorU8;

#[cfg(feature = "png-format")]
use crate::color::{premultiply_u8, ALPHA_U8_OPAQUE, PremultipliedColorU8};

/// Number of bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A surface that owns its pixels.
///
/// The data is not aligned, therefore width == stride.
#[derive(Clone, PartialEq)]
pub struct Pixmap {
    data: Vec<u32>,
    width: u32,
    height: u32,
    format: PixelFormat,
    locked: bool,
}

impl Pixmap {
    /// Allocates a new premultiplied pixmap.
    ///
    /// A pixmap is filled with transparent black by default, aka (0, 0, 0, 0).
    ///
    /// Zero size in an error.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new_with_format(width, height, PixelFormat::Argb8888Pre)
    }

    /// Allocates a new pixmap with the specified pixel format.
    pub fn new_with_format(width: u32, height: u32, format: PixelFormat) -> Option<Self> {
        let data_len = data_len(width, height, width as usize)?;

        let mut data = Vec::new();
        data.try_reserve_exact(data_len).ok()?;
        data.resize(data_len, 0);

        Some(Pixmap {
            data,
            width,
            height,
            format,
            locked: false,
        })
    }

    /// Creates a pixmap from packed `0xAARRGGBB` pixels.
    ///
    /// `data` must contain exactly `width * height` pixels.
    pub fn from_vec(data: Vec<u32>, width: u32, height: u32, format: PixelFormat) -> Option<Self> {
        if data.len() != data_len(width, height, width as usize)? {
            return None;
        }

        Some(Pixmap {
            data,
            width,
            height,
            format,
            locked: false,
        })
    }

    /// Decodes a PNG data into a premultiplied `Pixmap`.
    ///
    /// Only 8-bit images are supported.
    /// Index PNGs are not supported.
    #[cfg(feature = "png-format")]
    pub fn decode_png(data: &[u8]) -> Result<Self, png::DecodingError> {
        fn make_custom_png_error(msg: &str) -> png::DecodingError {
            std::io::Error::new(std::io::ErrorKind::Other, msg).into()
        }

        let mut decoder = png::Decoder::new(data);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut img_data = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut img_data)?;

        if info.bit_depth != png::BitDepth::Eight {
            return Err(make_custom_png_error("unsupported bit depth"));
        }

        let channels = match info.color_type {
            png::ColorType::Grayscale => 1,
            png::ColorType::GrayscaleAlpha => 2,
            png::ColorType::Rgb => 3,
            png::ColorType::Rgba => 4,
            png::ColorType::Indexed => {
                return Err(make_custom_png_error("indexed PNG is not supported"));
            }
        };

        let pixels_len = data_len(info.width, info.height, info.width as usize)
            .ok_or_else(|| make_custom_png_error("invalid image size"))?;

        let mut pixels = Vec::with_capacity(pixels_len);
        for p in img_data.chunks(channels).take(pixels_len) {
            let (r, g, b, a) = match *p {
                [gray] => (gray, gray, gray, ALPHA_U8_OPAQUE),
                [gray, a] => (gray, gray, gray, a),
                [r, g, b] => (r, g, b, ALPHA_U8_OPAQUE),
                [r, g, b, a] => (r, g, b, a),
                _ => return Err(make_custom_png_error("truncated image data")),
            };

            let c = PremultipliedColorU8::from_rgba_unchecked(
                premultiply_u8(r, a),
                premultiply_u8(g, a),
                premultiply_u8(b, a),
                a,
            );
            pixels.push(c.get());
        }

        Pixmap::from_vec(pixels, info.width, info.height, PixelFormat::Argb8888Pre)
            .ok_or_else(|| make_custom_png_error("failed to create a pixmap"))
    }

    /// Loads a PNG file into a `Pixmap`.
    ///
    /// Only 8-bit images are supported.
    /// Index PNGs are not supported.
    #[cfg(feature = "png-format")]
    pub fn load_png<P: AsRef<std::path::Path>>(path: P) -> Result<Self, png::DecodingError> {
        // `png::Decoder` is generic over input, which means that it will instance
        // two copies: one for `&[]` and one for `File`. Which will simply bloat the code.
        // Therefore we're using only one type for input.
        let data = std::fs::read(path)?;
        Self::decode_png(&data)
    }

    /// Encodes pixmap into a PNG data.
    #[cfg(feature = "png-format")]
    pub fn encode_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        let mut rgba = Vec::with_capacity(self.data.len() * BYTES_PER_PIXEL);
        for &p in &self.data {
            let c = match self.format {
                PixelFormat::Argb8888 => ColorU8::from_argb(p),
                PixelFormat::Argb8888Pre => PremultipliedColorU8::from_argb_unchecked(p).demultiply(),
            };
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&rgba)?;
        }

        Ok(data)
    }

    /// Saves pixmap as a PNG file.
    #[cfg(feature = "png-format")]
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), png::EncodingError> {
        let data = self.encode_png()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Returns a container that references Pixmap's data.
    pub fn as_mut(&mut self) -> PixmapMut {
        PixmapMut {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            stride: self.width as usize,
            format: self.format,
            locked: false,
        }
    }

    /// Returns pixmap's width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns pixmap's height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns pixmap's pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Fills the entire pixmap with a specified color.
    pub fn fill(&mut self, color: Color) {
        let c = encode_color(color.to_color_u8(), self.format);
        for p in &mut self.data {
            *p = c;
        }
    }

    /// Returns the internal data.
    ///
    /// Byteorder: BGRA on little-endian targets.
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Returns packed `0xAARRGGBB` pixels.
    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    /// Returns a mutable slice of packed pixels.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Returns a packed pixel.
    ///
    /// Returns `None` when position is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width {
            return None;
        }

        let idx = self.width.checked_mul(y)?.checked_add(x)?;
        self.data.get(idx as usize).cloned()
    }

    /// Consumes the internal data.
    pub fn take(self) -> Vec<u32> {
        self.data
    }
}

impl Surface for Pixmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn stride(&self) -> usize {
        self.width as usize
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn acquire(&mut self) -> Result<(), FillError> {
        if self.locked {
            return Err(FillError::SurfaceUnavailable);
        }

        self.locked = true;
        Ok(())
    }

    fn release(&mut self) {
        self.locked = false;
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("data", &"...")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish()
    }
}

/// A surface that references caller-owned pixels.
///
/// Rows may be padded, so stride can be larger than width.
#[derive(PartialEq)]
pub struct PixmapMut<'a> {
    data: &'a mut [u32],
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    locked: bool,
}

impl<'a> PixmapMut<'a> {
    /// Creates a new `PixmapMut` from packed `0xAARRGGBB` pixels.
    ///
    /// `stride` is in pixels and must be >= `width`. The last row doesn't have to be padded.
    /// Zero size in an error.
    pub fn from_pixels(
        data: &'a mut [u32],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Option<Self> {
        if data.len() < data_len(width, height, stride)? {
            return None;
        }

        Some(PixmapMut {
            data,
            width,
            height,
            stride,
            format,
            locked: false,
        })
    }

    /// Creates a new `PixmapMut` from bytes.
    ///
    /// The bytes must be 4-byte aligned. `stride` is in pixels.
    pub fn from_bytes(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Option<Self> {
        let len = data.len() / BYTES_PER_PIXEL * BYTES_PER_PIXEL;
        let pixels: &mut [u32] = bytemuck::try_cast_slice_mut(&mut data[..len]).ok()?;
        PixmapMut::from_pixels(pixels, width, height, stride, format)
    }

    /// Creates a new `Pixmap` from the current data.
    ///
    /// Clones the underlying data and drops row padding.
    pub fn to_owned(&self) -> Pixmap {
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height as usize {
            let start = y * self.stride;
            data.extend_from_slice(&self.data[start..start + self.width as usize]);
        }

        Pixmap {
            data,
            width: self.width,
            height: self.height,
            format: self.format,
            locked: false,
        }
    }

    /// Returns pixmap's width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns pixmap's height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns row stride in pixels.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns a packed pixel.
    ///
    /// Returns `None` when position is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.data.get(y as usize * self.stride + x as usize).cloned()
    }
}

impl Surface for PixmapMut<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn stride(&self) -> usize {
        self.stride
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn acquire(&mut self) -> Result<(), FillError> {
        if self.locked {
            return Err(FillError::SurfaceUnavailable);
        }

        self.locked = true;
        Ok(())
    }

    fn release(&mut self) {
        self.locked = false;
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut *self.data
    }
}

impl std::fmt::Debug for PixmapMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapMut")
            .field("data", &"...")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .finish()
    }
}

/// Packs a straight color the way a surface of `format` stores it.
pub(crate) fn encode_color(c: ColorU8, format: PixelFormat) -> u32 {
    match format {
        PixelFormat::Argb8888 => c.get(),
        PixelFormat::Argb8888Pre => c.premultiply().get(),
    }
}

fn data_len(width: u32, height: u32, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 || (width as usize) > stride {
        return None;
    }

    // Keep coordinates addressable by `i32` geometry.
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return None;
    }

    stride
        .checked_mul(height as usize - 1)?
        .checked_add(width as usize)
}
