// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{BufferKind, FillError};

/// Reusable per-renderer buffers.
///
/// Contents never need to survive a call, only the allocations are kept.
#[derive(Default, Debug)]
pub(crate) struct Scratch {
    pub paint: Vec<u32>,
    pub coverage: Vec<u8>,
    pub lcd: Vec<[u8; 3]>,
}

impl Scratch {
    /// Returns the paint and coverage buffers with at least the requested lengths.
    pub fn paint_and_coverage(
        &mut self,
        paint_len: usize,
        coverage_len: usize,
        max_len: usize,
    ) -> Result<(&mut [u32], &mut [u8]), FillError> {
        let paint = grow(&mut self.paint, paint_len, max_len, BufferKind::Paint)?;
        let coverage = grow(&mut self.coverage, coverage_len, max_len, BufferKind::Coverage)?;
        Ok((paint, coverage))
    }

    pub fn paint_and_lcd(
        &mut self,
        paint_len: usize,
        lcd_len: usize,
        max_len: usize,
    ) -> Result<(&mut [u32], &mut [[u8; 3]]), FillError> {
        let paint = grow(&mut self.paint, paint_len, max_len, BufferKind::Paint)?;
        let lcd = grow(&mut self.lcd, lcd_len, max_len, BufferKind::LcdCoverage)?;
        Ok((paint, lcd))
    }
}

fn grow<T: Copy + Default>(
    buf: &mut Vec<T>,
    len: usize,
    max_len: usize,
    buffer: BufferKind,
) -> Result<&mut [T], FillError> {
    if len > max_len {
        log::debug!("{} buffer of {} elements exceeds the {} limit", buffer, len, max_len);
        return Err(FillError::OutOfMemory { buffer, len });
    }

    if buf.len() < len {
        buf.try_reserve(len - buf.len())
            .map_err(|_| FillError::OutOfMemory { buffer, len })?;
        buf.resize(len, T::default());
    }

    Ok(&mut buf[..len])
}
