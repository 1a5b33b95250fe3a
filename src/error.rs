// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// A scratch buffer kind, used for error reporting.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BufferKind {
    /// Generated paint colors.
    Paint,
    /// Per-pixel coverage.
    Coverage,
    /// Per-pixel LCD coverage triples.
    LcdCoverage,
}

impl std::fmt::Display for BufferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferKind::Paint => write!(f, "paint"),
            BufferKind::Coverage => write!(f, "coverage"),
            BufferKind::LcdCoverage => write!(f, "LCD coverage"),
        }
    }
}

/// A fill failure.
///
/// Degenerate geometry is never an error, it simply draws nothing.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum FillError {
    /// A scratch buffer could not be grown.
    #[error("failed to allocate a {buffer} buffer of {len} elements")]
    OutOfMemory {
        /// Which buffer failed.
        buffer: BufferKind,
        /// Requested number of elements.
        len: usize,
    },

    /// The destination surface could not be acquired.
    #[error("destination surface is not available")]
    SurfaceUnavailable,

    /// A caller mask is shorter than its declared geometry requires.
    #[error("mask has {actual} bytes, but at least {required} are required")]
    MaskTooSmall {
        /// Minimal required length.
        required: usize,
        /// Actual length.
        actual: usize,
    },

    /// A delta row is shorter than the span it has to cover.
    #[error("alpha deltas have {actual} entries, but at least {required} are required")]
    DeltasTooSmall {
        /// Minimal required length.
        required: usize,
        /// Actual length.
        actual: usize,
    },
}
