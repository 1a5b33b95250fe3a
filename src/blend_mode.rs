// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// A compositing rule.
///
/// All rules operate on premultiplied source colors.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum BlendMode {
    /// Replaces destination with zero: fully transparent.
    Clear,
    /// Replaces destination.
    Source,
    /// Source over destination.
    SourceOver,
}

impl Default for BlendMode {
    fn default() -> Self {
        BlendMode::SourceOver
    }
}

impl BlendMode {
    /// SourceOver with an opaque source is the same as Source.
    pub(crate) fn strength_reduce(self, source_is_opaque: bool) -> Self {
        if self == BlendMode::SourceOver && source_is_opaque {
            BlendMode::Source
        } else {
            self
        }
    }
}
