// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Geometry primitives used by [pisces](https://docs.rs/pisces).
//!
//! All geometry that reaches the scan converter is expressed in S15.16 fixed point,
//! which keeps rounding identical on every platform.

#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

pub mod fixed;
mod floating_point;
mod rect;
mod transform;

pub use fixed::FDot16;
pub use floating_point::SaturateCast;
pub use rect::{FixedRect, IntRect};
pub use transform::Transform;
