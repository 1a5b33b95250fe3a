/*!
`pisces` is a small software rasterizer and compositor.

It fills fixed-point rectangles, coverage masks and rasterizer delta rows
with solid colors, gradients or textures, compositing into 32-bit ARGB
surfaces with either straight or premultiplied alpha.

```
use pisces::*;

let mut pixmap = Pixmap::new(16, 16).unwrap();
let mut renderer = Renderer::new(&mut pixmap);
renderer.set_color_rgba8(50, 127, 150, 200);
renderer.fill_rect(FixedRect::from_xywh_f32(2.5, 2.5, 10.0, 10.0)).unwrap();
```

See the `demos/` directory for more.
*/

#![doc(html_root_url = "https://docs.rs/pisces/0.1.0")]
#![warn(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::identity_op)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

mod accumulator;
mod blend_mode;
mod blitter;
mod clip;
mod color;
mod config;
mod error;
mod mask_fill;
mod pixmap;
mod rect_fill;
mod renderer;
mod scratch;
mod shaders;
mod surface;

pub use pisces_geom::{fixed, FDot16, FixedRect, IntRect, Transform};

pub use accumulator::{LcdGammaTable, FULL_COVERAGE};
pub use blend_mode::BlendMode;
pub use clip::ClipRect;
pub use color::{premultiply_u8, demultiply_u8, AlphaU8, ALPHA_U8_OPAQUE, ALPHA_U8_TRANSPARENT};
pub use color::{Color, ColorU8, PremultipliedColorU8};
pub use config::{RenderConfig, MAX_BATCH_ROWS};
pub use error::{BufferKind, FillError};
pub use pixmap::{Pixmap, PixmapMut, BYTES_PER_PIXEL};
pub use renderer::Renderer;
pub use shaders::{apply_spread, GradientRamp, GradientStop, SpreadMode, RAMP_SIZE};
pub use shaders::{EdgeMode, EdgeRules, FilterQuality, LinearGradient, RadialGradient, Shader, Texture};
pub use surface::{PixelFormat, Surface, SurfaceLock, SurfaceView};
