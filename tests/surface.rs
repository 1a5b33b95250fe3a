use pisces::*;
use pisces::fixed::ONE;

struct Counting {
    data: Vec<u32>,
    width: u32,
    height: u32,
    fail: bool,
    acquired: u32,
    released: u32,
}

impl Counting {
    fn new(width: u32, height: u32) -> Self {
        Counting {
            data: vec![0; (width * height) as usize],
            width,
            height,
            fail: false,
            acquired: 0,
            released: 0,
        }
    }
}

impl Surface for Counting {
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
        PixelFormat::Argb8888Pre
    }

    fn acquire(&mut self) -> Result<(), FillError> {
        if self.fail {
            return Err(FillError::SurfaceUnavailable);
        }

        self.acquired += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.released += 1;
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }
}

#[test]
fn one_acquire_per_call() {
    let mut surface = Counting::new(4, 4);
    {
        let mut renderer = Renderer::new(&mut surface);
        renderer.fill_rect(FixedRect::from_xywh(0, 0, ONE, ONE)).unwrap();
        renderer.clear_rect(0, 0, 2, 2).unwrap();
        renderer.fill_alpha_mask(&[255], 1, 1, 1, 1, 0, 1).unwrap();
        renderer.fill_lcd_alpha_mask(&[255, 255, 255], 1, 1, 3, 1, 0, 3, 0).unwrap();
        renderer.emit_and_clear_alpha_row(None, &mut [FULL_COVERAGE, 0], 2, 0, 0, 0).unwrap();
        assert_eq!(renderer.surface().acquired, 5);
        assert_eq!(renderer.surface().released, 5);
    }
}

#[test]
fn empty_geometry_still_acquires() {
    let mut surface = Counting::new(4, 4);
    let mut deltas = [FULL_COVERAGE, -FULL_COVERAGE];
    {
        let mut renderer = Renderer::new(&mut surface);
        renderer.fill_rect(FixedRect::from_xywh(0, 0, 0, ONE)).unwrap();
        renderer.fill_rect(FixedRect::from_xywh(10 * ONE, 0, ONE, ONE)).unwrap();
        renderer.clear_rect(0, 0, 0, 0).unwrap();
        renderer.fill_alpha_mask(&[], 0, 0, 0, 0, 0, 0).unwrap();
        renderer.set_clip(0, 0, 0, 0);
        renderer.fill_rect(FixedRect::from_xywh(0, 0, ONE, ONE)).unwrap();
        renderer.emit_and_clear_alpha_row(None, &mut deltas, 0, 0, 0, 0).unwrap();
        assert_eq!(renderer.surface().acquired, 6);
        assert_eq!(renderer.surface().released, 6);
    }

    assert_eq!(deltas, [0, 0]);
    assert!(surface.data.iter().all(|p| *p == 0));
}

#[test]
fn rejected_input_still_acquires() {
    let mut surface = Counting::new(4, 4);
    {
        let mut renderer = Renderer::new(&mut surface);
        assert!(renderer.fill_alpha_mask(&[255], 0, 0, 2, 1, 0, 2).is_err());
        assert!(renderer.fill_alpha_mask(&[255], 0, 0, 1, 1, usize::MAX, 1).is_err());
        assert!(renderer.emit_and_clear_alpha_row(None, &mut [FULL_COVERAGE], 0, 0, 3, 0).is_err());
        assert_eq!(renderer.surface().acquired, 3);
        assert_eq!(renderer.surface().released, 3);
    }
}

#[test]
fn mask_out_of_memory_releases() {
    let mut surface = Counting::new(4, 4);
    {
        let config = RenderConfig { max_scratch_len: 1, ..RenderConfig::default() };
        let mut renderer = Renderer::with_config(&mut surface, config);
        assert_eq!(
            renderer.fill_alpha_mask(&[255, 255], 0, 0, 2, 1, 0, 2),
            Err(FillError::OutOfMemory { buffer: BufferKind::Coverage, len: 16 })
        );
        assert_eq!(
            renderer.fill_lcd_alpha_mask(&[255; 3], 0, 0, 3, 1, 0, 3, 0),
            Err(FillError::OutOfMemory { buffer: BufferKind::LcdCoverage, len: 8 })
        );
        assert_eq!(renderer.surface().acquired, 2);
        assert_eq!(renderer.surface().released, 2);
    }

    assert!(surface.data.iter().all(|p| *p == 0));
}

#[test]
fn alpha_row_out_of_memory_releases() {
    let mut surface = Counting::new(4, 4);
    let mut deltas = [FULL_COVERAGE, 0, 0, -FULL_COVERAGE, 0];
    {
        let config = RenderConfig { max_scratch_len: 1, ..RenderConfig::default() };
        let mut renderer = Renderer::with_config(&mut surface, config);
        assert_eq!(
            renderer.emit_and_clear_alpha_row(None, &mut deltas, 0, 0, 3, 0),
            Err(FillError::OutOfMemory { buffer: BufferKind::Coverage, len: 4 })
        );
        assert_eq!(
            renderer.emit_sparse_alpha_row(None, &[(0, FULL_COVERAGE)], 1, 0, 3),
            Err(FillError::OutOfMemory { buffer: BufferKind::Coverage, len: 4 })
        );
        assert_eq!(renderer.surface().acquired, 2);
        assert_eq!(renderer.surface().released, 2);
    }

    assert_eq!(deltas, [0; 5]);
    assert!(surface.data.iter().all(|p| *p == 0));
}

#[test]
fn unavailable_surface_clears_deltas() {
    let mut surface = Counting::new(4, 1);
    surface.fail = true;
    let mut deltas = [FULL_COVERAGE, -FULL_COVERAGE, 0];
    {
        let mut renderer = Renderer::new(&mut surface);
        assert_eq!(
            renderer.emit_and_clear_alpha_row(None, &mut deltas, 0, 0, 1, 0),
            Err(FillError::SurfaceUnavailable)
        );
    }

    assert_eq!(deltas, [0; 3]);
}

#[test]
fn out_of_memory_releases() {
    let mut surface = Counting::new(10, 2);
    {
        let config = RenderConfig { max_scratch_len: 16, ..RenderConfig::default() };
        let mut renderer = Renderer::with_config(&mut surface, config);
        assert!(renderer.set_linear_gradient(0, 0, ONE, 0, &[0xFFFF0000, 0xFF0000FF], SpreadMode::Pad, Transform::identity()));

        let err = renderer.fill_rect(FixedRect::from_xywh(0, 0, 10 * ONE, 2 * ONE)).unwrap_err();
        assert_eq!(err, FillError::OutOfMemory { buffer: BufferKind::Paint, len: 80 });
        assert_eq!(renderer.take_error(), Some(err));
        assert_eq!(renderer.take_error(), None);

        // Solid colors need no paint buffer.
        renderer.reset_paint();
        renderer.fill_rect(FixedRect::from_xywh(0, 0, 10 * ONE, 2 * ONE)).unwrap();
    }

    assert_eq!(surface.acquired, 2);
    assert_eq!(surface.released, 2);
    assert!(surface.data.iter().all(|p| *p == 0xFF000000));
}

#[test]
fn unavailable_surface() {
    let mut surface = Counting::new(2, 2);
    surface.fail = true;
    {
        let mut renderer = Renderer::new(&mut surface);
        assert_eq!(
            renderer.fill_rect(FixedRect::from_xywh(0, 0, ONE, ONE)),
            Err(FillError::SurfaceUnavailable)
        );
        assert_eq!(renderer.take_error(), Some(FillError::SurfaceUnavailable));
    }

    assert_eq!(surface.released, 0);
}

#[test]
fn pixmap_is_exclusive() {
    let mut pixmap = Pixmap::new(1, 1).unwrap();
    pixmap.acquire().unwrap();
    assert_eq!(pixmap.acquire(), Err(FillError::SurfaceUnavailable));
    pixmap.release();
    assert!(pixmap.acquire().is_ok());
    pixmap.release();
}

#[test]
fn borrowed_pixels_keep_padding() {
    let mut data = vec![7u32; 4 * 2];
    {
        let mut pixmap = PixmapMut::from_pixels(&mut data, 3, 2, 4, PixelFormat::Argb8888Pre).unwrap();
        let mut renderer = Renderer::new(&mut pixmap);
        renderer.set_color_rgba8(255, 0, 0, 255);
        renderer.fill_rect(FixedRect::from_xywh_f32(-1.0, -1.0, 10.0, 10.0)).unwrap();
    }

    assert_eq!(data, vec![0xFFFF0000, 0xFFFF0000, 0xFFFF0000, 7, 0xFFFF0000, 0xFFFF0000, 0xFFFF0000, 7]);
}

#[test]
fn borrowed_bytes() {
    let mut data = vec![0u32; 2];
    {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut data);
        let mut pixmap = PixmapMut::from_bytes(bytes, 2, 1, 2, PixelFormat::Argb8888).unwrap();
        let mut renderer = Renderer::new(&mut pixmap);
        renderer.set_color_rgba8(0, 0, 255, 128);
        renderer.clear_rect(0, 0, 1, 1).unwrap();
    }

    assert_eq!(data, vec![0x800000FF, 0]);
}
