use pisces::*;

fn main() {
    // An 8x8 checkerboard.
    let texels: Vec<u32> = (0..64)
        .map(|i| if (i % 8 + i / 8) % 2 == 0 { 0xFFFFFFFF } else { 0xFF3050A0 })
        .collect();

    let mut pixmap = Pixmap::new(600, 600).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);

        let ts = Transform::from_row_f32(0.1, 0.02, -0.02, 0.1, 0.0, 0.0);
        let texture = Texture::new(&texels, 8, 8, 8, PixelFormat::Argb8888Pre)
            .unwrap()
            .with_transform(ts)
            .with_repeat(true)
            .with_quality(FilterQuality::Bilinear);
        renderer.set_texture(texture);
        renderer.fill_rect(FixedRect::from_xywh_f32(20.5, 20.5, 560.0, 260.0)).unwrap();

        let texture = Texture::new(&texels, 8, 8, 8, PixelFormat::Argb8888Pre)
            .unwrap()
            .with_transform(Transform::from_row_f32(0.05, 0.0, 0.0, 0.05, -1.0, -16.0))
            .with_edges(EdgeRules::uniform(EdgeMode::Pad));
        renderer.set_texture(texture);
        renderer.fill_rect(FixedRect::from_xywh_f32(20.5, 320.5, 160.0, 160.0)).unwrap();
    }

    pixmap.save_png("image.png").unwrap();
}
