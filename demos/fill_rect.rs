use pisces::*;

fn main() {
    let mut pixmap = Pixmap::new(1000, 1000).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);

        renderer.set_color_rgba8(50, 127, 150, 200);
        renderer.fill_rect(FixedRect::from_xywh_f32(60.3, 60.7, 600.5, 500.25)).unwrap();

        renderer.set_color_rgba8(220, 140, 75, 180);
        renderer.fill_rect(FixedRect::from_xywh_f32(340.5, 400.5, 600.0, 540.0)).unwrap();

        // Punch a hole.
        renderer.set_blend_mode(BlendMode::Clear);
        renderer.fill_rect(FixedRect::from_xywh_f32(450.25, 450.25, 100.5, 100.5)).unwrap();
    }

    pixmap.save_png("image.png").unwrap();
}
