use pisces::*;
use pisces::fixed::ONE;

fn main() {
    let ramp = [0xC8327F96, 0xB4DC8C4B, 0xFF1E5A28];

    let mut pixmap = Pixmap::new(1000, 1000).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);

        renderer.set_linear_gradient(
            100 * ONE, 100 * ONE, 400 * ONE, 400 * ONE,
            &ramp,
            SpreadMode::Reflect,
            Transform::identity(),
        );
        renderer.fill_rect(FixedRect::from_xywh(0, 0, 1000 * ONE, 500 * ONE)).unwrap();

        renderer.set_radial_gradient(
            500 * ONE, 750 * ONE, 420 * ONE, 700 * ONE, 200 * ONE,
            &ramp,
            SpreadMode::Repeat,
            Transform::identity(),
        );
        renderer.fill_rect(FixedRect::from_xywh(0, 500 * ONE, 1000 * ONE, 500 * ONE)).unwrap();
    }

    pixmap.save_png("image.png").unwrap();
}
