use bencher::{benchmark_group, benchmark_main, Bencher};
use pisces::*;
use pisces::fixed::ONE;

const RAMP: &[u32] = &[0xC8327F96, 0xB4DC8C4B];

fn linear(bencher: &mut Bencher) {
    let mut pixmap = Pixmap::new(1000, 1000).unwrap();
    let mut renderer = Renderer::new(&mut pixmap);
    renderer.set_linear_gradient(
        100 * ONE, 100 * ONE, 900 * ONE, 900 * ONE,
        RAMP,
        SpreadMode::Pad,
        Transform::identity(),
    );

    let rect = FixedRect::from_xywh(0, 0, 1000 * ONE, 1000 * ONE);

    bencher.iter(|| {
        renderer.fill_rect(rect).unwrap();
    });
}

fn radial(bencher: &mut Bencher) {
    let mut pixmap = Pixmap::new(1000, 1000).unwrap();
    let mut renderer = Renderer::new(&mut pixmap);
    renderer.set_radial_gradient(
        500 * ONE, 500 * ONE, 400 * ONE, 450 * ONE, 400 * ONE,
        RAMP,
        SpreadMode::Reflect,
        Transform::identity(),
    );

    let rect = FixedRect::from_xywh(0, 0, 1000 * ONE, 1000 * ONE);

    bencher.iter(|| {
        renderer.fill_rect(rect).unwrap();
    });
}

fn texture_bilinear(bencher: &mut Bencher) {
    let texels: Vec<u32> = (0..256 * 256).map(|i| 0xFF000000 | (i as u32).wrapping_mul(2654435761) >> 8).collect();
    let mut pixmap = Pixmap::new(1000, 1000).unwrap();
    let mut renderer = Renderer::new(&mut pixmap);
    let texture = Texture::new(&texels, 256, 256, 256, PixelFormat::Argb8888Pre)
        .unwrap()
        .with_repeat(true)
        .with_quality(FilterQuality::Bilinear)
        .with_transform(Transform::from_row_f32(0.7, 0.1, -0.1, 0.7, 3.5, 1.25));
    renderer.set_texture(texture);

    let rect = FixedRect::from_xywh(0, 0, 1000 * ONE, 1000 * ONE);

    bencher.iter(|| {
        renderer.fill_rect(rect).unwrap();
    });
}

benchmark_group!(benches, linear, radial, texture_bilinear);
benchmark_main!(benches);
