use pisces::*;
use pisces::fixed::{HALF, ONE};

const RED: u32 = 0xFFFF0000;
const BLUE: u32 = 0xFF0000FF;

fn fill_row(spread: SpreadMode) -> Pixmap {
    let mut pixmap = Pixmap::new(12, 1).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);
        assert!(renderer.set_linear_gradient(0, 0, 4 * ONE, 0, &[RED, BLUE], spread, Transform::identity()));
        renderer.fill_rect(FixedRect::from_xywh(0, 0, 12 * ONE, ONE)).unwrap();
    }
    pixmap
}

fn red(p: u32) -> u32 {
    (p >> 16) & 0xFF
}

fn blue(p: u32) -> u32 {
    p & 0xFF
}

// Pixel centers sample t = 0.0, 0.5, 1.0, 1.5 and 2.0.
fn sample_half_steps(spread: SpreadMode) -> Pixmap {
    let mut pixmap = Pixmap::new(5, 1).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);
        assert!(renderer.set_linear_gradient(HALF, 0, HALF + 2 * ONE, 0, &[RED, BLUE], spread, Transform::identity()));
        renderer.fill_rect(FixedRect::from_xywh(0, 0, 5 * ONE, ONE)).unwrap();
    }
    pixmap
}

#[test]
fn repeat_samples() {
    let pixmap = sample_half_steps(SpreadMode::Repeat);
    let p = pixmap.pixels();
    assert_eq!(p[0], RED);
    assert_eq!(p[2], RED);
    assert_eq!(p[4], RED);

    // 1.5 wraps onto the middle of the ramp.
    assert_eq!(p[3], p[1]);
    assert!((red(p[3]) as i32 - 127).abs() <= 1);
    assert!((blue(p[3]) as i32 - 128).abs() <= 1);
}

#[test]
fn pad_samples() {
    let pixmap = sample_half_steps(SpreadMode::Pad);
    let p = pixmap.pixels();
    assert_eq!(p[0], RED);
    assert_ne!(p[1], RED);
    assert_ne!(p[1], BLUE);
    assert_eq!(&p[2..], &[BLUE, BLUE, BLUE]);
}

#[test]
fn linear_pad() {
    let pixmap = fill_row(SpreadMode::Pad);
    let p = pixmap.pixels();

    assert!(red(p[0]) > blue(p[0]));
    assert!(red(p[3]) < blue(p[3]));
    for x in 0..3 {
        assert!(red(p[x]) > red(p[x + 1]));
    }
    assert!(p[4..].iter().all(|c| *c == BLUE));
    assert!(p.iter().all(|c| c >> 24 == 0xFF));
}

#[test]
fn linear_repeat() {
    let pixmap = fill_row(SpreadMode::Repeat);
    let p = pixmap.pixels();

    assert_eq!(&p[0..4], &p[4..8]);
    assert_eq!(&p[0..4], &p[8..12]);
}

#[test]
fn linear_reflect() {
    let pixmap = fill_row(SpreadMode::Reflect);
    let p = pixmap.pixels();

    // Mirrored around x = 4.
    assert_eq!(p[4], p[3]);
    assert_eq!(p[5], p[2]);
    assert_eq!(p[7], p[0]);
    // And back around x = 8.
    assert_eq!(p[8], p[0]);
}

#[test]
fn linear_vertical_with_transform() {
    let mut pixmap = Pixmap::new(2, 4).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);
        // Destination y is doubled before reaching gradient space.
        let ts = Transform::from_scale(ONE, 2 * ONE);
        assert!(renderer.set_linear_gradient(0, 0, 0, 4 * ONE, &[RED, BLUE], SpreadMode::Pad, ts));
        renderer.fill_rect(FixedRect::from_xywh(0, 0, 2 * ONE, 4 * ONE)).unwrap();
    }

    assert_eq!(pixmap.pixel(0, 0), pixmap.pixel(1, 0));
    assert!(red(pixmap.pixel(0, 0).unwrap()) > red(pixmap.pixel(0, 1).unwrap()));
    assert_eq!(pixmap.pixel(0, 2), Some(BLUE));
    assert_eq!(pixmap.pixel(1, 3), Some(BLUE));
}

#[test]
fn radial_pad() {
    let mut pixmap = Pixmap::new(10, 10).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);
        let c = 5 * ONE;
        assert!(renderer.set_radial_gradient(c, c, c, c, 5 * ONE, &[RED, BLUE], SpreadMode::Pad, Transform::identity()));
        renderer.fill_rect(FixedRect::from_xywh(0, 0, 10 * ONE, 10 * ONE)).unwrap();
    }

    let center = pixmap.pixel(4, 4).unwrap();
    assert!(red(center) > blue(center));
    assert_eq!(pixmap.pixel(0, 0), Some(BLUE));
    assert_eq!(pixmap.pixel(9, 9), Some(BLUE));
    // Symmetric around the center.
    assert_eq!(pixmap.pixel(4, 4), pixmap.pixel(5, 5));
    assert_eq!(pixmap.pixel(2, 5), pixmap.pixel(7, 4));
}

#[test]
fn radial_focus_outside_is_accepted() {
    let mut pixmap = Pixmap::new(4, 4).unwrap();
    let mut renderer = Renderer::new(&mut pixmap);
    let c = 2 * ONE;
    assert!(renderer.set_radial_gradient(c, c, 10 * ONE, c, ONE, &[RED, BLUE], SpreadMode::Repeat, Transform::identity()));
    renderer.fill_rect(FixedRect::from_xywh(0, 0, 4 * ONE, 4 * ONE)).unwrap();
    assert!(renderer.take_error().is_none());
}

#[test]
fn invalid_gradients_keep_paint() {
    let mut pixmap = Pixmap::new(1, 1).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);
        renderer.set_color_rgba8(0, 255, 0, 255);

        assert!(!renderer.set_linear_gradient(ONE, ONE, ONE, ONE, &[RED, BLUE], SpreadMode::Pad, Transform::identity()));
        assert!(!renderer.set_linear_gradient(0, 0, ONE, 0, &[], SpreadMode::Pad, Transform::identity()));
        assert!(!renderer.set_radial_gradient(0, 0, 0, 0, 0, &[RED], SpreadMode::Pad, Transform::identity()));
        assert!(renderer.shader().is_none());

        renderer.fill_rect(FixedRect::from_xywh(0, 0, ONE, ONE)).unwrap();
    }

    assert_eq!(pixmap.pixel(0, 0), Some(0xFF00FF00));
}

#[test]
fn translucent_ramp_blends() {
    let mut pixmap = Pixmap::new(2, 1).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);
        renderer.set_color_rgba8(0, 0, 255, 255);
        renderer.clear_rect(0, 0, 2, 1).unwrap();

        assert!(renderer.set_linear_gradient(0, 0, 2 * ONE, 0, &[0x80FF0000], SpreadMode::Pad, Transform::identity()));
        renderer.fill_rect(FixedRect::from_xywh(0, 0, 2 * ONE, ONE)).unwrap();
    }

    assert_eq!(pixmap.pixels(), &[0xFF80007F, 0xFF80007F]);
}

#[test]
fn set_color_resets_shader() {
    let mut pixmap = Pixmap::new(1, 1).unwrap();
    let mut renderer = Renderer::new(&mut pixmap);
    assert!(renderer.set_linear_gradient(0, 0, ONE, 0, &[RED, BLUE], SpreadMode::Pad, Transform::identity()));
    assert!(renderer.shader().is_some());
    renderer.set_color(Color::WHITE);
    assert!(renderer.shader().is_none());

    assert!(renderer.set_linear_gradient(0, 0, ONE, 0, &[RED, BLUE], SpreadMode::Pad, Transform::identity()));
    renderer.reset_paint();
    assert!(renderer.shader().is_none());
}
