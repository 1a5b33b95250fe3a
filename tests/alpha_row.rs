use pisces::*;

const RED: u32 = 0xFFFF0000;

fn red_renderer(pixmap: &mut Pixmap) -> Renderer<Pixmap> {
    let mut renderer = Renderer::new(pixmap);
    renderer.set_color_rgba8(255, 0, 0, 255);
    renderer
}

#[test]
fn dense_span() {
    let mut deltas = vec![0; 9];
    deltas[0] = FULL_COVERAGE;
    deltas[5] = -FULL_COVERAGE;

    let mut pixmap = Pixmap::new(8, 1).unwrap();
    red_renderer(&mut pixmap).emit_and_clear_alpha_row(None, &mut deltas, 0, 0, 7, 0).unwrap();

    assert_eq!(pixmap.pixels(), &[RED, RED, RED, RED, RED, 0, 0, 0]);
    assert!(deltas.iter().all(|d| *d == 0));
}

#[test]
fn partial_coverage() {
    let mut deltas = vec![128, 64, -192, 0];

    let mut pixmap = Pixmap::new(4, 1).unwrap();
    red_renderer(&mut pixmap).emit_and_clear_alpha_row(None, &mut deltas, 0, 0, 3, 0).unwrap();

    assert_eq!(pixmap.pixels(), &[0x80800000, 0xC0C00000, 0, 0]);
}

#[test]
fn alpha_map() {
    let mut map = vec![0u8; 257];
    map[128] = 200;
    map[256] = 255;
    let mut deltas = vec![128, 128, -256, 0];

    let mut pixmap = Pixmap::new(3, 1).unwrap();
    red_renderer(&mut pixmap).emit_and_clear_alpha_row(Some(&map), &mut deltas, 0, 0, 2, 0).unwrap();

    assert_eq!(pixmap.pixels(), &[0xC8C80000, RED, 0]);
}

#[test]
fn row_offset_and_clip() {
    let mut deltas = vec![0; 9];
    deltas[0] = FULL_COVERAGE;
    deltas[5] = -FULL_COVERAGE;

    let mut pixmap = Pixmap::new(8, 2).unwrap();
    {
        let mut renderer = red_renderer(&mut pixmap);
        renderer.set_clip(3, 0, 3, 2);
        renderer.emit_and_clear_alpha_row(None, &mut deltas, 1, 1, 8, 0).unwrap();
    }

    // The row starts at x = 1 and is covered up to x = 5.
    assert_eq!(&pixmap.pixels()[8..], &[0, 0, 0, RED, RED, RED, 0, 0]);
    assert!(pixmap.pixels()[..8].iter().all(|p| *p == 0));
    assert!(deltas.iter().all(|d| *d == 0));
}

#[test]
fn clipped_out_row_still_clears() {
    let mut deltas = vec![FULL_COVERAGE, 0, -FULL_COVERAGE];

    let mut pixmap = Pixmap::new(2, 1).unwrap();
    red_renderer(&mut pixmap).emit_and_clear_alpha_row(None, &mut deltas, 3, 0, 1, 7).unwrap();

    assert!(pixmap.pixels().iter().all(|p| *p == 0));
    assert_eq!(deltas, vec![0, 0, 0]);
}

#[test]
fn deltas_too_small() {
    let mut deltas = vec![FULL_COVERAGE, 0];

    let mut pixmap = Pixmap::new(8, 1).unwrap();
    let mut renderer = red_renderer(&mut pixmap);
    assert_eq!(
        renderer.emit_and_clear_alpha_row(None, &mut deltas, 0, 0, 7, 0),
        Err(FillError::DeltasTooSmall { required: 8, actual: 2 })
    );
    assert_eq!(renderer.take_error(), Some(FillError::DeltasTooSmall { required: 8, actual: 2 }));
}

#[test]
fn sparse_span() {
    let mut pixmap = Pixmap::new(8, 1).unwrap();
    red_renderer(&mut pixmap)
        .emit_sparse_alpha_row(None, &[(0, FULL_COVERAGE), (5, -FULL_COVERAGE)], 0, 0, 7)
        .unwrap();

    assert_eq!(pixmap.pixels(), &[RED, RED, RED, RED, RED, 0, 0, 0]);
}

#[test]
fn rows_with_gradient() {
    let mut pixmap = Pixmap::new(4, 1).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);
        assert!(renderer.set_linear_gradient(
            0, 0, fixed::from_i32(4), 0,
            &[RED, 0xFF0000FF],
            SpreadMode::Pad,
            Transform::identity(),
        ));
        let mut deltas = vec![FULL_COVERAGE, 0, 0, 0, -FULL_COVERAGE];
        renderer.emit_and_clear_alpha_row(None, &mut deltas, 0, 0, 3, 0).unwrap();
    }

    let mut expected = Pixmap::new(4, 1).unwrap();
    {
        let mut renderer = Renderer::new(&mut expected);
        assert!(renderer.set_linear_gradient(
            0, 0, fixed::from_i32(4), 0,
            &[RED, 0xFF0000FF],
            SpreadMode::Pad,
            Transform::identity(),
        ));
        renderer.fill_rect(FixedRect::from_xywh(0, 0, fixed::from_i32(4), fixed::ONE)).unwrap();
    }

    assert_eq!(pixmap, expected);
}
