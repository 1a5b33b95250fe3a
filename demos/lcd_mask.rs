use pisces::*;

fn main() {
    const W: usize = 200;
    const H: usize = 60;

    // A soft horizontal bar with a sub-pixel shifted edge on every channel.
    let mut mask = vec![0u8; W * 3 * H];
    for y in 10..50 {
        for x in 0..W * 3 {
            let d = (x as i32 - 300).abs();
            mask[y * W * 3 + x] = (255 - (d * 255 / 300).min(255)) as u8;
        }
    }

    let mut pixmap = Pixmap::new(W as u32, H as u32 * 2).unwrap();
    {
        let mut renderer = Renderer::new(&mut pixmap);
        renderer.set_color_rgba8(255, 255, 255, 255);
        renderer.clear_rect(0, 0, W as u32, H as u32 * 2).unwrap();

        renderer.set_color_rgba8(20, 20, 20, 255);
        renderer.fill_lcd_alpha_mask(&mask, 0, 0, (W * 3) as u32, H as u32, 0, W * 3, 0).unwrap();

        renderer.set_lcd_gamma(2.2);
        renderer.fill_lcd_alpha_mask(&mask, 0, H as i32, (W * 3) as u32, H as u32, 0, W * 3, 0).unwrap();
    }

    pixmap.save_png("image.png").unwrap();
}
