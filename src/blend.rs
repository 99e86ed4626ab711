//! Alpha compositing of sprites onto frame canvases

use image::{Rgba, RgbaImage};

/// Composite `sprite` over `canvas` with its top-left corner at (x, y).
///
/// Uses Porter-Duff "source over". The position may be negative or extend past
/// the canvas; only the overlapping part is drawn.
pub fn composite_over(canvas: &mut RgbaImage, sprite: &RgbaImage, x: i64, y: i64) {
    let canvas_width = canvas.width() as i64;
    let canvas_height = canvas.height() as i64;

    for (sy, row) in sprite.rows().enumerate() {
        let dest_y = y + sy as i64;
        if dest_y < 0 {
            continue;
        }
        if dest_y >= canvas_height {
            break;
        }

        for (sx, src) in row.enumerate() {
            let dest_x = x + sx as i64;
            if dest_x < 0 {
                continue;
            }
            if dest_x >= canvas_width {
                break;
            }

            // Fully transparent source, skip
            if src[3] == 0 {
                continue;
            }

            let dst = canvas.get_pixel(dest_x as u32, dest_y as u32);
            let blended = source_over(src, dst);
            canvas.put_pixel(dest_x as u32, dest_y as u32, blended);
        }
    }
}

/// Blend a source pixel over a destination pixel.
pub fn source_over(src: &Rgba<u8>, dst: &Rgba<u8>) -> Rgba<u8> {
    if src[3] == 255 {
        return *src;
    }

    let src_alpha = src[3] as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;

    // out_alpha = src_alpha + dst_alpha * (1 - src_alpha)
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    // out_color = (src * src_alpha + dst * dst_alpha * (1 - src_alpha)) / out_alpha
    let channel = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_opaque_source_replaces() {
        assert_eq!(source_over(&RED, &BLACK), RED);
    }

    #[test]
    fn test_half_alpha_over_opaque() {
        let src = Rgba([255, 255, 255, 128]);
        let out = source_over(&src, &BLACK);
        assert_eq!(out[3], 255);
        assert!(out[0] >= 127 && out[0] <= 129, "got {}", out[0]);
    }

    #[test]
    fn test_over_transparent_keeps_source() {
        let src = Rgba([10, 20, 30, 100]);
        let out = source_over(&src, &Rgba([0, 0, 0, 0]));
        assert_eq!(out, src);
    }

    #[test]
    fn test_composite_skips_transparent_pixels() {
        let mut canvas = RgbaImage::from_pixel(2, 2, BLACK);
        let mut sprite = RgbaImage::new(2, 2);
        sprite.put_pixel(1, 1, RED);

        composite_over(&mut canvas, &sprite, 0, 0);

        assert_eq!(*canvas.get_pixel(0, 0), BLACK);
        assert_eq!(*canvas.get_pixel(1, 1), RED);
    }

    #[test]
    fn test_composite_clips_negative_offset() {
        let mut canvas = RgbaImage::from_pixel(4, 4, BLACK);
        let sprite = RgbaImage::from_pixel(3, 3, RED);

        composite_over(&mut canvas, &sprite, -2, -1);

        assert_eq!(*canvas.get_pixel(0, 0), RED);
        assert_eq!(*canvas.get_pixel(0, 1), RED);
        assert_eq!(*canvas.get_pixel(1, 0), BLACK);
        assert_eq!(*canvas.get_pixel(0, 2), BLACK);
    }

    #[test]
    fn test_composite_clips_past_edges() {
        let mut canvas = RgbaImage::from_pixel(4, 4, BLACK);
        let sprite = RgbaImage::from_pixel(3, 3, RED);

        composite_over(&mut canvas, &sprite, 3, 3);

        assert_eq!(*canvas.get_pixel(3, 3), RED);
        assert_eq!(*canvas.get_pixel(2, 2), BLACK);
    }

    #[test]
    fn test_composite_fully_outside_is_noop() {
        let mut canvas = RgbaImage::from_pixel(2, 2, BLACK);
        let before = canvas.clone();
        let sprite = RgbaImage::from_pixel(2, 2, RED);

        composite_over(&mut canvas, &sprite, 10, -10);
        composite_over(&mut canvas, &sprite, -5, 0);

        assert_eq!(canvas, before);
    }
}
