//! Preview strips: a few sampled frames side by side

use image::{imageops, Rgba, RgbaImage};

/// Strip background; frames are opaque so it only shows around smaller frames.
pub const STRIP_BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Frames sampled into the preview strip: start, one third, two thirds.
///
/// Indices repeat for very short sequences (a single frame yields `[0, 0, 0]`).
pub fn preview_indices(frame_count: usize) -> [usize; 3] {
    [0, frame_count / 3, 2 * frame_count / 3]
}

/// Place `frames` left to right on one row.
///
/// Each slot is as wide as the widest frame and the strip is as tall as the
/// tallest; smaller frames sit in the top-left of their slot.
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use mazecast::spritesheet::render_strip;
///
/// let frame = RgbaImage::from_pixel(4, 3, Rgba([255, 0, 0, 255]));
/// let strip = render_strip(&[&frame, &frame, &frame]);
/// assert_eq!(strip.dimensions(), (12, 3));
/// ```
pub fn render_strip(frames: &[&RgbaImage]) -> RgbaImage {
    if frames.is_empty() {
        return RgbaImage::from_pixel(1, 1, STRIP_BACKGROUND);
    }

    let slot_width = frames.iter().map(|f| f.width()).max().unwrap_or(1);
    let height = frames.iter().map(|f| f.height()).max().unwrap_or(1);

    let mut strip = RgbaImage::from_pixel(slot_width * frames.len() as u32, height, STRIP_BACKGROUND);
    for (i, frame) in frames.iter().enumerate() {
        imageops::replace(&mut strip, *frame, i as i64 * slot_width as i64, 0);
    }

    strip
}
