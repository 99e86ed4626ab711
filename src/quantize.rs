//! Palette reduction using the median cut algorithm.
//!
//! Animation frames are opaque, so quantization works on RGB only and
//! ignores alpha.

use image::RgbaImage;
use std::collections::{BTreeMap, HashMap};

/// Most colours a GIF palette can hold.
pub const MAX_PALETTE_SIZE: usize = 256;

type Rgb = [u8; 3];

/// A frame reduced to a palette plus one palette index per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<Rgb>,
    pub indices: Vec<u8>,
}

impl IndexedFrame {
    /// Palette flattened to `r, g, b, r, g, b, ...`.
    pub fn palette_bytes(&self) -> Vec<u8> {
        self.palette.iter().flatten().copied().collect()
    }
}

/// A box of colours for median cut.
#[derive(Debug, Clone)]
struct ColorBox {
    colors: Vec<(Rgb, u32)>, // colour and pixel count
}

impl ColorBox {
    /// Channel (0 = red, 1 = green, 2 = blue) with the largest range.
    fn widest_channel(&self) -> usize {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for (color, _) in &self.colors {
            for c in 0..3 {
                min[c] = min[c].min(color[c]);
                max[c] = max[c].max(color[c]);
            }
        }

        let range = |c: usize| max[c].saturating_sub(min[c]);
        if range(0) >= range(1) && range(0) >= range(2) {
            0
        } else if range(1) >= range(2) {
            1
        } else {
            2
        }
    }

    /// Split along the widest channel at the pixel-weighted median.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let channel = self.widest_channel();
        self.colors.sort_by_key(|(color, _)| (color[channel], *color));

        let total = self.pixel_count();
        let mut running = 0u64;
        let mut split_idx = self.colors.len() / 2;
        for (i, (_, count)) in self.colors.iter().enumerate() {
            running += *count as u64;
            if running >= total / 2 {
                split_idx = i + 1;
                break;
            }
        }

        // Never leave either half empty
        split_idx = split_idx.clamp(1, self.colors.len() - 1);

        let right = self.colors.split_off(split_idx);
        (ColorBox { colors: self.colors }, ColorBox { colors: right })
    }

    /// Pixel-weighted average colour.
    fn average_color(&self) -> Rgb {
        let total = self.pixel_count().max(1);
        let mut sum = [0u64; 3];
        for (color, count) in &self.colors {
            for c in 0..3 {
                sum[c] += color[c] as u64 * *count as u64;
            }
        }
        [(sum[0] / total) as u8, (sum[1] / total) as u8, (sum[2] / total) as u8]
    }

    fn pixel_count(&self) -> u64 {
        self.colors.iter().map(|(_, count)| *count as u64).sum()
    }
}

/// Reduce a colour histogram to at most `max_colors` palette entries.
///
/// When the histogram already fits, its colours are returned unchanged in
/// ascending order.
pub fn median_cut(histogram: &BTreeMap<Rgb, u32>, max_colors: usize) -> Vec<Rgb> {
    let max_colors = max_colors.clamp(1, MAX_PALETTE_SIZE);
    if histogram.len() <= max_colors {
        return histogram.keys().copied().collect();
    }

    let mut boxes = vec![ColorBox { colors: histogram.iter().map(|(c, n)| (*c, *n)).collect() }];

    while boxes.len() < max_colors {
        // Split the most populated box that still has more than one colour
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .max_by_key(|(_, b)| b.pixel_count())
            .map(|(i, _)| i);

        let Some(idx) = candidate else {
            break;
        };

        let (left, right) = boxes.remove(idx).split();
        boxes.push(left);
        boxes.push(right);
    }

    boxes.iter().map(ColorBox::average_color).collect()
}

fn nearest(palette: &[Rgb], color: Rgb) -> u8 {
    let distance = |p: &Rgb| -> u32 {
        (0..3)
            .map(|c| {
                let d = p[c] as i32 - color[c] as i32;
                (d * d) as u32
            })
            .sum()
    };

    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| distance(p))
        .map(|(i, _)| i as u8)
        .unwrap_or(0)
}

/// Quantize an image to a palette of at most `max_colors` entries.
pub fn quantize(image: &RgbaImage, max_colors: usize) -> IndexedFrame {
    let mut histogram: BTreeMap<Rgb, u32> = BTreeMap::new();
    for pixel in image.pixels() {
        *histogram.entry([pixel[0], pixel[1], pixel[2]]).or_insert(0) += 1;
    }

    let mut palette = median_cut(&histogram, max_colors);
    if palette.is_empty() {
        palette.push([0, 0, 0]);
    }

    let mut lookup: HashMap<Rgb, u8> = HashMap::with_capacity(histogram.len());
    let indices = image
        .pixels()
        .map(|pixel| {
            let color = [pixel[0], pixel[1], pixel[2]];
            *lookup.entry(color).or_insert_with(|| nearest(&palette, color))
        })
        .collect();

    IndexedFrame { width: image.width(), height: image.height(), palette, indices }
}
