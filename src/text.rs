//! HUD text rendering
//!
//! Two font sources: a built-in 5x7 bitmap font that needs no files, and
//! TrueType fonts rasterized with `ab_glyph`.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::blend::source_over;

/// Error loading a TrueType font.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FontError {
    #[error("failed to read font: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid font data: {0}")]
    Invalid(#[from] ab_glyph::InvalidFont),
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// 5x7 bitmap glyph rows, top to bottom; bit 4 is the leftmost column.
fn glyph_rows(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        _ => [0; 7],
    }
}

/// Font used for HUD overlays.
pub enum HudFont {
    /// Built-in bitmap font, each glyph pixel drawn as a `scale`x`scale` block
    Builtin { scale: u32 },
    /// TrueType font at a pixel size
    TrueType { font: FontVec, scale: PxScale },
}

impl fmt::Debug for HudFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HudFont::Builtin { scale } => f.debug_struct("Builtin").field("scale", scale).finish(),
            HudFont::TrueType { scale, .. } => {
                f.debug_struct("TrueType").field("size", &scale.y).finish()
            }
        }
    }
}

impl Default for HudFont {
    fn default() -> Self {
        HudFont::builtin(12)
    }
}

impl HudFont {
    /// Built-in font sized to roughly `size_px` pixels tall.
    pub fn builtin(size_px: u32) -> Self {
        HudFont::Builtin { scale: ((size_px + 3) / GLYPH_HEIGHT).max(1) }
    }

    /// Parse TrueType (or OpenType) font data.
    pub fn truetype(data: Vec<u8>, size_px: f32) -> Result<Self, FontError> {
        let font = FontVec::try_from_vec(data)?;
        Ok(HudFont::TrueType { font, scale: PxScale::from(size_px) })
    }

    /// Load a font file, or fall back to the built-in font.
    ///
    /// A missing or unreadable font is not fatal; the fallback is logged.
    pub fn load_or_builtin(path: Option<&Path>, size_px: u32) -> Self {
        let Some(path) = path else {
            return HudFont::builtin(size_px);
        };

        let loaded = std::fs::read(path)
            .map_err(FontError::from)
            .and_then(|data| HudFont::truetype(data, size_px as f32));

        match loaded {
            Ok(font) => {
                tracing::debug!(path = %path.display(), "loaded HUD font");
                font
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using built-in HUD font");
                HudFont::builtin(size_px)
            }
        }
    }

    /// Width in pixels of `text` when drawn.
    pub fn measure(&self, text: &str) -> u32 {
        match self {
            HudFont::Builtin { scale } => {
                let count = text.chars().count() as u32;
                (count * (GLYPH_WIDTH + 1)).saturating_sub(1) * scale
            }
            HudFont::TrueType { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let width: f32 = text.chars().map(|c| scaled.h_advance(scaled.glyph_id(c))).sum();
                width.ceil() as u32
            }
        }
    }

    /// Draw `text` with its top-left corner at (x, y). Pixels outside the canvas are dropped.
    pub fn draw_text(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str, color: Rgba<u8>) {
        match self {
            HudFont::Builtin { scale } => draw_builtin(canvas, x, y, text, color, *scale),
            HudFont::TrueType { font, scale } => draw_truetype(canvas, x, y, text, color, font, *scale),
        }
    }
}

fn blend_at(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    let blended = source_over(&color, canvas.get_pixel(x, y));
    canvas.put_pixel(x, y, blended);
}

fn draw_builtin(canvas: &mut RgbaImage, x: i64, y: i64, text: &str, color: Rgba<u8>, scale: u32) {
    let scale = scale as i64;
    let advance = (GLYPH_WIDTH as i64 + 1) * scale;

    for (i, ch) in text.chars().enumerate() {
        let origin_x = x + i as i64 * advance;
        for (row, bits) in glyph_rows(ch).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let px = origin_x + col as i64 * scale;
                let py = y + row as i64 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        blend_at(canvas, px + dx, py + dy, color);
                    }
                }
            }
        }
    }
}

fn draw_truetype(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    text: &str,
    color: Rgba<u8>,
    font: &FontVec,
    scale: PxScale,
) {
    let scaled = font.as_scaled(scale);
    let mut caret = x as f32;
    let baseline = y as f32 + scaled.ascent();

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
        caret += scaled.h_advance(glyph_id);

        let Some(outline) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outline.px_bounds();
        outline.draw(|gx, gy, coverage| {
            let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
            if alpha == 0 {
                return;
            }
            let px = bounds.min.x as i64 + gx as i64;
            let py = bounds.min.y as i64 + gy as i64;
            blend_at(canvas, px, py, Rgba([color[0], color[1], color[2], alpha]));
        });
    }
}
