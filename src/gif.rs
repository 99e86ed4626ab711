//! Looping GIF encoding
//!
//! Every frame is quantized on its own and written with a local colour table,
//! so a frame never loses colours to its neighbours.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use gif::{DisposalMethod, Encoder, Repeat};
use image::RgbaImage;

use crate::export::ExportError;
use crate::output::ensure_parent;
use crate::quantize::quantize;

/// Encoding settings for an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifOptions {
    /// Display time of each frame in milliseconds
    pub delay_ms: u32,
    /// Palette size limit per frame (2..=256)
    pub max_colors: usize,
    /// Repeat forever instead of playing once
    pub looping: bool,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self { delay_ms: 90, max_colors: 256, looping: true }
    }
}

/// Frame delay in GIF centiseconds, never zero.
pub fn delay_centiseconds(delay_ms: u32) -> u16 {
    (delay_ms / 10).clamp(1, u16::MAX as u32) as u16
}

/// Check that `frames` can be encoded and return the GIF screen size.
///
/// # Errors
///
/// [`ExportError::EmptySequence`], [`ExportError::FrameTooLarge`] when the
/// first frame exceeds 65535 px on a side, or
/// [`ExportError::FrameSizeMismatch`] for the first frame whose size differs
/// from the first frame's.
pub fn gif_dimensions(frames: &[&RgbaImage]) -> Result<(u16, u16), ExportError> {
    let first = frames.first().ok_or(ExportError::EmptySequence)?;
    let (width, height) = first.dimensions();
    let too_large = || ExportError::FrameTooLarge { width, height };
    let gif_width = u16::try_from(width).map_err(|_| too_large())?;
    let gif_height = u16::try_from(height).map_err(|_| too_large())?;

    if let Some((index, image)) =
        frames.iter().enumerate().find(|(_, image)| image.dimensions() != (width, height))
    {
        return Err(ExportError::FrameSizeMismatch {
            index,
            expected: (width, height),
            found: image.dimensions(),
        });
    }

    Ok((gif_width, gif_height))
}

/// Encode `frames` as an animated GIF at `path`.
///
/// Frames are checked with [`gif_dimensions`] before the file is created.
pub fn write_gif(frames: &[&RgbaImage], options: &GifOptions, path: &Path) -> Result<(), ExportError> {
    let (gif_width, gif_height) = gif_dimensions(frames)?;

    ensure_parent(path)?;
    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = Encoder::new(writer, gif_width, gif_height, &[])?;
    encoder.set_repeat(if options.looping { Repeat::Infinite } else { Repeat::Finite(0) })?;

    let delay = delay_centiseconds(options.delay_ms);

    for (i, image) in frames.iter().enumerate() {
        let indexed = quantize(image, options.max_colors);
        let palette = indexed.palette_bytes();

        let mut frame = gif::Frame::default();
        frame.width = gif_width;
        frame.height = gif_height;
        frame.delay = delay;
        frame.dispose = DisposalMethod::Background;
        frame.palette = Some(palette);
        frame.buffer = Cow::Owned(indexed.indices);

        encoder.write_frame(&frame)?;
        tracing::trace!(frame = i, colors = indexed.palette.len(), "encoded gif frame");
    }

    Ok(())
}
