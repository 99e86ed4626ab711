//! Writes a finished frame sequence to disk
//!
//! Three artifacts come out of one sequence: a still of the first frame, a
//! preview strip of three sampled frames, and the looping animation.

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::gif::{gif_dimensions, write_gif, GifOptions};
use crate::output::{save_png, OutputError};
use crate::spritesheet::{preview_indices, render_strip};

/// Error type for sequence export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("cannot export an empty frame sequence")]
    EmptySequence,
    #[error("frame of {width}x{height} exceeds the 65535 pixel GIF limit")]
    FrameTooLarge { width: u32, height: u32 },
    #[error("frame {index} is {}x{}, expected {}x{}", .found.0, .found.1, .expected.0, .expected.1)]
    FrameSizeMismatch { index: usize, expected: (u32, u32), found: (u32, u32) },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("GIF encoding error: {0}")]
    Gif(#[from] gif::EncodingError),
}

impl From<OutputError> for ExportError {
    fn from(e: OutputError) -> Self {
        match e {
            OutputError::Io(e) => ExportError::Io(e),
            OutputError::Image(e) => ExportError::Image(e),
        }
    }
}

/// File names and animation settings for an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub screenshot: String,
    pub strip: String,
    pub animation: String,
    pub gif: GifOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            screenshot: "screenshot-1.png".to_string(),
            strip: "demo-strip.png".to_string(),
            animation: "demo.gif".to_string(),
            gif: GifOptions::default(),
        }
    }
}

/// Paths written by [`export_sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub screenshot: PathBuf,
    pub strip: PathBuf,
    pub animation: PathBuf,
    pub frame_count: usize,
}

impl ExportReport {
    pub fn paths(&self) -> [&Path; 3] {
        [&self.screenshot, &self.strip, &self.animation]
    }
}

/// Write the still, the preview strip and the animation into `out_dir`.
///
/// # Errors
///
/// [`ExportError::EmptySequence`], [`ExportError::FrameTooLarge`] or
/// [`ExportError::FrameSizeMismatch`] when the frames cannot form an
/// animation. These are checked up front, so nothing is written.
#[tracing::instrument(skip(frames, options), fields(frames = frames.len()))]
pub fn export_sequence(
    frames: &[&RgbaImage],
    options: &ExportOptions,
    out_dir: &Path,
) -> Result<ExportReport, ExportError> {
    gif_dimensions(frames)?;
    let first = frames[0];

    let screenshot = out_dir.join(&options.screenshot);
    save_png(first, &screenshot)?;
    tracing::debug!(path = %screenshot.display(), "wrote still");

    let strip_frames: Vec<&RgbaImage> =
        preview_indices(frames.len()).iter().map(|&i| frames[i]).collect();
    let strip = out_dir.join(&options.strip);
    save_png(&render_strip(&strip_frames), &strip)?;
    tracing::debug!(path = %strip.display(), "wrote preview strip");

    let animation = out_dir.join(&options.animation);
    write_gif(frames, &options.gif, &animation)?;
    tracing::debug!(path = %animation.display(), "wrote animation");

    Ok(ExportReport { screenshot, strip, animation, frame_count: frames.len() })
}
