//! End-to-end demo pipeline: map, sprites, frames, files

use thiserror::Error;

use crate::assets::{AssetError, SpriteAtlas};
use crate::compose::{compose_frames, ComposeError};
use crate::config::MazecastConfig;
use crate::export::{export_sequence, ExportError, ExportReport};
use crate::maze::{Grid, MapError};

/// Error raised by any stage of the demo pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DemoError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Sprites from the configured directory, or the procedural set.
pub fn load_atlas(config: &MazecastConfig) -> Result<SpriteAtlas, AssetError> {
    match &config.paths.sprites {
        Some(dir) => SpriteAtlas::load_dir(dir),
        None => Ok(SpriteAtlas::procedural()),
    }
}

/// Run the whole pipeline and return the written files.
pub fn run_demo(config: &MazecastConfig) -> Result<ExportReport, DemoError> {
    let grid = Grid::load(&config.paths.map)?;
    tracing::info!(
        map = %config.paths.map.display(),
        width = grid.width(),
        height = grid.height(),
        "loaded map"
    );

    let atlas = load_atlas(config)?;
    match &config.paths.sprites {
        Some(dir) => tracing::info!(dir = %dir.display(), sprites = atlas.len(), "loaded sprites"),
        None => tracing::info!(sprites = atlas.len(), "drew procedural sprites"),
    }

    let sequence = compose_frames(&grid, &atlas, &config.compose_options())?;
    tracing::info!(frames = sequence.len(), "composed frames");

    let report = export_sequence(&sequence.images(), &config.export_options(), &config.paths.out)?;
    tracing::info!(out = %config.paths.out.display(), "exported demo media");

    Ok(report)
}
