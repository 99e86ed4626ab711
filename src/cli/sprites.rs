//! `mazecast sprites` command

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::assets::SpriteAtlas;

/// Draw the default sprite set into `out`
pub fn run_sprites(out: &Path) -> ExitCode {
    let atlas = SpriteAtlas::procedural();

    match atlas.save_dir(out) {
        Ok(written) => {
            tracing::info!(count = written.len(), dir = %out.display(), "wrote sprites");
            println!("Wrote {} sprites to {}", written.len(), out.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
