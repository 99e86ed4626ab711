//! Configuration schema types for `mazecast.toml`
//!
//! Every section and every field is optional; missing values take the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::compose::{ComposeOptions, HudOptions};
use crate::export::ExportOptions;
use crate::gif::GifOptions;
use crate::quantize::MAX_PALETTE_SIZE;
use crate::text::HudFont;

/// Largest accepted `render.tile_size`
pub const MAX_TILE_SIZE: u32 = 256;
/// Largest accepted `render.power_pellet_scale`
pub const MAX_POWER_PELLET_SCALE: u32 = 8;
/// Largest accepted `hud.score_step`
pub const MAX_SCORE_STEP: u32 = 1_000_000;

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Map text file
    pub map: PathBuf,
    /// Directory of sprite PNGs; sprites are drawn procedurally when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprites: Option<PathBuf>,
    /// Output directory
    pub out: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self { map: PathBuf::from("maze/map.txt"), sprites: None, out: PathBuf::from("docs/assets") }
    }
}

/// Board layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub tile_size: u32,
    pub player_offset: [i32; 2],
    pub ghost_offset: [i32; 2],
    pub power_pellet_scale: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { tile_size: 16, player_offset: [4, -4], ghost_offset: [4, -4], power_pellet_scale: 2 }
    }
}

/// Heads-up display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub title: String,
    pub lives: u32,
    pub font_size: u32,
    pub score_step: u32,
    pub score_every: usize,
    /// TrueType font file; the built-in bitmap font is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            title: "PACMANFX".to_string(),
            lives: 3,
            font_size: 12,
            score_step: 10,
            score_every: 3,
            font: None,
        }
    }
}

/// Animation encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frame_delay_ms: u32,
    pub max_colors: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { frame_delay_ms: 90, max_colors: MAX_PALETTE_SIZE }
    }
}

/// Output file names, relative to `paths.out`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub screenshot: String,
    pub strip: String,
    pub animation: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let defaults = ExportOptions::default();
        Self { screenshot: defaults.screenshot, strip: defaults.strip, animation: defaults.animation }
    }
}

/// Complete mazecast.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazecastConfig {
    pub paths: PathsConfig,
    pub render: RenderConfig,
    pub hud: HudConfig,
    pub animation: AnimationConfig,
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.tile_size")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mazecast.toml: '{}' {}", self.field, self.message)
    }
}

impl MazecastConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &str, message: &str| {
            if !ok {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: message.to_string(),
                });
            }
        };

        check(self.render.tile_size > 0, "render.tile_size", "must be a positive integer");
        check(self.render.tile_size <= MAX_TILE_SIZE, "render.tile_size", "must be at most 256");
        check(
            (1..=MAX_POWER_PELLET_SCALE).contains(&self.render.power_pellet_scale),
            "render.power_pellet_scale",
            "must be between 1 and 8",
        );
        check(self.hud.font_size > 0, "hud.font_size", "must be a positive integer");
        check(self.hud.score_every >= 1, "hud.score_every", "must be at least 1");
        check(self.hud.score_step <= MAX_SCORE_STEP, "hud.score_step", "must be at most 1000000");
        check(self.animation.frame_delay_ms > 0, "animation.frame_delay_ms", "must be a positive integer");
        check(
            (2..=MAX_PALETTE_SIZE).contains(&self.animation.max_colors),
            "animation.max_colors",
            "must be between 2 and 256",
        );
        check(!self.output.screenshot.is_empty(), "output.screenshot", "must be a non-empty file name");
        check(!self.output.strip.is_empty(), "output.strip", "must be a non-empty file name");
        check(!self.output.animation.is_empty(), "output.animation", "must be a non-empty file name");

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Make relative paths relative to `root` instead of the working directory.
    pub fn resolve_paths(&mut self, root: &Path) {
        let resolve = |path: &Path| super::resolve_path(root, path);
        self.paths.map = resolve(&self.paths.map);
        self.paths.out = resolve(&self.paths.out);
        self.paths.sprites = self.paths.sprites.as_deref().map(resolve);
        self.hud.font = self.hud.font.as_deref().map(resolve);
    }

    /// Composer settings, loading the HUD font if one is configured.
    pub fn compose_options(&self) -> ComposeOptions {
        let offset = |[x, y]: [i32; 2]| (x as i64, y as i64);
        ComposeOptions {
            tile_size: self.render.tile_size,
            player_offset: offset(self.render.player_offset),
            ghost_offset: offset(self.render.ghost_offset),
            power_pellet_scale: self.render.power_pellet_scale,
            hud: HudOptions {
                title: self.hud.title.clone(),
                lives: self.hud.lives,
                score_step: self.hud.score_step,
                score_every: self.hud.score_every,
                font: HudFont::load_or_builtin(self.hud.font.as_deref(), self.hud.font_size),
            },
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            screenshot: self.output.screenshot.clone(),
            strip: self.output.strip.clone(),
            animation: self.output.animation.clone(),
            gif: GifOptions {
                delay_ms: self.animation.frame_delay_ms,
                max_colors: self.animation.max_colors,
                looping: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: MazecastConfig = toml::from_str("").unwrap();
        assert_eq!(config, MazecastConfig::default());
        assert_eq!(config.paths.map, PathBuf::from("maze/map.txt"));
        assert_eq!(config.paths.sprites, None);
        assert_eq!(config.render.tile_size, 16);
        assert_eq!(config.render.player_offset, [4, -4]);
        assert_eq!(config.hud.title, "PACMANFX");
        assert_eq!(config.animation.frame_delay_ms, 90);
        assert_eq!(config.output.animation, "demo.gif");
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[paths]
map = "levels/one.txt"
sprites = "art"
out = "dist"

[render]
tile_size = 8
player_offset = [0, 0]
ghost_offset = [1, 2]
power_pellet_scale = 3

[hud]
title = "DEMO"
lives = 5
font_size = 14
score_step = 50
score_every = 2
font = "fonts/hud.ttf"

[animation]
frame_delay_ms = 40
max_colors = 64

[output]
screenshot = "a.png"
strip = "b.png"
animation = "c.gif"
"#;
        let config: MazecastConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.paths.sprites, Some(PathBuf::from("art")));
        assert_eq!(config.render.ghost_offset, [1, 2]);
        assert_eq!(config.render.power_pellet_scale, 3);
        assert_eq!(config.hud.lives, 5);
        assert_eq!(config.hud.font, Some(PathBuf::from("fonts/hud.ttf")));
        assert_eq!(config.animation.max_colors, 64);
        assert_eq!(config.output.strip, "b.png");
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: MazecastConfig = toml::from_str("[render]\ntile_size = 24\n").unwrap();
        assert_eq!(config.render.tile_size, 24);
        assert_eq!(config.render.power_pellet_scale, 2);
        assert_eq!(config.hud, HudConfig::default());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = MazecastConfig::default();
        config.render.tile_size = 0;
        config.hud.score_every = 0;
        config.animation.max_colors = 300;
        config.output.animation = String::new();

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            ["render.tile_size", "hud.score_every", "animation.max_colors", "output.animation"]
        );
    }

    #[test]
    fn test_validation_upper_bounds() {
        let mut config = MazecastConfig::default();
        config.render.tile_size = MAX_TILE_SIZE;
        config.render.power_pellet_scale = MAX_POWER_PELLET_SCALE;
        config.hud.score_step = MAX_SCORE_STEP;
        assert!(config.is_valid());

        config.render.tile_size = u32::MAX;
        config.render.power_pellet_scale = MAX_POWER_PELLET_SCALE + 1;
        config.hud.score_step = u32::MAX;
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["render.tile_size", "render.power_pellet_scale", "hud.score_step"]);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigValidationError {
            field: "render.tile_size".to_string(),
            message: "must be a positive integer".to_string(),
        };
        assert_eq!(err.to_string(), "mazecast.toml: 'render.tile_size' must be a positive integer");
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = MazecastConfig::default();
        config.paths.sprites = Some(PathBuf::from("art"));
        config.paths.out = PathBuf::from("/abs/out");
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.paths.map, PathBuf::from("/project/maze/map.txt"));
        assert_eq!(config.paths.sprites, Some(PathBuf::from("/project/art")));
        assert_eq!(config.paths.out, PathBuf::from("/abs/out"));
        assert_eq!(config.hud.font, None);
    }

    #[test]
    fn test_option_conversion() {
        let mut config = MazecastConfig::default();
        config.render.player_offset = [2, -6];
        config.animation.frame_delay_ms = 120;

        let compose = config.compose_options();
        assert_eq!(compose.player_offset, (2, -6));
        assert_eq!(compose.hud.score_every, 3);

        let export = config.export_options();
        assert_eq!(export.gif.delay_ms, 120);
        assert!(export.gif.looping);
        assert_eq!(export.screenshot, "screenshot-1.png");
    }
}
