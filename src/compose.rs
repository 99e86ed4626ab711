//! Frame composition for the demo animation
//!
//! The composer walks the player from its spawn to a goal on the same row and
//! back again, rendering one frame per step. The static layer (walls and
//! pellets) is drawn once; every frame starts as a copy of it and only adds
//! ghosts, the player and the HUD on top.

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::assets::{AssetError, Direction, SpriteAtlas, SpriteKey};
use crate::blend::composite_over;
use crate::maze::{Ghost, Grid, MapError, Position, Tile, PLAYER_SYMBOL};
use crate::output::scale_image;
use crate::pathfind::shortest_path;
use crate::text::HudFont;

/// Background colour of every frame.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

const HUD_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const HUD_MARGIN_X: i64 = 12;
const HUD_TOP_Y: i64 = 10;
const HUD_BOTTOM_INSET: i64 = 26;
const HUD_TITLE_INSET: i64 = 160;

/// Errors raised while composing frames.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ComposeError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("a {columns}x{rows} map at {tile_size}px per tile does not fit in an image")]
    CanvasTooLarge { columns: usize, rows: usize, tile_size: u32 },
}

/// Heads-up display settings.
#[derive(Debug)]
pub struct HudOptions {
    pub title: String,
    pub lives: u32,
    /// Points added on every scoring step
    pub score_step: u32,
    /// Score on every n-th step, starting with step 0
    pub score_every: usize,
    pub font: HudFont,
}

impl Default for HudOptions {
    fn default() -> Self {
        Self {
            title: "PACMANFX".to_string(),
            lives: 3,
            score_step: 10,
            score_every: 3,
            font: HudFont::default(),
        }
    }
}

/// Layout settings for frame composition.
#[derive(Debug)]
pub struct ComposeOptions {
    /// Edge length of a map cell in pixels
    pub tile_size: u32,
    /// Pixel offset of the player sprite from its cell corner
    pub player_offset: (i64, i64),
    /// Pixel offset of ghost sprites from their cell corner
    pub ghost_offset: (i64, i64),
    /// Power pellets are the pellet sprite enlarged by this factor
    pub power_pellet_scale: u32,
    pub hud: HudOptions,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            tile_size: 16,
            player_offset: (4, -4),
            ghost_offset: (4, -4),
            power_pellet_scale: 2,
            hud: HudOptions::default(),
        }
    }
}

/// One rendered step of the animation.
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: usize,
    pub position: Position,
    pub facing: Direction,
    pub mouth_closed: bool,
    pub score: u32,
    pub image: RgbaImage,
}

/// Every frame of a run, plus the shared background and the path walked.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    pub background: RgbaImage,
    pub path: Vec<Position>,
    pub frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame images in order.
    pub fn images(&self) -> Vec<&RgbaImage> {
        self.frames.iter().map(|f| &f.image).collect()
    }
}

/// Rightmost walkable cell on the spawn row, searching from `width - 2` down to
/// just right of the spawn. Falls back to the spawn itself.
pub fn pick_goal(grid: &Grid, spawn: Position) -> Position {
    let last = grid.width() as i32 - 2;
    ((spawn.col + 1)..=last)
        .rev()
        .map(|col| Position::new(col, spawn.row))
        .find(|&pos| grid.is_walkable(pos))
        .unwrap_or(spawn)
}

/// `path` followed by its reverse, sharing the turning point.
pub fn round_trip(path: &[Position]) -> Vec<Position> {
    let mut trip = path.to_vec();
    trip.extend(path.iter().rev().skip(1));
    trip
}

/// Direction the player faces when stepping from `from` to `to`.
///
/// Horizontal movement wins ties; no movement at all faces up.
pub fn facing(from: Position, to: Position) -> Direction {
    let d = to - from;
    if d.col.abs() >= d.row.abs() && d.col != 0 {
        if d.col > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if d.row > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Mouth cadence: two frames open, two frames closed.
pub fn mouth_closed(step: usize) -> bool {
    (step / 2) % 2 == 1
}

/// Score shown on `step`, counting the points awarded on that step.
pub fn score_at(step: usize, hud: &HudOptions) -> u32 {
    let every = hud.score_every.max(1);
    u32::try_from(step / every + 1).unwrap_or(u32::MAX).saturating_mul(hud.score_step)
}

/// Pixel size of a frame for `grid`.
pub fn canvas_size(grid: &Grid, tile_size: u32) -> Result<(u32, u32), ComposeError> {
    let side = |cells: usize| u32::try_from(cells).ok()?.checked_mul(tile_size);
    match (side(grid.width()), side(grid.height())) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(ComposeError::CanvasTooLarge {
            columns: grid.width(),
            rows: grid.height(),
            tile_size,
        }),
    }
}

/// Draw walls and pellets onto a black canvas sized to the grid.
pub fn render_background(
    grid: &Grid,
    atlas: &SpriteAtlas,
    options: &ComposeOptions,
) -> Result<RgbaImage, ComposeError> {
    let tile = options.tile_size;
    let (width, height) = canvas_size(grid, tile)?;
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

    let pellet = atlas.get(SpriteKey::Pellet)?;
    let power_pellet = scale_image(pellet, options.power_pellet_scale);
    let power_dx = (tile as i64 - power_pellet.width() as i64) / 2;
    let power_dy = (tile as i64 - power_pellet.height() as i64) / 2;

    for (pos, symbol) in grid.cells() {
        let (x, y) = pos.to_pixels(tile);
        match Tile::from_symbol(symbol) {
            Tile::Wall(kind) => composite_over(&mut canvas, atlas.get(SpriteKey::Wall(kind))?, x, y),
            Tile::Pellet => composite_over(&mut canvas, pellet, x, y),
            Tile::PowerPellet => composite_over(&mut canvas, &power_pellet, x + power_dx, y + power_dy),
            Tile::PlayerSpawn | Tile::GhostSpawn(_) | Tile::Empty => {}
        }
    }

    Ok(canvas)
}

fn draw_hud(canvas: &mut RgbaImage, score: u32, hud: &HudOptions) {
    let width = canvas.width() as i64;
    let height = canvas.height() as i64;

    hud.font.draw_text(canvas, HUD_MARGIN_X, HUD_TOP_Y, &format!("SCORE {score}"), HUD_COLOR);
    hud.font.draw_text(canvas, width - HUD_TITLE_INSET, HUD_TOP_Y, &hud.title, HUD_COLOR);
    hud.font.draw_text(
        canvas,
        HUD_MARGIN_X,
        height - HUD_BOTTOM_INSET,
        &format!("LIVES {}", hud.lives),
        HUD_COLOR,
    );
}

/// Render the full round-trip animation for `grid`.
///
/// # Errors
///
/// [`MapError::MissingSpawn`] when the map has no player spawn, or an
/// [`AssetError`] when the atlas lacks any required sprite. Both are
/// reported before the first frame is drawn.
#[tracing::instrument(skip_all, fields(width = grid.width(), height = grid.height()))]
pub fn compose_frames(
    grid: &Grid,
    atlas: &SpriteAtlas,
    options: &ComposeOptions,
) -> Result<FrameSequence, ComposeError> {
    let spawn = grid.find_first(PLAYER_SYMBOL).ok_or(MapError::MissingSpawn(PLAYER_SYMBOL))?;
    if let Some(key) = SpriteKey::required().into_iter().find(|&key| !atlas.contains(key)) {
        atlas.get(key)?;
    }
    let goal = pick_goal(grid, spawn);
    let path_out = shortest_path(grid, spawn, goal);
    let path = round_trip(&path_out);
    tracing::debug!(%spawn, %goal, steps = path.len(), "planned round trip");

    let background = render_background(grid, atlas, options)?;

    let title_width = options.hud.font.measure(&options.hud.title) as i64;
    let overflow = title_width - HUD_TITLE_INSET;
    if overflow > 0 {
        tracing::debug!(title = %options.hud.title, overflow, "HUD title runs past the right edge");
    }

    let ghost_symbols: Vec<char> = Ghost::ALL.iter().map(|g| g.symbol()).collect();
    let ghost_cells = grid.find_all(&ghost_symbols);
    let mut ghosts = Vec::new();
    for ghost in Ghost::ALL {
        let cells = ghost_cells.get(&ghost.symbol()).map(Vec::as_slice).unwrap_or_default();
        if cells.is_empty() {
            continue;
        }
        let sprite = atlas.get(SpriteKey::Ghost(ghost))?;
        ghosts.extend(cells.iter().map(|&cell| (sprite, cell)));
    }

    let tile = options.tile_size;
    let mut frames = Vec::with_capacity(path.len());

    for (i, &pos) in path.iter().enumerate() {
        let mut image = background.clone();

        for &(sprite, cell) in &ghosts {
            let (x, y) = cell.to_pixels(tile);
            composite_over(&mut image, sprite, x + options.ghost_offset.0, y + options.ghost_offset.1);
        }

        let next = path[(i + 1) % path.len()];
        let facing = facing(pos, next);
        let closed = mouth_closed(i);
        let key = if closed { SpriteKey::PlayerClosed } else { SpriteKey::PlayerOpen(facing) };
        let (x, y) = pos.to_pixels(tile);
        composite_over(&mut image, atlas.get(key)?, x + options.player_offset.0, y + options.player_offset.1);

        let score = score_at(i, &options.hud);
        draw_hud(&mut image, score, &options.hud);

        frames.push(Frame { index: i, position: pos, facing, mouth_closed: closed, score, image });
    }

    tracing::debug!(frames = frames.len(), "composed frames");
    Ok(FrameSequence { background, path, frames })
}
