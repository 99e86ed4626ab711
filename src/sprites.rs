//! Procedural painter for the default sprite set
//!
//! Draws every sprite the demo needs so that a run works without any asset
//! files: a yellow chomper with open and closed frames, four ghosts, a pellet
//! and six wall pieces.

use image::{Rgba, RgbaImage};

use crate::assets::{Direction, SpriteAtlas, SpriteKey};
use crate::maze::{Ghost, WallKind};
use crate::shapes::{
    paint, rasterize_box, rasterize_ellipse, rasterize_oval, rasterize_pie, rasterize_rounded_box,
};

const PLAYER_YELLOW: Rgba<u8> = Rgba([255, 210, 0, 255]);
const PLAYER_EYE: Rgba<u8> = Rgba([20, 20, 20, 255]);
const GHOST_EYE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GHOST_PUPIL: Rgba<u8> = Rgba([60, 120, 255, 255]);
const PELLET_WHITE: Rgba<u8> = Rgba([245, 245, 245, 255]);
const WALL_BLUE: Rgba<u8> = Rgba([30, 115, 255, 255]);
const WALL_BLUE_DARK: Rgba<u8> = Rgba([20, 80, 200, 255]);

/// Half the opening angle of the player's mouth, in degrees.
const MOUTH_HALF_ANGLE: f64 = 30.0;

pub const WALL_TILE_SIZE: u32 = 16;
pub const PELLET_SIZE: u32 = 16;
pub const GHOST_SIZE: u32 = 28;

/// Player sprite size; vertical facings are drawn on a transposed canvas.
pub fn player_size(direction: Direction) -> (u32, u32) {
    match direction {
        Direction::Up | Direction::Down => (26, 24),
        Direction::Left | Direction::Right => (24, 26),
    }
}

pub fn ghost_color(ghost: Ghost) -> Rgba<u8> {
    match ghost {
        Ghost::Blinky => Rgba([235, 60, 60, 255]),
        Ghost::Pinky => Rgba([255, 160, 200, 255]),
        Ghost::Inky => Rgba([65, 230, 255, 255]),
        Ghost::Clyde => Rgba([255, 170, 60, 255]),
    }
}

/// Paint the player. `None` draws the closed-mouth frame.
pub fn draw_player(width: u32, height: u32, mouth: Option<Direction>) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    let (x1, y1) = (width as i32 - 1, height as i32 - 1);

    match mouth {
        None => paint(&mut img, &rasterize_oval(0, 0, x1, y1), PLAYER_YELLOW),
        Some(direction) => {
            let body = rasterize_pie(0, 0, x1, y1, direction.unit(), MOUTH_HALF_ANGLE);
            paint(&mut img, &body, PLAYER_YELLOW);

            let eye_x = (width as f64 * 0.62) as i32;
            let eye_y = (height as f64 * 0.28) as i32;
            let r = (width.min(height) as i32 / 14).max(1);
            paint(&mut img, &rasterize_oval(eye_x - r, eye_y - r, eye_x + r, eye_y + r), PLAYER_EYE);
        }
    }

    img
}

/// Paint a ghost body with a flat fringe and two eyes looking right.
pub fn draw_ghost(width: u32, height: u32, body: Rgba<u8>) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    let (w, h) = (width as i32, height as i32);

    let radius = (w.min(h) / 3).max(6);
    paint(&mut img, &rasterize_rounded_box(2, 2, w - 3, h - 3, radius), body);

    // Square off the bottom so the fringe reads as a skirt
    let fringe_y = h - 6;
    for i in 0..4 {
        let x0 = 2 + i * (w - 4) / 4;
        let x1 = 2 + (i + 1) * (w - 4) / 4;
        paint(&mut img, &rasterize_box(x0, fringe_y, x1, h - 3), body);
    }

    let eye_w = (w / 6).max(4);
    let eye_h = (h / 5).max(6);
    let eyes = [
        (w * 3 / 10 - eye_w / 2, h * 2 / 5 - eye_h / 2),
        (w * 7 / 10 - eye_w / 2, h * 2 / 5 - eye_h / 2),
    ];
    for (ex, ey) in eyes {
        paint(&mut img, &rasterize_oval(ex, ey, ex + eye_w, ey + eye_h), GHOST_EYE);

        let pr = (eye_w / 4).max(1);
        let px = ex + eye_w * 2 / 3 - pr;
        let py = ey + eye_h / 2 - pr;
        paint(&mut img, &rasterize_oval(px, py, px + pr * 2, py + pr * 2), GHOST_PUPIL);
    }

    img
}

/// Paint a small centred pellet.
pub fn draw_pellet(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    let r = (width.min(height) as i32 / 8).max(2);
    let (cx, cy) = (width as i32 / 2, height as i32 / 2);
    paint(&mut img, &rasterize_ellipse(cx, cy, r, r), PELLET_WHITE);
    img
}

/// Paint one wall piece on a 16x16 tile.
pub fn draw_wall(kind: WallKind) -> RgbaImage {
    const THICKNESS: i32 = 4;
    const MID: i32 = 8;
    const LAST: i32 = WALL_TILE_SIZE as i32 - 1;

    let mut img = RgbaImage::new(WALL_TILE_SIZE, WALL_TILE_SIZE);
    let half = THICKNESS / 2;

    let h_line = |img: &mut RgbaImage, x0: i32, x1: i32| {
        paint(img, &rasterize_box(x0, MID - half, x1, MID + half), WALL_BLUE);
        paint(img, &rasterize_box(x0, MID - half, x1, MID - half + 1), WALL_BLUE_DARK);
    };
    let v_line = |img: &mut RgbaImage, y0: i32, y1: i32| {
        paint(img, &rasterize_box(MID - half, y0, MID + half, y1), WALL_BLUE);
        paint(img, &rasterize_box(MID - half, y0, MID - half + 1, y1), WALL_BLUE_DARK);
    };

    match kind {
        WallKind::Horizontal => h_line(&mut img, 0, LAST),
        WallKind::Vertical => v_line(&mut img, 0, LAST),
        WallKind::UpLeft => {
            v_line(&mut img, 0, MID);
            h_line(&mut img, 0, MID);
        }
        WallKind::UpRight => {
            v_line(&mut img, 0, MID);
            h_line(&mut img, MID, LAST);
        }
        WallKind::DownLeft => {
            v_line(&mut img, MID, LAST);
            h_line(&mut img, 0, MID);
        }
        WallKind::DownRight => {
            v_line(&mut img, MID, LAST);
            h_line(&mut img, MID, LAST);
        }
    }

    img
}

/// Paint the sprite for a single key.
pub fn draw_sprite(key: SpriteKey) -> RgbaImage {
    match key {
        SpriteKey::Wall(kind) => draw_wall(kind),
        SpriteKey::Pellet => draw_pellet(PELLET_SIZE, PELLET_SIZE),
        SpriteKey::PlayerOpen(direction) => {
            let (w, h) = player_size(direction);
            draw_player(w, h, Some(direction))
        }
        SpriteKey::PlayerClosed => {
            let (w, h) = player_size(Direction::Right);
            draw_player(w, h, None)
        }
        SpriteKey::Ghost(ghost) => draw_ghost(GHOST_SIZE, GHOST_SIZE, ghost_color(ghost)),
    }
}

impl SpriteAtlas {
    /// Build an atlas holding every required sprite, painted in memory.
    pub fn procedural() -> Self {
        let mut atlas = SpriteAtlas::new();
        for key in SpriteKey::required() {
            atlas.insert(key, draw_sprite(key));
        }
        atlas
    }
}
