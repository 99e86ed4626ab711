//! Sprite lookup by logical key
//!
//! The frame composer never touches the filesystem. It receives a
//! [`SpriteAtlas`] built once per run, either from a directory of PNG files
//! (`<dir>/<key>.png`) or from the procedural painter in [`crate::sprites`].

use image::RgbaImage;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::maze::{Ghost, WallKind};
use crate::output::{save_png, OutputError};

/// Error raised when a sprite cannot be provided.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssetError {
    /// A required sprite is absent or unreadable
    #[error("sprite '{key}' missing ({}): {reason}", .path.display())]
    Missing { key: SpriteKey, path: PathBuf, reason: String },
    /// Writing a sprite to disk failed
    #[error("failed to write sprite '{key}': {source}")]
    Write {
        key: SpriteKey,
        #[source]
        source: OutputError,
    },
}

/// Player facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Left, Direction::Up, Direction::Down];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Unit vector in screen space (y grows downwards).
    pub fn unit(self) -> (f64, f64) {
        match self {
            Direction::Right => (1.0, 0.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
        }
    }
}

/// Logical name of a sprite image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKey {
    Wall(WallKind),
    Pellet,
    PlayerOpen(Direction),
    PlayerClosed,
    Ghost(Ghost),
}

impl SpriteKey {
    /// Every sprite the demo pipeline needs.
    pub fn required() -> Vec<SpriteKey> {
        let mut keys: Vec<SpriteKey> = WallKind::ALL.into_iter().map(SpriteKey::Wall).collect();
        keys.push(SpriteKey::Pellet);
        keys.extend(Direction::ALL.into_iter().map(SpriteKey::PlayerOpen));
        keys.push(SpriteKey::PlayerClosed);
        keys.extend(Ghost::ALL.into_iter().map(SpriteKey::Ghost));
        keys
    }

    /// Key string, e.g. `wall/horizontal` or `pacman/right-open`.
    pub fn as_key(self) -> String {
        match self {
            SpriteKey::Wall(kind) => format!("wall/{}", kind.name()),
            SpriteKey::Pellet => "pellet".to_string(),
            SpriteKey::PlayerOpen(dir) => format!("pacman/{}-open", dir.name()),
            SpriteKey::PlayerClosed => "pacman/closed".to_string(),
            SpriteKey::Ghost(ghost) => format!("ghost/{}", ghost.name()),
        }
    }

    /// File location of this sprite under an asset directory.
    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.png", self.as_key()))
    }
}

impl fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

/// Sprite images addressed by [`SpriteKey`].
#[derive(Debug, Clone, Default)]
pub struct SpriteAtlas {
    sprites: HashMap<SpriteKey, RgbaImage>,
    source: Option<PathBuf>,
}

impl SpriteAtlas {
    /// Create an empty atlas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every required sprite from `dir`.
    ///
    /// # Errors
    ///
    /// [`AssetError::Missing`] for the first sprite that cannot be opened or decoded.
    pub fn load_dir(dir: &Path) -> Result<Self, AssetError> {
        let mut atlas = SpriteAtlas { sprites: HashMap::new(), source: Some(dir.to_path_buf()) };

        for key in SpriteKey::required() {
            let path = key.path_in(dir);
            let image = image::open(&path).map_err(|e| AssetError::Missing {
                key,
                path: path.clone(),
                reason: e.to_string(),
            })?;
            tracing::debug!(%key, path = %path.display(), "loaded sprite");
            atlas.sprites.insert(key, image.to_rgba8());
        }

        Ok(atlas)
    }

    /// Add or replace a sprite.
    pub fn insert(&mut self, key: SpriteKey, image: RgbaImage) {
        self.sprites.insert(key, image);
    }

    /// Look up a sprite.
    ///
    /// # Errors
    ///
    /// [`AssetError::Missing`] when the atlas has no sprite for `key`.
    pub fn get(&self, key: SpriteKey) -> Result<&RgbaImage, AssetError> {
        self.sprites.get(&key).ok_or_else(|| AssetError::Missing {
            key,
            path: self.source.as_deref().map(|dir| key.path_in(dir)).unwrap_or_default(),
            reason: "not in atlas".to_string(),
        })
    }

    pub fn contains(&self, key: SpriteKey) -> bool {
        self.sprites.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Write every sprite to `dir` as `<key>.png`, in key order.
    ///
    /// Returns the written paths.
    pub fn save_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
        let mut keys: Vec<&SpriteKey> = self.sprites.keys().collect();
        keys.sort();

        let mut written = Vec::with_capacity(keys.len());
        for &key in keys {
            let path = key.path_in(dir);
            save_png(&self.sprites[&key], &path)
                .map_err(|source| AssetError::Write { key, source })?;
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_key_strings() {
        assert_eq!(SpriteKey::Wall(WallKind::Horizontal).as_key(), "wall/horizontal");
        assert_eq!(SpriteKey::Wall(WallKind::DownLeft).as_key(), "wall/down-left");
        assert_eq!(SpriteKey::PlayerOpen(Direction::Right).as_key(), "pacman/right-open");
        assert_eq!(SpriteKey::PlayerClosed.as_key(), "pacman/closed");
        assert_eq!(SpriteKey::Ghost(Ghost::Inky).as_key(), "ghost/inky");
        assert_eq!(SpriteKey::Pellet.to_string(), "pellet");
    }

    #[test]
    fn test_required_keys_are_unique() {
        let keys = SpriteKey::required();
        assert_eq!(keys.len(), 16);
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), keys.len());
    }

    #[test]
    fn test_get_missing_key_errors() {
        let atlas = SpriteAtlas::new();
        let err = atlas.get(SpriteKey::Pellet).unwrap_err();
        assert!(matches!(err, AssetError::Missing { key: SpriteKey::Pellet, .. }));
    }

    #[test]
    fn test_load_dir_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = SpriteAtlas::load_dir(dir.path()).unwrap_err();
        match err {
            AssetError::Missing { key, path, .. } => {
                assert_eq!(key, SpriteKey::required()[0]);
                assert_eq!(path, dir.path().join("wall/horizontal.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_then_load_dir() {
        let dir = tempdir().unwrap();
        let mut atlas = SpriteAtlas::new();
        for (i, key) in SpriteKey::required().into_iter().enumerate() {
            atlas.insert(key, RgbaImage::from_pixel(2, 2, Rgba([i as u8, 0, 0, 255])));
        }

        let written = atlas.save_dir(dir.path()).unwrap();
        assert_eq!(written.len(), 16);
        assert!(dir.path().join("pacman/closed.png").exists());

        let loaded = SpriteAtlas::load_dir(dir.path()).unwrap();
        assert_eq!(loaded.len(), 16);
        assert_eq!(
            loaded.get(SpriteKey::Ghost(Ghost::Clyde)).unwrap(),
            atlas.get(SpriteKey::Ghost(Ghost::Clyde)).unwrap()
        );
    }
}
