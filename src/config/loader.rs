//! Configuration loading and discovery for `mazecast.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::MazecastConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for.
pub const CONFIG_FILE_NAME: &str = "mazecast.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse mazecast.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override map file
    pub map: Option<PathBuf>,
    /// Override sprite directory
    pub sprites: Option<PathBuf>,
    /// Ignore any sprite directory and draw sprites procedurally
    pub procedural: bool,
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override frame delay in milliseconds
    pub delay_ms: Option<u32>,
}

/// Find mazecast.toml by walking up from the current working directory,
/// then in `$XDG_CONFIG_HOME/mazecast/` (or `~/.config/mazecast/`).
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find mazecast.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("mazecast").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find mazecast.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a mazecast.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration with paths relative to the working directory.
///
/// Relative paths inside a loaded file are resolved against the file's
/// directory.
pub fn load_config(path: Option<&Path>) -> Result<MazecastConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
            Ok(default_config())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<MazecastConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: MazecastConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let Some(root) = project_root(path) {
        config.resolve_paths(root);
    }
    tracing::debug!(path = %path.display(), "loaded config");

    Ok(config)
}

/// Configuration used when no mazecast.toml exists.
pub fn default_config() -> MazecastConfig {
    MazecastConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
///
/// # Errors
///
/// [`ConfigError::Validation`] if an override produces an invalid value.
pub fn merge_cli_overrides(
    config: &mut MazecastConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(ref map) = overrides.map {
        config.paths.map = map.clone();
    }

    if overrides.procedural {
        config.paths.sprites = None;
    } else if let Some(ref sprites) = overrides.sprites {
        config.paths.sprites = Some(sprites.clone());
    }

    if let Some(ref out) = overrides.out {
        config.paths.out = out.clone();
    }

    if let Some(delay) = overrides.delay_ms {
        config.animation.frame_delay_ms = delay;
    }

    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the mazecast.toml file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[hud]\nlives = 2\n");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let subdir = temp.path().join("maze").join("levels");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_from_file_resolves_paths() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[paths]
map = "levels/one.txt"
sprites = "art"

[animation]
frame_delay_ms = 60
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.paths.map, temp.path().join("levels/one.txt"));
        assert_eq!(config.paths.sprites, Some(temp.path().join("art")));
        assert_eq!(config.paths.out, temp.path().join("docs/assets"));
        assert_eq!(config.animation.frame_delay_ms, 60);
    }

    #[test]
    fn test_load_config_missing_file_is_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join("nonexistent.toml");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_wrong_type() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[render]\ntile_size = \"big\"\n");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[render]\ntile_size = 0\n\n[animation]\nmax_colors = 1\n");

        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("render.tile_size"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_cli_overrides_paths() {
        let mut config = default_config();
        let overrides = CliOverrides {
            map: Some(PathBuf::from("other.txt")),
            sprites: Some(PathBuf::from("art")),
            out: Some(PathBuf::from("dist")),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.paths.map, PathBuf::from("other.txt"));
        assert_eq!(config.paths.sprites, Some(PathBuf::from("art")));
        assert_eq!(config.paths.out, PathBuf::from("dist"));
    }

    #[test]
    fn test_merge_cli_overrides_procedural_wins() {
        let mut config = default_config();
        config.paths.sprites = Some(PathBuf::from("maze"));
        let overrides = CliOverrides {
            sprites: Some(PathBuf::from("art")),
            procedural: true,
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.paths.sprites, None);
    }

    #[test]
    fn test_merge_cli_overrides_delay() {
        let mut config = default_config();
        let overrides = CliOverrides { delay_ms: Some(40), ..Default::default() };

        merge_cli_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.animation.frame_delay_ms, 40);

        let overrides = CliOverrides { delay_ms: Some(0), ..Default::default() };
        assert!(matches!(
            merge_cli_overrides(&mut config, &overrides),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_resolve_path_absolute() {
        let root = Path::new("/project");
        let absolute = Path::new("/other/path");
        assert_eq!(resolve_path(root, absolute), PathBuf::from("/other/path"));
    }

    #[test]
    fn test_resolve_path_relative() {
        let root = Path::new("/project");
        let relative = Path::new("maze/map.txt");
        assert_eq!(resolve_path(root, relative), PathBuf::from("/project/maze/map.txt"));
    }

    #[test]
    fn test_project_root() {
        let config_path = Path::new("/project/mazecast.toml");
        assert_eq!(project_root(config_path), Some(Path::new("/project")));
    }
}
