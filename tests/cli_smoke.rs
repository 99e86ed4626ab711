//! CLI integration tests
//!
//! These tests run the built binary in a scratch directory and check exit
//! codes and written files.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn mazecast(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mazecast"))
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .args(args)
        .output()
        .expect("Failed to execute mazecast")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_demo_with_flags() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("map.txt"), "3111114\n2p..7.2\n5111116\n").unwrap();

    let output = mazecast(dir.path(), &["demo", "--map", "map.txt", "--out", "out", "--delay", "50"]);

    assert!(output.status.success(), "demo failed: {}", stderr(&output));
    for name in ["screenshot-1.png", "demo-strip.png", "demo.gif"] {
        assert!(dir.path().join("out").join(name).exists(), "{name} missing");
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().filter(|l| l.starts_with("Wrote ")).count(), 3);
}

#[test]
fn test_demo_discovers_config() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("maze")).unwrap();
    std::fs::write(dir.path().join("maze/map.txt"), "1p.1\n").unwrap();
    std::fs::write(dir.path().join("mazecast.toml"), "[paths]\nout = \"media\"\n").unwrap();

    let nested = dir.path().join("maze");
    let output = mazecast(&nested, &["demo"]);

    assert!(output.status.success(), "demo failed: {}", stderr(&output));
    assert!(dir.path().join("media/demo.gif").exists());
}

#[test]
fn test_demo_missing_map_exits_with_error() {
    let dir = TempDir::new().unwrap();

    let output = mazecast(dir.path(), &["demo", "--map", "nope.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("nope.txt"));
}

#[test]
fn test_demo_invalid_config_exits_with_2() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bad.toml"), "[render]\ntile_size = 0\n").unwrap();

    let output = mazecast(dir.path(), &["demo", "--config", "bad.toml"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("render.tile_size"));
}

#[test]
fn test_unknown_flag_exits_with_2() {
    let dir = TempDir::new().unwrap();
    let output = mazecast(dir.path(), &["demo", "--frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_sprites_command_writes_every_sprite() {
    let dir = TempDir::new().unwrap();

    let output = mazecast(dir.path(), &["sprites", "--out", "art"]);

    assert!(output.status.success(), "sprites failed: {}", stderr(&output));
    for key in ["wall/up-left", "pellet", "pacman/down-open", "pacman/closed", "ghost/clyde"] {
        assert!(dir.path().join("art").join(format!("{key}.png")).exists(), "{key} missing");
    }
}

#[test]
fn test_demo_uses_written_sprites() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("map.txt"), "1p.7.1\n").unwrap();

    let sprites = mazecast(dir.path(), &["sprites", "--out", "art"]);
    assert!(sprites.status.success(), "sprites failed: {}", stderr(&sprites));

    let output =
        mazecast(dir.path(), &["demo", "--map", "map.txt", "--sprites", "art", "--out", "out", "-v"]);

    assert!(output.status.success(), "demo failed: {}", stderr(&output));
    assert!(stderr(&output).contains("loaded sprites"));
}
