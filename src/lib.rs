//! mazecast - Demo media for a maze-chase game
//!
//! This library provides functionality to:
//! - Parse tile maps and find shortest walkable paths
//! - Draw a default sprite set or load one from PNG files
//! - Compose a round-trip animation with ghosts, player and HUD
//! - Export a still, a preview strip and a looping GIF

pub mod assets;
pub mod blend;
pub mod cli;
pub mod compose;
pub mod config;
pub mod demo;
pub mod export;
pub mod gif;
pub mod maze;
pub mod output;
pub mod pathfind;
pub mod quantize;
pub mod shapes;
pub mod sprites;
pub mod spritesheet;
pub mod text;
