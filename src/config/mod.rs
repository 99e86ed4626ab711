//! Configuration for mazecast runs
//!
//! Provides types, discovery and parsing for `mazecast.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
