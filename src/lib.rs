//! TILESMITH: raster buffers and tile selection for a pixel sprite-sheet editor
//!
//! - `raster` - RGBA color, pixel buffers, bitmap snapshots, blit surfaces
//! - `tiles` - the sprite sheet as a tile grid, selection overlay
//! - `editor` - editor state, painting tools, view refresh
//! - `config` - RON editor configuration

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod editor;
pub mod error;
pub mod raster;
pub mod tiles;

pub use error::{RasterError, Result};
