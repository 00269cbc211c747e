//! Tile addressing on top of the sprite sheet
//!
//! - **TileGrid**: the sheet being edited (128x128 by default), a raster buffer
//!   with tile index/origin helpers and tile cropping
//! - **SelectionOverlay**: the white frame drawn around the selected tile
//! - **shared_tile_grid**: lazily created process-wide sheet for the app layer

mod grid;
mod overlay;
mod shared;

pub use grid::{Selection, TileGrid, TileOrigin, SHEET_SIZE};
pub use overlay::{build_overlay, SelectionOverlay};
pub use shared::{shared_tile_grid, SharedTileGrid};
