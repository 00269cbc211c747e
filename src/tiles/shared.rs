//! Process-wide default tile sheet
//!
//! Library code takes a `TileGrid` explicitly. This is the convenience the
//! application uses when it just wants "the sheet being edited".

use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

use super::grid::TileGrid;

/// Handle to the shared sheet
pub type SharedTileGrid = Arc<Mutex<TileGrid>>;

lazy_static! {
    static ref SHARED_TILE_GRID: SharedTileGrid = Arc::new(Mutex::new(TileGrid::new()));
}

/// The shared sheet, created (128x128, unbound) on first call
///
/// Every call returns a handle to the same instance.
pub fn shared_tile_grid() -> SharedTileGrid {
    Arc::clone(&SHARED_TILE_GRID)
}
