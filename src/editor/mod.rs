//! Tile Editor
//!
//! Sprite-sheet editing on top of the tile grid:
//! - Editor state (tile size, selection, tool, palette entry)
//! - Tool application on the selected tile
//! - Paint / origin / tiles view refresh, blocking or polled per frame

mod state;
mod tools;
mod views;

pub use state::*;
pub use tools::apply_tool;
pub use views::{update_origin_view, update_paint_view, update_tiles_view, PendingRefresh};
