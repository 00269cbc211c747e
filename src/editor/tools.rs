//! Applying the active tool to the selected tile
//!
//! Coordinates are tile-local (the paint view shows one tile at 0,0) and
//! are mapped into the sheet through the selection origin.

use super::state::{EditorState, Tool};
use crate::error::{RasterError, Result};
use crate::raster::{Color, PixelRect, RasterBuffer};
use crate::tiles::TileGrid;

/// Apply `state.tool` at tile-local `(local_x, local_y)`
///
/// Returns whether any pixel changed. An unbound sheet changes nothing.
/// Coordinates outside the tile are rejected.
pub fn apply_tool(
    grid: &mut TileGrid,
    state: &EditorState,
    local_x: usize,
    local_y: usize,
) -> Result<bool> {
    let selection = state.selection(grid)?;
    let size = selection.tile_size();
    if local_x >= size || local_y >= size {
        return Err(RasterError::OutOfBounds {
            x: local_x,
            y: local_y,
            width: size,
            height: size,
        });
    }
    if !grid.is_bound() {
        return Ok(false);
    }

    let origin = selection.origin();
    let (x, y) = (origin.x + local_x, origin.y + local_y);

    let changed = match state.tool {
        Tool::Pencil => paint(grid, x, y, state.selected_color()),
        Tool::Eraser => paint(grid, x, y, Color::TRANSPARENT),
        Tool::Fill => flood_fill(grid, selection.rect(), x, y, state.selected_color()),
    };
    Ok(changed)
}

fn paint(buffer: &mut RasterBuffer, x: usize, y: usize, color: Color) -> bool {
    if buffer.get_pixel(x, y) == color {
        return false;
    }
    buffer.set_pixel(x, y, color);
    true
}

/// 4-connected flood fill confined to `bounds`
fn flood_fill(buffer: &mut RasterBuffer, bounds: PixelRect, x: usize, y: usize, fill: Color) -> bool {
    let target = buffer.get_pixel(x, y);
    if target == fill {
        return false; // Already filled
    }

    let mut stack = vec![(x, y)];
    while let Some((cx, cy)) = stack.pop() {
        if !bounds.contains(cx, cy) || buffer.get_pixel(cx, cy) != target {
            continue;
        }

        buffer.set_pixel(cx, cy, fill);

        if cx > bounds.x {
            stack.push((cx - 1, cy));
        }
        if cx + 1 < bounds.right() {
            stack.push((cx + 1, cy));
        }
        if cy > bounds.y {
            stack.push((cx, cy - 1));
        }
        if cy + 1 < bounds.bottom() {
            stack.push((cx, cy + 1));
        }
    }
    true
}
