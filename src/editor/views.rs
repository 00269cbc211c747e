//! Refreshing the editor's three views from the sheet
//!
//! - **paint view**: the selected tile alone, at (0, 0)
//! - **origin view**: the whole sheet, unmodified
//! - **tiles view**: the whole sheet with the selection frame on top
//!
//! The `update_*` functions materialize and draw in one call, blocking until
//! the bitmaps are ready. The viewer uses `PendingRefresh` instead: request
//! when the sheet or selection changes, poll every frame, draw when done.
//!
//! Both return nothing to draw when the sheet has no store yet.

use super::state::EditorState;
use crate::error::Result;
use crate::raster::{Bitmap, PendingBitmap, PixelRect, Surface};
use crate::tiles::{Selection, SelectionOverlay, TileGrid};

/// Draw the selected tile at the surface origin
pub fn update_paint_view<S: Surface + ?Sized>(
    grid: &TileGrid,
    state: &EditorState,
    surface: &mut S,
) -> Result<bool> {
    let Some(pending) = grid.materialize_bitmap() else {
        return Ok(false);
    };
    let selection = state.selection(grid)?;
    let sheet = pending.wait()?;

    draw_paint(surface, &sheet, &selection);
    Ok(true)
}

/// Draw the sheet as-is
pub fn update_origin_view<S: Surface + ?Sized>(grid: &TileGrid, surface: &mut S) -> Result<bool> {
    let Some(pending) = grid.materialize_bitmap() else {
        return Ok(false);
    };
    let sheet = pending.wait()?;

    draw_sheet(surface, &sheet);
    Ok(true)
}

/// Draw the sheet with the selection frame one pixel outside the tile
pub fn update_tiles_view<S: Surface + ?Sized>(
    grid: &TileGrid,
    state: &EditorState,
    surface: &mut S,
) -> Result<bool> {
    let Some(pending) = grid.materialize_bitmap() else {
        return Ok(false);
    };
    let selection = state.selection(grid)?;
    let overlay = SelectionOverlay::for_selection(&selection)?;
    let frame = overlay.buffer.materialize_bitmap();
    let sheet = pending.wait()?;
    let frame = frame.map(PendingBitmap::wait).transpose()?;

    draw_tiles(surface, &sheet, frame.as_ref(), (overlay.x, overlay.y));
    Ok(true)
}

/// A tiles + paint view refresh whose bitmaps are still materializing
///
/// Snapshots are taken at request time, so the sheet may be edited (or a newer
/// refresh requested, dropping this one) while it is in flight.
pub struct PendingRefresh {
    sheet: PendingBitmap,
    frame: Option<PendingBitmap>,
    selection: Selection,
    frame_at: (i32, i32),
}

impl PendingRefresh {
    /// Start materializing the sheet and selection frame
    ///
    /// `Ok(None)` when the sheet has no store yet.
    pub fn request(grid: &TileGrid, state: &EditorState) -> Result<Option<Self>> {
        let Some(sheet) = grid.materialize_bitmap() else {
            return Ok(None);
        };
        let selection = state.selection(grid)?;
        let overlay = SelectionOverlay::for_selection(&selection)?;
        Ok(Some(Self {
            sheet,
            frame: overlay.buffer.materialize_bitmap(),
            selection,
            frame_at: (overlay.x, overlay.y),
        }))
    }

    /// Check if every bitmap is ready (polls the workers)
    pub fn is_complete(&mut self) -> bool {
        let frame_done = self.frame.as_mut().map_or(true, PendingBitmap::is_complete);
        self.sheet.is_complete() && frame_done
    }

    /// Draw the tiles and paint views
    ///
    /// Blocks if called before `is_complete` returns true.
    pub fn finish<T, P>(self, tiles: &mut T, paint: &mut P) -> Result<()>
    where
        T: Surface + ?Sized,
        P: Surface + ?Sized,
    {
        let sheet = self.sheet.wait()?;
        let frame = self.frame.map(PendingBitmap::wait).transpose()?;

        draw_tiles(tiles, &sheet, frame.as_ref(), self.frame_at);
        draw_paint(paint, &sheet, &self.selection);
        Ok(())
    }
}

fn draw_sheet<S: Surface + ?Sized>(surface: &mut S, sheet: &Bitmap) {
    surface.clear_rect(PixelRect::new(0, 0, sheet.width(), sheet.height()));
    surface.draw_bitmap(sheet, 0, 0);
}

fn draw_tiles<S: Surface + ?Sized>(surface: &mut S, sheet: &Bitmap, frame: Option<&Bitmap>, at: (i32, i32)) {
    draw_sheet(surface, sheet);
    if let Some(frame) = frame {
        surface.draw_bitmap(frame, at.0, at.1);
    }
}

fn draw_paint<S: Surface + ?Sized>(surface: &mut S, sheet: &Bitmap, selection: &Selection) {
    surface.clear_rect(PixelRect::square(0, 0, selection.tile_size()));
    surface.draw_bitmap_region(sheet, selection.rect(), 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{Color, SoftwareSurface};
    use crate::tiles::SHEET_SIZE;

    fn painted_grid() -> TileGrid {
        let mut grid = TileGrid::new();
        grid.attach_store(vec![0; SHEET_SIZE * SHEET_SIZE * 4]);
        grid.fill_rect(PixelRect::square(8, 8, 8), Color::BLACK);
        grid.set_pixel(9, 9, Color::rgb(255, 0, 0));
        grid
    }

    #[test]
    fn test_unbound_sheet_leaves_surface() {
        let grid = TileGrid::new();
        let state = EditorState::new();
        let mut surface = SoftwareSurface::new(SHEET_SIZE, SHEET_SIZE);
        assert_eq!(update_origin_view(&grid, &mut surface), Ok(false));
        assert_eq!(update_paint_view(&grid, &state, &mut surface), Ok(false));
        assert_eq!(update_tiles_view(&grid, &state, &mut surface), Ok(false));
        assert!(surface.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_paint_view_shows_selected_tile() {
        let grid = painted_grid();
        let mut state = EditorState::new();
        assert!(state.select_tile(&grid, 17));

        let mut surface = SoftwareSurface::new(8, 8);
        assert!(update_paint_view(&grid, &state, &mut surface).unwrap());
        assert_eq!(surface.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(surface.pixel(1, 1), Some(Color::rgb(255, 0, 0)));
        assert_eq!(surface.pixel(7, 7), Some(Color::BLACK));
    }

    #[test]
    fn test_paint_view_replaces_previous_tile() {
        let grid = painted_grid();
        let mut state = EditorState::new();
        let mut surface = SoftwareSurface::new(8, 8);

        state.select_tile(&grid, 17);
        update_paint_view(&grid, &state, &mut surface).unwrap();
        state.select_tile(&grid, 0);
        update_paint_view(&grid, &state, &mut surface).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_origin_view() {
        let grid = painted_grid();
        let mut surface = SoftwareSurface::new(SHEET_SIZE, SHEET_SIZE);
        assert!(update_origin_view(&grid, &mut surface).unwrap());
        assert_eq!(surface.pixel(9, 9), Some(Color::rgb(255, 0, 0)));
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(surface.as_bytes(), grid.store().unwrap());
    }

    #[test]
    fn test_tiles_view_draws_frame_outside_tile() {
        let grid = painted_grid();
        let mut state = EditorState::new();
        state.select_tile(&grid, 17);

        let mut surface = SoftwareSurface::new(SHEET_SIZE, SHEET_SIZE);
        assert!(update_tiles_view(&grid, &state, &mut surface).unwrap());

        // frame ring covers x/y in 7..=16
        assert_eq!(surface.pixel(7, 7), Some(Color::WHITE));
        assert_eq!(surface.pixel(16, 16), Some(Color::WHITE));
        assert_eq!(surface.pixel(12, 7), Some(Color::WHITE));
        assert_eq!(surface.pixel(7, 12), Some(Color::WHITE));
        // transparent interior keeps the sheet
        assert_eq!(surface.pixel(8, 8), Some(Color::BLACK));
        assert_eq!(surface.pixel(9, 9), Some(Color::rgb(255, 0, 0)));
        // outside the frame
        assert_eq!(surface.pixel(6, 6), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(17, 17), Some(Color::TRANSPARENT));
    }

    fn finish_when_complete(mut refresh: PendingRefresh) -> (SoftwareSurface, SoftwareSurface) {
        while !refresh.is_complete() {
            std::thread::yield_now();
        }
        let mut tiles = SoftwareSurface::new(SHEET_SIZE, SHEET_SIZE);
        let mut paint = SoftwareSurface::new(8, 8);
        refresh.finish(&mut tiles, &mut paint).unwrap();
        (tiles, paint)
    }

    #[test]
    fn test_pending_refresh_matches_blocking_views() {
        let grid = painted_grid();
        let mut state = EditorState::new();
        state.select_tile(&grid, 17);

        let refresh = PendingRefresh::request(&grid, &state).unwrap().unwrap();
        let (tiles, paint) = finish_when_complete(refresh);

        let mut expected_tiles = SoftwareSurface::new(SHEET_SIZE, SHEET_SIZE);
        let mut expected_paint = SoftwareSurface::new(8, 8);
        update_tiles_view(&grid, &state, &mut expected_tiles).unwrap();
        update_paint_view(&grid, &state, &mut expected_paint).unwrap();
        assert_eq!(tiles.as_bytes(), expected_tiles.as_bytes());
        assert_eq!(paint.as_bytes(), expected_paint.as_bytes());
        assert_eq!(paint.pixel(1, 1), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_pending_refresh_uses_request_snapshot() {
        let mut grid = painted_grid();
        let mut state = EditorState::new();
        state.select_tile(&grid, 17);

        let refresh = PendingRefresh::request(&grid, &state).unwrap().unwrap();
        grid.clear();

        let (tiles, paint) = finish_when_complete(refresh);
        assert_eq!(tiles.pixel(9, 9), Some(Color::rgb(255, 0, 0)));
        assert_eq!(paint.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_pending_refresh_unbound_sheet() {
        let grid = TileGrid::new();
        let state = EditorState::new();
        assert!(PendingRefresh::request(&grid, &state).unwrap().is_none());
    }

    #[test]
    fn test_tiles_view_clips_frame_at_corner() {
        let grid = painted_grid();
        let state = EditorState::new();
        let mut surface = SoftwareSurface::new(SHEET_SIZE, SHEET_SIZE);
        update_tiles_view(&grid, &state, &mut surface).unwrap();
        assert_eq!(surface.pixel(8, 0), Some(Color::WHITE));
        assert_eq!(surface.pixel(0, 8), Some(Color::WHITE));
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
    }
}
