//! Selection rectangle overlay
//!
//! A one-pixel white frame drawn just outside the selected tile. Rebuilt from
//! scratch on every selection change; nothing is cached.

use log::debug;

use super::grid::{Selection, TileOrigin};
use crate::error::{RasterError, Result};
use crate::raster::{Color, RasterBuffer, BYTES_PER_PIXEL};

/// Overlay buffer plus where to blit it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOverlay {
    /// `(tile_size + 2)` square: white ring, transparent interior
    pub buffer: RasterBuffer,
    /// Blit position, one pixel up and left of the tile origin
    pub x: i32,
    pub y: i32,
}

impl SelectionOverlay {
    pub fn for_selection(selection: &Selection) -> Result<Self> {
        build_overlay(selection.tile_size(), selection.origin())
    }

    /// Edge length of the overlay buffer
    pub fn size(&self) -> usize {
        self.buffer.width()
    }
}

/// Build the frame for a tile of `tile_size` at `origin`
pub fn build_overlay(tile_size: usize, origin: TileOrigin) -> Result<SelectionOverlay> {
    let invalid = RasterError::InvalidDimensions {
        width: tile_size,
        height: tile_size,
    };
    if tile_size == 0 {
        return Err(invalid);
    }

    let size = tile_size.checked_add(2).ok_or(invalid.clone())?;
    let last = size - 1;
    let mut buffer = RasterBuffer::unbound(size, size)?;

    // Interior stays zeroed (transparent black)
    let mut store = vec![0u8; buffer.expected_len().ok_or(invalid)?];
    let white = Color::WHITE.to_bytes();
    for y in 0..size {
        for x in 0..size {
            if x == 0 || x == last || y == 0 || y == last {
                let i = buffer.index_of(x, y);
                store[i..i + BYTES_PER_PIXEL].copy_from_slice(&white);
            }
        }
    }
    buffer.attach_store(store);

    debug!("built {}x{} selection overlay at ({}, {})", size, size, origin.x, origin.y);

    Ok(SelectionOverlay {
        buffer,
        x: blit_offset(origin.x),
        y: blit_offset(origin.y),
    })
}

/// One pixel before `origin`, saturating at `i32::MAX - 1`
fn blit_offset(origin: usize) -> i32 {
    i32::try_from(origin).unwrap_or(i32::MAX) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_border_8() {
        let overlay = build_overlay(8, TileOrigin::new(0, 0)).unwrap();
        let buf = &overlay.buffer;
        assert_eq!((buf.width(), buf.height()), (10, 10));

        for (x, y) in [(0, 0), (9, 0), (0, 9), (9, 9)] {
            assert_eq!(buf.get_pixel(x, y), Color::WHITE);
        }

        let mut interior = 0;
        for y in 0..10 {
            for x in 0..10 {
                let on_ring = x == 0 || x == 9 || y == 0 || y == 9;
                let expected = if on_ring { Color::WHITE } else { Color::TRANSPARENT };
                assert_eq!(buf.get_pixel(x, y), expected, "pixel ({}, {})", x, y);
                if !on_ring {
                    interior += 1;
                }
            }
        }
        assert_eq!(interior, 64);
    }

    #[test]
    fn test_overlay_sizes() {
        for t in [1, 2, 3, 8, 16, 32, 128] {
            let overlay = build_overlay(t, TileOrigin::default()).unwrap();
            assert_eq!(overlay.buffer.width(), t + 2);
            assert_eq!(overlay.buffer.height(), t + 2);
            assert_eq!(overlay.size(), t + 2);
        }
    }

    #[test]
    fn test_tile_size_one_has_single_interior_pixel() {
        let overlay = build_overlay(1, TileOrigin::new(4, 4)).unwrap();
        assert_eq!(overlay.buffer.get_pixel(1, 1), Color::TRANSPARENT);
        assert_eq!(overlay.buffer.get_pixel(0, 1), Color::WHITE);
    }

    #[test]
    fn test_blit_position() {
        let overlay = build_overlay(8, TileOrigin::new(16, 24)).unwrap();
        assert_eq!((overlay.x, overlay.y), (15, 23));

        let corner = build_overlay(8, TileOrigin::new(0, 0)).unwrap();
        assert_eq!((corner.x, corner.y), (-1, -1));
    }

    #[test]
    fn test_blit_position_saturates() {
        let far = build_overlay(1, TileOrigin::new(usize::MAX, 1 << 31)).unwrap();
        assert_eq!((far.x, far.y), (i32::MAX - 1, i32::MAX - 1));

        let edge = build_overlay(1, TileOrigin::new(i32::MAX as usize, 0)).unwrap();
        assert_eq!((edge.x, edge.y), (i32::MAX - 1, -1));
    }

    #[test]
    fn test_huge_tile_size_rejected() {
        assert!(matches!(
            build_overlay(usize::MAX, TileOrigin::default()),
            Err(RasterError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        assert!(matches!(
            build_overlay(0, TileOrigin::default()),
            Err(RasterError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_for_selection() {
        let grid = crate::tiles::TileGrid::new();
        let selection = grid.select(16, TileOrigin::new(32, 0)).unwrap();
        let overlay = SelectionOverlay::for_selection(&selection).unwrap();
        assert_eq!(overlay.size(), 18);
        assert_eq!((overlay.x, overlay.y), (31, -1));
    }
}
