//! The sprite sheet as a grid of square tiles

use std::num::NonZeroUsize;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::error::{RasterError, Result};
use crate::raster::{PixelRect, RasterBuffer};

/// Default sprite sheet edge in pixels
pub const SHEET_SIZE: usize = 128;

const SHEET_DIM: NonZeroUsize = match NonZeroUsize::new(SHEET_SIZE) {
    Some(n) => n,
    None => panic!("sheet size must be non-zero"),
};

/// Top-left pixel of a tile within the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileOrigin {
    pub x: usize,
    pub y: usize,
}

impl TileOrigin {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A tile size and origin that have been checked against a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    tile_size: usize,
    origin: TileOrigin,
}

impl Selection {
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    pub fn origin(&self) -> TileOrigin {
        self.origin
    }

    /// The selected tile's pixels within the sheet
    pub fn rect(&self) -> PixelRect {
        PixelRect::square(self.origin.x, self.origin.y, self.tile_size)
    }
}

/// The sprite sheet being edited
///
/// A plain raster buffer (it derefs to one) plus tile addressing. Tiles are
/// numbered row-major; partial tiles at the right/bottom edge are not
/// addressable. The store starts unbound until image data is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    buffer: RasterBuffer,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGrid {
    /// 128x128 sheet with no store attached
    pub const fn new() -> Self {
        Self {
            buffer: RasterBuffer::unbound_sized(SHEET_DIM, SHEET_DIM),
        }
    }

    /// Sheet of a custom size with no store attached
    pub fn with_size(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            buffer: RasterBuffer::unbound(width, height)?,
        })
    }

    pub fn from_buffer(buffer: RasterBuffer) -> Self {
        Self { buffer }
    }

    pub fn into_buffer(self) -> RasterBuffer {
        self.buffer
    }

    /// Validate a selection: the whole tile must lie inside the sheet
    pub fn select(&self, tile_size: usize, origin: TileOrigin) -> Result<Selection> {
        if tile_size == 0 {
            return Err(RasterError::InvalidDimensions {
                width: tile_size,
                height: tile_size,
            });
        }
        if !PixelRect::square(origin.x, origin.y, tile_size).fits_within(self.width(), self.height()) {
            return Err(RasterError::OutOfBounds {
                x: origin.x,
                y: origin.y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(Selection { tile_size, origin })
    }

    /// Whole tiles per row
    pub fn columns(&self, tile_size: usize) -> usize {
        self.width().checked_div(tile_size).unwrap_or(0)
    }

    /// Whole tiles per column
    pub fn rows(&self, tile_size: usize) -> usize {
        self.height().checked_div(tile_size).unwrap_or(0)
    }

    pub fn tile_count(&self, tile_size: usize) -> usize {
        self.columns(tile_size) * self.rows(tile_size)
    }

    /// Origin of the tile with row-major `index`
    pub fn tile_origin(&self, index: usize, tile_size: usize) -> Option<TileOrigin> {
        if index >= self.tile_count(tile_size) {
            return None;
        }
        let columns = self.columns(tile_size);
        Some(TileOrigin::new(
            (index % columns) * tile_size,
            (index / columns) * tile_size,
        ))
    }

    /// Index and origin of the tile containing pixel `(x, y)`
    pub fn tile_at(&self, x: usize, y: usize, tile_size: usize) -> Option<(usize, TileOrigin)> {
        if tile_size == 0 {
            return None;
        }
        let (column, row) = (x / tile_size, y / tile_size);
        if column >= self.columns(tile_size) || row >= self.rows(tile_size) {
            return None;
        }
        Some((
            row * self.columns(tile_size) + column,
            TileOrigin::new(column * tile_size, row * tile_size),
        ))
    }

    /// Copy the selected tile out of the sheet
    pub fn crop_tile(&self, selection: &Selection) -> Result<RasterBuffer> {
        self.buffer.copy_region(selection.rect())
    }
}

impl Deref for TileGrid {
    type Target = RasterBuffer;

    fn deref(&self) -> &RasterBuffer {
        &self.buffer
    }
}

impl DerefMut for TileGrid {
    fn deref_mut(&mut self) -> &mut RasterBuffer {
        &mut self.buffer
    }
}
