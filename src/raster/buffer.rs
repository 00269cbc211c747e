//! RGBA raster buffer with an optionally bound pixel store

use std::num::NonZeroUsize;

use log::{debug, warn};

use super::bitmap::PendingBitmap;
use super::color::Color;
use super::rect::PixelRect;
use crate::error::{RasterError, Result};

/// Bytes per pixel in a store (r, g, b, a)
pub const BYTES_PER_PIXEL: usize = 4;

/// Backing bytes of a raster buffer
///
/// A buffer may exist before any image data has been loaded into it. Reads
/// from an unbound store return transparent black and writes are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PixelStore {
    #[default]
    Unbound,
    /// Row-major RGBA bytes
    Bound(Vec<u8>),
}

impl PixelStore {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PixelStore::Unbound => None,
            PixelStore::Bound(bytes) => Some(bytes),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, PixelStore::Bound(_))
    }
}

/// A width x height grid of RGBA pixels
///
/// Dimensions are fixed at construction. Pixel `(x, y)` lives at byte
/// `(y * width + x) * 4` of the store.
///
/// Two sets of accessors:
/// - `get_pixel` / `set_pixel` / `delete_pixel` are the fast path for inner
///   loops. Coordinates are NOT checked against width/height; an `x` past the
///   row end aliases into the next row. Access past the end of the store
///   reads transparent black or writes nothing, it never panics.
/// - `pixel` / `put_pixel` check the coordinate and return `OutOfBounds`.
///   Use these for coordinates coming from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    store: PixelStore,
}

impl RasterBuffer {
    /// Create a buffer with a zero-filled (transparent black) store
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let mut buffer = Self::unbound(width, height)?;
        let len = buffer
            .expected_len()
            .ok_or(RasterError::InvalidDimensions { width, height })?;
        buffer.store = PixelStore::Bound(vec![0; len]);
        Ok(buffer)
    }

    /// Create a buffer with no store attached
    pub fn unbound(width: usize, height: usize) -> Result<Self> {
        match (NonZeroUsize::new(width), NonZeroUsize::new(height)) {
            (Some(w), Some(h)) => Ok(Self::unbound_sized(w, h)),
            _ => Err(RasterError::InvalidDimensions { width, height }),
        }
    }

    /// Infallible form of `unbound` for dimensions known to be non-zero
    pub const fn unbound_sized(width: NonZeroUsize, height: NonZeroUsize) -> Self {
        Self {
            width: width.get(),
            height: height.get(),
            store: PixelStore::Unbound,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Store length implied by the dimensions, `None` if it overflows `usize`
    pub fn expected_len(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(BYTES_PER_PIXEL)
    }

    pub fn is_bound(&self) -> bool {
        self.store.is_bound()
    }

    /// Raw store bytes, `None` when unbound
    pub fn store(&self) -> Option<&[u8]> {
        self.store.as_bytes()
    }

    /// Replace the store wholesale
    ///
    /// The length is not validated. A mismatched store still works with the
    /// fast accessors but will fail to materialize.
    pub fn attach_store(&mut self, store: Vec<u8>) {
        match self.expected_len() {
            Some(expected) if expected == store.len() => {}
            expected => warn!(
                "attaching {} byte store to {}x{} buffer (expected {:?})",
                store.len(),
                self.width,
                self.height,
                expected
            ),
        }
        debug!("attached store to {}x{} buffer", self.width, self.height);
        self.store = PixelStore::Bound(store);
    }

    /// Take the store out, leaving the buffer unbound
    pub fn detach_store(&mut self) -> Option<Vec<u8>> {
        match std::mem::take(&mut self.store) {
            PixelStore::Bound(bytes) => {
                debug!("detached store from {}x{} buffer", self.width, self.height);
                Some(bytes)
            }
            PixelStore::Unbound => None,
        }
    }

    /// Set every pixel to transparent black (no-op when unbound)
    pub fn clear(&mut self) {
        if let PixelStore::Bound(bytes) = &mut self.store {
            bytes.fill(0);
        }
    }

    /// Byte offset of pixel `(x, y)` in the store
    ///
    /// Plain arithmetic: only meaningful for coordinates inside the buffer.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * BYTES_PER_PIXEL
    }

    /// Byte range of pixel `(x, y)`, `None` if the offset overflows `usize`
    #[inline]
    fn pixel_range(&self, x: usize, y: usize) -> Option<std::ops::Range<usize>> {
        let start = y
            .checked_mul(self.width)?
            .checked_add(x)?
            .checked_mul(BYTES_PER_PIXEL)?;
        Some(start..start.checked_add(BYTES_PER_PIXEL)?)
    }

    /// Read a pixel (fast path, see type docs)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        match &self.store {
            PixelStore::Unbound => Color::TRANSPARENT,
            PixelStore::Bound(bytes) => match self.pixel_range(x, y).and_then(|r| bytes.get(r)) {
                Some(px) => Color::new(px[0], px[1], px[2], px[3]),
                None => Color::TRANSPARENT,
            },
        }
    }

    /// Write a pixel (fast path, see type docs)
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let Some(range) = self.pixel_range(x, y) else {
            return;
        };
        if let PixelStore::Bound(bytes) = &mut self.store {
            if let Some(px) = bytes.get_mut(range) {
                px.copy_from_slice(&color.to_bytes());
            }
        }
    }

    /// Reset a pixel to transparent black
    #[inline]
    pub fn delete_pixel(&mut self, x: usize, y: usize) {
        self.set_pixel(x, y, Color::TRANSPARENT);
    }

    /// Checked read
    pub fn pixel(&self, x: usize, y: usize) -> Result<Color> {
        self.check_coords(x, y)?;
        Ok(self.get_pixel(x, y))
    }

    /// Checked write
    pub fn put_pixel(&mut self, x: usize, y: usize, color: Color) -> Result<()> {
        self.check_coords(x, y)?;
        self.set_pixel(x, y, color);
        Ok(())
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn check_coords(&self, x: usize, y: usize) -> Result<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(RasterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Fill a rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let rect = rect.clip_to(self.width, self.height);
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Copy a sub-region into a new buffer
    ///
    /// An unbound source yields an unbound copy.
    pub fn copy_region(&self, rect: PixelRect) -> Result<RasterBuffer> {
        if rect.is_empty() {
            return Err(RasterError::InvalidDimensions {
                width: rect.width,
                height: rect.height,
            });
        }
        if !rect.fits_within(self.width, self.height) {
            return Err(RasterError::OutOfBounds {
                x: rect.right(),
                y: rect.bottom(),
                width: self.width,
                height: self.height,
            });
        }

        let Some(bytes) = self.store() else {
            return RasterBuffer::unbound(rect.width, rect.height);
        };

        let mut out = RasterBuffer::new(rect.width, rect.height)?;
        let row_len = rect.width * BYTES_PER_PIXEL;
        if let PixelStore::Bound(dst) = &mut out.store {
            for row in 0..rect.height {
                let src_row = self
                    .pixel_range(rect.x, rect.y + row)
                    .and_then(|r| r.start.checked_add(row_len).map(|end| r.start..end))
                    .and_then(|r| bytes.get(r));
                if let Some(src_row) = src_row {
                    let dst_start = row * row_len;
                    dst[dst_start..dst_start + row_len].copy_from_slice(src_row);
                }
            }
        }
        Ok(out)
    }

    /// Start materializing a bitmap snapshot of the current store
    ///
    /// Returns `None` when unbound. The store is copied before this returns,
    /// so the buffer may be mutated while the snapshot is in flight.
    pub fn materialize_bitmap(&self) -> Option<PendingBitmap> {
        let bytes = self.store()?.to_vec();
        debug!("materializing {}x{} bitmap", self.width, self.height);
        Some(PendingBitmap::spawn(self.width, self.height, bytes))
    }
}
