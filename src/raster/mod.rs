//! RGBA raster buffers
//!
//! The pixel-level layer of the editor: a fixed-size grid of RGBA pixels
//! backed by a flat byte store, and the bitmap snapshots handed to the UI.
//!
//! ## Store Format
//!
//! Row-major, 4 bytes per pixel in (r, g, b, a) order, `width * height * 4`
//! bytes long. Pixel `(x, y)` starts at byte `(y * width + x) * 4`. Anything
//! that exchanges pixel data with the outside world uses this layout.
//!
//! ## Module Organization
//!
//! - `color` - 8-bit RGBA color and its packed `0xRRGGBBAA` form
//! - `buffer` - RasterBuffer and its bound/unbound store
//! - `bitmap` - immutable snapshots and the pending-materialization handle
//! - `surface` - the blit target seam and an in-memory implementation
//! - `rect` - pixel-space rectangles

pub mod bitmap;
pub mod buffer;
pub mod color;
pub mod rect;
pub mod surface;

pub use bitmap::{Bitmap, BitmapResult, PendingBitmap};
pub use buffer::{PixelStore, RasterBuffer, BYTES_PER_PIXEL};
pub use color::Color;
pub use rect::PixelRect;
pub use surface::{SoftwareSurface, Surface};
