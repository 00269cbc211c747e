//! Bitmap snapshots and the fire-and-poll handle that produces them
//!
//! Materialization copies the store at request time and decodes it into an
//! `RgbaImage` off the caller's thread (native) or immediately (WASM). The
//! handle is polled each frame like any other pending operation. There is no
//! cancellation: drop a handle whose result is no longer wanted.

use std::sync::Arc;

use image::RgbaImage;

use super::buffer::BYTES_PER_PIXEL;
use super::color::Color;
use crate::error::{RasterError, Result};

#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{channel, Receiver, TryRecvError};
#[cfg(not(target_arch = "wasm32"))]
use std::thread;

/// Immutable, display-ready snapshot of a raster buffer
///
/// Clones share the same pixels.
#[derive(Debug, Clone)]
pub struct Bitmap {
    image: Arc<RgbaImage>,
}

impl Bitmap {
    /// Decode a raw RGBA store
    ///
    /// A store whose implied size overflows `usize` is reported as a size
    /// mismatch with `expected: usize::MAX`.
    pub fn from_store(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .unwrap_or(usize::MAX);
        let actual = bytes.len();
        if actual != expected {
            return Err(RasterError::StoreSize { expected, actual });
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(RasterError::InvalidDimensions { width, height });
        };
        let image = RgbaImage::from_raw(w, h, bytes).ok_or(RasterError::StoreSize { expected, actual })?;
        Ok(Self {
            image: Arc::new(image),
        })
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// Pixel at `(x, y)`, `None` outside the bitmap
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width() && y < self.height() {
            Some(Color::from_bytes(self.image.get_pixel(x as u32, y as u32).0))
        } else {
            None
        }
    }

    /// Row-major RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Result of a materialization request
pub type BitmapResult = Result<Bitmap>;

/// A bitmap that is being materialized
pub struct PendingBitmap {
    #[cfg(not(target_arch = "wasm32"))]
    receiver: Receiver<BitmapResult>,
    result: Option<BitmapResult>,
}

impl PendingBitmap {
    /// Start decoding `bytes` on a worker thread
    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn spawn(width: usize, height: usize, bytes: Vec<u8>) -> Self {
        let (sender, receiver) = channel();

        thread::spawn(move || {
            let _ = sender.send(Bitmap::from_store(width, height, bytes));
        });

        Self {
            receiver,
            result: None,
        }
    }

    /// No threads on WASM: decode right away
    #[cfg(target_arch = "wasm32")]
    pub(crate) fn spawn(width: usize, height: usize, bytes: Vec<u8>) -> Self {
        Self {
            result: Some(Bitmap::from_store(width, height, bytes)),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn poll(&mut self) {
        if self.result.is_some() {
            return;
        }
        match self.receiver.try_recv() {
            Ok(result) => self.result = Some(result),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                // Worker panicked or dropped the sender
                self.result = Some(Err(RasterError::Materialize("worker exited".into())));
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn poll(&mut self) {}

    /// Check if the bitmap is ready (polls the worker)
    pub fn is_complete(&mut self) -> bool {
        self.poll();
        self.result.is_some()
    }

    /// Take the result if complete
    pub fn take(mut self) -> Option<BitmapResult> {
        self.poll();
        self.result
    }

    /// Block until the result is available
    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait(self) -> BitmapResult {
        match self.result {
            Some(result) => result,
            None => self
                .receiver
                .recv()
                .map_err(|e| RasterError::Materialize(e.to_string()))?,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn wait(self) -> BitmapResult {
        self.result
            .unwrap_or_else(|| Err(RasterError::Materialize("no result".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterBuffer;

    #[test]
    fn test_materialize_snapshot() {
        let mut buf = RasterBuffer::new(4, 3).unwrap();
        buf.set_pixel(2, 1, Color::new(9, 8, 7, 6));

        let pending = buf.materialize_bitmap().unwrap();
        // mutations after the request do not leak into the snapshot
        buf.clear();

        let bitmap = pending.wait().unwrap();
        assert_eq!(bitmap.width(), 4);
        assert_eq!(bitmap.height(), 3);
        assert_eq!(bitmap.pixel(2, 1), Some(Color::new(9, 8, 7, 6)));
        assert_eq!(bitmap.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(bitmap.pixel(4, 0), None);
        assert_eq!(bitmap.as_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_poll_until_complete() {
        let buf = RasterBuffer::new(2, 2).unwrap();
        let mut pending = buf.materialize_bitmap().unwrap();
        while !pending.is_complete() {
            std::thread::yield_now();
        }
        let bitmap = pending.take().unwrap().unwrap();
        assert_eq!(bitmap.as_image().dimensions(), (2, 2));
    }

    #[test]
    fn test_mismatched_store_fails() {
        let mut buf = RasterBuffer::unbound(4, 4).unwrap();
        buf.attach_store(vec![0; 12]);
        let result = buf.materialize_bitmap().unwrap().wait();
        assert!(matches!(
            result,
            Err(RasterError::StoreSize { expected: 64, actual: 12 })
        ));
    }

    #[test]
    fn test_overflowing_size_is_a_mismatch() {
        assert_eq!(
            Bitmap::from_store(usize::MAX / 2, 4, vec![0; 16]).unwrap_err(),
            RasterError::StoreSize { expected: usize::MAX, actual: 16 }
        );

        let mut buf = RasterBuffer::unbound(usize::MAX / 2, 4).unwrap();
        buf.attach_store(vec![0; 16]);
        let result = buf.materialize_bitmap().unwrap().wait();
        assert!(matches!(result, Err(RasterError::StoreSize { actual: 16, .. })));
    }

    #[test]
    fn test_clone_shares_pixels() {
        let bitmap = Bitmap::from_store(1, 1, vec![1, 2, 3, 4]).unwrap();
        let copy = bitmap.clone();
        assert_eq!(copy.as_bytes().as_ptr(), bitmap.as_bytes().as_ptr());
    }
}
