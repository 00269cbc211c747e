//! Display surfaces that bitmaps are blitted onto
//!
//! The core never draws to the screen itself. A `Surface` is whatever the
//! rendering boundary hands in; `SoftwareSurface` is an in-memory one used by
//! the viewer (which uploads it as a texture) and by tests.

use image::{Rgba, RgbaImage};

use super::bitmap::Bitmap;
use super::color::Color;
use super::rect::PixelRect;

/// Something bitmaps can be drawn onto
///
/// Drawing composites source-over at an integer offset. Offsets may be
/// negative; anything outside the surface is clipped.
pub trait Surface {
    /// (width, height) in pixels
    fn size(&self) -> (usize, usize);

    /// Reset a region to transparent black
    fn clear_rect(&mut self, rect: PixelRect);

    /// Draw the `src` region of `bitmap` with its top-left at `(dx, dy)`
    fn draw_bitmap_region(&mut self, bitmap: &Bitmap, src: PixelRect, dx: i32, dy: i32);

    /// Reset the whole surface to transparent black
    fn clear(&mut self) {
        let (w, h) = self.size();
        self.clear_rect(PixelRect::new(0, 0, w, h));
    }

    /// Draw the whole bitmap with its top-left at `(dx, dy)`
    fn draw_bitmap(&mut self, bitmap: &Bitmap, dx: i32, dy: i32) {
        let src = PixelRect::new(0, 0, bitmap.width(), bitmap.height());
        self.draw_bitmap_region(bitmap, src, dx, dy);
    }
}

/// Non-premultiplied source-over
fn blend_over(src: Color, dst: Color) -> Color {
    match src.a {
        255 => src,
        0 => dst,
        _ => {
            let sa = src.a as u32;
            let da = dst.a as u32;
            // out_a = sa + da * (1 - sa), all scaled by 255
            let dst_weight = da * (255 - sa) / 255;
            let out_a = sa + dst_weight;
            if out_a == 0 {
                return Color::TRANSPARENT;
            }
            let channel = |s: u8, d: u8| ((s as u32 * sa + d as u32 * dst_weight) / out_a) as u8;
            Color::new(
                channel(src.r, dst.r),
                channel(src.g, dst.g),
                channel(src.b, dst.b),
                out_a as u8,
            )
        }
    }
}

/// In-memory RGBA surface
#[derive(Debug, Clone)]
pub struct SoftwareSurface {
    image: RgbaImage,
}

impl SoftwareSurface {
    /// Create a transparent surface
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: RgbaImage::new(width as u32, height as u32),
        }
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// Pixel at `(x, y)`, `None` outside the surface
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width() && y < self.height() {
            Some(Color::from_bytes(self.image.get_pixel(x as u32, y as u32).0))
        } else {
            None
        }
    }

    /// Row-major RGBA bytes, ready for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }
}

impl Surface for SoftwareSurface {
    fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn clear_rect(&mut self, rect: PixelRect) {
        let rect = rect.clip_to(self.width(), self.height());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.image.put_pixel(x as u32, y as u32, Rgba([0, 0, 0, 0]));
            }
        }
    }

    fn draw_bitmap_region(&mut self, bitmap: &Bitmap, src: PixelRect, dx: i32, dy: i32) {
        let src = src.clip_to(bitmap.width(), bitmap.height());
        let (w, h) = (self.width() as i64, self.height() as i64);

        for sy in 0..src.height {
            let ty = dy as i64 + sy as i64;
            if ty < 0 || ty >= h {
                continue;
            }
            for sx in 0..src.width {
                let tx = dx as i64 + sx as i64;
                if tx < 0 || tx >= w {
                    continue;
                }
                let Some(color) = bitmap.pixel(src.x + sx, src.y + sy) else {
                    continue;
                };
                let target = self.image.get_pixel_mut(tx as u32, ty as u32);
                let blended = blend_over(color, Color::from_bytes(target.0));
                *target = Rgba(blended.to_bytes());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterBuffer;

    fn solid(width: usize, height: usize, color: Color) -> Bitmap {
        let mut buf = RasterBuffer::new(width, height).unwrap();
        buf.fill_rect(PixelRect::new(0, 0, width, height), color);
        buf.materialize_bitmap().unwrap().wait().unwrap()
    }

    #[test]
    fn test_blend_extremes() {
        let dst = Color::new(10, 20, 30, 255);
        assert_eq!(blend_over(Color::WHITE, dst), Color::WHITE);
        assert_eq!(blend_over(Color::TRANSPARENT, dst), dst);
        assert_eq!(blend_over(Color::TRANSPARENT, Color::TRANSPARENT), Color::TRANSPARENT);
    }

    #[test]
    fn test_blend_half() {
        let out = blend_over(Color::new(255, 0, 0, 128), Color::new(0, 0, 255, 255));
        assert_eq!(out.a, 255);
        assert!(out.r > 120 && out.r < 135);
        assert!(out.b > 120 && out.b < 135);
    }

    #[test]
    fn test_draw_with_negative_offset_clips() {
        let mut surface = SoftwareSurface::new(4, 4);
        surface.draw_bitmap(&solid(3, 3, Color::WHITE), -1, -1);
        assert_eq!(surface.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(surface.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(surface.pixel(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_draw_region() {
        let mut buf = RasterBuffer::new(4, 4).unwrap();
        buf.set_pixel(2, 2, Color::BLACK);
        let bitmap = buf.materialize_bitmap().unwrap().wait().unwrap();

        let mut surface = SoftwareSurface::new(2, 2);
        surface.draw_bitmap_region(&bitmap, PixelRect::square(2, 2, 2), 0, 0);
        assert_eq!(surface.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(surface.pixel(1, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_transparent_keeps_destination() {
        let mut surface = SoftwareSurface::new(2, 2);
        surface.draw_bitmap(&solid(2, 2, Color::BLACK), 0, 0);
        surface.draw_bitmap(&solid(2, 2, Color::TRANSPARENT), 0, 0);
        assert_eq!(surface.pixel(1, 1), Some(Color::BLACK));

        surface.clear();
        assert_eq!(surface.pixel(1, 1), Some(Color::TRANSPARENT));
    }
}
