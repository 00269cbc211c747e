//! Pixel-space rectangle

/// A rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// Square rect, the shape of a tile
    pub const fn square(x: usize, y: usize, size: usize) -> Self {
        Self::new(x, y, size, size)
    }

    /// Exclusive right edge
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True if the rect lies entirely inside a `width` x `height` area
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.right() <= width && self.bottom() <= height
    }

    /// Clip to a `width` x `height` area anchored at the origin
    pub fn clip_to(&self, width: usize, height: usize) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self::new(x, y, self.right().min(width) - x, self.bottom().min(height) - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_contains() {
        let r = PixelRect::new(2, 3, 4, 5);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 8);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 7));
        assert!(!r.contains(6, 7));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn test_clip() {
        let r = PixelRect::new(6, 6, 8, 8);
        assert_eq!(r.clip_to(10, 10), PixelRect::new(6, 6, 4, 4));
        assert!(PixelRect::new(12, 0, 4, 4).clip_to(10, 10).is_empty());
        assert!(PixelRect::square(0, 0, 8).fits_within(8, 8));
        assert!(!PixelRect::square(1, 0, 8).fits_within(8, 8));
    }
}
