//! 8-bit RGBA color with a packed 32-bit form

use serde::{Deserialize, Serialize};

/// RGBA color, 8 bits per channel
///
/// Packed form is big-endian RGBA: `0xRRGGBBAA`. Both directions use the
/// same ordering, so `from_packed` and `to_packed` are exact inverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black, the value of an erased or unbound pixel
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    /// Opaque white
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    /// Opaque black
    pub const BLACK: Color = Color::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Unpack from `0xRRGGBBAA`
    #[inline]
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
            a: value as u8,
        }
    }

    /// Pack into `0xRRGGBBAA`
    #[inline]
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | (self.a as u32)
    }

    /// Bytes in store order (r, g, b, a)
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}
