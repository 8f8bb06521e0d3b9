//! Pixel color type and channel-order description

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A single 3-channel, 8-bit-per-channel pixel.
///
/// Stored contiguously in the framebuffer, one instance per pixel, with no
/// padding: a buffer of `Color3` reinterprets directly as packed bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Color3 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color3 {
    /// Full white.
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);
    /// Full black.
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    /// Pure red.
    pub const RED: Self = Self::new(0xFF, 0x00, 0x00);
    /// Pure green.
    pub const GREEN: Self = Self::new(0x00, 0xFF, 0x00);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0x00, 0x00, 0xFF);

    /// Create a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color3 {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

/// Channel placement a display backend expects within each presented pixel.
///
/// Expressed as a 3-entry offset table: entry `c` is the byte position of
/// source channel `c` (red, green, blue) inside each 3-byte destination
/// pixel. The default is R,G,B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Red, green, blue — offsets `[0, 1, 2]`.
    #[default]
    Rgb,
    /// Blue, green, red — offsets `[2, 1, 0]`.
    Bgr,
}

impl ChannelOrder {
    /// The offset table for this order.
    pub const fn offsets(self) -> [usize; 3] {
        match self {
            Self::Rgb => [0, 1, 2],
            Self::Bgr => [2, 1, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_three_packed_bytes() {
        assert_eq!(std::mem::size_of::<Color3>(), 3);
        let px = [Color3::RED, Color3::GREEN];
        let bytes: &[u8] = bytemuck::cast_slice(&px);
        assert_eq!(bytes, &[0xFF, 0, 0, 0, 0xFF, 0]);
    }

    #[test]
    fn offset_tables() {
        assert_eq!(ChannelOrder::Rgb.offsets(), [0, 1, 2]);
        assert_eq!(ChannelOrder::Bgr.offsets(), [2, 1, 0]);
        assert_eq!(ChannelOrder::default(), ChannelOrder::Rgb);
    }
}
