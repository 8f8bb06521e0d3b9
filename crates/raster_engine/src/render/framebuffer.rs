//! CPU-side pixel buffer and scanline drawing primitive

use crate::render::color::{ChannelOrder, Color3};

/// Stable byte view of a completed frame, handed to display backends.
///
/// Layout guarantees: row-major, top-to-bottom, `pixel_size` bytes per
/// pixel, `pitch` bytes per row with no padding between rows. `offsets`
/// carries the channel placement the presenting backend expects (see
/// [`ChannelOrder`]).
pub struct PixelBlock<'a> {
    /// The raw pixel bytes, `pitch * height` long.
    pub bytes: &'a [u8],
    /// Frame width in pixels.
    pub width: usize,
    /// Frame height in pixels.
    pub height: usize,
    /// Bytes per row (`pixel_size * width`).
    pub pitch: usize,
    /// Bytes per pixel (always 3).
    pub pixel_size: usize,
    /// Destination byte position of the red, green, and blue channels
    /// within each presented pixel.
    pub offsets: [usize; 3],
}

/// Owns the pixel storage for one render target.
///
/// Width and height are fixed at construction; the buffer is allocated once
/// and never resized. All higher-level rasterization composes from
/// [`FrameBuffer::scanline`], so every pixel write in the engine is bounds
/// checked here.
pub struct FrameBuffer {
    pixels: Vec<Color3>,
    width: usize,
    height: usize,
    x_origin: i32,
    y_origin: i32,
    background: Color3,
}

impl FrameBuffer {
    /// Allocate a `width * height` buffer cleared to a white background.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_background(width, height, Color3::WHITE)
    }

    /// Allocate a buffer with a caller-chosen background color.
    pub fn with_background(width: usize, height: usize, background: Color3) -> Self {
        assert!(width > 0 && height > 0, "framebuffer dimensions must be positive");
        Self {
            pixels: vec![background; width * height],
            width,
            height,
            x_origin: 0,
            y_origin: 0,
            background,
        }
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Viewport offset applied by callers addressing a partial buffer.
    pub fn origin(&self) -> (i32, i32) {
        (self.x_origin, self.y_origin)
    }

    /// Move the viewport offset. The offset is addressing metadata for
    /// callers; it does not shift storage.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.x_origin = x;
        self.y_origin = y;
    }

    /// The configured background color.
    pub fn background(&self) -> Color3 {
        self.background
    }

    /// Reset every pixel to the background color.
    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    /// Fill the half-open horizontal run `[x1, x2)` at row `y`.
    ///
    /// The loop exits the moment a pixel would fall outside the buffer, so
    /// a run that starts in bounds and overruns the right edge draws only
    /// its in-bounds prefix, and a run whose first pixel is out of bounds
    /// draws nothing at all. Callers that need full clipping must clamp the
    /// run before calling.
    pub fn scanline(&mut self, x1: i32, x2: i32, y: i32, color: Color3) {
        for x in x1..x2 {
            if x < 0 || x as usize >= self.width || y < 0 || y as usize >= self.height {
                return;
            }
            self.pixels[self.width * y as usize + x as usize] = color;
        }
    }

    /// Bounds-checked read of a single pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color3> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.width * y + x])
        } else {
            None
        }
    }

    /// Export the buffer for presentation.
    ///
    /// Zero-copy: the returned block borrows the pixel storage directly,
    /// with source bytes always in R,G,B order. `order` tells the backend
    /// where each channel belongs in its destination pixels.
    pub fn export(&self, order: ChannelOrder) -> PixelBlock<'_> {
        PixelBlock {
            bytes: bytemuck::cast_slice(&self.pixels),
            width: self.width,
            height: self.height,
            pitch: 3 * self.width,
            pixel_size: 3,
            offsets: order.offsets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_every_pixel_to_background() {
        for (w, h) in [(1, 1), (3, 7), (16, 4)] {
            let mut fb = FrameBuffer::with_background(w, h, Color3::BLUE);
            fb.scanline(0, w as i32, 0, Color3::RED);
            fb.clear();
            for y in 0..h {
                for x in 0..w {
                    assert_eq!(fb.pixel(x, y), Some(Color3::BLUE));
                }
            }
        }
    }

    #[test]
    fn scanline_fills_half_open_run() {
        let mut fb = FrameBuffer::new(8, 4);
        fb.scanline(2, 6, 1, Color3::GREEN);
        for x in 0..8 {
            let expected = if (2..6).contains(&x) { Color3::GREEN } else { Color3::WHITE };
            assert_eq!(fb.pixel(x, 1), Some(expected));
        }
        // Other rows untouched.
        assert_eq!(fb.pixel(3, 0), Some(Color3::WHITE));
        assert_eq!(fb.pixel(3, 2), Some(Color3::WHITE));
    }

    #[test]
    fn scanline_overrunning_the_right_edge_draws_the_prefix_only() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.scanline(2, 10, 2, Color3::RED);
        assert_eq!(fb.pixel(2, 2), Some(Color3::RED));
        assert_eq!(fb.pixel(3, 2), Some(Color3::RED));
        assert_eq!(fb.pixel(0, 2), Some(Color3::WHITE));
        assert_eq!(fb.pixel(1, 2), Some(Color3::WHITE));
    }

    #[test]
    fn scanline_starting_out_of_bounds_draws_nothing() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.scanline(-2, 3, 1, Color3::RED);
        for x in 0..4 {
            assert_eq!(fb.pixel(x, 1), Some(Color3::WHITE));
        }
        fb.scanline(0, 4, 7, Color3::RED);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(fb.pixel(x, y), Some(Color3::WHITE));
            }
        }
    }

    #[test]
    fn end_to_end_red_run_on_a_cleared_buffer() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear();
        fb.scanline(1, 3, 2, Color3::RED);
        for y in 0..4 {
            for x in 0..4 {
                let expected = if y == 2 && (x == 1 || x == 2) {
                    Color3::RED
                } else {
                    fb.background()
                };
                assert_eq!(fb.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn export_layout_is_row_major_three_bytes_per_pixel() {
        let mut fb = FrameBuffer::with_background(3, 2, Color3::BLACK);
        fb.scanline(1, 2, 0, Color3::RED);
        let block = fb.export(ChannelOrder::Rgb);
        assert_eq!(block.width, 3);
        assert_eq!(block.height, 2);
        assert_eq!(block.pixel_size, 3);
        assert_eq!(block.pitch, 9);
        assert_eq!(block.bytes.len(), 18);
        assert_eq!(block.offsets, [0, 1, 2]);
        // Pixel (1, 0) sits at byte offset pitch*0 + 3*1.
        assert_eq!(&block.bytes[3..6], &[0xFF, 0, 0]);
    }

    #[test]
    fn export_carries_the_configured_channel_order() {
        let fb = FrameBuffer::new(2, 2);
        assert_eq!(fb.export(ChannelOrder::Bgr).offsets, [2, 1, 0]);
    }

    #[test]
    fn origin_is_metadata_only() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set_origin(2, 3);
        assert_eq!(fb.origin(), (2, 3));
        assert_eq!(fb.pixel(0, 0), Some(Color3::WHITE));
    }
}
