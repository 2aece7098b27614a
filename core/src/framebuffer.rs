use std::io;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH, MAX_SPRITE_ROWS};

/// Something that can show a frame, one pixel at a time.
pub trait Display {
    /// Draws the pixel at column `x` and row `y` as lit or unlit.
    fn set_pixel(&mut self, x: usize, y: usize, lit: bool) -> io::Result<()>;

    /// Makes everything drawn since the last flush visible.
    fn flush(&mut self) -> io::Result<()>;
}

/// # FrameBuffer
/// The 64x32 monochrome screen, stored row-major as one byte (0 or 1) per pixel.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: [u8; DISPLAY_SIZE],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [0; DISPLAY_SIZE],
        }
    }

    /// Read-only view of every pixel, row by row.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether the pixel at column `x` and row `y` is lit.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[(x + y * DISPLAY_WIDTH) % DISPLAY_SIZE] == 1
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels = [0; DISPLAY_SIZE];
    }

    /// XORs `sprite` onto the screen with its top-left corner at `x`, `y`.
    ///
    /// Each byte is one row, most significant bit leftmost. The column wraps on its own
    /// but the row does not: the flattened index wraps, so rows falling off the bottom
    /// reappear at the top. Only the first 15 rows are drawn.
    ///
    /// Returns whether any lit pixel was turned off.
    pub fn write_sprite(&mut self, sprite: &[u8], x: u8, y: u8) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().take(MAX_SPRITE_ROWS).enumerate() {
            for col in 0..8 {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                let index = ((x as usize + col) % DISPLAY_WIDTH + (y as usize + row) * DISPLAY_WIDTH)
                    % DISPLAY_SIZE;
                collision |= self.pixels[index] == 1;
                self.pixels[index] ^= 1;
            }
        }
        collision
    }

    /// Draws every pixel to `display`, then flushes it once.
    pub fn render(&self, display: &mut dyn Display) -> io::Result<()> {
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                display.set_pixel(x, y, self.pixels[x + y * DISPLAY_WIDTH] == 1)?;
            }
        }
        display.flush()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
