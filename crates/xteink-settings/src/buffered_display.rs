//! Packed 1bpp frame buffer in the panel's native orientation.
//!
//! Screens draw in portrait (480x800); pixels are transposed into the
//! SSD1677's native 800x480 landscape layout so the firmware can push the
//! buffer to the panel in one transfer after each flush.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::surface::FrameSurface;

/// Frame buffer display
pub struct BufferedDisplay {
    buffer: Vec<u8>,
    generation: u32,
}

impl BufferedDisplay {
    const NATIVE_WIDTH_BYTES: usize = 100; // 800 / 8

    /// Portrait dimensions (what the UI sees)
    const PORTRAIT_WIDTH: u32 = crate::DISPLAY_WIDTH;
    const PORTRAIT_HEIGHT: u32 = crate::DISPLAY_HEIGHT;

    /// Total buffer size (48KB)
    const BUFFER_SIZE: usize = Self::NATIVE_WIDTH_BYTES * Self::PORTRAIT_WIDTH as usize;

    pub fn new() -> Self {
        Self {
            buffer: vec![0xFF; Self::BUFFER_SIZE], // White by default
            generation: 0,
        }
    }

    /// Set a pixel in portrait coordinates (x: 0-479, y: 0-799)
    pub fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        if x >= Self::PORTRAIT_WIDTH || y >= Self::PORTRAIT_HEIGHT {
            return;
        }

        // 90-degree rotation into native coordinates
        let native_x = y;
        let native_y = (Self::PORTRAIT_WIDTH - 1) - x;

        let byte_index = (native_y as usize * Self::NATIVE_WIDTH_BYTES) + (native_x as usize / 8);
        let bit_index = 7 - (native_x % 8); // MSB first

        if let Some(byte) = self.buffer.get_mut(byte_index) {
            if color == BinaryColor::On {
                // Black: clear bit
                *byte &= !(1 << bit_index);
            } else {
                *byte |= 1 << bit_index;
            }
        }
    }

    /// Raw buffer in native 800x480 orientation
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Incremented on every flush; the panel driver pushes when it changes.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl DrawTarget for BufferedDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            self.set_pixel(point.x as u32, point.y as u32, color);
        }
        Ok(())
    }
}

impl OriginDimensions for BufferedDisplay {
    fn size(&self) -> Size {
        Size::new(Self::PORTRAIT_WIDTH, Self::PORTRAIT_HEIGHT)
    }
}

impl FrameSurface for BufferedDisplay {
    fn clear_screen(&mut self) {
        self.buffer.fill(0xFF);
    }

    fn display_buffer(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        log::trace!("[DISPLAY] frame {} ready", self.generation);
    }
}

impl Default for BufferedDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size() {
        let display = BufferedDisplay::new();
        assert_eq!(display.buffer.len(), 48000); // 800 * 480 / 8
    }

    #[test]
    fn test_set_pixel_portrait() {
        let mut display = BufferedDisplay::new();
        // Portrait (0, 0) lands at native_x = 0, native_y = 479
        display.set_pixel(0, 0, BinaryColor::On);
        assert_eq!(display.buffer[47900], 0x7F);
    }

    #[test]
    fn negative_coordinates_are_clipped() {
        let mut display = BufferedDisplay::new();
        display
            .draw_iter([Pixel(Point::new(-1, 3), BinaryColor::On)])
            .unwrap();
        assert!(display.buffer().iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn clear_and_flush() {
        let mut display = BufferedDisplay::new();
        display.set_pixel(10, 10, BinaryColor::On);
        display.clear_screen();
        assert!(display.buffer().iter().all(|b| *b == 0xFF));

        display.display_buffer();
        display.display_buffer();
        assert_eq!(display.generation(), 2);
    }
}
