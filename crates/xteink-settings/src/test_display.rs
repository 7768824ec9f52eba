//! Test display that allows pixel overdraw.
//!
//! `MockDisplay` from embedded-graphics panics when a pixel is drawn twice,
//! which doesn't work for screens that clear backgrounds then draw on top.
//! This simple framebuffer display allows overdraw and counts flushes.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::surface::FrameSurface;

/// Simple framebuffer display for tests that allows overdraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDisplay {
    pixels: Vec<BinaryColor>,
    width: u32,
    height: u32,
    flush_count: usize,
}

impl TestDisplay {
    /// Create a new test display with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
            flush_count: 0,
        }
    }

    /// Create a display matching the Xteink X4 dimensions (480x800).
    pub fn default_size() -> Self {
        Self::new(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major pixel data
    pub fn pixels(&self) -> &[BinaryColor] {
        &self.pixels
    }

    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn black_pixel_count(&self) -> usize {
        self.pixels
            .iter()
            .filter(|pixel| **pixel == BinaryColor::On)
            .count()
    }

    /// Number of `display_buffer` calls so far
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }
}

impl DrawTarget for TestDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as u32) < self.width
                && (coord.y as u32) < self.height
            {
                let idx = (coord.y as u32 * self.width + coord.x as u32) as usize;
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl FrameSurface for TestDisplay {
    fn clear_screen(&mut self) {
        self.pixels.fill(BinaryColor::Off);
    }

    fn display_buffer(&mut self) {
        self.flush_count += 1;
    }
}
