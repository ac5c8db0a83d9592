//! Canvas: an RGB pixel surface.
//!
//! Pixels are stored row-major in one contiguous `Vec`, like [`Buffer`]
//! stores terminal cells. All drawing is clipped to the canvas.
//!
//! [`Buffer`]: crate::buffer::Buffer

use crate::buffer::Rgb;

/// A `width`×`height` grid of pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Vec<Rgb>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            pixels: vec![background; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y), `None` when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Fill the whole canvas.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Fill a `width`×`height` rectangle with its top-left corner at (x, y).
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end {
            return;
        }
        for row in y..y_end {
            let start = (row as usize) * (self.width as usize);
            self.pixels[start + x as usize..start + x_end as usize].fill(color);
        }
    }

    /// Draw a one-pixel horizontal line across the full width at row `y`.
    #[inline]
    pub fn hline(&mut self, y: u32, color: Rgb) {
        self.fill_rect(0, y, self.width, 1, color);
    }

    /// Draw a one-pixel vertical line across the full height at column `x`.
    #[inline]
    pub fn vline(&mut self, x: u32, color: Rgb) {
        self.fill_rect(x, 0, 1, self.height, color);
    }

    /// Iterate over pixel rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::new(4, 3, Rgb::WHITE);
        canvas.fill_rect(2, 1, 10, 10, Rgb::BLACK);

        assert_eq!(canvas.pixel(1, 1), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(2, 1), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(3, 2), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(3, 0), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_lines() {
        let mut canvas = Canvas::new(5, 5, Rgb::WHITE);
        canvas.hline(2, Rgb::BLACK);
        canvas.vline(4, Rgb::BLACK);

        assert!((0..5).all(|x| canvas.pixel(x, 2) == Some(Rgb::BLACK)));
        assert!((0..5).all(|y| canvas.pixel(4, y) == Some(Rgb::BLACK)));
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn test_out_of_range_rect_is_noop() {
        let mut canvas = Canvas::new(3, 3, Rgb::WHITE);
        canvas.fill_rect(5, 0, 2, 2, Rgb::BLACK);
        assert!(canvas.rows().flatten().all(|&p| p == Rgb::WHITE));
    }
}
