//! Discrete RGBA framebuffer

use super::color::Color;

/// Pixel canvas, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::TRANSPARENT)
    }

    /// Create canvas filled with `bg`
    pub fn with_background(width: u32, height: u32, bg: Color) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            pixels: vec![bg; size],
        }
    }

    /// Get pixel at coordinates
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Set pixel at coordinates; out of bounds is ignored
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    /// Apply `f` to every pixel
    pub fn map_pixels(&mut self, f: impl Fn(Color) -> Color) {
        for pixel in &mut self.pixels {
            *pixel = f(*pixel);
        }
    }

    /// Apply `f(row, color)` to every pixel of each row
    pub fn map_rows(&mut self, f: impl Fn(u32, Color) -> Color) {
        let width = self.width as usize;
        for (row, chunk) in self.pixels.chunks_mut(width.max(1)).enumerate() {
            for pixel in chunk {
                *pixel = f(row as u32, *pixel);
            }
        }
    }

    /// Get raw pixel data
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas() {
        let canvas = Canvas::new(14, 16);
        assert_eq!(canvas.width, 14);
        assert_eq!(canvas.height, 16);
        assert_eq!(canvas.pixels().len(), 224);
        assert!(canvas.pixels().iter().all(Color::is_transparent));
    }

    #[test]
    fn test_set_get_pixel() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_pixel(5, 5, Color::WHITE);
        assert_eq!(canvas.get_pixel(5, 5), Some(Color::WHITE));
        canvas.set_pixel(50, 5, Color::WHITE);
        assert_eq!(canvas.get_pixel(50, 5), None);
    }

    #[test]
    fn test_map_rows() {
        let mut canvas = Canvas::with_background(2, 2, Color::BLACK);
        canvas.map_rows(|row, c| if row == 1 { Color::WHITE } else { c });
        assert_eq!(canvas.get_pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.get_pixel(1, 1), Some(Color::WHITE));
    }
}
