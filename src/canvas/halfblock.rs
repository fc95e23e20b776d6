//! `HalfBlock` rasterizer - Universal fallback using ▀▄█ characters
//!
//! Each terminal cell represents 2 vertical "pixels":
//! - Top pixel = foreground color
//! - Bottom pixel = background color
//!
//! Characters used:
//! - ▀ (upper half block): top = fg, bottom = bg
//! - ▄ (lower half block): top = bg, bottom = fg
//! - █ (full block): both = fg
//! - ' ' (space): both = bg

use super::canvas::Canvas;
use super::color::Color;
use super::rasterizer::{Rasterizer, StyledCell, StyledLine};

/// Half-block rasterizer
///
/// Renders 2 vertical pixels per cell using ▀▄█ characters.
/// Universal support - works on any Unicode terminal.
#[derive(Debug, Default)]
pub struct HalfBlockRasterizer;

impl HalfBlockRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Cells needed to show `canvas` without scaling
    pub fn cell_size(canvas: &Canvas) -> (u16, u16) {
        (canvas.width as u16, canvas.height.div_ceil(2) as u16)
    }

    /// Convert canvas to half-block grid
    fn rasterize_to_cells(
        &self,
        canvas: &Canvas,
        cols: u16,
        rows: u16,
        backdrop: Color,
    ) -> Vec<Vec<StyledCell>> {
        let mut result = Vec::with_capacity(rows as usize);
        if canvas.width == 0 || canvas.height == 0 {
            return result;
        }

        // Scale factors
        let scale_x = f64::from(canvas.width) / f64::from(cols);
        let scale_y = f64::from(canvas.height) / (f64::from(rows) * 2.0); // 2 subpixels per row

        let sample = |x: u32, y: u32| -> Color {
            canvas
                .get_pixel(x.min(canvas.width - 1), y.min(canvas.height - 1))
                .unwrap_or(Color::TRANSPARENT)
                .blend_over(&backdrop)
        };

        for row in 0..rows {
            let mut line = Vec::with_capacity(cols as usize);

            for col in 0..cols {
                // Sample top and bottom pixels
                let x = (f64::from(col) * scale_x) as u32;
                let top_y = (f64::from(row) * 2.0 * scale_y) as u32;
                let bot_y = ((f64::from(row) * 2.0 + 1.0) * scale_y) as u32;

                let (ch, fg, bg) = self.select_halfblock(&sample(x, top_y), &sample(x, bot_y));
                line.push(StyledCell { ch, fg, bg });
            }

            result.push(line);
        }

        result
    }

    /// Select the best half-block character and colors for a top/bottom pair
    fn select_halfblock(
        &self,
        top: &Color,
        bot: &Color,
    ) -> (char, ratatui::style::Color, ratatui::style::Color) {
        // Pixel art: identical colors collapse to a plain background cell
        if top.distance(bot) < 0.01 {
            return (' ', top.to_ratatui(), top.to_ratatui());
        }

        if top.luminance() >= bot.luminance() {
            ('▀', top.to_ratatui(), bot.to_ratatui())
        } else {
            ('▄', bot.to_ratatui(), top.to_ratatui())
        }
    }
}

impl Rasterizer for HalfBlockRasterizer {
    fn rasterize(&self, canvas: &Canvas, cols: u16, rows: u16, backdrop: Color) -> Vec<StyledLine> {
        self.rasterize_to_cells(canvas, cols, rows, backdrop)
            .into_iter()
            .map(|cells| StyledLine { cells })
            .collect()
    }

    fn resolution_multiplier(&self) -> (u32, u32) {
        (1, 2) // 1x horizontal, 2x vertical
    }
}
