//! Rasterizer trait for converting canvas to terminal cells

use super::canvas::Canvas;
use super::color::Color;

/// A single terminal cell with foreground and background colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledCell {
    /// Character to display
    pub ch: char,
    /// Foreground color
    pub fg: ratatui::style::Color,
    /// Background color
    pub bg: ratatui::style::Color,
}

impl Default for StyledCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: ratatui::style::Color::White,
            bg: ratatui::style::Color::Black,
        }
    }
}

/// A line of styled text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub cells: Vec<StyledCell>,
}

/// Trait for rasterizers that convert canvas to terminal output
pub trait Rasterizer: Send + Sync {
    /// Convert canvas to `rows` lines of `cols` cells. Transparent pixels
    /// show `backdrop`.
    fn rasterize(&self, canvas: &Canvas, cols: u16, rows: u16, backdrop: Color) -> Vec<StyledLine>;

    /// Canvas pixels covered by one cell (horizontal, vertical)
    fn resolution_multiplier(&self) -> (u32, u32);
}
