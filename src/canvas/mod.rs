//! # Canvas - pixel framebuffer for the pet sprite
//!
//! The sprite is painted into an RGBA [`Canvas`] and turned into terminal
//! cells by a [`Rasterizer`]. Only the half-block rasterizer ships: it puts
//! two vertical pixels in each cell, which keeps pixel art square on most
//! terminal fonts.
//!
//! ```text
//!   Canvas (w x h px) ──► HalfBlockRasterizer ──► w x h/2 StyledCells
//!                              ▀ top = fg, bottom = bg
//! ```

mod canvas;
mod color;
mod halfblock;
mod rasterizer;

pub use canvas::Canvas;
pub use color::Color;
pub use halfblock::HalfBlockRasterizer;
pub use rasterizer::{Rasterizer, StyledCell, StyledLine};
