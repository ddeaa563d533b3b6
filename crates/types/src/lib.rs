pub mod color;
pub mod geometry;
pub mod glyph;

pub use color::Color;
pub use geometry::{Affine2D, Point};
pub use glyph::{Adjustment, Glyph};
