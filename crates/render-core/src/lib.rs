//! Core painting abstractions for glyph-run text encoding.
//!
//! This crate provides the types shared by text painting backends:
//! - `GraphicsContext` and `TextPainter` traits
//! - Paint, stroke, clip and rendering-mode types applied when a text object opens
//! - `GlyphVector`, the glyph run handed over by the layout engine
//! - Error types for painting operations

mod error;
mod glyphs;
mod traits;
mod types;

pub use error::RenderError;
pub use glyphs::{GlyphVector, ResolvedGlyph};
pub use traits::{GraphicsContext, TextPainter};
pub use types::{
    ClipPath, LineCap, LineJoin, Paint, PaintHandle, PathSegment, StrokeStyle, TextPaintInfo,
    TextRenderingMode,
};
