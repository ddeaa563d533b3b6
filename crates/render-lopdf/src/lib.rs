//! Native PDF text encoding of positioned glyph runs using lopdf.
//!
//! This crate turns the glyphs produced by a vector text layout (each with
//! its own position, optional transform and kerning adjustments) into the
//! shortest operator sequence that still reproduces that exact placement.

mod batch;
mod config;
mod encoder;
mod encoding;
mod graphics;
mod painter;
mod pen;
mod text_object;

pub use batch::TjBatch;
pub use config::EncoderConfig;
pub use encoder::GlyphEncoder;
pub use encoding::{font_resource_name, EncodingState, MappedCode, Selection};
pub use graphics::PdfGraphics;
pub use painter::PdfTextPainter;
pub use pen::PenState;
pub use text_object::TextObject;
