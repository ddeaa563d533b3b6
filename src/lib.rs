//! glyphpaint: native PDF text for positioned glyph runs.
//!
//! The heavy lifting lives in the workspace crates; this crate ties them
//! together behind a JSON job format and a small CLI.

pub mod error;
pub mod job;

pub use error::PipelineError;
pub use job::{PaintJob, RenderedContent};

pub use glyphpaint_render_core::{
    ClipPath, GlyphVector, GraphicsContext, LineCap, LineJoin, Paint, PaintHandle, PathSegment,
    RenderError, ResolvedGlyph, StrokeStyle, TextPaintInfo, TextPainter, TextRenderingMode,
};
pub use glyphpaint_render_lopdf::{
    EncoderConfig, EncodingState, GlyphEncoder, PdfGraphics, PdfTextPainter, PenState, TextObject,
    TjBatch,
};
pub use glyphpaint_traits::{FontError, FontMetrics, FontRef, FontTable, InMemoryFont};
pub use glyphpaint_types::{Adjustment, Affine2D, Color, Glyph, Point};
