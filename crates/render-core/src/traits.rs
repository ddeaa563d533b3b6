use crate::error::RenderError;
use crate::glyphs::GlyphVector;
use crate::types::{ClipPath, TextPaintInfo};
use glyphpaint_types::Affine2D;
use std::any::Any;

/// A drawing surface a painter may target.
///
/// Painters only support some concrete surfaces; they find out which one
/// they were handed through `as_any_mut`.
pub trait GraphicsContext {
    /// A short name used in errors and logs.
    fn name(&self) -> &'static str;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Paints glyph runs onto a graphics context.
pub trait TextPainter {
    /// Whether `target` can receive this painter's output. Callers must check
    /// this before painting; painting an unsupported target fails before
    /// anything is written.
    fn is_supported(&self, target: &mut dyn GraphicsContext) -> bool;

    /// Paints one glyph run as one text object, wrapped in a graphics state
    /// save/restore.
    fn paint_glyphs(
        &self,
        target: &mut dyn GraphicsContext,
        glyphs: &GlyphVector,
        paint: &TextPaintInfo,
        transform: &Affine2D,
        clip: Option<&ClipPath>,
    ) -> Result<(), RenderError>;
}
