use crate::config::EncoderConfig;
use crate::graphics::PdfGraphics;
use crate::text_object::TextObject;
use glyphpaint_render_core::{
    ClipPath, GlyphVector, GraphicsContext, RenderError, TextPaintInfo, TextPainter,
};
use glyphpaint_types::Affine2D;
use std::io::Write;
use std::marker::PhantomData;

/// Paints glyph runs as native PDF text onto a `PdfGraphics<W>`.
///
/// Each run becomes `q [cm] [clip] <paint> BT Tr ... ET Q`. Glyph positions
/// and adjustments are kept exact: a glyph either continues the pending
/// `TJ` with a spacing correction, or re-anchors with its own text matrix.
#[derive(Debug, Clone)]
pub struct PdfTextPainter<W = Vec<u8>> {
    config: EncoderConfig,
    _writer: PhantomData<fn() -> W>,
}

impl<W> Default for PdfTextPainter<W> {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl<W> PdfTextPainter<W> {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            _writer: PhantomData,
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl<W: Write> PdfTextPainter<W> {
    /// Paints onto a known PDF content stream.
    ///
    /// On failure the remaining glyphs are abandoned. Bytes already written
    /// stay written; the text object and graphics state are still closed if
    /// the stream accepts it, and the first error is returned.
    pub fn paint_to(
        &self,
        gfx: &mut PdfGraphics<W>,
        glyphs: &GlyphVector,
        paint: &TextPaintInfo,
        transform: &Affine2D,
        clip: Option<&ClipPath>,
    ) -> Result<(), RenderError> {
        log::debug!(
            "Painting run of {} glyphs (adjustment table: {})",
            glyphs.len(),
            glyphs.has_adjustments()
        );
        gfx.save_graphics_state()?;
        match self.paint_text_object(gfx, glyphs, paint, transform, clip) {
            Ok(()) => gfx.restore_graphics_state(),
            Err(err) => {
                if let Err(restore_err) = gfx.restore_graphics_state() {
                    log::warn!("Could not restore graphics state after failure: {}", restore_err);
                }
                Err(err)
            }
        }
    }

    fn paint_text_object(
        &self,
        gfx: &mut PdfGraphics<W>,
        glyphs: &GlyphVector,
        paint: &TextPaintInfo,
        transform: &Affine2D,
        clip: Option<&ClipPath>,
    ) -> Result<(), RenderError> {
        if !transform.is_identity() {
            gfx.concat_matrix(transform)?;
        }
        if let Some(clip) = clip {
            gfx.write_clip(clip)?;
        }

        let mut text = TextObject::open(gfx, paint, self.config)?;
        let shown = glyphs.visible().try_for_each(|glyph| text.show(glyph?));
        match shown {
            Ok(()) => text.close(),
            Err(err) => {
                if let Err(close_err) = text.close() {
                    log::warn!("Could not close text object after failure: {}", close_err);
                }
                Err(err)
            }
        }
    }
}

impl<W: Write + 'static> TextPainter for PdfTextPainter<W> {
    fn is_supported(&self, target: &mut dyn GraphicsContext) -> bool {
        target.as_any_mut().is::<PdfGraphics<W>>()
    }

    fn paint_glyphs(
        &self,
        target: &mut dyn GraphicsContext,
        glyphs: &GlyphVector,
        paint: &TextPaintInfo,
        transform: &Affine2D,
        clip: Option<&ClipPath>,
    ) -> Result<(), RenderError> {
        let target_name = target.name();
        let gfx = target
            .as_any_mut()
            .downcast_mut::<PdfGraphics<W>>()
            .ok_or(RenderError::UnsupportedTarget(target_name))?;
        self.paint_to(gfx, glyphs, paint, transform, clip)
    }
}
