use crate::config::EncoderConfig;
use crate::encoder::GlyphEncoder;
use crate::graphics::PdfGraphics;
use glyphpaint_render_core::{
    Paint, RenderError, ResolvedGlyph, TextPaintInfo, TextRenderingMode,
};
use glyphpaint_types::Color;
use lopdf::content::Operation;
use lopdf::Object;
use std::io::Write;

/// An open `BT ... ET` scope bound to a content stream.
///
/// The scope owns the encoder state of its glyph run; all of it is dropped
/// when the scope closes.
pub struct TextObject<'g, W: Write> {
    gfx: &'g mut PdfGraphics<W>,
    encoder: GlyphEncoder,
    mode: TextRenderingMode,
}

impl<'g, W: Write> TextObject<'g, W> {
    /// Applies the run's paint, then writes `BT` and the rendering mode.
    pub fn open(
        gfx: &'g mut PdfGraphics<W>,
        paint: &TextPaintInfo,
        config: EncoderConfig,
    ) -> Result<Self, RenderError> {
        apply_color_and_paint(gfx, paint)?;
        gfx.write_op(Operation::new("BT", vec![]))?;

        let mode = paint.rendering_mode();
        if mode == TextRenderingMode::Invisible {
            log::warn!("Text run has neither fill nor stroke; it is encoded invisible");
        }
        if !(config.skip_default_rendering_mode && mode == TextRenderingMode::Fill) {
            gfx.write_op(Operation::new("Tr", vec![Object::Integer(mode.code())]))?;
        }

        Ok(Self {
            gfx,
            encoder: GlyphEncoder::new(config),
            mode,
        })
    }

    pub fn rendering_mode(&self) -> TextRenderingMode {
        self.mode
    }

    pub fn encoder(&self) -> &GlyphEncoder {
        &self.encoder
    }

    pub fn show(&mut self, glyph: ResolvedGlyph<'_>) -> Result<(), RenderError> {
        self.encoder.encode(self.gfx, glyph)
    }

    /// Flushes whatever is still pending and writes `ET`.
    pub fn close(mut self) -> Result<(), RenderError> {
        self.encoder.flush(self.gfx)?;
        self.gfx.write_op(Operation::new("ET", vec![]))
    }
}

fn apply_color_and_paint<W: Write>(
    gfx: &mut PdfGraphics<W>,
    paint: &TextPaintInfo,
) -> Result<(), RenderError> {
    let mut fill_alpha = Color::OPAQUE;
    let mut stroke_alpha = Color::OPAQUE;

    if let Some(Paint::Flat(color)) = &paint.fill {
        gfx.apply_color(color, true)?;
        fill_alpha = color.alpha_byte();
    }
    if let Some(Paint::Flat(color)) = &paint.stroke {
        gfx.apply_color(color, false)?;
        stroke_alpha = color.alpha_byte();
    }

    if let Some(fill) = &paint.fill {
        gfx.apply_paint(fill, true)?;
    }
    if let Some(stroke) = &paint.stroke {
        gfx.apply_paint(stroke, false)?;
        if let Some(style) = &paint.stroke_style {
            gfx.apply_stroke(style)?;
        }
    }

    gfx.apply_alpha(fill_alpha, stroke_alpha)
}
