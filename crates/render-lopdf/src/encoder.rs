//! The per-glyph step of the text encoder.

use crate::batch::TjBatch;
use crate::config::EncoderConfig;
use crate::encoding::{font_resource_name, EncodingState, MappedCode};
use crate::graphics::{matrix_operands, name, real, PdfGraphics};
use crate::pen::PenState;
use glyphpaint_render_core::{RenderError, ResolvedGlyph};
use glyphpaint_types::{Affine2D, Glyph};
use lopdf::content::Operation;
use std::io::Write;

/// All running state of one glyph run: where the pen is, which font and code
/// page are selected, the pending `TJ` batch and the last text matrix.
#[derive(Debug)]
pub struct GlyphEncoder {
    config: EncoderConfig,
    pen: PenState,
    encoding: EncodingState,
    batch: TjBatch,
    text_matrix: Option<Affine2D>,
}

impl GlyphEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            pen: PenState::new(),
            encoding: EncodingState::new(),
            batch: TjBatch::new(),
            text_matrix: None,
        }
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    pub fn encoding(&self) -> &EncodingState {
        &self.encoding
    }

    /// The last absolute text matrix written, if any.
    pub fn text_matrix(&self) -> Option<&Affine2D> {
        self.text_matrix.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        !self.batch.is_empty()
    }

    /// The text matrix placing `glyph` at its device position.
    pub fn glyph_matrix(&self, glyph: &Glyph) -> Affine2D {
        let mut m = Affine2D::translate(glyph.position.x, glyph.position.y);
        if let Some(local) = &glyph.transform {
            m = m.concat(local);
        }
        if self.config.flip_glyph_y {
            m = m.concat(&Affine2D::scale(1.0, -1.0));
        }
        m
    }

    /// Encodes one visible glyph.
    ///
    /// The glyph either continues the pending batch, preceded by a spacing
    /// correction when its position is not where the previous advance left
    /// the pen, or it flushes the batch and re-anchors with `Tm` (plus `Tf`
    /// when the font or code page changed, and `Td` for its placement).
    pub fn encode<W: Write>(
        &mut self,
        gfx: &mut PdfGraphics<W>,
        resolved: ResolvedGlyph<'_>,
    ) -> Result<(), RenderError> {
        let ResolvedGlyph { index, glyph, font, adjustment } = resolved;
        log::trace!(
            "glyph {} code {:#06x} at ({}, {}), transform {:?}",
            index,
            glyph.code,
            glyph.position.x,
            glyph.position.y,
            glyph.transform
        );

        let reposition = self.pen.needs_reanchor(glyph);
        let selection = self.encoding.select(font, glyph.code);

        if reposition || selection.requires_font_selection() {
            self.batch.flush(gfx)?;
            if selection.requires_font_selection() {
                let resource = font_resource_name(font, selection.code);
                gfx.write_op(Operation::new("Tf", vec![name(&resource), real(font.size())]))?;
                gfx.record_font(&resource);
                self.encoding.set_font(font);
            }
            let matrix = self.glyph_matrix(glyph);
            gfx.write_op(Operation::new("Tm", matrix_operands(&matrix)))?;
            self.text_matrix = Some(matrix);

            let (dx, dy) = self.pen.relative_move(&adjustment);
            if dx != 0.0 || dy != 0.0 {
                gfx.write_op(Operation::new("Td", vec![real(dx), real(dy)]))?;
            }
        } else if let Some(correction) = self.pen.spacing_correction(glyph.position, font.size()) {
            self.batch.push_adjustment(correction);
        }

        match selection.code {
            MappedCode::Byte { byte, .. } => self.batch.push_byte(byte),
            MappedCode::Wide(code) => self.batch.push_code(code),
        }

        self.pen.advance(glyph, &adjustment, font.scaled_width(glyph.code));
        Ok(())
    }

    /// Flushes the pending batch.
    pub fn flush<W: Write>(&mut self, gfx: &mut PdfGraphics<W>) -> Result<bool, RenderError> {
        self.batch.flush(gfx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphpaint_render_core::GlyphVector;
    use glyphpaint_traits::InMemoryFont;
    use glyphpaint_types::Adjustment;
    use lopdf::content::Content;

    fn encode_all(run: &GlyphVector) -> (GlyphEncoder, Vec<Operation>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut gfx = PdfGraphics::new(Vec::new());
        let mut encoder = GlyphEncoder::new(EncoderConfig::default());
        for glyph in run.visible() {
            encoder.encode(&mut gfx, glyph.unwrap()).unwrap();
        }
        encoder.flush(&mut gfx).unwrap();
        let ops = Content::decode(&gfx.into_inner()).unwrap().operations;
        (encoder, ops)
    }

    fn operators(ops: &[Operation]) -> Vec<&str> {
        ops.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn first_glyph_selects_font_and_matrix() {
        let font = InMemoryFont::new("F1", 10.0).with_default_width(500.0).into_ref();
        let run = GlyphVector::new(font).with_glyphs([Glyph::new(65, 20.0, 30.0)]);
        let (encoder, ops) = encode_all(&run);

        assert_eq!(operators(&ops), vec!["Tf", "Tm", "TJ"]);
        let tm: Vec<f32> = ops[1].operands.iter().map(|o| o.as_float().unwrap()).collect();
        assert_eq!(tm, vec![1.0, 0.0, 0.0, -1.0, 20.0, 30.0]);
        assert_eq!(encoder.pen().pen.x, 20.0);
        assert_eq!(encoder.text_matrix().map(|m| m.e), Some(20.0));
    }

    #[test]
    fn glyph_matrix_applies_local_transform_inside_translation() {
        let encoder = GlyphEncoder::new(EncoderConfig { flip_glyph_y: false, ..Default::default() });
        let glyph = Glyph::new(1, 5.0, 6.0).with_transform(Affine2D::scale(2.0, 2.0));
        let m = encoder.glyph_matrix(&glyph);
        assert_eq!(m.to_array(), [2.0, 0.0, 0.0, 2.0, 5.0, 6.0]);
    }

    #[test]
    fn placement_of_reanchored_glyph_becomes_td() {
        let font = InMemoryFont::new("F1", 10.0).with_default_width(500.0).into_ref();
        let run = GlyphVector::new(font)
            .with_glyphs([Glyph::new(65, 0.0, 0.0).with_adjustment(Adjustment::placement(250.0, -500.0))]);
        let (_, ops) = encode_all(&run);

        assert_eq!(operators(&ops), vec!["Tf", "Tm", "Td", "TJ"]);
        assert_eq!(ops[2].operands[0].as_float().unwrap(), 0.25);
        assert_eq!(ops[2].operands[1].as_float().unwrap(), -0.5);
    }
}
