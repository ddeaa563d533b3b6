//! JSON description of a single text painting call.
//!
//! A job names the fonts a run uses (with their metrics), the paint, the
//! initial transform and clip, and the glyphs themselves. It is what the
//! `glyphpaint` binary reads, and a convenient way to replay runs captured
//! from a layout engine.

use crate::error::PipelineError;
use glyphpaint_render_core::{ClipPath, GlyphVector, TextPaintInfo};
use glyphpaint_render_lopdf::{EncoderConfig, PdfGraphics, PdfTextPainter};
use glyphpaint_traits::{FontRef, FontTable, InMemoryFont};
use glyphpaint_types::{Adjustment, Affine2D, Glyph};
use lopdf::Dictionary;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintJob {
    pub fonts: Vec<InMemoryFont>,
    #[serde(default)]
    pub paint: TextPaintInfo,
    #[serde(default)]
    pub transform: Affine2D,
    #[serde(default)]
    pub clip: Option<ClipPath>,
    pub glyphs: Vec<Glyph>,
    /// Position adjustments by glyph index, as produced by the layout engine.
    #[serde(default)]
    pub adjustments: Option<Vec<Option<Adjustment>>>,
    #[serde(default)]
    pub config: EncoderConfig,
}

/// The encoded content stream of a job, along with the resources it refers to.
#[derive(Debug)]
pub struct RenderedContent {
    pub content: Vec<u8>,
    pub fonts_used: Vec<String>,
    pub ext_g_states: Dictionary,
}

impl PaintJob {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builds the glyph run, checking the fonts are usable.
    pub fn glyph_vector(&self) -> Result<GlyphVector, PipelineError> {
        if self.fonts.is_empty() {
            return Err(PipelineError::InvalidJob("at least one font is required".into()));
        }
        let fonts = self
            .fonts
            .iter()
            .map(|font| -> Result<FontRef, PipelineError> {
                font.validate()?;
                Ok(font.clone().into_ref())
            })
            .collect::<Result<FontTable, PipelineError>>()?;
        Ok(GlyphVector::from_parts(
            fonts,
            self.glyphs.clone(),
            self.adjustments.clone(),
        ))
    }

    /// Encodes the job onto `gfx`.
    pub fn paint_onto<W: Write>(&self, gfx: &mut PdfGraphics<W>) -> Result<(), PipelineError> {
        let glyphs = self.glyph_vector()?;
        let painter = PdfTextPainter::<W>::new(self.config);
        painter.paint_to(gfx, &glyphs, &self.paint, &self.transform, self.clip.as_ref())?;
        Ok(())
    }

    /// Encodes the job into an in-memory content stream.
    pub fn render(&self) -> Result<RenderedContent, PipelineError> {
        let mut gfx = PdfGraphics::new(Vec::new());
        self.paint_onto(&mut gfx)?;
        let fonts_used = gfx.fonts_used().map(str::to_string).collect();
        let ext_g_states = gfx.ext_g_state_resources();
        Ok(RenderedContent {
            content: gfx.into_inner(),
            fonts_used,
            ext_g_states,
        })
    }
}
