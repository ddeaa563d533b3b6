use glyphpaint_traits::{FontError, FontRef, FontTable};
use glyphpaint_types::{Adjustment, Glyph};

/// The glyphs of one text painting call, together with the fonts they use and
/// the optional position-adjustment table produced by the layout engine.
///
/// The adjustment table is indexed by glyph index. It is read leniently: a
/// missing table, an index past its end or an empty slot all mean "use the
/// glyph's own adjustment, or none".
#[derive(Debug, Clone)]
pub struct GlyphVector {
    fonts: FontTable,
    glyphs: Vec<Glyph>,
    adjustments: Option<Vec<Option<Adjustment>>>,
}

/// A visible glyph with its font and adjustment looked up.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedGlyph<'a> {
    pub index: usize,
    pub glyph: &'a Glyph,
    pub font: &'a FontRef,
    pub adjustment: Adjustment,
}

impl GlyphVector {
    /// Creates an empty run whose glyphs use `font` unless they say otherwise.
    pub fn new(font: FontRef) -> Self {
        let mut fonts = FontTable::new();
        fonts.add(font);
        Self {
            fonts,
            glyphs: Vec::new(),
            adjustments: None,
        }
    }

    pub fn from_parts(
        fonts: FontTable,
        glyphs: Vec<Glyph>,
        adjustments: Option<Vec<Option<Adjustment>>>,
    ) -> Self {
        Self { fonts, glyphs, adjustments }
    }

    /// Registers another font for this run and returns the index glyphs use
    /// to refer to it.
    pub fn add_font(&mut self, font: FontRef) -> usize {
        self.fonts.add(font)
    }

    pub fn push(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
    }

    pub fn with_glyphs(mut self, glyphs: impl IntoIterator<Item = Glyph>) -> Self {
        self.glyphs.extend(glyphs);
        self
    }

    pub fn with_adjustments(mut self, adjustments: Vec<Option<Adjustment>>) -> Self {
        self.adjustments = Some(adjustments);
        self
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn has_adjustments(&self) -> bool {
        self.adjustments.is_some()
    }

    /// Adjustment for the glyph at `index`, defaulting to zero.
    pub fn adjustment(&self, index: usize) -> Adjustment {
        self.adjustments
            .as_ref()
            .and_then(|table| table.get(index).copied().flatten())
            .or_else(|| self.glyphs.get(index).and_then(|g| g.adjustment))
            .unwrap_or(Adjustment::ZERO)
    }

    pub fn font(&self, index: usize) -> Result<&FontRef, FontError> {
        self.fonts.get(index)
    }

    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }

    /// Visible glyphs in run order. Invisible glyphs are dropped here, before
    /// their font or adjustment is even looked at.
    pub fn visible<'a>(&'a self) -> impl Iterator<Item = Result<ResolvedGlyph<'a>, FontError>> + 'a {
        self.glyphs
            .iter()
            .enumerate()
            .filter(|(_, glyph)| glyph.visible)
            .map(move |(index, glyph)| -> Result<ResolvedGlyph<'a>, FontError> {
                Ok(ResolvedGlyph {
                    index,
                    glyph,
                    font: self.font(glyph.font)?,
                    adjustment: self.adjustment(index),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphpaint_traits::{FontMetrics, InMemoryFont};

    fn run() -> GlyphVector {
        GlyphVector::new(InMemoryFont::new("F1", 10.0).into_ref()).with_glyphs([
            Glyph::new(1, 0.0, 0.0),
            Glyph::new(2, 5.0, 0.0).hidden(),
            Glyph::new(3, 10.0, 0.0).with_adjustment(Adjustment::placement(7.0, 0.0)),
        ])
    }

    #[test]
    fn short_adjustment_table_defaults_to_zero() {
        let v = run().with_adjustments(vec![Some(Adjustment::advance(4.0, 0.0))]);
        assert_eq!(v.adjustment(0), Adjustment::advance(4.0, 0.0));
        assert_eq!(v.adjustment(1), Adjustment::ZERO);
        // Past the end of the table the glyph's own adjustment applies.
        assert_eq!(v.adjustment(2), Adjustment::placement(7.0, 0.0));
        assert_eq!(v.adjustment(99), Adjustment::ZERO);
    }

    #[test]
    fn empty_slot_is_no_adjustment() {
        let v = run().with_adjustments(vec![None, None]);
        assert_eq!(v.adjustment(0), Adjustment::ZERO);
    }

    #[test]
    fn visible_skips_hidden_glyphs() {
        let v = run();
        let codes: Vec<u16> = v.visible().map(|g| g.unwrap().glyph.code).collect();
        assert_eq!(codes, vec![1, 3]);
    }

    #[test]
    fn added_fonts_are_addressed_by_index() {
        let mut v = run();
        let index = v.add_font(InMemoryFont::new("F2", 8.0).into_ref());
        assert_eq!(index, 1);
        assert_eq!(v.font(1).unwrap().resource_name(), "F2");
        assert_eq!(v.fonts().by_name("F1").unwrap().size(), 10.0);
    }

    #[test]
    fn unknown_font_index_is_an_error() {
        let v = run().with_glyphs([Glyph::new(4, 0.0, 0.0).with_font(3)]);
        let last = v.visible().last().unwrap();
        assert!(matches!(last, Err(FontError::IndexOutOfRange { index: 3, len: 1 })));
    }
}
