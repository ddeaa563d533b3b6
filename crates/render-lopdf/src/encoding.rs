//! Font and code-page selection.
//!
//! Single-byte fonts address at most 256 glyphs per encoding, so a 16-bit
//! glyph code is split into a code page (the high byte) and the byte written
//! to the content stream (the low byte). Every code page is its own font
//! resource; a page change therefore needs a new `Tf`, which in turn needs
//! the pending batch to be flushed first.

use glyphpaint_traits::FontRef;
use std::sync::Arc;

/// A glyph code mapped for the current font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedCode {
    /// One byte within `page` of a single-byte font.
    Byte { page: u8, byte: u8 },
    /// A two-byte code of a multi-byte font.
    Wide(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub code: MappedCode,
    /// The font differs from the one currently selected.
    pub font_changed: bool,
    /// A single-byte code lies in a different code page than the previous one.
    pub page_changed: bool,
}

impl Selection {
    pub fn requires_font_selection(&self) -> bool {
        self.font_changed || self.page_changed
    }
}

#[derive(Debug, Default)]
pub struct EncodingState {
    current_font: Option<FontRef>,
    current_code_page: Option<u8>,
}

impl EncodingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_font(&self) -> Option<&FontRef> {
        self.current_font.as_ref()
    }

    pub fn current_code_page(&self) -> Option<u8> {
        self.current_code_page
    }

    fn is_current_font(&self, font: &FontRef) -> bool {
        self.current_font
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, font))
    }

    /// Maps `code` for `font` and records the code page it falls in.
    pub fn select(&mut self, font: &FontRef, code: u16) -> Selection {
        let font_changed = !self.is_current_font(font);
        if font.is_multi_byte() {
            return Selection {
                code: MappedCode::Wide(code),
                font_changed,
                page_changed: false,
            };
        }

        let [page, byte] = code.to_be_bytes();
        let page_changed = self.current_code_page != Some(page);
        if page_changed {
            log::trace!("Code page of '{}' changes to {}", font.resource_name(), page);
            self.current_code_page = Some(page);
        }
        Selection {
            code: MappedCode::Byte { page, byte },
            font_changed,
            page_changed,
        }
    }

    /// Marks `font` as the selected font.
    pub fn set_font(&mut self, font: &FontRef) {
        self.current_font = Some(Arc::clone(font));
    }
}

/// The resource name to select `font` under. Code page 0 uses the font's own
/// name; other pages of single-byte fonts are separate resources suffixed
/// with the page number.
pub fn font_resource_name(font: &FontRef, code: MappedCode) -> String {
    match code {
        MappedCode::Byte { page, .. } if page != 0 => {
            format!("{}_{}", font.resource_name(), page)
        }
        _ => font.resource_name().to_string(),
    }
}
