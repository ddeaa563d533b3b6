//! Accumulation of glyphs into a single `TJ` operator.

use crate::graphics::{real, PdfGraphics};
use glyphpaint_render_core::RenderError;
use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
enum TjItem {
    /// Consecutive glyph bytes, written as one string.
    Glyphs(Vec<u8>),
    /// Spacing correction in thousandths of text space; positive moves the
    /// next glyph left.
    Adjust(f64),
}

/// The pending show-text batch of an open text object.
///
/// All glyphs in a batch belong to one font selection, so a batch is either
/// entirely single-byte (literal strings) or entirely multi-byte (hex
/// strings of two-byte codes).
#[derive(Debug, Default)]
pub struct TjBatch {
    items: Vec<TjItem>,
    multi_byte: bool,
}

impl TjBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends one single-byte code.
    pub fn push_byte(&mut self, byte: u8) {
        debug_assert!(self.is_empty() || !self.multi_byte);
        self.multi_byte = false;
        self.push_bytes(&[byte]);
    }

    /// Appends one two-byte code, high byte first.
    pub fn push_code(&mut self, code: u16) {
        debug_assert!(self.is_empty() || self.multi_byte);
        self.multi_byte = true;
        self.push_bytes(&code.to_be_bytes());
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        match self.items.last_mut() {
            Some(TjItem::Glyphs(run)) => run.extend_from_slice(bytes),
            _ => self.items.push(TjItem::Glyphs(bytes.to_vec())),
        }
    }

    /// Appends a spacing correction before the next glyph. Zero is ignored.
    pub fn push_adjustment(&mut self, amount: f64) {
        if amount != 0.0 {
            self.items.push(TjItem::Adjust(amount));
        }
    }

    /// Writes the batch as one `TJ` and clears it. Returns whether anything
    /// was written; an empty batch writes nothing.
    pub fn flush<W: Write>(&mut self, gfx: &mut PdfGraphics<W>) -> Result<bool, RenderError> {
        if self.items.is_empty() {
            return Ok(false);
        }
        let format = if self.multi_byte {
            StringFormat::Hexadecimal
        } else {
            StringFormat::Literal
        };
        let array = self
            .items
            .drain(..)
            .map(|item| match item {
                TjItem::Glyphs(bytes) => Object::String(bytes, format),
                TjItem::Adjust(amount) => real(amount),
            })
            .collect();
        gfx.write_op(Operation::new("TJ", vec![Object::Array(array)]))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Content;

    fn decode_tj(bytes: &[u8]) -> Vec<Object> {
        let content = Content::decode(bytes).unwrap();
        assert_eq!(content.operations.len(), 1);
        assert_eq!(content.operations[0].operator, "TJ");
        content.operations[0].operands[0].as_array().unwrap().clone()
    }

    #[test]
    fn consecutive_bytes_share_one_string() {
        let mut batch = TjBatch::new();
        batch.push_byte(b'A');
        batch.push_byte(b'V');
        batch.push_adjustment(-120.0);
        batch.push_byte(b'e');

        let mut gfx = PdfGraphics::new(Vec::new());
        assert!(batch.flush(&mut gfx).unwrap());
        assert!(batch.is_empty());

        let items = decode_tj(&gfx.into_inner());
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_str().unwrap(), b"AV");
        assert_eq!(items[1].as_float().unwrap(), -120.0);
        assert_eq!(items[2].as_str().unwrap(), b"e");
    }

    #[test]
    fn multi_byte_codes_are_big_endian() {
        let mut batch = TjBatch::new();
        batch.push_code(0x0102);
        batch.push_code(0x00ff);

        let mut gfx = PdfGraphics::new(Vec::new());
        batch.flush(&mut gfx).unwrap();
        let bytes = gfx.into_inner();
        assert!(String::from_utf8_lossy(&bytes).contains('<'));
        let items = decode_tj(&bytes);
        assert_eq!(items[0].as_str().unwrap(), &[0x01u8, 0x02, 0x00, 0xff]);
    }

    #[test]
    fn empty_flush_writes_nothing() {
        let mut batch = TjBatch::new();
        batch.push_adjustment(0.0);
        assert!(batch.is_empty());

        let mut gfx = PdfGraphics::new(Vec::new());
        assert!(!batch.flush(&mut gfx).unwrap());
        assert!(!batch.flush(&mut gfx).unwrap());
        assert!(gfx.into_inner().is_empty());
    }
}
