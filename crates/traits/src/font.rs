//! FontMetrics trait for abstracting font metric lookup.
//!
//! The text encoders never parse font files. Everything they need to know
//! about a font (its resource name, size, glyph advances and whether codes
//! are one or two bytes wide) comes through this trait.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Error type for font lookup operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("Font index {index} out of range (table has {len} fonts)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid size {size} for font '{name}'")]
    InvalidSize { name: String, size: f64 },
}

/// Metrics of one concrete font at one size.
///
/// Implementations are identified by reference: two `FontRef`s denote the
/// same font only if they point at the same allocation.
///
/// # Units
///
/// - `size` is in points.
/// - `width` is in glyph space, 1000 units per em.
pub trait FontMetrics: Send + Sync + Debug {
    /// The resource name the font is registered under in the page resources
    /// (e.g. `F1`).
    fn resource_name(&self) -> &str;

    /// Font size in points.
    fn size(&self) -> f64;

    /// Advance width of `code` in 1000-units-per-em.
    fn width(&self, code: u16) -> f64;

    /// `true` when glyph codes are written as two bytes (CID fonts).
    fn is_multi_byte(&self) -> bool;

    /// Advance of `code` scaled to the font size, in millipoints.
    fn scaled_width(&self, code: u16) -> f64 {
        self.width(code) * self.size()
    }
}

/// Shared handle to a font.
pub type FontRef = Arc<dyn FontMetrics>;

/// A font whose metrics are held in a width table.
///
/// Codes missing from `widths` use `default_width`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InMemoryFont {
    pub name: String,
    pub size: f64,
    #[serde(default)]
    pub multi_byte: bool,
    #[serde(default)]
    pub default_width: f64,
    #[serde(default)]
    pub widths: HashMap<u16, f64>,
}

impl InMemoryFont {
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
            multi_byte: false,
            default_width: 0.0,
            widths: HashMap::new(),
        }
    }

    pub fn multi_byte(mut self) -> Self {
        self.multi_byte = true;
        self
    }

    pub fn with_default_width(mut self, width: f64) -> Self {
        self.default_width = width;
        self
    }

    pub fn with_width(mut self, code: u16, width: f64) -> Self {
        self.widths.insert(code, width);
        self
    }

    /// Checks the font can be used for encoding.
    pub fn validate(&self) -> Result<(), FontError> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(FontError::InvalidSize {
                name: self.name.clone(),
                size: self.size,
            });
        }
        Ok(())
    }

    pub fn into_ref(self) -> FontRef {
        Arc::new(self)
    }
}

impl FontMetrics for InMemoryFont {
    fn resource_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> f64 {
        self.size
    }

    fn width(&self, code: u16) -> f64 {
        self.widths.get(&code).copied().unwrap_or(self.default_width)
    }

    fn is_multi_byte(&self) -> bool {
        self.multi_byte
    }
}

/// An ordered table of fonts, addressed by position or by resource name.
///
/// Glyph runs refer to their fonts by index into such a table.
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    fonts: Vec<FontRef>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a font and returns its index.
    pub fn add(&mut self, font: FontRef) -> usize {
        log::debug!(
            "Registering font '{}' at {}pt (multi-byte: {})",
            font.resource_name(),
            font.size(),
            font.is_multi_byte()
        );
        self.fonts.push(font);
        self.fonts.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&FontRef, FontError> {
        self.fonts.get(index).ok_or(FontError::IndexOutOfRange {
            index,
            len: self.fonts.len(),
        })
    }

    pub fn by_name(&self, name: &str) -> Result<&FontRef, FontError> {
        self.fonts
            .iter()
            .find(|f| f.resource_name() == name)
            .ok_or_else(|| FontError::NotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontRef> {
        self.fonts.iter()
    }
}

impl FromIterator<FontRef> for FontTable {
    fn from_iter<I: IntoIterator<Item = FontRef>>(iter: I) -> Self {
        let mut table = FontTable::new();
        for font in iter {
            table.add(font);
        }
        table
    }
}
