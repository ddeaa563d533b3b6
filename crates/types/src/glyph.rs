//! The per-glyph input model handed over by the layout engine.

use crate::geometry::{Affine2D, Point};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A per-glyph position adjustment, in thousandths of text space.
///
/// `place_*` moves only the glyph it belongs to; `advance_*` is carried
/// forward into the baseline the next glyph is positioned from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Adjustment {
    pub place_x: f64,
    pub place_y: f64,
    pub advance_x: f64,
    pub advance_y: f64,
}

impl From<[f64; 4]> for Adjustment {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Adjustment> for [f64; 4] {
    fn from(a: Adjustment) -> Self {
        [a.place_x, a.place_y, a.advance_x, a.advance_y]
    }
}

impl Adjustment {
    pub const ZERO: Adjustment = Adjustment {
        place_x: 0.0,
        place_y: 0.0,
        advance_x: 0.0,
        advance_y: 0.0,
    };

    pub fn new(place_x: f64, place_y: f64, advance_x: f64, advance_y: f64) -> Self {
        Self { place_x, place_y, advance_x, advance_y }
    }

    pub fn placement(place_x: f64, place_y: f64) -> Self {
        Self::new(place_x, place_y, 0.0, 0.0)
    }

    pub fn advance(advance_x: f64, advance_y: f64) -> Self {
        Self::new(0.0, 0.0, advance_x, advance_y)
    }
}

/// One positioned glyph of a glyph run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    /// Device-space origin of the glyph.
    pub position: Point,
    /// Local transform applied around the glyph origin, if any.
    #[serde(default)]
    pub transform: Option<Affine2D>,
    pub code: u16,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub adjustment: Option<Adjustment>,
    /// Index into the font table of the run this glyph belongs to.
    #[serde(default)]
    pub font: usize,
}

impl Glyph {
    pub fn new(code: u16, x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            transform: None,
            code,
            visible: true,
            adjustment: None,
            font: 0,
        }
    }

    pub fn with_transform(mut self, transform: Affine2D) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustment = Some(adjustment);
        self
    }

    pub fn with_font(mut self, font: usize) -> Self {
        self.font = font;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// The adjustment to apply, absent meaning all zero.
    pub fn adjustment_or_zero(&self) -> Adjustment {
        self.adjustment.unwrap_or(Adjustment::ZERO)
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some_and(|t| !t.is_identity())
    }
}
