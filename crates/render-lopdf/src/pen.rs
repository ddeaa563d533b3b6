//! Pen and cursor bookkeeping for one glyph run.
//!
//! Two positions are tracked side by side. The pen is the baseline the next
//! glyph is measured from: the previous glyph's position plus its advance
//! adjustment. The adjusted position is where the previous glyph was actually
//! placed: the pen plus that glyph's placement adjustment. Placement never
//! leaks into the pen, and advance never leaks into placement.

use glyphpaint_types::{Adjustment, Glyph, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PreviousGlyph {
    position: Point,
    has_transform: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenState {
    pub pen: Point,
    pub last_adjusted: Point,
    /// Natural advance of the previous visible glyph at its font size, in
    /// millipoints.
    pub last_advance_width: f64,
    previous: Option<PreviousGlyph>,
}

impl PenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_first_glyph(&self) -> bool {
        self.previous.is_none()
    }

    /// Whether `glyph` needs an absolute text matrix instead of continuing
    /// the current batch: at the start of the run, on a baseline change, and
    /// around any glyph with its own transform.
    pub fn needs_reanchor(&self, glyph: &Glyph) -> bool {
        match self.previous {
            None => true,
            Some(prev) => {
                prev.position.y != glyph.position.y || prev.has_transform || glyph.has_transform()
            }
        }
    }

    /// The `TJ` spacing correction, in thousandths of text space, that moves
    /// a glyph continuing the current batch from where the previous glyph's
    /// natural advance left it to `position`. `None` when no correction is
    /// needed.
    pub fn spacing_correction(&self, position: Point, font_size: f64) -> Option<f64> {
        let prev = self.previous?;
        let xdiff = position.x - prev.position.x;
        let effective = 1000.0 * xdiff - self.last_advance_width;
        if effective == 0.0 {
            None
        } else {
            Some(-effective / font_size)
        }
    }

    /// Where a glyph with `adjustment` is placed: the pen moved by the
    /// placement part of the adjustment.
    pub fn adjusted_position(&self, adjustment: &Adjustment) -> Point {
        Point::new(
            self.pen.x + adjustment.place_x,
            self.pen.y + adjustment.place_y,
        )
    }

    /// Relative move from the previous glyph's placement to this one's, in
    /// text space units.
    pub fn relative_move(&self, adjustment: &Adjustment) -> (f64, f64) {
        let adjusted = self.adjusted_position(adjustment);
        (
            (adjusted.x - self.last_adjusted.x) / 1000.0,
            (adjusted.y - self.last_adjusted.y) / 1000.0,
        )
    }

    /// Records `glyph` as placed. `advance_width` is its natural advance at
    /// font size, in millipoints.
    pub fn advance(&mut self, glyph: &Glyph, adjustment: &Adjustment, advance_width: f64) {
        self.last_adjusted = self.adjusted_position(adjustment);
        self.pen = Point::new(
            glyph.position.x + adjustment.advance_x,
            glyph.position.y + adjustment.advance_y,
        );
        self.last_advance_width = advance_width;
        self.previous = Some(PreviousGlyph {
            position: glyph.position,
            has_transform: glyph.has_transform(),
        });
    }
}
