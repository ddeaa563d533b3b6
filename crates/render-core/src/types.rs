use glyphpaint_types::Color;
use serde::{Deserialize, Serialize};

/// A named paint resource (pattern or shading) registered with the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintHandle {
    pub name: String,
}

impl PaintHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// How a text fill or outline is painted.
///
/// A flat color is written with the dedicated color operators and carries its
/// own alpha; a general paint can only be selected as a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Paint {
    Flat(Color),
    General(PaintHandle),
}

impl Paint {
    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Paint::Flat(color) => Some(color),
            Paint::General(_) => None,
        }
    }

    /// Alpha to record for this paint; general paints count as opaque.
    pub fn alpha(&self) -> u8 {
        self.as_color()
            .map(Color::alpha_byte)
            .unwrap_or(Color::OPAQUE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn code(self) -> i64 {
        match self {
            LineCap::Butt => 0,
            LineCap::Round => 1,
            LineCap::Square => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn code(self) -> i64 {
        match self {
            LineJoin::Miter => 0,
            LineJoin::Round => 1,
            LineJoin::Bevel => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    pub dash: Vec<f64>,
    pub dash_phase: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 10.0,
            dash: Vec::new(),
            dash_phase: 0.0,
        }
    }
}

impl StrokeStyle {
    pub fn with_width(width: f64) -> Self {
        Self { width, ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    CurveTo { x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Close,
}

/// A clipping region, intersected with the current clip when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipPath {
    pub segments: Vec<PathSegment>,
    #[serde(default)]
    pub even_odd: bool,
}

impl ClipPath {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            segments: vec![PathSegment::Rect { x, y, width, height }],
            even_odd: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Text rendering modes as numbered by the `Tr` operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRenderingMode {
    Fill,
    Stroke,
    FillStroke,
    Invisible,
    FillClip,
    StrokeClip,
    FillStrokeClip,
    Clip,
}

impl TextRenderingMode {
    /// Picks the mode for the given paint combination. Text with neither fill
    /// nor stroke is invisible (or clip-only when `add_to_clip`).
    pub fn from_paint(fill: bool, stroke: bool, add_to_clip: bool) -> Self {
        use TextRenderingMode::*;
        match (fill, stroke, add_to_clip) {
            (true, false, false) => Fill,
            (false, true, false) => Stroke,
            (true, true, false) => FillStroke,
            (false, false, false) => Invisible,
            (true, false, true) => FillClip,
            (false, true, true) => StrokeClip,
            (true, true, true) => FillStrokeClip,
            (false, false, true) => Clip,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            TextRenderingMode::Fill => 0,
            TextRenderingMode::Stroke => 1,
            TextRenderingMode::FillStroke => 2,
            TextRenderingMode::Invisible => 3,
            TextRenderingMode::FillClip => 4,
            TextRenderingMode::StrokeClip => 5,
            TextRenderingMode::FillStrokeClip => 6,
            TextRenderingMode::Clip => 7,
        }
    }
}

/// Paint attributes of a text run, resolved by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextPaintInfo {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub stroke_style: Option<StrokeStyle>,
}

impl TextPaintInfo {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(Paint::Flat(color)),
            ..Default::default()
        }
    }

    pub fn with_stroke(mut self, paint: Paint, style: StrokeStyle) -> Self {
        self.stroke = Some(paint);
        self.stroke_style = Some(style);
        self
    }

    pub fn has_fill(&self) -> bool {
        self.fill.is_some()
    }

    /// A stroke is only painted when both its paint and its style are known.
    pub fn has_stroke(&self) -> bool {
        self.stroke.is_some() && self.stroke_style.is_some()
    }

    pub fn rendering_mode(&self) -> TextRenderingMode {
        TextRenderingMode::from_paint(self.has_fill(), self.has_stroke(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_mode_table() {
        assert_eq!(TextRenderingMode::from_paint(true, false, false).code(), 0);
        assert_eq!(TextRenderingMode::from_paint(false, true, false).code(), 1);
        assert_eq!(TextRenderingMode::from_paint(true, true, false).code(), 2);
        assert_eq!(TextRenderingMode::from_paint(false, false, false).code(), 3);
        assert_eq!(TextRenderingMode::from_paint(true, true, true).code(), 6);
        assert_eq!(TextRenderingMode::from_paint(false, false, true).code(), 7);
    }

    #[test]
    fn stroke_needs_paint_and_style() {
        let info = TextPaintInfo {
            fill: None,
            stroke: Some(Paint::Flat(Color::gray(0))),
            stroke_style: None,
        };
        assert!(!info.has_stroke());
        assert_eq!(info.rendering_mode(), TextRenderingMode::Invisible);

        let info = info.with_stroke(Paint::Flat(Color::gray(0)), StrokeStyle::default());
        assert_eq!(info.rendering_mode(), TextRenderingMode::Stroke);
    }

    #[test]
    fn general_paint_is_opaque() {
        assert_eq!(Paint::General(PaintHandle::new("P1")).alpha(), 255);
        assert_eq!(Paint::Flat(Color::rgba(0, 0, 0, 0.5)).alpha(), 128);
    }

    #[test]
    fn paint_info_from_json() {
        let info: TextPaintInfo = serde_json::from_str(
            r##"{"fill": {"flat": "#336699"}, "stroke": {"general": {"name": "P2"}}, "strokeStyle": {"width": 0.5}}"##,
        )
        .unwrap();
        assert_eq!(info.fill, Some(Paint::Flat(Color::rgb(0x33, 0x66, 0x99))));
        assert_eq!(info.stroke_style.as_ref().map(|s| s.width), Some(0.5));
        assert_eq!(info.rendering_mode(), TextRenderingMode::FillStroke);
    }
}
