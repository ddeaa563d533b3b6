//! An operator-level PDF content stream sink.
//!
//! `PdfGraphics` writes every operation to its writer as soon as it is
//! issued; nothing is buffered here. It also records the page resources the
//! written operators refer to, so the caller can build the page's resource
//! dictionary afterwards.

use glyphpaint_render_core::{ClipPath, GraphicsContext, Paint, PathSegment, RenderError, StrokeStyle};
use glyphpaint_types::{Affine2D, Color};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

pub(crate) fn real(value: f64) -> Object {
    Object::from(value as f32)
}

pub(crate) fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

pub(crate) fn matrix_operands(m: &Affine2D) -> Vec<Object> {
    m.to_array().iter().map(|v| real(*v)).collect()
}

/// A graphics context that turns drawing calls into PDF content stream bytes.
pub struct PdfGraphics<W: Write = Vec<u8>> {
    writer: W,
    ext_g_states: BTreeMap<(u8, u8), String>,
    fonts_used: BTreeSet<String>,
    state_depth: usize,
    operations_written: usize,
}

impl<W: Write> PdfGraphics<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            ext_g_states: BTreeMap::new(),
            fonts_used: BTreeSet::new(),
            state_depth: 0,
            operations_written: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Number of operators written so far.
    pub fn operations_written(&self) -> usize {
        self.operations_written
    }

    /// Current `q` nesting depth.
    pub fn state_depth(&self) -> usize {
        self.state_depth
    }

    /// Encodes one operation and writes it out immediately.
    pub fn write_op(&mut self, op: Operation) -> Result<(), RenderError> {
        log::trace!("{} {:?}", op.operator, op.operands);
        let mut bytes = Content { operations: vec![op] }.encode()?;
        // Encoded operations carry no trailing delimiter.
        bytes.push(b'\n');
        self.writer.write_all(&bytes)?;
        self.operations_written += 1;
        Ok(())
    }

    pub fn save_graphics_state(&mut self) -> Result<(), RenderError> {
        self.write_op(Operation::new("q", vec![]))?;
        self.state_depth += 1;
        Ok(())
    }

    pub fn restore_graphics_state(&mut self) -> Result<(), RenderError> {
        if self.state_depth == 0 {
            return Err(RenderError::Other(
                "graphics state restored more often than saved".into(),
            ));
        }
        self.write_op(Operation::new("Q", vec![]))?;
        self.state_depth -= 1;
        Ok(())
    }

    pub fn concat_matrix(&mut self, transform: &Affine2D) -> Result<(), RenderError> {
        self.write_op(Operation::new("cm", matrix_operands(transform)))
    }

    /// Intersects the current clip with `clip`.
    pub fn write_clip(&mut self, clip: &ClipPath) -> Result<(), RenderError> {
        if clip.is_empty() {
            return Ok(());
        }
        for segment in &clip.segments {
            let op = match *segment {
                PathSegment::MoveTo { x, y } => Operation::new("m", vec![real(x), real(y)]),
                PathSegment::LineTo { x, y } => Operation::new("l", vec![real(x), real(y)]),
                PathSegment::CurveTo { x1, y1, x2, y2, x3, y3 } => Operation::new(
                    "c",
                    vec![real(x1), real(y1), real(x2), real(y2), real(x3), real(y3)],
                ),
                PathSegment::Rect { x, y, width, height } => {
                    Operation::new("re", vec![real(x), real(y), real(width), real(height)])
                }
                PathSegment::Close => Operation::new("h", vec![]),
            };
            self.write_op(op)?;
        }
        let rule = if clip.even_odd { "W*" } else { "W" };
        self.write_op(Operation::new(rule, vec![]))?;
        self.write_op(Operation::new("n", vec![]))
    }

    /// Sets the fill (`rg`) or stroke (`RG`) color.
    pub fn apply_color(&mut self, color: &Color, fill: bool) -> Result<(), RenderError> {
        let operands = color.components().iter().map(|c| Object::from(*c)).collect();
        self.write_op(Operation::new(if fill { "rg" } else { "RG" }, operands))
    }

    /// Selects a paint. Flat colors are handled by `apply_color` and need
    /// nothing more here; general paints are selected as patterns.
    pub fn apply_paint(&mut self, paint: &Paint, fill: bool) -> Result<(), RenderError> {
        match paint {
            Paint::Flat(_) => Ok(()),
            Paint::General(handle) => {
                let (space_op, paint_op) = if fill { ("cs", "scn") } else { ("CS", "SCN") };
                self.write_op(Operation::new(space_op, vec![name("Pattern")]))?;
                self.write_op(Operation::new(paint_op, vec![name(&handle.name)]))
            }
        }
    }

    pub fn apply_stroke(&mut self, stroke: &StrokeStyle) -> Result<(), RenderError> {
        self.write_op(Operation::new("w", vec![real(stroke.width)]))?;
        self.write_op(Operation::new("J", vec![Object::Integer(stroke.cap.code())]))?;
        self.write_op(Operation::new("j", vec![Object::Integer(stroke.join.code())]))?;
        self.write_op(Operation::new("M", vec![real(stroke.miter_limit)]))?;
        let dash = stroke.dash.iter().map(|d| real(*d)).collect::<Vec<_>>();
        self.write_op(Operation::new("d", vec![Object::Array(dash), real(stroke.dash_phase)]))
    }

    /// Applies fill and stroke alpha through an ExtGState. Nothing is written
    /// when both are fully opaque.
    pub fn apply_alpha(&mut self, fill_alpha: u8, stroke_alpha: u8) -> Result<(), RenderError> {
        if fill_alpha == Color::OPAQUE && stroke_alpha == Color::OPAQUE {
            return Ok(());
        }
        let next = self.ext_g_states.len() + 1;
        let gs_name = self
            .ext_g_states
            .entry((fill_alpha, stroke_alpha))
            .or_insert_with(|| format!("GS{}", next))
            .clone();
        self.write_op(Operation::new("gs", vec![name(&gs_name)]))
    }

    pub(crate) fn record_font(&mut self, resource_name: &str) {
        self.fonts_used.insert(resource_name.to_string());
    }

    /// Font resource names referenced by `Tf` operators, including code-page
    /// variants such as `F1_1`.
    pub fn fonts_used(&self) -> impl Iterator<Item = &str> {
        self.fonts_used.iter().map(String::as_str)
    }

    /// The `ExtGState` resource dictionary for the alpha states written so far.
    pub fn ext_g_state_resources(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        for ((fill, stroke), gs_name) in &self.ext_g_states {
            let state = dictionary! {
                "Type" => "ExtGState",
                "ca" => *fill as f32 / 255.0,
                "CA" => *stroke as f32 / 255.0,
            };
            dict.set(gs_name.as_bytes(), Object::Dictionary(state));
        }
        dict
    }
}

impl<W: Write + 'static> GraphicsContext for PdfGraphics<W> {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphpaint_render_core::PaintHandle;

    fn ops(gfx: PdfGraphics) -> Vec<Operation> {
        Content::decode(&gfx.into_inner()).unwrap().operations
    }

    #[test]
    fn alpha_state_is_registered_once() {
        let mut gfx = PdfGraphics::new(Vec::new());
        gfx.apply_alpha(128, 255).unwrap();
        gfx.apply_alpha(128, 255).unwrap();
        gfx.apply_alpha(255, 255).unwrap();

        let resources = gfx.ext_g_state_resources();
        assert_eq!(resources.len(), 1);
        assert!(resources.has(b"GS1"));

        let ops = ops(gfx);
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| op.operator == "gs"));
    }

    #[test]
    fn general_paint_selects_pattern() {
        let mut gfx = PdfGraphics::new(Vec::new());
        gfx.apply_paint(&Paint::General(PaintHandle::new("P1")), false).unwrap();
        gfx.apply_paint(&Paint::Flat(Color::gray(0)), true).unwrap();

        let ops = ops(gfx);
        let operators: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["CS", "SCN"]);
        assert_eq!(ops[1].operands[0].as_name().unwrap(), b"P1");
    }

    #[test]
    fn clip_ends_path_without_painting() {
        let mut gfx = PdfGraphics::new(Vec::new());
        gfx.write_clip(&ClipPath::rect(0.0, 0.0, 100.0, 50.0)).unwrap();
        let operators: Vec<String> = ops(gfx).into_iter().map(|op| op.operator).collect();
        assert_eq!(operators, vec!["re", "W", "n"]);
    }

    #[test]
    fn operators_are_newline_delimited() {
        let mut gfx = PdfGraphics::new(Vec::new());
        gfx.save_graphics_state().unwrap();
        gfx.apply_color(&Color::gray(0), true).unwrap();
        gfx.restore_graphics_state().unwrap();
        assert_eq!(gfx.into_inner(), b"q\n0 0 0 rg\nQ\n");
    }

    #[test]
    fn fonts_are_recorded_once() {
        let mut gfx = PdfGraphics::new(Vec::new());
        gfx.record_font("F1");
        gfx.record_font("F1_1");
        gfx.record_font("F1");
        assert_eq!(gfx.fonts_used().collect::<Vec<_>>(), vec!["F1", "F1_1"]);
    }

    #[test]
    fn unbalanced_restore_is_rejected() {
        let mut gfx = PdfGraphics::new(Vec::new());
        assert!(gfx.restore_graphics_state().is_err());
        gfx.save_graphics_state().unwrap();
        assert_eq!(gfx.state_depth(), 1);
        gfx.restore_graphics_state().unwrap();
        assert_eq!(gfx.state_depth(), 0);
    }
}
