#![allow(dead_code)]

pub mod content_assertions;

use glyphpaint::{
    Affine2D, Color, EncoderConfig, FontRef, GlyphVector, InMemoryFont, PdfGraphics,
    PdfTextPainter, TextPaintInfo,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A single-byte font where every glyph is `width` units wide.
pub fn font(name: &str, size: f64, width: f64) -> FontRef {
    InMemoryFont::new(name, size).with_default_width(width).into_ref()
}

pub fn cid_font(name: &str, size: f64, width: f64) -> FontRef {
    InMemoryFont::new(name, size)
        .with_default_width(width)
        .multi_byte()
        .into_ref()
}

/// Paints `run` in black with the default configuration and no transform.
pub fn paint_run(run: &GlyphVector) -> Result<Vec<u8>, glyphpaint::RenderError> {
    paint_run_with(run, EncoderConfig::default())
}

pub fn paint_run_with(
    run: &GlyphVector,
    config: EncoderConfig,
) -> Result<Vec<u8>, glyphpaint::RenderError> {
    let mut gfx = PdfGraphics::new(Vec::new());
    PdfTextPainter::new(config).paint_to(
        &mut gfx,
        run,
        &TextPaintInfo::filled(Color::gray(0)),
        &Affine2D::identity(),
        None,
    )?;
    Ok(gfx.into_inner())
}
