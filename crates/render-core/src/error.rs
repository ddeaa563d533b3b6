use glyphpaint_traits::FontError;
use thiserror::Error;

/// Errors raised while painting a glyph run.
///
/// Writer failures surface as `Io`; operator encoding failures as `Pdf`.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF encoding error: {0}")]
    Pdf(String),
    #[error("Font error: {0}")]
    Font(#[from] FontError),
    #[error("Graphics context '{0}' cannot receive PDF text operators")]
    UnsupportedTarget(&'static str),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
