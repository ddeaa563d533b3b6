// src/error.rs
use glyphpaint_render_core::RenderError;
use glyphpaint_traits::FontError;
use thiserror::Error;

/// Errors of a complete paint job, from reading its description to writing
/// the content stream.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Job description is invalid: {0}")]
    InvalidJob(String),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
