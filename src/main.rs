use glyphpaint::{PaintJob, PipelineError};
use std::env;
use std::fs;
use std::io::{self, Write};

/// Encodes a JSON paint job into a PDF content stream.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Encodes a positioned glyph run as native PDF text operators.");
        eprintln!();
        eprintln!("Usage: {} <path/to/job.json> [path/to/output]", args[0]);
        eprintln!();
        eprintln!("Without an output path the content stream is written to stdout.");
        eprintln!("Set RUST_LOG=trace to follow the per-glyph decisions.");
        std::process::exit(1);
    }

    let job_path = &args[1];
    log::info!("Loading job from {}", job_path);
    let job = PaintJob::from_file(job_path)?;

    let rendered = job.render()?;
    log::info!(
        "Encoded {} glyphs into {} bytes (fonts: {:?}, alpha states: {})",
        job.glyphs.len(),
        rendered.content.len(),
        rendered.fonts_used,
        rendered.ext_g_states.len()
    );

    match args.get(2) {
        Some(output_path) => {
            fs::write(output_path, &rendered.content)?;
            eprintln!("Wrote content stream to {}", output_path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&rendered.content)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
