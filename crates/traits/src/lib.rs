pub mod font;

pub use font::{FontError, FontMetrics, FontRef, FontTable, InMemoryFont};
