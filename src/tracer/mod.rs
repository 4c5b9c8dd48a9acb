pub mod potrace;

pub use potrace::*;

use crate::error::ConvertError;
use std::path::{Path, PathBuf};

/// Turns a binary bitmap on disk into an SVG outline.
pub trait Tracer {
    /// Returns the name of the tracer
    fn name(&self) -> &str;

    /// Trace `bitmap` into `svg`, returning the path of the written SVG.
    fn trace(&self, bitmap: &Path, svg: &Path) -> Result<PathBuf, ConvertError>;
}
