use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Appended to the base name for the intermediate bitmap handed to the tracer.
pub const BITMAP_SUFFIX: &str = "_inverted.bmp";
/// Appended to the base name for the traced SVG.
pub const SVG_SUFFIX: &str = "_vect.svg";

/// The three files involved in one conversion. All share a directory and base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPaths {
    pub input: PathBuf,
    pub bitmap: PathBuf,
    pub svg: PathBuf,
}

impl DerivedPaths {
    pub fn from_input<P: AsRef<Path>>(input: P) -> Self {
        let input = input.as_ref();
        Self {
            input: input.to_path_buf(),
            bitmap: bitmap_path_for(input),
            svg: svg_path_for(input),
        }
    }
}

pub fn bitmap_path_for(input: &Path) -> PathBuf {
    with_suffix(input, BITMAP_SUFFIX)
}

pub fn svg_path_for(input: &Path) -> PathBuf {
    with_suffix(input, SVG_SUFFIX)
}

// Only the last extension is dropped: `a.tar.png` -> `a.tar<suffix>`.
fn with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    input.with_file_name(name)
}
