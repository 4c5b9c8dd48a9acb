pub mod config;
pub mod converter;
pub mod data;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod selector;
pub mod tracer;

pub use converter::Converter;
pub use data::*;
pub use error::ConvertError;
pub use pipeline::{apply_threshold, invert, ConversionReport, DEFAULT_THRESHOLD};
pub use selector::{DialogSelector, FileSelector, FixedSelector};
pub use tracer::{PotraceTracer, Tracer};

pub type Result<T> = anyhow::Result<T>;

/// What a run of the program did.
#[derive(Debug)]
pub enum RunOutcome {
    /// No file was chosen; nothing was touched.
    Cancelled,
    Converted(ConversionReport),
}

/// Ask `selector` for a file and convert it. A cancelled selection is not an error.
pub fn select_and_convert(
    selector: &dyn FileSelector,
    converter: &Converter,
    threshold: u8,
) -> std::result::Result<RunOutcome, ConvertError> {
    match selector.select() {
        Some(path) => converter.convert(path, threshold).map(RunOutcome::Converted),
        None => Ok(RunOutcome::Cancelled),
    }
}
