use std::path::PathBuf;
use std::process::ExitStatus;

/// Failures of a single image-to-SVG conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The source file is missing, unreadable or not a decodable image.
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The decoded image has no pixels.
    #[error("image {path} is empty ({width}x{height})")]
    EmptyImage {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// The intermediate bitmap could not be written.
    #[error("failed to write bitmap {path}: {source}")]
    BitmapWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The tracing program is not installed or not on PATH.
    #[error("tracing tool '{program}' was not found (install it, e.g. `apt-get install potrace`)")]
    ToolMissing { program: String },

    /// The tracing program exists but could not be started.
    #[error("failed to start tracing tool '{program}': {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tracing program ran and reported failure.
    #[error("tracing tool '{program}' exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The tracing program reported success but left no SVG behind.
    #[error("tracing tool finished but produced no output at {path}")]
    MissingOutput { path: PathBuf },
}

impl ConvertError {
    /// True for every failure that happened at the external tool boundary.
    pub fn is_tool_error(&self) -> bool {
        matches!(
            self,
            Self::ToolMissing { .. }
                | Self::ToolSpawn { .. }
                | Self::ToolFailed { .. }
                | Self::MissingOutput { .. }
        )
    }
}
