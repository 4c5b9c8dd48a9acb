use crate::error::ConvertError;
use image::{GrayImage, ImageFormat};
use std::path::{Path, PathBuf};

/// Owns the intermediate bitmap on disk; the file is removed when this drops.
///
/// The guard is armed before anything is written so that a failed or partial
/// write is cleaned up too.
#[derive(Debug)]
pub struct TempBitmap {
    path: PathBuf,
}

impl TempBitmap {
    /// Claim `path` for the duration of a conversion.
    pub fn claim<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Serialize `image` as an uncompressed BMP, replacing any existing file.
    pub fn write(&self, image: &GrayImage) -> Result<(), ConvertError> {
        image
            .save_with_format(&self.path, ImageFormat::Bmp)
            .map_err(|source| ConvertError::BitmapWrite {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), "Temporary bitmap written");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempBitmap {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Temporary bitmap removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove temporary bitmap"
            ),
        }
    }
}
