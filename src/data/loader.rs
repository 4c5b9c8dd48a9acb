use crate::error::ConvertError;
use image::{GrayImage, ImageError, ImageReader};
use std::path::Path;

/// Decode the file at `path` as a single-channel 8-bit grayscale image.
///
/// The format is sniffed from the file content, the extension is only a fallback.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<GrayImage, ConvertError> {
    let path = path.as_ref();
    let img = decode(path).map_err(|source| ConvertError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = img.to_luma8();
    validate_image_size(&gray, path)?;
    Ok(gray)
}

fn decode(path: &Path) -> Result<image::DynamicImage, ImageError> {
    ImageReader::open(path)
        .map_err(ImageError::IoError)?
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()
}

pub fn validate_image_size(img: &GrayImage, path: &Path) -> Result<(), ConvertError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ConvertError::EmptyImage {
            path: path.to_path_buf(),
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(())
}
