use crate::pipeline::PipelineStage;
use image::GrayImage;

/// Default cutoff intensity.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Collapse every sample to 0 or 255: `v < threshold` becomes 0, everything else 255.
pub fn apply_threshold(image: &mut GrayImage, threshold: u8) {
    for pixel in image.pixels_mut() {
        pixel[0] = if pixel[0] < threshold { 0 } else { 255 };
    }
}

/// Replace every sample `v` with `255 - v`.
pub fn invert(image: &mut GrayImage) {
    for pixel in image.pixels_mut() {
        pixel[0] = 255 - pixel[0];
    }
}

/// Stage that binarizes against a fixed cutoff
pub struct ThresholdStage {
    threshold: u8,
}

impl Default for ThresholdStage {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ThresholdStage {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl PipelineStage for ThresholdStage {
    fn execute(&self, image: &mut GrayImage) {
        apply_threshold(image, self.threshold);
    }

    fn stage_name(&self) -> &str {
        "Threshold"
    }
}

/// Stage that swaps light and dark.
///
/// The tracer treats light pixels as the object, the usual source image is a
/// dark subject on a light background.
pub struct InvertStage;

impl PipelineStage for InvertStage {
    fn execute(&self, image: &mut GrayImage) {
        invert(image);
    }

    fn stage_name(&self) -> &str {
        "Invert"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient() -> GrayImage {
        GrayImage::from_fn(16, 16, |x, y| Luma([(y * 16 + x) as u8]))
    }

    #[test]
    fn test_threshold_is_two_valued_and_inclusive() {
        let original = gradient();
        for t in [0u8, 1, 64, 127, 128, 200, 254, 255] {
            let mut img = original.clone();
            apply_threshold(&mut img, t);
            for (before, after) in original.pixels().zip(img.pixels()) {
                assert!(after[0] == 0 || after[0] == 255);
                assert_eq!(after[0] == 255, before[0] >= t, "t={} v={}", t, before[0]);
            }
        }
    }

    #[test]
    fn test_threshold_zero_sets_everything_white() {
        let mut img = gradient();
        apply_threshold(&mut img, 0);
        assert!(img.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_threshold_max_keeps_only_full_white() {
        let mut img = gradient();
        apply_threshold(&mut img, 255);
        let white: Vec<_> = img.pixels().filter(|p| p[0] == 255).collect();
        assert_eq!(white.len(), 1);
        assert_eq!(img.get_pixel(15, 15)[0], 255);
        assert_eq!(img.get_pixel(14, 15)[0], 0);
    }

    #[test]
    fn test_invert_is_involution() {
        let mut img = gradient();
        apply_threshold(&mut img, 100);
        let binary = img.clone();
        invert(&mut img);
        assert_ne!(img, binary);
        invert(&mut img);
        assert_eq!(img, binary);
    }

    #[test]
    fn test_invert_complements_intermediate_values() {
        let mut img = GrayImage::from_raw(3, 1, vec![0, 100, 255]).unwrap();
        invert(&mut img);
        assert_eq!(img.into_raw(), vec![255, 155, 0]);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(ThresholdStage::default().stage_name(), "Threshold");
        assert_eq!(ThresholdStage::default().threshold(), 128);
        assert_eq!(InvertStage.stage_name(), "Invert");
    }
}
