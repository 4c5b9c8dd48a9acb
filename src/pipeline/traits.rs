use image::GrayImage;

/// One in-place operation on the grayscale buffer
pub trait PipelineStage: Send + Sync {
    /// Execute this stage on the buffer
    fn execute(&self, image: &mut GrayImage);

    /// Get the name of this stage for logging/debugging
    fn stage_name(&self) -> &str;
}
