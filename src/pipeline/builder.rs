use crate::logging::{get_correlation_id, new_correlation_id, StageSpan};
use crate::pipeline::{InvertStage, PipelineStage, StageTime, ThresholdStage};
use image::GrayImage;
use std::time::Instant;
use tracing::{debug, info};

/// Builder for creating image processing pipelines
pub struct PipelineBuilder {
    stages: Vec<Box<dyn PipelineStage>>,
    name: String,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            stages: Vec::new(),
            name: name.into(),
        }
    }

    /// Add a stage to the pipeline
    pub fn add_stage<S>(mut self, stage: S) -> Self
    where
        S: PipelineStage + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages,
            name: self.name,
        }
    }
}

/// Executable pipeline
pub struct Pipeline {
    stages: Vec<Box<dyn PipelineStage>>,
    name: String,
}

impl Pipeline {
    /// Threshold followed by inversion, the preparation potrace expects.
    pub fn binarize(threshold: u8) -> Self {
        PipelineBuilder::new("binarize")
            .add_stage(ThresholdStage::new(threshold))
            .add_stage(InvertStage)
            .build()
    }

    /// Run every stage in order on `image`, returning per-stage timings
    pub fn execute(&self, image: &mut GrayImage) -> Vec<StageTime> {
        let correlation_id = get_correlation_id().unwrap_or_else(new_correlation_id);

        info!(
            pipeline = %self.name,
            total_stages = self.stages.len(),
            correlation_id = %correlation_id,
            "Starting pipeline execution"
        );

        let mut timings = Vec::with_capacity(self.stages.len());

        for (idx, stage) in self.stages.iter().enumerate() {
            let stage_name = stage.stage_name().to_string();
            let stage_span = StageSpan::new(&stage_name, Some(correlation_id));
            let _span_guard = stage_span.enter();

            debug!(
                stage = %stage_name,
                stage_index = idx,
                width = image.width(),
                height = image.height(),
                "Executing pipeline stage"
            );

            let start = Instant::now();
            stage.execute(image);
            let duration = start.elapsed().as_secs_f64() * 1000.0;

            stage_span.record_completion(duration);
            timings.push(StageTime {
                stage_name,
                duration_ms: duration,
            });
        }

        info!(
            pipeline = %self.name,
            total_duration_ms = timings.iter().map(|t| t.duration_ms).sum::<f64>(),
            stages_executed = timings.len(),
            "Pipeline execution completed"
        );

        timings
    }

    /// Get pipeline name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get number of stages
    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }
}
