//! Structured spans for a conversion and its stages

use std::path::Path;
use std::time::Instant;
use tracing::{span, Level, Span};
use uuid::Uuid;

/// Span covering one whole image-to-SVG conversion
pub struct ConversionSpan {
    span: Span,
    start_time: Instant,
}

impl ConversionSpan {
    pub fn new(input: &Path, threshold: u8, correlation_id: Uuid) -> Self {
        let span = span!(
            Level::INFO,
            "conversion",
            input = %input.display(),
            threshold = threshold,
            correlation_id = %correlation_id,
            width = tracing::field::Empty,
            height = tracing::field::Empty,
            success = tracing::field::Empty,
            execution_time_ms = tracing::field::Empty
        );

        Self {
            span,
            start_time: Instant::now(),
        }
    }

    /// Record decoded image dimensions
    pub fn record_image(&self, width: u32, height: u32) {
        self.span.record("width", width);
        self.span.record("height", height);
        tracing::debug!(parent: &self.span, width, height, "Image decoded");
    }

    /// Record the outcome and return elapsed milliseconds
    pub fn record_result(&self, success: bool) -> f64 {
        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        self.span.record("success", success);
        self.span.record("execution_time_ms", elapsed_ms);
        elapsed_ms
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

/// Span for a single pipeline stage
pub struct StageSpan {
    span: Span,
}

impl StageSpan {
    pub fn new(stage_name: &str, correlation_id: Option<Uuid>) -> Self {
        let span = if let Some(corr_id) = correlation_id {
            span!(
                Level::DEBUG,
                "pipeline_stage",
                stage = stage_name,
                correlation_id = %corr_id,
                duration_ms = tracing::field::Empty
            )
        } else {
            span!(
                Level::DEBUG,
                "pipeline_stage",
                stage = stage_name,
                duration_ms = tracing::field::Empty
            )
        };

        Self { span }
    }

    pub fn record_completion(&self, duration_ms: f64) {
        self.span.record("duration_ms", duration_ms);
        tracing::debug!(parent: &self.span, duration_ms, "Pipeline stage completed");
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}
