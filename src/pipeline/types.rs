use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTime {
    pub stage_name: String,
    pub duration_ms: f64,
}

/// Summary of one completed conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Correlation id shared with the log lines of this run
    pub run_id: Uuid,

    pub started_at: DateTime<Utc>,

    pub input: PathBuf,

    /// The traced SVG left next to the input
    pub svg: PathBuf,

    pub width: u32,
    pub height: u32,
    pub threshold: u8,

    /// Pixels handed to the tracer as foreground (white after inversion)
    pub foreground_pixels: u64,

    /// Timing for each in-memory stage, then bitmap write and trace
    pub stage_timings: Vec<StageTime>,

    pub total_ms: f64,

    /// Name of the tracer that produced the SVG
    pub tracer: String,
}

impl ConversionReport {
    pub fn foreground_ratio(&self) -> f64 {
        let total = u64::from(self.width) * u64::from(self.height);
        if total == 0 {
            0.0
        } else {
            self.foreground_pixels as f64 / total as f64
        }
    }
}
