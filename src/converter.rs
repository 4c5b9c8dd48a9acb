use crate::config::Config;
use crate::data::{load_grayscale, DerivedPaths, TempBitmap};
use crate::error::ConvertError;
use crate::logging::{clear_correlation_id, new_correlation_id, ConversionSpan};
use crate::pipeline::{ConversionReport, Pipeline, StageTime};
use crate::tracer::{PotraceTracer, Tracer};
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

/// Binarizes an image and hands it to a [`Tracer`], leaving `<base>_vect.svg`
/// next to the input.
pub struct Converter {
    tracer: Box<dyn Tracer>,
    default_threshold: u8,
}

impl Converter {
    pub fn new(tracer: Box<dyn Tracer>, default_threshold: u8) -> Self {
        Self {
            tracer,
            default_threshold,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(PotraceTracer::from_config(&config.tracer)),
            config.conversion.threshold,
        )
    }

    /// Convert with the configured threshold.
    pub fn convert_default<P: AsRef<Path>>(&self, path: P) -> Result<ConversionReport, ConvertError> {
        self.convert(path, self.default_threshold)
    }

    /// Decode, threshold, invert, write the bitmap, trace it, and remove the bitmap.
    ///
    /// Nothing is written when decoding fails. Once the bitmap path is claimed it
    /// is removed on every return route.
    pub fn convert<P: AsRef<Path>>(&self, path: P, threshold: u8) -> Result<ConversionReport, ConvertError> {
        let paths = DerivedPaths::from_input(path);
        let run_id = new_correlation_id();
        let started_at = Utc::now();

        let conversion_span = ConversionSpan::new(&paths.input, threshold, run_id);
        let _span_guard = conversion_span.enter();

        let result = self.run(&paths, threshold, &conversion_span);
        let total_ms = conversion_span.record_result(result.is_ok());
        clear_correlation_id();

        match result {
            Ok((width, height, foreground_pixels, stage_timings)) => {
                info!(
                    svg = %paths.svg.display(),
                    total_ms,
                    "Conversion completed"
                );
                Ok(ConversionReport {
                    run_id,
                    started_at,
                    input: paths.input,
                    svg: paths.svg,
                    width,
                    height,
                    threshold,
                    foreground_pixels,
                    stage_timings,
                    total_ms,
                    tracer: self.tracer.name().to_string(),
                })
            }
            Err(e) => {
                error!(error = %e, total_ms, "Conversion failed");
                Err(e)
            }
        }
    }

    fn run(
        &self,
        paths: &DerivedPaths,
        threshold: u8,
        span: &ConversionSpan,
    ) -> Result<(u32, u32, u64, Vec<StageTime>), ConvertError> {
        let mut image = load_grayscale(&paths.input)?;
        let (width, height) = image.dimensions();
        span.record_image(width, height);

        let mut stage_timings = Pipeline::binarize(threshold).execute(&mut image);
        let foreground_pixels = image.pixels().filter(|p| p[0] == 255).count() as u64;

        let bitmap = TempBitmap::claim(&paths.bitmap);

        let start = Instant::now();
        bitmap.write(&image)?;
        drop(image);
        stage_timings.push(timing("WriteBitmap", start));

        let start = Instant::now();
        self.tracer.trace(bitmap.path(), &paths.svg)?;
        stage_timings.push(timing("Trace", start));

        Ok((width, height, foreground_pixels, stage_timings))
    }
}

fn timing(stage_name: &str, start: Instant) -> StageTime {
    StageTime {
        stage_name: stage_name.to_string(),
        duration_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}
