use bitmap_trace::{
    select_and_convert, ConvertError, Converter, FixedSelector, RunOutcome, Tracer,
    DEFAULT_THRESHOLD,
};
use bitmap_trace::logging::get_correlation_id;
use image::{GrayImage, Luma};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stands in for potrace: records what it saw and writes a placeholder SVG.
#[derive(Default)]
struct FakeTracer {
    seen_bitmap: RefCell<Option<GrayImage>>,
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    fail: bool,
}

impl FakeTracer {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Tracer for &FakeTracer {
    fn name(&self) -> &str {
        "fake"
    }

    fn trace(&self, bitmap: &Path, svg: &Path) -> Result<PathBuf, ConvertError> {
        self.calls
            .borrow_mut()
            .push((bitmap.to_path_buf(), svg.to_path_buf()));
        *self.seen_bitmap.borrow_mut() = Some(image::open(bitmap).unwrap().to_luma8());

        if self.fail {
            return Err(ConvertError::MissingOutput {
                path: svg.to_path_buf(),
            });
        }
        std::fs::write(svg, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
        Ok(svg.to_path_buf())
    }
}

fn leak(tracer: FakeTracer) -> &'static FakeTracer {
    Box::leak(Box::new(tracer))
}

fn white_square_on_black() -> GrayImage {
    GrayImage::from_fn(30, 30, |x, y| {
        if (10..20).contains(&x) && (10..20).contains(&y) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn write_png(dir: &Path, name: &str, image: &GrayImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_successful_conversion_leaves_only_svg() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_png(temp_dir.path(), "square.png", &white_square_on_black());
    let tracer = leak(FakeTracer::default());
    let converter = Converter::new(Box::new(tracer), DEFAULT_THRESHOLD);

    let report = converter.convert(&input, 128).unwrap();

    assert_eq!(report.svg, temp_dir.path().join("square_vect.svg"));
    assert_eq!((report.width, report.height), (30, 30));
    assert_eq!(report.threshold, 128);
    assert_eq!(report.tracer, "fake");
    assert!(report.svg.exists());
    assert!(!temp_dir.path().join("square_inverted.bmp").exists());
    assert_eq!(dir_entries(temp_dir.path()), ["square.png", "square_vect.svg"]);

    let calls = tracer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, temp_dir.path().join("square_inverted.bmp"));
    assert_eq!(calls[0].1, temp_dir.path().join("square_vect.svg"));
}

#[test]
fn test_tracer_receives_black_square_on_white() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_png(temp_dir.path(), "square.png", &white_square_on_black());
    let tracer = leak(FakeTracer::default());
    let converter = Converter::new(Box::new(tracer), DEFAULT_THRESHOLD);

    let report = converter.convert_default(&input).unwrap();

    let bitmap = tracer.seen_bitmap.borrow().clone().unwrap();
    let expected = GrayImage::from_fn(30, 30, |x, y| {
        if (10..20).contains(&x) && (10..20).contains(&y) {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    assert_eq!(bitmap, expected);
    assert_eq!(report.foreground_pixels, 30 * 30 - 10 * 10);
    let names: Vec<_> = report.stage_timings.iter().map(|t| t.stage_name.as_str()).collect();
    assert_eq!(names, ["Threshold", "Invert", "WriteBitmap", "Trace"]);
}

#[test]
fn test_threshold_zero_gives_empty_foreground() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_png(temp_dir.path(), "square.png", &white_square_on_black());
    let tracer = leak(FakeTracer::default());
    let converter = Converter::new(Box::new(tracer), DEFAULT_THRESHOLD);

    let report = converter.convert(&input, 0).unwrap();

    let bitmap = tracer.seen_bitmap.borrow().clone().unwrap();
    assert!(bitmap.pixels().all(|p| p[0] == 0));
    assert_eq!(report.foreground_pixels, 0);
    assert_eq!(report.foreground_ratio(), 0.0);
}

#[test]
fn test_threshold_max_keeps_only_full_white() {
    let temp_dir = TempDir::new().unwrap();
    let source = GrayImage::from_raw(4, 1, vec![0, 254, 255, 128]).unwrap();
    let input = write_png(temp_dir.path(), "row.png", &source);
    let tracer = leak(FakeTracer::default());
    let converter = Converter::new(Box::new(tracer), DEFAULT_THRESHOLD);

    converter.convert(&input, 255).unwrap();

    let bitmap = tracer.seen_bitmap.borrow().clone().unwrap();
    assert_eq!(bitmap.into_raw(), vec![255, 255, 0, 255]);
}

#[test]
fn test_decode_failure_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("broken.png");
    std::fs::write(&input, b"not an image").unwrap();
    let tracer = leak(FakeTracer::default());
    let converter = Converter::new(Box::new(tracer), DEFAULT_THRESHOLD);

    let err = converter.convert(&input, 128).unwrap_err();

    assert!(matches!(err, ConvertError::Decode { .. }));
    assert!(!err.is_tool_error());
    assert!(tracer.calls.borrow().is_empty());
    assert_eq!(dir_entries(temp_dir.path()), ["broken.png"]);
}

#[test]
fn test_missing_input_is_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let converter = Converter::new(Box::new(leak(FakeTracer::default())), DEFAULT_THRESHOLD);

    let err = converter
        .convert(temp_dir.path().join("ghost.jpg"), 128)
        .unwrap_err();

    assert!(matches!(err, ConvertError::Decode { .. }));
    assert!(dir_entries(temp_dir.path()).is_empty());
}

#[test]
fn test_tracer_failure_still_removes_bitmap() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_png(temp_dir.path(), "square.png", &white_square_on_black());
    let tracer = leak(FakeTracer::failing());
    let converter = Converter::new(Box::new(tracer), DEFAULT_THRESHOLD);

    let err = converter.convert(&input, 128).unwrap_err();

    assert!(err.is_tool_error());
    assert_eq!(tracer.calls.borrow().len(), 1);
    assert_eq!(dir_entries(temp_dir.path()), ["square.png"]);
}

#[test]
fn test_rerun_overwrites_previous_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_png(temp_dir.path(), "square.png", &white_square_on_black());
    std::fs::write(temp_dir.path().join("square_inverted.bmp"), b"stale").unwrap();
    std::fs::write(temp_dir.path().join("square_vect.svg"), b"stale").unwrap();
    let converter = Converter::new(Box::new(leak(FakeTracer::default())), DEFAULT_THRESHOLD);

    converter.convert(&input, 128).unwrap();

    let svg = std::fs::read_to_string(temp_dir.path().join("square_vect.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(dir_entries(temp_dir.path()), ["square.png", "square_vect.svg"]);
}

#[test]
fn test_cancelled_selection_touches_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let tracer = leak(FakeTracer::default());
    let converter = Converter::new(Box::new(tracer), DEFAULT_THRESHOLD);

    let outcome = select_and_convert(&FixedSelector::cancelled(), &converter, 128).unwrap();

    assert!(matches!(outcome, RunOutcome::Cancelled));
    assert!(tracer.calls.borrow().is_empty());
    assert!(dir_entries(temp_dir.path()).is_empty());
}

#[test]
fn test_selected_path_is_converted() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_png(temp_dir.path(), "pick.png", &white_square_on_black());
    let converter = Converter::new(Box::new(leak(FakeTracer::default())), DEFAULT_THRESHOLD);

    let outcome = select_and_convert(&FixedSelector::new(&input), &converter, 100).unwrap();

    match outcome {
        RunOutcome::Converted(report) => {
            assert_eq!(report.input, input);
            assert_eq!(report.threshold, 100);
        }
        RunOutcome::Cancelled => panic!("expected a conversion"),
    }
}

#[test]
fn test_report_serializes_to_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_png(temp_dir.path(), "square.png", &white_square_on_black());
    let converter = Converter::new(Box::new(leak(FakeTracer::default())), DEFAULT_THRESHOLD);

    let report = converter.convert(&input, 128).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["threshold"], 128);
    assert_eq!(json["width"], 30);
    assert_eq!(json["stage_timings"].as_array().unwrap().len(), 4);
    assert_eq!(json["run_id"].as_str().unwrap(), report.run_id.to_string());
}

#[test]
fn test_bitmap_write_failure_is_reported_before_tracing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_png(temp_dir.path(), "square.png", &white_square_on_black());
    // A directory squatting on the bitmap path makes the write fail.
    let blocker = temp_dir.path().join("square_inverted.bmp");
    std::fs::create_dir(&blocker).unwrap();
    let tracer = leak(FakeTracer::default());
    let converter = Converter::new(Box::new(tracer), DEFAULT_THRESHOLD);

    let err = converter.convert(&input, 128).unwrap_err();

    match &err {
        ConvertError::BitmapWrite { path, .. } => assert_eq!(path, &blocker),
        other => panic!("expected BitmapWrite, got {other:?}"),
    }
    assert!(!err.is_tool_error());
    assert!(tracer.calls.borrow().is_empty());
    assert!(blocker.is_dir());
    assert_eq!(std::fs::read_dir(&blocker).unwrap().count(), 0);
    assert_eq!(dir_entries(temp_dir.path()), ["square.png", "square_inverted.bmp"]);
}

#[test]
fn test_correlation_id_cleared_after_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_png(temp_dir.path(), "square.png", &white_square_on_black());
    let converter = Converter::new(Box::new(leak(FakeTracer::default())), DEFAULT_THRESHOLD);

    converter.convert(&input, 128).unwrap();
    assert!(get_correlation_id().is_none());

    converter.convert(temp_dir.path().join("ghost.png"), 128).unwrap_err();
    assert!(get_correlation_id().is_none());
}
