use approx::assert_relative_eq;
use weld_inspect_detect::{
    Cause, DetectError, DetectionThresholds, GeometryConfig, GrayImage, Roi, Verdict,
    VerdictEngine,
};

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

fn station_roi() -> Roi {
    Roi::new(180, 180, 470, 280).expect("roi")
}

fn engine() -> VerdictEngine {
    let thresholds = DetectionThresholds {
        line_threshold: 60,
        hole_threshold: 50,
        hole_percent_threshold: 3.0,
        min_line_length: 200,
        min_line_gap: 50,
    };
    VerdictEngine::new(GeometryConfig::new(station_roi()), thresholds)
}

/// Blacken the first `count` ROI pixels in row-major order.
fn blacken_roi_pixels(frame: &mut GrayImage, roi: Roi, count: usize) {
    let w = roi.width() as usize;
    for i in 0..count {
        frame.set(roi.x0() as usize + i % w, roi.y0() as usize + i / w, 0);
    }
}

#[test]
fn clean_bright_weld_is_good() {
    let frame = GrayImage::filled(WIDTH, HEIGHT, 255);
    let res = engine().inspect(&frame.view()).expect("inspect");

    assert_eq!(res.verdict, Verdict::Good);
    assert_eq!(res.cause, Cause::Clear);
    assert_eq!(res.cause.to_string(), "-");
    assert_eq!(res.black_percent, 0.0);
    assert!(res.line_segments.is_empty());
}

#[test]
fn five_percent_black_is_a_hole_defect() {
    let roi = station_roi();
    let mut frame = GrayImage::filled(WIDTH, HEIGHT, 255);
    // 5 % of 290 x 100 pixels.
    blacken_roi_pixels(&mut frame, roi, roi.area() / 20);

    let res = engine().inspect(&frame.view()).expect("inspect");
    assert_eq!(res.verdict, Verdict::Bad);
    assert_relative_eq!(res.black_percent, 5.0);
    assert_eq!(res.cause.to_string(), "5.00%");
}

#[test]
fn hole_cause_wins_when_both_detectors_fire() {
    let mut frame = GrayImage::filled(WIDTH, HEIGHT, 255);
    // 40 x 40 porous blotch (5.5 % of the ROI) ...
    for y in 190..230 {
        for x in 200..240 {
            frame.set(x, y, 0);
        }
    }
    // ... plus an unwelded seam well clear of it.
    for x in 185..465 {
        frame.set(x, 270, 0);
    }

    let res = engine().inspect(&frame.view()).expect("inspect");
    assert!(!res.line_segments.is_empty(), "line detector should fire too");
    assert_eq!(res.verdict, Verdict::Bad);
    assert!(matches!(res.cause, Cause::Hole { .. }));
    assert_eq!(res.cause.to_string(), "6.48%");
}

#[test]
fn straight_dark_seam_is_not_welded() {
    let mut frame = GrayImage::filled(WIDTH, HEIGHT, 255);
    for x in 200..450 {
        frame.set(x, 230, 0);
    }

    let res = engine().inspect(&frame.view()).expect("inspect");
    assert!(res.black_percent < 3.0);
    assert_eq!(res.verdict, Verdict::Bad);
    assert_eq!(res.cause, Cause::Line);
    assert_eq!(res.cause.to_string(), "Line (not welded)");
}

#[test]
fn short_seam_below_min_length_is_good() {
    let mut frame = GrayImage::filled(WIDTH, HEIGHT, 255);
    for x in 200..350 {
        frame.set(x, 230, 0);
    }

    let res = engine().inspect(&frame.view()).expect("inspect");
    assert_eq!(res.verdict, Verdict::Good);
}

#[test]
fn inspection_is_deterministic() {
    let roi = station_roi();
    let mut frame = GrayImage::filled(WIDTH, HEIGHT, 255);
    blacken_roi_pixels(&mut frame, roi, 1234);
    for x in 185..465 {
        frame.set(x, 260, 20);
    }

    let e = engine();
    let a = e.inspect(&frame.view()).expect("inspect");
    let b = e.inspect(&frame.view()).expect("inspect");
    assert_eq!(a, b);
}

#[test]
fn roi_exceeding_frame_aborts() {
    let frame = GrayImage::filled(400, 260, 255);
    let err = engine().inspect(&frame.view()).unwrap_err();
    assert!(matches!(err, DetectError::InvalidRegion(_)));
}
