//! Porosity / under-fill detector.

use weld_inspect_core::{count_non_zero, threshold, GeometryConfig, GrayImageView, ThresholdMode};

use crate::{Cause, DetectError, DetectionThresholds, DetectorFinding};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Black share of the ROI after binarization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoleDetection {
    /// Percentage of black ROI pixels, rounded to two decimals.
    pub black_percent: f64,
    /// Limit the percentage was compared against.
    pub threshold: f64,
}

impl HoleDetection {
    #[inline]
    pub fn is_defect(&self) -> bool {
        self.black_percent >= self.threshold
    }

    pub fn finding(&self) -> DetectorFinding {
        DetectorFinding {
            fired: self.is_defect(),
            cause: Cause::Hole {
                black_percent: self.black_percent,
            },
        }
    }
}

/// Measures how much of the ROI is dark after a non-inverted binarization.
///
/// The whole frame is binarized (`v > hole_threshold` stays white), then the
/// ROI is cropped and its zero pixels counted.
#[derive(Clone, Debug)]
pub struct HoleDetector {
    geometry: GeometryConfig,
    hole_threshold: u8,
    percent_threshold: f64,
}

impl HoleDetector {
    pub fn new(geometry: GeometryConfig, thresholds: &DetectionThresholds) -> Self {
        Self {
            geometry,
            hole_threshold: thresholds.hole_threshold,
            percent_threshold: thresholds.hole_percent_threshold,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn detect(&self, frame: &GrayImageView<'_>) -> Result<HoleDetection, DetectError> {
        let roi = self.geometry.roi();
        roi.check_within(frame.width, frame.height)?;

        let binary = threshold(frame, self.hole_threshold, 255, ThresholdMode::Binary);
        let region = binary.view().crop(&roi)?;

        let total = region.data.len();
        let black = total - count_non_zero(&region.view());
        let black_percent = round2(black as f64 * 100.0 / total as f64);
        log::debug!("hole detector: {black_percent:.2}% black ({black}/{total})");

        Ok(HoleDetection {
            black_percent,
            threshold: self.percent_threshold,
        })
    }
}

/// Round to two decimals, halves away from zero.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use weld_inspect_core::{GrayImage, Roi};

    fn detector() -> HoleDetector {
        let geometry = GeometryConfig::new(Roi::new(180, 180, 470, 280).unwrap());
        HoleDetector::new(geometry, &DetectionThresholds::default())
    }

    #[test]
    fn bright_roi_has_no_black() {
        let frame = GrayImage::filled(640, 480, 255);
        let det = detector().detect(&frame.view()).unwrap();
        assert_eq!(det.black_percent, 0.0);
        assert!(!det.is_defect());
    }

    #[test]
    fn dark_pixels_outside_roi_do_not_count() {
        let mut frame = GrayImage::filled(640, 480, 255);
        for y in 0..180 {
            for x in 0..640 {
                frame.set(x, y, 0);
            }
        }
        let det = detector().detect(&frame.view()).unwrap();
        assert_eq!(det.black_percent, 0.0);
    }

    #[test]
    fn threshold_value_itself_is_black() {
        let frame = GrayImage::filled(640, 480, 50);
        let det = detector().detect(&frame.view()).unwrap();
        assert_relative_eq!(det.black_percent, 100.0);

        let frame = GrayImage::filled(640, 480, 51);
        assert_eq!(detector().detect(&frame.view()).unwrap().black_percent, 0.0);
    }

    #[test]
    fn percentage_is_rounded_to_two_decimals() {
        // 100 of 29000 pixels -> 0.3448..% -> 0.34
        let mut frame = GrayImage::filled(640, 480, 255);
        for x in 180..280 {
            frame.set(x, 180, 0);
        }
        let det = detector().detect(&frame.view()).unwrap();
        assert_relative_eq!(det.black_percent, 0.34);
        assert!(!det.is_defect());
    }

    #[test]
    fn limit_is_inclusive() {
        // 870 of 29000 pixels = exactly 3.00%
        let mut frame = GrayImage::filled(640, 480, 255);
        for y in 180..183 {
            for x in 180..470 {
                frame.set(x, y, 10);
            }
        }
        let det = detector().detect(&frame.view()).unwrap();
        assert_relative_eq!(det.black_percent, 3.0);
        assert!(det.is_defect());
        assert_eq!(det.finding().cause.to_string(), "3.00%");
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut frame = GrayImage::filled(640, 480, 255);
        for i in 0..777 {
            frame.set(180 + (i * 7) % 290, 180 + (i * 13) % 100, 0);
        }
        let d = detector();
        let a = d.detect(&frame.view()).unwrap();
        let b = d.detect(&frame.view()).unwrap();
        assert_eq!(a.black_percent.to_bits(), b.black_percent.to_bits());
    }

    #[test]
    fn frame_smaller_than_roi_is_rejected() {
        let frame = GrayImage::filled(400, 400, 255);
        assert!(matches!(
            detector().detect(&frame.view()),
            Err(DetectError::InvalidRegion(_))
        ));
    }
}
