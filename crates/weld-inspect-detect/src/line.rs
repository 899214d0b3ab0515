//! Unwelded-seam detector.

use std::f32::consts::PI;

use weld_inspect_core::{
    hough_lines_p, threshold, GeometryConfig, GrayImageView, HoughParams, LineSegment,
    ThresholdMode,
};

use crate::{Cause, DetectError, DetectionThresholds, DetectorFinding};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Accumulator votes required before a seam candidate is walked.
pub const LINE_VOTE_THRESHOLD: u32 = 200;

/// Segments found inside the ROI (ROI-local coordinates).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineDetection {
    pub segments: Vec<LineSegment>,
}

impl LineDetection {
    #[inline]
    pub fn is_defect(&self) -> bool {
        !self.segments.is_empty()
    }

    pub fn finding(&self) -> DetectorFinding {
        DetectorFinding {
            fired: self.is_defect(),
            cause: Cause::Line,
        }
    }
}

/// Looks for long straight dark edges inside the ROI.
///
/// Seams are darker than the bead, so the ROI is binarized *inverted*
/// (`v <= line_threshold` becomes foreground) before the line search.
#[derive(Clone, Debug)]
pub struct LineDetector {
    geometry: GeometryConfig,
    line_threshold: u8,
    hough: HoughParams,
}

impl LineDetector {
    pub fn new(geometry: GeometryConfig, thresholds: &DetectionThresholds) -> Self {
        let hough = HoughParams {
            rho: 1.0,
            theta: PI / 180.0,
            threshold: LINE_VOTE_THRESHOLD,
            min_line_length: thresholds.min_line_length,
            max_line_gap: thresholds.min_line_gap,
            ..HoughParams::default()
        };
        Self {
            geometry,
            line_threshold: thresholds.line_threshold,
            hough,
        }
    }

    #[inline]
    pub fn hough_params(&self) -> &HoughParams {
        &self.hough
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn detect(&self, frame: &GrayImageView<'_>) -> Result<LineDetection, DetectError> {
        let region = frame.crop(&self.geometry.roi())?;
        let binary = threshold(
            &region.view(),
            self.line_threshold,
            255,
            ThresholdMode::BinaryInv,
        );
        let segments = hough_lines_p(&binary.view(), &self.hough);
        log::debug!("line detector: {} segment(s)", segments.len());
        Ok(LineDetection { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weld_inspect_core::{GrayImage, Roi};

    fn detector() -> LineDetector {
        let geometry = GeometryConfig::new(Roi::new(180, 180, 470, 280).unwrap());
        LineDetector::new(geometry, &DetectionThresholds::default())
    }

    #[test]
    fn uniform_bright_frame_has_no_seam() {
        let frame = GrayImage::filled(640, 480, 255);
        let det = detector().detect(&frame.view()).unwrap();
        assert!(!det.is_defect());
        assert!(!det.finding().fired);
    }

    #[test]
    fn dark_horizontal_seam_is_detected() {
        let mut frame = GrayImage::filled(640, 480, 200);
        for x in 200..450 {
            frame.set(x, 230, 0);
        }
        let det = detector().detect(&frame.view()).unwrap();
        assert!(det.is_defect());
        let seg = det.segments[0];
        // ROI-local row of the seam.
        assert_eq!(seg.start.y, 50);
        assert_eq!(det.finding().cause, Cause::Line);
    }

    #[test]
    fn seam_outside_roi_is_ignored() {
        let mut frame = GrayImage::filled(640, 480, 200);
        for x in 100..600 {
            frame.set(x, 100, 0);
        }
        assert!(!detector().detect(&frame.view()).unwrap().is_defect());
    }

    #[test]
    fn pixels_at_threshold_count_as_seam() {
        let mut frame = GrayImage::filled(640, 480, 61);
        for x in 190..460 {
            frame.set(x, 200, 60);
        }
        assert!(detector().detect(&frame.view()).unwrap().is_defect());
    }

    #[test]
    fn frame_smaller_than_roi_is_rejected() {
        let frame = GrayImage::filled(320, 240, 255);
        assert!(matches!(
            detector().detect(&frame.view()),
            Err(DetectError::InvalidRegion(_))
        ));
    }
}
