use weld_inspect_core::{GeometryConfig, GrayImageView, LineSegment};

use crate::{
    fuse, Cause, DetectError, DetectionThresholds, HoleDetector, LineDetector, Verdict,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Outcome of one frame inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct Inspection {
    pub verdict: Verdict,
    pub cause: Cause,
    /// Always computed, even when the verdict is decided by the line detector.
    pub black_percent: f64,
    /// Seam segments in ROI-local coordinates.
    pub line_segments: Vec<LineSegment>,
}

/// Runs the hole and line detectors and fuses their findings.
#[derive(Clone, Debug)]
pub struct VerdictEngine {
    geometry: GeometryConfig,
    thresholds: DetectionThresholds,
    hole: HoleDetector,
    line: LineDetector,
}

impl VerdictEngine {
    pub fn new(geometry: GeometryConfig, thresholds: DetectionThresholds) -> Self {
        let hole = HoleDetector::new(geometry, &thresholds);
        let line = LineDetector::new(geometry, &thresholds);
        Self {
            geometry,
            thresholds,
            hole,
            line,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    #[inline]
    pub fn thresholds(&self) -> &DetectionThresholds {
        &self.thresholds
    }

    /// Inspect a grayscale frame.
    ///
    /// Findings are fused in the order hole, line: when both fire the hole
    /// percentage is reported. A detector error aborts the inspection.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn inspect(&self, frame: &GrayImageView<'_>) -> Result<Inspection, DetectError> {
        let hole = self.hole.detect(frame)?;
        let line = self.line.detect(frame)?;

        let (verdict, cause) = fuse(&[hole.finding(), line.finding()]);
        log::debug!(
            "inspection: {verdict} ({cause}), black={:.2}%, segments={}",
            hole.black_percent,
            line.segments.len()
        );

        Ok(Inspection {
            verdict,
            cause,
            black_percent: hole.black_percent,
            line_segments: line.segments,
        })
    }
}
