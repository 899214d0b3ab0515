use serde::{Deserialize, Serialize};

fn default_line_threshold() -> u8 {
    60
}

fn default_hole_threshold() -> u8 {
    50
}

fn default_hole_percent_threshold() -> f64 {
    3.0
}

fn default_min_line_length() -> u32 {
    200
}

fn default_min_line_gap() -> u32 {
    50
}

/// Intensity and geometry thresholds shared by both detectors.
///
/// Both intensity cuts depend on lighting. Raising `line_threshold` makes the
/// line detector treat brighter pixels as seam; raising `hole_threshold` makes
/// the hole detector treat brighter pixels as holes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionThresholds {
    /// Intensity cut for the seam binarization (at or below = seam).
    #[serde(default = "default_line_threshold")]
    pub line_threshold: u8,
    /// Intensity cut for the hole binarization (at or below = hole).
    #[serde(default = "default_hole_threshold")]
    pub hole_threshold: u8,
    /// Minimum black share of the ROI, in percent, flagged as a hole defect.
    #[serde(default = "default_hole_percent_threshold")]
    pub hole_percent_threshold: f64,
    /// Minimum segment extent in pixels for a seam line.
    #[serde(default = "default_min_line_length")]
    pub min_line_length: u32,
    /// Largest gap in pixels bridged between collinear seam pixels.
    #[serde(default = "default_min_line_gap")]
    pub min_line_gap: u32,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            line_threshold: default_line_threshold(),
            hole_threshold: default_hole_threshold(),
            hole_percent_threshold: default_hole_percent_threshold(),
            min_line_length: default_min_line_length(),
            min_line_gap: default_min_line_gap(),
        }
    }
}
