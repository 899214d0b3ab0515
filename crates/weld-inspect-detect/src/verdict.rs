//! Verdict/cause model and the fusion rule.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome class of a single inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Good,
    Bad,
    /// The frame could not be inspected (source unavailable).
    Undefined,
}

impl Verdict {
    /// String written to the audit log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Good => "Good",
            Verdict::Bad => "Bad",
            Verdict::Undefined => "N/A",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason attached to a verdict.
///
/// Hole percentages are rendered with two decimals (`"5.00%"`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cause {
    /// No anomaly.
    Clear,
    /// A long straight seam edge: the joint was not welded.
    Line,
    /// Black share of the ROI at or above the configured limit.
    Hole { black_percent: f64 },
    /// The frame source never delivered a frame.
    CameraUndefined,
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Clear => f.write_str("-"),
            Cause::Line => f.write_str("Line (not welded)"),
            Cause::Hole { black_percent } => write!(f, "{black_percent:.2}%"),
            Cause::CameraUndefined => f.write_str("Camera undefined"),
        }
    }
}

/// Result of one detector, ready for fusion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorFinding {
    pub fired: bool,
    pub cause: Cause,
}

/// Fuse ordered detector findings: the first one that fired decides the cause.
///
/// No finding fired means `(Good, Clear)`.
pub fn fuse(findings: &[DetectorFinding]) -> (Verdict, Cause) {
    findings
        .iter()
        .find(|f| f.fired)
        .map(|f| (Verdict::Bad, f.cause))
        .unwrap_or((Verdict::Good, Cause::Clear))
}
