//! Weld seam defect detectors.
//!
//! Two detectors look at the fixed inspection region of a grayscale frame:
//! - [`LineDetector`]: inverted binarization of the ROI followed by a
//!   probabilistic Hough search; a long straight edge means the seam was never
//!   welded along that stretch.
//! - [`HoleDetector`]: non-inverted binarization of the whole frame, then the
//!   share of black pixels inside the ROI; too much black means porosity or
//!   insufficient fill.
//!
//! [`VerdictEngine`] runs both (hole first) and fuses them with a
//! "first fired wins" rule into a [`Verdict`] and a [`Cause`].
//!
//! ## Quickstart
//!
//! ```
//! use weld_inspect_core::{GeometryConfig, GrayImage, Roi};
//! use weld_inspect_detect::{DetectionThresholds, Verdict, VerdictEngine};
//!
//! let geometry = GeometryConfig::new(Roi::new(180, 180, 470, 280).unwrap());
//! let engine = VerdictEngine::new(geometry, DetectionThresholds::default());
//!
//! let frame = GrayImage::filled(640, 480, 255);
//! let inspection = engine.inspect(&frame.view()).unwrap();
//! assert_eq!(inspection.verdict, Verdict::Good);
//! assert_eq!(inspection.cause.to_string(), "-");
//! ```

mod engine;
mod error;
mod hole;
mod line;
mod params;
mod verdict;

pub use engine::{Inspection, VerdictEngine};
pub use error::DetectError;
pub use hole::{HoleDetection, HoleDetector};
pub use line::{LineDetection, LineDetector, LINE_VOTE_THRESHOLD};
pub use params::DetectionThresholds;
pub use verdict::{fuse, Cause, DetectorFinding, Verdict};

pub use weld_inspect_core::{GeometryConfig, GrayImage, GrayImageView, LineSegment, Roi};
