//! Core types and utilities for weld seam inspection.
//!
//! This crate is intentionally small and image-library agnostic. It provides:
//! - a lightweight owned/borrowed grayscale image pair,
//! - the fixed inspection region (ROI) and its outline overlay,
//! - global binarization and pixel counting,
//! - a progressive probabilistic Hough transform for straight segments.
//!
//! Detectors built on top of these primitives live in `weld-inspect-detect`.

mod error;
mod hough;
mod image;
mod logger;
mod roi;
mod threshold;

pub use error::RegionError;
pub use hough::{hough_lines_p, HoughParams, LineSegment};
pub use image::{GrayImage, GrayImageView};
pub use roi::{GeometryConfig, Roi};
pub use threshold::{count_non_zero, threshold, ThresholdMode};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
