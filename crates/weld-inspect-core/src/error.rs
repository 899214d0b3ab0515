use crate::Roi;

/// Errors raised when an ROI cannot be applied to a frame.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    #[error("empty region (x0={x0}, y0={y0}, x1={x1}, y1={y1})")]
    Empty { x0: u32, y0: u32, x1: u32, y1: u32 },

    #[error("region {roi} exceeds frame bounds ({width}x{height})")]
    OutOfBounds {
        roi: Roi,
        width: usize,
        height: usize,
    },
}
