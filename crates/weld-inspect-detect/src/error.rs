use weld_inspect_core::RegionError;

/// Errors returned by the detectors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("invalid inspection region: {0}")]
    InvalidRegion(#[from] RegionError),
}
