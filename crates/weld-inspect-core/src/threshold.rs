//! Global binarization and pixel counting.

use crate::{GrayImage, GrayImageView};

/// Direction of a fixed-level binarization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdMode {
    /// `v > thresh -> max_value`, otherwise `0`.
    Binary,
    /// `v > thresh -> 0`, otherwise `max_value`.
    BinaryInv,
}

/// Binarize `src` against a fixed threshold.
pub fn threshold(
    src: &GrayImageView<'_>,
    thresh: u8,
    max_value: u8,
    mode: ThresholdMode,
) -> GrayImage {
    let (above, at_or_below) = match mode {
        ThresholdMode::Binary => (max_value, 0),
        ThresholdMode::BinaryInv => (0, max_value),
    };
    let data = src
        .data
        .iter()
        .map(|&v| if v > thresh { above } else { at_or_below })
        .collect();

    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}

/// Number of non-zero pixels.
pub fn count_non_zero(src: &GrayImageView<'_>) -> usize {
    src.data.iter().filter(|&&v| v != 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> GrayImage {
        GrayImage::from_raw(4, 1, vec![0, 50, 51, 255]).unwrap()
    }

    #[test]
    fn binary_keeps_bright_pixels() {
        let out = threshold(&ramp().view(), 50, 255, ThresholdMode::Binary);
        assert_eq!(out.data, vec![0, 0, 255, 255]);
    }

    #[test]
    fn binary_inv_keeps_dark_pixels() {
        let out = threshold(&ramp().view(), 50, 255, ThresholdMode::BinaryInv);
        assert_eq!(out.data, vec![255, 255, 0, 0]);
    }

    #[test]
    fn counts_non_zero() {
        assert_eq!(count_non_zero(&ramp().view()), 3);
        assert_eq!(count_non_zero(&GrayImage::filled(3, 3, 0).view()), 0);
    }
}
