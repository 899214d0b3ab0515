//! Inspection region and its overlay.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GrayImage, RegionError};

/// Axis-aligned inspection rectangle in frame pixel coordinates.
///
/// Cropping treats `x1`/`y1` as exclusive; the drawn outline includes them.
/// Only [`Roi::new`] (or deserialization through it) builds one, so
/// `x0 < x1` and `y0 < y1` always hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 4]", into = "[u32; 4]")]
pub struct Roi {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Roi {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Result<Self, RegionError> {
        if x0 >= x1 || y0 >= y1 {
            return Err(RegionError::Empty { x0, y0, x1, y1 });
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    #[inline]
    pub fn x0(&self) -> u32 {
        self.x0
    }

    #[inline]
    pub fn y0(&self) -> u32 {
        self.y0
    }

    #[inline]
    pub fn x1(&self) -> u32 {
        self.x1
    }

    #[inline]
    pub fn y1(&self) -> u32 {
        self.y1
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Number of pixels covered by the crop.
    #[inline]
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Ensure the crop lies entirely inside a `width` x `height` frame.
    pub fn check_within(&self, width: usize, height: usize) -> Result<(), RegionError> {
        if self.x1 as usize > width || self.y1 as usize > height {
            return Err(RegionError::OutOfBounds {
                roi: *self,
                width,
                height,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}

impl TryFrom<[u32; 4]> for Roi {
    type Error = RegionError;

    fn try_from([x0, y0, x1, y1]: [u32; 4]) -> Result<Self, Self::Error> {
        Roi::new(x0, y0, x1, y1)
    }
}

impl From<Roi> for [u32; 4] {
    fn from(roi: Roi) -> Self {
        [roi.x0, roi.y0, roi.x1, roi.y1]
    }
}

/// Fixed inspection geometry shared by every detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryConfig {
    roi: Roi,
}

impl GeometryConfig {
    /// Darkest intensity, used for the outline.
    pub const OUTLINE_VALUE: u8 = 0;

    pub fn new(roi: Roi) -> Self {
        Self { roi }
    }

    #[inline]
    pub fn roi(&self) -> Roi {
        self.roi
    }

    /// Return a copy of `frame` with a 1-pixel ROI rectangle burned in.
    ///
    /// Border pixels falling outside the frame are skipped.
    pub fn draw_outline(&self, frame: &GrayImage) -> GrayImage {
        let mut out = frame.clone();
        let Roi { x0, y0, x1, y1 } = self.roi;
        let (w, h) = (frame.width as u32, frame.height as u32);

        for x in x0..=x1.min(w.saturating_sub(1)) {
            for y in [y0, y1] {
                if y < h {
                    out.set(x as usize, y as usize, Self::OUTLINE_VALUE);
                }
            }
        }
        for y in y0..=y1.min(h.saturating_sub(1)) {
            for x in [x0, x1] {
                if x < w {
                    out.set(x as usize, y as usize, Self::OUTLINE_VALUE);
                }
            }
        }
        out
    }
}
