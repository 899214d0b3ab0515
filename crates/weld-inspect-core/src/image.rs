use crate::{RegionError, Roi};

/// Borrowed single-channel 8-bit image, row-major.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned single-channel 8-bit image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Image of the given size filled with a constant intensity.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap a raw row-major buffer. Returns `None` if the length does not match.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        let expected = width.checked_mul(height)?;
        (data.len() == expected).then_some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }
}

impl<'a> GrayImageView<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Copy out the sub-image covered by `roi` (end coordinates exclusive).
    pub fn crop(&self, roi: &Roi) -> Result<GrayImage, RegionError> {
        roi.check_within(self.width, self.height)?;

        let (x0, x1) = (roi.x0() as usize, roi.x1() as usize);
        let mut data = Vec::with_capacity(roi.area());
        for y in roi.y0() as usize..roi.y1() as usize {
            data.extend_from_slice(&self.row(y)[x0..x1]);
        }

        Ok(GrayImage {
            width: roi.width() as usize,
            height: roi.height() as usize,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_length_mismatch() {
        assert!(GrayImage::from_raw(4, 3, vec![0; 11]).is_none());
        assert!(GrayImage::from_raw(4, 3, vec![0; 12]).is_some());
    }

    #[test]
    fn crop_copies_region_rows() {
        let mut img = GrayImage::filled(6, 4, 0);
        for y in 0..4 {
            for x in 0..6 {
                img.set(x, y, (y * 10 + x) as u8);
            }
        }
        let roi = Roi::new(1, 1, 4, 3).unwrap();
        let sub = img.view().crop(&roi).unwrap();
        assert_eq!((sub.width, sub.height), (3, 2));
        assert_eq!(sub.data, vec![11, 12, 13, 21, 22, 23]);
    }

    #[test]
    fn crop_outside_frame_is_rejected() {
        let img = GrayImage::filled(10, 10, 0);
        let roi = Roi::new(5, 5, 11, 8).unwrap();
        assert!(matches!(
            img.view().crop(&roi),
            Err(RegionError::OutOfBounds { .. })
        ));
    }
}
