//! Conversions between `image` buffers and the core grayscale type.

use std::path::Path;

use image::ImageReader;
use weld_inspect_core::GrayImage;

#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Copy an `image::GrayImage` into the core frame type.
pub fn gray_from_image(img: &image::GrayImage) -> GrayImage {
    GrayImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}

/// Copy a core frame into an `image::GrayImage`.
///
/// Returns `None` when the buffer length does not match the dimensions.
pub fn gray_to_image(frame: &GrayImage) -> Option<image::GrayImage> {
    let width = u32::try_from(frame.width).ok()?;
    let height = u32::try_from(frame.height).ok()?;
    image::GrayImage::from_raw(width, height, frame.data.clone())
}

/// Decode an image file of any supported format and convert it to luma.
pub fn load_gray(path: impl AsRef<Path>) -> Result<GrayImage, FrameError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(gray_from_image(&img.to_luma8()))
}
