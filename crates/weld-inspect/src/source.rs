//! Frame providers.
//!
//! Sources hand over frames already converted to grayscale. A source that is
//! not ready, or fails to produce a frame, simply yields nothing; the session
//! turns that into an `Undefined` verdict.

use std::path::{Path, PathBuf};

use weld_inspect_core::GrayImage;

use crate::load_gray;

/// Best-effort, non-blocking frame provider.
pub trait FrameSource {
    fn is_ready(&self) -> bool;

    /// Current frame, if one can be produced right now.
    fn read_gray(&mut self) -> Option<GrayImage>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn read_gray(&mut self) -> Option<GrayImage> {
        (**self).read_gray()
    }
}

/// Re-reads an image file on every poll.
///
/// Lets an external grabber overwrite the file while the station runs.
#[derive(Clone, Debug)]
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for ImageFileSource {
    fn is_ready(&self) -> bool {
        self.path.is_file()
    }

    fn read_gray(&mut self) -> Option<GrayImage> {
        match load_gray(&self.path) {
            Ok(frame) => Some(frame),
            Err(err) => {
                log::warn!("failed to read frame from {}: {err}", self.path.display());
                None
            }
        }
    }
}

/// Serves a fixed in-memory frame, or nothing at all.
#[derive(Clone, Debug, Default)]
pub struct StaticFrameSource {
    frame: Option<GrayImage>,
}

impl StaticFrameSource {
    pub fn new(frame: GrayImage) -> Self {
        Self { frame: Some(frame) }
    }

    /// A source with no frame; behaves like [`OfflineSource`].
    pub fn offline() -> Self {
        Self { frame: None }
    }
}

impl FrameSource for StaticFrameSource {
    fn is_ready(&self) -> bool {
        self.frame.is_some()
    }

    fn read_gray(&mut self) -> Option<GrayImage> {
        self.frame.clone()
    }
}

/// Camera slot with nothing connected. Never ready.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineSource;

impl FrameSource for OfflineSource {
    fn is_ready(&self) -> bool {
        false
    }

    fn read_gray(&mut self) -> Option<GrayImage> {
        None
    }
}
