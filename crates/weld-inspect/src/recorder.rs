//! Audit log and snapshot sinks.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use weld_inspect_core::{GeometryConfig, GrayImage};

use crate::{gray_to_image, InspectionEvent, SNAPSHOT_STAMP_FORMAT};

#[derive(thiserror::Error, Debug)]
pub enum RecorderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("snapshot buffer does not match its size ({width}x{height})")]
    InvalidFrame { width: usize, height: usize },
}

/// Consumer of inspection events and annotated snapshots.
pub trait EventRecorder {
    /// Persist one audit record.
    fn record(&mut self, event: &InspectionEvent) -> Result<(), RecorderError>;

    /// Persist `frame` with the ROI outline of `geometry` burned in.
    fn save_snapshot(
        &mut self,
        frame: &GrayImage,
        geometry: &GeometryConfig,
        timestamp: NaiveDateTime,
    ) -> Result<(), RecorderError>;
}

impl<R: EventRecorder + ?Sized> EventRecorder for Box<R> {
    fn record(&mut self, event: &InspectionEvent) -> Result<(), RecorderError> {
        (**self).record(event)
    }

    fn save_snapshot(
        &mut self,
        frame: &GrayImage,
        geometry: &GeometryConfig,
        timestamp: NaiveDateTime,
    ) -> Result<(), RecorderError> {
        (**self).save_snapshot(frame, geometry, timestamp)
    }
}

/// Writes daily audit logs and JPEG snapshots to disk.
///
/// - log lines go to `<log_dir>/log_<YYYY-MM-DD>.txt` (date of the event),
/// - snapshots go to `<snapshot_dir>/<YYYY-MM-DD_HH-MM-SS>.jpg`.
///
/// Directories are created on first use. Two snapshots taken within the same
/// second share a name; the later one replaces the earlier.
#[derive(Clone, Debug)]
pub struct FileRecorder {
    log_dir: PathBuf,
    snapshot_dir: PathBuf,
}

impl FileRecorder {
    pub fn new(log_dir: impl Into<PathBuf>, snapshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            snapshot_dir: snapshot_dir.into(),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    /// Log file holding the events of `date`.
    pub fn log_path(&self, date: NaiveDate) -> PathBuf {
        self.log_dir.join(format!("log_{}.txt", date.format("%Y-%m-%d")))
    }

    /// Snapshot file for an inspection at `timestamp`.
    pub fn snapshot_path(&self, timestamp: NaiveDateTime) -> PathBuf {
        self.snapshot_dir
            .join(format!("{}.jpg", timestamp.format(SNAPSHOT_STAMP_FORMAT)))
    }
}

impl EventRecorder for FileRecorder {
    fn record(&mut self, event: &InspectionEvent) -> Result<(), RecorderError> {
        fs::create_dir_all(&self.log_dir)?;
        let path = self.log_path(event.timestamp.date());
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", event.log_line())?;
        log::debug!("appended event #{} to {}", event.counter, path.display());
        Ok(())
    }

    fn save_snapshot(
        &mut self,
        frame: &GrayImage,
        geometry: &GeometryConfig,
        timestamp: NaiveDateTime,
    ) -> Result<(), RecorderError> {
        fs::create_dir_all(&self.snapshot_dir)?;
        let annotated = geometry.draw_outline(frame);
        let img = gray_to_image(&annotated).ok_or(RecorderError::InvalidFrame {
            width: frame.width,
            height: frame.height,
        })?;
        let path = self.snapshot_path(timestamp);
        img.save(&path)?;
        log::debug!("wrote snapshot {}", path.display());
        Ok(())
    }
}

/// Annotated frame kept by [`MemoryRecorder`].
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub timestamp: NaiveDateTime,
    pub image: GrayImage,
}

/// Keeps everything in memory. Useful for dry runs and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecorder {
    pub events: Vec<InspectionEvent>,
    pub snapshots: Vec<Snapshot>,
}

impl EventRecorder for MemoryRecorder {
    fn record(&mut self, event: &InspectionEvent) -> Result<(), RecorderError> {
        self.events.push(event.clone());
        Ok(())
    }

    fn save_snapshot(
        &mut self,
        frame: &GrayImage,
        geometry: &GeometryConfig,
        timestamp: NaiveDateTime,
    ) -> Result<(), RecorderError> {
        self.snapshots.push(Snapshot {
            timestamp,
            image: geometry.draw_outline(frame),
        });
        Ok(())
    }
}
