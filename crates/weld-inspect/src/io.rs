//! JSON station configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use weld_inspect_core::{GeometryConfig, RegionError, Roi};
use weld_inspect_detect::{DetectionThresholds, VerdictEngine};

use crate::{FileRecorder, FrameSource, ImageFileSource, InspectionSession, OfflineSource};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Region(#[from] RegionError),
    #[error("hole_percent_threshold must be within 0..=100, got {0}")]
    InvalidThreshold(f64),
}

fn default_roi() -> [u32; 4] {
    [180, 180, 470, 280]
}

fn default_sources() -> [SourceConfig; 2] {
    [SourceConfig::named("Camera 1"), SourceConfig::named("Camera 2")]
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("log")
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("temp")
}

fn default_poll_interval_ms() -> u64 {
    1
}

/// One camera slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    /// Image file re-read on every poll; no path means the slot is offline.
    #[serde(default)]
    pub image_path: Option<PathBuf>,
}

impl SourceConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_path: None,
        }
    }

    fn build_source(&self) -> Box<dyn FrameSource> {
        match &self.image_path {
            Some(path) => Box::new(ImageFileSource::new(path)),
            None => Box::new(OfflineSource),
        }
    }
}

/// Station configuration, loaded once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Inspection region as `[x0, y0, x1, y1]`, checked by [`Self::geometry`].
    #[serde(default = "default_roi")]
    pub roi: [u32; 4],
    #[serde(default)]
    pub thresholds: DetectionThresholds,
    #[serde(default = "default_sources")]
    pub sources: [SourceConfig; 2],
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            roi: default_roi(),
            thresholds: DetectionThresholds::default(),
            sources: default_sources(),
            log_dir: default_log_dir(),
            snapshot_dir: default_snapshot_dir(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl InspectConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Validated inspection geometry.
    pub fn geometry(&self) -> Result<GeometryConfig, ConfigError> {
        Ok(GeometryConfig::new(Roi::try_from(self.roi)?))
    }

    /// Validated detection thresholds.
    pub fn thresholds(&self) -> Result<DetectionThresholds, ConfigError> {
        let pct = self.thresholds.hole_percent_threshold;
        if !(0.0..=100.0).contains(&pct) {
            return Err(ConfigError::InvalidThreshold(pct));
        }
        Ok(self.thresholds.clone())
    }

    pub fn build_engine(&self) -> Result<VerdictEngine, ConfigError> {
        Ok(VerdictEngine::new(self.geometry()?, self.thresholds()?))
    }

    /// Frame sources for both slots, primary first.
    pub fn build_sources(&self) -> [Box<dyn FrameSource>; 2] {
        [
            self.sources[0].build_source(),
            self.sources[1].build_source(),
        ]
    }

    pub fn build_recorder(&self) -> FileRecorder {
        FileRecorder::new(&self.log_dir, &self.snapshot_dir)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Assemble a session writing to the configured directories.
    pub fn build_session(&self) -> Result<InspectionSession<FileRecorder>, ConfigError> {
        let engine = self.build_engine()?;
        let [primary, secondary] = self.build_sources();
        Ok(
            InspectionSession::new(engine, primary, secondary, self.build_recorder())
                .with_source_names(&self.sources[0].name, &self.sources[1].name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceId;

    #[test]
    fn empty_json_gives_station_defaults() {
        let cfg: InspectConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, InspectConfig::default());
        assert_eq!(
            cfg.geometry().unwrap().roi(),
            Roi::new(180, 180, 470, 280).unwrap()
        );
        assert_eq!(cfg.sources[1].name, "Camera 2");
        assert_eq!(cfg.log_dir, PathBuf::from("log"));
        assert_eq!(cfg.snapshot_dir, PathBuf::from("temp"));
        assert_eq!(cfg.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("station.json");
        let mut cfg = InspectConfig::default();
        cfg.roi = [10, 20, 300, 120];
        cfg.thresholds.hole_threshold = 40;
        cfg.sources[0].image_path = Some(PathBuf::from("cam1.png"));

        cfg.write_json(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"roi\""));
        assert_eq!(InspectConfig::load_json(&path).unwrap(), cfg);
    }

    #[test]
    fn rejects_degenerate_roi() {
        let cfg: InspectConfig = serde_json::from_str(r#"{"roi": [50, 50, 40, 90]}"#).unwrap();
        assert!(matches!(cfg.geometry(), Err(ConfigError::Region(_))));
        assert!(matches!(cfg.build_session(), Err(ConfigError::Region(_))));

        let mut cfg = InspectConfig::default();
        cfg.roi[2] = cfg.roi[0];
        assert!(matches!(cfg.build_engine(), Err(ConfigError::Region(_))));
    }

    #[test]
    fn rejects_out_of_range_percent() {
        let mut cfg = InspectConfig::default();
        cfg.thresholds.hole_percent_threshold = 140.0;
        assert!(matches!(
            cfg.build_engine(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn session_uses_configured_names_and_sources() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = InspectConfig::default();
        cfg.sources[0].name = "Left".into();
        cfg.log_dir = dir.path().join("log");
        cfg.snapshot_dir = dir.path().join("temp");

        let session = cfg.build_session().unwrap();
        assert_eq!(session.source_name(SourceId::Primary), "Left");
        assert_eq!(session.source_name(SourceId::Secondary), "Camera 2");
        assert_eq!(session.recorder().log_dir(), cfg.log_dir.as_path());
    }
}
