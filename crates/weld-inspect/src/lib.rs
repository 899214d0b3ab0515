//! Weld seam inspection station.
//!
//! This crate wires the detectors from `weld-inspect-detect` into a
//! two-source inspection session:
//! - [`FrameSource`]: where grayscale frames come from (image files, memory),
//! - [`EventRecorder`]: where audit lines and annotated snapshots go,
//! - [`TriggerSource`]: discrete "inspect source K" / "stop" commands,
//! - [`InspectionSession`]: active-source selector, event counter, dispatch,
//! - [`ControlLoop`]: the single-threaded polling loop driving it all,
//! - [`InspectConfig`]: JSON station configuration.
//!
//! ## Quickstart
//!
//! ```
//! use weld_inspect::{
//!     InspectionSession, MemoryRecorder, SessionStep, StaticFrameSource, Trigger,
//! };
//! use weld_inspect::detect::{DetectionThresholds, GeometryConfig, GrayImage, Roi, Verdict, VerdictEngine};
//!
//! let geometry = GeometryConfig::new(Roi::new(180, 180, 470, 280).unwrap());
//! let engine = VerdictEngine::new(geometry, DetectionThresholds::default());
//! let mut session = InspectionSession::new(
//!     engine,
//!     Box::new(StaticFrameSource::new(GrayImage::filled(640, 480, 255))),
//!     Box::new(StaticFrameSource::offline()),
//!     MemoryRecorder::default(),
//! );
//!
//! let step = session.handle(Trigger::InspectSource(0)).unwrap();
//! let SessionStep::Inspected(event) = step else { unreachable!() };
//! assert_eq!(event.verdict, Verdict::Good);
//! assert_eq!(session.state().counter, 1);
//! ```

pub use weld_inspect_core as core;
pub use weld_inspect_detect as detect;

mod event;
mod frame;
mod io;
mod recorder;
mod runner;
mod session;
mod source;
mod trigger;

pub use event::{InspectionEvent, SNAPSHOT_STAMP_FORMAT, TIMESTAMP_FORMAT};
pub use frame::{gray_from_image, gray_to_image, load_gray, FrameError};
pub use io::{ConfigError, InspectConfig, SourceConfig};
pub use recorder::{EventRecorder, FileRecorder, MemoryRecorder, RecorderError, Snapshot};
pub use runner::{ControlLoop, RunSummary};
pub use session::{
    local_now, InspectError, InspectionSession, SessionState, SessionStep, SlotState, SourceId,
};
pub use source::{FrameSource, ImageFileSource, OfflineSource, StaticFrameSource};
pub use trigger::{LineTriggers, ScriptedTriggers, Trigger, TriggerSource};
