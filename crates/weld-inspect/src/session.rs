//! Two-source inspection session.
//!
//! The session owns both frame sources, the verdict engine and the recorder,
//! plus the two pieces of mutable state: the active-source selector and the
//! event counter. Both change only inside [`InspectionSession::handle`].

use chrono::{Local, NaiveDateTime, SubsecRound};
use log::{info, warn};
use weld_inspect_core::GrayImage;
use weld_inspect_detect::{Cause, DetectError, Verdict, VerdictEngine};

use crate::{EventRecorder, FrameSource, InspectionEvent, RecorderError, Trigger};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// One of the two fixed camera identities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SourceId {
    #[default]
    Primary,
    Secondary,
}

impl SourceId {
    pub const ALL: [SourceId; 2] = [SourceId::Primary, SourceId::Secondary];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            SourceId::Primary => 0,
            SourceId::Secondary => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn default_name(self) -> &'static str {
        match self {
            SourceId::Primary => "Camera 1",
            SourceId::Secondary => "Camera 2",
        }
    }
}

/// Last known availability of a source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SlotState {
    #[default]
    Unavailable,
    Available(GrayImage),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub active: SourceId,
    /// Number of events emitted so far; the next event carries this value.
    pub counter: u64,
}

/// What [`InspectionSession::handle`] did with a trigger.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionStep {
    Inspected(InspectionEvent),
    Ignored,
    Stop,
}

#[derive(thiserror::Error, Debug)]
pub enum InspectError {
    #[error("inspection aborted: {0}")]
    Detect(#[from] DetectError),
    #[error("recorder failed: {0}")]
    Recorder(#[from] RecorderError),
}

/// Local wall-clock time truncated to whole seconds.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

struct SourceSlot {
    name: String,
    source: Box<dyn FrameSource>,
    state: SlotState,
}

impl SourceSlot {
    fn new(id: SourceId, source: Box<dyn FrameSource>) -> Self {
        Self {
            name: id.default_name().to_string(),
            source,
            state: SlotState::Unavailable,
        }
    }

    /// Pull a fresh frame if the source has one; keep the last one otherwise.
    fn refresh(&mut self) {
        if !self.source.is_ready() {
            return;
        }
        if let Some(frame) = self.source.read_gray() {
            self.state = SlotState::Available(frame);
        }
    }
}

pub struct InspectionSession<R> {
    engine: VerdictEngine,
    slots: [SourceSlot; 2],
    recorder: R,
    state: SessionState,
    clock: Box<dyn FnMut() -> NaiveDateTime>,
}

impl<R: EventRecorder> InspectionSession<R> {
    pub fn new(
        engine: VerdictEngine,
        primary: Box<dyn FrameSource>,
        secondary: Box<dyn FrameSource>,
        recorder: R,
    ) -> Self {
        Self {
            engine,
            slots: [
                SourceSlot::new(SourceId::Primary, primary),
                SourceSlot::new(SourceId::Secondary, secondary),
            ],
            recorder,
            state: SessionState::default(),
            clock: Box::new(local_now),
        }
    }

    /// Override the display names written to the audit log.
    pub fn with_source_names(
        mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        self.slots[0].name = primary.into();
        self.slots[1].name = secondary.into();
        self
    }

    /// Replace the timestamp source (tests, replays).
    pub fn with_clock(mut self, clock: impl FnMut() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn slot_state(&self, id: SourceId) -> &SlotState {
        &self.slots[id.index()].state
    }

    pub fn source_name(&self, id: SourceId) -> &str {
        &self.slots[id.index()].name
    }

    #[inline]
    pub fn engine(&self) -> &VerdictEngine {
        &self.engine
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut R {
        &mut self.recorder
    }

    pub fn into_recorder(self) -> R {
        self.recorder
    }

    /// Best-effort refresh of both sources.
    pub fn poll_sources(&mut self) {
        for slot in &mut self.slots {
            slot.refresh();
        }
    }

    /// Apply one trigger.
    ///
    /// Unknown sources and unrecognized input leave the state untouched. A
    /// detector error aborts the inspection after the selector moved but
    /// before any event exists, so the counter is unchanged.
    pub fn handle(&mut self, trigger: Trigger) -> Result<SessionStep, InspectError> {
        match trigger {
            Trigger::Stop => Ok(SessionStep::Stop),
            Trigger::InspectSource(k) => match SourceId::from_index(k) {
                Some(id) => self.inspect(id).map(SessionStep::Inspected),
                None => {
                    log::debug!("ignoring trigger for unknown source {k}");
                    Ok(SessionStep::Ignored)
                }
            },
            Trigger::Unrecognized(key) => {
                log::debug!("ignoring unrecognized input {key:?}");
                Ok(SessionStep::Ignored)
            }
        }
    }

    /// Select `id` and inspect its current frame.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn inspect(&mut self, id: SourceId) -> Result<InspectionEvent, InspectError> {
        self.state.active = id;
        let timestamp = (self.clock)();

        let slot = &mut self.slots[id.index()];
        slot.refresh();

        let (verdict, cause) = match &slot.state {
            SlotState::Unavailable => {
                warn!("{} is not ready", slot.name);
                (Verdict::Undefined, Cause::CameraUndefined)
            }
            SlotState::Available(frame) => {
                let inspection = self.engine.inspect(&frame.view())?;
                info!("{}: {} ({})", slot.name, inspection.verdict, inspection.cause);
                (inspection.verdict, inspection.cause)
            }
        };

        let event = InspectionEvent {
            timestamp,
            counter: self.state.counter,
            source_name: slot.name.clone(),
            verdict,
            cause,
        };
        self.state.counter += 1;

        self.recorder.record(&event)?;
        if let SlotState::Available(frame) = &slot.state {
            self.recorder
                .save_snapshot(frame, self.engine.geometry(), timestamp)?;
        }
        Ok(event)
    }
}
