//! Single-threaded polling loop.

use std::thread;
use std::time::Duration;

use log::error;
use weld_inspect_detect::Verdict;

use crate::{
    EventRecorder, InspectError, InspectionSession, RecorderError, SessionStep, TriggerSource,
};

/// Tally of one [`ControlLoop::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub inspections: u64,
    pub good: u64,
    pub bad: u64,
    pub undefined: u64,
    pub ignored: u64,
    /// Inspections abandoned because a detector failed.
    pub aborted: u64,
}

impl RunSummary {
    fn count(&mut self, verdict: Verdict) {
        self.inspections += 1;
        match verdict {
            Verdict::Good => self.good += 1,
            Verdict::Bad => self.bad += 1,
            Verdict::Undefined => self.undefined += 1,
        }
    }
}

/// Polls both sources, then one trigger, handles it, sleeps, repeats.
pub struct ControlLoop<R, T> {
    session: InspectionSession<R>,
    triggers: T,
    poll_interval: Duration,
}

impl<R: EventRecorder, T: TriggerSource> ControlLoop<R, T> {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

    pub fn new(session: InspectionSession<R>, triggers: T) -> Self {
        Self {
            session,
            triggers,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn session(&self) -> &InspectionSession<R> {
        &self.session
    }

    pub fn into_session(self) -> InspectionSession<R> {
        self.session
    }

    /// Run until a `Stop` trigger.
    ///
    /// A failed detector only costs that inspection; a failed recorder ends
    /// the run.
    pub fn run(&mut self) -> Result<RunSummary, RecorderError> {
        let mut summary = RunSummary::default();
        loop {
            self.session.poll_sources();

            if let Some(trigger) = self.triggers.poll() {
                match self.session.handle(trigger) {
                    Ok(SessionStep::Inspected(event)) => summary.count(event.verdict),
                    Ok(SessionStep::Ignored) => summary.ignored += 1,
                    Ok(SessionStep::Stop) => break,
                    Err(InspectError::Detect(err)) => {
                        error!("inspection aborted: {err}");
                        summary.aborted += 1;
                    }
                    Err(InspectError::Recorder(err)) => return Err(err),
                }
            }

            if !self.poll_interval.is_zero() {
                thread::sleep(self.poll_interval);
            }
        }

        log::info!(
            "stopped after {} inspections ({} good, {} bad, {} undefined)",
            summary.inspections,
            summary.good,
            summary.bad,
            summary.undefined
        );
        Ok(summary)
    }
}
