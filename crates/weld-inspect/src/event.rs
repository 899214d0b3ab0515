use std::fmt;

use chrono::NaiveDateTime;
use weld_inspect_detect::{Cause, Verdict};

/// Timestamp layout of audit log lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Filesystem-safe timestamp layout used for snapshot file names.
pub const SNAPSHOT_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// One audit record, created per handled trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct InspectionEvent {
    pub timestamp: NaiveDateTime,
    /// Session counter value at the time of the inspection (starts at 0).
    pub counter: u64,
    pub source_name: String,
    pub verdict: Verdict,
    pub cause: Cause,
}

impl InspectionEvent {
    /// Tab-separated audit line without the trailing newline:
    /// `timestamp \t counter \t source \t verdict \t cause`.
    pub fn log_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InspectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.counter,
            self.source_name,
            self.verdict,
            self.cause
        )
    }
}
