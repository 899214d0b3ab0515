//! Discrete operator commands.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Command driving the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Select source `k` and inspect its current frame.
    InspectSource(usize),
    /// Leave the control loop.
    Stop,
    /// Input that maps to no command; ignored by the session.
    Unrecognized(String),
}

impl Trigger {
    /// Map an operator key to a trigger.
    ///
    /// `l`/`L` inspects source 0, `r`/`R` source 1; `esc`, `q` or the ESC
    /// character stop. Surrounding whitespace is ignored.
    pub fn from_key(key: &str) -> Trigger {
        let key = key.trim();
        match key {
            "l" | "L" => Trigger::InspectSource(0),
            "r" | "R" => Trigger::InspectSource(1),
            "\u{1b}" | "q" | "Q" => Trigger::Stop,
            k if k.eq_ignore_ascii_case("esc") => Trigger::Stop,
            other => Trigger::Unrecognized(other.to_string()),
        }
    }
}

/// Non-blocking supplier of triggers, polled once per loop iteration.
pub trait TriggerSource {
    /// Next pending trigger, or `None` when nothing arrived.
    fn poll(&mut self) -> Option<Trigger>;
}

/// One key per line from a reader (stdin in the CLI).
///
/// A background thread owns the reader and forwards keys over a channel, so
/// [`poll`](TriggerSource::poll) never waits for input. Blank lines yield
/// nothing; end of input or a read error yields `Stop`.
pub struct LineTriggers {
    rx: Receiver<Trigger>,
}

impl LineTriggers {
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("weld-inspect-triggers".into())
            .spawn(move || forward_lines(reader, tx))?;
        Ok(Self { rx })
    }
}

fn forward_lines<R: BufRead>(mut reader: R, tx: Sender<Trigger>) {
    let mut line = String::new();
    loop {
        line.clear();
        let trigger = match reader.read_line(&mut line) {
            Ok(0) => Trigger::Stop,
            Ok(_) if line.trim().is_empty() => continue,
            Ok(_) => Trigger::from_key(&line),
            Err(err) => {
                log::warn!("trigger input failed: {err}");
                Trigger::Stop
            }
        };
        let stop = trigger == Trigger::Stop;
        if tx.send(trigger).is_err() || stop {
            break;
        }
    }
}

impl TriggerSource for LineTriggers {
    fn poll(&mut self) -> Option<Trigger> {
        match self.rx.try_recv() {
            Ok(trigger) => Some(trigger),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Trigger::Stop),
        }
    }
}

/// Pre-recorded trigger sequence; `Stop` once exhausted.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTriggers {
    queue: VecDeque<Option<Trigger>>,
}

impl ScriptedTriggers {
    pub fn new(triggers: impl IntoIterator<Item = Trigger>) -> Self {
        Self {
            queue: triggers.into_iter().map(Some).collect(),
        }
    }

    /// Insert an idle poll (no trigger) at the end of the script.
    pub fn then_idle(mut self) -> Self {
        self.queue.push_back(None);
        self
    }

    pub fn then(mut self, trigger: Trigger) -> Self {
        self.queue.push_back(Some(trigger));
        self
    }
}

impl TriggerSource for ScriptedTriggers {
    fn poll(&mut self) -> Option<Trigger> {
        self.queue.pop_front().unwrap_or(Some(Trigger::Stop))
    }
}
