//! Progress indicator of one server.
//!
//! State machine: `Idle -> Pending -> {Succeeded | Failed}`. Transitions are
//! driven only by progress events and request results.

use hub_client::ProgressEvent;

/// Phase shown by the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressPhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// What a progress event changed, for the row controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressOutcome {
    InProgress,
    Ready,
    Failed,
}

/// Progress bar and log of one server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressView {
    pub phase: ProgressPhase,
    /// Bar width, 0-100.
    pub percent: u16,
    pub log: Vec<String>,
}

impl ProgressView {
    /// Neutral bar at 0% with an empty log.
    pub fn reset(&mut self) {
        self.phase = ProgressPhase::Pending;
        self.percent = 0;
        self.log.clear();
    }

    /// Clear the bar but keep the log.
    pub fn clear_bar(&mut self) {
        self.phase = ProgressPhase::Idle;
        self.percent = 0;
    }

    /// Full-width failure bar with `message` appended to the log.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = ProgressPhase::Failed;
        self.percent = 100;
        self.log.push(message.into());
    }

    pub fn push_log(&mut self, message: impl Into<String>) {
        self.log.push(message.into());
    }

    pub fn apply(&mut self, event: &ProgressEvent) -> ProgressOutcome {
        if let Some(message) = event.display_message() {
            self.log.push(message.to_string());
        }

        if event.failed {
            self.phase = ProgressPhase::Failed;
            self.percent = 100;
            return ProgressOutcome::Failed;
        }
        if event.ready {
            self.phase = ProgressPhase::Succeeded;
            self.percent = 100;
            return ProgressOutcome::Ready;
        }

        self.phase = ProgressPhase::Pending;
        if let Some(percent) = event.percent() {
            self.percent = percent;
        }
        ProgressOutcome::InProgress
    }
}
