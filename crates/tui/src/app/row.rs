//! Row state controller for one named-server row.
//!
//! Responsibilities:
//! - Track which row controls are visible and which are interactive.
//! - Switch a row between its running and not-running layouts.
//! - Lock a row while a mutating request is in flight and restore it on failure.
//!
//! Does NOT handle:
//! - Issuing requests or reacting to their results (see `app::actions`).
//! - Progress bar state (see `app::progress`).
//!
//! Invariants:
//! - `set_row_state` always clears the in-flight lock before applying a layout.
//! - In the running layout `Open` and `Stop` stay disabled until `mark_ready`.
//! - `set_row_state(true)` followed by `set_row_state(false)` yields the
//!   layout `RowControls::new` produces for the same marker.

use std::collections::BTreeSet;

/// One control in a server row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowControl {
    /// "Not available" marker shown for servers on unavailable systems.
    Na,
    Start,
    Delete,
    Open,
    Stop,
}

impl RowControl {
    pub const ALL: [RowControl; 5] = [
        RowControl::Na,
        RowControl::Start,
        RowControl::Delete,
        RowControl::Open,
        RowControl::Stop,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Na => "n/a",
            Self::Start => "start",
            Self::Delete => "delete",
            Self::Open => "open",
            Self::Stop => "stop",
        }
    }
}

/// Visibility and enabled state captured before a request was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    visible: BTreeSet<RowControl>,
    disabled: BTreeSet<RowControl>,
}

/// Visible and interactive controls of one server row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowControls {
    not_applicable: bool,
    running: bool,
    locked: bool,
    visible: BTreeSet<RowControl>,
    disabled: BTreeSet<RowControl>,
    before_lock: Option<RowSnapshot>,
}

impl RowControls {
    /// Create a row in the not-running layout.
    pub fn new(not_applicable: bool) -> Self {
        let mut row = Self {
            not_applicable,
            running: false,
            locked: false,
            visible: BTreeSet::new(),
            disabled: BTreeSet::new(),
            before_lock: None,
        };
        row.set_row_state(false);
        row
    }

    /// Create a row in the layout matching `running`.
    pub fn with_state(not_applicable: bool, running: bool) -> Self {
        let mut row = Self::new(not_applicable);
        if running {
            row.set_row_state(true);
        }
        row
    }

    /// Apply the running or not-running layout and unlock the row.
    pub fn set_row_state(&mut self, running: bool) {
        self.locked = false;
        self.before_lock = None;
        self.disabled.clear();
        self.running = running;

        if running {
            self.hide(&[RowControl::Na, RowControl::Start, RowControl::Delete]);
            self.show(&[RowControl::Open, RowControl::Stop]);
            // Enabled once the progress channel reports the server ready.
            self.disabled.insert(RowControl::Open);
            self.disabled.insert(RowControl::Stop);
        } else if self.not_applicable {
            self.show(&[RowControl::Na, RowControl::Delete]);
            self.hide(&[RowControl::Start, RowControl::Open, RowControl::Stop]);
        } else {
            self.hide(&[RowControl::Na, RowControl::Open, RowControl::Stop]);
            self.show(&[RowControl::Start, RowControl::Delete]);
        }
    }

    /// Make every control non-interactive until the pending request resolves.
    pub fn disable_row(&mut self) {
        if !self.locked {
            self.before_lock = Some(self.snapshot());
        }
        self.locked = true;
    }

    /// Return the row to the state captured by the last `disable_row`.
    pub fn restore(&mut self) {
        if let Some(snapshot) = self.before_lock.take() {
            self.visible = snapshot.visible;
            self.disabled = snapshot.disabled;
        }
        self.locked = false;
    }

    /// Enable `Open` and `Stop` after the server reported ready.
    pub fn mark_ready(&mut self) {
        if self.running {
            self.disabled.remove(&RowControl::Open);
            self.disabled.remove(&RowControl::Stop);
        }
    }

    pub fn snapshot(&self) -> RowSnapshot {
        RowSnapshot {
            visible: self.visible.clone(),
            disabled: self.disabled.clone(),
        }
    }

    pub fn is_visible(&self, control: RowControl) -> bool {
        self.visible.contains(&control)
    }

    /// True if `control` is shown and accepts input right now.
    pub fn is_enabled(&self, control: RowControl) -> bool {
        !self.locked && self.is_visible(control) && !self.disabled.contains(&control)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn not_applicable(&self) -> bool {
        self.not_applicable
    }

    /// Controls currently shown, in display order.
    pub fn visible_controls(&self) -> impl Iterator<Item = RowControl> + '_ {
        RowControl::ALL
            .into_iter()
            .filter(|control| self.visible.contains(control))
    }

    fn show(&mut self, controls: &[RowControl]) {
        self.visible.extend(controls.iter().copied());
    }

    fn hide(&mut self, controls: &[RowControl]) {
        for control in controls {
            self.visible.remove(control);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_layout() {
        let row = RowControls::new(false);
        let visible: Vec<_> = row.visible_controls().collect();
        assert_eq!(visible, vec![RowControl::Start, RowControl::Delete]);
        assert!(row.is_enabled(RowControl::Start));
    }

    #[test]
    fn test_not_applicable_row_layout() {
        let row = RowControls::new(true);
        let visible: Vec<_> = row.visible_controls().collect();
        assert_eq!(visible, vec![RowControl::Na, RowControl::Delete]);
        assert!(!row.is_visible(RowControl::Start));
    }

    #[test]
    fn test_running_layout_waits_for_ready() {
        let mut row = RowControls::new(false);
        row.set_row_state(true);

        assert!(row.is_visible(RowControl::Open));
        assert!(row.is_visible(RowControl::Stop));
        assert!(!row.is_visible(RowControl::Start));
        assert!(!row.is_visible(RowControl::Delete));
        assert!(!row.is_enabled(RowControl::Open));
        assert!(!row.is_enabled(RowControl::Stop));

        row.mark_ready();
        assert!(row.is_enabled(RowControl::Open));
        assert!(row.is_enabled(RowControl::Stop));
    }

    #[test]
    fn test_mark_ready_ignored_when_not_running() {
        let mut row = RowControls::new(false);
        row.mark_ready();
        assert!(!row.is_visible(RowControl::Open));
    }

    #[test]
    fn test_disable_row_then_restore() {
        let mut row = RowControls::with_state(false, true);
        row.mark_ready();
        let before = row.snapshot();

        row.disable_row();
        assert!(row.is_locked());
        assert!(RowControl::ALL.iter().all(|c| !row.is_enabled(*c)));

        row.restore();
        assert!(!row.is_locked());
        assert_eq!(row.snapshot(), before);
        assert!(row.is_enabled(RowControl::Stop));
    }

    #[test]
    fn test_disable_twice_keeps_first_snapshot() {
        let mut row = RowControls::new(false);
        let before = row.snapshot();
        row.disable_row();
        row.disable_row();
        row.restore();
        assert_eq!(row.snapshot(), before);
    }

    #[test]
    fn test_set_row_state_unlocks() {
        let mut row = RowControls::new(false);
        row.disable_row();
        row.set_row_state(false);
        assert!(!row.is_locked());
        assert!(row.is_enabled(RowControl::Start));
    }

    #[test]
    fn test_running_round_trip_restores_layout() {
        for na in [false, true] {
            let row = RowControls::new(na);
            let mut toggled = row.clone();
            toggled.set_row_state(true);
            toggled.set_row_state(false);
            assert_eq!(toggled.snapshot(), row.snapshot(), "na marker = {}", na);
        }
    }
}
