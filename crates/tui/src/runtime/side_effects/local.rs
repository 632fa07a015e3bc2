//! Side effects that stay on this machine: the browser and the state file.

use hub_config::{PersistedState, StateStore};
use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

use crate::action::Action;
use crate::ui::ToastLevel;

use super::{SharedStateStore, TaskTracker};

/// Open `url` in the system browser.
pub fn handle_open_url(tx: Sender<Action>, task_tracker: &TaskTracker, url: String) {
    task_tracker.spawn(async move {
        debug!(url = %url, "opening browser");
        if let Err(e) = open::that_detached(&url) {
            warn!(url = %url, error = %e, "failed to open browser");
            let _ = tx
                .send(Action::Notify(
                    ToastLevel::Warning,
                    format!("Could not open a browser. Visit {} manually.", url),
                ))
                .await;
        }
    });
}

/// Write the display state. Failures are logged; the UI keeps its copy.
pub fn handle_persist_state(
    state_store: SharedStateStore,
    task_tracker: &TaskTracker,
    state: PersistedState,
) {
    task_tracker.spawn(async move {
        let result = tokio::task::spawn_blocking(move || state_store.save(&state)).await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "failed to persist display state"),
            Err(e) => warn!(error = %e, "state persistence task failed"),
        }
    });
}

/// Wait for every tracked task, then write `state` as the final copy.
///
/// In-flight `PersistState` saves finish first, so none of them can
/// overwrite the state the session ended with.
pub async fn drain_and_save(
    task_tracker: &TaskTracker,
    store: &StateStore,
    state: &PersistedState,
) -> anyhow::Result<()> {
    task_tracker.close();
    task_tracker.wait().await;
    store.save(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use hub_config::TabPage;

    use super::*;

    #[tokio::test]
    async fn test_final_save_lands_after_in_flight_saves() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Arc::new(StateStore::new(dir.path().join("state.json")));
        let tracker = TaskTracker::new();

        let mut stale = PersistedState::default();
        stale.tab_shown(TabPage::Home, "old-collapse");
        let slow_store = store.clone();
        tracker.spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            slow_store.save(&stale).expect("stale save");
        });

        let mut last = PersistedState::default();
        last.tab_shown(TabPage::Home, "lab1-collapse");
        drain_and_save(&tracker, &store, &last)
            .await
            .expect("final save");

        assert_eq!(store.load(), last);
    }
}
