//! Persisted open-panel lists.
//!
//! Responsibilities:
//! - Define `PersistedState`, the ordered list of open panel ids per page.
//! - Apply "shown" and "hidden" notifications to those lists.
//!
//! Does NOT handle:
//! - Reading or writing files (see store.rs).
//!
//! Invariants:
//! - Serialized key names are exactly `homeTabs` and `spawnTabs`.
//! - A list never contains the same id twice; insertion order is preserved.
//! - Each page reads and writes only its own list.

use serde::{Deserialize, Serialize};

/// Page whose open panels are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabPage {
    /// Server list page.
    Home,
    /// Spawn options page.
    Spawn,
}

/// Display preferences that persist across application runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    #[serde(rename = "homeTabs")]
    pub home_tabs: Vec<String>,
    #[serde(rename = "spawnTabs")]
    pub spawn_tabs: Vec<String>,
}

impl PersistedState {
    fn tabs_mut(&mut self, page: TabPage) -> &mut Vec<String> {
        match page {
            TabPage::Home => &mut self.home_tabs,
            TabPage::Spawn => &mut self.spawn_tabs,
        }
    }

    /// Ordered ids of the panels open on `page`.
    pub fn open_tabs(&self, page: TabPage) -> &[String] {
        match page {
            TabPage::Home => &self.home_tabs,
            TabPage::Spawn => &self.spawn_tabs,
        }
    }

    /// Record that panel `id` was shown. Returns true if the list changed.
    pub fn tab_shown(&mut self, page: TabPage, id: &str) -> bool {
        let tabs = self.tabs_mut(page);
        if tabs.iter().any(|t| t == id) {
            return false;
        }
        tabs.push(id.to_string());
        true
    }

    /// Record that panel `id` was hidden. Returns true if the list changed.
    pub fn tab_hidden(&mut self, page: TabPage, id: &str) -> bool {
        let tabs = self.tabs_mut(page);
        let before = tabs.len();
        tabs.retain(|t| t != id);
        tabs.len() != before
    }

    /// Drop ids that no longer correspond to a known panel.
    pub fn retain_known<'a>(&mut self, page: TabPage, known: impl IntoIterator<Item = &'a str>) {
        let known: Vec<&str> = known.into_iter().collect();
        self.tabs_mut(page).retain(|t| known.contains(&t.as_str()));
    }
}
