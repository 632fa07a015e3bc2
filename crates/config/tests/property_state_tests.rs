//! Property-based tests for persisted tab state and loader normalization.
//!
//! Test coverage:
//! - PersistedState: shown/hidden sequences never produce duplicates
//! - PersistedState: the last operation on an id decides whether it is present
//! - StateStore: save/load preserves any state
//! - ConfigLoader: base URLs are normalized without a trailing slash

use proptest::prelude::*;
use tempfile::TempDir;

use hub_config::{ConfigLoader, PersistedState, StateStore, TabPage};

fn tab_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("lab1".to_string()),
        Just("lab2".to_string()),
        Just("jupyterlab_1".to_string()),
        "[a-z][a-z0-9_]{0,8}",
    ]
}

fn page_strategy() -> impl Strategy<Value = TabPage> {
    prop_oneof![Just(TabPage::Home), Just(TabPage::Spawn)]
}

proptest! {
    #[test]
    fn prop_tab_lists_have_no_duplicates(
        ops in prop::collection::vec((page_strategy(), tab_id_strategy(), any::<bool>()), 0..40)
    ) {
        let mut state = PersistedState::default();
        for (page, id, shown) in &ops {
            if *shown {
                state.tab_shown(*page, id);
            } else {
                state.tab_hidden(*page, id);
            }
        }
        for page in [TabPage::Home, TabPage::Spawn] {
            let tabs = state.open_tabs(page);
            let mut sorted = tabs.to_vec();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), tabs.len());
        }
    }

    #[test]
    fn prop_last_operation_wins(
        ops in prop::collection::vec((tab_id_strategy(), any::<bool>()), 1..30)
    ) {
        let mut state = PersistedState::default();
        for (id, shown) in &ops {
            if *shown {
                state.tab_shown(TabPage::Home, id);
            } else {
                state.tab_hidden(TabPage::Home, id);
            }
        }
        for (id, _) in &ops {
            let last = ops.iter().rev().find(|(other, _)| other == id).map(|(_, s)| *s);
            let present = state.open_tabs(TabPage::Home).contains(id);
            prop_assert_eq!(Some(present), last);
        }
    }

    #[test]
    fn prop_store_round_trip(
        home in prop::collection::vec(tab_id_strategy(), 0..6),
        spawn in prop::collection::vec(tab_id_strategy(), 0..6),
    ) {
        let mut state = PersistedState::default();
        for id in &home {
            state.tab_shown(TabPage::Home, id);
        }
        for id in &spawn {
            state.tab_shown(TabPage::Spawn, id);
        }
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        store.save(&state).unwrap();
        prop_assert_eq!(store.load(), state);
    }

    #[test]
    fn prop_base_url_has_no_trailing_slash(
        host in "[a-z]{1,10}",
        prefix in prop_oneof![Just(""), Just("/hub"), Just("/jupyter/hub")],
        slashes in 0usize..3,
    ) {
        let url = format!("https://{host}.example.org{prefix}{}", "/".repeat(slashes));
        let config = ConfigLoader::new()
            .with_base_url(url)
            .with_user("alice".to_string())
            .with_api_token("tok".to_string())
            .build()
            .unwrap();
        prop_assert!(!config.connection.base_url.ends_with('/'));
        prop_assert!(config.connection.base_url.starts_with("https://"));
    }
}
