//! Property tests for the view-model.
//!
//! - Any sequence of navigation keeps the table cursor on an existing row.
//! - A start is emitted for a row at most once until its result arrives.
//! - Runtime entered in whole minutes is always sent as minutes * 60.
//! - Hidden fields never reach the option set or the query string.
//! - Setting a row running and back restores its control layout.

use hub_client::{OptionValue, ServerModel, UserModel};
use hub_tui::action::{Action, Effect};
use hub_tui::app::App;
use hub_tui::app::form::{FIELD_ORDER, ServerForm, runtime_seconds};
use hub_tui::app::row::RowControls;
use proptest::prelude::*;

fn user_with(count: usize) -> UserModel {
    let mut user = UserModel {
        name: "alice".to_string(),
        ..UserModel::default()
    };
    for i in 0..count {
        let name = format!("lab{}", i);
        let mut model = ServerModel {
            name: name.clone(),
            ..ServerModel::default()
        };
        model
            .user_options
            .insert("options_input".to_string(), OptionValue::from("JupyterLab/3.6"));
        model
            .user_options
            .insert("system_input".to_string(), OptionValue::from("JUWELS"));
        user.servers.insert(name, model);
    }
    user
}

#[derive(Debug, Clone)]
enum Nav {
    Next,
    Previous,
    Reload(usize),
}

fn nav_strategy() -> impl Strategy<Value = Nav> {
    prop_oneof![
        Just(Nav::Next),
        Just(Nav::Previous),
        (0usize..6).prop_map(Nav::Reload),
    ]
}

proptest! {
    #[test]
    fn prop_selection_stays_in_bounds(
        initial in 0usize..6,
        steps in prop::collection::vec(nav_strategy(), 0..40),
    ) {
        let mut app = App::default();
        app.update(Action::ServersLoaded(Ok(user_with(initial))));

        for step in steps {
            let action = match step {
                Nav::Next => Action::NextServer,
                Nav::Previous => Action::PreviousServer,
                Nav::Reload(n) => Action::ServersLoaded(Ok(user_with(n))),
            };
            app.update(action);

            match app.servers_state.selected() {
                Some(i) => prop_assert!(i < app.servers.len()),
                None => prop_assert!(app.servers.is_empty()),
            }
        }
    }

    #[test]
    fn prop_start_is_emitted_once_per_request(presses in 1usize..8) {
        let mut app = App::default();
        app.update(Action::ServersLoaded(Ok(user_with(1))));

        let starts: usize = (0..presses)
            .map(|_| app.update(Action::StartServer("lab0".to_string())))
            .map(|effects| {
                effects
                    .iter()
                    .filter(|e| matches!(e, Effect::StartServer { .. }))
                    .count()
            })
            .sum();
        prop_assert_eq!(starts, 1);
    }

    #[test]
    fn prop_runtime_minutes_to_seconds(minutes in 1i64..100_000) {
        let mut form = ServerForm::new();
        form.set_value("runtime", Some(minutes.to_string()));
        let options = form.to_user_options(None);
        prop_assert_eq!(
            options.get("resource_Runtime"),
            Some(&OptionValue::Integer(minutes * 60))
        );
        prop_assert_eq!(
            runtime_seconds(&minutes.to_string()),
            Some(OptionValue::Integer(minutes * 60))
        );
    }

    #[test]
    fn prop_hidden_fields_never_serialize(
        hidden in prop::collection::vec(any::<bool>(), FIELD_ORDER.len()),
        value in "[A-Za-z0-9]{1,8}",
    ) {
        let mut form = ServerForm::new();
        for (field, hide) in FIELD_ORDER.iter().zip(&hidden) {
            form.set_value(field.param, Some(value.clone()));
            form.set_hidden(field.param, *hide);
        }

        let options = form.to_user_options(None);
        let query = form.to_query_string(None);
        for (field, hide) in FIELD_ORDER.iter().zip(&hidden) {
            let key = field.target_key;
            if *hide {
                prop_assert!(!options.contains_key(key), "{} leaked into options", key);
                let needle = format!("{}=", key);
                prop_assert!(!query.contains(&needle), "{} leaked into query", key);
            }
        }
    }

    #[test]
    fn prop_row_state_round_trip(not_applicable in any::<bool>(), locked in any::<bool>()) {
        let mut row = RowControls::new(not_applicable);
        if locked {
            row.disable_row();
            row.set_row_state(false);
        }
        let before = row.snapshot();

        row.set_row_state(true);
        row.set_row_state(false);
        prop_assert_eq!(row.snapshot(), before);
    }
}
