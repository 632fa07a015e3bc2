//! Scenario tests for the server list view-model.
//!
//! Each test drives `App::update` with the actions the runtime would send
//! and checks the resulting effects and row state. No network is involved.

use std::sync::Arc;

use hub_client::{ClientError, OptionValue, ProgressEvent, UserModel};
use hub_config::{SessionConfig, TabPage};
use hub_tui::action::{Action, Effect, ServerOperation, StartOrigin};
use hub_tui::app::form::FormTab;
use hub_tui::app::progress::ProgressPhase;
use hub_tui::app::row::RowControl;
use hub_tui::app::{App, ConnectionContext};
use hub_tui::ui::ToastLevel;

fn fixture_user() -> UserModel {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../client/fixtures/users/get_user.json");
    let content = std::fs::read_to_string(path).expect("fixture");
    serde_json::from_str(&content).expect("user model")
}

fn new_app() -> App {
    App::new(
        None,
        ConnectionContext {
            base_url: "https://hub.example.org/hub".to_string(),
            user: "alice".to_string(),
            session: SessionConfig::default(),
        },
    )
}

/// App with the fixture servers loaded; returns the load effects too.
fn loaded_app() -> (App, Vec<Effect>) {
    let mut app = new_app();
    assert!(matches!(app.update(Action::LoadServers).as_slice(), [Effect::LoadServers]));
    let effects = app.update(Action::ServersLoaded(Ok(fixture_user())));
    (app, effects)
}

fn api_error(status: u16, message: &str) -> Arc<ClientError> {
    Arc::new(ClientError::ApiError {
        status,
        url: "https://hub.example.org/hub/api".to_string(),
        message: message.to_string(),
    })
}

fn edit(name: Option<&str>, param: &'static str, value: &str) -> Action {
    Action::EditField {
        name: name.map(str::to_string),
        param,
        value: Some(value.to_string()),
    }
}

#[test]
fn test_load_builds_rows_and_subscribes_pending() {
    let (app, effects) = loaded_app();

    assert!(!app.loading);
    assert_eq!(
        app.servers.keys().collect::<Vec<_>>(),
        ["lab1", "lab2", "lab3"]
    );
    assert_eq!(app.servers["lab1"].status(), "running");
    assert!(app.servers["lab1"].row.is_enabled(RowControl::Open));
    assert_eq!(app.servers["lab2"].status(), "starting");
    assert_eq!(app.servers["lab3"].status(), "stopped");
    assert_eq!(app.servers["lab1"].cells.partition, "batch");

    match effects.as_slice() {
        [Effect::SubscribeProgress { name, token }] => {
            assert_eq!(name, "lab2");
            assert!(!token.is_cancelled());
        }
        other => panic!("Expected one subscription, got {:?}", other),
    }
    assert!(app.registry.is_subscribed("lab2"));
    assert_eq!(app.servers["lab2"].progress.phase, ProgressPhase::Pending);
}

#[test]
fn test_reload_keeps_existing_subscription() {
    let (mut app, _) = loaded_app();
    let effects = app.update(Action::ServersLoaded(Ok(fixture_user())));
    assert!(effects.is_empty());
    assert_eq!(app.registry.subscription_count(), 1);
}

#[test]
fn test_new_server_start_serializes_runtime_in_seconds() {
    let mut app = new_app();
    app.update(Action::OpenNewServerDialog);
    app.update(Action::SetNewServerName("lab9".to_string()));
    app.update(edit(None, "type", "JupyterLab/3.6"));
    app.update(edit(None, "system", "JUWELS"));
    app.update(edit(None, "nodes", "2"));
    app.update(edit(None, "runtime", "30"));

    let effects = app.update(Action::StartNewServer);
    match effects.as_slice() {
        [Effect::StartServer {
            name,
            options,
            spawn_url,
            origin,
        }] => {
            assert_eq!(name, "lab9");
            assert_eq!(*origin, StartOrigin::NewServerDialog);
            assert_eq!(options["resource_Runtime"], OptionValue::Integer(1800));
            assert_eq!(options["resource_Nodes"], OptionValue::from("2"));
            assert_eq!(options["service_input"], OptionValue::from("JupyterLab"));
            assert!(spawn_url.starts_with("https://hub.example.org/hub/spawn/alice/lab9?"));
            assert!(spawn_url.contains("resource_Runtime=1800"));
            assert!(spawn_url.contains("resource_Nodes=2"));
        }
        other => panic!("Expected StartServer, got {:?}", other),
    }

    let dialog = app.new_server.as_ref().expect("dialog stays open");
    assert!(dialog.busy);
    assert!(app.update(Action::StartNewServer).is_empty(), "busy dialog ignores starts");

    let effects = app.update(Action::StartFinished {
        name: "lab9".to_string(),
        spawn_url: "https://hub.example.org/hub/spawn/alice/lab9".to_string(),
        origin: StartOrigin::NewServerDialog,
        result: Ok(()),
    });
    assert!(app.new_server.is_none());
    assert!(matches!(
        effects.as_slice(),
        [Effect::OpenUrl(url), Effect::LoadServers] if url.ends_with("/lab9")
    ));
}

#[test]
fn test_new_server_without_name_gets_default_name() {
    let mut app = new_app();
    app.update(Action::OpenNewServerDialog);
    app.update(edit(None, "type", "JupyterLab/3.6"));
    app.update(edit(None, "system", "JUWELS"));
    app.update(edit(None, "nodes", "1"));
    app.update(edit(None, "runtime", "60"));

    let effects = app.update(Action::StartNewServer);
    assert!(matches!(
        effects.as_slice(),
        [Effect::StartServer { name, .. }] if name == "jupyterlab_1"
    ));
}

#[test]
fn test_validation_blocks_start_and_reveals_field() {
    let mut app = new_app();
    app.update(Action::OpenNewServerDialog);
    app.update(edit(None, "type", "JupyterLab/3.6"));

    assert!(app.update(Action::StartNewServer).is_empty());
    let dialog = app.new_server.as_ref().expect("dialog");
    assert!(!dialog.busy);
    assert_eq!(dialog.active_tab, FormTab::Options);
    assert_eq!(dialog.focused_field, Some("system"));
    let alert = dialog.alert.as_ref().expect("alert");
    assert_eq!(alert.level, ToastLevel::Error);
}

#[test]
fn test_row_start_locks_row_then_subscribes() {
    let (mut app, _) = loaded_app();

    let effects = app.update(Action::StartServer("lab3".to_string()));
    match effects.as_slice() {
        [Effect::StartServer { name, options, .. }] => {
            assert_eq!(name, "lab3");
            assert_eq!(options["resource_GPUS"], OptionValue::from("4"));
            assert!(!options.contains_key("resource_Runtime"), "hidden inputs are not sent");
        }
        other => panic!("Expected StartServer, got {:?}", other),
    }
    assert!(app.servers["lab3"].spawn_pending);
    assert!(app.servers["lab3"].row.is_running());

    let effects = app.update(Action::StartFinished {
        name: "lab3".to_string(),
        spawn_url: "https://hub.example.org/hub/spawn/alice/lab3".to_string(),
        origin: StartOrigin::Row,
        result: Ok(()),
    });
    assert!(matches!(
        effects.as_slice(),
        [Effect::OpenUrl(_), Effect::SubscribeProgress { name, .. }] if name == "lab3"
    ));

    app.update(Action::ProgressStreamConnected("lab3".to_string()));
    app.update(Action::ProgressUpdate {
        name: "lab3".to_string(),
        event: ProgressEvent {
            progress: Some(100),
            ready: true,
            url: Some("/user/alice/lab3/".to_string()),
            ..ProgressEvent::default()
        },
    });
    let entry = &app.servers["lab3"];
    assert_eq!(entry.progress.phase, ProgressPhase::Succeeded);
    assert!(entry.row.is_enabled(RowControl::Open));
    assert!(entry.row.is_enabled(RowControl::Stop));
    assert_eq!(entry.url.as_deref(), Some("/user/alice/lab3/"));

    let effects = app.update(Action::OpenServer("lab3".to_string()));
    assert!(matches!(
        effects.as_slice(),
        [Effect::OpenUrl(url)] if url == "https://hub.example.org/user/alice/lab3/"
    ));
}

#[test]
fn test_row_start_failure_shows_status_inline() {
    let (mut app, _) = loaded_app();
    app.update(Action::StartServer("lab3".to_string()));

    let effects = app.update(Action::StartFinished {
        name: "lab3".to_string(),
        spawn_url: String::new(),
        origin: StartOrigin::Row,
        result: Err(api_error(400, "Bad Request")),
    });
    assert!(effects.is_empty());

    let entry = &app.servers["lab3"];
    assert!(!entry.row.is_running());
    assert!(entry.row.is_enabled(RowControl::Start));
    assert_eq!(entry.progress.phase, ProgressPhase::Failed);
    let alert = entry.alert.as_ref().expect("alert");
    assert_eq!(alert.message, "Could not request spawn. Error: 400 Bad Request");
}

#[test]
fn test_locked_row_ignores_second_request() {
    let (mut app, _) = loaded_app();
    assert_eq!(app.update(Action::DeleteServer("lab3".to_string())).len(), 1);
    assert!(app.update(Action::DeleteServer("lab3".to_string())).is_empty());
    assert!(app.update(Action::StartServer("lab3".to_string())).is_empty());
}

#[test]
fn test_failed_operation_restores_row() {
    let (mut app, _) = loaded_app();
    app.update(Action::StopServer("lab1".to_string()));
    assert!(app.servers["lab1"].row.is_locked());

    app.update(Action::ServerOperationFinished {
        name: "lab1".to_string(),
        operation: ServerOperation::Stop,
        result: Err(api_error(500, "Internal Server Error")),
    });
    let entry = &app.servers["lab1"];
    assert!(!entry.row.is_locked());
    assert!(entry.row.is_enabled(RowControl::Stop));
    assert!(entry.alert.as_ref().is_some_and(|a| a.message.contains("500")));
}

#[test]
fn test_delete_removes_row_and_subscription() {
    let (mut app, _) = loaded_app();

    let effects = app.update(Action::PendingSpawners(vec!["lab3".to_string()]));
    let token = match effects.as_slice() {
        [Effect::SubscribeProgress { name, token }] if name == "lab3" => token.clone(),
        other => panic!("Expected subscription, got {:?}", other),
    };
    app.update(Action::StopNotification {
        name: "lab3".to_string(),
        event: None,
    });
    assert!(!app.servers["lab3"].row.is_running());

    assert!(matches!(
        app.update(Action::DeleteServer("lab3".to_string())).as_slice(),
        [Effect::ServerOperation {
            operation: ServerOperation::Delete,
            ..
        }]
    ));
    app.update(Action::ServerOperationFinished {
        name: "lab3".to_string(),
        operation: ServerOperation::Delete,
        result: Ok(()),
    });

    assert!(!app.servers.contains_key("lab3"));
    assert!(!app.registry.is_subscribed("lab3"));
    assert!(token.is_cancelled());
    assert!(app.registry.snapshot("lab3").is_none());
    assert!(app
        .toasts
        .iter()
        .any(|t| t.level == ToastLevel::Success && t.message.contains("lab3")));
}

#[test]
fn test_change_tracking_enables_save() {
    let (mut app, _) = loaded_app();
    let lab1 = Some("lab1");

    app.update(edit(lab1, "nodes", "3"));
    assert!(app.servers["lab1"].save_enabled);

    // "2" equals the stored string and 30 minutes equals 1800 seconds.
    app.update(edit(lab1, "nodes", "2"));
    app.update(edit(lab1, "runtime", "30"));
    assert!(!app.servers["lab1"].save_enabled);

    app.update(edit(lab1, "runtime", "45"));
    let effects = app.update(Action::SaveChanges("lab1".to_string()));
    let options = match effects.as_slice() {
        [Effect::UpdateServer {
            name,
            options,
            revert: false,
        }] if name == "lab1" => options.clone(),
        other => panic!("Expected UpdateServer, got {:?}", other),
    };
    assert_eq!(options["resource_Runtime"], OptionValue::Integer(2700));

    app.update(Action::UpdateFinished {
        name: "lab1".to_string(),
        options: options.clone(),
        revert: false,
        result: Ok(()),
    });
    let entry = &app.servers["lab1"];
    assert!(!entry.save_enabled);
    assert!(!entry.row.is_locked());
    assert_eq!(app.registry.snapshot("lab1"), Some(&options));
}

#[test]
fn test_revert_restores_stored_values() {
    let (mut app, _) = loaded_app();
    app.update(edit(Some("lab1"), "nodes", "8"));

    let effects = app.update(Action::RevertChanges("lab1".to_string()));
    let options = match effects.as_slice() {
        [Effect::UpdateServer {
            options,
            revert: true,
            ..
        }] => options.clone(),
        other => panic!("Expected revert UpdateServer, got {:?}", other),
    };
    assert_eq!(options["resource_Nodes"], OptionValue::from("2"));

    app.update(Action::UpdateFinished {
        name: "lab1".to_string(),
        options,
        revert: true,
        result: Ok(()),
    });
    let entry = &app.servers["lab1"];
    assert_eq!(entry.form.value("nodes"), Some("2"));
    assert_eq!(entry.active_tab, FormTab::Service);
    assert!(!entry.save_enabled);
}

#[test]
fn test_unknown_pending_server_triggers_reload() {
    let (mut app, _) = loaded_app();
    let effects = app.update(Action::PendingSpawners(vec!["fresh".to_string()]));
    assert!(matches!(effects.as_slice(), [Effect::LoadServers]));
    assert!(app.loading);

    // A reload already in flight is not duplicated.
    assert!(app
        .update(Action::PendingSpawners(vec!["other".to_string()]))
        .is_empty());
}

#[test]
fn test_closed_progress_stream_allows_resubscribe() {
    let (mut app, _) = loaded_app();
    app.update(Action::ProgressStreamClosed("lab2".to_string()));
    assert!(!app.registry.is_subscribed("lab2"));

    let effects = app.update(Action::PendingSpawners(vec!["lab2".to_string()]));
    assert!(matches!(
        effects.as_slice(),
        [Effect::SubscribeProgress { name, .. }] if name == "lab2"
    ));
}

#[test]
fn test_failed_progress_event_stops_row() {
    let (mut app, _) = loaded_app();
    app.update(Action::ProgressUpdate {
        name: "lab2".to_string(),
        event: ProgressEvent {
            progress: Some(100),
            failed: true,
            message: Some("Spawn failed: no allocation".to_string()),
            ..ProgressEvent::default()
        },
    });
    let entry = &app.servers["lab2"];
    assert_eq!(entry.progress.phase, ProgressPhase::Failed);
    assert!(!entry.spawn_pending);
    assert!(entry.row.is_enabled(RowControl::Start));
}

#[test]
fn test_toggle_row_persists_open_panel() {
    let (mut app, _) = loaded_app();
    let effects = app.update(Action::ToggleRow("lab1".to_string()));
    match effects.as_slice() {
        [Effect::PersistState(state)] => {
            assert_eq!(state.open_tabs(TabPage::Home), ["lab1-collapse"]);
        }
        other => panic!("Expected PersistState, got {:?}", other),
    }
    assert!(app.servers["lab1"].expanded);

    // Reloading keeps the panel open.
    app.update(Action::ServersLoaded(Ok(fixture_user())));
    assert!(app.servers["lab1"].expanded);
}

#[test]
fn test_default_server_is_not_listed() {
    let mut user = fixture_user();
    let mut default_server = user.servers["lab3"].clone();
    default_server.name = String::new();
    user.servers.insert(String::new(), default_server);

    let mut app = new_app();
    app.update(Action::ServersLoaded(Ok(user)));
    assert_eq!(app.servers.len(), 3);
}
