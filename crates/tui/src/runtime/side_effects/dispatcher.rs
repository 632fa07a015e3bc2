//! Side effect dispatcher.
//!
//! This module contains the main `handle_side_effects` function that routes
//! effects to their handler functions in submodules.

use std::time::Instant;

use tokio::sync::mpsc::Sender;
use tracing::{Instrument, info_span};

use crate::action::{Action, Effect};
use crate::runtime::side_effects::{
    SharedClient, SharedStateStore, TaskTracker, local, logging, servers,
};
use crate::runtime::streams;

/// Handle one side effect.
///
/// Request effects are spawned on `task_tracker` and report back through
/// `tx`; this function returns as soon as the work is scheduled.
///
/// # Arguments
///
/// * `effect` - The effect to run
/// * `client` - The shared hub client
/// * `tx` - The action channel sender for sending results
/// * `state_store` - Where the display state is persisted
/// * `task_tracker` - Tracker the spawned tasks are registered with
pub async fn handle_side_effects(
    effect: Effect,
    client: SharedClient,
    tx: Sender<Action>,
    state_store: SharedStateStore,
    task_tracker: TaskTracker,
) {
    let start = Instant::now();
    let span = info_span!(
        "tui.handle_effect",
        effect_type = effect.type_name(),
        duration_ms = tracing::field::Empty,
    );

    async move {
        dispatch(effect, client, tx, state_store, task_tracker);
        let duration = start.elapsed().as_millis() as i64;
        tracing::Span::current().record("duration_ms", duration);
    }
    .instrument(span)
    .await;
}

fn dispatch(
    effect: Effect,
    client: SharedClient,
    tx: Sender<Action>,
    state_store: SharedStateStore,
    task_tracker: TaskTracker,
) {
    match effect {
        Effect::LoadServers => servers::handle_load_servers(client, tx, &task_tracker),
        Effect::StartServer {
            name,
            options,
            spawn_url,
            origin,
        } => servers::handle_start_server(
            client,
            tx,
            &task_tracker,
            servers::StartParams {
                name,
                options,
                spawn_url,
                origin,
            },
        ),
        Effect::ServerOperation { name, operation } => {
            servers::handle_server_operation(client, tx, &task_tracker, name, operation)
        }
        Effect::UpdateServer {
            name,
            options,
            revert,
        } => servers::handle_update_server(client, tx, &task_tracker, name, options, revert),
        Effect::SubscribeProgress { name, token } => {
            task_tracker.spawn(streams::progress_listener(client, tx, name, token));
        }
        Effect::OpenUrl(url) => local::handle_open_url(tx, &task_tracker, url),
        Effect::PersistState(state) => {
            local::handle_persist_state(state_store, &task_tracker, state)
        }
        Effect::LoadLogHandlers { service } => {
            logging::handle_load_log_handlers(client, tx, &task_tracker, service)
        }
        Effect::CreateLogHandler { service, handler } => {
            logging::handle_create_log_handler(client, tx, &task_tracker, service, handler)
        }
        Effect::UpdateLogHandler { service, handler } => {
            logging::handle_update_log_handler(client, tx, &task_tracker, service, handler)
        }
        Effect::DeleteLogHandler { service, kind } => {
            logging::handle_delete_log_handler(client, tx, &task_tracker, service, kind)
        }
    }
}
