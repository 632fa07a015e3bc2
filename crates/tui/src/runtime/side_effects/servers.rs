//! Named-server side effect handlers.
//!
//! Responsibilities:
//! - Load the user model with its servers.
//! - Start, stop, cancel and delete servers, and update their options.
//!
//! Does NOT handle:
//! - Direct state modification (sends actions for that).
//! - Opening the spawn page (the view-model asks for that separately).

use std::sync::Arc;

use hub_client::UserOptions;
use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

use crate::action::{Action, ServerOperation, StartOrigin};

use super::{SharedClient, TaskTracker};

/// Parameters of a start request.
pub struct StartParams {
    pub name: String,
    pub options: UserOptions,
    pub spawn_url: String,
    pub origin: StartOrigin,
}

/// Handle loading the user's servers.
pub fn handle_load_servers(client: SharedClient, tx: Sender<Action>, task_tracker: &TaskTracker) {
    task_tracker.spawn(async move {
        let result = client.get_user().await.map_err(Arc::new);
        if let Err(e) = &result {
            warn!(error = %e, "loading servers failed");
        }
        let _ = tx.send(Action::ServersLoaded(result)).await;
    });
}

/// Handle a start request from a row or the new-server dialog.
pub fn handle_start_server(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: &TaskTracker,
    params: StartParams,
) {
    task_tracker.spawn(async move {
        let StartParams {
            name,
            options,
            spawn_url,
            origin,
        } = params;
        debug!(server = %name, options = options.len(), "requesting spawn");
        let result = client.start_server(&name, &options).await.map_err(Arc::new);
        let _ = tx
            .send(Action::StartFinished {
                name,
                spawn_url,
                origin,
                result,
            })
            .await;
    });
}

/// Handle stop, cancel or delete of one server.
pub fn handle_server_operation(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: &TaskTracker,
    name: String,
    operation: ServerOperation,
) {
    task_tracker.spawn(async move {
        let result = match operation {
            ServerOperation::Stop => client.stop_server(&name).await,
            ServerOperation::Cancel => client.cancel_server(&name, None).await,
            ServerOperation::Delete => client.delete_server(&name).await,
        }
        .map_err(Arc::new);
        if let Err(e) = &result {
            warn!(
                server = %name,
                operation = operation.verb(),
                error = %e,
                "server request failed"
            );
        }
        let _ = tx
            .send(Action::ServerOperationFinished {
                name,
                operation,
                result,
            })
            .await;
    });
}

/// Handle saving (or reverting to) a server's options.
pub fn handle_update_server(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: &TaskTracker,
    name: String,
    options: UserOptions,
    revert: bool,
) {
    task_tracker.spawn(async move {
        let result = client
            .update_server_options(&name, &options)
            .await
            .map_err(Arc::new);
        let _ = tx
            .send(Action::UpdateFinished {
                name,
                options,
                revert,
                result,
            })
            .await;
    });
}
