//! Logging handler side effect handlers.

use std::sync::Arc;

use hub_client::{HandlerKind, LogHandler};
use tokio::sync::mpsc::Sender;

use crate::action::{Action, HandlerOperation};

use super::{SharedClient, TaskTracker};

/// Handle loading the handlers of `service`.
pub fn handle_load_log_handlers(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: &TaskTracker,
    service: String,
) {
    task_tracker.spawn(async move {
        let result = client.list_log_handlers(&service).await.map_err(Arc::new);
        let _ = tx.send(Action::LogHandlersLoaded(result)).await;
    });
}

pub fn handle_create_log_handler(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: &TaskTracker,
    service: String,
    handler: LogHandler,
) {
    task_tracker.spawn(async move {
        let kind = handler.handler;
        let result = client
            .create_log_handler(&service, &handler)
            .await
            .map_err(Arc::new);
        let _ = tx
            .send(Action::LogHandlerOperationFinished {
                kind,
                operation: HandlerOperation::Create,
                result,
            })
            .await;
    });
}

pub fn handle_update_log_handler(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: &TaskTracker,
    service: String,
    handler: LogHandler,
) {
    task_tracker.spawn(async move {
        let kind = handler.handler;
        let result = client
            .update_log_handler(&service, &handler)
            .await
            .map_err(Arc::new);
        let _ = tx
            .send(Action::LogHandlerOperationFinished {
                kind,
                operation: HandlerOperation::Update,
                result,
            })
            .await;
    });
}

pub fn handle_delete_log_handler(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: &TaskTracker,
    service: String,
    kind: HandlerKind,
) {
    task_tracker.spawn(async move {
        let result = client
            .delete_log_handler(&service, kind)
            .await
            .map_err(Arc::new);
        let _ = tx
            .send(Action::LogHandlerOperationFinished {
                kind,
                operation: HandlerOperation::Delete,
                result,
            })
            .await;
    });
}
