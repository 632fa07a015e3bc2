//! Notification and progress event listeners.
//!
//! Responsibilities:
//! - Follow the pending-spawner and stop notification channels for the
//!   whole session.
//! - Follow one server's progress channel until its token is cancelled.
//! - Translate event payloads into actions.
//!
//! Does NOT handle:
//! - Deciding which servers to subscribe to (the view-model's registry does).
//! - Decoding the event-stream wire format (see `hub_client::sse`).
//!
//! Invariants:
//! - A listener whose token was cancelled sends nothing more.
//! - A progress listener that ends on its own sends exactly one
//!   `ProgressStreamClosed`.
//! - Unparsable payloads are skipped; the rendered state is untouched.
//! - Only untyped (`message`) events carry payloads; typed events are ignored.
//! - A stream that ends cleanly is reopened after the server's `retry`
//!   delay, or `DEFAULT_SSE_RETRY_MS`.

use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt;
use hub_client::{EventStream, PendingSpawners, ProgressEvent, SseMessage, StopNotifications};
use hub_config::constants::DEFAULT_SSE_RETRY_MS;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::action::Action;
use crate::runtime::side_effects::{SharedClient, TaskTracker};

fn default_retry() -> Duration {
    Duration::from_millis(DEFAULT_SSE_RETRY_MS)
}

/// Start the pending-spawner and stop notification listeners.
///
/// Both run until `shutdown` is cancelled or the action channel closes.
pub fn spawn_notification_listeners(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: &TaskTracker,
    shutdown: CancellationToken,
) {
    let pending_client = client.clone();
    task_tracker.spawn(notification_listener(
        "pending-spawners",
        tx.clone(),
        shutdown.clone(),
        move || {
            let client = pending_client.clone();
            async move { client.pending_spawners_stream().await }
        },
        pending_spawners_actions,
    ));

    task_tracker.spawn(notification_listener(
        "stop-notifications",
        tx,
        shutdown,
        move || {
            let client = client.clone();
            async move { client.stop_notifications_stream().await }
        },
        stop_notification_actions,
    ));
}

/// Every server named in a pending-spawner payload.
pub fn pending_spawners_actions(message: &SseMessage) -> serde_json::Result<Vec<Action>> {
    let payload: PendingSpawners = serde_json::from_str(&message.data)?;
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![Action::PendingSpawners(payload.into_keys().collect())])
}

/// One action per server named in a stop payload.
pub fn stop_notification_actions(message: &SseMessage) -> serde_json::Result<Vec<Action>> {
    let payload: StopNotifications = serde_json::from_str(&message.data)?;
    Ok(payload
        .into_iter()
        .map(|(name, event)| Action::StopNotification { name, event })
        .collect())
}

async fn notification_listener<O, Fut, P>(
    label: &'static str,
    tx: Sender<Action>,
    shutdown: CancellationToken,
    mut open: O,
    parse: P,
) where
    O: FnMut() -> Fut,
    Fut: Future<Output = hub_client::Result<EventStream>>,
    P: Fn(&SseMessage) -> serde_json::Result<Vec<Action>>,
{
    let mut retry = default_retry();
    loop {
        let opened = tokio::select! {
            _ = shutdown.cancelled() => return,
            opened = open() => opened,
        };

        match opened {
            Ok(mut stream) => {
                debug!(listener = label, "notification stream connected");
                loop {
                    let next = tokio::select! {
                        _ = shutdown.cancelled() => return,
                        next = stream.next() => next,
                    };
                    match next {
                        Some(Ok(message)) if !message.is_default_event() => {
                            debug!(
                                listener = label,
                                event = %message.event,
                                "ignoring typed event"
                            );
                        }
                        Some(Ok(message)) => match parse(&message) {
                            Ok(actions) => {
                                for action in actions {
                                    if tx.send(action).await.is_err() {
                                        return;
                                    }
                                }
                            }
                            Err(e) => warn!(
                                listener = label,
                                error = %e,
                                "skipping unparsable notification"
                            ),
                        },
                        Some(Err(e)) => {
                            warn!(listener = label, error = %e, "notification stream interrupted");
                            break;
                        }
                        None => break,
                    }
                }
                if let Some(server_retry) = stream.retry() {
                    retry = server_retry;
                }
            }
            Err(e) if e.is_auth_error() => {
                error!(listener = label, error = %e, "notification stream rejected; giving up");
                return;
            }
            Err(e) => warn!(listener = label, error = %e, "failed to open notification stream"),
        }

        tokio::select! {
            _ = shutdown.cancelled() => return,
            _ = tokio::time::sleep(retry) => {}
        }
    }
}

/// Follow the progress channel of `name` until `token` is cancelled.
///
/// Each (re)connection replays the spawn history, so the first event of a
/// connection is preceded by `ProgressStreamConnected`.
pub async fn progress_listener(
    client: SharedClient,
    tx: Sender<Action>,
    name: String,
    token: CancellationToken,
) {
    let mut retry = default_retry();

    'connect: loop {
        let opened = tokio::select! {
            _ = token.cancelled() => return,
            opened = client.progress_stream(&name) => opened,
        };
        let mut stream = match opened {
            Ok(stream) => stream,
            Err(e) => {
                warn!(server = %name, error = %e, "failed to open progress stream");
                break 'connect;
            }
        };

        let mut first_event = true;
        loop {
            let next = tokio::select! {
                _ = token.cancelled() => return,
                next = stream.next() => next,
            };
            let message = match next {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    debug!(server = %name, error = %e, "progress stream interrupted");
                    break;
                }
                None => break,
            };
            if !message.is_default_event() {
                debug!(server = %name, event = %message.event, "ignoring typed event");
                continue;
            }
            let event: ProgressEvent = match serde_json::from_str(&message.data) {
                Ok(event) => event,
                Err(e) => {
                    warn!(server = %name, error = %e, "skipping unparsable progress event");
                    continue;
                }
            };
            if first_event {
                first_event = false;
                if tx
                    .send(Action::ProgressStreamConnected(name.clone()))
                    .await
                    .is_err()
                {
                    return;
                }
            }
            let update = Action::ProgressUpdate {
                name: name.clone(),
                event,
            };
            if tx.send(update).await.is_err() {
                return;
            }
        }

        if let Some(server_retry) = stream.retry() {
            retry = server_retry;
        }
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(retry) => {}
        }
    }

    let _ = tx.send(Action::ProgressStreamClosed(name)).await;
}
