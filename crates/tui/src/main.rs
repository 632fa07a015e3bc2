//! Hub TUI - terminal user interface for named notebook servers.
//!
//! Responsibilities:
//! - Orchestrate application startup and shutdown.
//! - Initialize terminal, logging, and async runtime.
//! - Run the main event loop.
//!
//! Does NOT handle:
//! - REST or event-stream plumbing (see `crates/client`).
//! - Configuration parsing (see `crates/config`).
//! - Async API calls (see `runtime::side_effects`).
//!
//! Invariants:
//! - The TUI enters raw mode and alternate screen on startup.
//! - `load_dotenv()` is called at startup to support `.env` configuration.
//! - Configuration precedence: CLI args > env vars > `.env` file > defaults.
//! - Mouse capture is enabled by default unless `--no-mouse` is specified.
//! - Cancelling the session token stops every listener and the input reader.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc::{Sender, channel, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, prelude::*};

use hub_config::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_UI_TICK_MS};
use hub_tui::action::{Action, RedactedAction};
use hub_tui::app::{App, ConnectionContext};
use hub_tui::cli::Cli;
use hub_tui::runtime::{
    client::create_client,
    config::{load_config, load_persisted_state, log_filter, state_store},
    side_effects::{TaskTracker, drain_and_save, handle_side_effects},
    streams::spawn_notification_listeners,
    terminal,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "hub-tui.log");
    // The guard must live for the whole of main() so buffered logs are flushed.
    let (non_blocking, _guard) = non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(log_filter())
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    let config = load_config(&cli)?;
    let store = Arc::new(state_store(&config)?);
    let persisted = load_persisted_state(&cli, &store);
    let client = create_client(&config)?;
    tracing::info!(base_url = %config.connection.base_url, user = %config.user, "starting hub-tui");

    let connection_ctx = ConnectionContext {
        base_url: client.base_url().to_string(),
        user: config.user.clone(),
        session: config.session.clone(),
    };

    let session = CancellationToken::new();
    let mut app = App::with_session_token(persisted, connection_ctx, session.clone());

    let task_tracker = TaskTracker::new();
    let (tx, mut rx) = channel::<Action>(DEFAULT_CHANNEL_CAPACITY);

    spawn_notification_listeners(client.clone(), tx.clone(), &task_tracker, session.clone());
    task_tracker.spawn(read_terminal_events(tx.clone(), session.clone()));

    let (mut terminal, _terminal_guard) = terminal::enter(cli.no_mouse)?;

    for effect in app.update(Action::LoadServers) {
        handle_side_effects(
            effect,
            client.clone(),
            tx.clone(),
            store.clone(),
            task_tracker.clone(),
        )
        .await;
    }

    let mut tick_interval = tokio::time::interval(Duration::from_millis(DEFAULT_UI_TICK_MS));

    loop {
        terminal.draw(|f| app.render(f))?;

        tokio::select! {
            Some(action) = rx.recv() => {
                let action = match action {
                    Action::Input(key) => match app.handle_input(key) {
                        Some(a) => a,
                        None => continue,
                    },
                    Action::Mouse(mouse) if !cli.no_mouse => match app.handle_mouse(mouse) {
                        Some(a) => a,
                        None => continue,
                    },
                    Action::Mouse(_) => continue,
                    other => other,
                };

                tracing::debug!(action = ?RedactedAction(&action), "handling action");
                let quit = matches!(action, Action::Quit);
                for effect in app.update(action) {
                    handle_side_effects(
                        effect,
                        client.clone(),
                        tx.clone(),
                        store.clone(),
                        task_tracker.clone(),
                    )
                    .await;
                }
                if quit {
                    break;
                }
            }
            _ = tick_interval.tick() => {
                app.update(Action::Tick);
            }
        }
    }

    // Quit already cancelled the session; make sure of it before waiting.
    session.cancel();

    // Pending sends fail instead of blocking the tasks we wait for.
    drop(rx);
    if let Err(e) = drain_and_save(&task_tracker, &store, &app.persisted).await {
        tracing::error!(error = %e, "Failed to persist state on exit");
    }

    terminal.show_cursor()?;
    Ok(())
}

/// Forward terminal events to the action channel until the session ends.
async fn read_terminal_events(tx: Sender<Action>, session: CancellationToken) {
    let mut reader = EventStream::new();
    loop {
        let event = tokio::select! {
            _ = session.cancelled() => break,
            event = reader.next() => event,
        };
        let Some(event) = event else { break };
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "terminal event error");
                continue;
            }
        };

        match event {
            // Key and resize events carry user intent and are never dropped.
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if tx.send(Action::Input(key)).await.is_err() {
                    break;
                }
            }
            Event::Resize(width, height) => {
                if tx.send(Action::Resize(width, height)).await.is_err() {
                    break;
                }
            }
            Event::Mouse(mouse) => match tx.try_send(Action::Mouse(mouse)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::debug!("Input channel full, dropping mouse event");
                }
                Err(TrySendError::Closed(_)) => break,
            },
            _ => {}
        }
    }
}
