//! Action enum definitions for the TUI event system.
//!
//! Actions represent user intents, terminal input and the results of async
//! requests and event streams. They all flow through one channel into
//! `App::update`.
//!
//! # Action Categories
//!
//! - **System**: lifecycle, input, ticks, notifications
//! - **Intents**: one per user gesture on a server row or panel
//! - **Results**: responses to requests issued by side effects
//! - **Streams**: pending-spawner, stop and progress notifications
//! - **Logging**: handler administration screen
//!
//! # What This Module Does NOT Handle
//!
//! - Action handling logic (see `App::update`)
//! - Async task execution (see `runtime::side_effects`)

use std::sync::Arc;

use crossterm::event::{KeyEvent, MouseEvent};
use hub_client::{ClientError, HandlerKind, LogHandler, ProgressEvent, UserModel, UserOptions};

use crate::app::form::FormTab;
use crate::app::state::CurrentScreen;
use crate::ui::ToastLevel;

/// Where a start request was issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOrigin {
    /// The start control of an existing row.
    Row,
    /// The "new server" dialog.
    NewServerDialog,
}

/// Mutating request kind, used in result actions and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerOperation {
    Stop,
    Cancel,
    Delete,
}

impl ServerOperation {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
        }
    }
}

/// Logging handler request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOperation {
    Create,
    Update,
    Delete,
}

impl HandlerOperation {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Create => "Created",
            Self::Update => "Updated",
            Self::Delete => "Deleted",
        }
    }
}

/// Result type carried by actions; errors are shared so actions stay `Clone`.
pub type ActionResult<T> = Result<T, Arc<ClientError>>;

/// Unified action type for async TUI event handling.
#[derive(Debug, Clone)]
pub enum Action {
    // System
    Quit,
    Input(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    Notify(ToastLevel, String),
    SwitchScreen(CurrentScreen),

    // Navigation
    NextServer,
    PreviousServer,

    // Server intents
    LoadServers,
    StartServer(String),
    StartNewServer,
    OpenNewServerDialog,
    CloseNewServerDialog,
    StopServer(String),
    CancelServer(String),
    DeleteServer(String),
    SaveChanges(String),
    RevertChanges(String),
    OpenServer(String),
    ShowProgressLog(String),
    ToggleRow(String),
    /// Set a configuration field of a server, or of the new-server dialog
    /// when `name` is `None`.
    EditField {
        name: Option<String>,
        param: &'static str,
        value: Option<String>,
    },
    FocusField {
        name: Option<String>,
        param: &'static str,
    },
    ClickTab {
        name: Option<String>,
        tab: FormTab,
    },
    SetNewServerName(String),

    // Server results
    ServersLoaded(ActionResult<UserModel>),
    StartFinished {
        name: String,
        spawn_url: String,
        origin: StartOrigin,
        result: ActionResult<()>,
    },
    ServerOperationFinished {
        name: String,
        operation: ServerOperation,
        result: ActionResult<()>,
    },
    UpdateFinished {
        name: String,
        options: UserOptions,
        revert: bool,
        result: ActionResult<()>,
    },

    // Streams
    PendingSpawners(Vec<String>),
    StopNotification {
        name: String,
        event: Option<ProgressEvent>,
    },
    ProgressStreamConnected(String),
    ProgressUpdate {
        name: String,
        event: ProgressEvent,
    },
    ProgressStreamClosed(String),

    // Logging handlers
    LoadLogHandlers,
    LogHandlersLoaded(ActionResult<Vec<LogHandler>>),
    NextLogHandler,
    PreviousLogHandler,
    CycleLogLevel(HandlerKind),
    CreateLogHandler(HandlerKind),
    UpdateLogHandler(HandlerKind),
    DeleteLogHandler(HandlerKind),
    LogHandlerOperationFinished {
        kind: HandlerKind,
        operation: HandlerOperation,
        result: ActionResult<()>,
    },
}
