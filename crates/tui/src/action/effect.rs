//! Side effects requested by `App::update`.
//!
//! An effect is the only way the view-model reaches the outside world. The
//! runtime executes each effect on a background task and reports back with
//! an [`Action`](crate::action::Action).

use hub_client::{HandlerKind, LogHandler, UserOptions};
use hub_config::PersistedState;
use tokio_util::sync::CancellationToken;

use crate::action::variants::{ServerOperation, StartOrigin};

#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch the user model with all named servers.
    LoadServers,
    StartServer {
        name: String,
        options: UserOptions,
        spawn_url: String,
        origin: StartOrigin,
    },
    ServerOperation {
        name: String,
        operation: ServerOperation,
    },
    UpdateServer {
        name: String,
        options: UserOptions,
        revert: bool,
    },
    /// Start a progress listener for `name` that runs until `token` is cancelled.
    SubscribeProgress {
        name: String,
        token: CancellationToken,
    },
    OpenUrl(String),
    PersistState(PersistedState),
    LoadLogHandlers {
        service: String,
    },
    CreateLogHandler {
        service: String,
        handler: LogHandler,
    },
    UpdateLogHandler {
        service: String,
        handler: LogHandler,
    },
    DeleteLogHandler {
        service: String,
        kind: HandlerKind,
    },
}

impl Effect {
    /// Short name for tracing; never includes option values or handler settings.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::LoadServers => "LoadServers",
            Self::StartServer { .. } => "StartServer",
            Self::ServerOperation {
                operation: ServerOperation::Stop,
                ..
            } => "StopServer",
            Self::ServerOperation {
                operation: ServerOperation::Cancel,
                ..
            } => "CancelServer",
            Self::ServerOperation {
                operation: ServerOperation::Delete,
                ..
            } => "DeleteServer",
            Self::UpdateServer { .. } => "UpdateServer",
            Self::SubscribeProgress { .. } => "SubscribeProgress",
            Self::OpenUrl(_) => "OpenUrl",
            Self::PersistState(_) => "PersistState",
            Self::LoadLogHandlers { .. } => "LoadLogHandlers",
            Self::CreateLogHandler { .. } => "CreateLogHandler",
            Self::UpdateLogHandler { .. } => "UpdateLogHandler",
            Self::DeleteLogHandler { .. } => "DeleteLogHandler",
        }
    }
}
