//! Data models for hub API responses and request bodies.

mod logging;
mod options;
mod progress;
mod server;

pub(crate) use logging::HandlerListResponse;
pub use logging::{HandlerKind, LEVEL_NAMES, LEVEL_NUMBERS, LogHandler, StreamTarget};
pub use options::{OptionValue, UserOptions, options_loosely_eq};
pub use progress::{PendingSpawners, ProgressEvent, ProgressStatus, StopNotifications};
pub use server::{CancelReason, ServerModel, UserModel};
