//! Hub REST API client.
//!
//! This crate provides a type-safe client for managing a user's named
//! servers on a notebook hub: lifecycle requests, option updates, spawn
//! progress and notification event streams, and logging handler
//! administration.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod sse;

pub use client::HubClient;
pub use client::builder::HubClientBuilder;
pub use error::{ClientError, Result};
pub use models::{
    CancelReason, HandlerKind, LogHandler, OptionValue, PendingSpawners, ProgressEvent,
    ProgressStatus, ServerModel, StopNotifications, StreamTarget, UserModel, UserOptions,
};
pub use sse::{EventStream, SseDecoder, SseMessage};
