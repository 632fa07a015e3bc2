//! State of the logging handlers screen.
//!
//! Responsibilities:
//! - Track the handlers configured for one logging service.
//! - Decide which operations each handler kind offers.
//! - Provide starting configurations for handlers that do not exist yet.
//!
//! Invariants:
//! - Create is offered only for kinds without a handler; update and delete
//!   only for kinds that have one.

use std::collections::BTreeSet;

use hub_client::{HandlerKind, LogHandler, StreamTarget};
use serde_json::{Value, json};

/// Levels offered when cycling a handler's level.
pub const LEVEL_CYCLE: [&str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

/// Configuration a new handler of `kind` starts with.
pub fn default_handler(kind: HandlerKind) -> LogHandler {
    let handler = LogHandler::new(kind).with("formatter", "simple");
    match kind {
        HandlerKind::File => handler
            .with("level", "INFO")
            .with("filename", "jupyterhub.log")
            .with("when", "midnight")
            .with("backupCount", 7),
        HandlerKind::Stream => handler
            .with("level", "INFO")
            .with("stream", StreamTarget::Stdout.as_str()),
        HandlerKind::Smtp => handler
            .with("level", "ERROR")
            .with("mailhost", "")
            .with("fromaddr", "")
            .with("toaddrs", json!([]))
            .with("subject", "Hub error"),
        HandlerKind::Syslog => handler
            .with("level", "WARNING")
            .with("address", json!(["localhost", 514]))
            .with("socktype", "ext://socket.SOCK_DGRAM"),
    }
}

/// Level after `current` in `LEVEL_CYCLE`; unknown levels restart the cycle.
pub fn next_level(current: Option<&Value>) -> &'static str {
    let position = current
        .and_then(Value::as_str)
        .and_then(|level| LEVEL_CYCLE.iter().position(|l| *l == level));
    match position {
        Some(i) => LEVEL_CYCLE[(i + 1) % LEVEL_CYCLE.len()],
        None => LEVEL_CYCLE[0],
    }
}

#[derive(Debug, Clone)]
pub struct LoggingState {
    pub service: String,
    /// `None` until the first load completes.
    pub handlers: Option<Vec<LogHandler>>,
    /// Index into `HandlerKind::ALL`.
    pub selected: usize,
    pub loading: bool,
    /// Kinds edited locally and not yet sent.
    pub dirty: BTreeSet<HandlerKind>,
}

impl LoggingState {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            handlers: None,
            selected: 0,
            loading: false,
            dirty: BTreeSet::new(),
        }
    }

    pub fn selected_kind(&self) -> HandlerKind {
        HandlerKind::ALL[self.selected % HandlerKind::ALL.len()]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % HandlerKind::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + HandlerKind::ALL.len() - 1) % HandlerKind::ALL.len();
    }

    pub fn handler(&self, kind: HandlerKind) -> Option<&LogHandler> {
        self.handlers
            .as_ref()
            .and_then(|handlers| handlers.iter().find(|h| h.handler == kind))
    }

    fn handler_mut(&mut self, kind: HandlerKind) -> Option<&mut LogHandler> {
        self.handlers
            .as_mut()
            .and_then(|handlers| handlers.iter_mut().find(|h| h.handler == kind))
    }

    pub fn exists(&self, kind: HandlerKind) -> bool {
        self.handler(kind).is_some()
    }

    pub fn can_create(&self, kind: HandlerKind) -> bool {
        self.handlers.is_some() && !self.exists(kind)
    }

    /// Replace the handler list after a load.
    pub fn set_handlers(&mut self, handlers: Vec<LogHandler>) {
        self.handlers = Some(handlers);
        self.dirty.clear();
        self.loading = false;
    }

    /// Advance the level of an existing handler. Returns false if it does not exist.
    pub fn cycle_level(&mut self, kind: HandlerKind) -> bool {
        let Some(handler) = self.handler_mut(kind) else {
            return false;
        };
        let level = next_level(handler.level());
        handler
            .configuration
            .insert("level".to_string(), Value::from(level));
        self.dirty.insert(kind);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_handlers_validate() {
        for kind in HandlerKind::ALL {
            let handler = default_handler(kind);
            assert!(handler.validate().is_ok(), "{kind} default should validate");
        }
    }

    #[test]
    fn test_operations_depend_on_existence() {
        let mut state = LoggingState::new("jhub");
        assert!(!state.can_create(HandlerKind::File), "nothing offered before load");

        state.set_handlers(vec![default_handler(HandlerKind::Stream)]);
        assert!(state.can_create(HandlerKind::File));
        assert!(!state.can_create(HandlerKind::Stream));
        assert!(state.exists(HandlerKind::Stream));
    }

    #[test]
    fn test_cycle_level_marks_dirty() {
        let mut state = LoggingState::new("jhub");
        state.set_handlers(vec![default_handler(HandlerKind::Stream)]);

        assert!(state.cycle_level(HandlerKind::Stream));
        let level = state.handler(HandlerKind::Stream).and_then(|h| h.level());
        assert_eq!(level, Some(&Value::from("WARNING")));
        assert!(state.dirty.contains(&HandlerKind::Stream));
        assert!(!state.cycle_level(HandlerKind::Smtp));
    }

    #[test]
    fn test_next_level_restarts_on_unknown() {
        assert_eq!(next_level(Some(&Value::from("CRITICAL"))), "DEBUG");
        assert_eq!(next_level(Some(&Value::from(20))), "DEBUG");
        assert_eq!(next_level(None), "DEBUG");
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = LoggingState::new("jhub");
        state.select_previous();
        assert_eq!(state.selected_kind(), HandlerKind::Syslog);
        state.select_next();
        assert_eq!(state.selected_kind(), HandlerKind::File);
    }
}
