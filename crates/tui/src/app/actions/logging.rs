//! Logging handler screen actions.

use hub_client::HandlerKind;
use tracing::error;

use crate::action::{Action, Effect};
use crate::app::App;
use crate::app::logging::default_handler;
use crate::ui::ToastLevel;

impl App {
    pub(super) fn handle_logging_action(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::LoadLogHandlers => self.load_log_handlers(),
            Action::LogHandlersLoaded(Ok(handlers)) => {
                self.logging.set_handlers(handlers);
                Vec::new()
            }
            Action::LogHandlersLoaded(Err(e)) => {
                self.logging.loading = false;
                error!(error = %e, service = %self.logging.service, "failed to load log handlers");
                self.push_toast(
                    ToastLevel::Error,
                    format!("Failed to load log handlers: {}", e.status_and_reason()),
                );
                Vec::new()
            }
            Action::NextLogHandler => {
                self.logging.select_next();
                Vec::new()
            }
            Action::PreviousLogHandler => {
                self.logging.select_previous();
                Vec::new()
            }
            Action::CycleLogLevel(kind) => {
                self.logging.cycle_level(kind);
                Vec::new()
            }
            Action::CreateLogHandler(kind) => self.create_log_handler(kind),
            Action::UpdateLogHandler(kind) => self.update_log_handler(kind),
            Action::DeleteLogHandler(kind) => {
                if !self.logging.exists(kind) {
                    return Vec::new();
                }
                vec![Effect::DeleteLogHandler {
                    service: self.logging.service.clone(),
                    kind,
                }]
            }
            Action::LogHandlerOperationFinished {
                kind,
                operation,
                result,
            } => match result {
                Ok(()) => {
                    self.push_toast(
                        ToastLevel::Success,
                        format!("{} {} handler", operation.past_tense(), kind),
                    );
                    self.load_log_handlers()
                }
                Err(e) => {
                    self.push_toast(
                        ToastLevel::Error,
                        format!(
                            "Could not {} {} handler. Error: {}",
                            operation.verb(),
                            kind,
                            e.status_and_reason()
                        ),
                    );
                    Vec::new()
                }
            },
            _ => Vec::new(),
        }
    }

    fn load_log_handlers(&mut self) -> Vec<Effect> {
        self.logging.loading = true;
        vec![Effect::LoadLogHandlers {
            service: self.logging.service.clone(),
        }]
    }

    fn create_log_handler(&mut self, kind: HandlerKind) -> Vec<Effect> {
        if !self.logging.can_create(kind) {
            let message = if self.logging.handlers.is_none() {
                "Log handlers are not loaded yet".to_string()
            } else {
                format!("A {} handler already exists", kind)
            };
            self.push_toast(ToastLevel::Warning, message);
            return Vec::new();
        }
        let handler = default_handler(kind);
        if let Err(e) = handler.validate() {
            self.push_toast(ToastLevel::Error, e.to_string());
            return Vec::new();
        }
        vec![Effect::CreateLogHandler {
            service: self.logging.service.clone(),
            handler,
        }]
    }

    fn update_log_handler(&mut self, kind: HandlerKind) -> Vec<Effect> {
        let Some(handler) = self.logging.handler(kind).cloned() else {
            return Vec::new();
        };
        if let Err(e) = handler.validate() {
            self.push_toast(ToastLevel::Error, e.to_string());
            return Vec::new();
        }
        self.logging.dirty.remove(&kind);
        vec![Effect::UpdateLogHandler {
            service: self.logging.service.clone(),
            handler,
        }]
    }
}
