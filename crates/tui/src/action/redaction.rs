//! Redaction wrapper for Action logging.
//!
//! `RedactedAction` implements `Debug` so that option values, handler
//! settings (SMTP hosts, addresses) and server URLs are never written to the
//! log file. Always log `RedactedAction(&action)` instead of `?action`.
//!
//! # Security Invariants
//!
//! - Variants carrying option sets, handler configurations, event payloads
//!   or URLs are handled explicitly.
//! - Server names are kept; they are needed to correlate log lines.

use crate::action::variants::Action;

pub struct RedactedAction<'a>(pub &'a Action);

impl std::fmt::Debug for RedactedAction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::EditField { name, param, value } => write!(
                f,
                "EditField({:?}, {}, <{} chars>)",
                name,
                param,
                value.as_ref().map_or(0, |v| v.len())
            ),
            Action::ServersLoaded(Ok(user)) => {
                write!(f, "ServersLoaded(Ok(<{} servers>))", user.servers.len())
            }
            Action::ServersLoaded(Err(e)) => {
                write!(f, "ServersLoaded(Err(status={:?}))", e.status())
            }
            Action::StartFinished {
                name,
                origin,
                result,
                ..
            } => write!(
                f,
                "StartFinished({}, {:?}, ok={})",
                name,
                origin,
                result.is_ok()
            ),
            Action::UpdateFinished {
                name,
                options,
                revert,
                result,
            } => write!(
                f,
                "UpdateFinished({}, <{} options>, revert={}, ok={})",
                name,
                options.len(),
                revert,
                result.is_ok()
            ),
            Action::ProgressUpdate { name, event } => write!(
                f,
                "ProgressUpdate({}, progress={:?}, ready={}, failed={})",
                name, event.progress, event.ready, event.failed
            ),
            Action::StopNotification { name, event } => {
                write!(f, "StopNotification({}, event={})", name, event.is_some())
            }
            Action::LogHandlersLoaded(Ok(handlers)) => {
                write!(f, "LogHandlersLoaded(Ok(<{} handlers>))", handlers.len())
            }
            Action::Notify(level, message) => {
                write!(f, "Notify({:?}, <{} chars>)", level, message.len())
            }
            Action::SetNewServerName(name) => write!(f, "SetNewServerName({})", name),
            other => write!(f, "{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_client::ProgressEvent;

    #[test]
    fn test_edit_field_value_redacted() {
        let action = Action::EditField {
            name: Some("lab1".to_string()),
            param: "project",
            value: Some("secret-project".to_string()),
        };
        let output = format!("{:?}", RedactedAction(&action));
        assert!(!output.contains("secret-project"));
        assert!(output.contains("lab1"));
        assert!(output.contains("<14 chars>"));
    }

    #[test]
    fn test_progress_message_redacted() {
        let action = Action::ProgressUpdate {
            name: "lab1".to_string(),
            event: ProgressEvent {
                progress: Some(50),
                message: Some("node jwc00n001 at 10.0.0.12".to_string()),
                ..Default::default()
            },
        };
        let output = format!("{:?}", RedactedAction(&action));
        assert!(!output.contains("10.0.0.12"));
        assert!(output.contains("progress=Some(50)"));
    }

    #[test]
    fn test_simple_variant_uses_debug() {
        let output = format!("{:?}", RedactedAction(&Action::StopServer("lab1".to_string())));
        assert_eq!(output, "StopServer(\"lab1\")");
    }
}
