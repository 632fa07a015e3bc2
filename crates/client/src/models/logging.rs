//! Logging handler models for the `api/logs/{service}/handler` endpoints.
//!
//! Responsibilities:
//! - Model the `{handler, configuration}` body shared by list, create and update.
//! - Validate a handler configuration locally before it is sent.
//!
//! Invariants:
//! - Only the four handler kinds the hub supports can be represented.
//! - `validate` mirrors the hub's own checks so an invalid request never leaves the client.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Kind of logging handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    File,
    Stream,
    Smtp,
    Syslog,
}

impl HandlerKind {
    pub const ALL: [HandlerKind; 4] = [Self::File, Self::Stream, Self::Smtp, Self::Syslog];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stream => "stream",
            Self::Smtp => "smtp",
            Self::Syslog => "syslog",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandlerKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                ClientError::Validation(format!(
                    "Unsupported handler: {s}. Supported handlers: file, stream, smtp, syslog"
                ))
            })
    }
}

/// Log levels accepted by the hub, by name.
pub const LEVEL_NAMES: [&str; 10] = [
    "NOTSET",
    "TRACE",
    "DEBUG",
    "INFO",
    "WARN",
    "WARNING",
    "ERROR",
    "FATAL",
    "CRITICAL",
    "DEACTIVATE",
];

/// Log levels accepted by the hub, by number.
pub const LEVEL_NUMBERS: [i64; 8] = [0, 5, 10, 20, 30, 40, 50, 99];

/// Stream targets for `stream` handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamTarget {
    Stdout,
    Stderr,
}

impl StreamTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdout => "ext://sys.stdout",
            Self::Stderr => "ext://sys.stderr",
        }
    }
}

const FORMATTERS: [&str; 2] = ["json", "simple"];
const ROTATION_WHEN: [&str; 12] = [
    "s", "m", "h", "d", "midnight", "w0", "w1", "w2", "w3", "w4", "w5", "w6",
];
const SOCKET_TYPES: [&str; 2] = ["ext://socket.SOCK_STREAM", "ext://socket.SOCK_DGRAM"];

/// A logging handler and its configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogHandler {
    pub handler: HandlerKind,
    #[serde(default)]
    pub configuration: Map<String, Value>,
}

impl LogHandler {
    pub fn new(handler: HandlerKind) -> Self {
        Self {
            handler,
            configuration: Map::new(),
        }
    }

    /// Builder-style setter for one configuration entry.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.configuration.insert(key.to_string(), value.into());
        self
    }

    pub fn level(&self) -> Option<&Value> {
        self.configuration.get("level")
    }

    /// Check the configuration the way the hub does.
    pub fn validate(&self) -> Result<(), ClientError> {
        self.check_one_of("formatter", &FORMATTERS, false)?;
        self.check_level()?;

        match self.handler {
            HandlerKind::Stream => {
                let targets = [StreamTarget::Stdout.as_str(), StreamTarget::Stderr.as_str()];
                self.check_one_of("stream", &targets, false)?;
            }
            HandlerKind::File => {
                self.check_type("filename", JsonKind::String)?;
                self.check_one_of("when", &ROTATION_WHEN, true)?;
                self.check_type("backupCount", JsonKind::Integer)?;
            }
            HandlerKind::Smtp => {
                self.check_type("mailhost", JsonKind::String)?;
                self.check_type("fromaddr", JsonKind::String)?;
                self.check_type("toaddrs", JsonKind::Array)?;
                self.check_type("subject", JsonKind::String)?;
            }
            HandlerKind::Syslog => {
                self.check_type("address", JsonKind::Array)?;
                self.check_one_of("socktype", &SOCKET_TYPES, false)?;
            }
        }
        Ok(())
    }

    fn check_level(&self) -> Result<(), ClientError> {
        let Some(level) = self.level() else {
            return Ok(());
        };
        let valid = match level {
            Value::Number(n) => n.as_i64().is_some_and(|n| LEVEL_NUMBERS.contains(&n)),
            Value::String(s) => {
                LEVEL_NAMES.contains(&s.as_str())
                    || s.parse::<i64>().is_ok_and(|n| LEVEL_NUMBERS.contains(&n))
            }
            Value::Null => true,
            _ => false,
        };
        if valid {
            Ok(())
        } else {
            Err(ClientError::Validation(format!(
                "Unsupported level: {level}. Supported levels: {LEVEL_NUMBERS:?} or {LEVEL_NAMES:?}"
            )))
        }
    }

    fn check_one_of(
        &self,
        key: &str,
        allowed: &[&str],
        ignore_case: bool,
    ) -> Result<(), ClientError> {
        let value = match self.configuration.get(key) {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::String(s)) if ignore_case => s.to_lowercase(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        if allowed.contains(&value.as_str()) {
            Ok(())
        } else {
            Err(ClientError::Validation(format!(
                "Unsupported {key}: {value}. Supported {key}s: {allowed:?}"
            )))
        }
    }

    fn check_type(&self, key: &str, kind: JsonKind) -> Result<(), ClientError> {
        match self.configuration.get(key) {
            None | Some(Value::Null) => Ok(()),
            Some(value) if kind.matches(value) => Ok(()),
            Some(_) => Err(ClientError::Validation(format!(
                "{key} in configuration must be of type {}",
                kind.name()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum JsonKind {
    String,
    Integer,
    Array,
}

impl JsonKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Array => value.is_array(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Array => "list",
        }
    }
}

/// The list endpoint answers either with a list of handlers or with a
/// handler-to-configuration map, depending on the service.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum HandlerListResponse {
    List(Vec<LogHandler>),
    Map(BTreeMap<HandlerKind, Option<Map<String, Value>>>),
}

impl HandlerListResponse {
    pub(crate) fn into_handlers(self) -> Vec<LogHandler> {
        let mut handlers = match self {
            Self::List(list) => list,
            Self::Map(map) => map
                .into_iter()
                .filter_map(|(handler, configuration)| {
                    configuration.map(|configuration| LogHandler {
                        handler,
                        configuration,
                    })
                })
                .collect(),
        };
        handlers.sort_by_key(|h| h.handler);
        handlers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handler_kind_round_trip_str() {
        for kind in HandlerKind::ALL {
            assert_eq!(kind.as_str().parse::<HandlerKind>().unwrap(), kind);
        }
        assert!("rotating".parse::<HandlerKind>().is_err());
    }

    #[test]
    fn test_serialized_body_shape() {
        let handler = LogHandler::new(HandlerKind::Stream)
            .with("level", "DEBUG")
            .with("stream", StreamTarget::Stderr.as_str());
        assert_eq!(
            serde_json::to_value(&handler).unwrap(),
            json!({
                "handler": "stream",
                "configuration": {"level": "DEBUG", "stream": "ext://sys.stderr"}
            })
        );
    }

    #[test]
    fn test_validate_levels() {
        for level in [json!(10), json!("20"), json!("WARNING"), json!("DEACTIVATE")] {
            let handler = LogHandler::new(HandlerKind::File).with("level", level.clone());
            assert!(handler.validate().is_ok(), "{level} should be valid");
        }
        for level in [json!(15), json!("verbose"), json!(true)] {
            let handler = LogHandler::new(HandlerKind::File).with("level", level.clone());
            assert!(handler.validate().is_err(), "{level} should be invalid");
        }
    }

    #[test]
    fn test_validate_stream_target() {
        let ok = LogHandler::new(HandlerKind::Stream).with("stream", "ext://sys.stdout");
        assert!(ok.validate().is_ok());
        let bad = LogHandler::new(HandlerKind::Stream).with("stream", "/dev/null");
        assert!(matches!(bad.validate(), Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_validate_file_fields() {
        let ok = LogHandler::new(HandlerKind::File)
            .with("filename", "hub.log")
            .with("when", "MIDNIGHT")
            .with("backupCount", 7);
        assert!(ok.validate().is_ok());

        let bad_count = LogHandler::new(HandlerKind::File).with("backupCount", "7");
        assert!(bad_count.validate().is_err());

        let bad_when = LogHandler::new(HandlerKind::File).with("when", "weekly");
        assert!(bad_when.validate().is_err());
    }

    #[test]
    fn test_validate_smtp_and_syslog() {
        let smtp = LogHandler::new(HandlerKind::Smtp).with("toaddrs", "ops@example.org");
        assert!(smtp.validate().is_err());
        let syslog = LogHandler::new(HandlerKind::Syslog)
            .with("address", json!(["localhost", 514]))
            .with("socktype", "ext://socket.SOCK_DGRAM");
        assert!(syslog.validate().is_ok());
    }

    #[test]
    fn test_validate_formatter() {
        let bad = LogHandler::new(HandlerKind::Stream).with("formatter", "xml");
        assert!(bad.validate().is_err());
        let ok = LogHandler::new(HandlerKind::Stream).with("formatter", "json");
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_list_response_shapes() {
        let list: HandlerListResponse = serde_json::from_value(json!([
            {"handler": "stream", "configuration": {"level": 10}},
            {"handler": "file", "configuration": {"level": 20}}
        ]))
        .unwrap();
        let handlers = list.into_handlers();
        assert_eq!(handlers[0].handler, HandlerKind::File);
        assert_eq!(handlers[1].handler, HandlerKind::Stream);

        let map: HandlerListResponse = serde_json::from_value(json!({
            "stream": {"level": 10},
            "smtp": null
        }))
        .unwrap();
        let handlers = map.into_handlers();
        assert_eq!(handlers.len(), 1);
        assert_eq!(handlers[0].handler, HandlerKind::Stream);
    }
}
