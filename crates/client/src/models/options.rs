//! Configuration option sets sent with start and update requests.
//!
//! The hub stores `user_options` as loosely typed JSON. Values typed into a
//! form are strings, values derived by the client (the runtime in seconds)
//! are numbers, and the two must compare equal when they denote the same
//! value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mapping from option key (`options_input`, `resource_Runtime`, ...) to value.
pub type UserOptions = BTreeMap<String, OptionValue>;

/// A scalar option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl OptionValue {
    /// Compare like a browser's `!=` on form values: `"2"` equals `2`.
    pub fn loosely_eq(&self, other: &OptionValue) -> bool {
        if self.to_string() == other.to_string() {
            return true;
        }
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Numeric view of the value; text is parsed if it looks like a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(x) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{}", *x as i64),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Compare two option sets with [`OptionValue::loosely_eq`] on every key.
pub fn options_loosely_eq(a: &UserOptions, b: &UserOptions) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(k, v)| b.get(k).is_some_and(|other| v.loosely_eq(other)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialization() {
        let opts: UserOptions = serde_json::from_str(
            r#"{"resource_Nodes": "2", "resource_Runtime": 1800, "x": 1.5, "y": true}"#,
        )
        .unwrap();
        assert_eq!(opts["resource_Nodes"], OptionValue::Text("2".to_string()));
        assert_eq!(opts["resource_Runtime"], OptionValue::Integer(1800));
        assert_eq!(opts["x"], OptionValue::Float(1.5));
        assert_eq!(opts["y"], OptionValue::Bool(true));
    }

    #[test]
    fn test_serialization_keeps_types() {
        let mut opts = UserOptions::new();
        opts.insert("resource_Runtime".to_string(), OptionValue::Integer(1800));
        opts.insert("resource_Nodes".to_string(), "2".into());
        let json = serde_json::to_string(&opts).unwrap();
        assert_eq!(json, r#"{"resource_Nodes":"2","resource_Runtime":1800}"#);
    }

    #[test]
    fn test_loose_equality() {
        assert!(OptionValue::from("2").loosely_eq(&OptionValue::Integer(2)));
        assert!(OptionValue::Float(1800.0).loosely_eq(&OptionValue::Integer(1800)));
        assert!(OptionValue::from("1.50").loosely_eq(&OptionValue::Float(1.5)));
        assert!(!OptionValue::from("2").loosely_eq(&OptionValue::from("3")));
        assert!(!OptionValue::from("").loosely_eq(&OptionValue::Integer(0)));
        assert!(OptionValue::from("").loosely_eq(&OptionValue::from("")));
    }

    #[test]
    fn test_options_loosely_eq() {
        let mut a = UserOptions::new();
        a.insert("resource_Nodes".to_string(), "2".into());
        let mut b = UserOptions::new();
        b.insert("resource_Nodes".to_string(), OptionValue::Integer(2));
        assert!(options_loosely_eq(&a, &b));
        b.insert("extra".to_string(), "x".into());
        assert!(!options_loosely_eq(&a, &b));
    }
}
