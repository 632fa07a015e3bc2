//! Authentication types for hub configuration.
//!
//! Responsibilities:
//! - Hold the API token used for every hub request.
//! - Handle serialization of the secret value.
//!
//! Does NOT handle:
//! - Attaching the token to requests (see client crate).
//!
//! Invariants:
//! - The token is always a `secrecy::SecretString`; `Debug` output never reveals it.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Hub API token, sent as `Authorization: token <value>`.
    #[serde(with = "secret_string")]
    pub token: SecretString,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_debug_does_not_leak_token() {
        let auth = AuthConfig {
            token: SecretString::new("super-secret".to_string().into()),
        };
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_token_serialization_round_trip() {
        let auth = AuthConfig {
            token: SecretString::new("abc".to_string().into()),
        };
        let json = serde_json::to_string(&auth).unwrap();
        assert_eq!(json, r#"{"token":"abc"}"#);
        let back: AuthConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.token.expose_secret(), "abc");
    }
}
