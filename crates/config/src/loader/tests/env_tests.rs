//! Environment variable tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test that `HUB_*` variables populate the config.
//! - Test handling of empty and whitespace-only environment variables.
//! - Test that builder values applied after `from_env` win.

use crate::loader::builder::ConfigLoader;
use crate::loader::env::env_var_or_none;
use secrecy::ExposeSecret;
use serial_test::serial;
use std::path::PathBuf;
use std::time::Duration;

use super::env_lock;

const ALL_VARS: [&str; 9] = [
    "HUB_BASE_URL",
    "HUB_USER",
    "HUB_API_TOKEN",
    "HUB_SKIP_VERIFY",
    "HUB_TIMEOUT",
    "HUB_VO",
    "HUB_SYSTEMS",
    "HUB_STATE_PATH",
    "HUB_LOG_SERVICE",
];

#[test]
#[serial]
fn test_env_populates_config() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [
            ("HUB_BASE_URL", Some("https://hub.example.org/hub")),
            ("HUB_USER", Some("alice")),
            ("HUB_API_TOKEN", Some("env-token")),
            ("HUB_SKIP_VERIFY", Some("true")),
            ("HUB_TIMEOUT", Some("12")),
            ("HUB_VO", Some("myvo")),
            ("HUB_SYSTEMS", Some("JUWELS, JURECA,,")),
            ("HUB_STATE_PATH", Some("/tmp/hub-state.json")),
            ("HUB_LOG_SERVICE", Some("jupyterjsc")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.connection.base_url, "https://hub.example.org/hub");
            assert_eq!(config.user, "alice");
            assert_eq!(config.auth.token.expose_secret(), "env-token");
            assert!(config.connection.skip_verify);
            assert_eq!(config.connection.timeout, Duration::from_secs(12));
            assert_eq!(config.session.vo.as_deref(), Some("myvo"));
            assert_eq!(
                config.session.available_systems,
                Some(vec!["JUWELS".to_string(), "JURECA".to_string()])
            );
            assert_eq!(
                config.session.state_path,
                Some(PathBuf::from("/tmp/hub-state.json"))
            );
            assert_eq!(config.session.log_service.as_deref(), Some("jupyterjsc"));
        },
    );
}

#[test]
#[serial]
fn test_builder_after_env_overrides() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [
            ("HUB_BASE_URL", Some("https://env.example.org/hub")),
            ("HUB_USER", Some("alice")),
            ("HUB_API_TOKEN", Some("env-token")),
        ],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .with_base_url("https://cli.example.org/hub".to_string())
                .build()
                .unwrap();
            assert_eq!(config.connection.base_url, "https://cli.example.org/hub");
        },
    );
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [("HUB_API_TOKEN", Some("")), ("HUB_USER", Some(""))],
        || {
            let config = ConfigLoader::new()
                .with_base_url("https://hub.example.org/hub".to_string())
                .with_user("bob".to_string())
                .with_api_token("builder-token".to_string())
                .from_env()
                .unwrap()
                .build()
                .unwrap();
            assert_eq!(config.user, "bob");
            assert_eq!(config.auth.token.expose_secret(), "builder-token");
        },
    );
}

#[test]
#[serial]
fn test_whitespace_only_env_var_treated_as_unset() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars([("HUB_VO", Some("   \t  "))], || {
        assert_eq!(env_var_or_none("HUB_VO"), None);
    });
}

#[test]
#[serial]
fn test_env_values_are_trimmed() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars([("HUB_USER", Some("  alice  "))], || {
        assert_eq!(env_var_or_none("HUB_USER").as_deref(), Some("alice"));
    });
}

#[test]
#[serial]
fn test_no_env_leaves_loader_empty() {
    let _lock = env_lock().lock().unwrap();
    let unset: Vec<(&str, Option<&str>)> = ALL_VARS.iter().map(|v| (*v, None)).collect();
    temp_env::with_vars(unset, || {
        let result = ConfigLoader::new().from_env().unwrap().build();
        assert!(result.is_err());
    });
}
