//! Integration tests for configuration loading through the public API.
//!
//! These tests verify end-to-end config loading behavior, ensuring that
//! the ConfigLoader builder chain works the way the CLI drives it.

use es_output_config::{ConfigError, ConfigLoader, OutputConfig, env_var_or_none};
use serial_test::serial;
use std::time::Duration;

/// Values set via builder methods (simulating CLI args) take precedence over defaults.
#[test]
fn test_config_loader_cli_overrides() {
    let config = ConfigLoader::new()
        .with_hosts(vec!["http://cli-override:9200".to_string()])
        .with_max_retries(1)
        .build()
        .expect("should build with CLI overrides");

    assert_eq!(config.connection.hosts, vec!["http://cli-override:9200"]);
    assert_eq!(config.connection.max_retries, 1);
}

#[test]
fn test_env_var_or_none_exported() {
    let _result: Option<String> = env_var_or_none("ES_OUTPUT_HOSTS");
}

/// Full chain as run by the binary: file, then environment, then flags.
#[test]
#[serial]
fn test_full_precedence_chain() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"hosts": ["http://file:9200"], "timeout_seconds": 40, "index": "file-index"}"#,
    )
    .unwrap();

    temp_env::with_vars(
        [
            ("ES_OUTPUT_TIMEOUT", Some("50")),
            ("ES_OUTPUT_INDEX", None::<&str>),
            ("ES_OUTPUT_HOSTS", None),
        ],
        || {
            let config = ConfigLoader::new()
                .with_config_path(path.clone())
                .from_file()
                .unwrap()
                .from_env()
                .unwrap()
                .with_index("flag-index".to_string())
                .build()
                .unwrap();

            assert_eq!(config.connection.hosts, vec!["http://file:9200"]);
            assert_eq!(config.connection.timeout, Duration::from_secs(50));
            assert_eq!(config.index, "flag-index");
        },
    );
}

/// Missing default config file is not an error.
#[test]
#[serial]
fn test_missing_default_file_is_ignored() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    temp_env::with_vars(
        [
            ("HOME", Some(temp_dir.path().to_str().unwrap())),
            ("XDG_CONFIG_HOME", Some(temp_dir.path().to_str().unwrap())),
            ("ES_OUTPUT_CONFIG_PATH", None),
        ],
        || {
            let config = ConfigLoader::new().from_file().unwrap().build().unwrap();
            assert_eq!(config.connection.hosts, OutputConfig::default().connection.hosts);
        },
    );
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_loading() {
    temp_env::with_vars([("DOTENV_DISABLED", Some("1"))], || {
        let result = ConfigLoader::new().load_dotenv();
        assert!(result.is_ok());
    });
}

#[test]
fn test_config_error_messages_name_the_field() {
    let err = ConfigLoader::new()
        .with_hosts(vec!["gopher://es1:9200".to_string()])
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert!(err.to_string().contains("hosts"));
}
