//! Shared test utilities for es-output integration tests.
//!
//! Invariants / Assumptions:
//! - Every command is hermetic: no `.env`, no user config file, no `ES_OUTPUT_*` leakage.

use assert_cmd::Command;

const LEAKY_VARS: &[&str] = &[
    "ES_OUTPUT_HOSTS",
    "ES_OUTPUT_USERNAME",
    "ES_OUTPUT_PASSWORD",
    "ES_OUTPUT_MAX_RETRIES",
    "ES_OUTPUT_TIMEOUT",
    "ES_OUTPUT_CONNECT_TIMEOUT",
    "ES_OUTPUT_RETRY_BACKOFF_MS",
    "ES_OUTPUT_SKIP_VERIFY",
    "ES_OUTPUT_INDEX",
    "ES_OUTPUT_CONFIG_PATH",
    "RUST_LOG",
];

/// Returns a hermetic `es-output` command.
pub fn es_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("es-output");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env(
        "XDG_CONFIG_HOME",
        std::env::temp_dir().join("es-output-cli-tests-no-config"),
    );
    for var in LEAKY_VARS {
        cmd.env_remove(var);
    }

    cmd
}

/// Returns a hermetic `es-output` command pointed at one node.
#[allow(dead_code)]
pub fn es_cmd_with_host(host: &str) -> Command {
    let mut cmd = es_cmd();
    cmd.env("ES_OUTPUT_HOSTS", host);
    cmd
}

/// URL of a local port that refuses connections.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
