//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` variants and CLI-level failures to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use es_output_client::ClientError;
use thiserror::Error;

/// Failures detected by the CLI itself rather than the client.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Document {id} not found in {index}")]
    NotFound { index: String, id: String },

    #[error("{rejected} of {total} documents were rejected")]
    Rejected { rejected: usize, total: usize },

    #[error("Invalid JSON on line {line}: {source}")]
    InvalidInput {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Structured exit codes for es-output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure, including configuration errors.
    GeneralError = 1,

    /// Every attempt failed at the transport level (refused, timeout, DNS).
    ///
    /// Scripts may retry with backoff.
    ConnectionError = 3,

    /// A named document does not exist.
    NotFound = 4,

    /// Input or response could not be encoded/decoded, or documents were rejected.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// The cluster answered with 5xx on every attempt.
    ///
    /// Scripts should back off and retry later.
    ServiceUnavailable = 8,

    /// Interrupted by SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Transport { .. } => ExitCode::ConnectionError,
            ClientError::ServerError { .. } => ExitCode::ServiceUnavailable,
            ClientError::Serialization(_) | ClientError::Decode { .. } => {
                ExitCode::ValidationError
            }
            ClientError::Cancelled => ExitCode::Interrupted,

            // Exhaustion reports what the last attempt ran into.
            ClientError::RetriesExhausted {
                last: Some(inner), ..
            } => Self::from(inner.as_ref()),
            ClientError::RetriesExhausted { last: None, .. } => ExitCode::GeneralError,

            ClientError::NoConnectionsConfigured
            | ClientError::InvalidUrl(_)
            | ClientError::HttpClient(_) => ExitCode::GeneralError,
        }
    }
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::NotFound { .. } => ExitCode::NotFound,
            CliError::Rejected { .. } | CliError::InvalidInput { .. } => ExitCode::ValidationError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(cli_err);
            }
        }
        ExitCode::GeneralError
    }
}
