//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Wire Ctrl+C/SIGINT to the client's cancellation token.
//! - Recognize user-initiated cancellation in an `anyhow::Error` chain.
//! - Centralize the cancellation message.
//!
//! Does NOT handle:
//! - Aborting in-flight requests; the client races its token against each attempt.
//!
//! Invariants:
//! - Once cancelled, the token remains cancelled for the life of the process.

use es_output_client::{CancellationToken, ClientError};

/// Cancel `token` on the first Ctrl+C.
pub fn install_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::debug!("Received Ctrl+C, cancelling");
        token.cancel();
    });
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<ClientError>(), Some(ClientError::Cancelled)))
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cancelled_detected_through_context() {
        let err = Err::<(), _>(ClientError::Cancelled)
            .context("indexing line 3")
            .unwrap_err();
        assert!(is_cancelled_error(&err));
    }

    #[test]
    fn test_other_errors_are_not_cancellation() {
        let err = anyhow::Error::new(ClientError::NoConnectionsConfigured);
        assert!(!is_cancelled_error(&err));
        assert!(!is_cancelled_error(&anyhow::anyhow!("cancelled")));
    }
}
