//! Host-driven cancellation.

use std::future::Future;

pub use tokio_util::sync::CancellationToken;

use crate::diagnostics::{Diagnostics, CANCELED_SUMMARY};

/// Build the diagnostic returned when `operation` was canceled.
pub fn canceled(operation: &str) -> Diagnostics {
    Diagnostics::error(
        CANCELED_SUMMARY,
        format!("{operation} was canceled before it completed"),
    )
}

/// `Err` with a canceled diagnostic when the token has fired.
pub fn ensure_active(token: &CancellationToken, operation: &str) -> Result<(), Diagnostics> {
    if token.is_cancelled() {
        tracing::debug!(operation, "cancellation observed");
        return Err(canceled(operation));
    }
    Ok(())
}

/// Race `fut` against the token; cancellation wins as soon as it fires.
pub async fn run_cancellable<F, T>(
    token: &CancellationToken,
    operation: &str,
    fut: F,
) -> Result<T, Diagnostics>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            tracing::debug!(operation, "canceled while waiting");
            Err(canceled(operation))
        }
        out = fut => Ok(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_token_passes() {
        let token = CancellationToken::new();
        assert!(ensure_active(&token, "read").is_ok());
    }

    #[test]
    fn cancelled_token_yields_diagnostic() {
        let token = CancellationToken::new();
        token.cancel();
        let diags = ensure_active(&token, "read").unwrap_err();
        assert!(diags.contains_summary(CANCELED_SUMMARY));
    }

    #[tokio::test]
    async fn pending_future_loses_to_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let result = run_cancellable(&token, "create", std::future::pending::<()>()).await;
        assert!(result.unwrap_err().contains_summary(CANCELED_SUMMARY));
    }

    #[tokio::test]
    async fn ready_future_completes() {
        let token = CancellationToken::new();
        let result = run_cancellable(&token, "create", async { 7 }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
