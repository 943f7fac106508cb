//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the persistence deadline wrapper used
//! across use cases.

use crate::ports::group_store::StoreError;
use crate::use_cases::admit_patient::AdmitPatientError;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(AdmitPatientError::Cancelled)` if the token exists and is
/// cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), AdmitPatientError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(AdmitPatientError::Cancelled);
    }
    Ok(())
}

/// Run a persistence call under the configured deadline.
///
/// An elapsed deadline surfaces as [`StoreError::Timeout`], which callers
/// treat as a retryable failure rather than a crash.
pub(crate) async fn with_deadline<T>(
    deadline: Option<Duration>,
    call: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match deadline {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout),
        },
        None => call.await,
    }
}

/// Convert a config duration to a chrono offset. Config values are far
/// below the chrono range, so overflow degrades to a zero offset.
pub(crate) fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero())
}
