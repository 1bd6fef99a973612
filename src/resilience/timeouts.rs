//! Deadline and cancellation helpers.
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Cancellation is checked first, so an already-cancelled token never
//!   starts another attempt

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Run `future` under an optional overall deadline.
///
/// Returns `Err(limit)` when the deadline fires first.
pub async fn with_deadline<F>(deadline: Option<Duration>, future: F) -> Result<F::Output, Duration>
where
    F: Future,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, future).await.map_err(|_| limit),
        None => Ok(future.await),
    }
}

/// Run `future` unless `cancel` fires first.
pub async fn cancellable<F>(cancel: &CancellationToken, future: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        output = future => Some(output),
    }
}
