//! Background submissions.
//!
//! Gateway calls run on the tokio runtime while the UI keeps drawing. Each
//! call hands back a [`TaskHandle`] that the screen polls once per tick and
//! can cancel when the user navigates away.

use crate::gateway::{Endpoint, GatewayError, RequestGateway};
use crate::models::{RouteDescription, SafetyData, SubmissionResult};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, info};

/// Pollable, cancellable result of a spawned gateway call.
pub struct TaskHandle<T> {
    receiver: oneshot::Receiver<Result<T, GatewayError>>,
    cancel: Option<oneshot::Sender<()>>,
}

impl<T> TaskHandle<T> {
    /// Try to receive the result without blocking.
    ///
    /// A task that went away without answering reports `Cancelled`.
    pub fn try_recv(&mut self) -> Option<Result<T, GatewayError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(GatewayError::Cancelled)),
        }
    }

    /// Ask the task to stop. It answers `Cancelled` unless it already finished.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            debug!("Cancelling background request");
            let _ = cancel.send(());
        }
    }
}

/// Spawn `work` on `runtime`, racing it against the handle's cancel signal.
/// Dropping the handle cancels too.
pub fn spawn_cancellable<T, F>(runtime: &Handle, work: F) -> TaskHandle<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, GatewayError>> + Send + 'static,
{
    let (sender, receiver) = oneshot::channel();
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

    runtime.spawn(async move {
        let result = tokio::select! {
            result = work => result,
            _ = cancel_rx => Err(GatewayError::Cancelled),
        };
        let _ = sender.send(result);
    });

    TaskHandle {
        receiver,
        cancel: Some(cancel_tx),
    }
}

/// Outcome of one refresh of the safety routing screen. Either half can fail
/// independently.
#[derive(Debug)]
pub struct SafetyRefresh {
    pub safety: Result<SafetyData, GatewayError>,
    pub route: Result<RouteDescription, GatewayError>,
}

pub struct SubmissionService;

impl SubmissionService {
    /// Submit a form payload.
    pub fn submit<P>(
        runtime: &Handle,
        gateway: Arc<RequestGateway>,
        endpoint: Endpoint,
        payload: P,
        confirmation: String,
    ) -> TaskHandle<SubmissionResult>
    where
        P: Serialize + Send + Sync + 'static,
    {
        info!("Submitting {}", endpoint.name());
        spawn_cancellable(runtime, async move {
            Ok(gateway.send(endpoint, &payload, &confirmation).await)
        })
    }

    /// Fetch safety data for `location` and a route, concurrently.
    pub fn refresh(
        runtime: &Handle,
        gateway: Arc<RequestGateway>,
        location: String,
        destination: String,
    ) -> TaskHandle<SafetyRefresh> {
        info!("Refreshing safety data for {}", location);
        spawn_cancellable(runtime, async move {
            let (safety, route) = tokio::join!(
                gateway.safety_data(&location),
                gateway.route(&location, &destination)
            );
            Ok(SafetyRefresh { safety, route })
        })
    }
}

/// Settled outcome of a form submission handle.
pub fn into_submission_result(result: Result<SubmissionResult, GatewayError>) -> SubmissionResult {
    result.unwrap_or_else(|e| SubmissionResult::failure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_handle_delivers_result() {
        let mut handle = spawn_cancellable(&Handle::current(), async { Ok(7u8) });
        let result = loop {
            if let Some(result) = handle.try_recv() {
                break result;
            }
            tokio::task::yield_now().await;
        };
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_cancel_reports_cancelled() {
        let mut handle = spawn_cancellable(&Handle::current(), async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        });
        assert!(handle.try_recv().is_none());
        handle.cancel();
        let result = loop {
            if let Some(result) = handle.try_recv() {
                break result;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        };
        assert!(matches!(result, Err(GatewayError::Cancelled)));
        assert_eq!(
            into_submission_result(Err(GatewayError::Cancelled)).message,
            "request was cancelled, try again."
        );
    }
}
