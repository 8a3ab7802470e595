//! Uniform wrapper around backend calls.
//!
//! Unary calls pass straight through. Server streams are drained to completion
//! into an [`AggregatedResult`]:
//! - an item-level fault is recorded and the drain continues
//! - a transport fault aborts the drain and discards everything collected so far
//! - stream exhaustion is the end-of-stream marker, never an error
//!
//! Every call and drain runs under the request deadline.

use std::future::Future;

use futures::StreamExt;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::traits::{BackendError, BackendStream, StreamFault};

/// Items collected from one server stream
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResult<T> {
    /// Items in receipt order
    pub items: Vec<T>,
    /// Item-level faults skipped during the drain
    pub item_errors: Vec<String>,
    /// Terminal error; when set, `items` is empty
    pub error: Option<BackendError>,
}

impl<T> AggregatedResult<T> {
    fn aborted(item_errors: Vec<String>, error: BackendError) -> Self {
        Self {
            items: Vec::new(),
            item_errors,
            error: Some(error),
        }
    }

    /// Field-level view: the items, or the error that aborted the stream
    pub fn into_result(self) -> Result<Vec<T>, BackendError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.items),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BackendAggregator {
    deadline: Option<Instant>,
}

impl BackendAggregator {
    /// Aggregator whose calls must finish before `deadline`
    pub fn new(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// Aggregator without a deadline
    pub fn unbounded() -> Self {
        Self { deadline: None }
    }

    /// Unary pass-through
    pub async fn call<T, F>(&self, service: &'static str, call: F) -> Result<T, BackendError>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        let result = self.within_deadline(service, call).await.and_then(|r| r);

        if let Err(err) = &result {
            warn!(service, error = %err, "Backend call failed");
        }

        result
    }

    /// Drain a server stream into an ordered result
    ///
    /// Item faults recorded before a deadline or transport abort are kept.
    pub async fn drain<T>(
        &self,
        service: &'static str,
        stream: BackendStream<T>,
    ) -> AggregatedResult<T> {
        let mut items = Vec::new();
        let mut item_errors = Vec::new();

        let outcome = self
            .within_deadline(
                service,
                drain_stream(service, stream, &mut items, &mut item_errors),
            )
            .await
            .and_then(|r| r);

        match outcome {
            Ok(()) => {
                debug!(service, items = items.len(), skipped = item_errors.len(), "Backend stream drained");
                AggregatedResult {
                    items,
                    item_errors,
                    error: None,
                }
            }
            Err(err) => {
                warn!(
                    service,
                    error = %err,
                    discarded = items.len(),
                    "Backend stream drain aborted"
                );
                AggregatedResult::aborted(item_errors, err)
            }
        }
    }

    /// Open a server stream and drain it, for resolvers returning a list field
    pub async fn collect<T, F>(&self, service: &'static str, open: F) -> Result<Vec<T>, BackendError>
    where
        F: Future<Output = Result<BackendStream<T>, BackendError>>,
    {
        let stream = self.call(service, open).await?;
        self.drain(service, stream).await.into_result()
    }

    async fn within_deadline<T>(
        &self,
        service: &'static str,
        work: impl Future<Output = T>,
    ) -> Result<T, BackendError> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, work)
                .await
                .map_err(|_| BackendError::DeadlineExceeded { service }),
            None => Ok(work.await),
        }
    }
}

async fn drain_stream<T>(
    service: &'static str,
    mut stream: BackendStream<T>,
    items: &mut Vec<T>,
    item_errors: &mut Vec<String>,
) -> Result<(), BackendError> {
    while let Some(next) = stream.next().await {
        match next {
            Ok(item) => items.push(item),
            Err(StreamFault::Item(message)) => {
                warn!(service, error = %message, "Skipping undecodable stream item");
                item_errors.push(message);
            }
            Err(StreamFault::Transport(message)) => {
                return Err(BackendError::StreamAborted { service, message });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::time::Duration;

    fn stream_of(items: Vec<Result<&'static str, StreamFault>>) -> BackendStream<&'static str> {
        stream::iter(items).boxed()
    }

    #[tokio::test]
    async fn test_drain_keeps_receipt_order() {
        let result = BackendAggregator::unbounded()
            .drain("product", stream_of(vec![Ok("a"), Ok("b"), Ok("c")]))
            .await;

        assert_eq!(
            result,
            AggregatedResult {
                items: vec!["a", "b", "c"],
                item_errors: vec![],
                error: None,
            }
        );
    }

    #[tokio::test]
    async fn test_transport_fault_discards_partial_items() {
        let result = BackendAggregator::unbounded()
            .drain(
                "product",
                stream_of(vec![
                    Ok("a"),
                    Err(StreamFault::Transport("connection reset".to_string())),
                    Ok("never read"),
                ]),
            )
            .await;

        assert!(result.items.is_empty());
        assert_eq!(
            result.error,
            Some(BackendError::StreamAborted {
                service: "product",
                message: "connection reset".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_item_fault_is_recorded_and_skipped() {
        let result = BackendAggregator::unbounded()
            .drain(
                "cart",
                stream_of(vec![
                    Ok("a"),
                    Err(StreamFault::Item("bad item".to_string())),
                    Ok("c"),
                ]),
            )
            .await;

        assert_eq!(result.items, vec!["a", "c"]);
        assert_eq!(result.item_errors, vec!["bad item".to_string()]);
        assert_eq!(result.into_result(), Ok(vec!["a", "c"]));
    }

    #[tokio::test]
    async fn test_empty_stream_is_not_an_error() {
        let result = BackendAggregator::unbounded()
            .drain("wishlist", stream_of(vec![]))
            .await;

        assert_eq!(result.into_result(), Ok(vec![]));
    }

    #[tokio::test]
    async fn test_call_propagates_backend_error() {
        let err = BackendAggregator::unbounded()
            .call("user", async {
                Err::<(), _>(BackendError::CallFailed {
                    service: "user",
                    message: "no such user".to_string(),
                })
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "BACKEND_CALL_FAILED");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_call_hits_deadline() {
        let aggregator = BackendAggregator::new(Instant::now() + Duration::from_secs(2));

        let err = aggregator
            .call("order", futures::future::pending::<Result<(), BackendError>>())
            .await
            .unwrap_err();

        assert_eq!(err, BackendError::DeadlineExceeded { service: "order" });
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_stream_hits_deadline() {
        let aggregator = BackendAggregator::new(Instant::now() + Duration::from_secs(2));
        let stalled: BackendStream<&'static str> =
            stream::iter(vec![Ok("a")]).chain(stream::pending()).boxed();

        let result = aggregator.drain("order", stalled).await;

        assert!(result.items.is_empty());
        assert_eq!(
            result.error,
            Some(BackendError::DeadlineExceeded { service: "order" })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_keeps_recorded_item_faults() {
        let aggregator = BackendAggregator::new(Instant::now() + Duration::from_secs(2));
        let stalled: BackendStream<&'static str> = stream::iter(vec![
            Ok("a"),
            Err(StreamFault::Item("bad utf-8".to_string())),
        ])
        .chain(stream::pending())
        .boxed();

        let result = aggregator.drain("order", stalled).await;

        assert_eq!(
            result,
            AggregatedResult {
                items: vec![],
                item_errors: vec!["bad utf-8".to_string()],
                error: Some(BackendError::DeadlineExceeded { service: "order" }),
            }
        );
    }
}
