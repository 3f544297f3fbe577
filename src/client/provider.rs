use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use super::state::{ResourceAction, ResourceState, reduce};
use super::ClientResult;

/// Holds the state of one resource and publishes every transition.
///
/// Overlapping calls are resolved latest-request-wins: each call takes a
/// sequence number when issued, and a completion whose number is no longer
/// the latest is discarded.
pub struct ResourceProvider<T> {
    name: String,
    state: watch::Sender<ResourceState<T>>,
    latest: AtomicU64,
}

impl<T> ResourceProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ResourceState::Idle);
        Self {
            name: name.into(),
            state,
            latest: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    /// Returns to idle and invalidates any call still in flight.
    pub fn reset(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.dispatch(ResourceAction::Reset);
    }

    /// Issues `call`. The sequence number is taken and `Request` dispatched
    /// immediately, before the returned future is first polled.
    pub fn run<'a, F>(&'a self, call: F) -> impl Future<Output = ClientResult<T>> + 'a
    where
        F: Future<Output = ClientResult<T>> + Send + 'a,
    {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(ResourceAction::Request);

        async move {
            let result = call.await;

            if self.latest.load(Ordering::SeqCst) != seq {
                tracing::debug!(
                    resource = %self.name,
                    seq,
                    "Discarding response from superseded request"
                );
                return result;
            }

            match &result {
                Ok(data) => self.dispatch(ResourceAction::Succeed(data.clone())),
                Err(e) => self.dispatch(ResourceAction::Fail(e.to_string())),
            }
            result
        }
    }

    fn dispatch(&self, action: ResourceAction<T>) {
        self.state.send_modify(|state| {
            let current = std::mem::replace(state, ResourceState::Idle);
            *state = reduce(current, action);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use tokio::sync::oneshot;

    #[test]
    fn request_is_dispatched_before_first_poll() {
        let provider = ResourceProvider::<u32>::new("teams");
        let mut call = tokio_test::task::spawn(provider.run(std::future::pending()));

        assert!(provider.state().is_pending());
        tokio_test::assert_pending!(call.poll());
    }

    #[tokio::test]
    async fn success_is_published() {
        let provider = ResourceProvider::new("teams");
        let mut rx = provider.subscribe();

        let value = provider.run(async { Ok(5u32) }).await.unwrap();

        assert_eq!(value, 5);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ResourceState::Success(5));
    }

    #[tokio::test]
    async fn failure_is_published_as_message() {
        let provider = ResourceProvider::<u32>::new("teams");

        let result = provider
            .run(async {
                Err(ClientError::Api {
                    status: 404,
                    message: "Team not found".to_string(),
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(provider.state().error(), Some("API error (404): Team not found"));
    }

    #[tokio::test]
    async fn superseded_response_never_overwrites_latest() {
        let provider = ResourceProvider::<u32>::new("projects");
        let (first_tx, first_rx) = oneshot::channel::<u32>();
        let (second_tx, second_rx) = oneshot::channel::<u32>();

        let first = provider.run(async move {
            first_rx
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))
        });
        let second = provider.run(async move {
            second_rx
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))
        });

        second_tx.send(2).unwrap();
        let latest = second.await.unwrap();
        assert_eq!(provider.state(), ResourceState::Success(latest));

        first_tx.send(1).unwrap();
        let stale = first.await.unwrap();
        assert_eq!(stale, 1);
        assert_eq!(provider.state(), ResourceState::Success(2));
    }

    #[tokio::test]
    async fn reset_drops_in_flight_result() {
        let provider = ResourceProvider::<u32>::new("notifications");
        let (tx, rx) = oneshot::channel::<u32>();

        let pending = provider.run(async move {
            rx
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))
        });
        assert!(provider.state().is_pending());

        provider.reset();
        tx.send(9).unwrap();
        pending.await.unwrap();

        assert_eq!(provider.state(), ResourceState::Idle);
    }
}
