use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use upcall_core::{RequestContext, TraceId, UpcallError, Upstream};

use crate::{MockBehavior, play};

struct InternalState<R> {
    behavior: MockBehavior<R>,
    delay: Duration,
    requests: Vec<TraceId>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController<R> {
    state: Arc<Mutex<InternalState<R>>>,
}

impl<R> DynamicMockController<R> {
    /// Set the behavior for subsequent `fetch` calls.
    pub async fn set_behavior(&self, behavior: MockBehavior<R>) {
        let mut guard = self.state.lock().await;
        guard.behavior = behavior;
    }

    /// Set the latency applied before each `fetch` resolves.
    pub async fn set_delay(&self, delay: Duration) {
        let mut guard = self.state.lock().await;
        guard.delay = delay;
    }

    /// Trace ids of every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<TraceId> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Number of `fetch` calls received so far.
    pub async fn calls(&self) -> usize {
        let guard = self.state.lock().await;
        guard.requests.len()
    }

    /// Reset to instant `NoData` and clear the request log.
    pub async fn clear(&self) {
        let mut guard = self.state.lock().await;
        guard.behavior = MockBehavior::NoData;
        guard.delay = Duration::ZERO;
        guard.requests.clear();
    }
}

/// Upstream whose behavior can be swapped at runtime through a controller.
pub struct DynamicMockUpstream<R> {
    name: &'static str,
    state: Arc<Mutex<InternalState<R>>>,
}

impl<R: Clone + Send + 'static> DynamicMockUpstream<R> {
    /// Create a mock upstream and the controller that steers it.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController<R>) {
        let state = Arc::new(Mutex::new(InternalState {
            behavior: MockBehavior::NoData,
            delay: Duration::ZERO,
            requests: Vec::new(),
        }));
        let mock = Arc::new(Self {
            name,
            state: Arc::clone(&state),
        });
        (mock, DynamicMockController { state })
    }
}

#[async_trait]
impl<R: Clone + Send + 'static> Upstream<R> for DynamicMockUpstream<R> {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, ctx: &RequestContext) -> Result<R, UpcallError> {
        // Snapshot the script without holding the lock across the delay.
        let (behavior, delay) = {
            let mut guard = self.state.lock().await;
            guard.requests.push(ctx.trace_id().clone());
            (guard.behavior.clone(), guard.delay)
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        play(self.name, behavior).await
    }
}
