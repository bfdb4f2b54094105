//! Scripted mock tasks and upstreams for exercising upcall paradigms.
//!
//! Every mock sleeps on the Tokio clock, so tests can run under a paused
//! runtime (`#[tokio::test(start_paused = true)]`) and still observe a
//! deterministic completion order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use upcall_core::{RequestContext, Task, UpcallError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockUpstream};
pub use fixtures::{SampleRecord, empty_task, failing_task, sleeping_task};

/// Instruction for how a mock should behave once its delay has elapsed.
#[derive(Debug, Clone)]
pub enum MockBehavior<R> {
    /// Return the provided record.
    Return(R),
    /// Report that the upstream has nothing for this request.
    NoData,
    /// Fail with the provided error.
    Fail(UpcallError),
    /// Never complete (simulate a stalled upstream).
    Hang,
}

/// Lifecycle event recorded by a [`CallProbe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    /// The task was polled for the first time.
    Started(String),
    /// The task produced its result.
    Finished(String),
}

/// Shared log of task starts and finishes, used to assert scheduling order.
#[derive(Debug, Clone, Default)]
pub struct CallProbe {
    events: Arc<Mutex<Vec<ProbeEvent>>>,
}

impl CallProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn record(&self, event: ProbeEvent) {
        self.events.lock().await.push(event);
    }

    /// All events in the order they happened.
    pub async fn events(&self) -> Vec<ProbeEvent> {
        self.events.lock().await.clone()
    }

    /// Names of tasks that started, in start order.
    pub async fn started(&self) -> Vec<String> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                ProbeEvent::Started(n) => Some(n.clone()),
                ProbeEvent::Finished(_) => None,
            })
            .collect()
    }

    /// Names of tasks that finished, in completion order.
    pub async fn finished(&self) -> Vec<String> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                ProbeEvent::Finished(n) => Some(n.clone()),
                ProbeEvent::Started(_) => None,
            })
            .collect()
    }
}

pub(crate) async fn play<R>(upstream: &str, behavior: MockBehavior<R>) -> Result<R, UpcallError> {
    match behavior {
        MockBehavior::Return(r) => Ok(r),
        MockBehavior::NoData => Err(UpcallError::no_data(upstream)),
        MockBehavior::Fail(e) => Err(e),
        MockBehavior::Hang => std::future::pending().await,
    }
}

/// Entry point for building scripted [`Task`]s.
pub struct MockTask;

impl MockTask {
    /// Start building a mock task; defaults to an instant `NoData` named "mock".
    #[must_use]
    pub fn builder<R>() -> MockTaskBuilder<R> {
        MockTaskBuilder {
            name: "mock".to_string(),
            delay: Duration::ZERO,
            script: Script::Behavior(MockBehavior::NoData),
            probe: None,
        }
    }
}

enum Script<R> {
    Behavior(MockBehavior<R>),
    /// `Upstream` failure; the name is attached in `build()`.
    Fail(String),
}

/// Builder for a single scripted task.
pub struct MockTaskBuilder<R> {
    name: String,
    delay: Duration,
    script: Script<R>,
    probe: Option<CallProbe>,
}

impl<R: Send + 'static> MockTaskBuilder<R> {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Time the task spends "on the wire" before producing its outcome.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn returns(mut self, record: R) -> Self {
        self.script = Script::Behavior(MockBehavior::Return(record));
        self
    }

    #[must_use]
    pub fn no_data(mut self) -> Self {
        self.script = Script::Behavior(MockBehavior::NoData);
        self
    }

    /// Fail with an `Upstream` error attributed to this task's final name.
    #[must_use]
    pub fn fails(mut self, msg: impl Into<String>) -> Self {
        self.script = Script::Fail(msg.into());
        self
    }

    #[must_use]
    pub fn fails_with(mut self, err: UpcallError) -> Self {
        self.script = Script::Behavior(MockBehavior::Fail(err));
        self
    }

    #[must_use]
    pub fn hangs(mut self) -> Self {
        self.script = Script::Behavior(MockBehavior::Hang);
        self
    }

    #[must_use]
    pub fn behavior(mut self, behavior: MockBehavior<R>) -> Self {
        self.script = Script::Behavior(behavior);
        self
    }

    /// Record start/finish events into `probe`.
    #[must_use]
    pub fn probe(mut self, probe: &CallProbe) -> Self {
        self.probe = Some(probe.clone());
        self
    }

    /// Bind the script to a request context.
    pub fn build(self, ctx: &RequestContext) -> Task<R> {
        let Self {
            name,
            delay,
            script,
            probe,
        } = self;
        let behavior = match script {
            Script::Behavior(b) => b,
            Script::Fail(msg) => MockBehavior::Fail(UpcallError::upstream(name.clone(), msg)),
        };
        let label = name.clone();
        Task::new(name, ctx.clone(), async move {
            if let Some(p) = &probe {
                p.record(ProbeEvent::Started(label.clone())).await;
            }
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let res = play(&label, behavior).await;
            if let Some(p) = &probe {
                p.record(ProbeEvent::Finished(label)).await;
            }
            res
        })
    }
}
