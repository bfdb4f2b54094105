use std::future::Future;
use std::time::Duration;

use upcall_core::{
    Completion, Paradigm, PartialResult, Task, UpcallConfig, UpcallError, UpcallReport,
};

use crate::paradigm::{
    CallParadigm, UpstreamCentrifuge, UpstreamSequencer, UpstreamShortCircuit,
};

/// Wrap a task future with an optional timeout and standardized timeout error mapping.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "upcall::core::task_call_with_timeout",
        skip(fut, timeout),
        fields(
            timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        ),
    )
)]
pub(crate) async fn task_call_with_timeout<T, Fut>(
    upstream: &str,
    timeout: Option<Duration>,
    fut: Fut,
) -> Result<T, UpcallError>
where
    Fut: Future<Output = Result<T, UpcallError>>,
{
    match timeout {
        Some(t) => (tokio::time::timeout(t, fut).await)
            .unwrap_or_else(|_| Err(UpcallError::task_timeout(upstream))),
        None => fut.await,
    }
}

/// Run `work` under an optional request deadline.
///
/// Returns `true` when the deadline elapsed first; `work` is dropped at that point.
pub(crate) async fn run_with_deadline<Fut>(deadline: Option<Duration>, work: Fut) -> bool
where
    Fut: Future<Output = ()>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, work).await.is_err(),
        None => {
            work.await;
            false
        }
    }
}

enum Strategy<R> {
    Centrifuge(UpstreamCentrifuge<R>),
    Sequencer(UpstreamSequencer<R>),
    ShortCircuit(UpstreamShortCircuit<R>),
}

/// Façade that selects a paradigm and delegates the activation to it.
///
/// Results, errors and side effects are exactly those of the selected paradigm.
pub struct UpstreamCaller<R> {
    strategy: Strategy<R>,
}

impl<R: PartialResult> UpstreamCaller<R> {
    /// Build a caller for `tasks` driven by `paradigm`, with no deadlines.
    ///
    /// Short-circuit callers stop on the record type's `Completion::Schema`.
    #[must_use]
    pub fn new(tasks: Vec<Task<R>>, paradigm: Paradigm) -> Self {
        let cfg = UpcallConfig {
            paradigm,
            ..UpcallConfig::default()
        };
        Self::from_parts(tasks, &cfg, Completion::default())
    }

    /// Start building a caller with deadlines or a custom stop condition.
    #[must_use]
    pub fn builder() -> UpstreamCallerBuilder<R> {
        UpstreamCallerBuilder::new()
    }

    fn from_parts(tasks: Vec<Task<R>>, cfg: &UpcallConfig, completion: Completion<R>) -> Self {
        let strategy = match cfg.paradigm {
            Paradigm::Simultaneous => {
                Strategy::Centrifuge(UpstreamCentrifuge::with_config(tasks, cfg))
            }
            Paradigm::Sequential => Strategy::Sequencer(UpstreamSequencer::with_config(tasks, cfg)),
            Paradigm::ShortCircuit => Strategy::ShortCircuit(
                UpstreamShortCircuit::with_config(tasks, cfg).with_completion(completion),
            ),
        };
        Self { strategy }
    }

    /// Paradigm this caller delegates to.
    #[must_use]
    pub const fn paradigm(&self) -> Paradigm {
        match self.strategy {
            Strategy::Centrifuge(_) => Paradigm::Simultaneous,
            Strategy::Sequencer(_) => Paradigm::Sequential,
            Strategy::ShortCircuit(_) => Paradigm::ShortCircuit,
        }
    }

    /// Number of tasks the caller will drive.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.strategy {
            Strategy::Centrifuge(p) => p.len(),
            Strategy::Sequencer(p) => p.len(),
            Strategy::ShortCircuit(p) => p.len(),
        }
    }

    /// Whether the caller holds no tasks (activation would fail with `DataUnavailable`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run the selected paradigm and return the merged record.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    pub async fn activate(self) -> Result<R, UpcallError> {
        self.activate_with_report().await.map(UpcallReport::into_result)
    }

    /// Run the selected paradigm and return the merged record with attribution.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    pub async fn activate_with_report(self) -> Result<UpcallReport<R>, UpcallError> {
        self.run().await
    }

    async fn run(self) -> Result<UpcallReport<R>, UpcallError> {
        match self.strategy {
            Strategy::Centrifuge(p) => p.run().await,
            Strategy::Sequencer(p) => p.run().await,
            Strategy::ShortCircuit(p) => p.run().await,
        }
    }
}

impl<R: PartialResult> CallParadigm<R> for UpstreamCaller<R> {
    fn activate_with_report(
        self,
    ) -> impl Future<Output = Result<UpcallReport<R>, UpcallError>> + Send {
        self.run()
    }
}

/// Builder for constructing an [`UpstreamCaller`] with custom configuration.
pub struct UpstreamCallerBuilder<R> {
    tasks: Vec<Task<R>>,
    cfg: UpcallConfig,
    completion: Completion<R>,
}

impl<R: PartialResult> Default for UpstreamCallerBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PartialResult> UpstreamCallerBuilder<R> {
    /// Create a new builder with defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no tasks; an empty caller is valid but always resolves to
    ///   `DataUnavailable`.
    /// - Defaults to `Paradigm::Simultaneous`, no task timeout and no request deadline.
    /// - The short-circuit stop condition defaults to `Completion::Schema`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            cfg: UpcallConfig::default(),
            completion: Completion::default(),
        }
    }

    /// Append one task.
    ///
    /// Behavior and trade-offs:
    /// - Order matters for the sequential paradigms: later tasks win contested fields.
    /// - In the simultaneous paradigm order only affects which task is polled first.
    #[must_use]
    pub fn with_task(mut self, task: Task<R>) -> Self {
        self.tasks.push(task);
        self
    }

    /// Append several tasks, keeping their order.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task<R>>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    /// Select the paradigm.
    ///
    /// Behavior and trade-offs:
    /// - `Simultaneous`: all tasks at once; latency of the slowest task, full fan-out.
    /// - `Sequential`: one task at a time; summed latency, deterministic precedence.
    /// - `ShortCircuit`: one task at a time until the record is complete; fewest
    ///   upstream calls but may miss data from later tasks.
    #[must_use]
    pub const fn paradigm(mut self, paradigm: Paradigm) -> Self {
        self.cfg.paradigm = paradigm;
        self
    }

    /// Set the stop condition used by `Paradigm::ShortCircuit`.
    ///
    /// Ignored by the other paradigms, which always run every task.
    #[must_use]
    pub fn completion(mut self, completion: Completion<R>) -> Self {
        self.completion = completion;
        self
    }

    /// Bound each task individually.
    ///
    /// Behavior and trade-offs:
    /// - An expired task is recorded as `TaskTimeout` and skipped like any failure.
    /// - In sequential paradigms this also caps how long one stalled upstream can
    ///   delay the rest of the list.
    #[must_use]
    pub const fn task_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.task_timeout = Some(timeout);
        self
    }

    /// Bound the whole activation.
    ///
    /// Behavior and trade-offs:
    /// - When exceeded, in-flight tasks are dropped and pending ones never start.
    /// - Data merged before the deadline is kept; the report is flagged `timed_out`.
    /// - Fails with `DataUnavailable` only if nothing was merged in time.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Replace paradigm and deadlines at once, e.g. from a deserialized config.
    #[must_use]
    pub const fn config(mut self, cfg: UpcallConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the caller.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a timeout is zero or the completion predicate names
    /// fields the record type does not declare.
    pub fn build(self) -> Result<UpstreamCaller<R>, UpcallError> {
        self.cfg.validate()?;
        self.completion.validate()?;
        Ok(UpstreamCaller::from_parts(
            self.tasks,
            &self.cfg,
            self.completion,
        ))
    }
}
