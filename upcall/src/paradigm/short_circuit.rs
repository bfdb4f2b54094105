use std::future::Future;

use upcall_core::{Completion, PartialResult, Task, UpcallConfig, UpcallError, UpcallReport};

use super::{Accumulator, CallParadigm, drive_task};

/// Runs tasks in list order and stops once the merged record is complete.
///
/// Behavior and trade-offs:
/// - Same ordering and precedence as [`UpstreamSequencer`](super::UpstreamSequencer).
/// - After each merge the [`Completion`] predicate is checked; once it holds, the
///   remaining tasks are dropped without ever being polled.
/// - The predicate is only checked after a task contributed data, so a list of
///   failures never short-circuits.
/// - Economical for upstream quotas but may miss data that later tasks would
///   have overwritten.
pub struct UpstreamShortCircuit<R> {
    tasks: Vec<Task<R>>,
    cfg: UpcallConfig,
    completion: Completion<R>,
}

impl<R: PartialResult> UpstreamShortCircuit<R> {
    /// Create a short circuit with no deadlines that stops on `Completion::Schema`.
    #[must_use]
    pub fn new(tasks: Vec<Task<R>>) -> Self {
        Self::with_config(tasks, &UpcallConfig::default())
    }

    /// Create a short circuit honoring the task and request timeouts in `cfg`.
    #[must_use]
    pub fn with_config(tasks: Vec<Task<R>>, cfg: &UpcallConfig) -> Self {
        Self {
            tasks,
            cfg: *cfg,
            completion: Completion::default(),
        }
    }

    /// Replace the stop condition.
    ///
    /// A `Required` list naming undeclared fields can never be satisfied; use
    /// [`Completion::validate`] (or the caller builder) to reject it up front.
    #[must_use]
    pub fn with_completion(mut self, completion: Completion<R>) -> Self {
        self.completion = completion;
        self
    }

    /// Number of tasks to drive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run tasks in order until the record is complete and return it.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    pub async fn activate(self) -> Result<R, UpcallError> {
        self.run().await.map(UpcallReport::into_result)
    }

    /// Run tasks in order until the record is complete and return it with attribution.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    pub async fn activate_with_report(self) -> Result<UpcallReport<R>, UpcallError> {
        self.run().await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "upcall::paradigm::short_circuit",
            skip(self),
            fields(tasks = self.tasks.len(), completion = ?self.completion),
        )
    )]
    pub(crate) async fn run(self) -> Result<UpcallReport<R>, UpcallError> {
        let Self {
            tasks,
            cfg,
            completion,
        } = self;
        let total = tasks.len();
        let task_timeout = cfg.task_timeout;
        let mut acc = Accumulator::new();

        let timed_out = crate::core::run_with_deadline(cfg.request_timeout, async {
            for task in tasks {
                let (name, outcome) = drive_task(task, task_timeout).await;
                if acc.absorb(name, outcome) && completion.is_satisfied(acc.record()) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        finished = acc.finished(),
                        "record complete; skipping remaining tasks"
                    );
                    break;
                }
            }
        })
        .await;

        let skipped = total - acc.finished();
        if timed_out {
            #[cfg(feature = "tracing")]
            tracing::warn!(skipped, "request deadline elapsed before the record was complete");
        }
        acc.finish(skipped, timed_out)
    }
}

impl<R: PartialResult> CallParadigm<R> for UpstreamShortCircuit<R> {
    fn activate_with_report(
        self,
    ) -> impl Future<Output = Result<UpcallReport<R>, UpcallError>> + Send {
        self.run()
    }
}
