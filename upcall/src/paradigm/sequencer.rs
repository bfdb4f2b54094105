use std::future::Future;

use upcall_core::{PartialResult, Task, UpcallConfig, UpcallError, UpcallReport};

use super::{Accumulator, CallParadigm, drive_task};

/// Runs tasks one after another in list order and merges every result.
///
/// Behavior and trade-offs:
/// - Task `i + 1` is not polled until task `i` has finished; total latency is
///   the sum of task latencies (or the request deadline).
/// - Precedence is deterministic: later tasks in the list win every field they set.
/// - Failures and empty answers are skipped and the sequence continues.
pub struct UpstreamSequencer<R> {
    tasks: Vec<Task<R>>,
    cfg: UpcallConfig,
}

impl<R: PartialResult> UpstreamSequencer<R> {
    /// Create a sequencer with no deadlines.
    #[must_use]
    pub fn new(tasks: Vec<Task<R>>) -> Self {
        Self::with_config(tasks, &UpcallConfig::default())
    }

    /// Create a sequencer honoring the task and request timeouts in `cfg`.
    #[must_use]
    pub fn with_config(tasks: Vec<Task<R>>, cfg: &UpcallConfig) -> Self {
        Self { tasks, cfg: *cfg }
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

    /// Run the tasks in order and return the merged record.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    pub async fn activate(self) -> Result<R, UpcallError> {
        self.run().await.map(UpcallReport::into_result)
    }

    /// Run the tasks in order and return the merged record with attribution.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    pub async fn activate_with_report(self) -> Result<UpcallReport<R>, UpcallError> {
        self.run().await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "upcall::paradigm::sequencer",
            skip(self),
            fields(tasks = self.tasks.len()),
        )
    )]
    pub(crate) async fn run(self) -> Result<UpcallReport<R>, UpcallError> {
        let Self { tasks, cfg } = self;
        let total = tasks.len();
        let task_timeout = cfg.task_timeout;
        let mut acc = Accumulator::new();

        let timed_out = crate::core::run_with_deadline(cfg.request_timeout, async {
            for task in tasks {
                let (name, outcome) = drive_task(task, task_timeout).await;
                acc.absorb(name, outcome);
            }
        })
        .await;

        let skipped = total - acc.finished();
        if timed_out {
            #[cfg(feature = "tracing")]
            tracing::warn!(skipped, "request deadline elapsed; abandoning remaining tasks");
        }
        acc.finish(skipped, timed_out)
    }
}

impl<R: PartialResult> CallParadigm<R> for UpstreamSequencer<R> {
    fn activate_with_report(
        self,
    ) -> impl Future<Output = Result<UpcallReport<R>, UpcallError>> + Send {
        self.run()
    }
}
