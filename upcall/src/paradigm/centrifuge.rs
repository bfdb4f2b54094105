use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use upcall_core::{PartialResult, Task, UpcallConfig, UpcallError, UpcallReport};

use super::{Accumulator, CallParadigm, drive_task};

/// Drives every task concurrently and merges results in completion order.
///
/// Behavior and trade-offs:
/// - All tasks start on the first poll of the activation; total latency is that
///   of the slowest task (or the request deadline).
/// - Merges are applied one at a time from the activating future, so no two
///   merges ever interleave.
/// - Precedence follows completion order: the task that finishes last wins every
///   field it sets, regardless of its position in the list.
pub struct UpstreamCentrifuge<R> {
    tasks: Vec<Task<R>>,
    cfg: UpcallConfig,
}

impl<R: PartialResult> UpstreamCentrifuge<R> {
    /// Create a centrifuge with no deadlines.
    #[must_use]
    pub fn new(tasks: Vec<Task<R>>) -> Self {
        Self::with_config(tasks, &UpcallConfig::default())
    }

    /// Create a centrifuge honoring the task and request timeouts in `cfg`.
    ///
    /// `cfg.paradigm` is ignored.
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

    /// Run every task concurrently and return the merged record.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    pub async fn activate(self) -> Result<R, UpcallError> {
        self.run().await.map(UpcallReport::into_result)
    }

    /// Run every task concurrently and return the merged record with attribution.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    pub async fn activate_with_report(self) -> Result<UpcallReport<R>, UpcallError> {
        self.run().await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "upcall::paradigm::centrifuge",
            skip(self),
            fields(tasks = self.tasks.len()),
        )
    )]
    pub(crate) async fn run(self) -> Result<UpcallReport<R>, UpcallError> {
        let Self { tasks, cfg } = self;
        let task_timeout = cfg.task_timeout;

        let mut futs: FuturesUnordered<_> = tasks
            .into_iter()
            .map(|task| drive_task(task, task_timeout))
            .collect();
        let mut acc = Accumulator::new();

        let timed_out = crate::core::run_with_deadline(cfg.request_timeout, async {
            while let Some((name, outcome)) = futs.next().await {
                acc.absorb(name, outcome);
            }
        })
        .await;

        if timed_out {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                in_flight = futs.len(),
                "request deadline elapsed; dropping in-flight tasks"
            );
        }

        let skipped = futs.len();
        drop(futs);
        acc.finish(skipped, timed_out)
    }
}

impl<R: PartialResult> CallParadigm<R> for UpstreamCentrifuge<R> {
    fn activate_with_report(
        self,
    ) -> impl Future<Output = Result<UpcallReport<R>, UpcallError>> + Send {
        self.run()
    }
}
