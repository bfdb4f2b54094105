use std::future::Future;
use std::time::Duration;

use upcall_core::{PartialResult, Task, TaskOutcome, UpcallError, UpcallReport};

mod accumulator;
mod centrifuge;
mod sequencer;
mod short_circuit;

pub use centrifuge::UpstreamCentrifuge;
pub use sequencer::UpstreamSequencer;
pub use short_circuit::UpstreamShortCircuit;

pub(crate) use accumulator::Accumulator;

/// Common interface of every way to drive a task list.
///
/// Activation consumes the paradigm: tasks are single-use, so a paradigm can
/// be activated at most once.
pub trait CallParadigm<R: PartialResult>: Sized + Send {
    /// Run the tasks and return the merged record with attribution.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    fn activate_with_report(
        self,
    ) -> impl Future<Output = Result<UpcallReport<R>, UpcallError>> + Send;

    /// Run the tasks and return only the merged record.
    ///
    /// # Errors
    /// Returns `DataUnavailable` when no task produced data.
    fn activate(self) -> impl Future<Output = Result<R, UpcallError>> + Send {
        async move {
            self.activate_with_report()
                .await
                .map(UpcallReport::into_result)
        }
    }
}

/// Drive one task to completion and classify its result.
///
/// The task timeout, when set, turns a stalled upstream into `TaskTimeout`.
pub(crate) async fn drive_task<R: PartialResult>(
    task: Task<R>,
    timeout: Option<Duration>,
) -> (String, TaskOutcome<R>) {
    let (name, _ctx, fut) = task.into_parts();
    let res = crate::core::task_call_with_timeout(&name, timeout, fut).await;
    let outcome = TaskOutcome::classify(&name, res);
    #[cfg(feature = "tracing")]
    log_outcome(&name, &_ctx, &outcome);
    (name, outcome)
}

#[cfg(feature = "tracing")]
fn log_outcome<R>(name: &str, ctx: &upcall_core::RequestContext, outcome: &TaskOutcome<R>) {
    match outcome {
        TaskOutcome::Data(_) => {
            tracing::debug!(upstream = name, trace_id = %ctx.trace_id(), "upstream returned data");
        }
        TaskOutcome::NoData => {
            tracing::debug!(upstream = name, trace_id = %ctx.trace_id(), "upstream had no data; skipping");
        }
        TaskOutcome::Failed(e) => {
            tracing::warn!(upstream = name, trace_id = %ctx.trace_id(), error = %e, "upstream failed; skipping");
        }
    }
}
