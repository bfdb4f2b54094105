use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use upcall_types::{RequestContext, UpcallError};

use crate::record::PartialResult;

/// Long-lived upstream provider that can be asked for a partial record.
///
/// Implement this for provider clients; each request then becomes a [`Task`]
/// via [`Task::from_upstream`].
#[async_trait]
pub trait Upstream<R: Send>: Send + Sync {
    /// Human-readable upstream name used in logs, errors and reports.
    fn name(&self) -> &'static str;

    /// Fetch whatever this upstream knows for the request.
    ///
    /// Return `Err(UpcallError::NoData { .. })` (or a record with no field set)
    /// when the upstream has nothing; any other error is treated as a failed call.
    async fn fetch(&self, ctx: &RequestContext) -> Result<R, UpcallError>;
}

/// Boxed, not-yet-polled body of a [`Task`].
pub type TaskFuture<R> = BoxFuture<'static, Result<R, UpcallError>>;

/// Single-use unit of upstream work bound to a request context.
///
/// The wrapped future is not polled until a paradigm drives it, so a task that
/// is dropped before its turn never starts.
pub struct Task<R> {
    name: String,
    ctx: RequestContext,
    fut: TaskFuture<R>,
}

impl<R: Send + 'static> Task<R> {
    /// Wrap an existing future.
    pub fn new<F>(name: impl Into<String>, ctx: RequestContext, fut: F) -> Self
    where
        F: Future<Output = Result<R, UpcallError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            ctx,
            fut: Box::pin(fut),
        }
    }

    /// Build a task from a closure that receives its own copy of the context.
    ///
    /// The closure runs on first poll, not at construction time.
    pub fn from_fn<F, Fut>(name: impl Into<String>, ctx: RequestContext, f: F) -> Self
    where
        F: FnOnce(RequestContext) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, UpcallError>> + Send + 'static,
    {
        let task_ctx = ctx.clone();
        Self::new(name, ctx, async move { f(task_ctx).await })
    }

    /// Build a task that asks `upstream` for data about `ctx`.
    pub fn from_upstream(upstream: Arc<dyn Upstream<R>>, ctx: RequestContext) -> Self {
        let task_ctx = ctx.clone();
        Self::new(upstream.name(), ctx, async move {
            upstream.fetch(&task_ctx).await
        })
    }
}

impl<R> Task<R> {
    /// Upstream name of this task.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request context this task is bound to.
    #[must_use]
    pub const fn context(&self) -> &RequestContext {
        &self.ctx
    }

    /// Split into name, context and the not-yet-polled future.
    #[must_use]
    pub fn into_parts(self) -> (String, RequestContext, TaskFuture<R>) {
        (self.name, self.ctx, self.fut)
    }
}

impl<R> fmt::Debug for Task<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("trace_id", self.ctx.trace_id())
            .finish_non_exhaustive()
    }
}

/// Classified result of a finished task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<R> {
    /// The task produced a record with at least one field present.
    Data(R),
    /// The upstream had nothing for this request.
    NoData,
    /// The upstream call failed; the error is tagged with the task name.
    Failed(UpcallError),
}

impl<R: PartialResult> TaskOutcome<R> {
    /// Classify a task's raw result.
    ///
    /// - `Ok` with at least one present field is data.
    /// - `Ok` with every field absent, or `Err(NoData)`, is no data.
    /// - Any other error is a failure attributed to `upstream`.
    pub fn classify(upstream: &str, res: Result<R, UpcallError>) -> Self {
        match res {
            Ok(r) if r.has_data() => Self::Data(r),
            Ok(_) => Self::NoData,
            Err(e) if e.is_no_data() => Self::NoData,
            Err(e) => Self::Failed(tag_err(upstream, e)),
        }
    }
}

/// Attribute an error to the upstream that raised it.
///
/// Errors that already name an upstream pass through unchanged; anything else
/// is wrapped into `UpcallError::Upstream`.
pub fn tag_err(upstream: &str, e: UpcallError) -> UpcallError {
    match e {
        e @ (UpcallError::NoData { .. }
        | UpcallError::Upstream { .. }
        | UpcallError::TaskTimeout { .. }) => e,
        other => UpcallError::Upstream {
            upstream: upstream.to_string(),
            msg: other.to_string(),
        },
    }
}
