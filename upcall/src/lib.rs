//! Upcall fans a single request out to several upstreams and merges their
//! partial answers into one record.
//!
//! Overview
//! - Each upstream call is a [`Task`]: a lazily started future bound to a
//!   [`RequestContext`] and named after its upstream.
//! - A paradigm drives a list of tasks and folds every successful answer into an
//!   accumulator with later-wins, field-level precedence (see [`merge`]).
//! - Failures and empty answers are recorded and skipped; only when no task
//!   produced anything does an activation fail with `DataUnavailable`.
//!
//! Key behaviors and trade-offs
//! - [`UpstreamCentrifuge`] (`Paradigm::Simultaneous`): polls every task at once
//!   and merges in completion order; lowest latency, highest fan-out, and the
//!   slowest responder wins contested fields.
//! - [`UpstreamSequencer`] (`Paradigm::Sequential`): runs tasks in list order and
//!   merges every result; deterministic precedence (last in list wins) at the cost
//!   of summed latency.
//! - [`UpstreamShortCircuit`] (`Paradigm::ShortCircuit`): like the sequencer, but
//!   stops once the merged record satisfies its [`Completion`] predicate; saves
//!   upstream quota but may miss data from later tasks.
//! - Optional per-task and per-request deadlines bound latency; an elapsed
//!   request deadline keeps whatever was merged so far.
//!
//! Examples
//! Declaring a record and merging two upstreams:
//! ```rust,ignore
//! use upcall::{Paradigm, PartialResult, RequestContext, Task, UpstreamCaller};
//!
//! #[derive(Debug, Default, PartialResult)]
//! struct Profile {
//!     name: Option<String>,
//!     followers: Option<u64>,
//!     #[upcall(optional)]
//!     bio: Option<String>,
//! }
//!
//! let ctx = RequestContext::new("req-42");
//! let tasks = vec![
//!     Task::from_fn("directory", ctx.clone(), |ctx| directory.lookup(ctx)),
//!     Task::from_fn("social", ctx.clone(), |ctx| social.lookup(ctx)),
//! ];
//! let profile = UpstreamCaller::new(tasks, Paradigm::Simultaneous).activate().await?;
//! ```
//!
//! Tuning deadlines and the stop condition:
//! ```rust,ignore
//! use std::time::Duration;
//! use upcall::{Completion, Paradigm, UpstreamCaller};
//!
//! let report = UpstreamCaller::builder()
//!     .with_tasks(tasks)
//!     .paradigm(Paradigm::ShortCircuit)
//!     .completion(Completion::Required(vec!["name", "followers"]))
//!     .task_timeout(Duration::from_secs(2))
//!     .request_timeout(Duration::from_secs(5))
//!     .build()?
//!     .activate_with_report()
//!     .await?;
//! println!("merged from {:?}", report.contributors);
//! ```
//!
//! Features
//! - `tracing`: instruments activations and task calls with `tracing` spans and
//!   logs skipped upstreams.
#![warn(missing_docs)]

mod core;
/// Paradigms that drive task lists and merge their results.
pub mod paradigm;

pub use crate::core::{UpstreamCaller, UpstreamCallerBuilder};
pub use paradigm::{CallParadigm, UpstreamCentrifuge, UpstreamSequencer, UpstreamShortCircuit};

pub use upcall_core::{
    Completion, CompletionState, Paradigm, PartialResult, RequestContext, Task, TaskFuture,
    TaskOutcome, TraceId, UpcallConfig, UpcallError, UpcallReport, Upstream, merge, merge_all,
};
pub use upcall_macros::PartialResult;
