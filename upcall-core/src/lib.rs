//! upcall-core
//!
//! Core traits and pure logic shared across the upcall ecosystem.
//!
//! - `record`: the `PartialResult` trait and per-field `CompletionState`.
//! - `merge`: later-wins, field-level merging of partial records.
//! - `completion`: predicates deciding when a merged record is "enough".
//! - `task`: single-use upstream tasks and the `Upstream` provider trait.
//!
//! Nothing in this crate schedules work; the paradigms in `upcall` decide how
//! tasks are polled.
#![warn(missing_docs)]

/// Predicates deciding when a merged record is complete.
pub mod completion;
/// Field-level merging of partial records.
pub mod merge;
/// Partial result records and their presence bookkeeping.
pub mod record;
/// Upstream tasks and the provider trait that mints them.
pub mod task;

pub use completion::Completion;
pub use merge::{merge, merge_all};
pub use record::{CompletionState, PartialResult};
pub use task::{Task, TaskFuture, TaskOutcome, Upstream, tag_err};
pub use upcall_types::{Paradigm, RequestContext, TraceId, UpcallConfig, UpcallError, UpcallReport};
