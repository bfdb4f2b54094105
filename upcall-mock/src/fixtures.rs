use std::time::Duration;

use upcall_core::{RequestContext, Task};
use upcall_macros::PartialResult;

use crate::MockTask;

/// Three-field record used throughout the paradigm tests and demos.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialResult)]
pub struct SampleRecord {
    pub field_one: Option<String>,
    pub field_two: Option<i64>,
    pub field_three: Option<bool>,
}

impl SampleRecord {
    #[must_use]
    pub fn new(field_one: Option<&str>, field_two: Option<i64>, field_three: Option<bool>) -> Self {
        Self {
            field_one: field_one.map(str::to_string),
            field_two,
            field_three,
        }
    }
}

/// Task that sleeps `secs` seconds and then returns the given fields.
pub fn sleeping_task(
    secs: u64,
    field_one: Option<&str>,
    field_two: Option<i64>,
    field_three: Option<bool>,
    ctx: &RequestContext,
) -> Task<SampleRecord> {
    MockTask::builder()
        .name(format!("sleeping-{secs}s"))
        .delay(Duration::from_secs(secs))
        .returns(SampleRecord::new(field_one, field_two, field_three))
        .build(ctx)
}

/// Task that sleeps `secs` seconds and then fails with an upstream error.
pub fn failing_task(secs: u64, ctx: &RequestContext) -> Task<SampleRecord> {
    MockTask::builder::<SampleRecord>()
        .name(format!("failing-{secs}s"))
        .delay(Duration::from_secs(secs))
        .fails("failure")
        .build(ctx)
}

/// Task that sleeps `secs` seconds and then reports no data.
pub fn empty_task(secs: u64, ctx: &RequestContext) -> Task<SampleRecord> {
    MockTask::builder::<SampleRecord>()
        .name(format!("empty-{secs}s"))
        .delay(Duration::from_secs(secs))
        .no_data()
        .build(ctx)
}
