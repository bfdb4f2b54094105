#![allow(dead_code)]

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use upcall::{RequestContext, Task};
use upcall_mock::{MockTask, SampleRecord};

/// Log to stderr; run with `--features tracing` to see the library's spans.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,upcall=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Four simulated upstreams with different latency, coverage and reliability.
#[must_use]
pub fn upstreams(ctx: &RequestContext) -> Vec<Task<SampleRecord>> {
    vec![
        MockTask::builder()
            .name("registry")
            .delay(Duration::from_millis(300))
            .returns(SampleRecord::new(None, Some(23), Some(true)))
            .build(ctx),
        MockTask::builder::<SampleRecord>()
            .name("flaky")
            .delay(Duration::from_millis(100))
            .fails("connection reset by peer")
            .build(ctx),
        MockTask::builder::<SampleRecord>()
            .name("archive")
            .delay(Duration::from_millis(200))
            .no_data()
            .build(ctx),
        MockTask::builder()
            .name("directory")
            .delay(Duration::from_millis(500))
            .returns(SampleRecord::new(Some("acme"), None, Some(false)))
            .build(ctx),
    ]
}
