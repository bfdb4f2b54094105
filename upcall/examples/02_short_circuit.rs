mod common;

use std::time::Duration;

use upcall::{Completion, Paradigm, RequestContext, UpstreamCaller};
use upcall_mock::SampleRecord;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let ctx = RequestContext::new("short-circuit-demo");

    // Stop as soon as both numeric and flag fields are known.
    let record = UpstreamCaller::builder()
        .with_tasks(common::upstreams(&ctx))
        .paradigm(Paradigm::ShortCircuit)
        .completion(Completion::Required(vec!["field_two", "field_three"]))
        .task_timeout(Duration::from_millis(400))
        .build()?
        .activate()
        .await?;
    println!("required fields: {record:?}");

    // Custom predicate: keep going until some upstream names the entity.
    let record = UpstreamCaller::builder()
        .with_tasks(common::upstreams(&ctx))
        .paradigm(Paradigm::ShortCircuit)
        .completion(Completion::custom(|r: &SampleRecord| r.field_one.is_some()))
        .build()?
        .activate()
        .await?;
    println!("custom predicate: {record:?}");
    Ok(())
}
