mod common;

use upcall::{RequestContext, UpcallConfig, UpstreamCaller};
use upcall_mock::SampleRecord;

const CONFIG: &str = r#"{
    "paradigm": "simultaneous",
    "task_timeout": { "secs": 0, "nanos": 400000000 },
    "request_timeout": { "secs": 1, "nanos": 0 }
}"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let cfg: UpcallConfig = serde_json::from_str(CONFIG)?;
    let ctx = RequestContext::new("config-demo");
    let report = UpstreamCaller::<SampleRecord>::builder()
        .with_tasks(common::upstreams(&ctx))
        .config(cfg)
        .build()?
        .activate_with_report()
        .await?;

    // "directory" (500ms) exceeds the 400ms task timeout.
    println!("merged: {:?}", report.result);
    for failure in report.upstream_failures() {
        println!("absorbed: {failure}");
    }
    Ok(())
}
