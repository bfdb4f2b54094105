mod common;

use upcall::{Paradigm, RequestContext, UpstreamCaller};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    for paradigm in [
        Paradigm::Simultaneous,
        Paradigm::Sequential,
        Paradigm::ShortCircuit,
    ] {
        let ctx = RequestContext::new(format!("fan-out-{paradigm}"));
        let started = std::time::Instant::now();
        let report = UpstreamCaller::new(common::upstreams(&ctx), paradigm)
            .activate_with_report()
            .await?;
        println!(
            "{paradigm:>13}: {:?} from {:?} in {:?} ({} absorbed failures, {} skipped)",
            report.result,
            report.contributors,
            started.elapsed(),
            report.failures.len(),
            report.skipped,
        );
    }
    Ok(())
}
