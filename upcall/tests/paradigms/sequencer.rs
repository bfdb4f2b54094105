use upcall::{UpcallError, UpstreamSequencer};

use crate::helpers::{
    CallProbe, DEADLINE, ctx, empty_task, expect_data_unavailable, failing_task, probed_task,
    record, secs, sequential_chaos_tasks, sleeping_task, with_deadline,
};

#[tokio::test(start_paused = true)]
async fn sequencer_single_task_passes_through() {
    let ctx = ctx("sequencer");
    let tasks = vec![sleeping_task(1, Some("test"), Some(23), Some(true), &ctx)];
    let result = UpstreamSequencer::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("test"), Some(23), Some(true)));
}

#[tokio::test(start_paused = true)]
async fn sequencer_straggler_is_cut_by_request_deadline() {
    let ctx = ctx("double_sequencer");
    let tasks = vec![
        sleeping_task(1, Some("test"), Some(23), Some(true), &ctx),
        sleeping_task(999, Some("sleepy"), Some(333), Some(false), &ctx),
    ];
    let report = UpstreamSequencer::with_config(tasks, &with_deadline())
        .activate_with_report()
        .await
        .unwrap();
    assert_eq!(report.result, record(Some("test"), Some(23), Some(true)));
    assert!(report.timed_out);
    assert_eq!(report.skipped, 1);
}

#[tokio::test(start_paused = true)]
async fn sequencer_tasks_start_only_when_activated() {
    let ctx = ctx("sequencer_sequencing");
    let mut tasks = vec![sleeping_task(1, None, Some(23), Some(true), &ctx)];
    tokio::time::sleep(secs(1)).await;
    tasks.push(sleeping_task(2, Some("test"), Some(23), Some(true), &ctx));
    tokio::time::sleep(secs(1)).await;
    let sequencer = UpstreamSequencer::new(tasks);
    tokio::time::sleep(secs(1)).await;

    let start = tokio::time::Instant::now();
    let result = sequencer.activate().await.unwrap();
    // 1s + 2s run back to back, none of the idle time before activation counts
    assert!(start.elapsed() >= secs(3));
    assert!(start.elapsed() < secs(4));
    assert_eq!(result, record(Some("test"), Some(23), Some(true)));
}

#[tokio::test(start_paused = true)]
async fn sequencer_skips_failing_task() {
    let ctx = ctx("failing_sequencer");
    let tasks = vec![
        failing_task(1, &ctx),
        sleeping_task(5, Some("test"), Some(23), Some(true), &ctx),
    ];
    let result = UpstreamSequencer::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("test"), Some(23), Some(true)));
}

#[tokio::test(start_paused = true)]
async fn sequencer_skips_empty_task() {
    let ctx = ctx("none_sequencer");
    let tasks = vec![
        empty_task(2, &ctx),
        sleeping_task(5, Some("test"), Some(23), Some(true), &ctx),
    ];
    let result = UpstreamSequencer::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("test"), Some(23), Some(true)));
}

#[tokio::test(start_paused = true)]
async fn sequencer_total_failure_is_data_unavailable() {
    let ctx = ctx("total_failure");
    let tasks = vec![failing_task(2, &ctx), empty_task(1, &ctx)];
    let failures = expect_data_unavailable(UpstreamSequencer::new(tasks).activate().await);
    assert_eq!(
        failures,
        vec![
            UpcallError::upstream("failing-2s", "failure"),
            UpcallError::no_data("empty-1s"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn sequencer_merges_disjoint_results() {
    let ctx = ctx("sequencer_merge");
    let tasks = vec![
        sleeping_task(1, None, Some(23), Some(true), &ctx),
        sleeping_task(3, Some("test"), None, Some(true), &ctx),
    ];
    let result = UpstreamSequencer::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("test"), Some(23), Some(true)));
}

#[tokio::test(start_paused = true)]
async fn sequencer_later_task_overwrites() {
    let ctx = ctx("sequencer_merge_overwrite");
    let tasks = vec![
        sleeping_task(1, None, None, Some(true), &ctx),
        sleeping_task(3, Some("test"), None, Some(true), &ctx),
        sleeping_task(5, Some("late_precedence"), Some(15), Some(false), &ctx),
    ];
    let result = UpstreamSequencer::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("late_precedence"), Some(15), Some(false)));
}

#[tokio::test(start_paused = true)]
async fn sequencer_precedence_follows_list_order_not_latency() {
    let ctx = ctx("sequencer_list_order");
    let tasks = vec![
        sleeping_task(4, None, Some(1), None, &ctx),
        sleeping_task(1, None, Some(2), None, &ctx),
    ];
    let report = UpstreamSequencer::new(tasks)
        .activate_with_report()
        .await
        .unwrap();
    assert_eq!(report.result.field_two, Some(2));
    assert_eq!(report.contributors, vec!["sleeping-4s", "sleeping-1s"]);
}

#[tokio::test(start_paused = true)]
async fn sequencer_empty_string_is_overwritten_by_later_value() {
    let ctx = ctx("sequencer_merge_empty_strings");
    let tasks = vec![
        sleeping_task(1, Some(""), Some(23), Some(true), &ctx),
        sleeping_task(3, Some("test"), None, Some(true), &ctx),
    ];
    let result = UpstreamSequencer::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("test"), Some(23), Some(true)));
}

#[tokio::test(start_paused = true)]
async fn sequencer_runs_one_task_at_a_time() {
    let ctx = ctx("sequencer_probe");
    let probe = CallProbe::new();
    let tasks = vec![
        probed_task("first", 2, record(Some("a"), None, None), &probe, &ctx),
        probed_task("second", 1, record(Some("b"), None, None), &probe, &ctx),
    ];
    UpstreamSequencer::new(tasks).activate().await.unwrap();
    assert_eq!(
        probe.events().await,
        vec![
            upcall_mock::ProbeEvent::Started("first".into()),
            upcall_mock::ProbeEvent::Finished("first".into()),
            upcall_mock::ProbeEvent::Started("second".into()),
            upcall_mock::ProbeEvent::Finished("second".into()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn sequencer_chaos() {
    let ctx = ctx("sequencer_chaos");
    let start = tokio::time::Instant::now();
    let report = UpstreamSequencer::with_config(sequential_chaos_tasks(&ctx), &with_deadline())
        .activate_with_report()
        .await
        .unwrap();
    assert!(start.elapsed() >= DEADLINE);
    assert_eq!(
        report.result,
        record(Some("late_precedence"), Some(15), Some(false))
    );
    // sleeping-3s was still running at the deadline
    assert_eq!(report.skipped, 4);
    assert_eq!(report.failures.len(), 4);
    assert!(report.timed_out);
}
