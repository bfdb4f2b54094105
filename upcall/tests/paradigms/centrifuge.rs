use upcall::{UpcallError, UpstreamCentrifuge};

use crate::helpers::{
    DEADLINE, chaos_tasks, ctx, empty_task, expect_data_unavailable, failing_task, record, secs,
    sleeping_task, with_deadline,
};

#[tokio::test(start_paused = true)]
async fn centrifuge_single_task_passes_through() {
    let ctx = ctx("centrifuge");
    let tasks = vec![sleeping_task(1, Some("test"), Some(23), Some(true), &ctx)];
    let result = UpstreamCentrifuge::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("test"), Some(23), Some(true)));
}

#[tokio::test(start_paused = true)]
async fn centrifuge_straggler_is_cut_by_request_deadline() {
    let ctx = ctx("double_centrifuge");
    let tasks = vec![
        sleeping_task(1, Some("test"), Some(23), Some(true), &ctx),
        sleeping_task(999, Some("sleepy"), Some(333), Some(false), &ctx),
    ];
    let start = tokio::time::Instant::now();
    let report = UpstreamCentrifuge::with_config(tasks, &with_deadline())
        .activate_with_report()
        .await
        .unwrap();
    assert!(start.elapsed() >= DEADLINE);
    assert!(start.elapsed() < DEADLINE + secs(1));
    assert_eq!(report.result, record(Some("test"), Some(23), Some(true)));
    assert!(report.timed_out);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.contributors, vec!["sleeping-1s"]);
}

#[tokio::test(start_paused = true)]
async fn centrifuge_skips_failing_task() {
    let ctx = ctx("failing_centrifuge");
    let tasks = vec![
        sleeping_task(5, Some("test"), Some(23), Some(true), &ctx),
        failing_task(1, &ctx),
    ];
    let report = UpstreamCentrifuge::new(tasks)
        .activate_with_report()
        .await
        .unwrap();
    assert_eq!(report.result, record(Some("test"), Some(23), Some(true)));
    assert_eq!(
        report.failures,
        vec![UpcallError::upstream("failing-1s", "failure")]
    );
    assert!(!report.timed_out);
}

#[tokio::test(start_paused = true)]
async fn centrifuge_skips_empty_task() {
    let ctx = ctx("none_centrifuge");
    let tasks = vec![
        sleeping_task(5, Some("test"), Some(23), Some(true), &ctx),
        empty_task(2, &ctx),
    ];
    let report = UpstreamCentrifuge::new(tasks)
        .activate_with_report()
        .await
        .unwrap();
    assert_eq!(report.result, record(Some("test"), Some(23), Some(true)));
    assert_eq!(report.failures, vec![UpcallError::no_data("empty-2s")]);
    assert_eq!(report.upstream_failures().count(), 0);
}

#[tokio::test(start_paused = true)]
async fn centrifuge_total_failure_is_data_unavailable() {
    let ctx = ctx("total_failure");
    let tasks = vec![failing_task(2, &ctx), failing_task(1, &ctx)];
    let failures = expect_data_unavailable(UpstreamCentrifuge::new(tasks).activate().await);
    // completion order, not list order
    assert_eq!(
        failures,
        vec![
            UpcallError::upstream("failing-1s", "failure"),
            UpcallError::upstream("failing-2s", "failure"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn centrifuge_merges_disjoint_results() {
    let ctx = ctx("centrifuge_merge");
    let tasks = vec![
        sleeping_task(1, None, Some(23), Some(true), &ctx),
        sleeping_task(3, Some("test"), None, Some(true), &ctx),
    ];
    let result = UpstreamCentrifuge::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("test"), Some(23), Some(true)));
}

#[tokio::test(start_paused = true)]
async fn centrifuge_latest_completion_overwrites() {
    let ctx = ctx("centrifuge_merge_overwrite");
    let tasks = vec![
        sleeping_task(1, None, None, Some(true), &ctx),
        sleeping_task(3, Some("test"), None, Some(true), &ctx),
        sleeping_task(5, Some("late_precedence"), Some(15), Some(false), &ctx),
    ];
    let result = UpstreamCentrifuge::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("late_precedence"), Some(15), Some(false)));
}

#[tokio::test(start_paused = true)]
async fn centrifuge_precedence_follows_completion_not_list_order() {
    let ctx = ctx("centrifuge_completion_order");
    let tasks = vec![
        sleeping_task(4, None, Some(2), None, &ctx),
        sleeping_task(1, None, Some(1), None, &ctx),
    ];
    let report = UpstreamCentrifuge::new(tasks)
        .activate_with_report()
        .await
        .unwrap();
    assert_eq!(report.result.field_two, Some(2));
    assert_eq!(report.contributors, vec!["sleeping-1s", "sleeping-4s"]);
}

#[tokio::test(start_paused = true)]
async fn centrifuge_empty_string_is_overwritten_by_later_value() {
    let ctx = ctx("centrifuge_merge_empty_strings");
    let tasks = vec![
        sleeping_task(1, Some(""), Some(23), Some(true), &ctx),
        sleeping_task(3, Some("test"), None, Some(true), &ctx),
    ];
    let result = UpstreamCentrifuge::new(tasks).activate().await.unwrap();
    assert_eq!(result, record(Some("test"), Some(23), Some(true)));
}

#[tokio::test(start_paused = true)]
async fn centrifuge_chaos() {
    let ctx = ctx("centrifuge_chaos");
    let report = UpstreamCentrifuge::with_config(chaos_tasks(&ctx), &with_deadline())
        .activate_with_report()
        .await
        .unwrap();
    assert_eq!(
        report.result,
        record(Some("late_precedence"), Some(15), Some(false))
    );
    assert_eq!(
        report.contributors,
        vec!["sleeping-1s", "sleeping-3s", "sleeping-5s"]
    );
    // failing-1s, empty-2s, failing-2s, empty-3s
    assert_eq!(report.failures.len(), 4);
    assert_eq!(report.skipped, 3);
    assert!(report.timed_out);
}

#[tokio::test]
async fn centrifuge_without_tasks_is_data_unavailable() {
    let failures = expect_data_unavailable(
        UpstreamCentrifuge::<crate::helpers::SampleRecord>::new(Vec::new())
            .activate()
            .await,
    );
    assert!(failures.is_empty());
}
