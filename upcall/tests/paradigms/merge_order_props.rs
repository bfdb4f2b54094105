use proptest::prelude::*;
use upcall::{UpcallError, UpstreamCentrifuge, UpstreamSequencer, merge_all};

use crate::helpers::{MockTask, SampleRecord, ctx, secs};

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

fn arb_record() -> impl Strategy<Value = SampleRecord> {
    (
        proptest::option::of("[a-z]{0,4}"),
        proptest::option::of(-50i64..50),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(one, two, three)| SampleRecord {
            field_one: one,
            field_two: two,
            field_three: three,
        })
}

/// Records paired with a distinct delay each, so completion order is total.
fn arb_scripts() -> impl Strategy<Value = Vec<(u64, SampleRecord)>> {
    proptest::collection::vec(arb_record(), 1..6).prop_flat_map(|records| {
        let n = records.len() as u64;
        Just((1..=n).collect::<Vec<u64>>())
            .prop_shuffle()
            .prop_map(move |delays| delays.into_iter().zip(records.clone()).collect())
    })
}

fn tasks_for(scripts: &[(u64, SampleRecord)]) -> Vec<upcall::Task<SampleRecord>> {
    let ctx = ctx("props");
    scripts
        .iter()
        .enumerate()
        .map(|(i, (delay, rec))| {
            MockTask::builder()
                .name(format!("t{i}"))
                .delay(secs(*delay))
                .returns(rec.clone())
                .build(&ctx)
        })
        .collect()
}

fn expected(records: impl IntoIterator<Item = SampleRecord>) -> Option<SampleRecord> {
    let merged: SampleRecord = merge_all(records);
    (merged != SampleRecord::default()).then_some(merged)
}

fn data_of(res: Result<SampleRecord, UpcallError>) -> Option<SampleRecord> {
    match res {
        Ok(r) => Some(r),
        Err(UpcallError::DataUnavailable { .. }) => None,
        Err(other) => panic!("unexpected error: {other}"),
    }
}

proptest! {
    #[test]
    fn sequencer_equals_fold_in_list_order(scripts in arb_scripts()) {
        let got = paused_runtime()
            .block_on(UpstreamSequencer::new(tasks_for(&scripts)).activate());
        let want = expected(scripts.into_iter().map(|(_, r)| r));
        prop_assert_eq!(data_of(got), want);
    }

    #[test]
    fn centrifuge_equals_fold_in_completion_order(scripts in arb_scripts()) {
        let got = paused_runtime()
            .block_on(UpstreamCentrifuge::new(tasks_for(&scripts)).activate());
        let mut by_completion = scripts;
        by_completion.sort_by_key(|(delay, _)| *delay);
        let want = expected(by_completion.into_iter().map(|(_, r)| r));
        prop_assert_eq!(data_of(got), want);
    }
}
