use upcall_core::{PartialResult, TaskOutcome, UpcallError, UpcallReport, merge};

/// Running state of one activation: the merged record plus attribution.
///
/// Only the activating future touches it, so merges are applied one at a time
/// in the order outcomes are absorbed.
pub(crate) struct Accumulator<R> {
    merged: R,
    contributors: Vec<String>,
    failures: Vec<UpcallError>,
    finished: usize,
}

impl<R: PartialResult> Accumulator<R> {
    pub(crate) fn new() -> Self {
        Self {
            merged: R::default(),
            contributors: Vec::new(),
            failures: Vec::new(),
            finished: 0,
        }
    }

    /// Fold one finished task into the accumulator.
    ///
    /// Returns `true` when the outcome carried data and was merged.
    pub(crate) fn absorb(&mut self, upstream: String, outcome: TaskOutcome<R>) -> bool {
        self.finished += 1;
        match outcome {
            TaskOutcome::Data(record) => {
                self.merged = merge(std::mem::take(&mut self.merged), record);
                self.contributors.push(upstream);
                true
            }
            TaskOutcome::NoData => {
                self.failures.push(UpcallError::no_data(upstream));
                false
            }
            TaskOutcome::Failed(e) => {
                self.failures.push(e);
                false
            }
        }
    }

    pub(crate) const fn record(&self) -> &R {
        &self.merged
    }

    /// Number of tasks absorbed so far, whatever their outcome.
    pub(crate) const fn finished(&self) -> usize {
        self.finished
    }

    /// Close the activation.
    ///
    /// An accumulator that never merged data yields `DataUnavailable` carrying
    /// every recorded failure.
    pub(crate) fn finish(
        self,
        skipped: usize,
        timed_out: bool,
    ) -> Result<UpcallReport<R>, UpcallError> {
        if self.contributors.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                failures = self.failures.len(),
                skipped,
                timed_out,
                "no upstream produced data"
            );
            return Err(UpcallError::data_unavailable(self.failures));
        }
        Ok(UpcallReport {
            result: self.merged,
            contributors: self.contributors,
            failures: self.failures,
            skipped,
            timed_out,
        })
    }
}
