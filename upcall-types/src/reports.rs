//! Report envelopes produced by activations.

use serde::{Deserialize, Serialize};

use crate::error::UpcallError;

/// Outcome of a successful activation together with its attribution.
///
/// `result` is the merged record; `contributors` lists the tasks whose data was
/// merged, in merge order (the last contributor won every field it set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcallReport<R> {
    /// Merged record.
    pub result: R,
    /// Names of tasks that contributed data, in merge order.
    pub contributors: Vec<String>,
    /// Non-fatal issues absorbed while running tasks.
    pub failures: Vec<UpcallError>,
    /// Tasks that never finished: pending when the short circuit fired, or still
    /// pending or in flight when the request deadline elapsed.
    pub skipped: usize,
    /// Whether the request deadline cut the activation short.
    pub timed_out: bool,
}

impl<R> UpcallReport<R> {
    /// Drop the attribution and keep the merged record.
    pub fn into_result(self) -> R {
        self.result
    }

    /// Failures that indicate a broken upstream (excludes benign `NoData`).
    pub fn upstream_failures(&self) -> impl Iterator<Item = &UpcallError> {
        self.failures.iter().filter(|e| e.is_upstream_failure())
    }
}
