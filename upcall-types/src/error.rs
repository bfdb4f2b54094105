use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the upcall workspace.
///
/// Per-task signals (`NoData`, `Upstream`, `TaskTimeout`) are absorbed by the
/// paradigms; only `DataUnavailable` escapes an activation at runtime.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UpcallError {
    /// The upstream legitimately has nothing for this request.
    #[error("no data from {upstream}")]
    NoData {
        /// Name of the upstream task that came back empty.
        upstream: String,
    },

    /// The upstream call itself failed (network, parse, protocol...).
    #[error("{upstream} failed: {msg}")]
    Upstream {
        /// Name of the upstream task that failed.
        upstream: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual task exceeded the configured task timeout.
    #[error("upstream timed out: {upstream}")]
    TaskTimeout {
        /// Name of the upstream task that timed out.
        upstream: String,
    },

    /// No task produced usable data; contains the absorbed per-task failures.
    #[error("data unavailable: no upstream produced data ({} failures)", .failures.len())]
    DataUnavailable {
        /// Failures absorbed while the paradigm ran, in completion order.
        failures: Vec<UpcallError>,
    },

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl UpcallError {
    /// Helper: build a `NoData` error for an upstream name.
    pub fn no_data(upstream: impl Into<String>) -> Self {
        Self::NoData {
            upstream: upstream.into(),
        }
    }

    /// Helper: build an `Upstream` error with the upstream name and message.
    pub fn upstream(upstream: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Upstream {
            upstream: upstream.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `TaskTimeout` error.
    pub fn task_timeout(upstream: impl Into<String>) -> Self {
        Self::TaskTimeout {
            upstream: upstream.into(),
        }
    }

    /// Helper: build a `DataUnavailable` error from absorbed failures.
    #[must_use]
    pub const fn data_unavailable(failures: Vec<Self>) -> Self {
        Self::DataUnavailable { failures }
    }

    /// Returns true for the benign "nothing here" signal.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    /// Returns true if this error reports a failed upstream call.
    ///
    /// Timeouts count as failures; `NoData` does not.
    #[must_use]
    pub const fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::TaskTimeout { .. })
    }

    /// Name of the upstream this error is attributed to, if any.
    #[must_use]
    pub fn upstream_name(&self) -> Option<&str> {
        match self {
            Self::NoData { upstream }
            | Self::Upstream { upstream, .. }
            | Self::TaskTimeout { upstream } => Some(upstream),
            Self::DataUnavailable { .. } | Self::InvalidArg(_) => None,
        }
    }

    /// Flatten nested `DataUnavailable` structures into a plain vector.
    ///
    /// This preserves other error variants as-is and unwraps recursively.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::DataUnavailable { failures } => {
                failures.into_iter().flat_map(Self::flatten).collect()
            }
            other => vec![other],
        }
    }
}
