//! Configuration types shared across paradigms and the caller façade.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Strategy for driving a set of upstream tasks.
///
/// Config files and [`FromStr`](std::str::FromStr) accept the same names: the
/// snake_case variant names plus the `centrifuge`, `sequencer` and
/// `short-circuit` aliases. Only `FromStr` also trims and ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paradigm {
    /// Poll every task concurrently and merge all results in completion order.
    #[default]
    #[serde(alias = "centrifuge")]
    Simultaneous,
    /// Run tasks one after another and merge every result in list order.
    #[serde(alias = "sequencer")]
    Sequential,
    /// Run tasks one after another and stop as soon as the merged record is complete.
    /// This is more economical for upstream quotas but may miss data from later tasks.
    #[serde(alias = "short-circuit")]
    ShortCircuit,
}

impl Paradigm {
    /// Stable lowercase label, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simultaneous => "simultaneous",
            Self::Sequential => "sequential",
            Self::ShortCircuit => "short_circuit",
        }
    }
}

impl std::fmt::Display for Paradigm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Paradigm {
    type Err = crate::UpcallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simultaneous" | "centrifuge" => Ok(Self::Simultaneous),
            "sequential" | "sequencer" => Ok(Self::Sequential),
            "short_circuit" | "short-circuit" => Ok(Self::ShortCircuit),
            other => Err(crate::UpcallError::InvalidArg(format!(
                "unknown paradigm: {other}"
            ))),
        }
    }
}

/// Configuration for one upstream activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpcallConfig {
    /// Strategy used to drive the tasks.
    pub paradigm: Paradigm,
    /// Optional timeout applied to each task individually.
    ///
    /// An expired task is recorded as `TaskTimeout` and skipped like any other failure.
    pub task_timeout: Option<Duration>,
    /// Optional deadline for the whole activation.
    ///
    /// When it elapses, in-flight tasks are dropped, pending tasks are skipped and the
    /// activation resolves with whatever was merged so far.
    pub request_timeout: Option<Duration>,
}

impl UpcallConfig {
    /// Reject configurations that can never succeed.
    ///
    /// # Errors
    /// Returns `InvalidArg` if either timeout is zero.
    pub fn validate(&self) -> Result<(), crate::UpcallError> {
        if self.task_timeout.is_some_and(|d| d.is_zero()) {
            return Err(crate::UpcallError::InvalidArg(
                "task_timeout must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout.is_some_and(|d| d.is_zero()) {
            return Err(crate::UpcallError::InvalidArg(
                "request_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
