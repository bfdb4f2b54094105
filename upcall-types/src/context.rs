//! Request context carried by every upstream task.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Correlation identifier attached to all work done for one inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(Arc<str>);

impl TraceId {
    /// Construct a trace id from any string-like value.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TraceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TraceId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Immutable context handed to each task when it runs.
///
/// Cloning is cheap; every task owns its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestContext {
    trace_id: TraceId,
}

impl RequestContext {
    /// Create a context for the given correlation id.
    pub fn new(trace_id: impl Into<TraceId>) -> Self {
        Self {
            trace_id: trace_id.into(),
        }
    }

    /// Correlation id of the inbound request.
    #[must_use]
    pub const fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }
}
