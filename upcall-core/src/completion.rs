use std::fmt;
use std::sync::Arc;

use upcall_types::UpcallError;

use crate::record::PartialResult;

/// Predicate deciding when a merged record holds enough data to stop early.
///
/// Only the short-circuit paradigm consults it; the others always run every task.
pub enum Completion<R> {
    /// Every field not listed in `R::OPTIONAL` is present.
    Schema,
    /// Every declared field is present, optional or not.
    AllFields,
    /// The listed fields are present.
    Required(Vec<&'static str>),
    /// Any data at all: stop after the first task that produced something.
    AnyData,
    /// Caller-supplied predicate over the merged record.
    Custom(Arc<dyn Fn(&R) -> bool + Send + Sync>),
}

impl<R> Completion<R> {
    /// Wrap a closure as a `Custom` predicate.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }
}

impl<R: PartialResult> Completion<R> {
    /// Evaluate the predicate against the current accumulator.
    #[must_use]
    pub fn is_satisfied(&self, record: &R) -> bool {
        match self {
            Self::Schema => record.completion_state().is_complete_for::<R>(),
            Self::AllFields => record.completion_state().all_present(),
            Self::Required(fields) => record.completion_state().covers(fields),
            Self::AnyData => record.has_data(),
            Self::Custom(f) => f(record),
        }
    }

    /// Check that a `Required` list only names declared fields.
    ///
    /// # Errors
    /// Returns `InvalidArg` listing the unknown field names.
    pub fn validate(&self) -> Result<(), UpcallError> {
        if let Self::Required(fields) = self {
            let unknown: Vec<&str> = fields
                .iter()
                .copied()
                .filter(|f| !R::FIELDS.contains(f))
                .collect();
            if !unknown.is_empty() {
                return Err(UpcallError::InvalidArg(format!(
                    "completion requires undeclared fields: {}",
                    unknown.join(", ")
                )));
            }
        }
        Ok(())
    }
}

#[allow(clippy::derivable_impls)]
impl<R> Default for Completion<R> {
    fn default() -> Self {
        Self::Schema
    }
}

impl<R> Clone for Completion<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Schema => Self::Schema,
            Self::AllFields => Self::AllFields,
            Self::Required(fields) => Self::Required(fields.clone()),
            Self::AnyData => Self::AnyData,
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Completion<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => f.write_str("Schema"),
            Self::AllFields => f.write_str("AllFields"),
            Self::Required(fields) => f.debug_tuple("Required").field(fields).finish(),
            Self::AnyData => f.write_str("AnyData"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
