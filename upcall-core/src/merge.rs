use crate::record::PartialResult;

/// Merge `incoming` over `existing` with later-wins precedence.
///
/// - A field present in `incoming` (explicit empty values included) replaces
///   the one in `existing`.
/// - A field absent in `incoming` keeps whatever `existing` had, present or not.
/// - Fields are atomic: no partial merging inside a field, no aggregation.
///
/// Both inputs are consumed and a new record is returned, so the result never
/// aliases a task-owned value.
#[must_use]
pub fn merge<R: PartialResult>(mut existing: R, incoming: R) -> R {
    existing.absorb(incoming);
    existing
}

/// Fold records in order (first is oldest) starting from an empty record.
///
/// Equivalent to applying [`merge`] left to right; the last record that sets a
/// field decides its value.
pub fn merge_all<R, I>(records: I) -> R
where
    R: PartialResult,
    I: IntoIterator<Item = R>,
{
    records.into_iter().fold(R::default(), merge)
}
