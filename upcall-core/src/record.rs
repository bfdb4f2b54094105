/// A record whose fields are each independently present or absent.
///
/// Every field is modelled as `Option<T>`: `Some` is present (an explicit empty
/// value such as `Some(String::new())` included) and `None` is absent. Keeping
/// the two apart is what lets an empty value still overwrite an absent one
/// during a merge.
///
/// Implement it with `#[derive(PartialResult)]` from `upcall-macros`, or by
/// hand:
///
/// ```rust
/// use upcall_core::PartialResult;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Price {
///     last: Option<f64>,
///     currency: Option<String>,
/// }
///
/// impl PartialResult for Price {
///     const FIELDS: &'static [&'static str] = &["last", "currency"];
///
///     fn presence(&self) -> Vec<bool> {
///         vec![self.last.is_some(), self.currency.is_some()]
///     }
///
///     fn absorb(&mut self, incoming: Self) {
///         if incoming.last.is_some() {
///             self.last = incoming.last;
///         }
///         if incoming.currency.is_some() {
///             self.currency = incoming.currency;
///         }
///     }
/// }
///
/// let mut p = Price { last: Some(1.0), currency: None };
/// p.absorb(Price { last: None, currency: Some("USD".into()) });
/// assert_eq!(p, Price { last: Some(1.0), currency: Some("USD".into()) });
/// ```
pub trait PartialResult: Default + Send + 'static {
    /// Declared field names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Fields that do not need to be present for the record to count as complete.
    const OPTIONAL: &'static [&'static str] = &[];

    /// One presence flag per entry of [`Self::FIELDS`], in the same order.
    fn presence(&self) -> Vec<bool>;

    /// Overwrite every field that is present in `incoming`; keep the rest.
    fn absorb(&mut self, incoming: Self);

    /// Per-field presence snapshot.
    fn completion_state(&self) -> CompletionState {
        CompletionState::new(Self::FIELDS, self.presence())
    }

    /// True if at least one field is present.
    fn has_data(&self) -> bool {
        self.presence().into_iter().any(|p| p)
    }
}

/// Per-field presence flags derived from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    fields: &'static [&'static str],
    present: Vec<bool>,
}

impl CompletionState {
    /// Pair declared field names with presence flags.
    ///
    /// Missing trailing flags are treated as absent.
    #[must_use]
    pub fn new(fields: &'static [&'static str], mut present: Vec<bool>) -> Self {
        present.resize(fields.len(), false);
        Self { fields, present }
    }

    /// Whether the named field is present. Unknown names are never present.
    #[must_use]
    pub fn is_present(&self, field: &str) -> bool {
        self.fields
            .iter()
            .position(|f| *f == field)
            .is_some_and(|i| self.present[i])
    }

    /// Names of absent fields, in declaration order.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        self.iter()
            .filter(|(_, present)| !present)
            .map(|(f, _)| f)
            .collect()
    }

    /// True if every declared field is present.
    #[must_use]
    pub fn all_present(&self) -> bool {
        self.present.iter().all(|p| *p)
    }

    /// True if every listed field is present.
    #[must_use]
    pub fn covers(&self, required: &[&str]) -> bool {
        required.iter().all(|f| self.is_present(f))
    }

    /// True if every field not listed in `R::OPTIONAL` is present.
    #[must_use]
    pub fn is_complete_for<R: PartialResult>(&self) -> bool {
        self.iter()
            .all(|(f, present)| present || R::OPTIONAL.contains(&f))
    }

    /// Iterate over `(field, present)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.fields.iter().copied().zip(self.present.iter().copied())
    }
}
