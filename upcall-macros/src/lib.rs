mod partial;

use partial::derive_partial_result_impl;

/// Derive `PartialResult` for a struct whose named fields are all `Option<T>`.
///
/// Mark nullable-complete fields with `#[upcall(optional)]`; they are listed in
/// `OPTIONAL` and do not block schema completion.
#[proc_macro_derive(PartialResult, attributes(upcall))]
pub fn derive_partial_result(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    derive_partial_result_impl(input)
}
