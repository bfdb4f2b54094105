mod parse;

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::quote;
use syn::{DeriveInput, Path, parse_macro_input};

use proc_macro_crate::{FoundCrate, crate_name};

use parse::parse_fields;

fn resolve_upcall_core_path() -> Path {
    // Prefer the core crate; fall back to the façade, which re-exports the trait.
    let found = crate_name("upcall-core")
        .or_else(|_| crate_name("upcall"))
        .unwrap_or(FoundCrate::Itself);
    match found {
        FoundCrate::Itself => syn::parse_quote! { upcall_core },
        FoundCrate::Name(name) => {
            let ident = Ident::new(&name, Span::call_site());
            syn::parse_quote! { #ident }
        }
    }
}

pub fn derive_partial_result_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let fields = match parse_fields(&input) {
        Ok(f) => f,
        Err(e) => return e.to_compile_error().into(),
    };

    let upcall_core = resolve_upcall_core_path();
    let ty = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let idents: Vec<&Ident> = fields.iter().map(|f| &f.ident).collect();
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    let optional: Vec<&str> = fields
        .iter()
        .filter(|f| f.optional)
        .map(|f| f.name.as_str())
        .collect();

    let expanded = quote! {
        impl #impl_generics #upcall_core::PartialResult for #ty #ty_generics #where_clause {
            const FIELDS: &'static [&'static str] = &[#(#names),*];
            const OPTIONAL: &'static [&'static str] = &[#(#optional),*];

            fn presence(&self) -> ::std::vec::Vec<bool> {
                ::std::vec![#(self.#idents.is_some()),*]
            }

            fn absorb(&mut self, incoming: Self) {
                let Self { #(#idents),* } = incoming;
                #(
                    if #idents.is_some() {
                        self.#idents = #idents;
                    }
                )*
            }
        }
    };

    expanded.into()
}
