use proc_macro2::Ident;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, PathArguments, Type};

pub struct FieldSpec {
    pub ident: Ident,
    pub name: String,
    pub optional: bool,
}

pub fn parse_fields(input: &DeriveInput) -> syn::Result<Vec<FieldSpec>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "PartialResult can only be derived for structs with named fields",
        ));
    };
    let named = match &data.fields {
        Fields::Named(named) => &named.named,
        Fields::Unit => return Ok(Vec::new()),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "PartialResult can only be derived for structs with named fields",
            ));
        }
    };

    named.iter().map(parse_field).collect()
}

fn parse_field(field: &Field) -> syn::Result<FieldSpec> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };
    if !is_option(&field.ty) {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "PartialResult fields must be `Option<T>` so presence can be tracked",
        ));
    }

    let mut optional = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("upcall")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("optional") {
                optional = true;
                Ok(())
            } else {
                Err(meta.error("unsupported upcall attribute; expected `optional`"))
            }
        })?;
    }

    Ok(FieldSpec {
        name: ident.unraw().to_string(),
        ident,
        optional,
    })
}

// Matches `Option<T>`, `std::option::Option<T>` and `core::option::Option<T>`.
fn is_option(ty: &Type) -> bool {
    let Type::Path(tp) = ty else {
        return false;
    };
    if tp.qself.is_some() {
        return false;
    }
    tp.path.segments.last().is_some_and(|seg| {
        seg.ident == "Option" && matches!(seg.arguments, PathArguments::AngleBracketed(_))
    })
}
