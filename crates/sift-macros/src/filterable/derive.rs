//! Implementation of `#[derive(Filterable)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Ident, Result, Type};

use super::attrs::{parse_filter_attrs, FilterKind};

/// Generates attribute constants and the `Filterable` impl.
pub fn filterable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Filterable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Filterable can only be derived for structs",
            ))
        }
    };

    let mut constants = Vec::new();
    let mut names = Vec::new();
    let mut arms = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attr = parse_filter_attrs(&field.attrs)?;
        if attr.skip {
            continue;
        }
        let Some(kind) = attr.kind else {
            continue;
        };

        let (attribute, span) = match &attr.rename {
            Some(lit) => (lit.value(), lit.span()),
            None => (field_name.to_string(), field_name.span()),
        };
        let const_name = constant_ident(&attribute, span)?;

        constants.push(quote! {
            /// Attribute name for filters.
            pub const #const_name: &'static str = #attribute;
        });
        names.push(attribute.clone());

        let value = if is_option(&field.ty) {
            let inner = value_expr(kind, &quote! { v });
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(v) => #inner,
                    ::core::option::Option::None => ::sift::Value::Null,
                }
            }
        } else {
            value_expr(kind, &quote! { &self.#field_name })
        };

        arms.push(quote! {
            #attribute => ::core::option::Option::Some(#value),
        });
    }

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#constants)*
        }

        impl #impl_generics ::sift::Filterable for #struct_name #ty_generics #where_clause {
            const ATTRIBUTES: &'static [&'static str] = &[#(#names),*];

            fn attribute_value(&self, attribute: &str) -> ::core::option::Option<::sift::Value<'_>> {
                match attribute {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// Builds a `Value` from an expression of type `&FieldType`.
fn value_expr(kind: FilterKind, reference: &TokenStream) -> TokenStream {
    match kind {
        FilterKind::Text => quote! {
            ::sift::Value::Text(::core::convert::AsRef::<str>::as_ref(#reference))
        },
        FilterKind::Number => quote! {
            ::sift::Value::Number(::sift::Number::from(*#reference))
        },
        FilterKind::Timestamp => quote! {
            ::sift::Value::Timestamp(::sift::FilterTimestamp::filter_timestamp(#reference))
        },
        FilterKind::Enum => quote! {
            ::sift::Value::Enum(::sift::FilterEnum::filter_discriminant(#reference))
        },
        FilterKind::Bool => quote! {
            ::sift::Value::Bool(*#reference)
        },
    }
}

/// Returns `true` for `Option<_>` field types (`None` maps to `Value::Null`).
fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

/// Builds the constant name for an attribute, rejecting names that do not
/// form an identifier.
fn constant_ident(attribute: &str, span: proc_macro2::Span) -> Result<Ident> {
    let name = to_screaming_snake_case(attribute);
    match syn::parse_str::<Ident>(&name) {
        Ok(_) => Ok(Ident::new(&name, span)),
        Err(_) => Err(Error::new(
            span,
            format!("attribute name '{attribute}' does not form a valid constant name ('{name}')"),
        )),
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
