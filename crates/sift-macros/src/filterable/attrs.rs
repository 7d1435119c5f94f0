//! Parsing of `#[filter(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, LitStr, Meta, Result, Token,
};

/// How a field is exposed to filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// `#[filter(Text)]`
    Text,
    /// `#[filter(Number)]`
    Number,
    /// `#[filter(Timestamp)]`
    Timestamp,
    /// `#[filter(Enum)]`
    Enum,
    /// `#[filter(Bool)]`
    Bool,
}

const EXPECTED_KINDS: &str = "Text, Number, Timestamp, Enum, Bool";

impl FilterKind {
    fn parse_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "Text" | "text" | "String" | "string" => Ok(FilterKind::Text),
            "Number" | "number" => Ok(FilterKind::Number),
            "Timestamp" | "timestamp" => Ok(FilterKind::Timestamp),
            "Enum" | "enum" => Ok(FilterKind::Enum),
            "Bool" | "bool" | "boolean" => Ok(FilterKind::Bool),
            other => Err(Error::new(
                span,
                format!("unknown filter kind: '{other}'. Expected one of: {EXPECTED_KINDS}"),
            )),
        }
    }

    fn from_ident(ident: &Ident) -> Result<Self> {
        Self::parse_name(&ident.to_string(), ident.span())
    }
}

/// Field-level attributes from `#[filter(...)]`.
#[derive(Debug, Clone, Default)]
pub struct FilterAttr {
    /// Value kind of the field.
    pub kind: Option<FilterKind>,
    /// Leave the field out.
    pub skip: bool,
    /// Attribute name used in filters (default: field name).
    pub rename: Option<LitStr>,
}

impl Parse for FilterAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FilterAttr::default();
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) => {
                    let ident = p.get_ident().ok_or_else(|| {
                        Error::new(p.span(), format!("expected {EXPECTED_KINDS} or skip"))
                    })?;
                    attr.kind = Some(FilterKind::from_ident(ident)?);
                }
                Meta::NameValue(nv) => {
                    let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(Error::new(nv.value.span(), "expected a string literal"));
                    };
                    if nv.path.is_ident("rename") {
                        attr.rename = Some(s.clone());
                    } else if nv.path.is_ident("ty") {
                        // keyword-safe spelling: ty = "enum", ty = "bool"
                        attr.kind = Some(FilterKind::parse_name(&s.value(), s.span())?);
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename or ty",
                        ));
                    }
                }
                Meta::List(_) => {
                    return Err(Error::new(
                        meta.span(),
                        format!(
                            "unknown filter attribute. Expected: {EXPECTED_KINDS}, skip, rename = \"...\", or ty = \"...\""
                        ),
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extracts the `#[filter(...)]` attribute of a field, if any.
pub fn parse_filter_attrs(attrs: &[Attribute]) -> Result<FilterAttr> {
    for attr in attrs {
        if attr.path().is_ident("filter") {
            return attr.parse_args::<FilterAttr>();
        }
    }
    Ok(FilterAttr::default())
}
