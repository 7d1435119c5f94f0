//! Proc macros for Sift.
//!
//! - [`Filterable`] - generate attribute constants and the `sift::Filterable`
//!   impl from struct field annotations

mod filterable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `sift::Filterable` for a struct.
///
/// Only annotated fields are exposed. Each exposed field gets an attribute
/// name constant, so filters can be written as
/// `builder.equal(true, User::USERNAME, "Ross")` and a typo becomes a compile
/// error instead of an evaluation error.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `Text` | Any `AsRef<str>` field |
/// | `Number` | Any `Copy` numeric field |
/// | `Timestamp` | Field implementing `FilterTimestamp` |
/// | `Enum` | Field implementing `FilterEnum` |
/// | `Bool` | Boolean field |
/// | `skip` | Leave the field out |
/// | `rename = "..."` | Attribute name to use instead of the field name |
/// | `ty = "..."` | Kind spelled as a string (`ty = "enum"`) |
///
/// `Option<_>` fields are detected from their type; `None` is exposed as
/// `Value::Null`, so `is_null` / `is_not_null` work on them.
///
/// # Generated Code
///
/// 1. Attribute constants (`User::ID`, `User::USERNAME`)
/// 2. `Filterable::ATTRIBUTES`, listing the exposed names
/// 3. `Filterable::attribute_value()`
///
/// # Example
///
/// ```ignore
/// use sift::{Filterable, PredicateBuilder};
/// use sift_macros::Filterable;
///
/// #[derive(Filterable)]
/// struct User {
///     #[filter(Number)]
///     id: i64,
///
///     #[filter(Text)]
///     username: String,
///
///     #[filter(Text)]
///     nickname: Option<String>,
///
///     #[filter(skip)]
///     password_hash: String,
/// }
///
/// let filter = PredicateBuilder::new()
///     .like_right(true, User::USERNAME, "R")
///     .is_null(true, User::NICKNAME)
///     .build();
///
/// let found = User::find_all(&users, &filter)?;
/// ```
#[proc_macro_derive(Filterable, attributes(filter))]
pub fn filterable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    filterable::filterable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
