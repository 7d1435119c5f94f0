//! `#[derive(Filterable)]`: attribute constants and accessors for sift.

mod attrs;
mod derive;

pub use derive::filterable_derive_impl;
