#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros used across the Summit workspace.
//!
//! Only one macro lives here today: [`macro@summit_error`], which turns a plain enum into
//! a `thiserror` error type with context support.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless the enum already derives them.
/// * A `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, Source>` of every variant that wraps a source error.
/// * `From<Source>` for every variant with a `source` field (or a field marked
///   `#[source]`/`#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A module-private `format_context` helper for use in `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. Variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[summit_derive::summit_error]
/// pub enum FetchError {
///     #[error("Transport error{}: {source}", format_context(.context))]
///     Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// async fn fetch(client: &reqwest::Client) -> Result<String, FetchError> {
///     let res = client.get("http://localhost").send().await.context("Fetching index")?;
///     res.text().await.context("Reading index body")
/// }
/// ```
#[proc_macro_attribute]
pub fn summit_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
