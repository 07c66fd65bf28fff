//! Procedural macros for the named-constructor crate
//!
//! This crate provides the `#[named_constructors]` attribute, which turns the
//! associated functions of an inherent impl block into factory declarations
//! the resolvers can match against record keys.

use proc_macro::TokenStream;

// Import modules
mod named_constructors;
mod utils;


/// Attribute macro declaring the named factories of a type
///
/// Every associated function without a receiver that returns `Self` (or
/// `Result<Self, E>` with `E` convertible into a boxed error) becomes a
/// factory. Parameters are bound to columns with `#[named("column")]`; a
/// function whose parameters are all named is eligible for resolution, one
/// with no names is skipped, and one with only some names is rejected when
/// the resolver is built.
///
/// # Example
///
/// ```rust,ignore
/// #[named_constructors]
/// impl Person {
///     fn new(#[named("pnr")] pnr: String, #[named("birth_date")] birth_date: Option<NaiveDate>) -> Self {
///         Self { pnr, birth_date }
///     }
///
///     fn parse(#[named("pnr")] pnr: String, #[named("raw")] raw: String) -> Result<Self, ParseError> {
///         // ...
///     }
/// }
/// ```
///
/// # Options
///
/// * `crate = "path"` - path of the runtime crate when it is re-exported
/// * `name = "..."` - type name used in diagnostics
#[proc_macro_attribute]
pub fn named_constructors(args: TokenStream, input: TokenStream) -> TokenStream {
    named_constructors::process_named_constructors(args, input)
}
