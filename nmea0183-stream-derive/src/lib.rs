//! # Derive macro for positional NMEA 0183 field extraction
//!
//! `#[derive(FromFields)]` generates an implementation of
//! `nmea0183_stream::FromFields` for a struct. Each struct field consumes
//! the next field(s) of a tokenized sentence, in declaration order, through
//! the field type's own `FromFields` implementation unless an `#[nmea(...)]`
//! attribute says otherwise.
//!
//! ```ignore
//! #[derive(FromFields)]
//! #[nmea(exact)]
//! pub struct Hdt {
//!     #[nmea(parser(with_unit('T')))]
//!     pub heading: Option<f32>,
//! }
//! ```
//!
//! Supported attributes:
//!
//! | Attribute        | Level  | Meaning                                              |
//! |------------------|--------|------------------------------------------------------|
//! | `parser(expr)`   | field  | call `expr(&mut Fields)` instead of the type's impl  |
//! | `parse_as(Type)` | field  | extract as `Type`, usually combined with `map`       |
//! | `map(expr)`      | field  | map the extracted value                              |
//! | `exact`          | struct | fail when fields remain after the last struct field  |

use generate::generate_from_fields_impl;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod config;
mod generate;
mod meta;
mod parser;

#[proc_macro_derive(FromFields, attributes(nmea))]
pub fn derive_from_fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_from_fields_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
