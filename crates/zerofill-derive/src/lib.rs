//! Derive macro for `zerofill`.
//!
//! `#[derive(Defaults)]` builds a record's descriptor table from its
//! `#[zerofill(...)]` attributes and implements `Record` and `ApplyDefaults`.

mod attrs;
mod defaults_gen;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

use defaults_gen::generate_defaults_impl;

#[proc_macro_derive(Defaults, attributes(zerofill))]
pub fn derive_defaults(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match generate_defaults_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
