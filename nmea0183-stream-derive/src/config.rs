use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

#[derive(Clone)]
pub struct Config {
    pub input_name: Ident,
    pub crate_path: TokenStream,
}

impl Config {
    pub fn new() -> Self {
        Self {
            input_name: Ident::new("nmea_fields", Span::call_site()),
            crate_path: quote! { nmea0183_stream },
        }
    }
}
