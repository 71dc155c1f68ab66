use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::config::Config;

#[derive(Clone)]
pub enum Parser {
    Map {
        parser: Box<Parser>,
        map: TokenStream,
    },
    Raw(TokenStream),
    Type(Box<Type>),
}

impl Parser {
    /// Expression evaluating to `Result<_, Error>` for this parser applied to the field cursor.
    pub fn call(&self, config: &Config) -> TokenStream {
        let input = &config.input_name;
        let krate = &config.crate_path;

        match self {
            Self::Map { parser, map } => {
                let inner = parser.call(config);
                quote! { (#inner).map(#map) }
            }
            Self::Raw(parser) => {
                quote! { (#parser)(&mut *#input) }
            }
            Self::Type(ty) => {
                quote! { <#ty as #krate::FromFields>::from_fields(&mut *#input) }
            }
        }
    }
}
