use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Attribute, DataStruct, Ident, Path, Result, parse_quote};

use crate::{
    config::Config,
    generate::{structs::parser::StructParser, trailing_checks},
    meta::{self, Scope},
};

pub mod parser;

pub struct Struct {
    pub name: Path,
    pub trailing_checks: Option<TokenStream>,
    pub struct_parser: StructParser,
}

impl Struct {
    pub fn from_datastruct(
        name: &Ident,
        datastruct: &DataStruct,
        attributes: &[Attribute],
        config: &Config,
    ) -> Result<Self> {
        let attributes = meta::parse_attributes(attributes, Scope::Struct)?;
        let struct_parser = StructParser::from_fields(&datastruct.fields, config)?;

        Ok(Self {
            name: parse_quote!(#name),
            trailing_checks: trailing_checks(&attributes, config),
            struct_parser,
        })
    }

    pub fn generate_body(&self) -> Result<TokenStream> {
        let name = &self.name;
        let trailing_checks = &self.trailing_checks;

        let variable_name: Vec<_> = self
            .struct_parser
            .parsers
            .iter()
            .map(|field_parser| Ident::new(&field_parser.variable_name, Span::call_site()))
            .collect();

        let statements = self
            .struct_parser
            .parsers
            .iter()
            .zip(&variable_name)
            .map(|(field_parser, variable)| {
                let ty = &field_parser.ty;
                let call = &field_parser.call;
                quote! { let #variable: #ty = (#call)?; }
            });

        let struct_def = match (self.struct_parser.empty, self.struct_parser.unnamed) {
            // Unit struct
            (true, _) => quote! { #name },
            // Tuple struct
            (_, true) => quote! { #name(#(#variable_name),*) },
            (_, false) => quote! { #name { #(#variable_name),* } },
        };

        Ok(quote! {
            #(#statements)*
            #trailing_checks
            ::core::result::Result::Ok(#struct_def)
        })
    }
}
