use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Result, parse_quote};

use crate::{
    config::Config,
    generate::structs::Struct,
    meta::{MetaAttribute, MetaAttributeType},
};

mod structs;

/// Checks run once every struct field has been extracted, from `exact`.
pub fn trailing_checks(attributes: &[MetaAttribute], config: &Config) -> Option<TokenStream> {
    let cursor = &config.input_name;
    let krate = &config.crate_path;

    attributes
        .iter()
        .any(|attribute| attribute.r#type == MetaAttributeType::Exact)
        .then(|| {
            quote! {
                if !#cursor.is_exhausted() {
                    return ::core::result::Result::Err(#krate::Error::TrailingField {
                        index: #cursor.position(),
                    });
                }
            }
        })
}

pub fn generate_from_fields_impl(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(datastruct) = &input.data else {
        return Err(Error::new(
            input.ident.span(),
            "nmea0183-stream-derive: only structs are supported; use `parsable_enum!` for single-character indicators",
        ));
    };

    let config = Config::new();
    let body = Struct::from_datastruct(&input.ident, datastruct, &input.attrs, &config)?
        .generate_body()?;

    let name = &input.ident;
    let cursor = &config.input_name;
    let krate = &config.crate_path;

    // every type parameter must itself be extractable
    let mut generics = input.generics.clone();
    let params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause
            .predicates
            .push(parse_quote!(#param: #krate::FromFields));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::FromFields for #name #ty_generics #where_clause {
            fn from_fields(#cursor: &mut #krate::Fields<'_>) -> #krate::Result<Self> {
                #body
            }
        }
    })
}
