use proc_macro2::TokenStream;
use syn::{Fields, Result, Type, parse2};

use crate::{
    config::Config,
    meta::{self, MetaAttribute, MetaAttributeType, Scope},
    parser::Parser,
};

/// Extraction of one struct field.
#[derive(Clone)]
pub struct FieldParser {
    pub variable_name: String,
    pub ty: Type,
    pub call: TokenStream,
}

#[derive(Clone)]
pub struct StructParser {
    pub empty: bool,
    pub unnamed: bool,
    pub parsers: Vec<FieldParser>,
}

impl StructParser {
    pub fn from_fields(fields: &Fields, config: &Config) -> Result<Self> {
        let parsers = fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let attributes = meta::parse_attributes(&field.attrs, Scope::Field)?;

                Ok(FieldParser {
                    variable_name: field
                        .ident
                        .as_ref()
                        .map_or_else(|| format!("_nmea_unnamed_{index}"), ToString::to_string),
                    ty: field.ty.clone(),
                    call: resolve(&field.ty, &attributes)?.call(config),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            empty: matches!(fields, Fields::Unit),
            unnamed: matches!(fields, Fields::Unnamed(_)),
            parsers,
        })
    }
}

/// Builds the parser for a value of type `ty` from the field attributes, in
/// declaration order. `map` wraps whatever the remaining attributes select.
fn resolve(ty: &Type, attributes: &[MetaAttribute]) -> Result<Parser> {
    let Some((attribute, rest)) = attributes.split_first() else {
        return Ok(Parser::Type(Box::new(ty.clone())));
    };

    let parser = match attribute.r#type {
        MetaAttributeType::Parser => Parser::Raw(attribute.arg()?.clone()),
        MetaAttributeType::ParseAs => resolve(&parse2(attribute.arg()?.clone())?, rest)?,
        MetaAttributeType::Map => Parser::Map {
            parser: Box::new(resolve(ty, rest)?),
            map: attribute.arg()?.clone(),
        },
        MetaAttributeType::Exact => resolve(ty, rest)?,
    };

    Ok(parser)
}
