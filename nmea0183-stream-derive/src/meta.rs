//! `#[nmea(...)]` attribute parsing.
//!
//! Every keyword is described once in [`KEYWORDS`]: what argument it takes,
//! where it may appear and whether it may repeat.

use std::fmt;

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::{
    Attribute, Error, Expr, Ident, LitStr, Result, Token, Type, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token::Paren,
};

/// Item an attribute list is attached to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope {
    Struct,
    Field,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Struct => "struct",
            Self::Field => "field",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetaAttributeType {
    Exact,
    Map,
    ParseAs,
    Parser,
}

#[derive(Clone, Copy)]
enum Argument {
    Flag,
    Expr,
    Type,
}

struct Keyword {
    name: &'static str,
    kind: MetaAttributeType,
    argument: Argument,
    scopes: &'static [Scope],
    repeatable: bool,
}

const FIELD: &[Scope] = &[Scope::Field];
const STRUCT: &[Scope] = &[Scope::Struct];

#[rustfmt::skip]
const KEYWORDS: &[Keyword] = &[
    Keyword { name: "exact", kind: MetaAttributeType::Exact, argument: Argument::Flag, scopes: STRUCT, repeatable: false },
    Keyword { name: "map", kind: MetaAttributeType::Map, argument: Argument::Expr, scopes: FIELD, repeatable: true },
    Keyword { name: "parse_as", kind: MetaAttributeType::ParseAs, argument: Argument::Type, scopes: FIELD, repeatable: false },
    Keyword { name: "parser", kind: MetaAttributeType::Parser, argument: Argument::Expr, scopes: FIELD, repeatable: false },
];

/// Pairs that choose the field parser in two different ways.
const EXCLUSIVE: &[(MetaAttributeType, MetaAttributeType)] =
    &[(MetaAttributeType::Parser, MetaAttributeType::ParseAs)];

impl MetaAttributeType {
    fn keyword(self) -> &'static Keyword {
        KEYWORDS
            .iter()
            .find(|keyword| keyword.kind == self)
            .unwrap_or(&KEYWORDS[0])
    }
}

impl fmt::Display for MetaAttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().name)
    }
}

fn error(span: Span, message: impl fmt::Display) -> Error {
    Error::new(span, format!("nmea0183-stream-derive: {message}"))
}

#[derive(Debug)]
pub struct MetaAttribute {
    pub r#type: MetaAttributeType,
    arg: Option<TokenStream>,
    span: Span,
}

impl MetaAttribute {
    /// Argument of an attribute that takes one.
    pub fn arg(&self) -> Result<&TokenStream> {
        self.arg
            .as_ref()
            .ok_or_else(|| error(self.span, format!("`{}` expects an argument", self.r#type)))
    }
}

impl Parse for MetaAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident: Ident = input.parse()?;
        let name = ident.to_string();
        let keyword = KEYWORDS
            .iter()
            .find(|keyword| keyword.name == name)
            .ok_or_else(|| error(ident.span(), format!("unknown nmea attribute `{name}`")))?;

        let arg = match keyword.argument {
            Argument::Flag => None,
            Argument::Expr => Some(argument::<Expr>(input)?),
            Argument::Type => Some(argument::<Type>(input)?),
        };

        Ok(Self {
            r#type: keyword.kind,
            arg,
            span: ident.span(),
        })
    }
}

/// `(value)` or `= "value"`.
fn argument<P>(input: ParseStream) -> Result<TokenStream>
where
    P: Parse + ToTokens,
{
    let parsed: P = if input.peek(Paren) {
        let content;
        parenthesized!(content in input);
        content.parse()?
    } else if input.peek(Token![=]) {
        input.parse::<Token![=]>()?;
        input.parse::<LitStr>()?.parse()?
    } else {
        return Err(error(input.span(), "expected `(value)` or `= \"value\"`"));
    };

    Ok(parsed.into_token_stream())
}

/// Collects every `#[nmea(...)]` entry on an item and checks it is allowed there.
pub fn parse_attributes(attrs: &[Attribute], scope: Scope) -> Result<Vec<MetaAttribute>> {
    let mut seen: Vec<MetaAttributeType> = Vec::new();
    let mut attributes = Vec::new();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("nmea")) {
        let list = attr.parse_args_with(Punctuated::<MetaAttribute, Token![,]>::parse_terminated)?;

        for attribute in list {
            let kind = attribute.r#type;
            let keyword = kind.keyword();

            if !keyword.scopes.contains(&scope) {
                return Err(error(
                    attribute.span,
                    format!("`{kind}` is not allowed on a {scope}"),
                ));
            }
            if !keyword.repeatable && seen.contains(&kind) {
                return Err(error(attribute.span, format!("duplicate nmea attribute `{kind}`")));
            }
            if let Some(&(a, b)) = EXCLUSIVE.iter().find(|&&(a, b)| {
                (kind == a && seen.contains(&b)) || (kind == b && seen.contains(&a))
            }) {
                return Err(error(attribute.span, format!("`{a}` and `{b}` cannot be combined")));
            }

            seen.push(kind);
            attributes.push(attribute);
        }
    }

    Ok(attributes)
}
