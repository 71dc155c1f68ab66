//! # Sentence tokenizer
//!
//! Splits one line of text, `$TTSSS,D1,D2,...,Dn*CC`, into its type id, its
//! ordered field list and the optional declared checksum. Empty fields are kept
//! as empty strings because sentence variants index fields by position.

use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::complete::char,
    combinator::{opt, rest},
    sequence::preceded,
};

use crate::{
    Error, Result,
    checksum::{compute, format_checksum, parse_declared},
};

/// Placeholder standing in for the talker prefix in talker-independent type ids.
pub const WILDCARD_TALKER: &str = "--";

/// Defines how the parser should handle sentence checksums.
///
/// NMEA 0183 sentences can include an optional checksum in the format `*CC` where
/// CC is a two-digit hexadecimal value representing the XOR of all bytes in the
/// sentence content (excluding the `$` prefix and `*` delimiter).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    /// Checksum is required and must be present.
    ///
    /// The parser will fail if no `*CC` checksum is found at the end of the sentence.
    /// If a checksum is present, it will be validated against the calculated checksum.
    Required,

    /// Checksum is optional but will be validated if present.
    #[default]
    Optional,
}

/// One tokenized line. Ephemeral: variants copy what they need out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Talker prefix plus sentence code, e.g. `GPGSV`
    pub type_id: String,
    /// Comma-separated values after the type id, empty fields preserved
    pub fields: Vec<String>,
    /// Checksum declared after `*`, if any
    pub checksum: Option<u8>,
}

impl Sentence {
    /// Builds a sentence from parts, without a declared checksum.
    pub fn new<S: Into<String>>(
        type_id: impl Into<String>,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            checksum: None,
        }
    }

    /// Tokenizes one line. Surrounding whitespace and line terminators are ignored.
    ///
    /// ```rust
    /// use nmea0183_stream::Sentence;
    ///
    /// let sentence = Sentence::tokenize("$GPBOD,,T,,M,,*47").unwrap();
    /// assert_eq!(sentence.type_id, "GPBOD");
    /// assert_eq!(sentence.fields, ["", "T", "", "M", "", ""]);
    /// assert_eq!(sentence.checksum, Some(0x47));
    /// ```
    pub fn tokenize(line: &str) -> Result<Self> {
        let line = line.trim();

        if !line.is_ascii() {
            return Err(Error::NonAscii);
        }

        let (content, declared) = split_line(line)
            .map(|(_, parts)| parts)
            .map_err(|_| Error::Framing("missing start marker"))?;

        let mut tokens = content.split(',');
        let type_id = tokens
            .next()
            .filter(|type_id| !type_id.is_empty())
            .ok_or(Error::Framing("missing sentence type"))?;

        let checksum = declared.map(parse_declared).transpose()?;

        Ok(Self {
            type_id: type_id.to_string(),
            fields: tokens.map(str::to_string).collect(),
            checksum,
        })
    }

    /// Two-character talker prefix, or the whole id for ids shorter than that.
    pub fn talker_prefix(&self) -> &str {
        self.type_id.get(..2).unwrap_or(&self.type_id)
    }

    /// Sentence code without talker, the last three characters of the type id.
    pub fn suffix(&self) -> &str {
        type_suffix(&self.type_id)
    }

    /// Talker-independent form of the type id, e.g. `--GSV` for `GPGSV`.
    ///
    /// Only defined for five-character, non-proprietary ids.
    pub fn wildcard_id(&self) -> Option<String> {
        wildcard_id(&self.type_id)
    }

    /// Checksum calculated from the type id and fields.
    pub fn calculated_checksum(&self) -> u8 {
        compute(&self.type_id, &self.fields)
    }

    /// Renders the canonical wire form, `$TYPE,F1,...,Fn*CC`, without line terminator.
    pub fn to_wire(&self) -> String {
        render(&self.type_id, &self.fields)
    }
}

/// Last three characters of a type id.
pub fn type_suffix(type_id: &str) -> &str {
    type_id
        .len()
        .checked_sub(3)
        .and_then(|start| type_id.get(start..))
        .unwrap_or(type_id)
}

/// Replaces the two-character talker prefix of a five-character id with [`WILDCARD_TALKER`].
///
/// Proprietary ids (`P...`) carry a manufacturer code instead of a talker and
/// have no wildcard form.
pub fn wildcard_id(type_id: &str) -> Option<String> {
    if type_id.len() == 5 && !type_id.starts_with(WILDCARD_TALKER) && !type_id.starts_with('P') {
        type_id
            .get(2..)
            .map(|code| format!("{WILDCARD_TALKER}{code}"))
    } else {
        None
    }
}

/// Renders a type id and fields as a checksummed sentence.
pub fn render<S: AsRef<str>>(type_id: &str, fields: &[S]) -> String {
    let mut line = format!("${type_id}");
    for field in fields {
        line.push(',');
        line.push_str(field.as_ref());
    }
    line.push('*');
    line.push_str(&format_checksum(compute(type_id, fields)));
    line
}

/// `$` content [`*` checksum]
fn split_line(i: &str) -> IResult<&str, (&str, Option<&str>)> {
    preceded(char('$'), (take_till(|c| c == '*'), opt(preceded(char('*'), rest)))).parse(i)
}
