//! # Positional field extraction
//!
//! Sentence variants read their values out of the tokenized field list in
//! order. [`Fields`] is the cursor over that list and [`FromFields`] is the
//! trait every extractable type implements, either by hand or through
//! `#[derive(FromFields)]`.
//!
//! Individual field grammars are small nom parsers that must consume the
//! whole field; a partial match is reported as [`Error::InvalidField`].

use nom::{
    IResult, Parser,
    bytes::complete::take,
    character::complete::{anychar, u8 as dec_u8},
    combinator::all_consuming,
    number::complete::float,
};

use crate::{Error, Result};

/// Trait for types that can be extracted from the fields of a sentence.
///
/// Implementations consume as many fields as they need from the cursor and
/// leave it positioned on the next unread field. Implementations are provided
/// for the primitive types, `String`, `char`, `Option<T>`, `Vec<T>`,
/// `heapless::Vec<T, N>`, `time::Time` and `time::Date`.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{Fields, FromFields};
///
/// let raw = ["42", "", "1.5"].map(String::from);
/// let mut fields = Fields::new(&raw);
///
/// assert_eq!(u8::from_fields(&mut fields), Ok(42));
/// assert_eq!(Option::<u8>::from_fields(&mut fields), Ok(None));
/// assert_eq!(f32::from_fields(&mut fields), Ok(1.5));
/// assert!(fields.is_exhausted());
/// ```
///
/// # Implementing for Custom Types
///
/// ```rust
/// use nmea0183_stream::{Fields, FromFields, Result};
///
/// struct Depth {
///     meters: f32,
///     offset: Option<f32>,
/// }
///
/// impl FromFields for Depth {
///     fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
///         Ok(Depth {
///             meters: f32::from_fields(fields)?,
///             offset: Option::<f32>::from_fields(fields)?,
///         })
///     }
/// }
/// ```
pub trait FromFields: Sized {
    /// Extracts a value starting at the cursor's current position.
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self>;
}

/// A cursor over the field list of one sentence.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    fields: &'a [String],
    position: usize,
}

impl<'a> Fields<'a> {
    pub fn new(fields: &'a [String]) -> Self {
        Self {
            fields,
            position: 0,
        }
    }

    /// Zero-based index of the next unread field.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of fields not yet consumed.
    pub fn remaining(&self) -> usize {
        self.fields.len().saturating_sub(self.position)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next field without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.get(self.position)
    }

    /// Returns the field at `index` regardless of the cursor position.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Consumes and returns the next field, `None` past the end.
    pub fn next_field(&mut self) -> Option<&'a str> {
        let field = self.peek()?;
        self.position += 1;
        Some(field)
    }

    /// Consumes the next field, failing with [`Error::MissingField`] when it is
    /// absent or empty.
    pub fn require(&mut self) -> Result<&'a str> {
        let index = self.position;
        match self.next_field() {
            Some(field) if !field.is_empty() => Ok(field),
            _ => Err(Error::MissingField { index }),
        }
    }

    /// Skips `count` fields. Skipping past the end leaves the cursor exhausted.
    pub fn skip(&mut self, count: usize) {
        self.position = self
            .position
            .saturating_add(count)
            .min(self.fields.len());
    }

    /// Consumes the next field and runs `parser` over all of it.
    ///
    /// ```rust
    /// use nmea0183_stream::Fields;
    /// use nom::character::complete::u16;
    ///
    /// let raw = ["270".to_string()];
    /// let mut fields = Fields::new(&raw);
    /// assert_eq!(fields.parse_with(u16), Ok(270));
    /// ```
    pub fn parse_with<O, P>(&mut self, parser: P) -> Result<O>
    where
        P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
    {
        let index = self.position;
        let value = self.require()?;

        all_consuming(parser)
            .parse(value)
            .map(|(_, output)| output)
            .map_err(|_| Error::InvalidField {
                index,
                value: value.to_string(),
            })
    }

    /// Builds an [`Error::InvalidField`] for the field at `index`.
    pub fn invalid(&self, index: usize) -> Error {
        Error::InvalidField {
            index,
            value: self.get(index).unwrap_or_default().to_string(),
        }
    }
}

macro_rules! impl_integer_type {
    ($($t:ident),*) => ($(
        impl FromFields for $t {
            fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
                fields.parse_with(nom::character::complete::$t)
            }
        }
    )*)
}

impl_integer_type!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! impl_float_type {
    ($($t:ty, $p:ident),*) => ($(
        impl FromFields for $t {
            fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
                fields.parse_with(nom::number::complete::$p)
            }
        }
    )*)
}

impl_float_type!(f32, float, f64, double);

impl FromFields for char {
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
        fields.parse_with(anychar)
    }
}

impl FromFields for String {
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
        fields.require().map(str::to_string)
    }
}

/// An empty or absent field yields `None`; the empty field is consumed.
impl<T: FromFields> FromFields for Option<T> {
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
        match fields.peek() {
            None => Ok(None),
            Some("") => {
                fields.skip(1);
                Ok(None)
            }
            Some(_) => T::from_fields(fields).map(Some),
        }
    }
}

/// Consumes every remaining field.
impl<T: FromFields> FromFields for Vec<T> {
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
        let mut elems = Vec::with_capacity(fields.remaining());
        while !fields.is_exhausted() {
            elems.push(T::from_fields(fields)?);
        }
        Ok(elems)
    }
}

/// Consumes remaining fields until `N` elements have been extracted.
impl<T: FromFields, const N: usize> FromFields for heapless::Vec<T, N> {
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
        let mut elems = heapless::Vec::new();
        while !fields.is_exhausted() && !elems.is_full() {
            if elems.push(T::from_fields(fields)?).is_err() {
                break;
            }
        }
        Ok(elems)
    }
}

fn two_digits(i: &str) -> IResult<&str, u8> {
    take(2usize).and_then(dec_u8).parse(i)
}

/// UTC time of day, `hhmmss[.sss]`.
impl FromFields for time::Time {
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
        let index = fields.position();
        let (hour, minute, second) = fields.parse_with((two_digits, two_digits, float))?;

        if second.is_sign_negative() || !second.is_finite() {
            return Err(fields.invalid(index));
        }

        let milliseconds = (second.fract() * 1000.0).round().min(999.0);
        time::Time::from_hms_milli(hour, minute, second.trunc() as u8, milliseconds as u16)
            .map_err(|_| fields.invalid(index))
    }
}

/// Calendar date, `ddmmyy`. Two-digit years 83 to 99 belong to the 1900s.
impl FromFields for time::Date {
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
        let index = fields.position();
        let (day, month, year) = fields.parse_with((two_digits, two_digits, two_digits))?;

        let month = time::Month::try_from(month).map_err(|_| fields.invalid(index))?;
        let year = match year {
            83..=99 => 1900 + year as i32,
            _ => 2000 + year as i32,
        };

        time::Date::from_calendar_date(year, month, day).map_err(|_| fields.invalid(index))
    }
}
