//! Field helpers for values spread over more than one field, for use with
//! `#[nmea(parser(...))]`.

use nom::{
    Parser,
    bytes::complete::take,
    character::complete::u8 as dec_u8,
    number::complete::double,
};

use crate::{Fields, FromFields, Result, nmea_content::Location};

/// Value followed by its unit indicator, e.g. `12.5,M`.
///
/// Yields `None` unless both are present. A unit other than `unit` is invalid.
pub fn with_unit<T>(unit: char) -> impl Fn(&mut Fields<'_>) -> Result<Option<T>>
where
    T: FromFields,
{
    move |fields| {
        let value = Option::<T>::from_fields(fields)?;
        let index = fields.position();
        match Option::<char>::from_fields(fields)? {
            Some(found) if found != unit => Err(fields.invalid(index)),
            found => Ok(found.and(value)),
        }
    }
}

/// Floating point field where an empty value means "not available".
pub fn float_or_nan(fields: &mut Fields<'_>) -> Result<f64> {
    Option::<f64>::from_fields(fields).map(|value| value.unwrap_or(f64::NAN))
}

/// Like [`with_unit`], with an empty value reported as NaN.
pub fn with_unit_or_nan(unit: char) -> impl Fn(&mut Fields<'_>) -> Result<f64> {
    move |fields| with_unit::<f64>(unit)(fields).map(|value| value.unwrap_or(f64::NAN))
}

/// Magnetic variation `x.x,a`, west variation subtracts from true course.
pub fn magnetic_variation(fields: &mut Fields<'_>) -> Result<Option<f32>> {
    let value = Option::<f32>::from_fields(fields)?;
    let index = fields.position();
    match (value, Option::<char>::from_fields(fields)?) {
        (Some(value), Some('W')) => Ok(Some(-value)),
        (Some(value), Some('E')) => Ok(Some(value)),
        (_, None) => Ok(None),
        (None, Some('E' | 'W')) => Ok(None),
        (_, Some(_)) => Err(fields.invalid(index)),
    }
}

/// Position over four fields, `ddmm.mm,a,dddmm.mm,a`.
///
/// Four empty fields yield `None`.
pub fn location(fields: &mut Fields<'_>) -> Result<Option<Location>> {
    let start = fields.position();
    if (start..start + 4).all(|index| fields.get(index).is_none_or(str::is_empty)) {
        fields.skip(4);
        return Ok(None);
    }

    let latitude = coordinate(fields, 2, ('N', 'S'))?;
    let longitude = coordinate(fields, 3, ('E', 'W'))?;

    Ok(Some(Location {
        latitude,
        longitude,
    }))
}

/// `degrees` digits of whole degrees followed by decimal minutes, then the
/// hemisphere letter.
fn coordinate(fields: &mut Fields<'_>, degrees: usize, hemisphere: (char, char)) -> Result<f64> {
    let (deg, min) = fields.parse_with((take(degrees).and_then(dec_u8), double))?;

    let index = fields.position();
    let value = deg as f64 + min / 60.0;
    match char::from_fields(fields)? {
        c if c == hemisphere.0 => Ok(value),
        c if c == hemisphere.1 => Ok(-value),
        _ => Err(fields.invalid(index)),
    }
}
