#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Fields, FromFields, HasTimestamp, Result};

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ZDA {
    /// Fix time in UTC
    pub time: Option<time::Time>,
    /// Fix date in UTC
    pub date: Option<time::Date>,
    /// Local zone description, offset from UTC
    pub utc_offset: Option<time::UtcOffset>,
}

impl FromFields for ZDA {
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
        let time = Option::<time::Time>::from_fields(fields)?;
        let date = date_full_year(fields)?;
        let utc_offset = utc_offset(fields)?;

        if !fields.is_exhausted() {
            return Err(Error::TrailingField {
                index: fields.position(),
            });
        }

        Ok(Self {
            time,
            date,
            utc_offset,
        })
    }
}

impl HasTimestamp for ZDA {
    fn timestamp(&self) -> Option<time::Time> {
        self.time
    }
}

/// Day, month and four-digit year over three fields, all empty or all present.
fn date_full_year(fields: &mut Fields<'_>) -> Result<Option<time::Date>> {
    let index = fields.position();
    let day = Option::<u8>::from_fields(fields)?;
    let month = Option::<u8>::from_fields(fields)?;
    let year = Option::<u16>::from_fields(fields)?;

    match (day, month, year) {
        (None, None, None) => Ok(None),
        (Some(day), Some(month), Some(year)) => {
            let month = time::Month::try_from(month).map_err(|_| fields.invalid(index + 1))?;
            time::Date::from_calendar_date(year as i32, month, day)
                .map(Some)
                .map_err(|_| fields.invalid(index))
        }
        _ => Err(Error::MissingField {
            index: index + [day.is_some(), month.is_some(), year.is_some()]
                .iter()
                .position(|present| !present)
                .unwrap_or_default(),
        }),
    }
}

/// Local zone hours (signed) and minutes, both empty or both present.
fn utc_offset(fields: &mut Fields<'_>) -> Result<Option<time::UtcOffset>> {
    let index = fields.position();
    let hours = Option::<i8>::from_fields(fields)?;
    let minutes = Option::<i8>::from_fields(fields)?;

    match (hours, minutes) {
        (None, None) => Ok(None),
        (Some(hours), minutes) => {
            // minutes take the sign of the hours, including "-00"
            let minutes = minutes.unwrap_or_default();
            let minutes = if fields.get(index).is_some_and(|h| h.starts_with('-')) {
                -minutes.abs()
            } else {
                minutes
            };
            time::UtcOffset::from_hms(hours, minutes, 0)
                .map(Some)
                .map_err(|_| fields.invalid(index))
        }
        (None, Some(_)) => Err(Error::MissingField { index }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<ZDA> {
        let raw: Vec<String> = input.split(',').map(str::to_string).collect();
        ZDA::from_fields(&mut Fields::new(&raw))
    }

    #[test]
    fn test_zda_parsing() {
        let cases = [
            "123456.78,01,01,2023,,",
            "132502.00,11,07,2025,+03,00",
            ",,,,,",
            "132502.00,11,07,2025,,",
            "132502.00,,,,,",
            "132502.00,,,,-03,30",
            "120000.00,29,02,2024,01,00",
            "101112.13,12,11,2025,+14,00",
            "132502.00,11,07,2025,+03,",
        ];

        for &input in &cases {
            let result = parse(input);
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }

        let cases = [
            "132502.00,11,,,,",
            "132502.00,,07,2025,,",
            "123456.78,01,,2023,,",
            "132502.00,00,07,2025,,",
            "132502.00,29,02,2023,,",
            "132502.00,11,07,2025,,30",
            "132502.00,11,07,2025,+03,00,",
        ];

        for &input in &cases {
            let result = parse(input);
            assert!(result.is_err(), "Failed: {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_zda_values() {
        let zda = parse("201530.00,04,07,2002,00,00").unwrap();
        assert_eq!(zda.timestamp(), time::Time::from_hms(20, 15, 30).ok());
        assert_eq!(
            zda.date,
            time::Date::from_calendar_date(2002, time::Month::July, 4).ok()
        );
        assert_eq!(zda.utc_offset, Some(time::UtcOffset::UTC));

        let zda = parse("132502.00,,,,-03,30").unwrap();
        assert_eq!(zda.utc_offset, time::UtcOffset::from_hms(-3, -30, 0).ok());

        let zda = parse("132502.00,,,,-00,30").unwrap();
        assert_eq!(zda.utc_offset, time::UtcOffset::from_hms(0, -30, 0).ok());
    }
}
