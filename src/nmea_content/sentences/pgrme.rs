#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{self as nmea0183_stream, FromFields, nmea_content::parse::with_unit};

/// PGRME - Garmin Estimated Error Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_pgrme_garmin_estimated_error>
///
/// ```text
///        1   2 3   4 5   6
///        |   | |   | |   |
///  $PGRME,x.x,M,x.x,M,x.x,M*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct PGRME {
    #[nmea(parser(with_unit('M')))]
    /// Estimated horizontal position error in meters
    pub horizontal_error: Option<f32>,
    #[nmea(parser(with_unit('M')))]
    /// Estimated vertical position error in meters
    pub vertical_error: Option<f32>,
    #[nmea(parser(with_unit('M')))]
    /// Overall spherical equivalent position error in meters
    pub spherical_error: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fields;

    #[test]
    fn test_pgrme_parsing() {
        let raw: Vec<String> = "15.0,M,45.0,M,25.0,M".split(',').map(str::to_string).collect();
        let pgrme = PGRME::from_fields(&mut Fields::new(&raw)).unwrap();
        assert_eq!(pgrme.horizontal_error, Some(15.0));
        assert_eq!(pgrme.vertical_error, Some(45.0));
        assert_eq!(pgrme.spherical_error, Some(25.0));

        let raw: Vec<String> = "15.0,f,45.0,M,25.0,M".split(',').map(str::to_string).collect();
        assert!(PGRME::from_fields(&mut Fields::new(&raw)).is_err());
    }
}
