#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{self as nmea0183_stream, FromFields, nmea_content::parse::with_unit};

/// PGRMZ - Garmin Altitude Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_pgrmz_garmin_altitude>
///
/// ```text
///        1  2 3
///        |  | |
///  $PGRMZ,x.x,f,x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct PGRMZ {
    #[nmea(parser(with_unit('f')))]
    /// Altitude in feet
    pub altitude_feet: Option<f32>,
    /// Position fix dimension, 2 = user altitude, 3 = GPS altitude
    pub fix_dimension: Option<u8>,
}

impl PGRMZ {
    /// Altitude converted to meters.
    pub fn altitude_meters(&self) -> Option<f32> {
        self.altitude_feet.map(|feet| feet * 0.3048)
    }
}
